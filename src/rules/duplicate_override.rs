//! Detection of no-op overrides: a subclass method whose body is identical
//! to the method it overrides can be dropped.
//!
//! Identical is decided in three layers. Statement trees are compared
//! structurally with a textual fallback (see `analysis::equiv`), and a
//! structurally equal pair is only reported after symbol reconciliation:
//! every fully-qualified symbol the parent body references must also be
//! referenced by the override. Without that last step, two token-identical
//! bodies importing the same short name from different namespaces would be
//! flagged even though they call different code.

use std::collections::HashSet;

use crate::analysis::{
    compare_statements, statement_count, ClassDecl, DeclarationLookup, EquivalenceVerdict, FileId,
    MethodDecl, Node, RefRole, SymbolResolver,
};

use super::{Diagnostic, RuleId, Severity};

/// Default ceiling on the number of body statements considered.
pub const DEFAULT_MAX_BODY_STATEMENTS: usize = 20;

/// Check one method for override redundancy.
///
/// Every ineligibility (missing body, deprecated method, trait or interface
/// container, abstract method, empty or oversized body, no matching parent
/// method, differing statement counts) is a silent no-result, never an
/// error: a missed detection is acceptable, a wrong one is not.
pub fn check_override_redundancy(
    method: &MethodDecl,
    class: &ClassDecl,
    lookup: &dyn DeclarationLookup,
    resolver: &dyn SymbolResolver,
    max_body_statements: usize,
    file: &str,
) -> Option<Diagnostic> {
    let body = method.body.as_deref()?;
    if method.is_deprecated || method.is_abstract || class.is_trait || class.is_interface {
        return None;
    }

    // Bound the work before walking any trees.
    let count = statement_count(body);
    if count == 0 || count > max_body_statements {
        return None;
    }

    let parent = lookup.superclass_of(class)?;
    let parent_method = lookup.method_of(parent, &method.name)?;
    let parent_body = parent_method.body.as_deref()?;
    if statement_count(parent_body) != count {
        return None;
    }

    if let EquivalenceVerdict::Mismatch { .. } = compare_statements(body, parent_body) {
        return None;
    }

    // Superset, not equality: extra symbols in the override never block the
    // report; only the parent's symbols must be reproduced.
    let own = referenced_symbols(method.file, body, resolver);
    let parents = referenced_symbols(parent_method.file, parent_body, resolver);
    if !parents.is_subset(&own) {
        return None;
    }

    Some(Diagnostic {
        rule: RuleId::DuplicateOverride,
        severity: Severity::Advisory,
        message: format!(
            "'{}' method can be dropped, it is identical to the parent's",
            method.name
        ),
        file: file.to_string(),
        line: method.name_span.start_line,
    })
}

/// Fully-qualified symbols referenced beneath a body: class references,
/// constant references and free function calls. Method calls through a
/// receiver resolve against the runtime type and are excluded; references
/// that fail to resolve contribute nothing.
fn referenced_symbols(
    file: FileId,
    body: &[Node],
    resolver: &dyn SymbolResolver,
) -> HashSet<String> {
    let mut symbols = HashSet::new();
    for stmt in body {
        collect(file, stmt, resolver, &mut symbols);
    }
    symbols
}

fn collect(file: FileId, node: &Node, resolver: &dyn SymbolResolver, out: &mut HashSet<String>) {
    if matches!(
        node.role,
        RefRole::Class | RefRole::Constant | RefRole::FreeFunction
    ) {
        if let Some(fqn) = resolver.resolve(file, node) {
            out.insert(fqn);
        }
    }
    for child in &node.children {
        collect(file, child, resolver, out);
    }
}
