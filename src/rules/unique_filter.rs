//! Detection of `array_unique()` calls made redundant by the surrounding
//! call: counting or re-indexing a deduplicated array can be done in one
//! pass over `array_count_values()`.

use crate::analysis::{Node, RefRole};

use super::{Diagnostic, RuleId, Severity};

const ARRAY_KEYS_MESSAGE: &str = "'array_keys(array_count_values(...))' would be more efficient \
     (make sure to leave a comment to explain the intent)";
const COUNT_MESSAGE: &str = "'count(array_count_values(...))' would be more efficient \
     (make sure to leave a comment to explain the intent)";

/// Scan a statement sequence for counting calls wrapped around
/// `array_unique()`. The diagnostic anchors at the outer call.
pub fn check_unique_filter_calls(stmts: &[Node], file: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for stmt in stmts {
        walk(stmt, file, &mut diagnostics);
    }
    diagnostics
}

fn walk(node: &Node, file: &str, out: &mut Vec<Diagnostic>) {
    if let Some(message) = wrapped_unique_message(node) {
        out.push(Diagnostic {
            rule: RuleId::InefficientUniqueCall,
            severity: Severity::Advisory,
            message: message.to_string(),
            file: file.to_string(),
            line: node.span.start_line,
        });
    }
    for child in &node.children {
        walk(child, file, out);
    }
}

fn wrapped_unique_message(node: &Node) -> Option<&'static str> {
    let message = match callee_name(node)? {
        "array_values" => ARRAY_KEYS_MESSAGE,
        "count" => COUNT_MESSAGE,
        _ => return None,
    };
    let has_unique_argument = arguments(node).any(|arg| {
        arg.children
            .iter()
            .any(|inner| callee_name(inner) == Some("array_unique") && arguments(inner).count() == 1)
    });
    if has_unique_argument {
        Some(message)
    } else {
        None
    }
}

/// Name of a free function call, leading backslash stripped.
fn callee_name(node: &Node) -> Option<&str> {
    if node.kind != "function_call_expression" {
        return None;
    }
    node.children
        .first()
        .filter(|c| c.role == RefRole::FreeFunction)
        .map(|c| c.text.trim_start_matches('\\'))
}

fn arguments(call: &Node) -> impl Iterator<Item = &Node> {
    call.children
        .iter()
        .filter(|c| c.kind == "arguments")
        .flat_map(|args| args.children.iter().filter(|c| c.kind == "argument"))
}
