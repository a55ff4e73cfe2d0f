//! Capability traits consumed by the rules.
//!
//! Rules never reach into a live project index directly; both lookup and
//! reference resolution are injected so tests can supply fakes.

use crate::analysis::model::{ClassDecl, FileId, MethodDecl, Node};

/// Declaration lookup: superclass of a class, method of a class by name.
pub trait DeclarationLookup {
    /// The direct superclass, if it is known to the project.
    fn superclass_of(&self, class: &ClassDecl) -> Option<&ClassDecl>;

    /// A method declared on `class` itself (inherited methods excluded).
    fn method_of<'c>(&self, class: &'c ClassDecl, name: &str) -> Option<&'c MethodDecl> {
        class.method_named(name)
    }
}

/// Resolution of a reference node to the fully-qualified identity of the
/// declaration it designates. Returns `None` for anything that cannot be
/// resolved statically (dynamic call targets, unknown functions).
pub trait SymbolResolver {
    fn resolve(&self, file: FileId, reference: &Node) -> Option<String>;
}
