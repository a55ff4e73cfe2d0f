//! Tree model and semantic facts for analyzed PHP sources.
//!
//! The frontend (`php`) parses a file with tree-sitter and lowers it into an
//! owned model (`model`): declarations, bodies as statement trees, and a
//! per-file namespace scope (`scope`). A project-wide index (`index`) over
//! the lowered files provides the two capabilities rules consume
//! (`traits`): declaration lookup and reference resolution. Statement
//! equivalence (`equiv`) is a pure function over the model.

mod equiv;
mod index;
mod model;
mod php;
mod scope;
mod traits;

pub use equiv::{compare_statements, structurally_equal, EquivalenceVerdict};
pub use index::DeclarationIndex;
pub use model::{
    statement_count, ClassDecl, ConstantDecl, FileId, FileModel, FunctionDecl, MethodDecl, Node,
    ProjectModel, RefRole, Span,
};
pub use php::{ParseError, ParsedFile, PhpAnalyzer};
pub use scope::FileScope;
pub use traits::{DeclarationLookup, SymbolResolver};
