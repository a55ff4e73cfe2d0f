//! Tree model for analyzed PHP sources.
//!
//! Everything in this module is a read view: the frontend builds it once per
//! file and the rules only traverse it. Nodes own their children and carry no
//! parent links; traversal is strictly top-down.

use std::fmt;

use crate::analysis::scope::FileScope;

/// Index of a file within a [`ProjectModel`].
pub type FileId = usize;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Reference classification of a node, assigned by the frontend.
///
/// The symbol-set reconciliation in the duplicate-override rule collects
/// `Class`, `Constant` and `FreeFunction` nodes. `ReceiverMethod` marks call
/// names that resolve against a runtime receiver type; those are carried so
/// they can be explicitly excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefRole {
    /// No reference semantics.
    Plain,
    /// A documentation-only statement (doc-block or comment).
    Doc,
    /// A class name in reference position (`new`, static scope, type, `instanceof`).
    Class,
    /// A bare constant usage.
    Constant,
    /// The name of a free function call.
    FreeFunction,
    /// The name of a method call through a receiver (`->`, `?->`, `::`).
    ReceiverMethod,
}

/// One node of a lowered statement/expression tree.
///
/// `kind` is the grammar node kind; anonymous tokens keep their literal text
/// as kind, so operator differences are visible to structural comparison.
/// `text` is the raw source slice covered by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: &'static str,
    pub role: RefRole,
    pub text: String,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a leaf node.
    pub fn leaf(kind: &'static str, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            role: RefRole::Plain,
            text: text.into(),
            span,
            children: Vec::new(),
        }
    }

    /// Create an inner node with children.
    pub fn with_children(
        kind: &'static str,
        text: impl Into<String>,
        span: Span,
        children: Vec<Node>,
    ) -> Self {
        Self {
            kind,
            role: RefRole::Plain,
            text: text.into(),
            span,
            children,
        }
    }

    /// Builder-style role assignment, mostly for tests.
    pub fn with_role(mut self, role: RefRole) -> Self {
        self.role = role;
        self
    }

    /// Whether this is a documentation-only statement.
    pub fn is_doc(&self) -> bool {
        self.role == RefRole::Doc
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Number of statements in a body, not counting documentation-only entries.
///
/// Doc statements are transparent to comparison, so they must also be
/// transparent to the size pre-filter.
pub fn statement_count(body: &[Node]) -> usize {
    body.iter().filter(|s| !s.is_doc()).count()
}

/// A class, interface or trait declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    /// The short name as written.
    pub name: String,
    /// Fully-qualified name under the declaring namespace.
    pub fqn: String,
    pub is_trait: bool,
    pub is_interface: bool,
    pub is_abstract: bool,
    /// Raw `extends` target, unresolved (qualified lazily via the file scope).
    pub extends: Option<String>,
    pub methods: Vec<MethodDecl>,
    pub file: FileId,
    pub span: Span,
}

impl ClassDecl {
    /// Find an own method by name. PHP method names are case-insensitive.
    pub fn method_named(&self, name: &str) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

/// A method declaration inside a class.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    /// Span of the name token; diagnostics anchor here.
    pub name_span: Span,
    pub is_abstract: bool,
    /// Marked via `@deprecated` doc-block or a `Deprecated` attribute.
    pub is_deprecated: bool,
    /// Body statements. `None` for abstract and interface methods.
    pub body: Option<Vec<Node>>,
    pub file: FileId,
    pub span: Span,
}

/// A free function declaration.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub fqn: String,
    pub body: Vec<Node>,
    pub file: FileId,
    pub span: Span,
}

/// A namespace-level constant (`const X = ...` or `define('X', ...)`).
#[derive(Debug, Clone)]
pub struct ConstantDecl {
    pub name: String,
    pub fqn: String,
    pub file: FileId,
    pub span: Span,
}

/// Everything extracted from a single file.
#[derive(Debug, Clone)]
pub struct FileModel {
    pub path: String,
    pub scope: FileScope,
    pub classes: Vec<ClassDecl>,
    pub functions: Vec<FunctionDecl>,
    pub constants: Vec<ConstantDecl>,
    /// Statements outside any declaration, in source order.
    pub top_level: Vec<Node>,
    /// Set when the source could not be parsed cleanly. The rest of the
    /// model still holds whatever the parser recovered.
    pub parse_error: Option<String>,
}

impl FileModel {
    /// Create an empty model for a file.
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scope: FileScope::default(),
            classes: Vec::new(),
            functions: Vec::new(),
            constants: Vec::new(),
            top_level: Vec::new(),
            parse_error: None,
        }
    }

    /// Create a model recording a failed parse.
    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let mut model = Self::empty(path);
        model.parse_error = Some(error.into());
        model
    }
}

/// All analyzed files of one run. [`FileId`]s index into `files`.
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    pub files: Vec<FileModel>,
}
