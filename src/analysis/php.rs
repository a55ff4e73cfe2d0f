//! PHP frontend: parses sources with tree-sitter and lowers them into the
//! tree model.
//!
//! Lowering keeps every token of a statement, anonymous operators included,
//! so structural comparison can tell `+` from `-`. Comments are dropped
//! inside expressions and kept as doc statements at body level. A post-pass
//! annotates reference roles from grammar context; that is the only place
//! grammar-specific knowledge about references lives.

use std::path::Path;

use thiserror::Error;
use tree_sitter::{Language, Node as TsNode, Parser};

use crate::analysis::model::{
    ClassDecl, ConstantDecl, FileId, FileModel, FunctionDecl, MethodDecl, Node, RefRole, Span,
};
use crate::analysis::scope::FileScope;

/// Frontend failure. Partial parses are not errors; the recovered tree is
/// still lowered and the file is flagged instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("grammar failed to load: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree for {0}")]
    NoTree(String),
}

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// Kept separate from [`FileModel`] so the tree can be reused for several
/// lowering passes without re-parsing.
pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: TsNode) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// PHP source analyzer.
///
/// tree_sitter::Parser is not Sync, so a parser is created per parse call;
/// the analyzer itself is cheap to construct and thread-safe.
pub struct PhpAnalyzer {
    language: Language,
}

impl PhpAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }

    /// Parse a source file. Partial parse errors still produce a valid tree
    /// with ERROR nodes; only a complete parser failure is an error here.
    pub fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree(path.display().to_string()))?;
        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    /// Lower a parsed file into the tree model.
    pub fn lower(&self, parsed: &ParsedFile, file: FileId) -> FileModel {
        let mut model = FileModel::empty(parsed.path.clone());
        let root = parsed.tree.root_node();
        if root.has_error() {
            model.parse_error = Some("source contains syntax errors".to_string());
        }
        self.lower_items(root, parsed, file, &mut model);
        model
    }

    fn lower_items(&self, container: TsNode, parsed: &ParsedFile, file: FileId, model: &mut FileModel) {
        let mut cursor = container.walk();
        for child in container.named_children(&mut cursor) {
            match child.kind() {
                "php_tag" | "text" | "text_interpolation" | "comment" => {}
                "namespace_definition" => {
                    model.scope.namespace = parse_namespace_name(parsed.node_text(child));
                    // Braced form: declarations live in a nested body.
                    let mut inner = child.walk();
                    let nested: Vec<TsNode> = child
                        .named_children(&mut inner)
                        .filter(|n| matches!(n.kind(), "compound_statement" | "declaration_list"))
                        .collect();
                    for body in nested {
                        self.lower_items(body, parsed, file, model);
                    }
                }
                "namespace_use_declaration" => {
                    parse_use_declaration(parsed.node_text(child), &mut model.scope);
                }
                "class_declaration" => {
                    let class = self.extract_class(child, parsed, file, &model.scope, false, false);
                    model.classes.push(class);
                }
                "interface_declaration" => {
                    let class = self.extract_class(child, parsed, file, &model.scope, true, false);
                    model.classes.push(class);
                }
                "trait_declaration" => {
                    let class = self.extract_class(child, parsed, file, &model.scope, false, true);
                    model.classes.push(class);
                }
                "function_definition" => {
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| parsed.node_text(n).to_string())
                        .unwrap_or_default();
                    let body = child
                        .child_by_field_name("body")
                        .map(|b| self.lower_body(b, parsed))
                        .unwrap_or_default();
                    model.functions.push(FunctionDecl {
                        fqn: model.scope.declare(&name),
                        name,
                        body,
                        file,
                        span: Span::from_node(child),
                    });
                }
                "const_declaration" => {
                    let mut inner = child.walk();
                    for element in child.named_children(&mut inner) {
                        if element.kind() != "const_element" {
                            continue;
                        }
                        if let Some(name_node) = element.named_child(0) {
                            let name = parsed.node_text(name_node).to_string();
                            model.constants.push(ConstantDecl {
                                fqn: model.scope.declare(&name),
                                name,
                                file,
                                span: Span::from_node(element),
                            });
                        }
                    }
                }
                _ => {
                    let stmt = self.lower_statement(child, parsed);
                    if let Some(name) = defined_constant(&stmt) {
                        // define() always declares in the global namespace.
                        model.constants.push(ConstantDecl {
                            fqn: name.clone(),
                            name,
                            file,
                            span: stmt.span.clone(),
                        });
                    }
                    model.top_level.push(stmt);
                }
            }
        }
    }

    fn extract_class(
        &self,
        node: TsNode,
        parsed: &ParsedFile,
        file: FileId,
        scope: &FileScope,
        is_interface: bool,
        is_trait: bool,
    ) -> ClassDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();
        let fqn = scope.declare(&name);
        let is_abstract = has_child_kind(node, "abstract_modifier");
        let extends = base_clause_target(node, parsed);

        let mut methods = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            let mut pending_doc: Option<String> = None;
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "comment" => {
                        pending_doc = Some(parsed.node_text(member).to_string());
                    }
                    "method_declaration" => {
                        let doc = pending_doc.take();
                        methods.push(self.extract_method(member, parsed, file, doc.as_deref()));
                    }
                    _ => {
                        pending_doc = None;
                    }
                }
            }
        }

        ClassDecl {
            name,
            fqn,
            is_trait,
            is_interface,
            is_abstract,
            extends,
            methods,
            file,
            span: Span::from_node(node),
        }
    }

    fn extract_method(
        &self,
        node: TsNode,
        parsed: &ParsedFile,
        file: FileId,
        doc: Option<&str>,
    ) -> MethodDecl {
        let name_node = node.child_by_field_name("name");
        let name = name_node
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();
        let name_span = name_node.map(Span::from_node).unwrap_or_default();
        let is_deprecated = doc.map(|d| d.contains("@deprecated")).unwrap_or(false)
            || attribute_marks_deprecated(node, parsed);
        let body = node
            .child_by_field_name("body")
            .map(|b| self.lower_body(b, parsed));
        MethodDecl {
            name,
            name_span,
            is_abstract: has_child_kind(node, "abstract_modifier") || body.is_none(),
            is_deprecated,
            body,
            file,
            span: Span::from_node(node),
        }
    }

    fn lower_body(&self, body: TsNode, parsed: &ParsedFile) -> Vec<Node> {
        let mut stmts = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            stmts.push(self.lower_statement(child, parsed));
        }
        stmts
    }

    fn lower_statement(&self, node: TsNode, parsed: &ParsedFile) -> Node {
        if node.kind() == "comment" {
            return Node::leaf("comment", parsed.node_text(node), Span::from_node(node))
                .with_role(RefRole::Doc);
        }
        let mut lowered = self.lower_node(node, parsed);
        annotate(&mut lowered);
        lowered
    }

    fn lower_node(&self, node: TsNode, parsed: &ParsedFile) -> Node {
        let mut children = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            children.push(self.lower_node(child, parsed));
        }
        let text = parsed.node_text(node).to_string();
        let span = Span::from_node(node);
        if children.is_empty() {
            Node::leaf(node.kind(), text, span)
        } else {
            Node::with_children(node.kind(), text, span, children)
        }
    }
}

impl Default for PhpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn has_child_kind(node: TsNode, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn base_clause_target(node: TsNode, parsed: &ParsedFile) -> Option<String> {
    let mut cursor = node.walk();
    let base = node
        .children(&mut cursor)
        .find(|c| c.kind() == "base_clause")?;
    let mut inner = base.walk();
    let target = base
        .named_children(&mut inner)
        .find(|c| matches!(c.kind(), "name" | "qualified_name"))
        .map(|c| parsed.node_text(c).to_string());
    target
}

fn attribute_marks_deprecated(node: TsNode, parsed: &ParsedFile) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "attribute_list")
        .any(|c| parsed.node_text(c).contains("Deprecated"));
    found
}

/// Assign reference roles to a lowered statement tree from grammar context.
fn annotate(node: &mut Node) {
    let parent_kind = node.kind;
    let kinds: Vec<&'static str> = node.children.iter().map(|c| c.kind).collect();
    for i in 0..node.children.len() {
        let prev = if i > 0 { kinds[i - 1] } else { "" };
        let child = &mut node.children[i];
        child.role = classify(parent_kind, child.kind, i, prev);
        annotate(child);
    }
    // Named-argument labels look like bare constants but are not references.
    if parent_kind == "argument" && node.children.len() >= 2 && node.children[1].kind == ":" {
        node.children[0].role = RefRole::Plain;
    }
}

fn is_name(kind: &str) -> bool {
    kind == "name" || kind == "qualified_name"
}

fn classify(parent: &'static str, kind: &'static str, index: usize, prev: &'static str) -> RefRole {
    let named = is_name(kind);
    match parent {
        "function_call_expression" if index == 0 && named => RefRole::FreeFunction,
        "object_creation_expression" if named => RefRole::Class,
        "scoped_call_expression" if index == 0 && named => RefRole::Class,
        "scoped_call_expression" if kind == "name" && prev == "::" => RefRole::ReceiverMethod,
        "member_call_expression" | "nullsafe_member_call_expression"
            if kind == "name" && (prev == "->" || prev == "?->") =>
        {
            RefRole::ReceiverMethod
        }
        // Property names are not symbol references.
        "member_access_expression" | "nullsafe_member_access_expression" => RefRole::Plain,
        "class_constant_access_expression" | "scoped_property_access_expression"
            if index == 0 && named =>
        {
            RefRole::Class
        }
        "class_constant_access_expression" | "scoped_property_access_expression" => RefRole::Plain,
        "named_type" if named => RefRole::Class,
        "binary_expression" if named && prev == "instanceof" => RefRole::Class,
        _ if kind == "name" && is_expression_context(parent) => RefRole::Constant,
        _ => RefRole::Plain,
    }
}

fn is_expression_context(kind: &str) -> bool {
    kind.ends_with("_expression")
        || matches!(
            kind,
            "expression_statement"
                | "return_statement"
                | "echo_statement"
                | "print_intrinsic"
                | "argument"
                | "array_element_initializer"
                | "case_statement"
                | "match_condition_list"
                | "throw_statement"
                | "foreach_statement"
        )
}

fn parse_namespace_name(text: &str) -> Option<String> {
    let rest = text.trim().strip_prefix("namespace")?;
    let rest = rest.trim_start();
    let end = rest.find([';', '{']).unwrap_or(rest.len());
    let name = rest[..end].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UseKind {
    Class,
    Function,
    Const,
}

/// Parse a `use` declaration from its raw text. Handles aliases, comma
/// lists, `function`/`const` imports and group use (`use P\{A, B as C}`).
fn parse_use_declaration(text: &str, scope: &mut FileScope) {
    let Some(body) = text.trim().strip_prefix("use") else {
        return;
    };
    let body = body.trim().trim_end_matches(';').trim();
    let (default_kind, body) = if let Some(rest) = body.strip_prefix("function ") {
        (UseKind::Function, rest.trim())
    } else if let Some(rest) = body.strip_prefix("const ") {
        (UseKind::Const, rest.trim())
    } else {
        (UseKind::Class, body)
    };

    if let (Some(open), Some(close)) = (body.find('{'), body.rfind('}')) {
        if open < close {
            let prefix = body[..open].trim().trim_end_matches('\\');
            for clause in body[open + 1..close].split(',') {
                add_use_clause(scope, default_kind, Some(prefix), clause);
            }
            return;
        }
    }
    for clause in body.split(',') {
        add_use_clause(scope, default_kind, None, clause);
    }
}

fn add_use_clause(scope: &mut FileScope, default_kind: UseKind, prefix: Option<&str>, clause: &str) {
    let mut clause = clause.trim();
    if clause.is_empty() {
        return;
    }
    let mut kind = default_kind;
    if let Some(rest) = clause.strip_prefix("function ") {
        kind = UseKind::Function;
        clause = rest.trim();
    } else if let Some(rest) = clause.strip_prefix("const ") {
        kind = UseKind::Const;
        clause = rest.trim();
    }

    let mut parts = clause.split_whitespace();
    let Some(path) = parts.next() else {
        return;
    };
    let alias = match (parts.next(), parts.next()) {
        (Some("as"), Some(alias)) => Some(alias.to_string()),
        _ => None,
    };
    let path = match prefix {
        Some(prefix) => format!("{}\\{}", prefix, path.trim_start_matches('\\')),
        None => path.trim_start_matches('\\').to_string(),
    };
    let alias = match alias.or_else(|| path.rsplit('\\').next().map(str::to_string)) {
        Some(alias) => alias,
        None => return,
    };
    let map = match kind {
        UseKind::Class => &mut scope.class_uses,
        UseKind::Function => &mut scope.function_uses,
        UseKind::Const => &mut scope.const_uses,
    };
    map.insert(alias, path);
}

/// Name declared by a top-level `define('NAME', ...)` call, if any.
fn defined_constant(stmt: &Node) -> Option<String> {
    if stmt.kind == "function_call_expression" {
        if let Some(callee) = stmt.children.first() {
            if callee.role == RefRole::FreeFunction && callee.text == "define" {
                if let Some(name) = first_string_argument(stmt) {
                    return Some(name);
                }
            }
        }
    }
    stmt.children.iter().find_map(defined_constant)
}

fn first_string_argument(call: &Node) -> Option<String> {
    let args = call.children.iter().find(|c| c.kind == "arguments")?;
    let first = args.children.iter().find(|c| c.kind == "argument")?;
    let literal = first
        .children
        .iter()
        .find(|c| matches!(c.kind, "string" | "encapsed_string"))?;
    let name = literal.text.trim_matches(|c| c == '\'' || c == '"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
