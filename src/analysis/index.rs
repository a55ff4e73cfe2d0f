//! Project-wide declaration index.
//!
//! Built once per run over the full [`ProjectModel`]; borrows the models it
//! indexes. Implements both capabilities the rules consume: declaration
//! lookup and reference resolution.

use std::collections::{HashMap, HashSet};

use crate::analysis::model::{ClassDecl, FileId, Node, ProjectModel, RefRole};
use crate::analysis::scope::FileScope;
use crate::analysis::traits::{DeclarationLookup, SymbolResolver};

/// Index over every declaration in a project.
///
/// Class and function keys are lowercased: PHP treats both as
/// case-insensitive. Constant names stay case-sensitive.
pub struct DeclarationIndex<'p> {
    classes: HashMap<String, &'p ClassDecl>,
    functions: HashSet<String>,
    constants: HashSet<String>,
    scopes: Vec<&'p FileScope>,
}

impl<'p> DeclarationIndex<'p> {
    pub fn build(project: &'p ProjectModel) -> Self {
        let mut classes = HashMap::new();
        let mut functions = HashSet::new();
        let mut constants = HashSet::new();
        let mut scopes = Vec::with_capacity(project.files.len());

        for file in &project.files {
            scopes.push(&file.scope);
            for class in &file.classes {
                classes.insert(class.fqn.to_lowercase(), class);
            }
            for function in &file.functions {
                functions.insert(function.fqn.to_lowercase());
            }
            for constant in &file.constants {
                constants.insert(constant.fqn.clone());
            }
        }

        Self {
            classes,
            functions,
            constants,
            scopes,
        }
    }

    /// Look up a class by fully-qualified name.
    pub fn class(&self, fqn: &str) -> Option<&'p ClassDecl> {
        self.classes.get(&fqn.to_lowercase()).copied()
    }

    fn scope(&self, file: FileId) -> Option<&FileScope> {
        self.scopes.get(file).copied()
    }
}

impl DeclarationLookup for DeclarationIndex<'_> {
    fn superclass_of(&self, class: &ClassDecl) -> Option<&ClassDecl> {
        let raw = class.extends.as_deref()?;
        let scope = self.scope(class.file)?;
        self.class(&scope.qualify_class(raw))
    }
}

impl SymbolResolver for DeclarationIndex<'_> {
    fn resolve(&self, file: FileId, reference: &Node) -> Option<String> {
        let scope = self.scope(file)?;
        match reference.role {
            // Class names qualify deterministically; no index membership
            // needed for their identity.
            RefRole::Class => Some(scope.qualify_class(&reference.text)),
            RefRole::FreeFunction => scope
                .function_candidates(&reference.text)
                .into_iter()
                .find(|c| self.functions.contains(&c.to_lowercase())),
            RefRole::Constant => scope
                .constant_candidates(&reference.text)
                .into_iter()
                .find(|c| self.constants.contains(c)),
            _ => None,
        }
    }
}
