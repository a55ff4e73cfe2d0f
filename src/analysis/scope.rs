//! Per-file namespace scope and name qualification.
//!
//! PHP resolves short names through the file's `namespace` and `use`
//! declarations. Two files can spell the same short name and mean different
//! declarations, which is exactly the ambiguity the duplicate-override rule
//! has to see through, so qualification lives in its own type that the
//! frontend fills in and the resolver consults.

use std::collections::HashMap;

/// Namespace context of one file: current namespace plus `use` alias maps.
#[derive(Debug, Clone, Default)]
pub struct FileScope {
    pub namespace: Option<String>,
    /// alias -> fully-qualified name, from `use Foo\Bar [as Baz]`.
    pub class_uses: HashMap<String, String>,
    /// alias -> fully-qualified name, from `use function ...`.
    pub function_uses: HashMap<String, String>,
    /// alias -> fully-qualified name, from `use const ...`.
    pub const_uses: HashMap<String, String>,
}

impl FileScope {
    /// Qualify a class reference. Class names resolve deterministically:
    /// a leading `\` is absolute, an aliased head segment expands through
    /// the use map, anything else lives in the current namespace.
    pub fn qualify_class(&self, raw: &str) -> String {
        self.qualify(raw, &self.class_uses)
    }

    /// Fully-qualified name of a declaration made in this file's namespace.
    pub fn declare(&self, name: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}\\{}", ns, name),
            None => name.to_string(),
        }
    }

    /// Candidate fully-qualified names for a function reference, in probe
    /// order. Unqualified function names fall back to the global namespace
    /// when the namespaced one does not exist.
    pub fn function_candidates(&self, raw: &str) -> Vec<String> {
        self.candidates(raw, &self.function_uses)
    }

    /// Candidate fully-qualified names for a constant reference, in probe
    /// order. Same fallback behavior as functions.
    pub fn constant_candidates(&self, raw: &str) -> Vec<String> {
        self.candidates(raw, &self.const_uses)
    }

    fn qualify(&self, raw: &str, uses: &HashMap<String, String>) -> String {
        let raw = raw.trim();
        if let Some(absolute) = raw.strip_prefix('\\') {
            return absolute.to_string();
        }
        let (head, tail) = match raw.split_once('\\') {
            Some((head, tail)) => (head, Some(tail)),
            None => (raw, None),
        };
        if let Some(mapped) = uses.get(head) {
            return match tail {
                Some(tail) => format!("{}\\{}", mapped, tail),
                None => mapped.clone(),
            };
        }
        match &self.namespace {
            Some(ns) => format!("{}\\{}", ns, raw),
            None => raw.to_string(),
        }
    }

    fn candidates(&self, raw: &str, uses: &HashMap<String, String>) -> Vec<String> {
        let raw = raw.trim();
        if let Some(absolute) = raw.strip_prefix('\\') {
            return vec![absolute.to_string()];
        }
        if raw.contains('\\') {
            // Qualified names do not fall back to the global namespace.
            return vec![self.qualify(raw, uses)];
        }
        if let Some(mapped) = uses.get(raw) {
            return vec![mapped.clone()];
        }
        match &self.namespace {
            Some(ns) => vec![format!("{}\\{}", ns, raw), raw.to_string()],
            None => vec![raw.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> FileScope {
        let mut scope = FileScope {
            namespace: Some("App\\Service".to_string()),
            ..FileScope::default()
        };
        scope
            .class_uses
            .insert("Helper".to_string(), "Lib\\Util\\Helper".to_string());
        scope
            .class_uses
            .insert("Alias".to_string(), "Vendor\\Thing".to_string());
        scope
            .function_uses
            .insert("head".to_string(), "Lib\\Arr\\head".to_string());
        scope
    }

    #[test]
    fn test_qualify_class_through_use_map() {
        assert_eq!(scope().qualify_class("Helper"), "Lib\\Util\\Helper");
        assert_eq!(scope().qualify_class("Alias"), "Vendor\\Thing");
    }

    #[test]
    fn test_qualify_class_aliased_head_segment() {
        assert_eq!(scope().qualify_class("Alias\\Sub"), "Vendor\\Thing\\Sub");
    }

    #[test]
    fn test_qualify_class_falls_into_current_namespace() {
        assert_eq!(scope().qualify_class("Local"), "App\\Service\\Local");
    }

    #[test]
    fn test_leading_backslash_is_absolute() {
        assert_eq!(scope().qualify_class("\\Global\\Thing"), "Global\\Thing");
        assert_eq!(scope().function_candidates("\\strlen"), vec!["strlen"]);
    }

    #[test]
    fn test_function_candidates_fall_back_to_global() {
        assert_eq!(
            scope().function_candidates("trim"),
            vec!["App\\Service\\trim".to_string(), "trim".to_string()]
        );
        // Imported functions resolve through the use map only.
        assert_eq!(scope().function_candidates("head"), vec!["Lib\\Arr\\head"]);
    }

    #[test]
    fn test_no_namespace_means_identity() {
        let scope = FileScope::default();
        assert_eq!(scope.qualify_class("Thing"), "Thing");
        assert_eq!(scope.constant_candidates("LIMIT"), vec!["LIMIT"]);
        assert_eq!(scope.declare("main"), "main");
    }
}
