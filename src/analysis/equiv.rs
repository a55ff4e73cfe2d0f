//! Structural equivalence of statement sequences.
//!
//! Two statements are structurally equivalent when they have the same node
//! kind and every corresponding child is equivalent, down to leaf tokens
//! compared by exact text. A textual fallback covers the one place the
//! structural check is unreliable: assignment-style statements, where the
//! grammar can split the same source into differently shaped trees. The
//! fallback only applies when both statements render to text of identical
//! length; across different lengths it would accept genuinely different code.

use crate::analysis::model::{statement_count, Node};

/// Outcome of comparing two statement sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivalenceVerdict {
    Equal,
    /// First pair that failed to match, by comparison step.
    Mismatch { at: usize },
}

/// Recursive kind-and-children equality, leaf tokens by exact text.
pub fn structurally_equal(a: &Node, b: &Node) -> bool {
    if a.kind != b.kind {
        return false;
    }
    if a.is_leaf() && b.is_leaf() {
        return a.text == b.text;
    }
    if a.children.len() != b.children.len() {
        return false;
    }
    a.children
        .iter()
        .zip(&b.children)
        .all(|(x, y)| structurally_equal(x, y))
}

/// Compare two statement sequences pairwise.
///
/// Documentation-only statements are skipped independently on both sides
/// before each step, so the loop runs one extra iteration to tolerate a
/// trailing doc statement. Running off either end is agreement: the
/// remaining region was documentation only.
pub fn compare_statements(own: &[Node], parent: &[Node]) -> EquivalenceVerdict {
    let count = statement_count(own);
    let mut i = 0;
    let mut j = 0;
    for index in 0..=count {
        while i < own.len() && own[i].is_doc() {
            i += 1;
        }
        while j < parent.len() && parent[j].is_doc() {
            j += 1;
        }
        if i >= own.len() || j >= parent.len() {
            break;
        }

        let (a, b) = (&own[i], &parent[j]);
        if !structurally_equal(a, b) {
            let same_text = a.text.len() == b.text.len() && a.text == b.text;
            if !same_text {
                return EquivalenceVerdict::Mismatch { at: index };
            }
        }
        i += 1;
        j += 1;
    }
    EquivalenceVerdict::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{RefRole, Span};

    fn stmt(text: &str) -> Node {
        Node::leaf("expression_statement", text, Span::default())
    }

    fn doc(text: &str) -> Node {
        Node::leaf("comment", text, Span::default()).with_role(RefRole::Doc)
    }

    #[test]
    fn test_identical_sequences_are_equal() {
        let own = vec![stmt("$a = 1;"), stmt("return $a;")];
        let parent = vec![stmt("$a = 1;"), stmt("return $a;")];
        assert_eq!(compare_statements(&own, &parent), EquivalenceVerdict::Equal);
    }

    #[test]
    fn test_mismatch_reports_first_differing_step() {
        let own = vec![stmt("$a = 1;"), stmt("return $a;")];
        let parent = vec![stmt("$a = 1;"), stmt("return $b;")];
        assert_eq!(
            compare_statements(&own, &parent),
            EquivalenceVerdict::Mismatch { at: 1 }
        );
    }

    #[test]
    fn test_structural_equality_recurses_into_children() {
        let a = Node::with_children(
            "expression_statement",
            "$a + $b;",
            Span::default(),
            vec![Node::with_children(
                "binary_expression",
                "$a + $b",
                Span::default(),
                vec![
                    Node::leaf("variable_name", "$a", Span::default()),
                    Node::leaf("+", "+", Span::default()),
                    Node::leaf("variable_name", "$b", Span::default()),
                ],
            )],
        );
        let mut b = a.clone();
        assert!(structurally_equal(&a, &b));

        b.children[0].children[1] = Node::leaf("-", "-", Span::default());
        assert!(!structurally_equal(&a, &b));
    }

    #[test]
    fn test_leaf_against_subtree_is_not_equivalent() {
        let a = stmt("$a = $b;");
        let b = Node::with_children(
            "expression_statement",
            "$a = $c;",
            Span::default(),
            vec![Node::leaf("assignment_expression", "$a = $c", Span::default())],
        );
        assert!(!structurally_equal(&a, &b));
    }

    #[test]
    fn test_doc_statements_are_transparent_on_both_sides() {
        let own = vec![doc("/** sets a */"), stmt("$a = 1;"), stmt("return $a;")];
        let parent = vec![stmt("$a = 1;"), doc("// note"), stmt("return $a;")];
        assert_eq!(compare_statements(&own, &parent), EquivalenceVerdict::Equal);
    }

    #[test]
    fn test_trailing_doc_statement_is_tolerated() {
        let own = vec![stmt("return 1;"), doc("/** done */")];
        let parent = vec![stmt("return 1;")];
        assert_eq!(compare_statements(&own, &parent), EquivalenceVerdict::Equal);
    }

    #[test]
    fn test_all_doc_sequences_compare_equal() {
        let own = vec![doc("/** a */")];
        let parent = vec![doc("// b"), doc("// c")];
        assert_eq!(compare_statements(&own, &parent), EquivalenceVerdict::Equal);
    }

    #[test]
    fn test_fallback_accepts_identical_text_with_different_shape() {
        // Same raw text, structurally different trees: the textual fallback
        // must treat the pair as matching.
        let own = vec![Node::with_children(
            "expression_statement",
            "$a = (int) $b;",
            Span::default(),
            vec![Node::leaf("assignment_expression", "$a = (int) $b", Span::default())],
        )];
        let parent = vec![stmt("$a = (int) $b;")];
        assert_eq!(compare_statements(&own, &parent), EquivalenceVerdict::Equal);
    }

    #[test]
    fn test_fallback_never_applies_across_different_lengths() {
        let own = vec![stmt("$a = $b;")];
        let parent = vec![stmt("$a = $bb;")];
        assert_eq!(
            compare_statements(&own, &parent),
            EquivalenceVerdict::Mismatch { at: 0 }
        );
    }
}
