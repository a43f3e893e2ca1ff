//! Comment forest assembly and filtering.
//!
//! The server returns comments flat, threaded only through `parent_id`;
//! [`build_forest`] assembles the nested forest and [`filter_forest`]
//! prunes it. Both are pure functions: the input is never mutated and the
//! output is an independent copy, which keeps filtering idempotent and
//! safe to run while the original response is still displayed.

use std::collections::{HashMap, HashSet};
use tessera_core::{Comment, CommentNode};

/// Assembles the nested comment forest from a flat server page.
///
/// Order is preserved: roots keep the server order of the root comments,
/// and each node's children keep the server order of its replies. A
/// comment whose parent is missing from the input (deleted mid-
/// pagination, or on an earlier page) is promoted to a root rather than
/// dropped.
pub fn build_forest(comments: Vec<Comment>) -> Vec<CommentNode> {
    let known_ids: HashSet<u64> = comments.iter().map(|c| c.id).collect();

    // Group by parent, preserving input order within each group. Comments
    // whose parent is absent from this batch are grouped as roots.
    let mut by_parent: HashMap<Option<u64>, Vec<Comment>> = HashMap::new();
    for comment in comments {
        let parent = comment.parent_id.filter(|id| known_ids.contains(id));
        by_parent.entry(parent).or_default().push(comment);
    }

    let roots = by_parent.remove(&None).unwrap_or_default();
    roots
        .into_iter()
        .map(|root| assemble(root, &mut by_parent))
        .collect()
}

fn assemble(comment: Comment, by_parent: &mut HashMap<Option<u64>, Vec<Comment>>) -> CommentNode {
    let children = by_parent
        .remove(&Some(comment.id))
        .unwrap_or_default()
        .into_iter()
        .map(|child| assemble(child, by_parent))
        .collect();
    CommentNode { comment, children }
}

/// Prunes a comment forest according to a visibility predicate.
///
/// Applies bottom-up: each node's children are filtered first, then the
/// node itself is kept only if `predicate` holds for it, with its
/// children replaced by the filtered sequence. A node the predicate
/// rejects is dropped together with its entire subtree, visible
/// descendants included - whether a soft-deleted comment with visible
/// replies should instead survive as a tombstone is a product decision
/// this function does not take.
///
/// Ordering is preserved and the result is an independent forest;
/// filtering an already-filtered forest with the same predicate returns
/// it unchanged.
pub fn filter_forest<F>(forest: &[CommentNode], predicate: &F) -> Vec<CommentNode>
where
    F: Fn(&CommentNode) -> bool,
{
    forest
        .iter()
        .filter_map(|node| {
            let children = filter_forest(&node.children, predicate);
            if predicate(node) {
                Some(CommentNode {
                    comment: node.comment.clone(),
                    children,
                })
            } else {
                None
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tessera_core::Person;

    fn author() -> Person {
        Person {
            id: 1,
            username: "mira".to_string(),
            display_name: None,
            avatar_url: None,
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn comment(id: u64, parent_id: Option<u64>) -> Comment {
        Comment {
            id,
            post_id: 99,
            parent_id,
            author: author(),
            text: format!("comment {id}"),
            rich_text: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
            deleted: false,
        }
    }

    fn deleted_comment(id: u64, parent_id: Option<u64>) -> Comment {
        Comment {
            deleted: true,
            ..comment(id, parent_id)
        }
    }

    fn ids(forest: &[CommentNode]) -> Vec<u64> {
        forest.iter().map(|n| n.comment.id).collect()
    }

    // ========================================================================
    // build_forest
    // ========================================================================

    #[test]
    fn test_build_forest_nests_replies() {
        // A post with two threads: 1 -> (2 -> 4, 3) and 5.
        let flat = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(1)),
            comment(4, Some(2)),
            comment(5, None),
        ];

        let forest = build_forest(flat);
        assert_eq!(ids(&forest), vec![1, 5]);
        assert_eq!(ids(&forest[0].children), vec![2, 3]);
        assert_eq!(ids(&forest[0].children[0].children), vec![4]);
        assert_eq!(forest[0].subtree_len(), 4);
    }

    #[test]
    fn test_build_forest_preserves_server_order() {
        let flat = vec![
            comment(10, None),
            comment(7, None),
            comment(12, Some(7)),
            comment(11, Some(7)),
        ];

        let forest = build_forest(flat);
        assert_eq!(ids(&forest), vec![10, 7]);
        assert_eq!(ids(&forest[1].children), vec![12, 11]);
    }

    #[test]
    fn test_build_forest_promotes_orphans_to_roots() {
        // Parent 1 fell off this page; its reply must still be shown.
        let flat = vec![comment(2, Some(1)), comment(3, None)];

        let forest = build_forest(flat);
        assert_eq!(ids(&forest), vec![2, 3]);
    }

    #[test]
    fn test_build_forest_of_empty_input() {
        assert!(build_forest(Vec::new()).is_empty());
    }

    // ========================================================================
    // filter_forest
    // ========================================================================

    #[test]
    fn test_rejected_node_drops_its_subtree() {
        // Forest [A[B[C]]] with predicate rejecting B yields [A]: C goes
        // down with its rejected parent, not reattached to A.
        let forest = build_forest(vec![
            comment(1, None),
            deleted_comment(2, Some(1)),
            comment(3, Some(2)),
        ]);

        let filtered = filter_forest(&forest, &|node| !node.comment.deleted);
        assert_eq!(ids(&filtered), vec![1]);
        assert!(filtered[0].children.is_empty());
    }

    #[test]
    fn test_filter_keeps_structurally_valid_remainder() {
        let forest = build_forest(vec![
            comment(1, None),
            comment(2, Some(1)),
            deleted_comment(3, Some(1)),
            comment(4, Some(2)),
        ]);

        let filtered = filter_forest(&forest, &|node| !node.comment.deleted);
        assert_eq!(ids(&filtered), vec![1]);
        assert_eq!(ids(&filtered[0].children), vec![2]);
        assert_eq!(ids(&filtered[0].children[0].children), vec![4]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let forest = build_forest(vec![
            comment(1, None),
            deleted_comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, None),
            deleted_comment(5, None),
        ]);
        let predicate = |node: &CommentNode| !node.comment.deleted;

        let once = filter_forest(&forest, &predicate);
        let twice = filter_forest(&once, &predicate);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let forest = build_forest(vec![comment(1, None), deleted_comment(2, Some(1))]);
        let before = forest.clone();

        let _ = filter_forest(&forest, &|node| !node.comment.deleted);
        assert_eq!(forest, before);
    }

    #[test]
    fn test_filter_preserves_sibling_order() {
        let forest = build_forest(vec![
            comment(3, None),
            deleted_comment(1, None),
            comment(2, None),
        ]);

        let filtered = filter_forest(&forest, &|node| !node.comment.deleted);
        assert_eq!(ids(&filtered), vec![3, 2]);
    }

    #[test]
    fn test_filter_with_always_true_predicate_is_deep_copy() {
        let forest = build_forest(vec![comment(1, None), comment(2, Some(1))]);
        let copied = filter_forest(&forest, &|_| true);
        assert_eq!(copied, forest);
    }
}
