//! Groups a flat list of pull-request comments into root+replies threads.

use std::collections::{HashMap, HashSet};

use super::types::{CommentThread, PrComment};

/// Build threads from a flat comment list.
///
/// A comment is a root when `in_reply_to` is absent, zero, or references
/// an id not present in the input (a dangling reference is tolerated,
/// not an error). Replies collapse onto their nearest root ancestor's
/// flat reply list; only two levels are modeled. Every input comment
/// lands in exactly one thread, in input order.
pub fn build_comment_threads(comments: &[PrComment]) -> Vec<CommentThread> {
    let index: HashMap<u64, &PrComment> =
        comments.iter().map(|comment| (comment.id, comment)).collect();

    let mut roots: Vec<&PrComment> = Vec::new();
    let mut reply_map: HashMap<u64, Vec<PrComment>> = HashMap::new();

    for comment in comments {
        if is_root(comment, &index) {
            roots.push(comment);
            continue;
        }
        match root_ancestor(comment, &index) {
            Some(root_id) => reply_map.entry(root_id).or_default().push(comment.clone()),
            // The parent chain closed a cycle; promote rather than drop.
            None => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|root| CommentThread {
            root: root.clone(),
            replies: reply_map.remove(&root.id).unwrap_or_default(),
        })
        .collect()
}

fn is_root(comment: &PrComment, index: &HashMap<u64, &PrComment>) -> bool {
    match comment.in_reply_to {
        None | Some(0) => true,
        Some(parent) => !index.contains_key(&parent),
    }
}

/// Follow the parent chain to the nearest root. `None` when the chain
/// revisits a comment (cyclic references).
fn root_ancestor(comment: &PrComment, index: &HashMap<u64, &PrComment>) -> Option<u64> {
    let mut seen: HashSet<u64> = HashSet::new();
    seen.insert(comment.id);

    // Caller guarantees the comment is not a root, so the parent exists
    // and is present in the index.
    let mut current_id = comment.in_reply_to?;
    loop {
        if !seen.insert(current_id) {
            return None;
        }
        let current = index.get(&current_id).copied()?;
        if is_root(current, index) {
            return Some(current_id);
        }
        current_id = current.in_reply_to?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: u64, in_reply_to: Option<u64>) -> PrComment {
        PrComment {
            id,
            in_reply_to,
            author: format!("user{id}"),
            body: format!("body {id}"),
            path: None,
            line: None,
            created_at: None,
        }
    }

    fn total_comments(threads: &[CommentThread]) -> usize {
        threads.iter().map(CommentThread::len).sum()
    }

    #[test]
    fn should_group_reply_under_its_root() {
        // given - one root, one reply, one dangling reference
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(99)),
        ];

        // when
        let threads = build_comment_threads(&comments);

        // then - {1, [2]} and {3, []}
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].root.id, 1);
        assert_eq!(threads[0].replies.len(), 1);
        assert_eq!(threads[0].replies[0].id, 2);
        assert_eq!(threads[1].root.id, 3);
        assert!(threads[1].replies.is_empty());
    }

    #[test]
    fn should_treat_zero_reference_as_root() {
        let comments = vec![comment(1, Some(0)), comment(2, Some(1))];

        let threads = build_comment_threads(&comments);

        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].root.id, 1);
        assert_eq!(threads[0].replies[0].id, 2);
    }

    #[test]
    fn should_place_every_comment_exactly_once() {
        let comments = vec![
            comment(10, None),
            comment(11, Some(10)),
            comment(12, Some(11)),
            comment(13, Some(7)),
            comment(14, None),
            comment(15, Some(14)),
        ];

        let threads = build_comment_threads(&comments);

        assert_eq!(total_comments(&threads), comments.len());
        // a present parent means the comment never doubles as a root
        assert!(threads.iter().all(|t| t.root.id != 11 && t.root.id != 12));
    }

    #[test]
    fn should_collapse_reply_chain_onto_root() {
        // given - 3 replies to 2 replies to 1
        let comments = vec![comment(1, None), comment(2, Some(1)), comment(3, Some(2))];

        // when
        let threads = build_comment_threads(&comments);

        // then - both replies flatten under the root, input order kept
        assert_eq!(threads.len(), 1);
        let reply_ids: Vec<u64> = threads[0].replies.iter().map(|c| c.id).collect();
        assert_eq!(reply_ids, vec![2, 3]);
    }

    #[test]
    fn should_keep_completeness_for_cyclic_references() {
        // given - 1 and 2 reply to each other
        let comments = vec![comment(1, Some(2)), comment(2, Some(1)), comment(3, None)];

        // when
        let threads = build_comment_threads(&comments);

        // then - nothing dropped, nothing duplicated, no hang
        assert_eq!(total_comments(&threads), 3);
    }

    #[test]
    fn should_preserve_root_input_order() {
        let comments = vec![comment(5, None), comment(2, None), comment(9, None)];

        let threads = build_comment_threads(&comments);

        let root_ids: Vec<u64> = threads.iter().map(|t| t.root.id).collect();
        assert_eq!(root_ids, vec![5, 2, 9]);
    }

    #[test]
    fn should_return_empty_for_empty_input() {
        assert!(build_comment_threads(&[]).is_empty());
    }
}
