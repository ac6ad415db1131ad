//! Chat-context message templating for pull-request feedback.
//!
//! Turns one comment, one thread, or the full review into a markdown
//! message addressed to the coding agent.

use std::fmt::Write;

use super::types::{CommentThread, PrComment};

const CALL_TO_ACTION: &str =
    "Please address this review feedback and update the pull request.";

/// Message for a single comment.
pub fn comment_chat_message(comment: &PrComment, pr_url: &str) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "Review feedback from {}:", comment.author);
    let _ = writeln!(md);
    push_comment_block(&mut md, comment);
    push_footer(&mut md, pr_url);
    md
}

/// Message for a whole thread: root first, replies in order.
pub fn thread_chat_message(thread: &CommentThread, pr_url: &str) -> String {
    let mut md = String::new();
    let _ = writeln!(
        md,
        "## Review thread ({} {})",
        thread.len(),
        plural(thread.len())
    );
    let _ = writeln!(md);
    for comment in thread.comments() {
        push_comment_block(&mut md, comment);
    }
    push_footer(&mut md, pr_url);
    md
}

/// Message for every thread of the review.
pub fn all_comments_chat_message(threads: &[CommentThread], pr_url: &str) -> String {
    let total: usize = threads.iter().map(CommentThread::len).sum();

    let mut md = String::new();
    let _ = writeln!(md, "## Review feedback ({total} {})", plural(total));
    let _ = writeln!(md);
    for thread in threads {
        for comment in thread.comments() {
            push_comment_block(&mut md, comment);
        }
    }
    push_footer(&mut md, pr_url);
    md
}

fn push_comment_block(md: &mut String, comment: &PrComment) {
    match comment.location() {
        Some(location) => {
            let _ = writeln!(md, "**{}** (`{location}`):", comment.author);
        }
        None => {
            let _ = writeln!(md, "**{}**:", comment.author);
        }
    }
    let _ = writeln!(md, "{}", comment.body);
    let _ = writeln!(md);
}

fn push_footer(md: &mut String, pr_url: &str) {
    let _ = writeln!(md, "PR: {pr_url}");
    let _ = writeln!(md, "{CALL_TO_ACTION}");
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "comment" } else { "comments" }
}
