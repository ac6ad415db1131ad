pub mod chat;
pub mod client;
pub mod threads;
pub mod types;

pub use chat::{all_comments_chat_message, comment_chat_message, thread_chat_message};
pub use client::FeedbackClient;
pub use threads::build_comment_threads;
pub use types::{CommentThread, PrComment};
