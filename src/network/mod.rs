pub mod backend;
pub mod client;
pub mod error;

pub use backend::{ChatBackend, HttpChatBackend};
pub use client::{ChatClient, ERROR_REPLY, fetch_bot_response};
pub use error::ChatError;
