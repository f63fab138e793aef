pub mod commands;
pub mod events;
pub mod types;

pub use commands::UiCommand;
pub use events::NetworkEvent;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Sender};
