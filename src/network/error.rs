use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request to chat endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat endpoint returned an undecodable body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("chat endpoint response has no string `response` field")]
    MissingReply,
}
