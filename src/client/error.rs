pub const COMMUNICATION_ERROR_MESSAGE: &str = "A communication error occurred";
pub const GENERATION_FAILED_MESSAGE: &str = "Quiz generation failed";
pub const EMPTY_GENERATION_MESSAGE: &str = "No quizzes were generated";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save quizzes";
pub const NOTHING_TO_SAVE_MESSAGE: &str = "There are no quizzes to save";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("failed to encode request for {url}: {reason}")]
    Encode { url: String, reason: String },
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("response from {url} is not a valid envelope: {reason}")]
    Decode { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("communication error: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Server(String),
    #[error("No quizzes were generated")]
    EmptyGeneration,
}

impl GenerationError {
    /// Operator-facing text. Transport details stay in the log.
    pub fn notice_message(&self) -> String {
        match self {
            GenerationError::Transport(_) => COMMUNICATION_ERROR_MESSAGE.to_string(),
            GenerationError::Server(message) => message.clone(),
            GenerationError::EmptyGeneration => EMPTY_GENERATION_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("communication error: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Server(String),
    #[error("There are no quizzes to save")]
    NothingToSave,
}

impl SaveError {
    pub fn notice_message(&self) -> String {
        match self {
            SaveError::Transport(_) => COMMUNICATION_ERROR_MESSAGE.to_string(),
            SaveError::Server(message) => message.clone(),
            SaveError::NothingToSave => NOTHING_TO_SAVE_MESSAGE.to_string(),
        }
    }
}

/// Server error text, or `fallback` when the server sent none (or a blank one).
pub(crate) fn server_message(error: Option<String>, fallback: &str) -> String {
    error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
