use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvScoutError {
    #[error("transport error: {0}")]
    Transport(#[from] curl::Error),

    #[error("remote API returned {status} for {operation}: {message}")]
    Remote {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("content decode error: {0}")]
    Decode(String),

    #[error("invalid detection pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("failed to write report: {0}")]
    Write(std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl EnvScoutError {
    /// True for the error classes that are contained at the remote client
    /// boundary and never abort a run.
    pub fn is_contained(&self) -> bool {
        matches!(
            self,
            EnvScoutError::Transport(_)
                | EnvScoutError::Remote { .. }
                | EnvScoutError::Decode(_)
                | EnvScoutError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EnvScoutError>;
