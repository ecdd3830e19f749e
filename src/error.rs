//! Error types.
//!
//! Two layers:
//! - [`PredictError`] is the taxonomy of the prediction boundary (bad input,
//!   missing model, failed inference).
//! - [`AppError`] is what the binary reports: a message plus a process exit code.
//!
//! Exit codes 2, 3 and 4 belong to `PredictError` (and to unreadable profile
//! input, which is invalid input too). Terminal, logging and export failures
//! exit with 1.

use thiserror::Error;

/// Hint shown under every prediction failure.
pub const RETRY_HINT: &str = "Please check your inputs and try again.";

/// Failure of a single prediction request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// A profile field is missing or outside its domain.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The model artifact could not be loaded at startup.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model rejected or failed on a valid record.
    #[error("inference failed: {0}")]
    InferenceError(String),
}

impl PredictError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } => 2,
            Self::ModelUnavailable(_) => 3,
            Self::InferenceError(_) => 4,
        }
    }

    /// The one-line message shown to a user.
    pub fn user_message(&self) -> String {
        format!("Error in prediction: {self}")
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        Self::new(
            err.exit_code(),
            format!("{}\n{RETRY_HINT}", err.user_message()),
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
