//! Error types for a backend submission.

use thiserror::Error;

/// Why a submission to the chat backend failed.
///
/// Every variant is terminal for the submission that produced it; the
/// front-end shows its display text to the user and renders nothing else.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The configured backend URL could not be parsed.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, DNS or body transfer failure.
    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("Backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (possibly empty).
        body: String,
    },

    /// Backend answered 2xx but the body is not a place card.
    #[error("Malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, ChatError>;
