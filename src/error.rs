use thiserror::Error;

use crate::form::FormErrors;

#[derive(Error, Debug)]
pub enum RosterError {
    /// The session is invalid or expired. Callers should route the user
    /// back to login; this error is never retried internally.
    #[error("session expired or invalid")]
    Unauthorized,

    /// The remote endpoint failed (network, server error, bad payload).
    /// The previous ResultSet is retained; the message is safe to show
    /// to the user.
    #[error("remote endpoint error: {0}")]
    Remote(String),

    /// Form-level validation failure. Produced by `FormSpec::validate`
    /// before a draft is submitted; never produced by the controller.
    #[error("validation failed: {0}")]
    Validation(#[from] FormErrors),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;
