//! Error types for the HomeChores profile store.
//!
//! Store operations either succeed or fail for one of a handful of reasons.
//! Storage faults are carried through rather than swallowed.

use thiserror::Error;

/// Main error type for profile store operations.
#[derive(Error, Debug)]
pub enum ChoresError {
    /// Another account already uses this email address.
    #[error("Email already in use: {0}")]
    EmailTaken(String),

    /// No account matched the email/password pair.
    ///
    /// Deliberately carries no detail about which half was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Worker profile update attempted without an active worker session.
    #[error("Not authorized: an active worker session is required")]
    NotAuthorized,

    /// Backend read, write or removal failed.
    #[error("Storage error on '{key}': {message}")]
    Storage { key: String, message: String },

    /// A stored blob could not be decoded.
    #[error("Corrupted blob '{key}': {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Password hashing failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic invalid input error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, ChoresError>;
