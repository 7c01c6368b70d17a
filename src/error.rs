//! Crate-level error types.
//!
//! [`StorefrontError`] unifies every error source (configuration, HTTP,
//! JSON, backend responses, payment provider) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own `message` field when present.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TLS configuration could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The payment provider rejected a request or returned garbage.
    #[error("payment error: {0}")]
    Payment(String),

    /// The OS keychain could not be read or written.
    #[error("credential store error: {0}")]
    Credentials(String),
}
