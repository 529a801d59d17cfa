//! # Error Handling
//!
//! Error types for the Gantry provider adapters, defined with `thiserror`.
//!
//! Every failure from an external collaborator is returned immediately to the
//! caller; nothing is retried or recovered at this layer. Upstream failures
//! keep the collaborator's original message (and cause, when available) for
//! diagnostics.

/// Custom result type for Gantry operations
pub type Result<T> = std::result::Result<T, GantryError>;

/// Main error type for the Gantry provider adapters
#[derive(thiserror::Error, Debug)]
pub enum GantryError {
    /// Caller-supplied input was malformed (bad PEM/X.509 material, empty
    /// domain list, malformed endpoint)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// An expected upstream resource was absent (empty instance lists)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Two upstream APIs disagree about the same entity
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Transport or API-level failure from an external collaborator,
    /// propagated verbatim
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GantryError {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound { message: message.into() }
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState { message: message.into() }
    }

    /// Create an upstream error without a cause
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream { message: message.into(), source: None }
    }

    /// Create an upstream error with the collaborator's error attached as cause
    pub fn upstream_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Upstream { message: message.into(), source: Some(source) }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }
}
