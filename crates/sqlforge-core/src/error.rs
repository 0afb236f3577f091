//! Error types for the sqlforge client.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire sqlforge client.
///
/// The variants map onto the client's error taxonomy: validation failures
/// detected before any network call, authentication rejection (the sole
/// global-logout trigger), conflicts, missing entities, transport faults,
/// and remote-service failures carrying the server's detail message.
#[derive(Error, Debug, Clone, Serialize)]
pub enum SqlForgeError {
    /// Client-side validation failure. No request was sent.
    #[error("{0}")]
    Validation(String),

    /// The auth service rejected the credential (HTTP 401).
    #[error("{0}")]
    Auth(String),

    /// A uniqueness conflict reported by the server (e.g. duplicate table name).
    #[error("{0}")]
    Conflict(String),

    /// Entity not found with type information
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Network-level failure: unreachable host, timeout, malformed body.
    #[error("Network error: {0}")]
    Transport(String),

    /// Remote service failure outside the taxonomy above; carries the
    /// server's detail message verbatim.
    #[error("{0}")]
    Api(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SqlForgeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Fills an empty server-detail message with a context-specific
    /// fallback, preserving the variant.
    ///
    /// The HTTP layer carries the server's `detail` verbatim and leaves
    /// the message empty when the server sent none; each flow supplies
    /// its own wording for that case ("Invalid credentials.", "Username
    /// not found or recovery not set up.", ...). Variants whose message
    /// is not server-provided are returned unchanged.
    pub fn or_detail(self, fallback: &str) -> Self {
        match self {
            Self::Auth(detail) if detail.is_empty() => Self::Auth(fallback.to_string()),
            Self::Conflict(detail) if detail.is_empty() => Self::Conflict(fallback.to_string()),
            Self::Api(detail) if detail.is_empty() => Self::Api(fallback.to_string()),
            other => other,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Auth error.
    ///
    /// An Auth error from any authenticated call is the signal that the
    /// session credential is no longer accepted; the workspace coordinator
    /// reacts with a global logout.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SqlForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SqlForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SqlForgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SqlForgeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, used at the shell boundary)
impl From<anyhow::Error> for SqlForgeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for SqlForgeError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, SqlForgeError>`.
pub type Result<T> = std::result::Result<T, SqlForgeError>;
