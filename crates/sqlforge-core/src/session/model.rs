//! Session domain model.

use serde::{Deserialize, Serialize};

/// The authenticated identity held by the client for the duration of a login.
///
/// Both fields are always present together: a token without the username it
/// was issued to (or the reverse) is not a valid session. The persistence
/// layer enforces this by treating any partial document as logged-out state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the auth service
    pub token: String,
    /// Username the token was issued to
    pub username: String,
}

impl Session {
    /// Creates a new session pairing a token with the username it belongs to.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}
