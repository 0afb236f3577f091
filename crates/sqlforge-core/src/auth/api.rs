//! Auth service client trait.

use async_trait::async_trait;

use crate::auth::model::{Credentials, PasswordResetRequest, RecoveryChallenge, RegistrationPayload};
use crate::error::Result;
use crate::session::Session;

/// Client for the remote authentication service.
///
/// Implementations must never log or store credentials, answers, or
/// tokens. Server failure details are carried in the returned error so
/// the caller can surface them verbatim.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer session.
    async fn login(&self, credentials: &Credentials) -> Result<Session>;

    /// Registers a new account. A token is issued immediately, so the
    /// returned session is live without a separate login.
    async fn register(&self, payload: &RegistrationPayload) -> Result<Session>;

    /// Looks up the stored recovery questions for a username.
    async fn recovery_questions(&self, username: &str) -> Result<RecoveryChallenge>;

    /// Resets the password by answering the recovery challenge.
    async fn reset_password(&self, request: &PasswordResetRequest) -> Result<()>;
}
