//! Session persistence trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::Session;

/// Durable storage for the session mirror.
///
/// The store lets a restarted client resume a login without re-entering
/// credentials. `load` never surfaces storage failures: an unreadable,
/// partial, or missing document is reported as "absent" so the client
/// falls back to the logged-out state rather than a half-valid session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes token and username as a single document.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Returns the persisted session, or `None` when storage is empty,
    /// unreadable, or missing either field.
    async fn load(&self) -> Option<Session>;

    /// Removes the persisted session. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<()>;
}
