//! History service client trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::history::model::HistoryRecord;
use crate::session::Session;

/// Client for the per-user query history.
#[async_trait]
pub trait HistoryApi: Send + Sync {
    /// All history records for the session's user, in server order.
    async fn list(&self, session: &Session) -> Result<Vec<HistoryRecord>>;

    /// Deletes every record for the session's user. The server answers a
    /// bare boolean indicating whether anything was removed.
    async fn clear(&self, session: &Session) -> Result<bool>;
}
