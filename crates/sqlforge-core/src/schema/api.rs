//! Schema service client trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::schema::model::{SchemaContext, SchemaDraft};
use crate::session::Session;

/// Client for the remote schema-context store, scoped to the session's user.
#[async_trait]
pub trait SchemaApi: Send + Sync {
    /// All schema contexts registered by the session's user, in server order.
    async fn list(&self, session: &Session) -> Result<Vec<SchemaContext>>;

    /// Creates or replaces the schema context keyed by the draft's
    /// table_name. A Conflict error carries the server's detail message
    /// when the name already exists for a create.
    async fn upsert(&self, session: &Session, draft: &SchemaDraft) -> Result<SchemaContext>;

    /// Deletes the schema context with the given table name.
    async fn delete(&self, session: &Session, table_name: &str) -> Result<()>;
}
