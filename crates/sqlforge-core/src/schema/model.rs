//! Schema context models.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlForgeError};

/// A named table definition (DDL text) registered by a user so it can be
/// attached to a natural-language question for grounding.
///
/// `table_name` is the identity key: unique per user and immutable after
/// creation. `id` and `operator` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub table_name: String,
    pub ddl_context: String,
    /// Owning username.
    pub operator: String,
}

/// Client-side input for creating or editing a schema context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDraft {
    pub table_name: String,
    pub ddl_context: String,
}

impl SchemaDraft {
    pub fn new(table_name: impl Into<String>, ddl_context: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ddl_context: ddl_context.into(),
        }
    }

    /// Local check before any network call: both fields required.
    pub fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() || self.ddl_context.trim().is_empty() {
            return Err(SqlForgeError::validation(
                "Table name and DDL context are required.",
            ));
        }
        Ok(())
    }
}
