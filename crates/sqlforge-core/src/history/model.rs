//! History record model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::query::model::GenerationStatus;

/// One past generation request, as stored by the server. Read-only from
/// the client's perspective.
///
/// The server serializes `gmt_create` as an ISO 8601 timestamp without a
/// timezone marker, hence the naive type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub question: String,
    #[serde(default)]
    pub generated_sql: Option<String>,
    #[serde(default)]
    pub intent_recognized: bool,
    #[serde(default)]
    pub operator: Option<String>,
    pub status: GenerationStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub gmt_create: Option<NaiveDateTime>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub ddl_context: Option<String>,
}
