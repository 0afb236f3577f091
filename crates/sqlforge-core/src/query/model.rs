//! Generation request/response models.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Request body for the generation endpoint. `table_name` and
/// `ddl_context` are null when no schema context is selected; generation
/// without grounding is a valid, narrower mode.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub question: String,
    pub need_predict_intent: bool,
    pub operator: Option<String>,
    pub table_name: Option<String>,
    pub ddl_context: Option<String>,
}

/// Overall status of a generation or history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum GenerationStatus {
    Success,
    Failed,
}

/// Detailed error information, only present on FAILED responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    pub error_message: String,
}

/// Raw response body from the generation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub status: GenerationStatus,
    #[serde(default)]
    pub result_data: Option<String>,
    #[serde(default)]
    pub error_context: Option<ErrorContext>,
}

/// Normalized outcome of a generation request: every path, including
/// client-side failures that never reached the network, collapses into
/// this single shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { sql: String },
    Failure { error_message: String },
}

impl GenerationResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl GenerationResponse {
    /// Collapses the wire response into the normalized result. A SUCCESS
    /// status without result data is malformed and reported as a failure.
    pub fn into_result(self) -> GenerationResult {
        match self.status {
            GenerationStatus::Success => match self.result_data {
                Some(sql) => GenerationResult::Success { sql },
                None => GenerationResult::failure("Server returned success without SQL output."),
            },
            GenerationStatus::Failed => {
                let message = self
                    .error_context
                    .map(|ctx| ctx.error_message)
                    .unwrap_or_else(|| "Generation failed.".to_string());
                GenerationResult::Failure {
                    error_message: message,
                }
            }
        }
    }
}
