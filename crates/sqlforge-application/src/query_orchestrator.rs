//! Generation use-case.
//!
//! Normalizes every path of a generation attempt - including client-side
//! failures that never reach the network - into one outcome shape the
//! composing layer can apply.

use std::sync::Arc;

use sqlforge_core::query::{GenerationRequest, GenerationResult, QueryApi};
use sqlforge_core::schema::SchemaContext;
use sqlforge_core::session::Session;

const AUTH_REQUIRED: &str = "Authentication required. Please log in.";
const SESSION_EXPIRED: &str = "Session expired or invalid token. Please log in again.";
const GENERIC_FAILURE: &str = "Network or internal server error.";

/// Outcome of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub result: GenerationResult,
    /// A new history entry likely exists server-side; the history view
    /// should refetch. Pure notification - the orchestrator never touches
    /// history storage.
    pub history_changed: bool,
    /// The session credential was rejected mid-call (401); the composing
    /// layer must trigger a global logout.
    pub session_expired: bool,
}

impl GenerationOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            result: GenerationResult::failure(message),
            history_changed: false,
            session_expired: false,
        }
    }
}

/// Submits generation requests carrying the selected schema context.
pub struct QueryOrchestrator {
    query_api: Arc<dyn QueryApi>,
}

impl QueryOrchestrator {
    pub fn new(query_api: Arc<dyn QueryApi>) -> Self {
        Self { query_api }
    }

    /// Generates SQL for a natural-language question.
    ///
    /// `selected_schema` annotates the request when present; generation
    /// without a schema context is a valid, narrower mode.
    pub async fn generate(
        &self,
        session: Option<&Session>,
        question: &str,
        use_intent_recognition: bool,
        selected_schema: Option<&SchemaContext>,
    ) -> GenerationOutcome {
        let Some(session) = session else {
            return GenerationOutcome::failed(AUTH_REQUIRED);
        };
        if question.trim().is_empty() {
            return GenerationOutcome::failed("Enter a question to generate SQL for.");
        }

        let request = GenerationRequest {
            question: question.to_string(),
            need_predict_intent: use_intent_recognition,
            operator: Some(session.username.clone()),
            table_name: selected_schema.map(|s| s.table_name.clone()),
            ddl_context: selected_schema.map(|s| s.ddl_context.clone()),
        };

        match self.query_api.generate(session, &request).await {
            Ok(response) => {
                let result = response.into_result();
                let history_changed = result.is_success();
                GenerationOutcome {
                    result,
                    history_changed,
                    session_expired: false,
                }
            }
            Err(e) if e.is_auth() => GenerationOutcome {
                result: GenerationResult::failure(SESSION_EXPIRED),
                history_changed: false,
                session_expired: true,
            },
            Err(e) => {
                tracing::warn!("Generation request failed: {}", e);
                GenerationOutcome::failed(e.or_detail(GENERIC_FAILURE).to_string())
            }
        }
    }
}
