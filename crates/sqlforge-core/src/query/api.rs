//! Generation service client trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::query::model::{GenerationRequest, GenerationResponse};
use crate::session::Session;

/// Client for the SQL generation endpoint.
#[async_trait]
pub trait QueryApi: Send + Sync {
    /// Submits a generation request under the session's bearer credential.
    ///
    /// An `Auth` error means the token was rejected (401); every other
    /// failure is a transport or service error.
    async fn generate(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse>;
}
