//! HTTP implementation of the generation client.

use async_trait::async_trait;
use sqlforge_core::error::Result;
use sqlforge_core::query::{GenerationRequest, GenerationResponse, QueryApi};
use sqlforge_core::session::Session;

use crate::client::{ApiClient, GENERATION_TIMEOUT, transport};

/// Generation client over HTTP+JSON with bearer auth.
#[derive(Clone)]
pub struct HttpQueryApi {
    api: ApiClient,
}

impl HttpQueryApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QueryApi for HttpQueryApi {
    async fn generate(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse> {
        let response = self
            .api
            .http()
            .post(self.api.url("/generate_sql"))
            .bearer_auth(&session.token)
            .json(request)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        response.json().await.map_err(transport)
    }
}
