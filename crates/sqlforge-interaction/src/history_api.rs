//! HTTP implementation of the history client.

use async_trait::async_trait;
use sqlforge_core::error::Result;
use sqlforge_core::history::{HistoryApi, HistoryRecord};
use sqlforge_core::session::Session;

use crate::client::{ApiClient, REQUEST_TIMEOUT, transport};

/// History client over HTTP+JSON with bearer auth.
#[derive(Clone)]
pub struct HttpHistoryApi {
    api: ApiClient,
}

impl HttpHistoryApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HistoryApi for HttpHistoryApi {
    async fn list(&self, session: &Session) -> Result<Vec<HistoryRecord>> {
        let response = self
            .api
            .http()
            .get(self.api.url(&format!("/history/{}", session.username)))
            .bearer_auth(&session.token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn clear(&self, session: &Session) -> Result<bool> {
        let response = self
            .api
            .http()
            .delete(self.api.url(&format!("/history/{}", session.username)))
            .bearer_auth(&session.token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        // The server answers a bare JSON boolean.
        response.json().await.map_err(transport)
    }
}
