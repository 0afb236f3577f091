//! HTTP implementation of the schema service client.

use async_trait::async_trait;
use serde::Serialize;
use sqlforge_core::error::Result;
use sqlforge_core::schema::{SchemaApi, SchemaContext, SchemaDraft};
use sqlforge_core::session::Session;

use crate::client::{ApiClient, REQUEST_TIMEOUT, transport};

/// Schema CRUD client over HTTP+JSON.
#[derive(Clone)]
pub struct HttpSchemaApi {
    api: ApiClient,
}

#[derive(Debug, Serialize)]
struct SchemaUpsertRequest<'a> {
    table_name: &'a str,
    ddl_context: &'a str,
    operator: &'a str,
}

impl HttpSchemaApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SchemaApi for HttpSchemaApi {
    async fn list(&self, session: &Session) -> Result<Vec<SchemaContext>> {
        let response = self
            .api
            .http()
            .get(self.api.url(&format!("/schema/all/{}", session.username)))
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

    async fn upsert(&self, session: &Session, draft: &SchemaDraft) -> Result<SchemaContext> {
        let payload = SchemaUpsertRequest {
            table_name: &draft.table_name,
            ddl_context: &draft.ddl_context,
            operator: &session.username,
        };

        let response = self
            .api
            .http()
            .post(self.api.url("/schema"))
            .bearer_auth(&session.token)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn delete(&self, session: &Session, table_name: &str) -> Result<()> {
        let response = self
            .api
            .http()
            .delete(self.api.url(&format!(
                "/schema/{}/{}",
                table_name, session.username
            )))
            .bearer_auth(&session.token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        Ok(())
    }
}
