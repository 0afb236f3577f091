//! HTTP implementation of the auth service client.

use async_trait::async_trait;
use serde::Deserialize;
use sqlforge_core::auth::{
    AuthApi, Credentials, PasswordResetRequest, RecoveryChallenge, RegistrationPayload,
};
use sqlforge_core::error::Result;
use sqlforge_core::session::Session;

use crate::client::{ApiClient, REQUEST_TIMEOUT, transport};

/// Auth client over HTTP+JSON.
#[derive(Clone)]
pub struct HttpAuthApi {
    api: ApiClient,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: [String; 3],
}

impl HttpAuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let response = self
            .api
            .http()
            .post(self.api.url("/auth/token"))
            .json(credentials)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        let token: TokenResponse = response.json().await.map_err(transport)?;
        Ok(Session::new(token.access_token, credentials.username.clone()))
    }

    async fn register(&self, payload: &RegistrationPayload) -> Result<Session> {
        let response = self
            .api
            .http()
            .post(self.api.url("/auth/register"))
            .json(payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        // Registration issues a token immediately; the account is live.
        let token: TokenResponse = response.json().await.map_err(transport)?;
        Ok(Session::new(token.access_token, payload.user.username.clone()))
    }

    async fn recovery_questions(&self, username: &str) -> Result<RecoveryChallenge> {
        let response = self
            .api
            .http()
            .post(self.api.url("/auth/reset-password/questions"))
            .json(&serde_json::json!({ "username": username }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }

        let questions: QuestionsResponse = response.json().await.map_err(transport)?;
        Ok(RecoveryChallenge {
            username: username.to_string(),
            questions: questions.questions,
        })
    }

    async fn reset_password(&self, request: &PasswordResetRequest) -> Result<()> {
        let response = self
            .api
            .http()
            .post(self.api.url("/auth/reset-password"))
            .json(request)
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
