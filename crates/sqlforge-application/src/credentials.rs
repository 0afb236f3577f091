//! Login and registration use-cases.
//!
//! Local validation always runs first; a form that fails it never
//! produces a network call. Server failure details are surfaced
//! verbatim, with flow-specific fallback wording when the server sent
//! none.

use std::sync::Arc;

use sqlforge_core::auth::{AuthApi, Credentials, RegistrationForm};
use sqlforge_core::error::Result;
use sqlforge_core::session::Session;

const LOGIN_FALLBACK: &str = "Invalid credentials.";
const REGISTER_FALLBACK: &str = "Username may already exist or system error.";

/// Service for the credential flows (login and registration).
pub struct CredentialService {
    auth_api: Arc<dyn AuthApi>,
}

impl CredentialService {
    pub fn new(auth_api: Arc<dyn AuthApi>) -> Self {
        Self { auth_api }
    }

    /// Exchanges a username and password for a session.
    ///
    /// Credentials are never logged; the username appears in log output
    /// only after the server has accepted it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let credentials = Credentials::new(username.trim(), password);
        credentials.validate()?;

        let session = self
            .auth_api
            .login(&credentials)
            .await
            .map_err(|e| e.or_detail(LOGIN_FALLBACK))?;
        tracing::info!("Logged in as '{}'", session.username);
        Ok(session)
    }

    /// Registers a new account. On success the returned session is live:
    /// the service issues a token immediately, no separate login needed.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session> {
        let payload = form.validate()?;

        let session = self
            .auth_api
            .register(&payload)
            .await
            .map_err(|e| e.or_detail(REGISTER_FALLBACK))?;
        tracing::info!("Registered account '{}'", session.username);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sqlforge_core::SqlForgeError;
    use sqlforge_core::auth::{
        PasswordResetRequest, QuestionAnswer, RecoveryChallenge, RegistrationPayload,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock AuthApi counting every network call
    struct MockAuthApi {
        calls: AtomicUsize,
        fail_with: Option<SqlForgeError>,
    }

    impl MockAuthApi {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(err: SqlForgeError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(err),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn login(&self, credentials: &Credentials) -> sqlforge_core::error::Result<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(Session::new("tok-1", credentials.username.clone())),
            }
        }

        async fn register(
            &self,
            payload: &RegistrationPayload,
        ) -> sqlforge_core::error::Result<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(Session::new("tok-1", payload.user.username.clone())),
            }
        }

        async fn recovery_questions(
            &self,
            _username: &str,
        ) -> sqlforge_core::error::Result<RecoveryChallenge> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            unimplemented!("not exercised here")
        }

        async fn reset_password(
            &self,
            _request: &PasswordResetRequest,
        ) -> sqlforge_core::error::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            unimplemented!("not exercised here")
        }
    }

    fn filled_form() -> RegistrationForm {
        RegistrationForm {
            username: "alice".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
            full_name: "Alice Doe".to_string(),
            questions: [
                QuestionAnswer {
                    question: "q1".to_string(),
                    answer: "a1".to_string(),
                },
                QuestionAnswer {
                    question: "q2".to_string(),
                    answer: "a2".to_string(),
                },
                QuestionAnswer {
                    question: "q3".to_string(),
                    answer: "a3".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn login_returns_session_with_submitted_username() {
        let api = Arc::new(MockAuthApi::new());
        let service = CredentialService::new(api.clone());

        let session = service.login("alice", "pw1").await.unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(session.token, "tok-1");
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn login_rejects_empty_fields_without_network() {
        let api = Arc::new(MockAuthApi::new());
        let service = CredentialService::new(api.clone());

        assert!(service.login("", "pw").await.unwrap_err().is_validation());
        assert!(service.login("alice", "").await.unwrap_err().is_validation());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn login_fills_missing_detail_with_fallback() {
        let api = Arc::new(MockAuthApi::failing(SqlForgeError::auth("")));
        let service = CredentialService::new(api);

        let err = service.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn login_surfaces_server_detail_verbatim() {
        let api = Arc::new(MockAuthApi::failing(SqlForgeError::auth(
            "Incorrect username or password",
        )));
        let service = CredentialService::new(api);

        let err = service.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn register_rejects_password_mismatch_without_network() {
        let api = Arc::new(MockAuthApi::new());
        let service = CredentialService::new(api.clone());

        let mut form = filled_form();
        form.password = "abcdef".to_string();
        form.confirm_password = "abcdeg".to_string();

        let err = service.register(&form).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn register_rejects_any_empty_required_field_without_network() {
        let api = Arc::new(MockAuthApi::new());
        let service = CredentialService::new(api.clone());

        let mut form = filled_form();
        form.questions[2].answer.clear();

        assert!(service.register(&form).await.unwrap_err().is_validation());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn register_success_is_a_live_session() {
        let api = Arc::new(MockAuthApi::new());
        let service = CredentialService::new(api);

        let session = service.register(&filled_form()).await.unwrap();
        assert_eq!(session.username, "alice");
        assert!(!session.token.is_empty());
    }
}
