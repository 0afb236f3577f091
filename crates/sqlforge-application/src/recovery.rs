//! Password-recovery driver.
//!
//! Wraps the core `RecoveryFlow` state machine and drives it against the
//! auth service. Failed steps leave the flow where it was; only a
//! successful lookup, a successful reset, "go back", or cancel move it.

use std::sync::Arc;

use sqlforge_core::auth::{AuthApi, PasswordResetForm, RecoveryFlow};
use sqlforge_core::error::{Result, SqlForgeError};

const LOOKUP_FALLBACK: &str = "Username not found or recovery not set up.";
const RESET_FALLBACK: &str = "Incorrect recovery answers provided.";

/// Drives the two-step password-recovery flow.
pub struct PasswordRecovery {
    auth_api: Arc<dyn AuthApi>,
    flow: RecoveryFlow,
}

impl PasswordRecovery {
    pub fn new(auth_api: Arc<dyn AuthApi>) -> Self {
        Self {
            auth_api,
            flow: RecoveryFlow::new(),
        }
    }

    pub fn flow(&self) -> &RecoveryFlow {
        &self.flow
    }

    /// The fetched questions, once step one has succeeded.
    pub fn questions(&self) -> Option<&[String; 3]> {
        self.flow.questions()
    }

    /// Step one: looks up the stored recovery questions.
    ///
    /// On success the flow enters `AwaitingAnswers`; on failure it stays
    /// in `AwaitingUsername` and the error is surfaced inline.
    pub async fn submit_username(&mut self, username: &str) -> Result<&[String; 3]> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SqlForgeError::validation("Username is required."));
        }

        let challenge = self
            .auth_api
            .recovery_questions(username)
            .await
            .map_err(|e| e.or_detail(LOOKUP_FALLBACK))?;
        self.flow.challenge_received(challenge);
        Ok(self.flow.questions().expect("challenge just received"))
    }

    /// Step two: submits the new password and the three answers.
    ///
    /// The local password-match check runs before any network call. On
    /// success all recovery state is discarded and the caller returns to
    /// the login view; on wrong answers the flow stays in
    /// `AwaitingAnswers` with the questions preserved.
    pub async fn submit_answers(&mut self, form: &PasswordResetForm) -> Result<()> {
        let challenge = self.flow.challenge().ok_or_else(|| {
            SqlForgeError::internal("No recovery challenge fetched; submit a username first.")
        })?;

        let request = challenge.build_reset_request(form)?;
        self.auth_api
            .reset_password(&request)
            .await
            .map_err(|e| e.or_detail(RESET_FALLBACK))?;

        self.flow.reset();
        Ok(())
    }

    /// Returns to the username step, discarding the fetched questions.
    pub fn go_back(&mut self) {
        self.flow.reset();
    }

    /// Abandons the flow entirely (back to the login view).
    pub fn cancel(&mut self) {
        self.flow.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sqlforge_core::auth::{
        Credentials, PasswordResetRequest, RecoveryChallenge, RegistrationPayload,
    };
    use sqlforge_core::session::Session;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock AuthApi for the recovery endpoints
    struct MockAuthApi {
        questions_result: Mutex<Option<sqlforge_core::error::Result<RecoveryChallenge>>>,
        reset_result: Mutex<Option<sqlforge_core::error::Result<()>>>,
        reset_calls: AtomicUsize,
        last_reset: Mutex<Option<PasswordResetRequest>>,
    }

    impl MockAuthApi {
        fn new() -> Self {
            Self {
                questions_result: Mutex::new(None),
                reset_result: Mutex::new(None),
                reset_calls: AtomicUsize::new(0),
                last_reset: Mutex::new(None),
            }
        }

        fn with_questions(self, result: sqlforge_core::error::Result<RecoveryChallenge>) -> Self {
            *self.questions_result.lock().unwrap() = Some(result);
            self
        }

        fn with_reset(self, result: sqlforge_core::error::Result<()>) -> Self {
            *self.reset_result.lock().unwrap() = Some(result);
            self
        }
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn login(&self, _: &Credentials) -> sqlforge_core::error::Result<Session> {
            unimplemented!("not exercised here")
        }

        async fn register(&self, _: &RegistrationPayload) -> sqlforge_core::error::Result<Session> {
            unimplemented!("not exercised here")
        }

        async fn recovery_questions(
            &self,
            _username: &str,
        ) -> sqlforge_core::error::Result<RecoveryChallenge> {
            self.questions_result
                .lock()
                .unwrap()
                .clone()
                .expect("questions result not configured")
        }

        async fn reset_password(
            &self,
            request: &PasswordResetRequest,
        ) -> sqlforge_core::error::Result<()> {
            self.reset_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_reset.lock().unwrap() = Some(request.clone());
            self.reset_result
                .lock()
                .unwrap()
                .clone()
                .expect("reset result not configured")
        }
    }

    fn challenge() -> RecoveryChallenge {
        RecoveryChallenge {
            username: "alice".to_string(),
            questions: ["q1".to_string(), "q2".to_string(), "q3".to_string()],
        }
    }

    fn reset_form() -> PasswordResetForm {
        PasswordResetForm {
            new_password: "abcdef".to_string(),
            confirm_new_password: "abcdef".to_string(),
            answers: ["a1".to_string(), "a2".to_string(), "a3".to_string()],
        }
    }

    #[tokio::test]
    async fn happy_path_walks_both_steps() {
        let api = Arc::new(
            MockAuthApi::new()
                .with_questions(Ok(challenge()))
                .with_reset(Ok(())),
        );
        let mut recovery = PasswordRecovery::new(api.clone());

        let questions = recovery.submit_username("alice").await.unwrap();
        assert_eq!(questions[0], "q1");
        assert!(recovery.flow().is_awaiting_answers());

        recovery.submit_answers(&reset_form()).await.unwrap();
        // Flow complete: all recovery state discarded.
        assert_eq!(*recovery.flow(), RecoveryFlow::AwaitingUsername);

        // The fetched questions were echoed back alongside the answers.
        let sent = api.last_reset.lock().unwrap().clone().unwrap();
        assert_eq!(sent.recovery_set.question_1, "q1");
        assert_eq!(sent.recovery_set.answer_3, "a3");
    }

    #[tokio::test]
    async fn failed_lookup_stays_awaiting_username() {
        let api =
            Arc::new(MockAuthApi::new().with_questions(Err(sqlforge_core::SqlForgeError::api(""))));
        let mut recovery = PasswordRecovery::new(api);

        let err = recovery.submit_username("ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "Username not found or recovery not set up.");
        assert_eq!(*recovery.flow(), RecoveryFlow::AwaitingUsername);
    }

    #[tokio::test]
    async fn wrong_answers_keep_questions() {
        let api = Arc::new(
            MockAuthApi::new()
                .with_questions(Ok(challenge()))
                .with_reset(Err(sqlforge_core::SqlForgeError::api(""))),
        );
        let mut recovery = PasswordRecovery::new(api);

        recovery.submit_username("alice").await.unwrap();
        let err = recovery.submit_answers(&reset_form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect recovery answers provided.");

        // Idempotent: still awaiting answers, questions preserved.
        assert!(recovery.flow().is_awaiting_answers());
        assert_eq!(recovery.questions().unwrap()[2], "q3");
    }

    #[tokio::test]
    async fn mismatched_passwords_never_reach_the_network() {
        let api = Arc::new(MockAuthApi::new().with_questions(Ok(challenge())));
        let mut recovery = PasswordRecovery::new(api.clone());

        recovery.submit_username("alice").await.unwrap();

        let mut form = reset_form();
        form.confirm_new_password = "different".to_string();
        let err = recovery.submit_answers(&form).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(api.reset_calls.load(Ordering::SeqCst), 0);
        assert!(recovery.flow().is_awaiting_answers());
    }

    #[tokio::test]
    async fn go_back_discards_fetched_questions() {
        let api = Arc::new(MockAuthApi::new().with_questions(Ok(challenge())));
        let mut recovery = PasswordRecovery::new(api);

        recovery.submit_username("alice").await.unwrap();
        recovery.go_back();

        assert_eq!(*recovery.flow(), RecoveryFlow::AwaitingUsername);
        assert!(recovery.questions().is_none());
    }

    #[tokio::test]
    async fn answers_without_challenge_are_rejected() {
        let api = Arc::new(MockAuthApi::new());
        let mut recovery = PasswordRecovery::new(api.clone());

        let err = recovery.submit_answers(&reset_form()).await.unwrap_err();
        assert!(matches!(err, sqlforge_core::SqlForgeError::Internal(_)));
        assert_eq!(api.reset_calls.load(Ordering::SeqCst), 0);
    }
}
