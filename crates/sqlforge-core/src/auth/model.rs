//! Credential, registration, and password-reset models.
//!
//! Wire field names follow the auth service's JSON contract; the `*Form`
//! types are raw client-side input that must pass local validation before
//! lowering into a wire payload.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlForgeError};

/// Minimum password length accepted by the auth service.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Local check before any network call: both fields required.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(SqlForgeError::validation(
                "Username and password are required.",
            ));
        }
        Ok(())
    }
}

/// `user` sub-object of the registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationUser {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Three question/answer pairs, keyed `question_i`/`answer_i` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryQuestionSet {
    pub question_1: String,
    pub answer_1: String,
    pub question_2: String,
    pub answer_2: String,
    pub question_3: String,
    pub answer_3: String,
}

/// Registration request body: user details plus the recovery set.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPayload {
    pub user: RegistrationUser,
    pub recovery: RecoveryQuestionSet,
}

/// One recovery question with the answer the user chose for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Raw registration form input.
///
/// `validate` applies every client-side rule and lowers the form into a
/// `RegistrationPayload`; a form that fails validation never reaches the
/// network.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    /// Optional; an empty string is omitted from the payload.
    pub full_name: String,
    pub questions: [QuestionAnswer; 3],
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegistrationPayload> {
        let required_filled = !self.username.trim().is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self
                .questions
                .iter()
                .all(|qa| !qa.question.trim().is_empty() && !qa.answer.trim().is_empty());
        if !required_filled {
            return Err(SqlForgeError::validation(
                "Please fill in all required fields.",
            ));
        }
        if self.password != self.confirm_password {
            return Err(SqlForgeError::validation(
                "Password and Confirm Password must match.",
            ));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(SqlForgeError::validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        let full_name = match self.full_name.trim() {
            "" => None,
            name => Some(name.to_string()),
        };

        Ok(RegistrationPayload {
            user: RegistrationUser {
                username: self.username.trim().to_string(),
                password: self.password.clone(),
                full_name,
            },
            recovery: RecoveryQuestionSet {
                question_1: self.questions[0].question.clone(),
                answer_1: self.questions[0].answer.clone(),
                question_2: self.questions[1].question.clone(),
                answer_2: self.questions[1].answer.clone(),
                question_3: self.questions[2].question.clone(),
                answer_3: self.questions[2].answer.clone(),
            },
        })
    }
}

/// The three previously-registered security questions returned by the
/// server for a username lookup. Held transiently by the recovery flow
/// and discarded on success, cancel, or go-back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecoveryChallenge {
    pub username: String,
    pub questions: [String; 3],
}

/// Raw input for the second recovery step: a new password and the three
/// answers aligned positionally with the challenge questions.
#[derive(Debug, Clone, Default)]
pub struct PasswordResetForm {
    pub new_password: String,
    pub confirm_new_password: String,
    pub answers: [String; 3],
}

impl PasswordResetForm {
    pub fn validate(&self) -> Result<()> {
        if self.new_password.is_empty()
            || self.confirm_new_password.is_empty()
            || self.answers.iter().any(|a| a.trim().is_empty())
        {
            return Err(SqlForgeError::validation(
                "Please fill in all required fields.",
            ));
        }
        if self.new_password != self.confirm_new_password {
            return Err(SqlForgeError::validation(
                "New Password and Confirm New Password must match.",
            ));
        }
        if self.new_password.len() < MIN_PASSWORD_LEN {
            return Err(SqlForgeError::validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// Password-reset request body. The questions from the challenge are
/// echoed back alongside the user's answers so the server can re-verify
/// the pairing.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub username: String,
    pub new_password: String,
    pub recovery_set: RecoveryQuestionSet,
}

impl RecoveryChallenge {
    /// Lowers a validated reset form into the wire request for this
    /// challenge. Only reachable while the recovery flow actually holds a
    /// challenge, which keeps "submit answers with no fetched questions"
    /// unrepresentable.
    pub fn build_reset_request(&self, form: &PasswordResetForm) -> Result<PasswordResetRequest> {
        form.validate()?;
        Ok(PasswordResetRequest {
            username: self.username.clone(),
            new_password: form.new_password.clone(),
            recovery_set: RecoveryQuestionSet {
                question_1: self.questions[0].clone(),
                answer_1: form.answers[0].clone(),
                question_2: self.questions[1].clone(),
                answer_2: form.answers[1].clone(),
                question_3: self.questions[2].clone(),
                answer_3: form.answers[2].clone(),
            },
        })
    }
}
