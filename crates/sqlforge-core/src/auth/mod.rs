//! Credential, registration, and password-recovery domain.

pub mod api;
pub mod model;
pub mod recovery;

pub use api::AuthApi;
pub use model::{
    Credentials, PasswordResetForm, PasswordResetRequest, QuestionAnswer, RecoveryChallenge,
    RecoveryQuestionSet, RegistrationForm, RegistrationPayload, RegistrationUser,
};
pub use recovery::RecoveryFlow;
