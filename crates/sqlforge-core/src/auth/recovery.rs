//! Two-step password-recovery state machine.
//!
//! The flow is a tagged enum over its two live states. The reset request
//! can only be built through the challenge held by `AwaitingAnswers`, so
//! submitting answers without fetched questions is unrepresentable.

use crate::auth::model::RecoveryChallenge;

/// Client-side state of the password-recovery flow.
///
/// Transitions:
/// - `AwaitingUsername` → `AwaitingAnswers`: a username lookup returned
///   the stored questions.
/// - `AwaitingAnswers` → `AwaitingUsername`: "go back", an explicit
///   cancel, or a completed reset. All three discard the challenge.
///
/// A failed reset (wrong answers) is not a transition: the flow stays in
/// `AwaitingAnswers` with the fetched questions preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecoveryFlow {
    /// Initial state: collecting the account name to look up.
    #[default]
    AwaitingUsername,
    /// Challenge fetched; collecting a new password and the three answers.
    AwaitingAnswers { challenge: RecoveryChallenge },
}

impl RecoveryFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `AwaitingAnswers` with the challenge returned by the server.
    pub fn challenge_received(&mut self, challenge: RecoveryChallenge) {
        *self = Self::AwaitingAnswers { challenge };
    }

    /// Returns to `AwaitingUsername`, discarding any fetched challenge.
    /// Used for "go back", cancel, and the successful-reset exit alike.
    pub fn reset(&mut self) {
        *self = Self::AwaitingUsername;
    }

    /// The challenge currently held, if the flow is in `AwaitingAnswers`.
    pub fn challenge(&self) -> Option<&RecoveryChallenge> {
        match self {
            Self::AwaitingUsername => None,
            Self::AwaitingAnswers { challenge } => Some(challenge),
        }
    }

    /// The fetched questions, displayed as read-only labels in step two.
    pub fn questions(&self) -> Option<&[String; 3]> {
        self.challenge().map(|c| &c.questions)
    }

    pub fn is_awaiting_answers(&self) -> bool {
        matches!(self, Self::AwaitingAnswers { .. })
    }
}
