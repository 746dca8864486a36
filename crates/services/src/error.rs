//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionKey;

/// Errors emitted by `QuizSession`.
///
/// All variants describe logical state; none are transient and none leave the
/// session partially mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("the sequence catalog is empty")]
    EmptyCatalog,
    #[error("no round is active; start a new round first")]
    NoActiveRound,
    #[error("question `{key}` was already asked this round")]
    AlreadyAsked { key: QuestionKey },
    #[error("the question budget of {budget} is used up")]
    BudgetExhausted { budget: u32 },
    #[error("unknown question key: {key}")]
    UnknownQuestionKey { key: String },
}
