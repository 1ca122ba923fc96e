use thiserror::Error;
use uuid::Uuid;

/// Errors returned by quiz generation and scoring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// Generation was asked to synthesize questions with no allowed types.
    #[error("no question types were allowed for generation")]
    NoQuestionTypes,
    /// An answer referenced a question the quiz does not contain.
    #[error("answer references unknown question {question_id}")]
    UnknownQuestion { question_id: Uuid },
}
