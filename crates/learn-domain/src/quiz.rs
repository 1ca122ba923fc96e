//! Quiz content types and attempt records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::difficulty::Difficulty;

/// Kinds of questions the generator can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    FillInBlank,
    Matching,
}

/// One generated question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub kind: QuestionType,
    /// Presented choices; empty for free-form answers.
    pub options: Vec<String>,
    /// Accepted answers; a submission matching any of them is correct.
    pub correct_answers: Vec<String>,
    pub hint: Option<String>,
    pub explanation: Option<String>,
    pub points: f64,
    pub difficulty: Difficulty,
    /// Card the question was synthesized from, when applicable.
    pub source_card_id: Option<Uuid>,
}

impl Question {
    /// Correctness rule: case-insensitive, whitespace-trimmed match against
    /// any accepted answer.
    #[must_use]
    pub fn accepts(&self, submitted: &str) -> bool {
        let submitted = submitted.trim();
        self.correct_answers
            .iter()
            .any(|answer| answer.trim().eq_ignore_ascii_case(submitted))
    }
}

/// A generated quiz over one subject's cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub subject_id: Uuid,
    pub questions: Vec<Question>,
    pub time_limit_s: Option<u32>,
    /// Score fraction required to pass, in `[0, 1]`.
    pub passing_score: f64,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Sum of all question point values.
    #[must_use]
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|question| question.points).sum()
    }
}

/// Graded record for one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub submitted: String,
    pub is_correct: bool,
    pub response_time_s: f64,
}

/// Outcome of scoring one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: Uuid,
    pub subject_id: Uuid,
    pub answers: Vec<AnswerRecord>,
    /// Fraction of available points earned, in `[0, 1]`.
    pub score: f64,
    pub points_earned: f64,
    pub points_available: f64,
    pub time_taken_s: f64,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
}
