//! Core domain types shared across the learning engine crates.

mod card;
mod difficulty;
mod event;
mod gamify;
mod progress;
mod quiz;
mod rating;
mod subject;

/// Flashcard with content, SM-2 state, and review statistics.
pub use card::Card;
/// Interval threshold (in days) at which a card counts as mastered.
pub use card::MASTERY_INTERVAL_DAYS;
/// Difficulty tiers used for cards, quizzes, and adaptive recommendations.
pub use difficulty::Difficulty;
/// Immutable record of a single study interaction.
pub use event::StudyEvent;
/// Gamification value types: badges, XP events, streak state.
pub use gamify::{BadgeTier, EarnedBadge, StreakInfo, XpEvent};
/// Per-subject and global progress aggregates.
pub use progress::{LearningProgress, SubjectProgress, RECENT_EVENTS_CAP};
/// Quiz content and scoring records.
pub use quiz::{AnswerRecord, Question, QuestionType, Quiz, QuizResult};
/// Self-reported recall rating for one review.
pub use rating::Rating;
/// Subject grouping cards under a fixed category.
pub use subject::{Subject, SubjectCategory};
