//! On-device adaptive learning engine.
//!
//! Six deterministic engines — SM-2 scheduling, quiz generation and scoring,
//! adaptive difficulty, progress tracking, gamification, and recommendations
//! — share one key→JSON store behind the [`LearningEngine`] facade. The core
//! performs no I/O beyond that store and runs fully offline.

mod facade;
mod options;

pub use crate::facade::{LearningEngine, StudyResult};
pub use crate::options::{EngineOptions, EngineOptionsBuilder};

pub use gamify_core::{GamificationEngine, badge_registry};
pub use learn_domain::{
    AnswerRecord, BadgeTier, Card, Difficulty, EarnedBadge, LearningProgress, Question,
    QuestionType, Quiz, QuizResult, Rating, StreakInfo, StudyEvent, Subject, SubjectCategory,
    SubjectProgress, XpEvent,
};
pub use local_store::{LocalStore, StoreError, keys};
pub use progress_core::{AdaptiveEngine, PerformanceSnapshot, ProgressTracker, Trend};
pub use quiz_core::{QuizError, QuizGenerator, score_quiz};
pub use recommend_core::{Priority, Recommendation, RecommendationEngine, RecommendationKind};
pub use scheduler_core::{Sm2Config, Sm2Scheduler, study_queue};
