//! Flashcard definition combining content, SM-2 state, and review stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::difficulty::Difficulty;

/// Interval length, in days, at which a card counts as mastered.
pub const MASTERY_INTERVAL_DAYS: f64 = 21.0;

/// Ease factor assigned to cards that have never been reviewed.
const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// A single flashcard owned by a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: Uuid,
    /// Subject this card belongs to.
    pub subject_id: Uuid,
    /// Prompt shown to the learner.
    pub front: String,
    /// Expected answer.
    pub back: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Author-assigned difficulty tier.
    pub difficulty: Difficulty,
    /// SM-2 easiness factor; never drops below the configured minimum.
    pub ease_factor: f64,
    /// Consecutive successful repetitions; reset to zero by a lapse.
    pub repetitions: u32,
    /// Current inter-repetition interval in fractional days.
    pub interval_days: f64,
    /// Instant the card next comes due.
    pub due: DateTime<Utc>,
    /// Instant of the most recent review, if any.
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Total number of reviews recorded.
    pub total_reviews: u32,
    /// Number of reviews rated correct.
    pub correct_count: u32,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Create a brand new card due immediately.
    #[must_use]
    pub fn new(subject_id: Uuid, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::new_at(subject_id, front, back, Utc::now())
    }

    /// Create a brand new card with an explicit creation instant.
    #[must_use]
    pub fn new_at(
        subject_id: Uuid,
        front: impl Into<String>,
        back: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id,
            front: front.into(),
            back: back.into(),
            tags: Vec::new(),
            difficulty: Difficulty::default(),
            ease_factor: DEFAULT_EASE_FACTOR,
            repetitions: 0,
            interval_days: 0.0,
            due: created_at,
            last_reviewed: None,
            total_reviews: 0,
            correct_count: 0,
            created_at,
        }
    }

    /// Fraction of reviews rated correct; zero for unreviewed cards.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_reviews == 0 {
            0.0
        } else {
            f64::from(self.correct_count) / f64::from(self.total_reviews)
        }
    }

    /// Whether the card is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }

    /// Whether the card has never been reviewed.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.total_reviews == 0
    }

    /// Whether a previously reviewed card has had its repetitions reset.
    #[must_use]
    pub const fn is_lapsed(&self) -> bool {
        self.repetitions == 0 && self.total_reviews > 0
    }

    /// Whether the interval has grown past the mastery threshold.
    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.interval_days >= MASTERY_INTERVAL_DAYS
    }
}
