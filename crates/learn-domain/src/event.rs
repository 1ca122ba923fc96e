//! Study events: the immutable record every engine consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rating::Rating;

/// One study interaction, recorded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyEvent {
    /// Card that was reviewed.
    pub card_id: Uuid,
    /// Subject the card belongs to.
    pub subject_id: Uuid,
    /// Recall rating reported by the learner.
    pub rating: Rating,
    /// Time taken to answer, in seconds.
    pub response_time_s: f64,
    /// Instant the review happened.
    pub timestamp: DateTime<Utc>,
}

impl StudyEvent {
    #[must_use]
    pub fn new(
        card_id: Uuid,
        subject_id: Uuid,
        rating: Rating,
        response_time_s: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            card_id,
            subject_id,
            rating,
            response_time_s,
            timestamp,
        }
    }

    /// Whether the underlying rating counts as a correct recall.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.rating.is_correct()
    }
}
