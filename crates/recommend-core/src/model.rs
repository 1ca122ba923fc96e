//! Recommendation value types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a recommendation was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    OverdueReview,
    WeakArea,
    NewContent,
    LapsedReview,
    StaleSubject,
}

/// Urgency ordering; `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// One ranked study suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Cards to study, already capped and ordered for presentation.
    pub card_ids: Vec<Uuid>,
    pub subject_id: Option<Uuid>,
    pub estimated_minutes: u32,
}
