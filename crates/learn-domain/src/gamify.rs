//! Gamification value types: badges, XP events, and streak state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Badge rarity ordering: Bronze < Silver < Gold < Platinum < Diamond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BadgeTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// A badge the learner has unlocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    /// Stable registry key, unique within the earned set.
    pub key: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub tier: BadgeTier,
    pub earned_at: DateTime<Utc>,
}

/// One XP award, retained in a bounded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpEvent {
    pub amount: u32,
    /// Display name of the rating that produced the award.
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Consecutive-calendar-day study streak state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Length of the running streak in days.
    pub current: u32,
    /// Longest streak ever recorded.
    pub longest: u32,
    /// Calendar day of the most recent study event.
    pub last_study_day: Option<NaiveDate>,
}
