//! Persisted key layout. Every core key lives under the `educationai.`
//! namespace so unrelated entries in a shared backing file survive
//! `clear_prefix` resets.

/// Prefix owned by the learning core.
pub const NAMESPACE: &str = "educationai.";

/// Serialized `LearningProgress` snapshot.
pub const PROGRESS: &str = "educationai.progress";

/// Total accumulated XP.
pub const GAMIFICATION_TOTAL_XP: &str = "educationai.gamification.totalXP";

/// Bounded sequence of XP award events.
pub const GAMIFICATION_XP_HISTORY: &str = "educationai.gamification.xpHistory";

/// Earned badge set.
pub const GAMIFICATION_BADGES: &str = "educationai.gamification.badges";

/// Streak state.
pub const GAMIFICATION_STREAK: &str = "educationai.gamification.streak";
