//! Difficulty tiers shared by cards, quizzes, and the adaptive engine.

use serde::{Deserialize, Serialize};

/// Difficulty tier, ordered from easiest to hardest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Next harder tier; saturates at [`Difficulty::Expert`].
    #[must_use]
    pub const fn step_up(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard | Difficulty::Expert => Difficulty::Expert,
        }
    }

    /// Next easier tier; saturates at [`Difficulty::Easy`].
    #[must_use]
    pub const fn step_down(self) -> Difficulty {
        match self {
            Difficulty::Expert => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Easy => Difficulty::Easy,
        }
    }
}
