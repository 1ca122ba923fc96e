//! Recall ratings reported by the learner after each review.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Self-reported quality of recall for a single card review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// Failed to recall; repeat soon.
    Again,
    /// Recalled with serious difficulty.
    Hard,
    /// Recalled correctly.
    Good,
    /// Recalled effortlessly.
    Easy,
}

impl Rating {
    /// SM-2 quality grade for this rating.
    #[must_use]
    pub const fn quality(self) -> u8 {
        match self {
            Rating::Again => 1,
            Rating::Hard => 2,
            Rating::Good => 4,
            Rating::Easy => 5,
        }
    }

    /// A review counts as correct when its quality grade reaches 4.
    #[must_use]
    pub const fn is_correct(self) -> bool {
        self.quality() >= 4
    }

    /// All ratings in ascending quality order.
    #[must_use]
    pub const fn all() -> [Rating; 4] {
        [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy]
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        };
        f.write_str(name)
    }
}
