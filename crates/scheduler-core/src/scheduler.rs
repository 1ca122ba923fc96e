//! High-level scheduler API: pure review application and rating previews.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use learn_domain::{Card, Rating};

use crate::config::Sm2Config;
use crate::queue::study_queue;
use crate::sm2::{apply_review, interval_seconds};

/// SM-2 scheduler. Holds configuration only; every operation is pure over
/// the cards passed in.
#[derive(Debug, Clone, Default)]
pub struct Sm2Scheduler {
    config: Sm2Config,
}

impl Sm2Scheduler {
    #[must_use]
    pub fn new(config: Sm2Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Sm2Config {
        &self.config
    }

    /// Apply one rating and return the updated card. The input card is not
    /// mutated; persisting the result is the caller's responsibility.
    #[must_use]
    pub fn review(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> Card {
        let mut updated = card.clone();
        apply_review(&mut updated, rating, &self.config, now);
        updated
    }

    /// Prospective next-review delay in seconds for every rating, consistent
    /// with what [`Sm2Scheduler::review`] would produce.
    #[must_use]
    pub fn preview(&self, card: &Card, now: DateTime<Utc>) -> BTreeMap<Rating, i64> {
        Rating::all()
            .into_iter()
            .map(|rating| {
                let reviewed = self.review(card, rating, now);
                (rating, interval_seconds(reviewed.interval_days))
            })
            .collect()
    }

    /// Build a study queue from the given cards; see [`study_queue`].
    #[must_use]
    pub fn build_queue(
        &self,
        cards: &[Card],
        max_new: usize,
        max_review: usize,
        now: DateTime<Utc>,
    ) -> Vec<Card> {
        study_queue(cards, max_new, max_review, now)
    }
}
