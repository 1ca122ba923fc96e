//! Stateful gamification engine persisting XP, streak, and badges.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use learn_domain::{EarnedBadge, LearningProgress, StreakInfo, StudyEvent, XpEvent};
use local_store::{LocalStore, keys};

use crate::badges::{BadgeContext, badge_registry};
use crate::streak;
use crate::xp::{level_for_xp, level_progress, xp_for_event};

/// Maximum number of XP events retained in history.
const XP_HISTORY_CAP: usize = 1_000;

/// Owner of all gamification state, loaded from the store at construction
/// and written back after every mutation. Persistence failures are logged
/// and swallowed; in-memory state stays authoritative.
#[derive(Debug)]
pub struct GamificationEngine {
    store: Arc<LocalStore>,
    total_xp: u64,
    xp_history: VecDeque<XpEvent>,
    earned_badges: Vec<EarnedBadge>,
    streak: StreakInfo,
}

impl GamificationEngine {
    #[must_use]
    pub fn new(store: Arc<LocalStore>) -> Self {
        let total_xp = store.load(keys::GAMIFICATION_TOTAL_XP).unwrap_or(0);
        let xp_history = store
            .load(keys::GAMIFICATION_XP_HISTORY)
            .unwrap_or_default();
        let earned_badges = store.load(keys::GAMIFICATION_BADGES).unwrap_or_default();
        let streak = store.load(keys::GAMIFICATION_STREAK).unwrap_or_default();
        Self {
            store,
            total_xp,
            xp_history,
            earned_badges,
            streak,
        }
    }

    /// Award XP for one event and advance the streak.
    ///
    /// The streak bonus uses the streak as it stood *before* this event, so
    /// the first review of a new day is paid against yesterday's streak.
    pub fn award_xp(&mut self, event: &StudyEvent) -> u32 {
        let amount = xp_for_event(event, self.streak.current);
        self.total_xp += u64::from(amount);
        self.xp_history.push_back(XpEvent {
            amount,
            reason: event.rating.to_string(),
            timestamp: event.timestamp,
        });
        while self.xp_history.len() > XP_HISTORY_CAP {
            self.xp_history.pop_front();
        }
        streak::advance(&mut self.streak, event.timestamp.date_naive());
        self.persist();
        amount
    }

    /// Evaluate the badge registry against a progress snapshot and return
    /// only the newly earned badges. Earned badges are never re-evaluated.
    pub fn check_badges(
        &mut self,
        progress: &LearningProgress,
        now: DateTime<Utc>,
    ) -> Vec<EarnedBadge> {
        let ctx = BadgeContext {
            progress,
            streak: &self.streak,
            total_xp: self.total_xp,
        };
        let mut unlocked = Vec::new();
        for spec in badge_registry() {
            if self.has_badge(spec.key) {
                continue;
            }
            if (spec.predicate)(&ctx) {
                unlocked.push(EarnedBadge {
                    key: spec.key.to_string(),
                    title: spec.title.to_string(),
                    description: spec.description.to_string(),
                    icon: spec.icon.to_string(),
                    tier: spec.tier,
                    earned_at: now,
                });
            }
        }
        if !unlocked.is_empty() {
            self.earned_badges.extend(unlocked.iter().cloned());
            self.persist();
        }
        unlocked
    }

    #[must_use]
    pub fn has_badge(&self, key: &str) -> bool {
        self.earned_badges.iter().any(|badge| badge.key == key)
    }

    #[must_use]
    pub fn earned_badges(&self) -> &[EarnedBadge] {
        &self.earned_badges
    }

    #[must_use]
    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    #[must_use]
    pub fn xp_history(&self) -> &VecDeque<XpEvent> {
        &self.xp_history
    }

    /// XP earned on the calendar day of `now`, from the retained history.
    #[must_use]
    pub fn xp_today(&self, now: DateTime<Utc>) -> u64 {
        let today = now.date_naive();
        self.xp_history
            .iter()
            .filter(|event| event.timestamp.date_naive() == today)
            .map(|event| u64::from(event.amount))
            .sum()
    }

    #[must_use]
    pub fn current_level(&self) -> u32 {
        level_for_xp(self.total_xp)
    }

    #[must_use]
    pub fn level_progress(&self) -> f64 {
        level_progress(self.total_xp)
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.streak.current
    }

    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        self.streak.longest
    }

    #[must_use]
    pub fn streak(&self) -> &StreakInfo {
        &self.streak
    }

    /// Zero XP, clear history and badges, reset the streak, and persist.
    pub fn reset(&mut self) {
        self.total_xp = 0;
        self.xp_history.clear();
        self.earned_badges.clear();
        self.streak = StreakInfo::default();
        self.persist();
    }

    fn persist(&self) {
        let writes = [
            self.store.save(keys::GAMIFICATION_TOTAL_XP, &self.total_xp),
            self.store
                .save(keys::GAMIFICATION_XP_HISTORY, &self.xp_history),
            self.store
                .save(keys::GAMIFICATION_BADGES, &self.earned_badges),
            self.store.save(keys::GAMIFICATION_STREAK, &self.streak),
        ];
        for result in writes {
            if let Err(err) = result {
                tracing::warn!("Failed to persist gamification state: {}", err);
            }
        }
    }
}
