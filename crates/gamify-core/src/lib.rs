//! Gamification engine: XP accounting, level curve, daily streaks, and
//! badge unlock evaluation.

mod badges;
mod engine;
mod streak;
mod xp;

pub use crate::badges::{BadgeContext, BadgeSpec, badge_registry};
pub use crate::engine::GamificationEngine;
pub use crate::xp::{level_for_xp, level_progress, xp_required_for_level};
