//! XP award amounts and the level curve.

use learn_domain::{Rating, StudyEvent};

/// Response time under which a correct answer earns the speed bonus.
const SPEED_BONUS_CUTOFF_S: f64 = 5.0;
const SPEED_BONUS: u32 = 2;

/// Streak bonus is capped so very long streaks stop inflating awards.
const STREAK_BONUS_CAP: u32 = 10;

/// XP earned by one study event, given the streak length *before* the event
/// updates it.
#[must_use]
pub(crate) fn xp_for_event(event: &StudyEvent, streak_before: u32) -> u32 {
    let base = base_xp(event.rating);
    let speed = if event.is_correct() && event.response_time_s < SPEED_BONUS_CUTOFF_S {
        SPEED_BONUS
    } else {
        0
    };
    base + speed + streak_before.min(STREAK_BONUS_CAP)
}

const fn base_xp(rating: Rating) -> u32 {
    match rating {
        Rating::Again => 1,
        Rating::Hard => 3,
        Rating::Good => 5,
        Rating::Easy => 8,
    }
}

/// Cumulative XP required to reach `level`: `Σ_{i=1..level-1} i·100`.
#[must_use]
pub fn xp_required_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    100 * steps * (steps + 1) / 2
}

/// Highest level whose requirement is covered by `total_xp`.
#[must_use]
pub fn level_for_xp(total_xp: u64) -> u32 {
    let mut level = 1;
    while xp_required_for_level(level + 1) <= total_xp {
        level += 1;
    }
    level
}

/// Fraction of the way from the current level to the next, in `[0, 1]`.
#[must_use]
pub fn level_progress(total_xp: u64) -> f64 {
    let level = level_for_xp(total_xp);
    let floor = xp_required_for_level(level);
    let ceiling = xp_required_for_level(level + 1);
    let span = (ceiling - floor) as f64;
    (((total_xp - floor) as f64) / span).clamp(0.0, 1.0)
}
