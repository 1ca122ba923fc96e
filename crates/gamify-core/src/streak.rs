//! Calendar-day streak transitions.

use chrono::{Duration, NaiveDate};
use learn_domain::StreakInfo;

/// Advance the streak for a study event on `today`.
///
/// Repeat events on the same calendar day leave the streak untouched; a
/// consecutive day extends it; anything else restarts it at one.
pub(crate) fn advance(streak: &mut StreakInfo, today: NaiveDate) {
    match streak.last_study_day {
        Some(last) if last == today => {}
        Some(last) if today.signed_duration_since(last) == Duration::days(1) => {
            streak.current += 1;
            streak.longest = streak.longest.max(streak.current);
        }
        _ => {
            streak.current = 1;
            streak.longest = streak.longest.max(1);
        }
    }
    streak.last_study_day = Some(today);
}
