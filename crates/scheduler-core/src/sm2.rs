//! SM-2 update logic extracted into focused helper functions.

use chrono::{DateTime, Duration, Utc};
use learn_domain::{Card, Rating};
use num_traits::ToPrimitive;

use crate::config::Sm2Config;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub(super) fn apply_review(card: &mut Card, rating: Rating, config: &Sm2Config, now: DateTime<Utc>) {
    let ease = update_ease(card.ease_factor, rating, config);
    card.total_reviews = card.total_reviews.saturating_add(1);
    card.last_reviewed = Some(now);

    let raw_interval = if rating.is_correct() {
        card.correct_count = card.correct_count.saturating_add(1);
        card.repetitions = card.repetitions.saturating_add(1);
        successful_interval(card.repetitions, card.interval_days, ease, rating, config)
    } else {
        card.repetitions = 0;
        lapsed_interval(card.interval_days, rating, config)
    };

    let interval = raw_interval.clamp(config.min_interval_days, config.max_interval_days);
    card.ease_factor = ease;
    card.interval_days = interval;
    card.due = due_after(now, interval_seconds(interval));
}

pub(super) fn update_ease(current: f64, rating: Rating, config: &Sm2Config) -> f64 {
    let quality = f64::from(rating.quality());
    let delta = 0.1 - (5.0 - quality) * (0.08 + (5.0 - quality) * 0.02);
    (current + delta).max(config.ease_minimum)
}

fn successful_interval(
    repetitions: u32,
    previous_interval: f64,
    ease: f64,
    rating: Rating,
    config: &Sm2Config,
) -> f64 {
    let base = match repetitions {
        0 | 1 => config.initial_interval_days,
        2 => config.second_interval_days,
        _ => previous_interval * ease,
    };
    if matches!(rating, Rating::Easy) {
        base * config.easy_bonus
    } else {
        base
    }
}

fn lapsed_interval(previous_interval: f64, rating: Rating, config: &Sm2Config) -> f64 {
    let factor = match rating {
        Rating::Hard => config.hard_factor,
        _ => config.lapse_multiplier,
    };
    (previous_interval * factor).max(config.min_interval_days)
}

/// Whole seconds covered by a fractional-day interval.
pub(super) fn interval_seconds(interval_days: f64) -> i64 {
    let seconds = interval_days * SECONDS_PER_DAY;
    if !seconds.is_finite() {
        return i64::MAX;
    }
    seconds.round().to_i64().unwrap_or(i64::MAX)
}

fn due_after(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    Duration::try_seconds(seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now)
}
