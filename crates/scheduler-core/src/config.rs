//! Scheduler configuration values governing SM-2 calculations.

/// Tunable parameters for the SM-2 scheduler. Intervals are fractional days.
#[derive(Debug, Clone, PartialEq)]
pub struct Sm2Config {
    /// Interval after the first successful repetition.
    pub initial_interval_days: f64,
    /// Interval after the second consecutive successful repetition.
    pub second_interval_days: f64,
    /// Floor for the easiness factor.
    pub ease_minimum: f64,
    /// Easiness factor assigned to brand new cards.
    pub ease_default: f64,
    /// Interval multiplier applied when a card lapses with `Again`.
    pub lapse_multiplier: f64,
    /// Minimum interval after any review.
    pub min_interval_days: f64,
    /// Maximum interval after any review.
    pub max_interval_days: f64,
    /// Interval multiplier applied when a card lapses with `Hard`.
    pub hard_factor: f64,
    /// Extra interval multiplier for `Easy` reviews.
    pub easy_bonus: f64,
}

impl Default for Sm2Config {
    fn default() -> Self {
        Self {
            initial_interval_days: 1.0,
            second_interval_days: 6.0,
            ease_minimum: 1.3,
            ease_default: 2.5,
            lapse_multiplier: 0.5,
            min_interval_days: 1.0,
            max_interval_days: 365.0,
            hard_factor: 0.8,
            easy_bonus: 1.3,
        }
    }
}
