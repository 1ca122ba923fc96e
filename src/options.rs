//! Configuration bundle injected into the facade.

use std::ops::RangeInclusive;

use derive_builder::Builder;
use scheduler_core::Sm2Config;

/// Recognized engine options. Unset builder fields fall back to the
/// defaults below.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct EngineOptions {
    /// Namespace identifying the backing store file.
    pub storage_namespace: String,
    /// SM-2 scheduling parameters.
    pub sm2: Sm2Config,
    /// Reserved adaptive-stepping sensitivity, clamped into `[0, 1]`.
    pub adaptive_sensitivity: f64,
    /// Sliding-window length per subject.
    pub adaptive_window_size: usize,
    /// Target accuracy zone for the adaptive engine.
    pub adaptive_target_range: RangeInclusive<f64>,
    /// Cap on new cards per study queue.
    pub max_new_cards_per_day: usize,
    /// Cap on due reviews per study queue.
    pub max_reviews_per_day: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            storage_namespace: "com.educationai.storage".to_string(),
            sm2: Sm2Config::default(),
            adaptive_sensitivity: 0.5,
            adaptive_window_size: 20,
            adaptive_target_range: 0.70..=0.85,
            max_new_cards_per_day: 20,
            max_reviews_per_day: 100,
        }
    }
}
