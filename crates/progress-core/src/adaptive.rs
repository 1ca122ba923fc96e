//! Per-subject sliding-window accuracy tracking and difficulty stepping.

use std::collections::{HashMap, VecDeque};

use learn_domain::{Difficulty, StudyEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum events before a trend can be read from the window.
const TREND_MIN_EVENTS: usize = 6;

/// Accuracy delta between window halves that counts as a real change.
const TREND_THRESHOLD: f64 = 0.1;

/// Direction the learner's recent accuracy is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

/// Point-in-time view of one subject's recent performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub accuracy: f64,
    pub avg_response_time_s: f64,
    pub event_count: usize,
    pub difficulty: Difficulty,
    pub trend: Trend,
}

/// Sliding-window difficulty recommender.
///
/// Keeps the most recent `window_size` events per subject and steps the
/// recommended tier whenever window accuracy leaves the target zone.
#[derive(Debug)]
pub struct AdaptiveEngine {
    window_size: usize,
    lower_target: f64,
    upper_target: f64,
    sensitivity: f64,
    windows: HashMap<Uuid, VecDeque<StudyEvent>>,
    levels: HashMap<Uuid, Difficulty>,
}

impl AdaptiveEngine {
    /// Create an engine with the given window size and accuracy target zone.
    /// `sensitivity` is clamped into `[0, 1]` and stored; it is reserved for
    /// future stepping refinements and does not alter current behavior.
    #[must_use]
    pub fn new(window_size: usize, target: (f64, f64), sensitivity: f64) -> Self {
        Self {
            window_size: window_size.max(1),
            lower_target: target.0,
            upper_target: target.1,
            sensitivity: sensitivity.clamp(0.0, 1.0),
            windows: HashMap::new(),
            levels: HashMap::new(),
        }
    }

    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Fold one event into its subject's window and restep the difficulty.
    pub fn ingest(&mut self, event: &StudyEvent) {
        let window = self.windows.entry(event.subject_id).or_default();
        window.push_back(event.clone());
        while window.len() > self.window_size {
            window.pop_front();
        }

        let accuracy = accuracy_of(window.iter());
        let current = self
            .levels
            .get(&event.subject_id)
            .copied()
            .unwrap_or_default();
        let next = if accuracy > self.upper_target {
            current.step_up()
        } else if accuracy < self.lower_target {
            current.step_down()
        } else {
            current
        };
        self.levels.insert(event.subject_id, next);
    }

    /// Current recommendation for a subject; Medium until events arrive.
    #[must_use]
    pub fn recommended_difficulty(&self, subject_id: Uuid) -> Difficulty {
        self.levels.get(&subject_id).copied().unwrap_or_default()
    }

    /// Snapshot of the subject's window: accuracy, pace, and trend.
    #[must_use]
    pub fn performance_metrics(&self, subject_id: Uuid) -> PerformanceSnapshot {
        let empty = VecDeque::new();
        let window = self.windows.get(&subject_id).unwrap_or(&empty);
        let event_count = window.len();
        let avg_response_time_s = if event_count == 0 {
            0.0
        } else {
            window.iter().map(|event| event.response_time_s).sum::<f64>() / event_count as f64
        };
        PerformanceSnapshot {
            accuracy: accuracy_of(window.iter()),
            avg_response_time_s,
            event_count,
            difficulty: self.recommended_difficulty(subject_id),
            trend: trend_of(window),
        }
    }
}

fn trend_of(window: &VecDeque<StudyEvent>) -> Trend {
    if window.len() < TREND_MIN_EVENTS {
        return Trend::Stable;
    }
    let mid = window.len() / 2;
    let older = accuracy_of(window.iter().take(mid));
    let newer = accuracy_of(window.iter().skip(mid));
    let delta = newer - older;
    if delta > TREND_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn accuracy_of<'a>(events: impl Iterator<Item = &'a StudyEvent>) -> f64 {
    let mut total = 0u32;
    let mut correct = 0u32;
    for event in events {
        total += 1;
        if event.is_correct() {
            correct += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use learn_domain::Rating;

    fn event(subject_id: Uuid, rating: Rating) -> StudyEvent {
        StudyEvent::new(Uuid::new_v4(), subject_id, rating, 4.0, Utc::now())
    }

    fn engine() -> AdaptiveEngine {
        AdaptiveEngine::new(20, (0.70, 0.85), 0.5)
    }

    #[test]
    fn starts_at_medium_without_events() {
        let engine = engine();
        assert_eq!(
            engine.recommended_difficulty(Uuid::new_v4()),
            Difficulty::Medium
        );
    }

    #[test]
    fn sustained_success_steps_difficulty_up() {
        let subject_id = Uuid::new_v4();
        let mut engine = engine();
        for _ in 0..4 {
            engine.ingest(&event(subject_id, Rating::Good));
        }
        // 100% accuracy sits above the zone from the first event on.
        assert_eq!(engine.recommended_difficulty(subject_id), Difficulty::Expert);
    }

    #[test]
    fn sustained_failure_steps_difficulty_down_and_saturates() {
        let subject_id = Uuid::new_v4();
        let mut engine = engine();
        for _ in 0..5 {
            engine.ingest(&event(subject_id, Rating::Again));
        }
        assert_eq!(engine.recommended_difficulty(subject_id), Difficulty::Easy);
    }

    #[test]
    fn in_zone_accuracy_keeps_the_current_tier() {
        let subject_id = Uuid::new_v4();
        let mut engine = engine();
        // Steps: 1.0 up, 1.0 up, 0.67 down, then 0.75 lands in the zone.
        for rating in [Rating::Good, Rating::Good, Rating::Again, Rating::Good] {
            engine.ingest(&event(subject_id, rating));
        }
        assert_eq!(engine.recommended_difficulty(subject_id), Difficulty::Hard);

        // Another in-zone reading leaves the tier where it is.
        engine.ingest(&event(subject_id, Rating::Good));
        assert_eq!(engine.recommended_difficulty(subject_id), Difficulty::Hard);
    }

    #[test]
    fn window_evicts_oldest_events() {
        let subject_id = Uuid::new_v4();
        let mut engine = AdaptiveEngine::new(3, (0.70, 0.85), 0.5);
        engine.ingest(&event(subject_id, Rating::Again));
        for _ in 0..3 {
            engine.ingest(&event(subject_id, Rating::Good));
        }
        let snapshot = engine.performance_metrics(subject_id);
        assert_eq!(snapshot.event_count, 3);
        assert!((snapshot.accuracy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trend_is_stable_below_six_events() {
        let subject_id = Uuid::new_v4();
        let mut engine = engine();
        for _ in 0..5 {
            engine.ingest(&event(subject_id, Rating::Good));
        }
        assert_eq!(engine.performance_metrics(subject_id).trend, Trend::Stable);
    }

    #[test]
    fn trend_reads_improvement_from_the_window_halves() {
        let subject_id = Uuid::new_v4();
        let mut engine = engine();
        for rating in [Rating::Again, Rating::Again, Rating::Again] {
            engine.ingest(&event(subject_id, rating));
        }
        for rating in [Rating::Good, Rating::Good, Rating::Good] {
            engine.ingest(&event(subject_id, rating));
        }
        assert_eq!(
            engine.performance_metrics(subject_id).trend,
            Trend::Improving
        );
    }

    #[test]
    fn trend_reads_decline_when_recent_half_slumps() {
        let subject_id = Uuid::new_v4();
        let mut engine = engine();
        for _ in 0..3 {
            engine.ingest(&event(subject_id, Rating::Good));
        }
        for _ in 0..3 {
            engine.ingest(&event(subject_id, Rating::Again));
        }
        assert_eq!(
            engine.performance_metrics(subject_id).trend,
            Trend::Declining
        );
    }

    #[test]
    fn metrics_for_unknown_subject_are_empty_but_valid() {
        let engine = engine();
        let snapshot = engine.performance_metrics(Uuid::new_v4());
        assert_eq!(snapshot.event_count, 0);
        assert_eq!(snapshot.accuracy, 0.0);
        assert_eq!(snapshot.avg_response_time_s, 0.0);
        assert_eq!(snapshot.difficulty, Difficulty::Medium);
        assert_eq!(snapshot.trend, Trend::Stable);
    }

    #[test]
    fn sensitivity_is_clamped_and_stored() {
        let engine = AdaptiveEngine::new(20, (0.70, 0.85), 1.7);
        assert!((engine.sensitivity() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn subjects_are_tracked_independently() {
        let strong = Uuid::new_v4();
        let weak = Uuid::new_v4();
        let mut engine = engine();
        for _ in 0..3 {
            engine.ingest(&event(strong, Rating::Easy));
            engine.ingest(&event(weak, Rating::Again));
        }
        assert!(engine.recommended_difficulty(strong) > engine.recommended_difficulty(weak));
    }
}
