//! Progress aggregates mutated by the event stream.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::difficulty::Difficulty;
use crate::event::StudyEvent;

/// Maximum number of events retained in [`LearningProgress::recent_events`].
pub const RECENT_EVENTS_CAP: usize = 500;

/// Aggregated progress for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject_id: Uuid,
    /// Total cards the subject owns; maintained via mastery updates.
    pub total_cards: u32,
    /// Number of review events recorded against this subject.
    pub reviewed_cards: u32,
    /// Cards whose interval has reached the mastery threshold.
    pub mastered_cards: u32,
    /// Accuracy over the subject's recent events.
    pub accuracy: f64,
    /// Cumulative study time in seconds.
    pub study_time_s: f64,
    /// Instant of the most recent review, if any.
    pub last_studied: Option<DateTime<Utc>>,
    /// Difficulty tier currently recommended by the adaptive engine.
    pub recommended_difficulty: Difficulty,
}

impl SubjectProgress {
    #[must_use]
    pub fn new(subject_id: Uuid) -> Self {
        Self {
            subject_id,
            total_cards: 0,
            reviewed_cards: 0,
            mastered_cards: 0,
            accuracy: 0.0,
            study_time_s: 0.0,
            last_studied: None,
            recommended_difficulty: Difficulty::default(),
        }
    }

    /// Fraction of the subject's cards that are mastered; zero when empty.
    #[must_use]
    pub fn mastery_score(&self) -> f64 {
        if self.total_cards == 0 {
            0.0
        } else {
            f64::from(self.mastered_cards) / f64::from(self.total_cards)
        }
    }
}

/// Singleton progress snapshot covering every subject plus global totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    /// Per-subject aggregates keyed by subject id.
    pub subjects: HashMap<Uuid, SubjectProgress>,
    /// Bounded history of recent events, newest first.
    pub recent_events: VecDeque<StudyEvent>,
    /// Cumulative study time in seconds across all subjects.
    pub total_study_time_s: f64,
    /// Total review count across all subjects.
    pub total_reviews: u64,
}

impl LearningProgress {
    /// Fold one event into the snapshot: history, totals, and the owning
    /// subject's aggregate (including its recomputed accuracy).
    pub fn apply_event(&mut self, event: &StudyEvent) {
        self.recent_events.push_front(event.clone());
        self.recent_events.truncate(RECENT_EVENTS_CAP);
        self.total_reviews += 1;
        self.total_study_time_s += event.response_time_s;

        let accuracy = subject_accuracy(&self.recent_events, event.subject_id);
        let subject = self
            .subjects
            .entry(event.subject_id)
            .or_insert_with(|| SubjectProgress::new(event.subject_id));
        subject.reviewed_cards += 1;
        subject.study_time_s += event.response_time_s;
        subject.last_studied = Some(event.timestamp);
        subject.accuracy = accuracy;
    }

    /// Accuracy over the retained recent events; zero when empty.
    #[must_use]
    pub fn overall_accuracy(&self) -> f64 {
        accuracy_of(self.recent_events.iter())
    }

    /// Mean mastery score across all known subjects; zero when none exist.
    #[must_use]
    pub fn global_mastery(&self) -> f64 {
        if self.subjects.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.subjects.values().map(SubjectProgress::mastery_score).sum();
        sum / self.subjects.len() as f64
    }
}

fn subject_accuracy(events: &VecDeque<StudyEvent>, subject_id: Uuid) -> f64 {
    accuracy_of(events.iter().filter(|event| event.subject_id == subject_id))
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
