//! Persisted learning-progress snapshot and its queries.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use learn_domain::{Difficulty, LearningProgress, StudyEvent, SubjectProgress};
use local_store::{LocalStore, keys};
use uuid::Uuid;

/// Owner of the singleton [`LearningProgress`].
///
/// The snapshot is loaded from the store at construction and written back
/// after every mutation. Persistence failures are logged and swallowed; the
/// in-memory snapshot stays authoritative.
#[derive(Debug)]
pub struct ProgressTracker {
    store: Arc<LocalStore>,
    progress: LearningProgress,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(store: Arc<LocalStore>) -> Self {
        let progress = store.load(keys::PROGRESS).unwrap_or_default();
        Self { store, progress }
    }

    /// Fold one event into the snapshot and persist it.
    pub fn record(&mut self, event: &StudyEvent) {
        self.progress.apply_event(event);
        self.persist();
    }

    /// Overwrite a subject's card counters; other fields are untouched.
    pub fn update_mastery(&mut self, subject_id: Uuid, total_cards: u32, mastered_cards: u32) {
        let subject = self
            .progress
            .subjects
            .entry(subject_id)
            .or_insert_with(|| SubjectProgress::new(subject_id));
        subject.total_cards = total_cards;
        subject.mastered_cards = mastered_cards;
        self.persist();
    }

    /// Record the adaptive engine's current recommendation for a subject.
    pub fn set_recommended_difficulty(&mut self, subject_id: Uuid, difficulty: Difficulty) {
        let subject = self
            .progress
            .subjects
            .entry(subject_id)
            .or_insert_with(|| SubjectProgress::new(subject_id));
        if subject.recommended_difficulty == difficulty {
            return;
        }
        subject.recommended_difficulty = difficulty;
        self.persist();
    }

    /// Current snapshot, shared with read-only consumers.
    #[must_use]
    pub fn snapshot(&self) -> &LearningProgress {
        &self.progress
    }

    #[must_use]
    pub fn subject_progress(&self, subject_id: Uuid) -> Option<&SubjectProgress> {
        self.progress.subjects.get(&subject_id)
    }

    /// Retained events with `start ≤ timestamp < end`, newest first.
    #[must_use]
    pub fn events_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<StudyEvent> {
        self.progress
            .recent_events
            .iter()
            .filter(|event| event.timestamp >= start && event.timestamp < end)
            .cloned()
            .collect()
    }

    /// Retained events from the calendar day of `now`.
    #[must_use]
    pub fn today_events(&self, now: DateTime<Utc>) -> Vec<StudyEvent> {
        let today = now.date_naive();
        self.progress
            .recent_events
            .iter()
            .filter(|event| event.timestamp.date_naive() == today)
            .cloned()
            .collect()
    }

    /// Distinct calendar days with at least one retained event inside the
    /// last `days` days (today included).
    #[must_use]
    pub fn study_days_in_last(&self, days: u32, now: DateTime<Utc>) -> usize {
        let today = now.date_naive();
        let earliest = today - Duration::days(i64::from(days.saturating_sub(1)));
        let studied: BTreeSet<NaiveDate> = self
            .progress
            .recent_events
            .iter()
            .map(|event| event.timestamp.date_naive())
            .filter(|day| *day >= earliest && *day <= today)
            .collect();
        studied.len()
    }

    /// Clear the snapshot back to empty and persist the reset.
    pub fn reset(&mut self) {
        self.progress = LearningProgress::default();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(keys::PROGRESS, &self.progress) {
            tracing::warn!("Failed to persist learning progress: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_domain::Rating;

    fn instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-08-05T12:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn event_at(subject_id: Uuid, rating: Rating, timestamp: DateTime<Utc>) -> StudyEvent {
        StudyEvent::new(Uuid::new_v4(), subject_id, rating, 3.0, timestamp)
    }

    fn tracker() -> ProgressTracker {
        ProgressTracker::new(Arc::new(LocalStore::in_memory()))
    }

    #[test]
    fn record_updates_subject_and_persists() {
        let store = Arc::new(LocalStore::in_memory());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));
        let subject_id = Uuid::new_v4();
        tracker.record(&event_at(subject_id, Rating::Good, instant()));

        let persisted: LearningProgress = store.load(keys::PROGRESS).expect("persisted");
        assert_eq!(persisted, *tracker.snapshot());
        assert_eq!(persisted.total_reviews, 1);
        let subject = persisted.subjects.get(&subject_id).expect("subject");
        assert_eq!(subject.reviewed_cards, 1);
        assert_eq!(subject.last_studied, Some(instant()));
    }

    #[test]
    fn snapshot_survives_a_tracker_restart() {
        let store = Arc::new(LocalStore::in_memory());
        let subject_id = Uuid::new_v4();
        {
            let mut tracker = ProgressTracker::new(Arc::clone(&store));
            tracker.record(&event_at(subject_id, Rating::Good, instant()));
        }
        let reloaded = ProgressTracker::new(store);
        assert_eq!(reloaded.snapshot().total_reviews, 1);
        assert!(reloaded.subject_progress(subject_id).is_some());
    }

    #[test]
    fn update_mastery_only_touches_the_counters() {
        let mut tracker = tracker();
        let subject_id = Uuid::new_v4();
        tracker.record(&event_at(subject_id, Rating::Good, instant()));
        let accuracy_before = tracker
            .subject_progress(subject_id)
            .expect("subject")
            .accuracy;

        tracker.update_mastery(subject_id, 40, 12);
        let subject = tracker.subject_progress(subject_id).expect("subject");
        assert_eq!(subject.total_cards, 40);
        assert_eq!(subject.mastered_cards, 12);
        assert_eq!(subject.reviewed_cards, 1);
        assert!((subject.accuracy - accuracy_before).abs() < f64::EPSILON);
        assert!((subject.mastery_score() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn events_between_uses_a_half_open_range() {
        let mut tracker = tracker();
        let subject_id = Uuid::new_v4();
        tracker.record(&event_at(subject_id, Rating::Good, instant()));
        tracker.record(&event_at(
            subject_id,
            Rating::Good,
            instant() + Duration::hours(2),
        ));

        let hits = tracker.events_between(instant(), instant() + Duration::hours(2));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].timestamp, instant());
    }

    #[test]
    fn today_events_filters_by_calendar_day() {
        let mut tracker = tracker();
        let subject_id = Uuid::new_v4();
        tracker.record(&event_at(subject_id, Rating::Good, instant()));
        tracker.record(&event_at(
            subject_id,
            Rating::Good,
            instant() - Duration::days(1),
        ));

        assert_eq!(tracker.today_events(instant()).len(), 1);
    }

    #[test]
    fn study_days_counts_distinct_days_in_range() {
        let mut tracker = tracker();
        let subject_id = Uuid::new_v4();
        for offset in [0i64, 0, 1, 2, 9] {
            tracker.record(&event_at(
                subject_id,
                Rating::Good,
                instant() - Duration::days(offset),
            ));
        }

        assert_eq!(tracker.study_days_in_last(7, instant()), 3);
        assert_eq!(tracker.study_days_in_last(30, instant()), 4);
        assert_eq!(tracker.study_days_in_last(1, instant()), 1);
    }

    #[test]
    fn reset_clears_snapshot_and_store() {
        let store = Arc::new(LocalStore::in_memory());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));
        tracker.record(&event_at(Uuid::new_v4(), Rating::Good, instant()));
        tracker.reset();

        assert_eq!(*tracker.snapshot(), LearningProgress::default());
        let persisted: LearningProgress = store.load(keys::PROGRESS).expect("persisted");
        assert_eq!(persisted, LearningProgress::default());
    }

    #[test]
    fn recommended_difficulty_updates_are_persisted() {
        let store = Arc::new(LocalStore::in_memory());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));
        let subject_id = Uuid::new_v4();
        tracker.set_recommended_difficulty(subject_id, Difficulty::Hard);

        let persisted: LearningProgress = store.load(keys::PROGRESS).expect("persisted");
        assert_eq!(
            persisted
                .subjects
                .get(&subject_id)
                .expect("subject")
                .recommended_difficulty,
            Difficulty::Hard
        );
    }
}
