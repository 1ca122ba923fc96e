//! Recommendation rules and their ranking.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use learn_domain::{Card, LearningProgress};
use uuid::Uuid;

use crate::model::{Priority, Recommendation, RecommendationKind};

/// Default maximum number of recommendations returned.
pub const DEFAULT_LIMIT: usize = 10;

const OVERDUE_CARD_CAP: usize = 20;
const WEAK_SUBJECT_CAP: usize = 3;
const WEAK_ACCURACY_BAR: f64 = 0.6;
const WEAK_MIN_REVIEWED: u32 = 5;
const SUBJECT_CARD_CAP: usize = 10;
const NEW_GROUP_CAP: usize = 3;
const LAPSED_CARD_CAP: usize = 15;
const STALE_SUBJECT_CAP: usize = 2;
const STALE_AFTER_DAYS: i64 = 3;
const STALE_MINUTES: u32 = 5;

/// Stateless rule engine ranking study suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rank up to `limit` suggestions from the card set and progress
    /// snapshot. The result is sorted by priority, `Critical` first, with
    /// the per-rule emission order preserved inside each priority band.
    #[must_use]
    pub fn recommend(
        &self,
        cards: &[Card],
        progress: &LearningProgress,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        recommendations.extend(overdue_review(cards, now));
        recommendations.extend(weak_areas(cards, progress));
        recommendations.extend(new_content(cards));
        recommendations.extend(lapsed_review(cards));
        recommendations.extend(stale_subjects(cards, progress, now));

        recommendations.sort_by_key(|recommendation| recommendation.priority);
        recommendations.truncate(limit);
        recommendations
    }
}

fn overdue_review(cards: &[Card], now: DateTime<Utc>) -> Option<Recommendation> {
    let mut overdue: Vec<&Card> = cards
        .iter()
        .filter(|card| card.is_due(now) && !card.is_new())
        .collect();
    if overdue.is_empty() {
        return None;
    }
    overdue.sort_by(|a, b| (a.due, a.id).cmp(&(b.due, b.id)));

    let total = overdue.len();
    Some(Recommendation {
        kind: RecommendationKind::OverdueReview,
        title: "Review overdue cards".to_string(),
        description: format!("{total} card(s) need review."),
        priority: Priority::Critical,
        card_ids: overdue
            .iter()
            .take(OVERDUE_CARD_CAP)
            .map(|card| card.id)
            .collect(),
        subject_id: None,
        estimated_minutes: ((total / 2) as u32).max(1),
    })
}

fn weak_areas(cards: &[Card], progress: &LearningProgress) -> Vec<Recommendation> {
    let mut weak: Vec<_> = progress
        .subjects
        .values()
        .filter(|subject| {
            subject.accuracy < WEAK_ACCURACY_BAR && subject.reviewed_cards > WEAK_MIN_REVIEWED
        })
        .collect();
    weak.sort_by(|a, b| {
        a.accuracy
            .total_cmp(&b.accuracy)
            .then(a.subject_id.cmp(&b.subject_id))
    });

    weak.iter()
        .take(WEAK_SUBJECT_CAP)
        .map(|subject| {
            let mut owned: Vec<&Card> = cards
                .iter()
                .filter(|card| card.subject_id == subject.subject_id)
                .collect();
            owned.sort_by(|a, b| a.accuracy().total_cmp(&b.accuracy()).then(a.id.cmp(&b.id)));
            let card_ids: Vec<Uuid> = owned
                .iter()
                .take(SUBJECT_CARD_CAP)
                .map(|card| card.id)
                .collect();
            let minutes = (card_ids.len() as u32).max(2);
            Recommendation {
                kind: RecommendationKind::WeakArea,
                title: "Shore up a weak subject".to_string(),
                description: format!(
                    "Accuracy is {:.0}% over the recent reviews.",
                    subject.accuracy * 100.0
                ),
                priority: Priority::High,
                card_ids,
                subject_id: Some(subject.subject_id),
                estimated_minutes: minutes,
            }
        })
        .collect()
}

fn new_content(cards: &[Card]) -> Vec<Recommendation> {
    // BTreeMap keys the groups by subject id, so emission order is stable.
    let mut groups: BTreeMap<Uuid, Vec<&Card>> = BTreeMap::new();
    for card in cards.iter().filter(|card| card.is_new()) {
        groups.entry(card.subject_id).or_default().push(card);
    }

    groups
        .into_iter()
        .take(NEW_GROUP_CAP)
        .map(|(subject_id, mut fresh)| {
            fresh.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
            let card_ids: Vec<Uuid> = fresh
                .iter()
                .take(SUBJECT_CARD_CAP)
                .map(|card| card.id)
                .collect();
            let minutes = (card_ids.len() as u32).max(2);
            Recommendation {
                kind: RecommendationKind::NewContent,
                title: "Learn new cards".to_string(),
                description: format!("{} new card(s) ready to learn.", card_ids.len()),
                priority: Priority::Medium,
                card_ids,
                subject_id: Some(subject_id),
                estimated_minutes: minutes,
            }
        })
        .collect()
}

fn lapsed_review(cards: &[Card]) -> Option<Recommendation> {
    let mut lapsed: Vec<&Card> = cards.iter().filter(|card| card.is_lapsed()).collect();
    if lapsed.is_empty() {
        return None;
    }
    lapsed.sort_by(|a, b| (a.due, a.id).cmp(&(b.due, b.id)));

    let card_ids: Vec<Uuid> = lapsed
        .iter()
        .take(LAPSED_CARD_CAP)
        .map(|card| card.id)
        .collect();
    let minutes = (card_ids.len() as u32).max(2);
    Some(Recommendation {
        kind: RecommendationKind::LapsedReview,
        title: "Recover lapsed cards".to_string(),
        description: format!("{} card(s) slipped and need rebuilding.", card_ids.len()),
        priority: Priority::High,
        card_ids,
        subject_id: None,
        estimated_minutes: minutes,
    })
}

fn stale_subjects(
    cards: &[Card],
    progress: &LearningProgress,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let cutoff = now - Duration::days(STALE_AFTER_DAYS);
    let mut stale: Vec<_> = progress
        .subjects
        .values()
        .filter(|subject| {
            subject.total_cards > 0
                && subject.last_studied.is_none_or(|studied| studied < cutoff)
        })
        .collect();
    // Never-studied subjects first, then the longest-untouched.
    stale.sort_by(|a, b| {
        (a.last_studied, a.subject_id).cmp(&(b.last_studied, b.subject_id))
    });

    stale
        .iter()
        .take(STALE_SUBJECT_CAP)
        .map(|subject| {
            let mut owned: Vec<&Card> = cards
                .iter()
                .filter(|card| card.subject_id == subject.subject_id)
                .collect();
            owned.sort_by(|a, b| (a.due, a.id).cmp(&(b.due, b.id)));
            Recommendation {
                kind: RecommendationKind::StaleSubject,
                title: "Revisit a quiet subject".to_string(),
                description: format!("No activity for over {STALE_AFTER_DAYS} days."),
                priority: Priority::Low,
                card_ids: owned
                    .iter()
                    .take(SUBJECT_CARD_CAP)
                    .map(|card| card.id)
                    .collect(),
                subject_id: Some(subject.subject_id),
                estimated_minutes: STALE_MINUTES,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_domain::{Rating, StudyEvent};

    fn instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-09-10T18:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn overdue_card(subject_id: Uuid) -> Card {
        let mut card = Card::new_at(subject_id, "q", "a", instant() - Duration::days(30));
        card.total_reviews = 4;
        card.correct_count = 2;
        card.repetitions = 2;
        card.interval_days = 3.0;
        card.due = instant() - Duration::days(2);
        card
    }

    fn lapsed_card(subject_id: Uuid) -> Card {
        let mut card = Card::new_at(subject_id, "q", "a", instant() - Duration::days(30));
        card.total_reviews = 4;
        card.correct_count = 1;
        card.repetitions = 0;
        card.interval_days = 1.0;
        card.due = instant() + Duration::days(1);
        card
    }

    fn weak_progress(subject_id: Uuid) -> LearningProgress {
        let mut progress = LearningProgress::default();
        for index in 0..6 {
            let rating = if index < 2 { Rating::Good } else { Rating::Again };
            progress.apply_event(&StudyEvent::new(
                Uuid::new_v4(),
                subject_id,
                rating,
                3.0,
                instant(),
            ));
        }
        progress
    }

    #[test]
    fn overdue_outranks_weak_area() {
        let subject_id = Uuid::new_v4();
        let cards = vec![overdue_card(subject_id)];
        let progress = weak_progress(subject_id);

        let ranked = RecommendationEngine::new().recommend(&cards, &progress, instant(), 10);
        assert!(ranked.len() >= 2);
        assert_eq!(ranked[0].kind, RecommendationKind::OverdueReview);
        assert_eq!(ranked[0].priority, Priority::Critical);
        assert_eq!(ranked[1].kind, RecommendationKind::WeakArea);
        assert_eq!(ranked[1].priority, Priority::High);
    }

    #[test]
    fn priorities_never_increase_down_the_list() {
        let subject_id = Uuid::new_v4();
        let mut cards = vec![overdue_card(subject_id), lapsed_card(subject_id)];
        cards.push(Card::new_at(subject_id, "new", "card", instant()));
        let progress = weak_progress(subject_id);

        let ranked = RecommendationEngine::new().recommend(&cards, &progress, instant(), 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
    }

    #[test]
    fn overdue_cards_are_listed_most_overdue_first_and_capped() {
        let subject_id = Uuid::new_v4();
        let mut cards = Vec::new();
        for day in 1..=25 {
            let mut card = overdue_card(subject_id);
            card.due = instant() - Duration::days(day);
            cards.push(card);
        }

        let ranked =
            RecommendationEngine::new().recommend(&cards, &LearningProgress::default(), instant(), 10);
        let overdue = &ranked[0];
        assert_eq!(overdue.kind, RecommendationKind::OverdueReview);
        assert_eq!(overdue.card_ids.len(), 20);
        assert_eq!(overdue.card_ids[0], cards[24].id, "most overdue leads");
        assert_eq!(overdue.estimated_minutes, 12);
        assert!(overdue.description.starts_with("25"));
    }

    #[test]
    fn new_content_groups_come_in_subject_id_order() {
        let mut subjects = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        subjects.sort();
        let cards: Vec<Card> = subjects
            .iter()
            .map(|subject_id| Card::new_at(*subject_id, "q", "a", instant()))
            .collect();

        let ranked =
            RecommendationEngine::new().recommend(&cards, &LearningProgress::default(), instant(), 10);
        let new_groups: Vec<_> = ranked
            .iter()
            .filter(|r| r.kind == RecommendationKind::NewContent)
            .collect();
        assert_eq!(new_groups.len(), 3, "group cap applies");
        assert_eq!(new_groups[0].subject_id, Some(subjects[0]));
        assert_eq!(new_groups[1].subject_id, Some(subjects[1]));
        assert_eq!(new_groups[2].subject_id, Some(subjects[2]));
    }

    #[test]
    fn lapsed_cards_are_capped_at_fifteen() {
        let subject_id = Uuid::new_v4();
        let cards: Vec<Card> = (0..20).map(|_| lapsed_card(subject_id)).collect();

        let ranked =
            RecommendationEngine::new().recommend(&cards, &LearningProgress::default(), instant(), 10);
        let lapsed = ranked
            .iter()
            .find(|r| r.kind == RecommendationKind::LapsedReview)
            .expect("lapsed recommendation");
        assert_eq!(lapsed.card_ids.len(), 15);
        assert_eq!(lapsed.estimated_minutes, 15);
    }

    #[test]
    fn stale_subjects_require_cards_and_silence() {
        let quiet = Uuid::new_v4();
        let active = Uuid::new_v4();
        let mut progress = LearningProgress::default();
        progress.apply_event(&StudyEvent::new(
            Uuid::new_v4(),
            quiet,
            Rating::Good,
            3.0,
            instant() - Duration::days(5),
        ));
        progress.apply_event(&StudyEvent::new(
            Uuid::new_v4(),
            active,
            Rating::Good,
            3.0,
            instant(),
        ));
        for subject in [quiet, active] {
            progress
                .subjects
                .get_mut(&subject)
                .expect("subject")
                .total_cards = 3;
        }

        let ranked = RecommendationEngine::new().recommend(
            &[],
            &progress,
            instant(),
            10,
        );
        let stale: Vec<_> = ranked
            .iter()
            .filter(|r| r.kind == RecommendationKind::StaleSubject)
            .collect();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].subject_id, Some(quiet));
        assert_eq!(stale[0].estimated_minutes, 5);
    }

    #[test]
    fn limit_truncates_the_ranked_list() {
        let subject_id = Uuid::new_v4();
        let cards = vec![
            overdue_card(subject_id),
            lapsed_card(subject_id),
            Card::new_at(subject_id, "new", "card", instant()),
        ];
        let ranked = RecommendationEngine::new().recommend(
            &cards,
            &LearningProgress::default(),
            instant(),
            1,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].priority, Priority::Critical);
    }

    #[test]
    fn quiet_deck_produces_no_recommendations() {
        let mut card = Card::new_at(Uuid::new_v4(), "q", "a", instant() - Duration::days(3));
        card.total_reviews = 2;
        card.correct_count = 2;
        card.repetitions = 2;
        card.interval_days = 10.0;
        card.due = instant() + Duration::days(7);

        let ranked = RecommendationEngine::new().recommend(
            &[card],
            &LearningProgress::default(),
            instant(),
            10,
        );
        assert!(ranked.is_empty());
    }
}
