//! The coordinating facade routing each study event through the engines.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use gamify_core::GamificationEngine;
use learn_domain::{
    Card, Difficulty, EarnedBadge, LearningProgress, QuestionType, Quiz, QuizResult, Rating,
    StudyEvent, SubjectProgress,
};
use local_store::LocalStore;
use progress_core::{AdaptiveEngine, PerformanceSnapshot, ProgressTracker};
use quiz_core::{QuizError, QuizGenerator, score_quiz};
use rand::rngs::StdRng;
use recommend_core::{Recommendation, RecommendationEngine};
use scheduler_core::Sm2Scheduler;
use uuid::Uuid;

use crate::options::EngineOptions;

/// Outcome of recording one study event.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyResult {
    /// Card with the rating applied; persisting it is the caller's job.
    pub updated_card: Card,
    pub xp_earned: u32,
    /// Badges unlocked by this event, in registry order.
    pub new_badges: Vec<EarnedBadge>,
    pub next_review_at: DateTime<Utc>,
    pub current_streak: u32,
}

/// Facade over the six engines.
///
/// All mutating methods take `&mut self`; the facade is the synchronization
/// boundary, so the engines themselves need no further locking beyond the
/// store's own mutex.
#[derive(Debug)]
pub struct LearningEngine {
    options: EngineOptions,
    store: Arc<LocalStore>,
    scheduler: Sm2Scheduler,
    quizzes: QuizGenerator<StdRng>,
    progress: ProgressTracker,
    adaptive: AdaptiveEngine,
    gamification: GamificationEngine,
    recommender: RecommendationEngine,
}

impl LearningEngine {
    /// Engine over an in-memory store; state lives for the process only.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self::with_store(options, Arc::new(LocalStore::in_memory()))
    }

    /// Engine backed by `<dir>/<storage_namespace>.json`.
    #[must_use]
    pub fn open(dir: &Path, options: EngineOptions) -> Self {
        let path = dir.join(format!("{}.json", options.storage_namespace));
        Self::with_store(options, Arc::new(LocalStore::open(path)))
    }

    /// Engine over a caller-provided store.
    #[must_use]
    pub fn with_store(options: EngineOptions, store: Arc<LocalStore>) -> Self {
        let scheduler = Sm2Scheduler::new(options.sm2.clone());
        let adaptive = AdaptiveEngine::new(
            options.adaptive_window_size,
            (
                *options.adaptive_target_range.start(),
                *options.adaptive_target_range.end(),
            ),
            options.adaptive_sensitivity,
        );
        let progress = ProgressTracker::new(Arc::clone(&store));
        let gamification = GamificationEngine::new(Arc::clone(&store));
        Self {
            options,
            store,
            scheduler,
            quizzes: QuizGenerator::new(),
            progress,
            adaptive,
            gamification,
            recommender: RecommendationEngine::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn store(&self) -> &Arc<LocalStore> {
        &self.store
    }

    /// Record one study event at the current instant.
    pub fn record_study(&mut self, card: &Card, rating: Rating, response_time_s: f64) -> StudyResult {
        self.record_study_at(card, rating, response_time_s, Utc::now())
    }

    /// Record one study event at an explicit instant.
    ///
    /// Runs each engine exactly once, in fixed order: scheduler review,
    /// progress record, adaptive ingest (mirroring the new recommendation
    /// into the subject's progress), XP award against the pre-event streak,
    /// then badge evaluation over the post-event snapshot.
    pub fn record_study_at(
        &mut self,
        card: &Card,
        rating: Rating,
        response_time_s: f64,
        now: DateTime<Utc>,
    ) -> StudyResult {
        let updated_card = self.scheduler.review(card, rating, now);
        let event = StudyEvent::new(card.id, card.subject_id, rating, response_time_s, now);

        self.progress.record(&event);
        self.adaptive.ingest(&event);
        self.progress.set_recommended_difficulty(
            card.subject_id,
            self.adaptive.recommended_difficulty(card.subject_id),
        );

        let xp_earned = self.gamification.award_xp(&event);
        let new_badges = self.gamification.check_badges(self.progress.snapshot(), now);

        StudyResult {
            next_review_at: updated_card.due,
            updated_card,
            xp_earned,
            new_badges,
            current_streak: self.gamification.current_streak(),
        }
    }

    /// Today's study queue, bounded by the configured daily caps.
    #[must_use]
    pub fn study_queue(&self, cards: &[Card]) -> Vec<Card> {
        self.study_queue_at(cards, Utc::now())
    }

    #[must_use]
    pub fn study_queue_at(&self, cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
        self.scheduler.build_queue(
            cards,
            self.options.max_new_cards_per_day,
            self.options.max_reviews_per_day,
            now,
        )
    }

    /// Apply one rating without recording an event; see [`Sm2Scheduler::review`].
    #[must_use]
    pub fn review_card(&self, card: &Card, rating: Rating) -> Card {
        self.scheduler.review(card, rating, Utc::now())
    }

    /// Prospective next-review delays per rating, in seconds.
    #[must_use]
    pub fn preview(&self, card: &Card) -> BTreeMap<Rating, i64> {
        self.scheduler.preview(card, Utc::now())
    }

    /// Generate a quiz from the given cards; see [`QuizGenerator::generate`].
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NoQuestionTypes`] when `allowed_types` is empty
    /// and `cards` is not.
    pub fn generate_quiz(
        &mut self,
        cards: &[Card],
        count: usize,
        allowed_types: &[QuestionType],
        difficulty: Option<Difficulty>,
        shuffle: bool,
    ) -> Result<Quiz, QuizError> {
        self.quizzes
            .generate(cards, count, allowed_types, difficulty, shuffle, Utc::now())
    }

    /// Grade a quiz attempt; see [`score_quiz`].
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::UnknownQuestion`] when `answers` references a
    /// question the quiz does not contain.
    pub fn score_quiz(
        &self,
        quiz: &Quiz,
        answers: &HashMap<Uuid, String>,
        time_taken_s: f64,
    ) -> Result<QuizResult, QuizError> {
        score_quiz(quiz, answers, time_taken_s, Utc::now())
    }

    #[must_use]
    pub fn recommended_difficulty(&self, subject_id: Uuid) -> Difficulty {
        self.adaptive.recommended_difficulty(subject_id)
    }

    #[must_use]
    pub fn performance_metrics(&self, subject_id: Uuid) -> PerformanceSnapshot {
        self.adaptive.performance_metrics(subject_id)
    }

    #[must_use]
    pub fn progress(&self) -> &LearningProgress {
        self.progress.snapshot()
    }

    #[must_use]
    pub fn subject_progress(&self, subject_id: Uuid) -> Option<&SubjectProgress> {
        self.progress.subject_progress(subject_id)
    }

    /// Overwrite a subject's card counters from the caller's card set.
    pub fn update_mastery(&mut self, subject_id: Uuid, total_cards: u32, mastered_cards: u32) {
        self.progress
            .update_mastery(subject_id, total_cards, mastered_cards);
    }

    /// Retained events with `start ≤ timestamp < end`, newest first.
    #[must_use]
    pub fn events_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<StudyEvent> {
        self.progress.events_between(start, end)
    }

    #[must_use]
    pub fn today_events(&self) -> Vec<StudyEvent> {
        self.progress.today_events(Utc::now())
    }

    #[must_use]
    pub fn study_days_in_last(&self, days: u32) -> usize {
        self.progress.study_days_in_last(days, Utc::now())
    }

    /// Ranked study suggestions over the caller's card set.
    #[must_use]
    pub fn recommendations(&self, cards: &[Card], limit: usize) -> Vec<Recommendation> {
        self.recommender
            .recommend(cards, self.progress.snapshot(), Utc::now(), limit)
    }

    #[must_use]
    pub fn recommendations_at(
        &self,
        cards: &[Card],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        self.recommender
            .recommend(cards, self.progress.snapshot(), now, limit)
    }

    #[must_use]
    pub fn total_xp(&self) -> u64 {
        self.gamification.total_xp()
    }

    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.gamification.current_level()
    }

    #[must_use]
    pub fn level_progress(&self) -> f64 {
        self.gamification.level_progress()
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.gamification.current_streak()
    }

    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        self.gamification.longest_streak()
    }

    #[must_use]
    pub fn earned_badges(&self) -> &[EarnedBadge] {
        self.gamification.earned_badges()
    }

    /// XP earned today, from the retained award history.
    #[must_use]
    pub fn xp_today(&self) -> u64 {
        self.gamification.xp_today(Utc::now())
    }

    /// Clear the progress snapshot.
    pub fn reset_progress(&mut self) {
        self.progress.reset();
    }

    /// Clear XP, badges, and streak state.
    pub fn reset_gamification(&mut self) {
        self.gamification.reset();
    }

    /// Clear both persisted domains.
    pub fn reset_all(&mut self) {
        self.reset_progress();
        self.reset_gamification();
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
