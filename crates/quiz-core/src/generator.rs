//! Question synthesis from a pool of cards.

use chrono::{DateTime, Utc};
use learn_domain::{Card, Difficulty, Question, QuestionType, Quiz};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::errors::QuizError;

const DEFAULT_PASSING_SCORE: f64 = 0.7;
const DEFAULT_QUESTION_POINTS: f64 = 1.0;
const MULTIPLE_CHOICE_OPTIONS: usize = 4;

/// Quiz generator over an injectable random source. Production code uses
/// [`QuizGenerator::new`]; tests seed a [`StdRng`] for repeatable pools.
#[derive(Debug)]
pub struct QuizGenerator<R: Rng> {
    rng: R,
}

impl QuizGenerator<StdRng> {
    /// Generator backed by OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Generator with a fixed seed, for deterministic output.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for QuizGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizGenerator<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Synthesize up to `count` questions from `cards`.
    ///
    /// An empty card pool produces an empty quiz under a fresh subject id.
    /// When `difficulty` is given, only matching cards are used unless no
    /// card matches, in which case the whole pool is kept. With `shuffle`
    /// both the pool and the finished question list are permuted.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NoQuestionTypes`] when `allowed_types` is empty
    /// and there is at least one card to build from.
    pub fn generate(
        &mut self,
        cards: &[Card],
        count: usize,
        allowed_types: &[QuestionType],
        difficulty: Option<Difficulty>,
        shuffle: bool,
        now: DateTime<Utc>,
    ) -> Result<Quiz, QuizError> {
        if cards.is_empty() {
            return Ok(empty_quiz(difficulty, now));
        }
        if allowed_types.is_empty() {
            return Err(QuizError::NoQuestionTypes);
        }

        let subject_id = cards[0].subject_id;
        let mut pool: Vec<&Card> = match difficulty {
            Some(tier) => {
                let matching: Vec<&Card> =
                    cards.iter().filter(|card| card.difficulty == tier).collect();
                if matching.is_empty() {
                    cards.iter().collect()
                } else {
                    matching
                }
            }
            None => cards.iter().collect(),
        };
        if shuffle {
            pool.shuffle(&mut self.rng);
        }

        let wanted = count.min(pool.len());
        let mut questions = Vec::with_capacity(wanted);
        for index in 0..wanted {
            let kind = *allowed_types
                .choose(&mut self.rng)
                .expect("allowed_types is non-empty");
            questions.push(self.synthesize(pool[index], &pool, kind));
        }
        if shuffle {
            questions.shuffle(&mut self.rng);
        }

        Ok(Quiz {
            id: Uuid::new_v4(),
            title: "Practice Quiz".to_string(),
            subject_id,
            questions,
            time_limit_s: None,
            passing_score: DEFAULT_PASSING_SCORE,
            difficulty: difficulty.unwrap_or_default(),
            created_at: now,
        })
    }

    fn synthesize(&mut self, card: &Card, pool: &[&Card], kind: QuestionType) -> Question {
        match kind {
            QuestionType::MultipleChoice => self.multiple_choice(card, pool),
            QuestionType::TrueFalse => self.true_false(card, pool),
            QuestionType::ShortAnswer => short_answer(card),
            QuestionType::FillInBlank => self.fill_in_blank(card),
            // Matching needs several simultaneous pairs; a per-card question
            // degrades to short answer.
            QuestionType::Matching => short_answer(card),
        }
    }

    fn multiple_choice(&mut self, card: &Card, pool: &[&Card]) -> Question {
        let correct = card.back.clone();
        let mut backs: Vec<&str> = pool
            .iter()
            .filter(|other| other.id != card.id)
            .map(|other| other.back.as_str())
            .collect();
        backs.shuffle(&mut self.rng);

        let mut options = vec![correct.clone()];
        for back in backs {
            if options.len() == MULTIPLE_CHOICE_OPTIONS {
                break;
            }
            if options.iter().any(|option| option.eq_ignore_ascii_case(back)) {
                continue;
            }
            options.push(back.to_string());
        }
        options.shuffle(&mut self.rng);

        question(
            card,
            QuestionType::MultipleChoice,
            format!("Which of the following matches \"{}\"?", card.front),
            options,
            vec![correct],
            None,
        )
    }

    fn true_false(&mut self, card: &Card, pool: &[&Card]) -> Question {
        let others: Vec<&str> = pool
            .iter()
            .filter(|other| other.id != card.id)
            .map(|other| other.back.as_str())
            .collect();

        // The branch decides the answer: a statement built from another
        // card's back is graded False even if its text happens to match.
        let (shown, truthy) = if !others.is_empty() && self.rng.random_bool(0.5) {
            let other = *others.choose(&mut self.rng).expect("others is non-empty");
            (other.to_string(), false)
        } else {
            (card.back.clone(), true)
        };

        question(
            card,
            QuestionType::TrueFalse,
            format!(
                "True or false: \"{}\" corresponds to \"{shown}\".",
                card.front
            ),
            vec!["True".to_string(), "False".to_string()],
            vec![if truthy { "True" } else { "False" }.to_string()],
            None,
        )
    }

    fn fill_in_blank(&mut self, card: &Card) -> Question {
        let tokens: Vec<&str> = card.back.split_whitespace().collect();
        if tokens.len() <= 2 {
            return short_answer(card);
        }
        let blank_index = self.rng.random_range(0..tokens.len());
        let answer = tokens[blank_index].to_string();
        let blanked = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| if index == blank_index { "____" } else { *token })
            .collect::<Vec<_>>()
            .join(" ");

        question(
            card,
            QuestionType::FillInBlank,
            format!("Fill in the blank: \"{blanked}\""),
            Vec::new(),
            vec![answer],
            None,
        )
    }
}

fn short_answer(card: &Card) -> Question {
    let hint = card
        .back
        .trim()
        .chars()
        .next()
        .map(|first| format!("{first}..."));
    question(
        card,
        QuestionType::ShortAnswer,
        format!("What corresponds to \"{}\"?", card.front),
        Vec::new(),
        vec![card.back.clone()],
        hint,
    )
}

fn question(
    card: &Card,
    kind: QuestionType,
    text: String,
    options: Vec<String>,
    correct_answers: Vec<String>,
    hint: Option<String>,
) -> Question {
    Question {
        id: Uuid::new_v4(),
        text,
        kind,
        options,
        correct_answers,
        hint,
        explanation: Some(format!("The card answer is \"{}\".", card.back)),
        points: DEFAULT_QUESTION_POINTS,
        difficulty: card.difficulty,
        source_card_id: Some(card.id),
    }
}

fn empty_quiz(difficulty: Option<Difficulty>, now: DateTime<Utc>) -> Quiz {
    Quiz {
        id: Uuid::new_v4(),
        title: "Practice Quiz".to_string(),
        subject_id: Uuid::new_v4(),
        questions: Vec::new(),
        time_limit_s: None,
        passing_score: DEFAULT_PASSING_SCORE,
        difficulty: difficulty.unwrap_or_default(),
        created_at: now,
    }
}
