//! Scoring of quiz attempts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use learn_domain::{AnswerRecord, Quiz, QuizResult};
use uuid::Uuid;

use crate::errors::QuizError;

/// Grade a quiz attempt.
///
/// Every question is graded in quiz order; questions without a submitted
/// answer are graded against the empty string. The per-answer response time
/// is `time_taken_s` spread evenly across the questions.
///
/// # Errors
///
/// Returns [`QuizError::UnknownQuestion`] when `answers` contains a key the
/// quiz has no question for.
pub fn score_quiz(
    quiz: &Quiz,
    answers: &HashMap<Uuid, String>,
    time_taken_s: f64,
    completed_at: DateTime<Utc>,
) -> Result<QuizResult, QuizError> {
    for question_id in answers.keys() {
        if !quiz.questions.iter().any(|q| q.id == *question_id) {
            return Err(QuizError::UnknownQuestion {
                question_id: *question_id,
            });
        }
    }

    let points_available = quiz.total_points();
    let response_time_s = if quiz.questions.is_empty() {
        0.0
    } else {
        time_taken_s / quiz.questions.len() as f64
    };

    let mut points_earned = 0.0;
    let mut records = Vec::with_capacity(quiz.questions.len());
    for q in &quiz.questions {
        let submitted = answers.get(&q.id).cloned().unwrap_or_default();
        let is_correct = q.accepts(&submitted);
        if is_correct {
            points_earned += q.points;
        }
        records.push(AnswerRecord {
            question_id: q.id,
            submitted,
            is_correct,
            response_time_s,
        });
    }

    let score = if points_available > 0.0 {
        points_earned / points_available
    } else {
        0.0
    };

    Ok(QuizResult {
        quiz_id: quiz.id,
        subject_id: quiz.subject_id,
        answers: records,
        score,
        points_earned,
        points_available,
        time_taken_s,
        passed: score >= quiz.passing_score,
        completed_at,
    })
}
