//! Priority-ranked study suggestions built from cards and progress.

mod engine;
mod model;

pub use crate::engine::{DEFAULT_LIMIT, RecommendationEngine};
pub use crate::model::{Priority, Recommendation, RecommendationKind};
