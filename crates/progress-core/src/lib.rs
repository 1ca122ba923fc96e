//! Progress tracking and adaptive difficulty over the study event stream.

mod adaptive;
mod tracker;

pub use crate::adaptive::{AdaptiveEngine, PerformanceSnapshot, Trend};
pub use crate::tracker::ProgressTracker;
