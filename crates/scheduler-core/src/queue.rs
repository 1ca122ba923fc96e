//! Study queue construction: due reviews first, then new cards.

use chrono::{DateTime, Utc};
use learn_domain::Card;

/// Build the ordered study queue for `now`.
///
/// Due, previously-reviewed cards come first, most overdue leading, capped at
/// `max_review`. New cards follow in creation order, capped at `max_new`.
/// Ties break on card id so the ordering is deterministic.
#[must_use]
pub fn study_queue(
    cards: &[Card],
    max_new: usize,
    max_review: usize,
    now: DateTime<Utc>,
) -> Vec<Card> {
    let mut queue: Vec<Card> = cards
        .iter()
        .filter(|card| card.is_due(now) && !card.is_new())
        .cloned()
        .collect();
    queue.sort_by(|a, b| (a.due, a.id).cmp(&(b.due, b.id)));
    queue.truncate(max_review);

    let mut fresh: Vec<Card> = cards.iter().filter(|card| card.is_new()).cloned().collect();
    fresh.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    fresh.truncate(max_new);

    queue.extend(fresh);
    queue
}
