//! Minimal example demonstrating how to use the scheduler.
//!
//! Run with: `cargo run -p scheduler-core --example quickstart`

use chrono::Utc;
use learn_domain::{Card, Rating};
use scheduler_core::{Sm2Config, Sm2Scheduler};
use uuid::Uuid;

fn main() {
    // 1. Create a configuration (or use defaults)
    let config = Sm2Config::default();
    let scheduler = Sm2Scheduler::new(config);
    let now = Utc::now();

    // 2. Create a couple of cards for one subject
    let subject_id = Uuid::new_v4();
    let card = Card::new_at(subject_id, "hello", "안녕하세요", now);
    let other = Card::new_at(subject_id, "thank you", "감사합니다", now);

    // 3. Peek at what each rating would do before answering
    for (rating, seconds) in scheduler.preview(&card, now) {
        println!("{rating}: next review in {seconds}s");
    }

    // 4. Apply a review and inspect the updated card
    let updated = scheduler.review(&card, Rating::Good, now);
    println!(
        "Reviewed card {}: interval {} days, due {}",
        updated.id, updated.interval_days, updated.due
    );

    // 5. Build today's queue from the deck
    let queue = scheduler.build_queue(&[updated, other], 20, 100, now);
    println!("Cards in today's queue: {}", queue.len());
}
