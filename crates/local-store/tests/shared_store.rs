use std::sync::Arc;
use std::thread;

use local_store::{LocalStore, keys};

#[test]
fn concurrent_writers_on_distinct_keys_all_land() {
    let store = Arc::new(LocalStore::in_memory());

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..50u32 {
                    store
                        .save(&format!("educationai.test.worker{index}"), &round)
                        .expect("save");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker finished");
    }

    for index in 0..8 {
        assert_eq!(
            store.load::<u32>(&format!("educationai.test.worker{index}")),
            Some(49)
        );
    }
}

#[test]
fn readers_and_writers_interleave_without_corruption() {
    let store = Arc::new(LocalStore::in_memory());
    store.save("educationai.test.counter", &0u64).expect("seed");

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for value in 1..=200u64 {
                store.save("educationai.test.counter", &value).expect("save");
            }
        })
    };
    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..200 {
                let value = store
                    .load::<u64>("educationai.test.counter")
                    .expect("counter present");
                assert!(value <= 200);
            }
        })
    };

    writer.join().expect("writer finished");
    reader.join().expect("reader finished");
    assert_eq!(store.load::<u64>("educationai.test.counter"), Some(200));
}

#[test]
fn file_backed_stores_share_state_between_handles_sequentially() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("shared.json");

    let first = LocalStore::open(&path);
    first.save(keys::GAMIFICATION_TOTAL_XP, &150u64).expect("save");
    first.save(keys::GAMIFICATION_STREAK, &3u32).expect("save");
    drop(first);

    let second = LocalStore::open(&path);
    assert_eq!(second.load::<u64>(keys::GAMIFICATION_TOTAL_XP), Some(150));
    second.clear_prefix("educationai.gamification.").expect("clear");
    drop(second);

    let third = LocalStore::open(&path);
    assert!(!third.exists(keys::GAMIFICATION_TOTAL_XP));
    assert!(!third.exists(keys::GAMIFICATION_STREAK));
}
