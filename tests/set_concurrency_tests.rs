#![cfg(not(feature = "loom"))]
//! Concurrency tests for Set.
//!
//! Multi-threaded stress tests that check for lost updates, duplicated pops
//! and deadlocks between two-operand operations running in opposite
//! directions.
//!
//! Exhaustive interleaving checks live in `set_loom_tests.rs`.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use rstest::rstest;
use syncset::Set;

const THREADS: usize = 8;
const VALUES_PER_THREAD: usize = 1000;

/// Tests that N threads inserting M distinct values yield N*M members.
#[rstest]
fn test_concurrent_inserts_lose_no_updates() {
    let set = Arc::new(Set::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for index in 0..VALUES_PER_THREAD {
                    set.insert([worker * VALUES_PER_THREAD + index]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(set.len(), THREADS * VALUES_PER_THREAD);
}

/// Tests that overlapping batches from many threads collapse to one copy each.
#[rstest]
fn test_concurrent_batch_inserts_with_overlap() {
    let set = Set::new();

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| set.insert(0..VALUES_PER_THREAD));
        }
    });

    assert_eq!(set.len(), VALUES_PER_THREAD);
}

/// Tests that concurrent `pop_any` calls hand out every member exactly once.
#[rstest]
fn test_concurrent_pops_return_each_member_once() {
    let total = THREADS * VALUES_PER_THREAD;
    let set: Set<usize> = (0..total).collect();

    let popped: Vec<Vec<usize>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    let mut taken = Vec::new();
                    while let Some(value) = set.pop_any() {
                        taken.push(value);
                    }
                    taken
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let flattened: Vec<usize> = popped.into_iter().flatten().collect();
    let unique: HashSet<usize> = flattened.iter().copied().collect();

    assert_eq!(flattened.len(), total);
    assert_eq!(unique.len(), total);
    assert!(set.is_empty());
}

/// Tests that readers never observe half of an insert batch.
#[rstest]
fn test_readers_observe_whole_batches() {
    let set = Set::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            for round in 0..500_usize {
                set.insert([round * 2, round * 2 + 1]);
            }
        });
        scope.spawn(|| {
            for _ in 0..500 {
                assert_eq!(set.len() % 2, 0);
            }
        });
    });

    assert_eq!(set.len(), 1000);
}

/// Tests that `s.op(t)` and `t.op(s)` racing with writers on both sets finish.
#[rstest]
fn test_opposite_two_operand_operations_with_writers_complete() {
    let s: Set<usize> = (0..100).collect();
    let t: Set<usize> = (50..150).collect();

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..500 {
                let _ = s.union(&t);
                let _ = s.is_superset(&t);
            }
        });
        scope.spawn(|| {
            for _ in 0..500 {
                let _ = t.intersection(&s);
                let _ = t.equal(&s);
            }
        });
        scope.spawn(|| {
            for round in 0..500 {
                s.insert([1000 + round]);
                t.delete(&[1000 + round]);
            }
        });
        scope.spawn(|| {
            for round in 0..500 {
                t.insert([2000 + round]);
                s.delete(&[2000 + round]);
            }
        });
    });

    assert!(s.has_all(&[0, 99, 1000, 1499]));
    assert!(t.has_all(&[50, 149, 2000, 2499]));
}

/// Tests that self-operand operations finish while a writer is active.
#[rstest]
fn test_self_operand_under_contention() {
    let set: Set<usize> = (0..64).collect();

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..500 {
                assert!(set.equal(&set));
                assert!(set.difference(&set).is_empty());
            }
        });
        scope.spawn(|| {
            for round in 0..500 {
                set.insert([64 + round]);
            }
        });
    });

    assert_eq!(set.len(), 564);
}

/// Tests that `Set` can be shared between threads.
#[rstest]
fn test_set_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Set<i32>>();
    assert_send_sync::<Set<String>>();
}
