//! Model-checking tests for Set.
//!
//! With the `loom` feature the set's lock is built on `loom::sync::RwLock`,
//! so each `loom::model` call explores every interleaving of the threads it
//! spawns.
//!
//! # Running these tests
//!
//! ```bash
//! cargo test --test set_loom_tests --features loom --release
//! ```

#![cfg(feature = "loom")]

use loom::sync::Arc;
use loom::thread;

use syncset::Set;

/// Verifies that two concurrent insert batches are both visible.
#[test]
fn loom_concurrent_inserts_are_not_lost() {
    loom::model(|| {
        let set = Arc::new(Set::new());

        let handles: Vec<_> = (0..2)
            .map(|worker| {
                let set = Arc::clone(&set);
                thread::spawn(move || {
                    set.insert([worker * 10, worker * 10 + 1]);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(set.len(), 4);
    });
}

/// Verifies that two concurrent pops never return the same member.
#[test]
fn loom_concurrent_pops_never_duplicate() {
    loom::model(|| {
        let set = Arc::new(Set::from_values([1, 2]));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let set = Arc::clone(&set);
                thread::spawn(move || set.pop_any())
            })
            .collect();

        let mut popped: Vec<i32> = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap())
            .collect();
        popped.sort_unstable();

        assert_eq!(popped, vec![1, 2]);
        assert!(set.is_empty());
    });
}

/// Verifies that unions in opposite directions with a writer never deadlock.
#[test]
fn loom_opposite_unions_do_not_deadlock() {
    loom::model(|| {
        let s = Arc::new(Set::from_values([1]));
        let t = Arc::new(Set::from_values([2]));

        let forward = {
            let (s, t) = (Arc::clone(&s), Arc::clone(&t));
            thread::spawn(move || s.union(&t).len())
        };
        let writer = {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                t.insert([3]);
            })
        };

        let backward = t.union(&s).len();
        let forward = forward.join().unwrap();
        writer.join().unwrap();

        assert!(forward == 2 || forward == 3);
        assert!(backward == 2 || backward == 3);
    });
}

/// Verifies that a self-union with a concurrent writer completes.
#[test]
fn loom_self_union_with_writer() {
    loom::model(|| {
        let set = Arc::new(Set::from_values([1]));

        let writer = {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                set.insert([2]);
            })
        };

        let union = set.union(&set);
        writer.join().unwrap();

        assert!(union.len() == 1 || union.len() == 2);
        assert_eq!(set.len(), 2);
    });
}
