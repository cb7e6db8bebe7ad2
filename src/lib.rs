//! # syncset
//!
//! A concurrency-safe hash set: an unordered collection of unique values
//! that can be mutated through a shared reference and combined with the
//! usual set algebra.
//!
//! ## Overview
//!
//! - [`Set`]: a hash set guarded by a reader/writer lock. Queries take a
//!   shared lock, mutations take an exclusive lock once per batch.
//! - Set algebra (`union`, `intersection`, `difference`, ...) always returns
//!   a new, independently owned [`Set`] and never mutates its operands.
//!
//! ## Feature Flags
//!
//! - `fxhash`: use `rustc_hash::FxBuildHasher` as the default hasher
//! - `ahash`: use `ahash::RandomState` as the default hasher
//! - `serde`: `Serialize`/`Deserialize` implementations
//! - `tracing`: trace-level events for mutations and derived sets
//! - `loom`: build the lock on `loom` for model-checking tests
//! - `full`: `serde` and `tracing`
//!
//! ## Example
//!
//! ```rust
//! use syncset::prelude::*;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(Set::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || set.insert((0..10).map(|index| worker * 10 + index)))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(set.len(), 40);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use syncset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::hash::DefaultHashBuilder;
    pub use crate::set::Set;
}

#[macro_use]
mod trace;

pub mod hash;
pub mod set;

mod sync;

pub use hash::DefaultHashBuilder;
pub use set::Set;
