//! Default hash builder selection.
//!
//! The hasher used by [`Set::new`](crate::Set::new) is chosen at compile time:
//!
//! | Features enabled     | `DefaultHashBuilder`                          |
//! |----------------------|-----------------------------------------------|
//! | `fxhash`             | `rustc_hash::FxBuildHasher`                   |
//! | `ahash` only         | `ahash::RandomState`                          |
//! | neither              | `std::collections::hash_map::RandomState`     |
//!
//! `fxhash` takes precedence when both features are enabled. Any other
//! [`BuildHasher`](std::hash::BuildHasher) can be supplied explicitly through
//! [`Set::with_hasher`](crate::Set::with_hasher).

/// The hash builder used when none is given explicitly.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The hash builder used when none is given explicitly.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hash builder used when none is given explicitly.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
