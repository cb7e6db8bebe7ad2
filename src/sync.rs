//! Reader/writer lock used to guard set members.
//!
//! Normally this is a thin wrapper over [`parking_lot::RwLock`]. With the
//! `loom` feature the same interface is backed by `loom::sync::RwLock` so
//! that model-checking tests can explore every interleaving of readers and
//! writers.
//!
//! `parking_lot` locks are never poisoned. The `loom` lock can be, in which
//! case the guard is recovered: a panic while holding the lock cannot leave
//! the underlying `IndexSet` in a state that violates its own invariants.

#[cfg(not(feature = "loom"))]
pub use parking_lot::{RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "loom")]
pub use loom::sync::{RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "loom")]
use std::sync::PoisonError;

/// A reader/writer lock with infallible acquisition.
pub struct RwLock<T> {
    #[cfg(not(feature = "loom"))]
    inner: parking_lot::RwLock<T>,
    #[cfg(feature = "loom")]
    inner: loom::sync::RwLock<T>,
}

impl<T> RwLock<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            #[cfg(not(feature = "loom"))]
            inner: parking_lot::RwLock::new(value),
            #[cfg(feature = "loom")]
            inner: loom::sync::RwLock::new(value),
        }
    }

    /// Acquires a shared lock, blocking until it is available.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        #[cfg(not(feature = "loom"))]
        {
            self.inner.read()
        }
        #[cfg(feature = "loom")]
        {
            self.inner.read().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Acquires an exclusive lock, blocking until it is available.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        #[cfg(not(feature = "loom"))]
        {
            self.inner.write()
        }
        #[cfg(feature = "loom")]
        {
            self.inner.write().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Consumes the lock and returns the guarded value.
    #[inline]
    pub fn into_inner(self) -> T {
        #[cfg(not(feature = "loom"))]
        {
            self.inner.into_inner()
        }
        #[cfg(feature = "loom")]
        {
            self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
