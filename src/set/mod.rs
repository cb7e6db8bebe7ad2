//! Concurrency-safe hash set.
//!
//! This module provides [`Set`], an unordered collection of unique values
//! guarded by a reader/writer lock. Every operation takes `&self`, so a
//! `Set` can be shared between threads behind an [`Arc`](std::sync::Arc) or
//! borrowed by scoped threads and mutated concurrently.
//!
//! # Locking
//!
//! - Queries (`has`, `len`, `values`, ...) take a shared lock.
//! - Mutations (`insert`, `delete`, `pop_any`, ...) take an exclusive lock
//!   once per call, however many values the call carries.
//! - Two-operand operations (`union`, `equal`, ...) hold shared locks on
//!   both operands for their whole duration. Distinct operands are locked
//!   in address order; a set passed as its own operand is locked once.
//!
//! Batch arguments are collected before the lock is taken, so an argument
//! iterator may itself read the set it is passed to.
//!
//! # Examples
//!
//! ```rust
//! use syncset::Set;
//!
//! let s = Set::from_values([1, 2, 3]);
//! let t = Set::from_values([1, 2, 4, 5]);
//!
//! assert_eq!(s.difference(&t), Set::from_values([3]));
//! assert_eq!(t.difference(&s), Set::from_values([4, 5]));
//! assert_eq!(s.intersection(&t), Set::from_values([1, 2]));
//! assert_eq!(s.union(&t), Set::from_values([1, 2, 3, 4, 5]));
//! ```

mod algebra;
#[cfg(feature = "serde")]
mod serde_support;

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexSet;
use indexmap::set as index_set;

use crate::hash::DefaultHashBuilder;
use crate::sync::RwLock;

// =============================================================================
// Set Definition
// =============================================================================

/// A hash set that can be read and mutated concurrently through `&self`.
///
/// Members are stored in an [`IndexSet`] behind a reader/writer lock. Derived
/// sets (`clone`, `union`, `intersection`, `difference`,
/// `symmetric_difference`) own fresh storage and a fresh lock and never
/// alias the sets they were built from.
///
/// # Time Complexity
///
/// | Operation              | Complexity             |
/// |------------------------|------------------------|
/// | `insert` / `delete`    | O(k) for k arguments   |
/// | `has`                  | O(1) expected          |
/// | `has_all` / `has_any`  | O(k) for k arguments   |
/// | `len` / `is_empty`     | O(1)                   |
/// | `pop_any`              | O(1)                   |
/// | `values` / `clone`     | O(n)                   |
/// | `union`                | O(n + m)               |
/// | `intersection`         | O(min(n, m))           |
/// | `difference`           | O(n)                   |
/// | `is_superset`          | O(m)                   |
/// | `equal`                | O(m)                   |
///
/// # Examples
///
/// ```rust
/// use syncset::Set;
///
/// let set = Set::new();
/// set.insert(["alpha", "beta"]);
///
/// assert!(set.has("alpha"));
/// assert_eq!(set.len(), 2);
/// ```
pub struct Set<V, S = DefaultHashBuilder> {
    members: RwLock<IndexSet<V, S>>,
}

impl<V> Set<V, DefaultHashBuilder> {
    /// Creates an empty set with the default hash builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set: Set<i32> = Set::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty set with room for at least `capacity` members.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<V: Hash + Eq> Set<V, DefaultHashBuilder> {
    /// Creates a set seeded with the given values.
    ///
    /// Duplicates among the inputs collapse silently.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([1, 2, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        values.into_iter().collect()
    }
}

impl<V, S> Set<V, S> {
    /// Creates an empty set that hashes members with `hasher`.
    #[inline]
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_members(IndexSet::with_hasher(hasher))
    }

    /// Creates an empty set with room for at least `capacity` members that
    /// hashes members with `hasher`.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from_members(IndexSet::with_capacity_and_hasher(capacity, hasher))
    }

    #[inline]
    fn from_members(members: IndexSet<V, S>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    /// Returns the number of members.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values(["a", "b"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Removes every member and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut members = self.members.write();
        let removed = members.len();
        members.clear();
        trace_event!(operation = "clear", removed, "cleared set");
        removed
    }

    /// Consumes the set and returns its members in unspecified order.
    ///
    /// No lock is taken: owning the set proves nobody else can reach it.
    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.members.into_inner().into_iter().collect()
    }
}

// =============================================================================
// Mutation and Queries
// =============================================================================

impl<V, S> Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts the given values, skipping those already present.
    ///
    /// The exclusive lock is acquired once for the whole batch. Returns the
    /// number of values that were not already members.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([1]);
    /// assert_eq!(set.insert([1, 2, 3]), 2);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn insert<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        let values: Vec<V> = values.into_iter().collect();

        let mut members = self.members.write();
        let inserted = values
            .into_iter()
            .map(|value| members.insert(value))
            .filter(|&added| added)
            .count();
        trace_event!(
            operation = "insert",
            inserted,
            len = members.len(),
            "inserted values"
        );
        inserted
    }

    /// Removes the given values, ignoring those that are absent.
    ///
    /// The exclusive lock is acquired once for the whole batch. Returns the
    /// number of members removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([1, 2, 3]);
    /// assert_eq!(set.delete(&[2, 9]), 1);
    /// assert!(!set.has(&2));
    /// ```
    pub fn delete<'a, Q, I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = &'a Q>,
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let values: Vec<&Q> = values.into_iter().collect();

        let mut members = self.members.write();
        let removed = values
            .into_iter()
            .filter(|value| members.swap_remove(*value))
            .count();
        trace_event!(
            operation = "delete",
            removed,
            len = members.len(),
            "deleted values"
        );
        removed
    }

    /// Keeps only the members for which `predicate` returns `true`.
    ///
    /// The predicate runs while the exclusive lock is held and must not
    /// access this set. Returns the number of members removed.
    pub fn retain<F>(&self, predicate: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let mut members = self.members.write();
        let before = members.len();
        members.retain(predicate);
        let removed = before - members.len();
        trace_event!(
            operation = "retain",
            removed,
            len = members.len(),
            "retained members"
        );
        removed
    }

    /// Returns `true` if `value` is a member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([String::from("hello")]);
    /// assert!(set.has("hello"));
    /// assert!(!set.has("world"));
    /// ```
    pub fn has<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.members.read().contains(value)
    }

    /// Returns `true` if every given value is a member.
    ///
    /// Vacuously `true` for no values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([1, 2, 3]);
    /// assert!(set.has_all(&[1, 3]));
    /// assert!(!set.has_all(&[1, 4]));
    /// ```
    pub fn has_all<'a, Q, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let values: Vec<&Q> = values.into_iter().collect();
        let members = self.members.read();
        values.into_iter().all(|value| members.contains(value))
    }

    /// Returns `true` if at least one given value is a member.
    ///
    /// Vacuously `false` for no values.
    pub fn has_any<'a, Q, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let values: Vec<&Q> = values.into_iter().collect();
        let members = self.members.read();
        values.into_iter().any(|value| members.contains(value))
    }

    /// Removes and returns some member, or `None` if the set is empty.
    ///
    /// Which member is removed is implementation-defined. It is not
    /// uniformly random and callers must not rely on any particular choice.
    /// Each call is O(1), so draining a set costs O(n).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([7]);
    /// assert_eq!(set.pop_any(), Some(7));
    /// assert_eq!(set.pop_any(), None);
    /// ```
    pub fn pop_any(&self) -> Option<V> {
        let mut members = self.members.write();
        let popped = members.pop();
        trace_event!(operation = "pop_any", len = members.len(), "popped member");
        popped
    }
}

impl<V, S> Set<V, S>
where
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Returns a snapshot of every member, in unspecified order.
    ///
    /// The returned `Vec` is a copy: later mutation of the set does not
    /// affect it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let set = Set::from_values([1, 2]);
    /// let mut snapshot = set.values();
    /// set.insert([3]);
    ///
    /// snapshot.sort_unstable();
    /// assert_eq!(snapshot, vec![1, 2]);
    /// ```
    pub fn values(&self) -> Vec<V> {
        self.members.read().iter().cloned().collect()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<V, S> Default for Set<V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<V, S> Clone for Set<V, S>
where
    V: Clone,
    S: Clone,
{
    /// Returns a set with exactly the receiver's members at the time of the
    /// call, with its own storage and lock.
    fn clone(&self) -> Self {
        let members = self.members.read().clone();
        trace_event!(operation = "clone", len = members.len(), "derived set");
        Self::from_members(members)
    }
}

impl<V, S> PartialEq for Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<V, S> Eq for Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
}

impl<V, S> FromIterator<V> for Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_members(iter.into_iter().collect())
    }
}

impl<V, S, const N: usize> From<[V; N]> for Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(values: [V; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<V, S> From<HashSet<V, S>> for Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(members: HashSet<V, S>) -> Self {
        members.into_iter().collect()
    }
}

impl<V, S> From<IndexSet<V, S>> for Set<V, S> {
    fn from(members: IndexSet<V, S>) -> Self {
        Self::from_members(members)
    }
}

impl<V, S> Extend<V> for Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.insert(iter);
    }
}

impl<V, S> Extend<V> for &Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.insert(iter);
    }
}

impl<V, S> IntoIterator for Set<V, S> {
    type Item = V;
    type IntoIter = index_set::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_inner().into_iter()
    }
}

impl<V, S> fmt::Debug for Set<V, S>
where
    V: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.members.read().iter()).finish()
    }
}

/// Renders a snapshot of the members as `{a, b, c}` in unspecified order.
///
/// Intended for diagnostics only; the output is not a parseable format.
impl<V, S> fmt::Display for Set<V, S>
where
    V: fmt::Display + Hash + Eq + Clone,
    S: BuildHasher,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for value in self.values() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
