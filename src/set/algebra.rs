//! Set algebra over two operands.
//!
//! Every operation here reads two sets. Both shared locks are held before
//! either side is inspected and are released together when the operation
//! returns, so each side is observed in a single consistent state.
//!
//! Distinct operands are locked in address order. Locking in argument order
//! would let `s.union(&t)` and `t.union(&s)` each hold one read lock while a
//! writer queued on the other blocks further readers, which deadlocks. When
//! an operation receives its own receiver as the other operand, exactly one
//! shared lock is taken and both sides read through it.

use std::hash::{BuildHasher, Hash};
use std::ptr;

use indexmap::IndexSet;

use super::Set;
use crate::sync::RwLockReadGuard;

// =============================================================================
// Operand Locking
// =============================================================================

/// Read guards over the two operands of an algebraic operation.
enum Operands<'a, V, S> {
    /// The receiver was passed as its own operand.
    Aliased(RwLockReadGuard<'a, IndexSet<V, S>>),
    Distinct {
        receiver: RwLockReadGuard<'a, IndexSet<V, S>>,
        other: RwLockReadGuard<'a, IndexSet<V, S>>,
    },
}

impl<V, S> Operands<'_, V, S> {
    /// Returns `(receiver, other)`.
    fn sides(&self) -> (&IndexSet<V, S>, &IndexSet<V, S>) {
        match self {
            Self::Aliased(both) => (&**both, &**both),
            Self::Distinct { receiver, other } => (&**receiver, &**other),
        }
    }
}

impl<V, S> Set<V, S> {
    fn lock_operands<'a>(&'a self, other: &'a Self) -> Operands<'a, V, S> {
        if ptr::eq(self, other) {
            return Operands::Aliased(self.members.read());
        }

        if ptr::from_ref(self) < ptr::from_ref(other) {
            let receiver = self.members.read();
            let other = other.members.read();
            Operands::Distinct { receiver, other }
        } else {
            let other = other.members.read();
            let receiver = self.members.read();
            Operands::Distinct { receiver, other }
        }
    }
}

// =============================================================================
// Derived Sets
// =============================================================================

impl<V, S> Set<V, S>
where
    V: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Returns a new set with the members of either operand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let s = Set::from_values([1, 2]);
    /// let t = Set::from_values([3, 4]);
    ///
    /// assert_eq!(s.union(&t), Set::from_values([1, 2, 3, 4]));
    /// assert_eq!(t.union(&s), Set::from_values([1, 2, 3, 4]));
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();

        let mut members = receiver.clone();
        members.extend(other.iter().cloned());
        trace_event!(operation = "union", len = members.len(), "derived set");
        Self::from_members(members)
    }

    /// Returns a new set with the members present in both operands.
    ///
    /// Walks whichever operand has fewer members and probes the other, so
    /// the cost is bounded by `min(self.len(), other.len())` lookups.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let s = Set::from_values([1, 2]);
    /// let t = Set::from_values([2, 3]);
    ///
    /// assert_eq!(s.intersection(&t), Set::from_values([2]));
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();

        let (walk, probe) = if receiver.len() < other.len() {
            (receiver, other)
        } else {
            (other, receiver)
        };

        let mut members =
            IndexSet::with_capacity_and_hasher(walk.len(), receiver.hasher().clone());
        members.extend(walk.iter().filter(|value| probe.contains(*value)).cloned());
        trace_event!(
            operation = "intersection",
            len = members.len(),
            "derived set"
        );
        Self::from_members(members)
    }

    /// Returns a new set with the members of `self` that are not in `other`.
    ///
    /// Not symmetric: `s.difference(&t)` and `t.difference(&s)` generally
    /// differ.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let s = Set::from_values([1, 2, 3]);
    /// let t = Set::from_values([1, 2, 4, 5]);
    ///
    /// assert_eq!(s.difference(&t), Set::from_values([3]));
    /// assert_eq!(t.difference(&s), Set::from_values([4, 5]));
    /// ```
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();

        let mut members = IndexSet::with_hasher(receiver.hasher().clone());
        members.extend(
            receiver
                .iter()
                .filter(|value| !other.contains(*value))
                .cloned(),
        );
        trace_event!(operation = "difference", len = members.len(), "derived set");
        Self::from_members(members)
    }

    /// Returns a new set with the members present in exactly one operand.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();

        let mut members = IndexSet::with_hasher(receiver.hasher().clone());
        members.extend(receiver.symmetric_difference(other).cloned());
        trace_event!(
            operation = "symmetric_difference",
            len = members.len(),
            "derived set"
        );
        Self::from_members(members)
    }
}

// =============================================================================
// Comparisons
// =============================================================================

impl<V, S> Set<V, S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if every member of `other` is also a member of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let s = Set::from_values([1, 2, 3]);
    /// assert!(s.is_superset(&Set::from_values([1, 3])));
    /// assert!(!s.is_superset(&Set::from_values([1, 4])));
    /// ```
    pub fn is_superset(&self, other: &Self) -> bool {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();
        contains_all(receiver, other)
    }

    /// Returns `true` if every member of `self` is also a member of `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();
        contains_all(other, receiver)
    }

    /// Returns `true` if the operands share no members.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();
        receiver.is_disjoint(other)
    }

    /// Returns `true` if both sets have exactly the same members.
    ///
    /// Equal member counts together with `self ⊇ other` imply equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::Set;
    ///
    /// let s = Set::from_values([1, 2]);
    /// assert!(s.equal(&Set::from_values([2, 1])));
    /// assert!(!s.equal(&Set::from_values([1])));
    /// ```
    pub fn equal(&self, other: &Self) -> bool {
        let operands = self.lock_operands(other);
        let (receiver, other) = operands.sides();
        receiver.len() == other.len() && contains_all(receiver, other)
    }
}

fn contains_all<V, S>(container: &IndexSet<V, S>, candidates: &IndexSet<V, S>) -> bool
where
    V: Hash + Eq,
    S: BuildHasher,
{
    candidates.iter().all(|value| container.contains(value))
}

// =============================================================================
// Tests
// =============================================================================
