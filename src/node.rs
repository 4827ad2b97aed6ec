use std::mem;

use crate::interval::Interval;

/// The slab index of a [`Node`].
pub(crate) type NodeId = usize;

/// The outcome of removing a single entry from a [`Node`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RemoveResult<V> {
    /// The entry was removed and the node still holds at least one entry.
    Removed(V),

    /// The matching entry is the last entry in this node, and the node itself
    /// must be unlinked from the tree to remove it.
    Unlink,
}

/// A tree node holding every entry that shares a single start bound.
///
/// The primary entry always holds the largest end bound of all entries in the
/// node. Any further entries with the same start are held in `overflow` as
/// `(end, value)` pairs, ordered from largest to smallest end bound.
#[derive(Debug, Clone)]
pub(crate) struct Node<R, V> {
    /// Links to the parent and child nodes, if any.
    ///
    /// The parent link is used for navigation only; nodes are owned by the
    /// tree's slab.
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// The AVL balance factor: the height of the right subtree minus the
    /// height of the left subtree.
    ///
    /// Only ever +/-2 while a rebalance is in progress.
    pub(crate) balance: i8,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    pub(crate) subtree_max: R,

    interval: Interval<R>,
    value: V,
    overflow: Vec<(R, V)>,
}

impl<R, V> Node<R, V> {
    pub(crate) fn new(interval: Interval<R>, value: V, parent: Option<NodeId>) -> Self
    where
        R: Clone,
    {
        Self {
            subtree_max: interval.end().clone(),
            interval,
            value,
            overflow: Vec::new(),
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }

    pub(crate) fn start(&self) -> &R {
        self.interval.start()
    }

    pub(crate) fn interval(&self) -> &Interval<R> {
        &self.interval
    }

    #[cfg(test)]
    pub(crate) fn overflow(&self) -> &[(R, V)] {
        &self.overflow
    }

    pub(crate) fn subtree_max(&self) -> &R {
        &self.subtree_max
    }

    /// The number of entries held in this node.
    pub(crate) fn len(&self) -> usize {
        1 + self.overflow.len()
    }

    /// Return the entry at `pos`, where position 0 is the primary entry and
    /// all subsequent positions index into the overflow list.
    pub(crate) fn entry(&self, pos: usize) -> Option<(Interval<&R>, &V)> {
        match pos {
            0 => Some((self.interval.as_ref(), &self.value)),
            _ => self
                .overflow
                .get(pos - 1)
                .map(|(end, v)| (Interval::new_unchecked(self.start(), end), v)),
        }
    }

    /// Add an entry sharing the start bound of this node.
    ///
    /// If `end` exceeds the primary end bound, the new entry becomes the
    /// primary and the old primary moves into the overflow list.
    pub(crate) fn merge(&mut self, end: R, value: V)
    where
        R: Ord,
    {
        if end > *self.interval.end() {
            let old_end = self.interval.replace_end(end);
            let old_value = mem::replace(&mut self.value, value);
            self.push_overflow(old_end, old_value);
        } else {
            self.push_overflow(end, value);
        }
    }

    /// Insert into the overflow list after any existing entries with an equal
    /// or greater end bound.
    fn push_overflow(&mut self, end: R, value: V)
    where
        R: Ord,
    {
        let idx = self.overflow.partition_point(|(e, _)| *e >= end);
        self.overflow.insert(idx, (end, value));
    }

    /// Return the value of the entry with the given `end` bound, selecting the
    /// same entry [`Node::remove_entry()`] would remove.
    pub(crate) fn get(&self, end: &R) -> Option<&V>
    where
        R: Ord,
    {
        if self.interval.end() == end {
            return Some(&self.value);
        }

        self.overflow
            .iter()
            .rev()
            .find(|(e, _)| e == end)
            .map(|(_, v)| v)
    }

    /// Remove the entry with the given `end` bound from this node.
    ///
    /// The primary entry is matched first. If the primary matches and the
    /// overflow list is non-empty, the largest overflow entry is promoted to
    /// primary. Otherwise the overflow list is searched, and if multiple
    /// overflow entries share `end`, the last one is removed.
    ///
    /// Returns [`RemoveResult::Unlink`] if the matching entry is the only
    /// entry in this node, and [`None`] if no entry matches.
    pub(crate) fn remove_entry(&mut self, end: &R) -> Option<RemoveResult<V>>
    where
        R: Ord,
    {
        if self.interval.end() == end {
            if self.overflow.is_empty() {
                return Some(RemoveResult::Unlink);
            }

            let (new_end, new_value) = self.overflow.remove(0);
            self.interval.replace_end(new_end);
            return Some(RemoveResult::Removed(mem::replace(
                &mut self.value,
                new_value,
            )));
        }

        let idx = self.overflow.iter().rposition(|(e, _)| e == end)?;
        let (_, v) = self.overflow.remove(idx);
        Some(RemoveResult::Removed(v))
    }

    /// Exchange the entries (but not the links or metadata) of `a` and `b`.
    pub(crate) fn swap_entries(a: &mut Self, b: &mut Self) {
        mem::swap(&mut a.interval, &mut b.interval);
        mem::swap(&mut a.value, &mut b.value);
        mem::swap(&mut a.overflow, &mut b.overflow);
    }

    /// Consume this node, returning the primary value.
    pub(crate) fn into_value(self) -> V {
        debug_assert!(self.overflow.is_empty());
        self.value
    }

    /// Explode this [`Node`] into all the entries it contains, primary first.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = (Interval<R>, V)>
    where
        R: Clone,
    {
        let start = self.interval.start().clone();
        std::iter::once((self.interval, self.value)).chain(
            self.overflow
                .into_iter()
                .map(move |(end, v)| (Interval::new_unchecked(start.clone(), end), v)),
        )
    }
}
