use std::ops::Range;

use slab::Slab;
use tracing::trace;

use crate::{
    avl,
    error::{Error, Result},
    interval::Interval,
    iter::{IntoIter, Iter, Keys, Overlaps, StartingAt, Values},
    navigate,
    node::{Node, NodeId},
};

/// An [`IntervalTree`] stores `(interval, value)` entries, enabling efficient
/// lookup of all intervals that overlap a query range.
///
/// This [`IntervalTree`] stores non-empty, half-open intervals `[start, end)`.
/// Intervals that touch at an endpoint do not overlap.
///
/// # Duplicate Start Bounds
///
/// Any number of entries may share a start bound, including entries with
/// identical intervals. Entries sharing a start bound are held in a single
/// tree node, so they do not affect the tree height. Within a node, entries
/// are ordered by descending end bound.
///
/// # Read Optimised
///
/// This [`IntervalTree`] is backed by an augmented AVL tree. Each node caches
/// the maximum end bound of its subtree, allowing overlap queries to prune
/// entire subtrees that cannot contain a match.
///
/// The tree is rebalanced during inserts and removals, bounding the tree
/// height and maintaining a logarithmic worst-case time complexity for point
/// operations.
///
/// ## Node Metadata & `R: Clone`
///
/// The cached subtree maximum requires the interval bound type `R` to
/// implement [`Clone`], which may be invoked during insert and remove
/// operations.
///
/// If cloning `R` is prohibitively expensive consider using a reference-counted
/// type (such as [`Arc`] or [`Rc`]) to provide a [`Clone`] implementation
/// without needing to copy the actual content.
///
/// # Example
///
/// ```
/// use stabavl::IntervalTree;
///
/// let mut t = IntervalTree::default();
///
/// t.insert(15..20, "a")?;
/// t.insert(10..30, "b")?;
/// t.insert(17..19, "c")?;
/// t.insert(5..20, "d")?;
/// t.insert(12..15, "e")?;
/// t.insert(30..40, "f")?;
///
/// let mut got = t.overlaps(&(14..16)).map(|(_, v)| *v).collect::<Vec<_>>();
/// got.sort_unstable();
///
/// assert_eq!(got, ["a", "b", "d", "e"]);
/// # Ok::<(), stabavl::Error>(())
/// ```
///
/// [`Arc`]: std::sync::Arc
/// [`Rc`]: std::rc::Rc
#[derive(Debug, Clone)]
pub struct IntervalTree<R, V> {
    nodes: Slab<Node<R, V>>,
    root: Option<NodeId>,

    /// The number of entries (not nodes) in the tree.
    len: usize,
}

impl<R, V> Default for IntervalTree<R, V> {
    fn default() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
            len: 0,
        }
    }
}

impl<R, V> IntervalTree<R, V> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty tree with space for `capacity` distinct start
    /// bounds before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Return the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove all entries from the tree.
    ///
    /// The tree is reset in constant time by swapping in an empty node
    /// arena. Dropping the previously stored entries remains proportional to
    /// their number (and is free for types without drop glue).
    pub fn clear(&mut self) {
        let old = std::mem::take(&mut self.nodes);
        self.root = None;
        self.len = 0;
        drop(old);
    }

    /// Iterate over all `(interval, value)` entries in the tree, ordered by
    /// start bound.
    ///
    /// Entries sharing a start bound are yielded in descending end bound
    /// order.
    pub fn iter(&self) -> Iter<'_, R, V> {
        Iter::new(&self.nodes, self.root, self.len)
    }

    /// Iterate over the intervals in the tree, in the same order as
    /// [`IntervalTree::iter()`].
    pub fn keys(&self) -> Keys<'_, R, V> {
        Keys(self.iter())
    }

    /// Iterate over the values in the tree, in the same order as
    /// [`IntervalTree::iter()`].
    pub fn values(&self) -> Values<'_, R, V> {
        Values(self.iter())
    }

    /// Perform a depth-first, in-order walk of the tree, calling `f` with
    /// every entry and the depth of the node holding it (the root node has a
    /// depth of 0).
    ///
    /// All entries sharing a start bound are held in the same node, and are
    /// reported at the same depth.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(Interval<&R>, &V, usize),
    {
        if let Some(root) = self.root {
            navigate::walk(&self.nodes, root, 0, &mut f);
        }
    }

    #[cfg(test)]
    pub(crate) fn raw_parts(&self) -> (&Slab<Node<R, V>>, Option<NodeId>) {
        (&self.nodes, self.root)
    }
}

impl<R, V> IntervalTree<R, V>
where
    R: Ord + Clone,
{
    /// Construct a tree from `(range, value)` tuples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any range is empty or inverted.
    pub fn try_from_ranges<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Range<R>, V)>,
    {
        let mut t = Self::default();
        for (range, value) in iter {
            t.insert(range, value)?;
        }
        Ok(t)
    }

    /// Insert `value` for the interval described by `range`.
    ///
    /// Duplicate intervals are permitted; inserting an interval that already
    /// exists adds another entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `range.start >= range.end`, in
    /// which case the tree is left unchanged.
    pub fn insert(&mut self, range: Range<R>, value: V) -> Result<()> {
        let interval = Interval::try_from(range)?;
        self.insert_interval(interval, value);
        Ok(())
    }

    /// Insert `value` for the already validated `interval`.
    pub fn insert_interval(&mut self, interval: Interval<R>, value: V) {
        avl::insert(&mut self.nodes, &mut self.root, interval, value);
        self.len += 1;
    }

    /// Remove the entry with the exact interval `range`, returning its value.
    ///
    /// If multiple entries share `range`, one of them is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no entry matches `range`, in which
    /// case the tree is left unchanged.
    pub fn remove(&mut self, range: &Range<R>) -> Result<V> {
        match avl::remove(&mut self.nodes, &mut self.root, &range.start, &range.end) {
            Some(v) => {
                self.len -= 1;
                Ok(v)
            }
            None => {
                trace!("removal target not found");
                Err(Error::KeyNotFound)
            }
        }
    }
}

impl<R, V> IntervalTree<R, V>
where
    R: Ord,
{
    /// Return a reference to the value of an entry with the exact interval
    /// `range`, if any.
    ///
    /// If multiple entries share `range`, the value returned is the one
    /// [`IntervalTree::remove()`] would remove.
    pub fn get(&self, range: &Range<R>) -> Option<&V> {
        let id = avl::find(&self.nodes, self.root, &range.start)?;
        self.nodes[id].get(&range.end)
    }

    /// Return true if an entry with the exact interval `range` exists.
    pub fn contains(&self, range: &Range<R>) -> bool {
        self.get(range).is_some()
    }

    /// Lazily yield all entries whose interval overlaps `query`.
    ///
    /// An entry `[start, end)` overlaps `query` if
    /// `start < query.end && end > query.start`. An empty or inverted `query`
    /// overlaps nothing.
    ///
    /// See [`Overlaps`] for the yield order.
    pub fn overlaps<'a>(&'a self, query: &'a Range<R>) -> Overlaps<'a, R, V> {
        Overlaps::new(&self.nodes, self.root, query)
    }

    /// Yield all entries with a start bound equal to `start`.
    ///
    /// The entry with the largest end bound is yielded first.
    ///
    /// ```
    /// use stabavl::IntervalTree;
    ///
    /// let mut t = IntervalTree::default();
    /// t.insert(5..10, "a")?;
    /// t.insert(5..20, "b")?;
    ///
    /// let got = t
    ///     .starting_at(&5)
    ///     .map(|(i, v)| (i.cloned().into_range(), *v))
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(got, [(5..20, "b"), (5..10, "a")]);
    /// assert_eq!(t.starting_at(&6).count(), 0);
    /// # Ok::<(), stabavl::Error>(())
    /// ```
    pub fn starting_at(&self, start: &R) -> StartingAt<'_, R, V> {
        let node = avl::find(&self.nodes, self.root, start).map(|id| &self.nodes[id]);
        StartingAt::new(node)
    }
}

impl<R, V> FromIterator<(Interval<R>, V)> for IntervalTree<R, V>
where
    R: Ord + Clone,
{
    fn from_iter<T: IntoIterator<Item = (Interval<R>, V)>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<R, V> Extend<(Interval<R>, V)> for IntervalTree<R, V>
where
    R: Ord + Clone,
{
    fn extend<T: IntoIterator<Item = (Interval<R>, V)>>(&mut self, iter: T) {
        for (interval, value) in iter {
            self.insert_interval(interval, value);
        }
    }
}

impl<'a, R, V> IntoIterator for &'a IntervalTree<R, V> {
    type Item = (Interval<&'a R>, &'a V);
    type IntoIter = Iter<'a, R, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R, V> IntoIterator for IntervalTree<R, V>
where
    R: Clone,
{
    type Item = (Interval<R>, V);
    type IntoIter = IntoIter<R, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.root, self.len)
    }
}
