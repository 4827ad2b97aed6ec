use std::iter::FusedIterator;

use slab::Slab;

use crate::{
    interval::Interval,
    navigate::{first, last, predecessor, successor},
    node::{Node, NodeId},
};

/// An iterator over all `(interval, value)` entries of an
/// [`IntervalTree`](crate::IntervalTree), ordered by start bound.
///
/// Entries sharing a start bound are yielded largest end bound first.
///
/// Nodes are visited by following parent links, so no traversal stack is
/// maintained.
#[derive(Debug)]
pub struct Iter<'a, R, V> {
    nodes: &'a Slab<Node<R, V>>,

    /// The next `(node, entry position)` to yield from either end.
    front: Option<(NodeId, usize)>,
    back: Option<(NodeId, usize)>,

    /// The number of entries between `front` and `back` (inclusive).
    remaining: usize,
}

impl<'a, R, V> Iter<'a, R, V> {
    pub(crate) fn new(nodes: &'a Slab<Node<R, V>>, root: Option<NodeId>, len: usize) -> Self {
        Self {
            nodes,
            front: first(nodes, root).map(|id| (id, 0)),
            back: last(nodes, root).map(|id| (id, nodes[id].len() - 1)),
            remaining: len,
        }
    }
}

impl<R, V> Clone for Iter<'_, R, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, R, V> Iterator for Iter<'a, R, V> {
    type Item = (Interval<&'a R>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let (id, pos) = self.front?;
        let n = &nodes[id];

        // Advance to the next entry in this node, or the first entry of the
        // in-order successor.
        self.front = if pos + 1 < n.len() {
            Some((id, pos + 1))
        } else {
            successor(nodes, id).map(|v| (v, 0))
        };

        self.remaining -= 1;
        n.entry(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R, V> DoubleEndedIterator for Iter<'_, R, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let (id, pos) = self.back?;
        let n = &nodes[id];

        self.back = match pos {
            0 => predecessor(nodes, id).map(|v| (v, nodes[v].len() - 1)),
            _ => Some((id, pos - 1)),
        };

        self.remaining -= 1;
        n.entry(pos)
    }
}

impl<R, V> ExactSizeIterator for Iter<'_, R, V> {}
impl<R, V> FusedIterator for Iter<'_, R, V> {}

/// An iterator over the intervals of an [`IntervalTree`](crate::IntervalTree),
/// ordered by start bound.
#[derive(Debug, Clone)]
pub struct Keys<'a, R, V>(pub(crate) Iter<'a, R, V>);

impl<'a, R, V> Iterator for Keys<'a, R, V> {
    type Item = Interval<&'a R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<R, V> DoubleEndedIterator for Keys<'_, R, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, _)| k)
    }
}

impl<R, V> ExactSizeIterator for Keys<'_, R, V> {}
impl<R, V> FusedIterator for Keys<'_, R, V> {}

/// An iterator over the values of an [`IntervalTree`](crate::IntervalTree),
/// ordered by the start bound of their intervals.
#[derive(Debug, Clone)]
pub struct Values<'a, R, V>(pub(crate) Iter<'a, R, V>);

impl<'a, R, V> Iterator for Values<'a, R, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<R, V> DoubleEndedIterator for Values<'_, R, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, v)| v)
    }
}

impl<R, V> ExactSizeIterator for Values<'_, R, V> {}
impl<R, V> FusedIterator for Values<'_, R, V> {}

/// An owning iterator of the `(interval, value)` entries of an
/// [`IntervalTree`](crate::IntervalTree), ordered by start bound.
#[derive(Debug)]
pub struct IntoIter<R, V> {
    entries: std::vec::IntoIter<(Interval<R>, V)>,
}

impl<R, V> IntoIter<R, V>
where
    R: Clone,
{
    pub(crate) fn new(mut nodes: Slab<Node<R, V>>, root: Option<NodeId>, len: usize) -> Self {
        // Resolve the traversal order before nodes are removed from the slab,
        // invalidating their links.
        let order = std::iter::successors(first(&nodes, root), |&id| successor(&nodes, id))
            .collect::<Vec<_>>();

        let mut entries = Vec::with_capacity(len);
        for id in order {
            entries.extend(nodes.remove(id).into_entries());
        }

        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<R, V> Iterator for IntoIter<R, V> {
    type Item = (Interval<R>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<R, V> DoubleEndedIterator for IntoIter<R, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<R, V> ExactSizeIterator for IntoIter<R, V> {}
impl<R, V> FusedIterator for IntoIter<R, V> {}
