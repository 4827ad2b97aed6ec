use std::iter::FusedIterator;

use crate::{interval::Interval, node::Node};

/// An iterator over all entries sharing a single start bound.
///
/// The primary entry (with the largest end bound) is yielded first, followed
/// by the remaining entries in descending end bound order.
///
/// Constructed by
/// [`IntervalTree::starting_at()`](crate::IntervalTree::starting_at).
#[derive(Debug)]
pub struct StartingAt<'a, R, V> {
    node: Option<&'a Node<R, V>>,
    pos: usize,
}

impl<'a, R, V> StartingAt<'a, R, V> {
    pub(crate) fn new(node: Option<&'a Node<R, V>>) -> Self {
        Self { node, pos: 0 }
    }
}

impl<R, V> Clone for StartingAt<'_, R, V> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            pos: self.pos,
        }
    }
}

impl<'a, R, V> Iterator for StartingAt<'a, R, V> {
    type Item = (Interval<&'a R>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.node?.entry(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.node.map(|v| v.len() - self.pos).unwrap_or_default();
        (n, Some(n))
    }
}

impl<R, V> ExactSizeIterator for StartingAt<'_, R, V> {}
impl<R, V> FusedIterator for StartingAt<'_, R, V> {}
