use std::{iter::FusedIterator, ops::Range};

use slab::Slab;

use crate::{
    interval::Interval,
    node::{Node, NodeId},
};

/// An [`Iterator`] that performs a depth-first, in-order walk of the tree and
/// yields all entries that overlap a query range.
///
/// Entries are yielded in node order: matches from the left subtree, then the
/// matching entries of the node itself (largest end bound first), then
/// matches from the right subtree. Entries sharing a start bound are
/// therefore not sorted by end bound across the whole output.
///
/// Constructed by [`IntervalTree::overlaps()`](crate::IntervalTree::overlaps).
#[derive(Debug)]
pub struct Overlaps<'a, R, V> {
    nodes: &'a Slab<Node<R, V>>,
    query: &'a Range<R>,

    /// Nodes yet to be evaluated, with the next node on top.
    stack: Vec<NodeId>,

    /// The node whose entries are being yielded, and the position of the next
    /// entry to evaluate.
    current: Option<(NodeId, usize)>,
}

impl<'a, R, V> Overlaps<'a, R, V>
where
    R: Ord,
{
    pub(crate) fn new(
        nodes: &'a Slab<Node<R, V>>,
        root: Option<NodeId>,
        query: &'a Range<R>,
    ) -> Self {
        let mut this = Self {
            nodes,
            query,
            stack: vec![],
            current: None,
        };

        // An empty or inverted query range overlaps nothing.
        if query.start >= query.end {
            return this;
        }

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most leaf is reached.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: NodeId) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            let n = &self.nodes[v];
            if self.query.start >= *n.subtree_max() {
                // Prune the subtree rooted at "v" from the search.
                //
                // All intervals in this subtree end at or before the start of
                // the query range.
                break;
            }

            self.stack.push(v);
            ptr = n.left;
        }
    }
}

impl<'a, R, V> Iterator for Overlaps<'a, R, V>
where
    R: Ord,
{
    type Item = (Interval<&'a R>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;

        loop {
            if let Some((id, pos)) = self.current {
                let n = &nodes[id];

                // Entries are ordered by descending end bound, and all start
                // before the query end, so yield until the first entry that
                // ends at or before the query start.
                match n.entry(pos) {
                    Some((interval, value)) if *interval.end() > &self.query.start => {
                        self.current = Some((id, pos + 1));
                        return Some((interval, value));
                    }
                    _ => {
                        self.current = None;

                        // Push the right subtree to be visited next.
                        if let Some(right) = n.right {
                            self.push_subtree(right);
                        }
                    }
                }
            }

            let id = self.stack.pop()?;

            if self.query.end <= *nodes[id].start() {
                // Prune this node and the right subtree from the search.
                //
                // All values in the right subtree start at or after the end of
                // the query range.
                continue;
            }

            self.current = Some((id, 0));
        }
    }
}

impl<R, V> FusedIterator for Overlaps<'_, R, V> where R: Ord {}
