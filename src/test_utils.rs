use std::{fmt::Debug, ops::Range};

use proptest::prelude::*;
use slab::Slab;

use crate::{
    interval::Interval,
    node::{Node, NodeId},
    IntervalTree,
};

const RANGE_MAX: usize = 20;

/// Generate arbitrary (potentially invalid!) ranges with bounds from
/// [0..[`RANGE_MAX`]).
pub(crate) fn arbitrary_range() -> impl Strategy<Value = Range<usize>> {
    (0..RANGE_MAX, 0..RANGE_MAX).prop_map(|(start, end)| Range { start, end })
}

/// Generate arbitrary valid intervals with bounds from [0..[`RANGE_MAX`]).
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<usize>> {
    (0..RANGE_MAX - 1)
        .prop_flat_map(|start| (Just(start), start + 1..RANGE_MAX))
        .prop_map(|(start, end)| Interval::new(start, end).unwrap())
}

/// Properties of a validated subtree.
struct Subtree<'a, R> {
    height: i64,
    entries: usize,
    nodes: usize,
    min_start: &'a R,
    max_start: &'a R,
    max_end: &'a R,
}

/// Assert the BST, AVL and interval tree properties of tree nodes, ensuring
/// the tree is well-formed.
pub(crate) fn validate_tree_structure<R, V>(t: &IntervalTree<R, V>)
where
    R: Ord + Debug,
{
    let (nodes, root) = t.raw_parts();

    let root = match root {
        Some(v) => v,
        None => {
            assert!(nodes.is_empty(), "empty tree holds unreachable nodes");
            assert_eq!(t.len(), 0);
            return;
        }
    };

    assert_eq!(nodes[root].parent, None, "root has a parent");

    let s = validate_subtree(nodes, root);

    // Every entry is counted, and every allocated node is reachable.
    assert_eq!(s.entries, t.len());
    assert_eq!(s.nodes, nodes.len());
}

fn validate_subtree<R, V>(nodes: &Slab<Node<R, V>>, id: NodeId) -> Subtree<'_, R>
where
    R: Ord + Debug,
{
    let n = &nodes[id];

    let mut this = Subtree {
        height: 1,
        entries: n.len(),
        nodes: 1,
        min_start: n.start(),
        max_start: n.start(),
        max_end: n.interval().end(),
    };

    let mut child_height = [0, 0];
    for (i, child) in [n.left, n.right].into_iter().enumerate() {
        let Some(child) = child else {
            continue;
        };

        // Invariant 1: the child links back to this node.
        assert_eq!(nodes[child].parent, Some(id), "broken parent link");

        let c = validate_subtree(nodes, child);

        // Invariant 2: the left subtree contains only starts strictly less
        // than this node, and the right subtree strictly greater.
        if i == 0 {
            assert!(c.max_start < n.start(), "{:?} in left of {:?}", c.max_start, n.start());
            this.min_start = c.min_start;
        } else {
            assert!(c.min_start > n.start(), "{:?} in right of {:?}", c.min_start, n.start());
            this.max_start = c.max_start;
        }

        child_height[i] = c.height;
        this.height = this.height.max(c.height + 1);
        this.entries += c.entries;
        this.nodes += c.nodes;
        this.max_end = this.max_end.max(c.max_end);
    }

    // Invariant 3: the stored balance factor matches the real subtree
    // heights, and never exceeds an absolute difference of 1.
    let balance = child_height[1] - child_height[0];
    assert_eq!(
        i64::from(n.balance),
        balance,
        "node with start {:?} has balance {}, want {}",
        n.start(),
        n.balance,
        balance,
    );
    assert!(balance.abs() <= 1, "balance={balance}, node={:?}", n.start());

    // Invariant 4: the subtree max of "n" is the largest end bound of any
    // entry in the subtree.
    assert_eq!(
        n.subtree_max(),
        this.max_end,
        "node with start {:?} has stale subtree max",
        n.start()
    );

    // Invariant 5: the overflow entries are ordered by descending end bound,
    // never exceed the primary end bound, and are valid intervals.
    let overflow = n.overflow();
    assert!(overflow.windows(2).all(|w| w[0].0 >= w[1].0));
    assert!(overflow
        .iter()
        .all(|(end, _)| end <= n.interval().end() && end > n.start()));

    this
}
