//! The AVL balancing engine.
//!
//! All functions operate on the tree's node slab and root pointer. Each node
//! stores only its balance factor (right height - left height), which is
//! repaired incrementally along the parent chain after a structural change.

use std::cmp::Ordering;

use slab::Slab;
use tracing::trace;

use crate::{
    interval::Interval,
    navigate::leftmost,
    node::{Node, NodeId, RemoveResult},
};

/// The child slot of a parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Insert `interval` into the tree rooted at `root`.
///
/// A new node is created only if no node holds the start bound of `interval`,
/// otherwise the entry is merged into the existing node without changing the
/// tree structure.
pub(crate) fn insert<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    interval: Interval<R>,
    value: V,
) where
    R: Ord + Clone,
{
    let Some(mut cur) = *root else {
        let id = nodes.insert(Node::new(interval, value, None));
        trace!(node = id, "inserted root node");
        *root = Some(id);
        return;
    };

    loop {
        let n = &mut nodes[cur];
        let (next, side) = match interval.start().cmp(n.start()) {
            Ordering::Less => (n.left, Side::Left),
            Ordering::Greater => (n.right, Side::Right),
            Ordering::Equal => {
                let (_, end) = interval.into_bounds();
                n.merge(end, value);
                trace!(node = cur, entries = n.len(), "merged entry into node");

                // The primary end bound may have grown.
                refresh_subtree_max(nodes, cur);
                return;
            }
        };

        if let Some(next) = next {
            cur = next;
            continue;
        }

        // Insert the value as a new immediate descendent of cur.
        let id = nodes.insert(Node::new(interval, value, Some(cur)));
        match side {
            Side::Left => nodes[cur].left = Some(id),
            Side::Right => nodes[cur].right = Some(id),
        }
        trace!(node = id, parent = cur, "inserted leaf node");

        rebalance_after_insert(nodes, root, id);
        return;
    }
}

/// Walk up from the newly inserted leaf `leaf`, shifting each ancestor's
/// balance factor towards the side that grew until the height change is
/// absorbed, and refreshing the subtree max of every visited node.
fn rebalance_after_insert<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    leaf: NodeId,
) where
    R: Ord + Clone,
{
    let mut child = leaf;
    let mut grew = true;

    while let Some(p) = nodes[child].parent {
        if grew {
            match side_of(nodes, p, child) {
                Side::Left => nodes[p].balance -= 1,
                Side::Right => nodes[p].balance += 1,
            }

            match nodes[p].balance {
                // The subtree rooted at p became balanced, so its height did
                // not change.
                0 => grew = false,
                // The subtree rooted at p is one level taller.
                -1 | 1 => {}
                // A single rotation (or double rotation) restores the height
                // the subtree had before the insert.
                _ => {
                    child = rebalance(nodes, root, p);
                    grew = false;
                    continue;
                }
            }

            update_subtree_max(nodes, p);
        } else if !update_subtree_max(nodes, p) {
            // Neither the height nor the max of this subtree changed, so no
            // ancestor is affected either.
            break;
        }

        child = p;
    }
}

/// Remove the entry `[start, end)` from the tree rooted at `root`, returning
/// the removed value, or [`None`] if no such entry exists.
///
/// Removing an entry from a node holding several entries does not change the
/// tree structure. The node itself is spliced out only when its last entry is
/// removed.
pub(crate) fn remove<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    start: &R,
    end: &R,
) -> Option<V>
where
    R: Ord + Clone,
{
    let id = find(nodes, *root, start)?;

    match nodes[id].remove_entry(end)? {
        RemoveResult::Removed(v) => {
            // The primary entry may have been replaced by one with a smaller
            // end bound.
            refresh_subtree_max(nodes, id);
            Some(v)
        }
        RemoveResult::Unlink => Some(unlink(nodes, root, id)),
    }
}

/// Remove node `id` from the tree, returning its primary value.
fn unlink<R, V>(nodes: &mut Slab<Node<R, V>>, root: &mut Option<NodeId>, id: NodeId) -> V
where
    R: Ord + Clone,
{
    // If "id" has two children, the in-order successor (the minimum node of
    // the right subtree) takes its place by exchanging entries, and the
    // successor node is removed instead.
    //
    //                      +------+
    //                 +----|  id  |----+
    //                 |    +------+    |
    //                 v                v
    //             +------+         +-------+
    //             | left |         | right |
    //             +------+         +-------+
    //                                  /
    //                                ...
    //                                /
    //                          +-----------+
    //                          | successor |
    //                          +-----------+
    //
    // The successor has no left child, so the node being removed always has
    // at most one child.
    let target = match (nodes[id].left, nodes[id].right) {
        (Some(_), Some(right)) => {
            let successor = leftmost(nodes, right);
            if let Some((a, b)) = nodes.get2_mut(id, successor) {
                Node::swap_entries(a, b);
            }
            successor
        }
        _ => id,
    };

    let n = &nodes[target];
    debug_assert!(n.left.is_none() || n.right.is_none());

    let child = n.left.or(n.right);
    let parent = n.parent;
    let side = parent.map(|p| side_of(nodes, p, target));

    if let Some(c) = child {
        nodes[c].parent = parent;
    }
    replace_child(nodes, root, parent, target, child);

    let old = nodes.remove(target);
    trace!(node = target, ?parent, "unlinked node");

    if let (Some(parent), Some(side)) = (parent, side) {
        rebalance_after_remove(nodes, root, parent, side);
    }

    old.into_value()
}

/// Walk up from `parent`, whose `side` subtree just shrank by one level,
/// repairing balance factors and rotating as needed.
///
/// Unlike insertion, a rotation after removal may itself shrink the subtree,
/// so rebalancing may continue up to the root. The subtree max of every
/// ancestor is refreshed, as the removed entries may have held the max.
fn rebalance_after_remove<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    parent: NodeId,
    side: Side,
) where
    R: Ord + Clone,
{
    let mut cur = Some(parent);
    let mut shrunk = Some(side);

    while let Some(n) = cur {
        let mut top = n;

        if let Some(side) = shrunk.take() {
            match side {
                Side::Left => nodes[n].balance += 1,
                Side::Right => nodes[n].balance -= 1,
            }

            let still_shrinking = match nodes[n].balance {
                // Both sides are now level at the shorter height.
                0 => true,
                // The other side still holds the subtree height.
                -1 | 1 => false,
                _ => {
                    top = rebalance(nodes, root, n);

                    // A rotation leaving the new subtree root with a non-zero
                    // balance factor preserves the original height.
                    nodes[top].balance == 0
                }
            };

            if still_shrinking {
                shrunk = nodes[top].parent.map(|p| side_of(nodes, p, top));
            }
        }

        update_subtree_max(nodes, top);
        cur = nodes[top].parent;
    }
}

/// Rotate the subtree rooted at `n` when its balance factor is +/-2,
/// returning the new subtree root.
fn rebalance<R, V>(nodes: &mut Slab<Node<R, V>>, root: &mut Option<NodeId>, n: NodeId) -> NodeId
where
    R: Ord + Clone,
{
    match (nodes[n].balance, nodes[n].left, nodes[n].right) {
        // Left-heavy
        (..=-2, Some(l), _) => {
            if nodes[l].balance > 0 {
                // Left-right
                rotate_left(nodes, root, l);
            }
            rotate_right(nodes, root, n)
        }
        // Right-heavy
        (2.., _, Some(r)) => {
            if nodes[r].balance < 0 {
                // Right-left
                rotate_right(nodes, root, r);
            }
            rotate_left(nodes, root, n)
        }
        _ => {
            debug_assert!(nodes[n].balance.abs() <= 1);
            n
        }
    }
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// The parent of `x` (or the tree root) is relinked to `P`, and `P` is
/// returned. If `x` has no right child, no rotation is performed and `x` is
/// returned.
///
/// The new balance factors of `x` and `P` are derived from their prior
/// values, without measuring subtree heights.
pub(crate) fn rotate_left<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    x: NodeId,
) -> NodeId
where
    R: Ord + Clone,
{
    let Some(p) = nodes[x].right else {
        return x;
    };

    let parent = nodes[x].parent;
    let inner = nodes[p].left;

    nodes[x].right = inner;
    if let Some(inner) = inner {
        nodes[inner].parent = Some(x);
    }

    nodes[p].left = Some(x);
    nodes[x].parent = Some(p);
    nodes[p].parent = parent;
    replace_child(nodes, root, parent, x, Some(p));

    let x_balance = nodes[x].balance - 1 - nodes[p].balance.max(0);
    let p_balance = nodes[p].balance - 1 + x_balance.min(0);
    nodes[x].balance = x_balance;
    nodes[p].balance = p_balance;

    // x is now the child of p, so must be updated first.
    update_subtree_max(nodes, x);
    update_subtree_max(nodes, p);

    trace!(node = x, pivot = p, x_balance, p_balance, "rotate left");

    p
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// The mirror of [`rotate_left()`].
pub(crate) fn rotate_right<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    y: NodeId,
) -> NodeId
where
    R: Ord + Clone,
{
    let Some(p) = nodes[y].left else {
        return y;
    };

    let parent = nodes[y].parent;
    let inner = nodes[p].right;

    nodes[y].left = inner;
    if let Some(inner) = inner {
        nodes[inner].parent = Some(y);
    }

    nodes[p].right = Some(y);
    nodes[y].parent = Some(p);
    nodes[p].parent = parent;
    replace_child(nodes, root, parent, y, Some(p));

    let y_balance = nodes[y].balance + 1 - nodes[p].balance.min(0);
    let p_balance = nodes[p].balance + 1 + y_balance.max(0);
    nodes[y].balance = y_balance;
    nodes[p].balance = p_balance;

    update_subtree_max(nodes, y);
    update_subtree_max(nodes, p);

    trace!(node = y, pivot = p, y_balance, p_balance, "rotate right");

    p
}

/// Point the child slot of `parent` that holds `old` at `new`, or the tree
/// root if `parent` is [`None`].
fn replace_child<R, V>(
    nodes: &mut Slab<Node<R, V>>,
    root: &mut Option<NodeId>,
    parent: Option<NodeId>,
    old: NodeId,
    new: Option<NodeId>,
) {
    let Some(parent) = parent else {
        *root = new;
        return;
    };

    match side_of(nodes, parent, old) {
        Side::Left => nodes[parent].left = new,
        Side::Right => nodes[parent].right = new,
    }
}

/// Return which child slot of `parent` holds `child`.
fn side_of<R, V>(nodes: &Slab<Node<R, V>>, parent: NodeId, child: NodeId) -> Side {
    if nodes[parent].left == Some(child) {
        Side::Left
    } else {
        debug_assert_eq!(nodes[parent].right, Some(child));
        Side::Right
    }
}

/// Recompute the subtree max of `id` from its own end bound and the subtree
/// max of its children, returning true if it changed.
fn update_subtree_max<R, V>(nodes: &mut Slab<Node<R, V>>, id: NodeId) -> bool
where
    R: Ord + Clone,
{
    let n = &nodes[id];
    let new_max = [n.left, n.right]
        .into_iter()
        .flatten()
        .map(|c| nodes[c].subtree_max())
        .fold(n.interval().end(), |acc, v| acc.max(v));

    if *new_max == n.subtree_max {
        return false;
    }

    let new_max = new_max.clone();
    nodes[id].subtree_max = new_max;
    true
}

/// Recompute the subtree max of `id` and its ancestors, stopping at the first
/// node whose max is unchanged.
fn refresh_subtree_max<R, V>(nodes: &mut Slab<Node<R, V>>, id: NodeId)
where
    R: Ord + Clone,
{
    let mut cur = Some(id);
    while let Some(n) = cur {
        if !update_subtree_max(nodes, n) {
            return;
        }
        cur = nodes[n].parent;
    }
}

/// Descend from `root` to the node holding `start`, if any.
pub(crate) fn find<R, V>(
    nodes: &Slab<Node<R, V>>,
    root: Option<NodeId>,
    start: &R,
) -> Option<NodeId>
where
    R: Ord,
{
    let mut cur = root;
    while let Some(id) = cur {
        let n = &nodes[id];
        cur = match start.cmp(n.start()) {
            Ordering::Less => n.left,
            Ordering::Equal => return Some(id),
            Ordering::Greater => n.right,
        };
    }
    None
}
