//! In-order navigation over the node slab using parent links.

use slab::Slab;

use crate::{
    interval::Interval,
    node::{Node, NodeId},
};

/// Descend the left edge of the subtree rooted at `id`.
pub(crate) fn leftmost<R, V>(nodes: &Slab<Node<R, V>>, mut id: NodeId) -> NodeId {
    while let Some(left) = nodes[id].left {
        id = left;
    }
    id
}

/// Descend the right edge of the subtree rooted at `id`.
pub(crate) fn rightmost<R, V>(nodes: &Slab<Node<R, V>>, mut id: NodeId) -> NodeId {
    while let Some(right) = nodes[id].right {
        id = right;
    }
    id
}

/// Return the node with the minimum start bound in the tree, if any.
pub(crate) fn first<R, V>(nodes: &Slab<Node<R, V>>, root: Option<NodeId>) -> Option<NodeId> {
    root.map(|v| leftmost(nodes, v))
}

/// Return the node with the maximum start bound in the tree, if any.
pub(crate) fn last<R, V>(nodes: &Slab<Node<R, V>>, root: Option<NodeId>) -> Option<NodeId> {
    root.map(|v| rightmost(nodes, v))
}

/// Return the in-order successor of `id`.
///
/// This is the minimum node of the right subtree, if any, or otherwise the
/// first ancestor reached from a left child.
pub(crate) fn successor<R, V>(nodes: &Slab<Node<R, V>>, id: NodeId) -> Option<NodeId> {
    if let Some(right) = nodes[id].right {
        return Some(leftmost(nodes, right));
    }

    let mut child = id;
    let mut parent = nodes[id].parent;
    while let Some(p) = parent {
        if nodes[p].right != Some(child) {
            break;
        }
        child = p;
        parent = nodes[p].parent;
    }
    parent
}

/// Return the in-order predecessor of `id`, the mirror of [`successor()`].
pub(crate) fn predecessor<R, V>(nodes: &Slab<Node<R, V>>, id: NodeId) -> Option<NodeId> {
    if let Some(left) = nodes[id].left {
        return Some(rightmost(nodes, left));
    }

    let mut child = id;
    let mut parent = nodes[id].parent;
    while let Some(p) = parent {
        if nodes[p].left != Some(child) {
            break;
        }
        child = p;
        parent = nodes[p].parent;
    }
    parent
}

/// Perform a depth-first, in-order walk of the subtree rooted at `id`,
/// invoking `f` for every entry of every node with the depth of the node
/// holding it.
pub(crate) fn walk<R, V, F>(nodes: &Slab<Node<R, V>>, id: NodeId, depth: usize, f: &mut F)
where
    F: FnMut(Interval<&R>, &V, usize),
{
    let n = &nodes[id];

    if let Some(left) = n.left {
        walk(nodes, left, depth + 1, f);
    }

    for (interval, value) in (0..n.len()).map_while(|pos| n.entry(pos)) {
        f(interval, value, depth);
    }

    if let Some(right) = n.right {
        walk(nodes, right, depth + 1, f);
    }
}
