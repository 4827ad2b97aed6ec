//! An augmented AVL interval tree for efficient interval stabbing.
//!
//! An [`IntervalTree`] maps half-open intervals `[start, end)` to values, and
//! supports:
//!
//! * Overlap queries, yielding all entries that intersect a query range
//!   ([`IntervalTree::overlaps()`]).
//! * Exact start lookup ([`IntervalTree::starting_at()`]).
//! * Insertion and removal of entries, with any number of entries sharing a
//!   start bound.
//! * Ordered iteration in both directions ([`IntervalTree::iter()`]).
//!
//! ```
//! use stabavl::IntervalTree;
//!
//! let mut t = IntervalTree::default();
//! t.insert(0..5, "a")?;
//! t.insert(3..8, "b")?;
//! t.insert(3..4, "c")?;
//!
//! // Intervals touching an endpoint do not overlap.
//! let got = t.overlaps(&(5..10)).map(|(_, v)| *v).collect::<Vec<_>>();
//! assert_eq!(got, ["b"]);
//!
//! assert_eq!(t.remove(&(3..4))?, "c");
//! assert_eq!(t.len(), 2);
//! # Ok::<(), stabavl::Error>(())
//! ```
//!
//! The tree performs no internal synchronisation. Share it between threads
//! behind a lock.

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(missing_debug_implementations, missing_docs)]

mod avl;
mod error;
mod interval;
pub mod iter;
mod navigate;
mod node;
mod tree;

pub use error::*;
pub use interval::*;
pub use tree::*;

#[cfg(test)]
mod test_utils;
