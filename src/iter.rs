//! Iterators over the entries of an [`IntervalTree`](crate::IntervalTree).

mod entries;
mod overlaps;
mod starting_at;

pub use entries::*;
pub use overlaps::*;
pub use starting_at::*;
