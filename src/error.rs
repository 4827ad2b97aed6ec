use thiserror::Error;

/// Errors returned by fallible [`IntervalTree`] and [`Interval`] operations.
///
/// [`IntervalTree`]: crate::IntervalTree
/// [`Interval`]: crate::Interval
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The interval start bound is not strictly less than the end bound.
    #[error("invalid interval: start bound must be strictly less than end bound")]
    InvalidArgument,

    /// No entry with the requested `(start, end)` bounds exists in the tree.
    #[error("no entry matches the requested interval")]
    KeyNotFound,
}

/// A [`Result`](std::result::Result) alias defaulting to this crate's
/// [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
