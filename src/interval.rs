use std::ops::Range;

use crate::error::{Error, Result};

/// A non-empty, half-open interval `[start, end)`.
///
/// An [`Interval`] can only be constructed when `start < end`; degenerate and
/// inverted intervals are rejected with [`Error::InvalidArgument`].
///
/// Two intervals overlap when they share at least one point. Intervals that
/// merely touch at an endpoint (such as `[0, 5)` and `[5, 10)`) do not
/// overlap.
///
/// Equality compares both bounds. An [`IntervalTree`] places intervals by
/// their start bound only, and uses the end bound for overlap tests and to
/// order entries sharing a start bound.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<R> {
    start: R,
    end: R,
}

impl<R> Interval<R>
where
    R: Ord,
{
    /// Construct a new `[start, end)` interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `start >= end`.
    ///
    /// ```
    /// use stabavl::{Error, Interval};
    ///
    /// assert!(Interval::new(1, 2).is_ok());
    /// assert_eq!(Interval::new(2, 2), Err(Error::InvalidArgument));
    /// assert_eq!(Interval::new(3, 2), Err(Error::InvalidArgument));
    /// ```
    pub fn new(start: R, end: R) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { start, end })
    }

    /// Returns true if `self` and `other` share at least one point.
    ///
    /// ```
    /// use stabavl::Interval;
    ///
    /// let a = Interval::new(0, 5).unwrap();
    /// assert!(a.overlaps(&Interval::new(4, 10).unwrap()));
    /// assert!(!a.overlaps(&Interval::new(5, 10).unwrap()));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(&self.start, &self.end, &other.start, &other.end)
    }
}

impl<R> Interval<R> {
    /// Construct an interval without validating `start < end`.
    ///
    /// Used to rebuild views of entries already validated on insert.
    pub(crate) fn new_unchecked(start: R, end: R) -> Self {
        Self { start, end }
    }

    /// Replace the end bound, returning the old one.
    ///
    /// Callers must uphold `start < end`.
    pub(crate) fn replace_end(&mut self, end: R) -> R {
        std::mem::replace(&mut self.end, end)
    }

    /// The inclusive lower bound.
    pub fn start(&self) -> &R {
        &self.start
    }

    /// The exclusive upper bound.
    pub fn end(&self) -> &R {
        &self.end
    }

    /// Borrow the bounds of this interval.
    pub fn as_ref(&self) -> Interval<&R> {
        Interval {
            start: &self.start,
            end: &self.end,
        }
    }

    /// Split this interval into its `(start, end)` bounds.
    pub fn into_bounds(self) -> (R, R) {
        (self.start, self.end)
    }

    /// Convert this interval into the equivalent [`Range`].
    pub fn into_range(self) -> Range<R> {
        self.start..self.end
    }
}

impl<'a, R> Interval<&'a R> {
    /// The inclusive lower bound, borrowed for the lifetime of the view.
    pub fn start_ref(&self) -> &'a R {
        self.start
    }

    /// The exclusive upper bound, borrowed for the lifetime of the view.
    pub fn end_ref(&self) -> &'a R {
        self.end
    }
}

impl<R> Interval<&R>
where
    R: Clone,
{
    /// Clone the borrowed bounds into an owned [`Interval`].
    pub fn cloned(self) -> Interval<R> {
        Interval {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

impl<R> TryFrom<Range<R>> for Interval<R>
where
    R: Ord,
{
    type Error = Error;

    fn try_from(value: Range<R>) -> Result<Self> {
        Self::new(value.start, value.end)
    }
}

impl<R> From<Interval<R>> for Range<R> {
    fn from(value: Interval<R>) -> Self {
        value.into_range()
    }
}

/// Half-open overlap test of `[a_start, a_end)` against `[b_start, b_end)`.
pub(crate) fn overlaps<R>(a_start: &R, a_end: &R, b_start: &R, b_end: &R) -> bool
where
    R: Ord,
{
    a_start < b_end && a_end > b_start
}
