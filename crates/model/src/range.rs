use std::fmt;

use serde::{Deserialize, Serialize};

/// Half open interval `[start, end)` over point indices or cumulative
/// distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

impl<T: Copy + PartialOrd> Range<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// True for inverted ranges and for ranges with an unordered (NaN) bound.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        !(self.start < self.end)
    }

    pub fn contains(&self, value: T) -> bool {
        self.start <= value && value < self.end
    }

    /// Inclusive intersection test: ranges that merely share a bound count as
    /// overlapping.
    pub fn touches_or_overlaps(&self, other: &Range<T>) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
