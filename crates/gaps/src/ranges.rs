use std::fmt;

use model::Range;

/// Why a candidate gap was dropped. A rejected gap leaves the trajectory
/// untouched at that place, it is never moved or shrunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The candidate is empty or inverted.
    Empty,
    /// The candidate touches or overlaps an already accepted range.
    Overlap,
    /// Accepting the candidate would leave no point at all.
    RemovesEverything,
    /// The length threshold was halved below its floor without fitting.
    ThresholdUnderflow,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "empty range"),
            RejectReason::Overlap => write!(f, "overlaps an accepted gap"),
            RejectReason::RemovesEverything => write!(f, "would remove every point"),
            RejectReason::ThresholdUnderflow => {
                write!(f, "gap threshold does not fit the trajectory")
            }
        }
    }
}

/// Exclusion ranges accepted during one policy application.
///
/// `positions` holds the coordinate of every point in the same space as the
/// ranges: the point index for index ranges, the cumulative distance for
/// distance ranges. A point is excluded when its position lies inside any
/// accepted range.
#[derive(Debug, Clone)]
pub struct AcceptedRanges<T> {
    positions: Vec<T>,
    ranges: Vec<Range<T>>,
    rejected: Vec<RejectReason>,
}

impl AcceptedRanges<usize> {
    /// Bookkeeping over the indices of `len` points.
    pub fn over_indices(len: usize) -> Self {
        Self::over((0..len).collect())
    }
}

impl<T: Copy + PartialOrd + fmt::Display> AcceptedRanges<T> {
    pub fn over(positions: Vec<T>) -> Self {
        Self {
            positions,
            ranges: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn overlaps(&self, candidate: &Range<T>) -> bool {
        self.ranges
            .iter()
            .any(|existing| candidate.touches_or_overlaps(existing))
    }

    pub fn is_excluded(&self, position: T) -> bool {
        self.ranges.iter().any(|range| range.contains(position))
    }

    /// Accepts `candidate` unless it is empty, overlaps an accepted range or
    /// would exclude every remaining point. Rejections are recorded.
    pub fn try_accept(&mut self, candidate: Range<T>) -> Result<(), RejectReason> {
        self.admit(candidate, true)
    }

    /// Like [`try_accept`](Self::try_accept) for a candidate that is confined
    /// to its own segment and so cannot collide with another segment's gap,
    /// even where the two share a bound.
    pub fn try_accept_confined(&mut self, candidate: Range<T>) -> Result<(), RejectReason> {
        self.admit(candidate, false)
    }

    fn admit(&mut self, candidate: Range<T>, check_overlap: bool) -> Result<(), RejectReason> {
        let verdict = if candidate.is_empty() {
            Err(RejectReason::Empty)
        } else if check_overlap && self.overlaps(&candidate) {
            Err(RejectReason::Overlap)
        } else if self
            .positions
            .iter()
            .all(|position| self.is_excluded(*position) || candidate.contains(*position))
        {
            Err(RejectReason::RemovesEverything)
        } else {
            Ok(())
        };
        match verdict {
            Ok(()) => self.ranges.push(candidate),
            Err(reason) => {
                log::debug!("gap {} rejected: {}", candidate, reason);
                self.rejected.push(reason);
            }
        }
        verdict
    }

    pub fn accept(&mut self, candidate: Range<T>) -> bool {
        self.try_accept(candidate).is_ok()
    }

    /// Records a gap that was dropped before a candidate range existed.
    pub fn reject(&mut self, reason: RejectReason) {
        log::debug!("gap rejected: {}", reason);
        self.rejected.push(reason);
    }

    pub fn ranges(&self) -> &[Range<T>] {
        &self.ranges
    }

    pub fn rejected(&self) -> &[RejectReason] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of points inside `range`.
    pub fn points_in(&self, range: &Range<T>) -> usize {
        self.positions
            .iter()
            .filter(|position| range.contains(**position))
            .count()
    }

    /// Keeps the items whose position is not excluded, in their original order.
    /// `items` must be parallel to the positions.
    pub fn apply<P>(&self, items: Vec<P>) -> Vec<P> {
        debug_assert_eq!(items.len(), self.positions.len());
        items
            .into_iter()
            .zip(self.positions.iter())
            .filter(|(_, position)| !self.is_excluded(**position))
            .map(|(item, _)| item)
            .collect()
    }
}
