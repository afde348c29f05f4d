use model::{FixedGaps, RandomGaps, Range, Trajectory};
use rand::Rng;

use crate::{
    multiple,
    selector::{Gap, GapRange},
    AcceptedRanges, DistanceMethod, RejectReason,
};

/// Split fractions are drawn from this range when none is configured.
pub const SPLIT_FRACTION_RANGE: std::ops::RangeInclusive<f64> = 0.3..=0.7;

/// Large gaps first, then small gaps, all against one set of accepted ranges
/// so a small gap never lands on a large one.
pub fn place_fixed(
    large: &FixedGaps,
    small: &FixedGaps,
    cumulative: &[f64],
    ranges: &mut AcceptedRanges<usize>,
) -> usize {
    multiple::place_fixed(large, cumulative, ranges)
        + multiple::place_fixed(small, cumulative, ranges)
}

/// Index of the first point at or beyond `fraction` of the total length.
/// Points before it form the smaller part, the rest the larger part.
pub fn split_index(cumulative: &[f64], fraction: f64) -> usize {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let split_point = fraction * total;
    cumulative.partition_point(|distance| *distance < split_point)
}

pub(crate) struct RealisticOutcome {
    pub trajectory: Trajectory,
    pub gaps: Vec<Gap>,
    pub rejected: Vec<RejectReason>,
    pub split_fraction: f64,
}

/// Splits the trajectory at a fraction of its length, cuts `large` gaps into
/// the part after the split and `small` gaps into the part before it, and
/// joins the two parts again (smaller part first).
pub(crate) fn apply_random<R: Rng + ?Sized>(
    trajectory: Trajectory,
    cumulative: &[f64],
    method: DistanceMethod,
    split_fraction: Option<f64>,
    large: &RandomGaps,
    small: &RandomGaps,
    rng: &mut R,
) -> RealisticOutcome {
    let split_fraction =
        split_fraction.unwrap_or_else(|| rng.gen_range(SPLIT_FRACTION_RANGE));
    let index = split_index(cumulative, split_fraction);
    let offset = cumulative.get(index).copied().unwrap_or(0.0);
    log::debug!(
        "split at {:.2} of the trajectory (point {} of {})",
        split_fraction,
        index,
        trajectory.len()
    );

    let (smaller_part, larger_part) = trajectory.split_at(index);

    let mut gaps = Vec::new();
    let mut rejected = Vec::new();
    let mut reduce = |part: Trajectory, config: &RandomGaps, offset: f64| {
        if part.is_empty() {
            return part;
        }
        let Trajectory { headers, points } = part;
        let part_cumulative = method.cumulative(&points);
        let mut ranges = AcceptedRanges::over(part_cumulative.clone());
        multiple::place_random(config, &part_cumulative, &mut *rng, &mut ranges);
        let kept = Trajectory::new(headers, ranges.apply(points));
        for range in ranges.ranges() {
            gaps.push(Gap {
                range: GapRange::Distance(Range::new(
                    range.start + offset,
                    range.end + offset,
                )),
                removed_points: ranges.points_in(range),
            });
        }
        rejected.extend_from_slice(ranges.rejected());
        kept
    };

    let smaller_part = reduce(smaller_part, small, 0.0);
    let larger_part = reduce(larger_part, large, offset);

    RealisticOutcome {
        trajectory: smaller_part.concat(larger_part),
        gaps,
        rejected,
        split_fraction,
    }
}
