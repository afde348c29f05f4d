use model::{FixedGaps, Range, RandomGaps};
use rand::Rng;

use crate::{halving::fit_threshold, single, AcceptedRanges, RejectReason};

/// Tries every start fraction in list order against the ranges accepted so
/// far. A gap overlapping an earlier one is dropped, not shifted.
pub fn place_fixed(
    gaps: &FixedGaps,
    cumulative: &[f64],
    ranges: &mut AcceptedRanges<usize>,
) -> usize {
    gaps.start_fractions
        .iter()
        .filter(|fraction| {
            single::place_fixed(gaps.target_length, **fraction, cumulative, ranges)
                .is_ok()
        })
        .count()
}

/// Splits the trajectory into `count` segments of equal length and cuts one
/// gap of random start and length into each of them. A gap never leaves its
/// segment, so neighbouring gaps may share a segment bound.
pub fn place_random<R: Rng + ?Sized>(
    gaps: &RandomGaps,
    cumulative: &[f64],
    rng: &mut R,
    ranges: &mut AcceptedRanges<f64>,
) -> usize {
    if gaps.count == 0 {
        return 0;
    }
    let total = cumulative.last().copied().unwrap_or(0.0);
    let segment_length = total / gaps.count as f64;

    let mut accepted = 0;
    for segment in 0..gaps.count {
        let segment_start = segment as f64 * segment_length;
        let segment_end = (segment + 1) as f64 * segment_length;

        let Some(threshold) = fit_threshold(gaps.min_length, segment_length) else {
            ranges.reject(RejectReason::ThresholdUnderflow);
            continue;
        };
        if segment_length <= 0.0 {
            ranges.reject(RejectReason::Empty);
            continue;
        }

        let latest_start = (segment_end - threshold).max(segment_start);
        let start = rng.gen_range(segment_start..=latest_start);
        let length = rng.gen_range(threshold..=(segment_end - start).max(threshold));
        if ranges
            .try_accept_confined(Range::new(start, start + length))
            .is_ok()
        {
            accepted += 1;
        }
    }
    accepted
}
