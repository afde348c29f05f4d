use model::Range;
use rand::Rng;

use crate::{halving::fit_threshold, AcceptedRanges, RejectReason};

/// Index of the point at `fraction` of a trajectory with `len` points.
pub fn start_index(fraction: f64, len: usize) -> usize {
    ((fraction * len as f64).floor() as usize).min(len)
}

/// Number of points, counted from `start`, consumed until the distance walked
/// from `start` reaches `target` meters. Capped at the remaining points.
pub fn points_spanning(cumulative: &[f64], start: usize, target: f64) -> usize {
    let Some(origin) = cumulative.get(start).copied() else {
        return 0;
    };
    (start + 1..cumulative.len())
        .find(|&index| cumulative[index] - origin >= target)
        .map(|index| index - start)
        .unwrap_or(cumulative.len() - start)
}

/// Index range of a `target_length` gap starting at `start_fraction` of the
/// points.
pub fn fixed_candidate(
    target_length: f64,
    start_fraction: f64,
    cumulative: &[f64],
) -> Range<usize> {
    let len = cumulative.len();
    let start = start_index(start_fraction, len);
    let count = points_spanning(cumulative, start, target_length);
    Range::new(start, (start + count).min(len))
}

pub fn place_fixed(
    target_length: f64,
    start_fraction: f64,
    cumulative: &[f64],
    ranges: &mut AcceptedRanges<usize>,
) -> Result<(), RejectReason> {
    ranges.try_accept(fixed_candidate(target_length, start_fraction, cumulative))
}

/// One gap of random position and length, at least `min_length` meters long.
///
/// The threshold is halved while the whole trajectory is shorter than it. The
/// start is drawn so that the rest of the trajectory can hold the threshold,
/// the length between the threshold and the rest of the trajectory.
pub fn place_random<R: Rng + ?Sized>(
    min_length: f64,
    cumulative: &[f64],
    rng: &mut R,
    ranges: &mut AcceptedRanges<f64>,
) -> Result<(), RejectReason> {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let Some(threshold) = fit_threshold(min_length, total) else {
        ranges.reject(RejectReason::ThresholdUnderflow);
        return Err(RejectReason::ThresholdUnderflow);
    };
    if total <= 0.0 {
        ranges.reject(RejectReason::Empty);
        return Err(RejectReason::Empty);
    }

    let latest_fraction = (1.0 - threshold / total).clamp(0.0, 1.0);
    let fraction = rng.gen_range(0.0..=latest_fraction);
    let remaining = (total * (1.0 - fraction)).max(threshold);
    let length = rng.gen_range(threshold..=remaining);
    let start = fraction * total;
    ranges.try_accept(Range::new(start, start + length))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn evenly_spaced(n: usize, step: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * step).collect()
    }

    #[test]
    fn spanning_stops_at_target() {
        let cumulative = evenly_spaced(10, 10_000.0);
        assert_eq!(points_spanning(&cumulative, 0, 25_000.0), 3);
        assert_eq!(points_spanning(&cumulative, 4, 25_000.0), 3);
        assert_eq!(points_spanning(&cumulative, 0, 30_000.0), 3);
    }

    #[test]
    fn spanning_is_capped_at_remaining_points() {
        let cumulative = evenly_spaced(10, 10_000.0);
        assert_eq!(points_spanning(&cumulative, 7, 100_000.0), 3);
        assert_eq!(points_spanning(&cumulative, 10, 1.0), 0);
    }

    #[test]
    fn fixed_candidate_from_fraction() {
        let cumulative = evenly_spaced(10, 10_000.0);
        assert_eq!(fixed_candidate(25_000.0, 0.0, &cumulative), Range::new(0, 3));
        assert_eq!(fixed_candidate(25_000.0, 0.55, &cumulative), Range::new(5, 8));
        assert_eq!(fixed_candidate(25_000.0, 0.9, &cumulative), Range::new(9, 10));
        assert!(fixed_candidate(25_000.0, 1.0, &cumulative).is_empty());
    }

    #[test]
    fn random_gap_respects_threshold() {
        let cumulative = evenly_spaced(101, 1_000.0);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ranges = AcceptedRanges::over(cumulative.clone());
            place_random(20_000.0, &cumulative, &mut rng, &mut ranges).unwrap();
            let gap = ranges.ranges()[0];
            assert!(gap.end - gap.start >= 20_000.0 - 1e-6);
            assert!(gap.start >= 0.0);
            assert!(gap.end <= 100_000.0 + 1e-6);
        }
    }

    #[test]
    fn random_gap_threshold_halves_on_short_trajectory() {
        // 9 km trajectory, 50 km threshold halves to 6.25 km
        let cumulative = evenly_spaced(10, 1_000.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut ranges = AcceptedRanges::over(cumulative.clone());
        place_random(50_000.0, &cumulative, &mut rng, &mut ranges).unwrap();
        let gap = ranges.ranges()[0];
        assert!(gap.end - gap.start >= 6_250.0 - 1e-6);
    }

    #[test]
    fn random_gap_on_stationary_vessel_is_rejected() {
        let cumulative = vec![0.0; 5];
        let mut rng = StdRng::seed_from_u64(1);
        let mut ranges = AcceptedRanges::over(cumulative.clone());
        assert_eq!(
            place_random(10_000.0, &cumulative, &mut rng, &mut ranges),
            Err(RejectReason::ThresholdUnderflow)
        );
        assert_eq!(ranges.rejected(), &[RejectReason::ThresholdUnderflow]);
    }
}
