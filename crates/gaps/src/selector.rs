use model::{GapPolicy, MultipleGaps, Range, RealisticGaps, SingleGap, Trajectory};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::{multiple, realistic, single, AcceptedRanges, DistanceMethod, RejectReason};

/// Region that was cut out of a trajectory, in point indices of the input
/// or in meters from its first point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum GapRange {
    Index(Range<usize>),
    Distance(Range<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub range: GapRange,
    pub removed_points: usize,
}

#[derive(Debug, Clone)]
pub struct GapOutcome {
    pub trajectory: Trajectory,
    pub gaps: Vec<Gap>,
    pub rejected: Vec<RejectReason>,
    /// Only set by the randomized realistic policy.
    pub split_fraction: Option<f64>,
}

impl GapOutcome {
    fn unchanged(trajectory: Trajectory) -> Self {
        Self {
            trajectory,
            gaps: Vec::new(),
            rejected: Vec::new(),
            split_fraction: None,
        }
    }

    pub fn removed_points(&self) -> usize {
        self.gaps.iter().map(|gap| gap.removed_points).sum()
    }
}

/// Applies a [`GapPolicy`] to trajectories.
///
/// Fixed policies are deterministic. Random policies draw from `rng`, use
/// [`GapSelector::seeded`] for reproducible output.
pub struct GapSelector<R = StdRng> {
    method: DistanceMethod,
    rng: R,
}

impl GapSelector<StdRng> {
    pub fn new(method: DistanceMethod) -> Self {
        Self::with_rng(method, StdRng::from_entropy())
    }

    pub fn seeded(method: DistanceMethod, seed: u64) -> Self {
        Self::with_rng(method, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GapSelector<R> {
    pub fn with_rng(method: DistanceMethod, rng: R) -> Self {
        Self { method, rng }
    }

    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    pub fn apply(&mut self, trajectory: Trajectory, policy: &GapPolicy) -> GapOutcome {
        if trajectory.is_empty() {
            return GapOutcome::unchanged(trajectory);
        }
        let cumulative = self.method.cumulative(&trajectory.points);

        let outcome = match policy {
            GapPolicy::Single(SingleGap::Fixed {
                target_length,
                start_fraction,
            }) => {
                let mut ranges = AcceptedRanges::over_indices(trajectory.len());
                let _ = single::place_fixed(
                    *target_length,
                    *start_fraction,
                    &cumulative,
                    &mut ranges,
                );
                by_index(trajectory, ranges)
            }
            GapPolicy::Single(SingleGap::Random { min_length }) => {
                let mut ranges = AcceptedRanges::over(cumulative.clone());
                let _ =
                    single::place_random(*min_length, &cumulative, &mut self.rng, &mut ranges);
                by_distance(trajectory, ranges)
            }
            GapPolicy::Multiple(MultipleGaps::Fixed(gaps)) => {
                let mut ranges = AcceptedRanges::over_indices(trajectory.len());
                multiple::place_fixed(gaps, &cumulative, &mut ranges);
                by_index(trajectory, ranges)
            }
            GapPolicy::Multiple(MultipleGaps::Random(gaps)) => {
                let mut ranges = AcceptedRanges::over(cumulative.clone());
                multiple::place_random(gaps, &cumulative, &mut self.rng, &mut ranges);
                by_distance(trajectory, ranges)
            }
            GapPolicy::Realistic(RealisticGaps::Fixed { large, small }) => {
                let mut ranges = AcceptedRanges::over_indices(trajectory.len());
                realistic::place_fixed(large, small, &cumulative, &mut ranges);
                by_index(trajectory, ranges)
            }
            GapPolicy::Realistic(RealisticGaps::Random {
                split_fraction,
                large,
                small,
            }) => {
                let reduced = realistic::apply_random(
                    trajectory,
                    &cumulative,
                    self.method,
                    *split_fraction,
                    large,
                    small,
                    &mut self.rng,
                );
                GapOutcome {
                    trajectory: reduced.trajectory,
                    gaps: reduced.gaps,
                    rejected: reduced.rejected,
                    split_fraction: Some(reduced.split_fraction),
                }
            }
        };

        log::debug!(
            "{} gaps placed, {} rejected, {} of {} points removed",
            outcome.gaps.len(),
            outcome.rejected.len(),
            outcome.removed_points(),
            cumulative.len()
        );
        outcome
    }
}

fn by_index(trajectory: Trajectory, ranges: AcceptedRanges<usize>) -> GapOutcome {
    finish(trajectory, ranges, GapRange::Index)
}

fn by_distance(trajectory: Trajectory, ranges: AcceptedRanges<f64>) -> GapOutcome {
    finish(trajectory, ranges, GapRange::Distance)
}

fn finish<T, F>(trajectory: Trajectory, ranges: AcceptedRanges<T>, wrap: F) -> GapOutcome
where
    T: Copy + PartialOrd + std::fmt::Display,
    F: Fn(Range<T>) -> GapRange,
{
    let Trajectory { headers, points } = trajectory;
    let points = ranges.apply(points);
    let gaps = ranges
        .ranges()
        .iter()
        .map(|range| Gap {
            range: wrap(*range),
            removed_points: ranges.points_in(range),
        })
        .collect();
    GapOutcome {
        trajectory: Trajectory::new(headers, points),
        gaps,
        rejected: ranges.rejected().to_vec(),
        split_fraction: None,
    }
}
