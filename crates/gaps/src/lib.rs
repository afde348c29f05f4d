//! # Gaps
//!
//! Cuts contiguous runs of position reports out of a trajectory to simulate
//! reception gaps of an AIS receiver.
//!
//! Three policies are available (see [`model::GapPolicy`]):
//!
//! - **single**: one gap, at a fixed fraction of the points or at a random
//!   place of the trajectory.
//! - **multiple**: a list of fixed gaps, or one random gap per equal-length
//!   segment of the trajectory.
//! - **realistic**: a mix of large and small gaps.
//!
//! ```rust
//! use gaps::{DistanceMethod, GapSelector};
//! use model::{GapPolicy, TrackPoint, Trajectory};
//!
//! let points = (0..200)
//!     .map(|i| TrackPoint::new(57.0, 9.5 + i as f64 * 0.01))
//!     .collect();
//! let trajectory = Trajectory::from_points(points);
//!
//! let mut selector = GapSelector::seeded(DistanceMethod::Geodesic, 7);
//! let outcome = selector.apply(trajectory, &GapPolicy::reference_single());
//! assert!(outcome.trajectory.len() < 200);
//! ```

pub mod distance;
pub mod halving;
pub mod multiple;
pub mod ranges;
pub mod realistic;
pub mod selector;
pub mod single;

pub use distance::DistanceMethod;
pub use ranges::{AcceptedRanges, RejectReason};
pub use selector::{Gap, GapOutcome, GapRange, GapSelector};
