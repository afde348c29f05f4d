pub mod policy;
pub mod range;
pub mod track;

pub use policy::{
    FixedGaps, GapPolicy, MultipleGaps, PolicyError, RandomGaps, RealisticGaps,
    SingleGap,
};
pub use range::Range;
pub use track::{TrackPoint, Trajectory};
