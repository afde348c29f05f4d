use std::{error, fmt};

use serde::{Deserialize, Serialize};

/// Gaps of one length placed at fixed fractions of the point count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedGaps {
    /// Length of every gap in meters.
    pub target_length: f64,
    /// Start positions as fractions (`0.0..=1.0`) of the number of points.
    pub start_fractions: Vec<f64>,
}

/// `count` gaps, one per equal-length segment of the trajectory, each at
/// least `min_length` meters long (unless the segment is shorter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomGaps {
    pub count: usize,
    pub min_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SingleGap {
    Fixed {
        target_length: f64,
        start_fraction: f64,
    },
    Random {
        min_length: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MultipleGaps {
    Fixed(FixedGaps),
    Random(RandomGaps),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RealisticGaps {
    /// Large and small gaps over the whole trajectory, sharing one set of
    /// accepted ranges.
    Fixed { large: FixedGaps, small: FixedGaps },

    /// Large gaps in the part after the split point, small gaps in the part
    /// before it. Without a `split_fraction` one is drawn from `0.3..=0.7`.
    Random {
        #[serde(default)]
        split_fraction: Option<f64>,
        large: RandomGaps,
        small: RandomGaps,
    },
}

/// How gaps are cut into a trajectory. Lengths are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapPolicy {
    Single(SingleGap),
    Multiple(MultipleGaps),
    Realistic(RealisticGaps),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    InvalidLength(f64),
    FractionOutOfRange(f64),
    Json(String),
}

impl error::Error for PolicyError {}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolicyError::InvalidLength(length) => {
                write!(f, "gap length must be finite and non-negative: {}", length)
            }
            PolicyError::FractionOutOfRange(fraction) => {
                write!(f, "fraction must be within [0, 1]: {}", fraction)
            }
            PolicyError::Json(why) => write!(f, "invalid policy: {}", why),
        }
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(e: serde_json::Error) -> Self {
        PolicyError::Json(e.to_string())
    }
}

fn check_length(length: f64) -> Result<(), PolicyError> {
    if length.is_finite() && length >= 0.0 {
        Ok(())
    } else {
        Err(PolicyError::InvalidLength(length))
    }
}

fn check_fraction(fraction: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(PolicyError::FractionOutOfRange(fraction))
    }
}

impl FixedGaps {
    pub fn new(target_length: f64, start_fractions: Vec<f64>) -> Self {
        Self {
            target_length,
            start_fractions,
        }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        check_length(self.target_length)?;
        self.start_fractions
            .iter()
            .try_for_each(|fraction| check_fraction(*fraction))
    }
}

impl RandomGaps {
    pub fn new(count: usize, min_length: f64) -> Self {
        Self { count, min_length }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        check_length(self.min_length)
    }
}

impl GapPolicy {
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: GapPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        match self {
            GapPolicy::Single(SingleGap::Fixed {
                target_length,
                start_fraction,
            }) => {
                check_length(*target_length)?;
                check_fraction(*start_fraction)
            }
            GapPolicy::Single(SingleGap::Random { min_length }) => {
                check_length(*min_length)
            }
            GapPolicy::Multiple(MultipleGaps::Fixed(gaps)) => gaps.validate(),
            GapPolicy::Multiple(MultipleGaps::Random(gaps)) => gaps.validate(),
            GapPolicy::Realistic(RealisticGaps::Fixed { large, small }) => {
                large.validate()?;
                small.validate()
            }
            GapPolicy::Realistic(RealisticGaps::Random {
                split_fraction,
                large,
                small,
            }) => {
                if let Some(fraction) = split_fraction {
                    check_fraction(*fraction)?;
                }
                large.validate()?;
                small.validate()
            }
        }
    }

    /// One 100 km gap starting at half of the points.
    pub fn reference_single() -> Self {
        GapPolicy::Single(SingleGap::Fixed {
            target_length: 100_000.0,
            start_fraction: 0.5,
        })
    }

    /// Five 60 km gaps.
    pub fn reference_multiple() -> Self {
        GapPolicy::Multiple(MultipleGaps::Fixed(FixedGaps::new(
            60_000.0,
            vec![0.2, 0.4, 0.6, 0.7, 0.8],
        )))
    }

    /// Three 50 km gaps in the last half and fifty 5 km gaps in the first half.
    pub fn reference_realistic() -> Self {
        let small_starts = (1..=50).map(|i| i as f64 / 100.0).collect();
        GapPolicy::Realistic(RealisticGaps::Fixed {
            large: FixedGaps::new(50_000.0, vec![0.6, 0.75, 0.9]),
            small: FixedGaps::new(5_000.0, small_starts),
        })
    }
}
