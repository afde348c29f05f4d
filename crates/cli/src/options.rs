use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gaps::DistanceMethod;
use model::{FixedGaps, GapPolicy, MultipleGaps, RandomGaps, RealisticGaps, SingleGap};
use rand::Rng;
use utility::geo::GeoBounds;

#[derive(Debug, Parser)]
#[command(name = "trackgaps")]
#[command(about = "Cut simulated reception gaps into AIS vessel tracks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Seed for every random draw, makes runs reproducible
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Distance formula used to measure tracks
    #[arg(long, value_enum, default_value_t = DistanceOpt::Geodesic, global = true)]
    pub distance: DistanceOpt,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistanceOpt {
    /// WGS-84 ellipsoid
    Geodesic,
    /// Spherical earth
    Haversine,
}

impl From<DistanceOpt> for DistanceMethod {
    fn from(opt: DistanceOpt) -> Self {
        match opt {
            DistanceOpt::Geodesic => DistanceMethod::Geodesic,
            DistanceOpt::Haversine => DistanceMethod::Haversine,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cut one gap into every track
    Single(SingleArgs),

    /// Cut several gaps into every track
    Multiple(MultipleArgs),

    /// Cut a mix of large and small gaps into every track
    Realistic(RealisticArgs),

    /// Write the single, multiple and realistic reference patterns, named by MMSI
    Patterns {
        /// Folder containing one CSV per vessel
        #[arg(long, env = "TRACKGAPS_INPUT_DIR")]
        input_dir: PathBuf,

        /// Folder receiving data_* and plots/ subfolders
        #[arg(long, env = "TRACKGAPS_OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Apply a gap policy read from a JSON file
    Policy {
        #[command(flatten)]
        dirs: BatchDirs,

        /// JSON file holding the policy
        #[arg(long)]
        policy: PathBuf,
    },

    /// Split AIS exports into one file per vessel, grouped by ship type
    Classify {
        /// Folder containing AIS exports
        #[arg(env = "TRACKGAPS_INPUT_DIR")]
        input_dir: PathBuf,

        /// Root of the <file>/<ship type>/ tree
        #[arg(env = "TRACKGAPS_OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Convert tracks to GeoJSON, mirroring the folder structure
    Geojson {
        #[arg(env = "TRACKGAPS_INPUT_DIR")]
        input_dir: PathBuf,

        #[arg(env = "TRACKGAPS_OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Copy the tracks passing through a region
    Select(SelectArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BatchDirs {
    /// Folder containing one CSV per vessel
    #[arg(long, env = "TRACKGAPS_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Folder receiving the reduced tracks
    #[arg(long, env = "TRACKGAPS_OUTPUT_DIR")]
    pub output_data_dir: PathBuf,

    /// Folder receiving one plot per reduced track
    #[arg(long)]
    pub output_plots_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SingleArgs {
    #[command(flatten)]
    pub dirs: BatchDirs,

    /// Minimum gap length in meters (default: random 50-200 km)
    #[arg(long)]
    pub min_gap_threshold: Option<f64>,

    /// Fixed gap length in meters, disables random placement
    #[arg(long)]
    pub target_length: Option<f64>,

    /// Position of a fixed gap as a fraction of the points
    #[arg(long, default_value_t = 0.5, requires = "target_length")]
    pub start_fraction: f64,
}

impl SingleArgs {
    pub fn policy<R: Rng + ?Sized>(&self, rng: &mut R) -> GapPolicy {
        match self.target_length {
            Some(target_length) => GapPolicy::Single(SingleGap::Fixed {
                target_length,
                start_fraction: self.start_fraction,
            }),
            None => GapPolicy::Single(SingleGap::Random {
                min_length: self
                    .min_gap_threshold
                    .unwrap_or_else(|| rng.gen_range(50_000.0..=200_000.0)),
            }),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct MultipleArgs {
    #[command(flatten)]
    pub dirs: BatchDirs,

    /// Number of gaps (default: random 2-50)
    #[arg(long)]
    pub num_gaps: Option<usize>,

    /// Minimum gap length in meters (default: shrinks from 200 km towards 10 km)
    #[arg(long)]
    pub min_gap_threshold: Option<f64>,

    /// Fixed gap length in meters, disables random placement
    #[arg(long)]
    pub gap_length: Option<f64>,

    /// Positions of fixed gaps as fractions of the points
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0.2,0.4,0.6,0.7,0.8",
        requires = "gap_length"
    )]
    pub start_fractions: Vec<f64>,
}

/// Maximum of the random gap count.
const MAX_GAPS: usize = 50;

/// Threshold for `k` gaps, 200 km for none and 10 km at the maximum count.
pub fn scaled_threshold(k: usize) -> f64 {
    200_000.0 - 190_000.0 * (k as f64 / MAX_GAPS as f64)
}

impl MultipleArgs {
    pub fn policy<R: Rng + ?Sized>(&self, rng: &mut R) -> GapPolicy {
        if let Some(gap_length) = self.gap_length {
            return GapPolicy::Multiple(MultipleGaps::Fixed(FixedGaps::new(
                gap_length,
                self.start_fractions.clone(),
            )));
        }
        let count = self
            .num_gaps
            .unwrap_or_else(|| rng.gen_range(2..=MAX_GAPS));
        let min_length = self
            .min_gap_threshold
            .unwrap_or_else(|| scaled_threshold(rng.gen_range(2..=MAX_GAPS)));
        GapPolicy::Multiple(MultipleGaps::Random(RandomGaps::new(count, min_length)))
    }
}

#[derive(Debug, Clone, Args)]
pub struct RealisticArgs {
    #[command(flatten)]
    pub dirs: BatchDirs,

    /// Number of large gaps (default: random 1-4)
    #[arg(long)]
    pub num_large_gaps: Option<usize>,

    /// Number of small gaps (default: random 10-20)
    #[arg(long)]
    pub num_small_gaps: Option<usize>,

    /// Minimum large gap length in meters (default: random 100-200 km)
    #[arg(long)]
    pub large_gap_threshold: Option<f64>,

    /// Minimum small gap length in meters (default: random 10-20 km)
    #[arg(long)]
    pub small_gap_threshold: Option<f64>,

    /// Share of the track distance before the split (default: random 0.3-0.7)
    #[arg(long)]
    pub split_fraction: Option<f64>,

    /// Use the reference pattern of three 50 km and fifty 5 km gaps
    #[arg(
        long,
        conflicts_with_all = [
            "num_large_gaps",
            "num_small_gaps",
            "large_gap_threshold",
            "small_gap_threshold",
            "split_fraction"
        ]
    )]
    pub fixed: bool,
}

impl RealisticArgs {
    pub fn policy<R: Rng + ?Sized>(&self, rng: &mut R) -> GapPolicy {
        if self.fixed {
            return GapPolicy::reference_realistic();
        }
        let large = RandomGaps::new(
            self.num_large_gaps.unwrap_or_else(|| rng.gen_range(1..=4)),
            self.large_gap_threshold
                .unwrap_or_else(|| rng.gen_range(100_000.0..=200_000.0)),
        );
        let small = RandomGaps::new(
            self.num_small_gaps.unwrap_or_else(|| rng.gen_range(10..=20)),
            self.small_gap_threshold
                .unwrap_or_else(|| rng.gen_range(10_000.0..=20_000.0)),
        );
        GapPolicy::Realistic(RealisticGaps::Random {
            split_fraction: self.split_fraction,
            large,
            small,
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct SelectArgs {
    #[arg(long, env = "TRACKGAPS_INPUT_DIR")]
    pub input_dir: PathBuf,

    #[arg(long, env = "TRACKGAPS_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    #[arg(long, default_value_t = ais::select::DEFAULT_REGION.min_latitude)]
    pub min_lat: f64,

    #[arg(long, default_value_t = ais::select::DEFAULT_REGION.max_latitude)]
    pub max_lat: f64,

    #[arg(long, default_value_t = ais::select::DEFAULT_REGION.min_longitude)]
    pub min_lon: f64,

    #[arg(long, default_value_t = ais::select::DEFAULT_REGION.max_longitude)]
    pub max_lon: f64,
}

impl SelectArgs {
    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::new(self.min_lat, self.max_lat, self.min_lon, self.max_lon)
    }
}
