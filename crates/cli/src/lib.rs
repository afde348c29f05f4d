//! The `trackgaps` command line.

use std::{error, fmt, fs, io, path::PathBuf};

use ais::{file_stem, AisError};
use gaps::{DistanceMethod, GapSelector};
use model::{GapPolicy, PolicyError};
use rand::{rngs::StdRng, SeedableRng};

pub mod batch;
pub mod options;
pub mod patterns;

pub use batch::{BatchReport, FileReport};
pub use options::{Cli, Commands, DistanceOpt};

/// Errors that end the whole run. Failures of single files are only logged.
#[derive(Debug)]
pub enum CliError {
    MissingInputDirectory(PathBuf),
    CreateOutputDirectory { path: PathBuf, source: io::Error },
    PolicyFile { path: PathBuf, source: io::Error },
    Policy(PolicyError),
    Ais(AisError),
}

impl error::Error for CliError {}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::MissingInputDirectory(path) => {
                write!(f, "input directory {} does not exist", path.display())
            }
            CliError::CreateOutputDirectory { path, source } => {
                write!(f, "cannot create {}: {}", path.display(), source)
            }
            CliError::PolicyFile { path, source } => {
                write!(f, "cannot read policy {}: {}", path.display(), source)
            }
            CliError::Policy(e) => write!(f, "invalid policy: {}", e),
            CliError::Ais(e) => write!(f, "{}", e),
        }
    }
}

impl From<PolicyError> for CliError {
    fn from(e: PolicyError) -> Self {
        CliError::Policy(e)
    }
}

impl From<AisError> for CliError {
    fn from(e: AisError) -> Self {
        CliError::Ais(e)
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_gaps(
    method: DistanceMethod,
    rng: StdRng,
    policy: GapPolicy,
    dirs: &options::BatchDirs,
) -> Result<BatchReport, CliError> {
    policy.validate()?;
    match serde_json::to_string(&policy) {
        Ok(json) => log::info!("policy: {}", json),
        Err(e) => log::debug!("policy not serializable: {}", e),
    }
    let mut selector = GapSelector::with_rng(method, rng);
    let report = batch::run_policy(
        &mut selector,
        &policy,
        &dirs.input_dir,
        &dirs.output_data_dir,
    )?;
    if let Some(plots_dir) = &dirs.output_plots_dir {
        let outputs = report.files.iter().filter_map(|file| {
            let output = file.output.as_deref()?;
            Some((output, render::plot_file_name(&file_stem(&file.input))))
        });
        let plotted = batch::plot_outputs(&dirs.output_data_dir, outputs, plots_dir)?;
        log::info!("{} plots written to {}", plotted, plots_dir.display());
    }
    Ok(report)
}

/// Runs one command to completion.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let method = DistanceMethod::from(cli.distance);
    let mut rng = rng(cli.seed);

    match cli.command {
        Commands::Single(args) => {
            let policy = args.policy(&mut rng);
            run_gaps(method, rng, policy, &args.dirs)?.log("single gap");
        }
        Commands::Multiple(args) => {
            let policy = args.policy(&mut rng);
            run_gaps(method, rng, policy, &args.dirs)?.log("multiple gaps");
        }
        Commands::Realistic(args) => {
            let policy = args.policy(&mut rng);
            run_gaps(method, rng, policy, &args.dirs)?.log("realistic gaps");
        }
        Commands::Policy { dirs, policy } => {
            let json = fs::read_to_string(&policy).map_err(|source| CliError::PolicyFile {
                path: policy.clone(),
                source,
            })?;
            let policy = GapPolicy::from_json(&json)?;
            run_gaps(method, rng, policy, &dirs)?.log("policy");
        }
        Commands::Patterns {
            input_dir,
            output_dir,
        } => {
            let mut selector = GapSelector::with_rng(method, rng);
            for (pattern, report) in patterns::run(&mut selector, &input_dir, &output_dir)? {
                report.log(pattern.name());
            }
        }
        Commands::Classify {
            input_dir,
            output_dir,
        } => {
            batch::require_input_dir(&input_dir)?;
            batch::create_output_dir(&output_dir)?;
            ais::classify::classify_directory(&input_dir, &output_dir)?.log("classify");
        }
        Commands::Geojson {
            input_dir,
            output_dir,
        } => {
            batch::require_input_dir(&input_dir)?;
            batch::create_output_dir(&output_dir)?;
            ais::geojson::convert_directory(&input_dir, &output_dir)?.log("geojson");
        }
        Commands::Select(args) => {
            batch::require_input_dir(&args.input_dir)?;
            batch::create_output_dir(&args.output_dir)?;
            ais::select::select_in_region(&args.input_dir, &args.output_dir, &args.bounds())?
                .log("select");
        }
    }
    Ok(())
}
