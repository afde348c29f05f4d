use std::{
    fs,
    path::{Path, PathBuf},
};

use ais::{csv_files, file_stem, read_trajectory, write_trajectory, AisError};
use gaps::{Gap, GapSelector};
use model::{GapPolicy, Trajectory};
use rand::Rng;
use serde::Serialize;
use utility::geo::GeoBounds;

use crate::CliError;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub points_in: Option<usize>,
    pub points_out: Option<usize>,
    /// Track length in meters before cutting.
    pub length_in: Option<f64>,
    /// Track length in meters after cutting, measured across the gaps.
    pub length_out: Option<f64>,
    pub gaps: Vec<Gap>,
    pub rejected: usize,
    pub split_fraction: Option<f64>,
    pub skipped: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, report: FileReport) {
        if report.error.is_some() {
            self.failed += 1;
        } else if report.skipped.is_some() {
            self.skipped += 1;
        } else {
            self.processed += 1;
        }
        self.files.push(report);
    }

    /// Paths of all written outputs, in processing order.
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().filter_map(|file| file.output.as_deref())
    }

    pub fn log(&self, what: &str) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => log::debug!("{} report: {}", what, json),
            Err(e) => log::debug!("{} report not serializable: {}", what, e),
        }
        log::info!(
            "{}: {} processed, {} skipped, {} failed",
            what,
            self.processed,
            self.skipped,
            self.failed
        );
    }
}

pub fn require_input_dir(dir: &Path) -> Result<(), CliError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(CliError::MissingInputDirectory(dir.to_path_buf()))
    }
}

pub fn create_output_dir(dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::CreateOutputDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

/// File name suffix of a reduced track, by policy kind.
pub fn output_suffix(policy: &GapPolicy) -> &'static str {
    match policy {
        GapPolicy::Single(_) => "single_gap",
        GapPolicy::Multiple(_) => "multiple_gaps",
        GapPolicy::Realistic(_) => "gaps_combined",
    }
}

/// Reads the track at `input`. A missing column skips the file, any other
/// error fails it.
pub fn read_input(input: &Path) -> Result<Trajectory, FileReport> {
    let mut report = FileReport {
        input: input.to_path_buf(),
        ..Default::default()
    };
    match read_trajectory(input) {
        Ok(trajectory) => Ok(trajectory),
        Err(e @ AisError::MissingRequiredColumn(_)) => {
            log::warn!("{}: skipped, {}", input.display(), e);
            report.skipped = Some(e.to_string());
            Err(report)
        }
        Err(e) => {
            log::error!("{}: {}", input.display(), e);
            report.error = Some(e.to_string());
            Err(report)
        }
    }
}

/// Cuts the gaps of `policy` into `trajectory` and writes the result to
/// `output`. Errors are recorded in the report, never returned.
pub fn cut_and_write<R: Rng>(
    selector: &mut GapSelector<R>,
    policy: &GapPolicy,
    trajectory: Trajectory,
    input: &Path,
    output: &Path,
) -> FileReport {
    let method = selector.method();
    let mut report = FileReport {
        input: input.to_path_buf(),
        points_in: Some(trajectory.len()),
        length_in: Some(method.total_length(&trajectory.points)),
        ..Default::default()
    };
    let outcome = selector.apply(trajectory, policy);
    if let Err(e) = write_trajectory(output, &outcome.trajectory) {
        log::error!("{}: cannot write {}, {}", input.display(), output.display(), e);
        report.error = Some(e.to_string());
        return report;
    }
    log::debug!(
        "{}: {} gaps, {} points removed",
        input.display(),
        outcome.gaps.len(),
        outcome.removed_points()
    );
    report.points_out = Some(outcome.trajectory.len());
    report.length_out = Some(method.total_length(&outcome.trajectory.points));
    report.rejected = outcome.rejected.len();
    report.split_fraction = outcome.split_fraction;
    report.gaps = outcome.gaps;
    report.output = Some(output.to_path_buf());
    report
}

/// Applies `policy` to every CSV in `input_dir`, writing
/// `<stem>_<suffix>.csv` files to `output_dir`.
pub fn run_policy<R: Rng>(
    selector: &mut GapSelector<R>,
    policy: &GapPolicy,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport, CliError> {
    require_input_dir(input_dir)?;
    create_output_dir(output_dir)?;
    let suffix = output_suffix(policy);
    let mut report = BatchReport::default();
    for input in csv_files(input_dir)? {
        let output = output_dir.join(format!("{}_{}.csv", file_stem(&input), suffix));
        let file = match read_input(&input) {
            Ok(trajectory) => cut_and_write(selector, policy, trajectory, &input, &output),
            Err(file) => file,
        };
        report.push(file);
    }
    Ok(report)
}

/// Plots tracks of `data_dir` to the given file names in `plots_dir`, all on
/// the bounds of `data_dir`. Returns the number of plots written.
pub fn plot_outputs<'a, I>(data_dir: &Path, outputs: I, plots_dir: &Path) -> Result<usize, CliError>
where
    I: IntoIterator<Item = (&'a Path, String)>,
{
    create_output_dir(plots_dir)?;
    let bounds: GeoBounds = render::bounds_of_directory(data_dir)?;
    let mut plotted = 0;
    for (output, plot_name) in outputs {
        let target = plots_dir.join(plot_name);
        let result = read_trajectory(output)
            .map_err(render::RenderError::from)
            .and_then(|trajectory| render::render_trajectory(&trajectory, &bounds, &target));
        match result {
            Ok(()) => plotted += 1,
            Err(e) => log::warn!("{}: not plotted, {}", output.display(), e),
        }
    }
    Ok(plotted)
}
