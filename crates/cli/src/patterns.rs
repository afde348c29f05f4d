//! The three reference gap patterns, written side by side and named by the
//! vessel's MMSI.

use std::path::{Path, PathBuf};

use ais::{csv_files, data_model};
use gaps::GapSelector;
use model::GapPolicy;
use rand::Rng;
use utility::text::path_component;

use crate::{
    batch::{self, BatchReport, FileReport},
    CliError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Single,
    Multiple,
    RealisticFrequency,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [
        Pattern::Single,
        Pattern::Multiple,
        Pattern::RealisticFrequency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Single => "single",
            Pattern::Multiple => "multiple",
            Pattern::RealisticFrequency => "realistic_frequency",
        }
    }

    pub fn policy(&self) -> GapPolicy {
        match self {
            Pattern::Single => GapPolicy::reference_single(),
            Pattern::Multiple => GapPolicy::reference_multiple(),
            Pattern::RealisticFrequency => GapPolicy::reference_realistic(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Pattern::Single => "single gap",
            Pattern::Multiple => "multiple gaps",
            Pattern::RealisticFrequency => "realistic_frequency",
        }
    }

    pub fn data_dir(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("data_{}", self.name()))
    }

    pub fn plots_dir(&self, output_dir: &Path) -> PathBuf {
        output_dir
            .join("plots")
            .join(format!("plots_{}", self.name()))
    }

    /// `AIS data of MMSI <mmsi> Class A_<label>.csv`
    pub fn data_file_name(&self, mmsi: &str) -> String {
        format!(
            "AIS data of MMSI {} Class A_{}.csv",
            path_component(mmsi),
            self.label()
        )
    }

    /// `Trajectory of MMSI_<mmsi>_<name>_gap.png`
    pub fn plot_file_name(&self, mmsi: &str) -> String {
        format!(
            "Trajectory of MMSI_{}_{}_gap.png",
            path_component(mmsi),
            self.name()
        )
    }
}

/// Writes every reference pattern for every CSV in `input_dir`, then plots
/// each pattern's outputs on shared bounds.
pub fn run<R: Rng>(
    selector: &mut GapSelector<R>,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<(Pattern, BatchReport)>, CliError> {
    batch::require_input_dir(input_dir)?;
    let mut reports = Vec::with_capacity(Pattern::ALL.len());
    for pattern in Pattern::ALL {
        batch::create_output_dir(&pattern.data_dir(output_dir))?;
        reports.push((pattern, pattern.policy(), BatchReport::default(), Vec::new()));
    }

    for input in csv_files(input_dir)? {
        let trajectory = match batch::read_input(&input) {
            Ok(trajectory) => trajectory,
            Err(file) => {
                for (_, _, report, _) in &mut reports {
                    report.push(file.clone());
                }
                continue;
            }
        };
        let Some(mmsi) = trajectory.first_value(data_model::MMSI).map(str::to_string) else {
            log::warn!("{}: skipped, no MMSI", input.display());
            for (_, _, report, _) in &mut reports {
                report.push(FileReport {
                    input: input.clone(),
                    skipped: Some("no MMSI".to_string()),
                    ..Default::default()
                });
            }
            continue;
        };
        for (pattern, policy, report, names) in &mut reports {
            let output = pattern.data_dir(output_dir).join(pattern.data_file_name(&mmsi));
            let file = batch::cut_and_write(selector, policy, trajectory.clone(), &input, &output);
            if file.output.is_some() {
                names.push(pattern.plot_file_name(&mmsi));
            }
            report.push(file);
        }
    }

    let mut finished = Vec::with_capacity(reports.len());
    for (pattern, _, report, names) in reports {
        let data_dir = pattern.data_dir(output_dir);
        let plots_dir = pattern.plots_dir(output_dir);
        let plotted = batch::plot_outputs(&data_dir, report.outputs().zip(names), &plots_dir)?;
        log::info!("{}: {} plots written to {}", pattern.name(), plotted, plots_dir.display());
        finished.push((pattern, report));
    }
    Ok(finished)
}
