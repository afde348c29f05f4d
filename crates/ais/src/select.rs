//! Picks the vessel files that pass through a region of interest.

use std::{fs, path::Path};

use utility::geo::GeoBounds;

use crate::{csv_files, read_table_file, AisError, Summary};

/// Waters north of Djursland up to Skagen.
pub const DEFAULT_REGION: GeoBounds = GeoBounds {
    min_latitude: 56.5932447,
    max_latitude: 57.9407115,
    min_longitude: 9.4257695,
    max_longitude: 11.8354331,
};

/// Whether any report of the file lies strictly inside `bounds`.
pub fn passes_through(path: &Path, bounds: &GeoBounds) -> Result<bool, AisError> {
    let points = read_table_file(path)?.valid_points()?;
    Ok(points
        .iter()
        .any(|point| bounds.contains(point.latitude, point.longitude)))
}

/// Copies every CSV in `input_dir` with at least one report inside `bounds`
/// to `output_dir`, unchanged.
pub fn select_in_region(
    input_dir: &Path,
    output_dir: &Path,
    bounds: &GeoBounds,
) -> Result<Summary, AisError> {
    fs::create_dir_all(output_dir)?;
    let mut summary = Summary::default();
    for file in csv_files(input_dir)? {
        match passes_through(&file, bounds) {
            Ok(true) => {
                let Some(name) = file.file_name() else {
                    continue;
                };
                match fs::copy(&file, output_dir.join(name)) {
                    Ok(_) => summary.processed += 1,
                    Err(e) => {
                        log::error!("{}: {}", file.display(), e);
                        summary.failed += 1;
                    }
                }
            }
            Ok(false) => summary.skipped += 1,
            Err(AisError::MissingRequiredColumn(column)) => {
                log::warn!("{}: skipped, no '{}' column", file.display(), column);
                summary.skipped += 1;
            }
            Err(e) => {
                log::error!("{}: {}", file.display(), e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
