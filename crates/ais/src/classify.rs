//! Splits AIS exports into one file per vessel, grouped by ship type.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use utility::text::path_component;

use crate::{csv_files, data_model, file_stem, read_table_file, write_table, AisError, Summary};

struct Vessel<'a> {
    category: &'a str,
    rows: Vec<&'a Vec<String>>,
}

/// Output location of one vessel's rows.
pub fn vessel_path(output_root: &Path, stem: &str, category: &str, mmsi: &str) -> PathBuf {
    output_root
        .join(path_component(stem))
        .join(path_component(category))
        .join(format!("{}_MMSI_{}.csv", path_component(stem), path_component(mmsi)))
}

/// Writes the rows of every vessel in `input` to its own file below
/// `output_root` and returns the written paths in first-appearance order.
pub fn classify_file(input: &Path, output_root: &Path) -> Result<Vec<PathBuf>, AisError> {
    let table = read_table_file(input)?;
    let mmsi = table.require_column(data_model::MMSI)?;
    let ship_type = table.require_column(data_model::SHIP_TYPE)?;
    let stem = file_stem(input);

    let mut vessels: IndexMap<&str, Vessel> = IndexMap::new();
    for row in &table.rows {
        let id = row.get(mmsi).map(String::as_str).unwrap_or_default();
        let category = row.get(ship_type).map(String::as_str).unwrap_or_default();
        vessels
            .entry(id)
            .or_insert_with(|| Vessel {
                category,
                rows: Vec::new(),
            })
            .rows
            .push(row);
    }

    let mut written = Vec::with_capacity(vessels.len());
    for (id, vessel) in &vessels {
        let path = vessel_path(output_root, &stem, vessel.category, id);
        write_table(&path, &table.headers, vessel.rows.iter().copied())?;
        written.push(path);
    }
    log::debug!(
        "{}: {} vessels written below {}",
        input.display(),
        written.len(),
        output_root.display()
    );
    Ok(written)
}

pub fn classify_directory(input_dir: &Path, output_root: &Path) -> Result<Summary, AisError> {
    let mut summary = Summary::default();
    for file in csv_files(input_dir)? {
        match classify_file(&file, output_root) {
            Ok(_) => summary.processed += 1,
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
