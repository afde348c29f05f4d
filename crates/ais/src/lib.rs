//! Reading and writing AIS position reports (CSV exports of the Danish
//! Maritime Authority, one row per report) and the side tools working on
//! them.

use std::{error, fmt, io};

use serde::Serialize;

pub mod classify;
pub mod data_model;
pub mod geojson;
pub mod select;
pub mod table;

pub use table::{
    csv_files, file_stem, read_table, read_table_file, read_trajectory, read_trajectory_from,
    write_table, write_trajectory, CsvTable,
};

#[derive(Debug)]
pub enum AisError {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingRequiredColumn(String),
    MalformedCoordinate { row: usize },
    InsufficientValidRows(usize),
}

impl error::Error for AisError {}

impl fmt::Display for AisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AisError::Io(e) => write!(f, "I/O error: {}", e),
            AisError::Csv(e) => write!(f, "CSV error: {}", e),
            AisError::Json(e) => write!(f, "JSON error: {}", e),
            AisError::MissingRequiredColumn(column) => {
                write!(f, "missing required column '{}'", column)
            }
            AisError::MalformedCoordinate { row } => {
                write!(f, "malformed coordinate in data row {}", row)
            }
            AisError::InsufficientValidRows(rows) => {
                write!(f, "only {} rows with valid coordinates, need 2", rows)
            }
        }
    }
}

impl From<io::Error> for AisError {
    fn from(e: io::Error) -> Self {
        AisError::Io(e)
    }
}

impl From<csv::Error> for AisError {
    fn from(e: csv::Error) -> Self {
        AisError::Csv(e)
    }
}

impl From<serde_json::Error> for AisError {
    fn from(e: serde_json::Error) -> Self {
        AisError::Json(e)
    }
}

impl From<tempfile::PersistError> for AisError {
    fn from(e: tempfile::PersistError) -> Self {
        AisError::Io(e.error)
    }
}

/// Outcome counts of a directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn log(&self, what: &str) {
        log::info!(
            "{}: {} processed, {} skipped, {} failed",
            what,
            self.processed,
            self.skipped,
            self.failed
        );
    }
}
