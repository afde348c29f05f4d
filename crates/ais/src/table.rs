use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use model::{TrackPoint, Trajectory};
use utility::{geo::is_valid_coordinate, text::parse_optional_f64};

use crate::{data_model, AisError};

/// A CSV file kept as text, header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, AisError> {
        self.column(name)
            .ok_or_else(|| AisError::MissingRequiredColumn(name.to_string()))
    }

    /// Indices of the latitude and longitude columns.
    pub fn coordinate_columns(&self) -> Result<(usize, usize), AisError> {
        Ok((
            self.require_column(data_model::LATITUDE)?,
            self.require_column(data_model::LONGITUDE)?,
        ))
    }

    /// Points of all rows with a valid position, in row order.
    pub fn valid_points(&self) -> Result<Vec<TrackPoint>, AisError> {
        let (lat, lon) = self.coordinate_columns()?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| point_of(row, lat, lon))
            .collect())
    }

    /// Strict conversion, any row without valid coordinates is an error.
    pub fn into_trajectory(self) -> Result<Trajectory, AisError> {
        let (lat, lon) = self.coordinate_columns()?;
        let points = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(row, record)| {
                let latitude = record.get(lat).and_then(|v| parse_optional_f64(v));
                let longitude = record.get(lon).and_then(|v| parse_optional_f64(v));
                match (latitude, longitude) {
                    (Some(latitude), Some(longitude))
                        if is_valid_coordinate(latitude, longitude) =>
                    {
                        Ok(TrackPoint::with_record(latitude, longitude, record))
                    }
                    _ => Err(AisError::MalformedCoordinate { row: row + 1 }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Trajectory::new(self.headers, points))
    }
}

fn point_of(row: &[String], lat: usize, lon: usize) -> Option<TrackPoint> {
    let latitude = parse_optional_f64(row.get(lat)?)?;
    let longitude = parse_optional_f64(row.get(lon)?)?;
    if !is_valid_coordinate(latitude, longitude) {
        return None;
    }
    Some(TrackPoint::with_record(latitude, longitude, row.to_vec()))
}

pub fn read_table<R: Read>(reader: R) -> Result<CsvTable, AisError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Ok(CsvTable { headers, rows })
}

pub fn read_table_file(path: &Path) -> Result<CsvTable, AisError> {
    read_table(fs::File::open(path)?)
}

pub fn read_trajectory_from<R: Read>(reader: R) -> Result<Trajectory, AisError> {
    read_table(reader)?.into_trajectory()
}

pub fn read_trajectory(path: &Path) -> Result<Trajectory, AisError> {
    read_table_file(path)?.into_trajectory()
}

/// Writes through a temporary file in the destination directory that is only
/// renamed into place once everything has been flushed.
pub fn write_table<'a, I>(path: &Path, headers: &[String], rows: I) -> Result<(), AisError>
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let mut file = tempfile::NamedTempFile::new_in(&parent)?;
    {
        let mut writer = csv::Writer::from_writer(file.as_file_mut());
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    file.as_file_mut().flush()?;
    file.persist(path)?;
    Ok(())
}

pub fn write_trajectory(path: &Path, trajectory: &Trajectory) -> Result<(), AisError> {
    write_table(
        path,
        &trajectory.headers,
        trajectory.points.iter().map(|point| &point.record),
    )
}

/// All `*.csv` files directly inside `dir`, sorted by name.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, AisError> {
    let mut files = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_csv(path))
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

pub(crate) fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// File name without extension, `unknown` if there is none.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}
