//! Conversion of vessel tracks to GeoJSON for map viewers.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use model::{TrackPoint, Trajectory};
use serde::Serialize;
use serde_json::Value;
use utility::text::parse_optional_f64;
use walkdir::WalkDir;

use crate::{data_model, read_table_file, table::is_csv, AisError, Summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Geometry,
    pub properties: Properties,
}

/// Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    LineString(Vec<[f64; 2]>),
    Point([f64; 2]),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    Track {
        #[serde(rename = "MMSI")]
        mmsi: Value,
    },
    Report {
        #[serde(rename = "MMSI")]
        mmsi: Value,
        timestamp: Value,
        draught: Option<f64>,
        cog: Option<f64>,
        navigation_status: Value,
    },
}

impl Feature {
    fn new(geometry: Geometry, properties: Properties) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

/// Integers stay numbers, empty cells become null, anything else is text.
fn scalar(text: Option<&str>) -> Value {
    match text.map(str::trim) {
        None | Some("") => Value::Null,
        Some(text) => match text.parse::<i64>() {
            Ok(number) => Value::from(number),
            Err(_) => Value::from(text),
        },
    }
}

fn text(value: Option<&str>) -> Value {
    match value.map(str::trim) {
        None | Some("") => Value::Null,
        Some(text) => Value::from(text),
    }
}

fn field(point: &TrackPoint, index: Option<usize>) -> Option<&str> {
    index.and_then(|i| point.field(i))
}

fn number(point: &TrackPoint, index: Option<usize>) -> Option<f64> {
    field(point, index).and_then(parse_optional_f64)
}

/// Builds one `LineString` over the whole track followed by a `Point` per
/// report. Rows without coordinates must already be dropped; `None` when
/// fewer than two points are left.
pub fn trajectory_to_geojson(trajectory: &Trajectory) -> Option<FeatureCollection> {
    if trajectory.len() < 2 {
        return None;
    }
    let column = |name: &str| trajectory.column_index(name);
    let (mmsi, timestamp, draught, cog, status) = (
        column(data_model::MMSI),
        column(data_model::TIMESTAMP),
        column(data_model::DRAUGHT),
        column(data_model::COG),
        column(data_model::NAVIGATIONAL_STATUS),
    );

    let line = trajectory
        .points
        .iter()
        .map(|point| [point.longitude, point.latitude])
        .collect();
    let mut features = Vec::with_capacity(trajectory.len() + 1);
    features.push(Feature::new(
        Geometry::LineString(line),
        Properties::Track {
            mmsi: scalar(trajectory.first().and_then(|point| field(point, mmsi))),
        },
    ));
    features.extend(trajectory.points.iter().map(|point| {
        Feature::new(
            Geometry::Point([point.longitude, point.latitude]),
            Properties::Report {
                mmsi: scalar(field(point, mmsi)),
                timestamp: text(field(point, timestamp)),
                draught: number(point, draught),
                cog: number(point, cog),
                navigation_status: text(field(point, status)),
            },
        )
    }));
    Some(FeatureCollection {
        kind: "FeatureCollection",
        features,
    })
}

/// Reads a CSV leniently, dropping rows without valid coordinates.
pub fn convert_file(input: &Path) -> Result<FeatureCollection, AisError> {
    let table = read_table_file(input)?;
    let points = table.valid_points()?;
    let trajectory = Trajectory::new(table.headers, points);
    trajectory_to_geojson(&trajectory).ok_or(AisError::InsufficientValidRows(trajectory.len()))
}

fn write_pretty(path: &Path, collection: &FeatureCollection) -> Result<(), AisError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(file.as_file_mut(), collection)?;
    file.as_file_mut().flush()?;
    file.persist(path)?;
    Ok(())
}

/// Converts every CSV below `input_dir`, mirroring the folder structure
/// under `output_dir`.
pub fn convert_directory(input_dir: &Path, output_dir: &Path) -> Result<Summary, AisError> {
    if !input_dir.is_dir() {
        return Err(AisError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input directory {} does not exist", input_dir.display()),
        )));
    }
    let mut summary = Summary::default();
    let mut files = WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_csv(entry.path()))
        .map(|entry| entry.into_path())
        .collect::<Vec<PathBuf>>();
    files.sort();

    for file in files {
        let relative = file.strip_prefix(input_dir).unwrap_or(file.as_path());
        let target = output_dir.join(relative).with_extension("geojson");
        match convert_file(&file).and_then(|collection| write_pretty(&target, &collection)) {
            Ok(()) => {
                log::debug!("{} -> {}", file.display(), target.display());
                summary.processed += 1;
            }
            Err(e @ (AisError::InsufficientValidRows(_) | AisError::MissingRequiredColumn(_))) => {
                log::warn!("{}: skipped, {}", file.display(), e);
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
