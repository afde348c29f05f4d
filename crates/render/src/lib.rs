//! Scatter plots of vessel tracks.
//!
//! All plots of one batch share the same axes so that tracks before and after
//! cutting gaps can be compared side by side.

use std::{error, fmt, path::Path};

use ais::{csv_files, read_table_file, AisError};
use model::Trajectory;
use plotters::{drawing::DrawingAreaErrorKind, prelude::*};
use utility::geo::GeoBounds;

pub const PLOT_SIZE: (u32, u32) = (800, 600);

/// Meters shown around a track without extent.
const DEGENERATE_RADIUS_M: f64 = 1_000.0;

const POINT_COLOR: RGBColor = BLUE;
const START_COLOR: RGBColor = GREEN;
const END_COLOR: RGBColor = RED;

#[derive(Debug)]
pub enum RenderError {
    EmptyTrajectory,
    EmptyBounds,
    Draw(String),
    Ais(AisError),
}

impl error::Error for RenderError {}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::EmptyTrajectory => write!(f, "nothing to plot, trajectory is empty"),
            RenderError::EmptyBounds => write!(f, "plot bounds contain no points"),
            RenderError::Draw(e) => write!(f, "drawing failed: {}", e),
            RenderError::Ais(e) => write!(f, "{}", e),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

impl From<AisError> for RenderError {
    fn from(e: AisError) -> Self {
        RenderError::Ais(e)
    }
}

/// `<stem>_trajectory.png`
pub fn plot_file_name(stem: &str) -> String {
    format!("{}_trajectory.png", stem)
}

pub fn bounds_of(trajectory: &Trajectory) -> GeoBounds {
    trajectory
        .points
        .iter()
        .map(|point| (point.latitude, point.longitude))
        .collect()
}

/// Bounds over every valid report of every CSV in `dir`. Unreadable files do
/// not contribute.
pub fn bounds_of_directory(dir: &Path) -> Result<GeoBounds, AisError> {
    let mut bounds = GeoBounds::empty();
    for file in csv_files(dir)? {
        match read_table_file(&file).and_then(|table| table.valid_points()) {
            Ok(points) => {
                bounds = bounds.merge(
                    points
                        .iter()
                        .map(|point| (point.latitude, point.longitude))
                        .collect(),
                );
            }
            Err(e) => log::debug!("{}: ignored for plot bounds, {}", file.display(), e),
        }
    }
    Ok(bounds)
}

/// Draws the track into a PNG at `path`, longitude on the x axis.
pub fn render_trajectory(
    trajectory: &Trajectory,
    bounds: &GeoBounds,
    path: &Path,
) -> Result<(), RenderError> {
    let (Some(first), Some(last)) = (trajectory.first(), trajectory.last()) else {
        return Err(RenderError::EmptyTrajectory);
    };
    if bounds.is_empty() {
        return Err(RenderError::EmptyBounds);
    }
    let bounds = bounds.padded(DEGENERATE_RADIUS_M);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(AisError::from)?;
    }

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root).margin(20).build_cartesian_2d(
        bounds.min_longitude..bounds.max_longitude,
        bounds.min_latitude..bounds.max_latitude,
    )?;

    chart.draw_series(
        trajectory
            .points
            .iter()
            .map(|point| Circle::new((point.longitude, point.latitude), 2, POINT_COLOR.filled())),
    )?;
    chart.draw_series(std::iter::once(Circle::new(
        (first.longitude, first.latitude),
        5,
        START_COLOR.filled(),
    )))?;
    chart.draw_series(std::iter::once(Circle::new(
        (last.longitude, last.latitude),
        5,
        END_COLOR.filled(),
    )))?;

    root.present()?;
    log::trace!("plotted {} points to {}", trajectory.len(), path.display());
    Ok(())
}
