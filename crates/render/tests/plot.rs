use std::fs;

use model::{TrackPoint, Trajectory};
use render::{bounds_of, bounds_of_directory, plot_file_name, render_trajectory, RenderError};
use tempfile::tempdir;
use utility::geo::GeoBounds;

fn track() -> Trajectory {
    Trajectory::from_points(
        (0..20)
            .map(|i| TrackPoint::new(57.0 + i as f64 * 0.01, 10.0 + i as f64 * 0.02))
            .collect(),
    )
}

#[test]
fn renders_png_inside_shared_bounds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plots").join(plot_file_name("track"));
    let trajectory = track();
    let bounds = bounds_of(&trajectory).merge(GeoBounds::new(56.5, 58.0, 9.0, 12.0));

    render_trajectory(&trajectory, &bounds, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    assert!(path.ends_with("plots/track_trajectory.png"));
}

#[test]
fn single_point_still_renders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.png");
    let trajectory = Trajectory::from_points(vec![TrackPoint::new(57.0, 10.0)]);
    render_trajectory(&trajectory, &bounds_of(&trajectory), &path).unwrap();
    assert!(path.is_file());
}

#[test]
fn empty_trajectory_is_an_error() {
    let dir = tempdir().unwrap();
    let result = render_trajectory(
        &Trajectory::default(),
        &GeoBounds::new(56.0, 58.0, 9.0, 12.0),
        &dir.path().join("empty.png"),
    );
    assert!(matches!(result, Err(RenderError::EmptyTrajectory)));
}

#[test]
fn directory_bounds_cover_all_files() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("a.csv"),
        "MMSI,Latitude,Longitude\n1,55.0,10.0\n1,55.5,10.5\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.csv"),
        "MMSI,Latitude,Longitude\n2,57.0,12.0\n2,,\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "Latitude,Longitude\n80.0,80.0\n").unwrap();

    let bounds = bounds_of_directory(dir.path()).unwrap();
    assert_eq!(bounds, GeoBounds::new(55.0, 57.0, 10.0, 12.0));
}
