use std::{fs, path::Path};

use clap::Parser;
use cli::{batch::cut_and_write, options::scaled_threshold, run, Cli, CliError, Commands};
use gaps::{DistanceMethod, GapSelector};
use model::{GapPolicy, MultipleGaps, RealisticGaps, SingleGap, TrackPoint, Trajectory};
use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;

const HEADER: &str = "# Timestamp,MMSI,Latitude,Longitude,Ship type";

/// A vessel heading north from Skagerrak, about 1.1 km between reports.
fn write_track(path: &Path, mmsi: u32, points: usize) {
    let mut text = String::from(HEADER);
    for i in 0..points {
        text.push_str(&format!(
            "\n01/03/2024 00:{:02}:{:02},{},{:.5},10.50000,Cargo",
            i / 60,
            i % 60,
            mmsi,
            56.0 + i as f64 * 0.01
        ));
    }
    text.push('\n');
    fs::write(path, text).unwrap();
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("trackgaps").chain(args.iter().copied())).unwrap()
}

fn lines(path: &Path) -> usize {
    fs::read_to_string(path).unwrap().lines().count()
}

#[test]
fn fixed_single_gap_is_written_next_to_plot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_track(&input.join("vessel.csv"), 219000001, 200);
    let data = dir.path().join("data");
    let plots = dir.path().join("plots");

    run(parse(&[
        "single",
        "--input-dir",
        input.to_str().unwrap(),
        "--output-data-dir",
        data.to_str().unwrap(),
        "--output-plots-dir",
        plots.to_str().unwrap(),
        "--target-length",
        "50000",
        "--start-fraction",
        "0.25",
    ]))
    .unwrap();

    let output = data.join("vessel_single_gap.csv");
    assert!(lines(&output) < 201);
    assert!(lines(&output) > 100);
    assert!(plots.join("vessel_trajectory.png").is_file());
    assert!(!plots.join("vessel_single_gap_trajectory.png").exists());
}

#[test]
fn seeded_random_runs_are_reproducible() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_track(&input.join("vessel.csv"), 219000001, 300);

    let mut outputs = Vec::new();
    for run_dir in ["a", "b"] {
        let data = dir.path().join(run_dir);
        run(parse(&[
            "multiple",
            "--seed",
            "11",
            "--input-dir",
            input.to_str().unwrap(),
            "--output-data-dir",
            data.to_str().unwrap(),
            "--num-gaps",
            "4",
            "--min-gap-threshold",
            "5000",
        ]))
        .unwrap();
        outputs.push(fs::read(data.join("vessel_multiple_gaps.csv")).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert!(outputs[0].len() < fs::read(input.join("vessel.csv")).unwrap().len());
}

#[test]
fn files_without_coordinates_do_not_stop_the_batch() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_track(&input.join("good.csv"), 219000001, 100);
    fs::write(input.join("broken.csv"), "MMSI,Speed\n1,3.0\n").unwrap();
    let data = dir.path().join("data");

    run(parse(&[
        "realistic",
        "--seed",
        "3",
        "--input-dir",
        input.to_str().unwrap(),
        "--output-data-dir",
        data.to_str().unwrap(),
        "--fixed",
    ]))
    .unwrap();

    assert!(data.join("good_gaps_combined.csv").is_file());
    assert!(!data.join("broken_gaps_combined.csv").exists());
}

#[test]
fn missing_input_directory_fails_the_run() {
    let dir = tempdir().unwrap();
    let result = run(parse(&[
        "single",
        "--input-dir",
        dir.path().join("nowhere").to_str().unwrap(),
        "--output-data-dir",
        dir.path().join("data").to_str().unwrap(),
    ]));
    assert!(matches!(result, Err(CliError::MissingInputDirectory(_))));
}

#[test]
fn policy_file_drives_the_batch() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_track(&input.join("vessel.csv"), 219000001, 100);
    let policy = dir.path().join("policy.json");
    fs::write(
        &policy,
        r#"{"kind": "multiple", "mode": "fixed", "target_length": 5000.0, "start_fractions": [0.1, 0.5]}"#,
    )
    .unwrap();
    let data = dir.path().join("data");

    run(parse(&[
        "policy",
        "--input-dir",
        input.to_str().unwrap(),
        "--output-data-dir",
        data.to_str().unwrap(),
        "--policy",
        policy.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(lines(&data.join("vessel_multiple_gaps.csv")) < 101);
}

#[test]
fn unreadable_policy_is_reported() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("in")).unwrap();
    let result = run(parse(&[
        "policy",
        "--input-dir",
        dir.path().join("in").to_str().unwrap(),
        "--output-data-dir",
        dir.path().join("data").to_str().unwrap(),
        "--policy",
        dir.path().join("missing.json").to_str().unwrap(),
    ]));
    assert!(matches!(result, Err(CliError::PolicyFile { .. })));
}

#[test]
fn patterns_are_named_by_mmsi() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_track(&input.join("vessel.csv"), 219000001, 400);
    let out = dir.path().join("out");

    run(parse(&[
        "patterns",
        "--input-dir",
        input.to_str().unwrap(),
        "--output-dir",
        out.to_str().unwrap(),
    ]))
    .unwrap();

    for (data, plot) in [
        (
            "data_single/AIS data of MMSI 219000001 Class A_single gap.csv",
            "plots/plots_single/Trajectory of MMSI_219000001_single_gap.png",
        ),
        (
            "data_multiple/AIS data of MMSI 219000001 Class A_multiple gaps.csv",
            "plots/plots_multiple/Trajectory of MMSI_219000001_multiple_gap.png",
        ),
        (
            "data_realistic_frequency/AIS data of MMSI 219000001 Class A_realistic_frequency.csv",
            "plots/plots_realistic_frequency/Trajectory of MMSI_219000001_realistic_frequency_gap.png",
        ),
    ] {
        assert!(out.join(data).is_file(), "{}", data);
        assert!(out.join(plot).is_file(), "{}", plot);
    }
}

#[test]
fn defaults_are_drawn_within_documented_ranges() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let Commands::Single(single) =
            parse(&["single", "--input-dir", "in", "--output-data-dir", "out"]).command
        else {
            panic!("not a single command");
        };
        match single.policy(&mut rng) {
            GapPolicy::Single(SingleGap::Random { min_length }) => {
                assert!((50_000.0..=200_000.0).contains(&min_length))
            }
            other => panic!("unexpected policy {:?}", other),
        }

        let Commands::Multiple(multiple) =
            parse(&["multiple", "--input-dir", "in", "--output-data-dir", "out"]).command
        else {
            panic!("not a multiple command");
        };
        match multiple.policy(&mut rng) {
            GapPolicy::Multiple(MultipleGaps::Random(gaps)) => {
                assert!((2..=50).contains(&gaps.count));
                assert!((scaled_threshold(50)..=scaled_threshold(2)).contains(&gaps.min_length));
            }
            other => panic!("unexpected policy {:?}", other),
        }

        let Commands::Realistic(realistic) =
            parse(&["realistic", "--input-dir", "in", "--output-data-dir", "out"]).command
        else {
            panic!("not a realistic command");
        };
        match realistic.policy(&mut rng) {
            GapPolicy::Realistic(RealisticGaps::Random {
                split_fraction,
                large,
                small,
            }) => {
                assert_eq!(split_fraction, None);
                assert!((1..=4).contains(&large.count));
                assert!((10..=20).contains(&small.count));
                assert!((100_000.0..=200_000.0).contains(&large.min_length));
                assert!((10_000.0..=20_000.0).contains(&small.min_length));
            }
            other => panic!("unexpected policy {:?}", other),
        }
    }
}

#[test]
fn scaled_threshold_spans_200_to_10_km() {
    assert_eq!(scaled_threshold(0), 200_000.0);
    assert_eq!(scaled_threshold(50), 10_000.0);
}

#[test]
fn geojson_and_classify_commands_run() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_track(&input.join("day.csv"), 219000001, 10);

    let classified = dir.path().join("classified");
    run(parse(&[
        "classify",
        input.to_str().unwrap(),
        classified.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(classified
        .join("day")
        .join("Cargo")
        .join("day_MMSI_219000001.csv")
        .is_file());

    let geojson = dir.path().join("geojson");
    run(parse(&[
        "geojson",
        classified.to_str().unwrap(),
        geojson.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(geojson
        .join("day")
        .join("Cargo")
        .join("day_MMSI_219000001.geojson")
        .is_file());
}

#[test]
fn select_uses_the_given_region() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    // 56.00 to 56.09 N along 10.5 E
    write_track(&input.join("vessel.csv"), 219000001, 10);

    let outside = dir.path().join("outside");
    run(parse(&[
        "select",
        "--input-dir",
        input.to_str().unwrap(),
        "--output-dir",
        outside.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(!outside.join("vessel.csv").exists());

    let inside = dir.path().join("inside");
    run(parse(&[
        "select",
        "--input-dir",
        input.to_str().unwrap(),
        "--output-dir",
        inside.to_str().unwrap(),
        "--min-lat",
        "55.5",
        "--max-lat",
        "56.5",
    ]))
    .unwrap();
    assert!(inside.join("vessel.csv").is_file());
}

#[test]
fn file_report_measures_track_before_and_after() {
    let dir = tempdir().unwrap();
    // 40 reports about 1.1 km apart heading north
    let trajectory = Trajectory::new(
        vec!["Latitude".to_string(), "Longitude".to_string()],
        (0..40)
            .map(|i| {
                let latitude = 56.0 + i as f64 * 0.01;
                TrackPoint::with_record(
                    latitude,
                    10.5,
                    vec![format!("{:.2}", latitude), "10.5".to_string()],
                )
            })
            .collect(),
    );
    let mut selector = GapSelector::seeded(DistanceMethod::Haversine, 1);
    let report = cut_and_write(
        &mut selector,
        &GapPolicy::reference_single(),
        trajectory,
        Path::new("vessel.csv"),
        &dir.path().join("vessel_single_gap.csv"),
    );

    let length_in = report.length_in.unwrap();
    let length_out = report.length_out.unwrap();
    assert!((length_in - 39.0 * 1_112.0).abs() < 100.0, "{length_in}");
    assert!(length_out < length_in);
    assert!(report.points_out.unwrap() < 40);
}
