use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thermolog_core::domain::{ErrorKind, ExecutionMode, ImaginaryFrequencyFlag};
use thermolog_core::modules::compute_bonds;
use thermolog_core::pipelines::{collect_input_files, extract_record, process_file, run_batch};
use thermolog_core::writers::{ReportFormat, parse_xyz_frames, render_report};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixture_dir().join(name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name))
        .unwrap_or_else(|error| panic!("fixture {name} should be readable: {error}"))
}

#[test]
fn frequency_step_of_an_opt_freq_job_is_selected() {
    let record = extract_record("water_opt_freq.log", &read_fixture("water_opt_freq.log"))
        .expect("water fixture should extract");

    assert_eq!(
        record.header,
        "#P Geom=AllCheck Guess=TCheck SCRF=Check GenChk RB3LYP/6-31G(d) Freq"
    );
    assert_eq!((record.charge, record.multiplicity), (0, 1));
    assert_eq!(record.imaginary_frequency, ImaginaryFrequencyFlag::None);
    assert!((record.thermo.zero_point_correction - 0.021).abs() < 1e-9);
    assert!((record.thermo.total_electronic_energy + 76.408).abs() < 1e-6);
    assert!((record.thermo.thermal_free_energy + 76.404643).abs() < 1e-9);

    let atoms: Vec<_> = record.geometry.iter().collect();
    assert_eq!(atoms.len(), 3);
    assert_eq!(atoms[0].atomic_number, 8);
    assert_eq!(atoms[0].z, 0.119262);
    assert_eq!(atoms[2].position(), [0.0, -0.763239, -0.477047]);

    assert_eq!(record.excerpts.low_frequency_lines.len(), 2);
    assert!(
        record
            .excerpts
            .thermochemistry
            .ends_with("Sum of electronic and thermal Free Energies=          -76.404643")
    );
}

#[test]
fn wrapped_route_and_first_low_frequency_are_reported() {
    let record = extract_record("methane_ts.log", &read_fixture("methane_ts.log"))
        .expect("methane fixture should extract");

    assert_eq!(record.header, "#p b3lyp/6-31g(d) opt=(ts,calcfc,noeigen) freq");
    assert_eq!(
        record.imaginary_frequency,
        ImaginaryFrequencyFlag::Reported(-45.3012)
    );
    assert_eq!(record.geometry.len(), 5);

    let bonds = compute_bonds(&record.geometry);
    assert_eq!(bonds.len(), 4);
    assert!(bonds.iter().all(|bond| bond.first == 0));
}

#[test]
fn broken_logs_are_classified() {
    let crashed = process_file(&fixture("crashed_freq.log"));
    let failure = crashed.as_failure().expect("crashed job should fail");
    assert_eq!(failure.kind, ErrorKind::IncompleteJob);
    assert_eq!(failure.source_file, "crashed_freq.log");

    let single_point = process_file(&fixture("single_point.log"));
    assert_eq!(
        single_point.as_failure().map(|failure| failure.kind),
        Some(ErrorKind::NoFrequencyBlock)
    );

    let missing = process_file(&fixture("absent.log"));
    assert_eq!(
        missing.as_failure().map(|failure| failure.kind),
        Some(ErrorKind::Unreadable)
    );
}

#[test]
fn batch_ranks_successes_and_counts_each_failure_once() {
    let paths = collect_input_files(&fixture_dir(), "*.log").expect("fixtures should be listed");
    let names: Vec<_> = paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "crashed_freq.log",
            "methane_ts.log",
            "single_point.log",
            "water_opt_freq.log"
        ]
    );

    let batch = run_batch(&paths, ExecutionMode::Serial);
    assert_eq!(batch.len(), 4);
    assert_eq!(batch.error_count, 2);
    assert_eq!(batch.reference_index, Some(3));
    assert!(!batch.all_failed());

    let methane = batch.entries[1]
        .relative
        .expect("methane should carry relative energies");
    assert_eq!(methane.total_electronic, 94227.8);
    assert_eq!(methane.electronic_plus_zpe, 94290.3);
    assert_eq!(methane.enthalpy, 94290.4);
    assert_eq!(methane.free_energy, 94291.2);

    let water = batch.entries[3].relative.expect("reference has values");
    assert_eq!(water.total_electronic, 0.0);
    assert!(batch.entries[0].relative.is_none());
    assert!(batch.entries[2].relative.is_none());
}

#[test]
fn parallel_batches_match_serial_batches() {
    let paths = collect_input_files(&fixture_dir(), "*.log").expect("fixtures should be listed");

    let serial = run_batch(&paths, ExecutionMode::Serial);
    for workers in [0, 1, 3] {
        let parallel = run_batch(&paths, ExecutionMode::Parallel { workers });
        assert_eq!(parallel, serial, "workers={workers}");
    }
}

#[test]
fn crlf_logs_extract_like_unix_logs() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = temp.path().join("water_crlf.log");
    fs::write(&path, read_fixture("water_opt_freq.log").replace('\n', "\r\n"))
        .expect("crlf copy should be written");

    let outcome = process_file(&path);
    let record = outcome.as_success().expect("crlf log should extract");
    assert_eq!(record.geometry.len(), 3);
    assert!((record.thermo.total_electronic_energy + 76.408).abs() < 1e-6);
}

#[test]
fn xyz_report_round_trips_fixture_geometries() {
    let paths = collect_input_files(&fixture_dir(), "*.log").expect("fixtures should be listed");
    let batch = run_batch(&paths, ExecutionMode::Serial);

    let xyz = render_report(&batch, ReportFormat::Xyz)
        .expect("render should succeed")
        .expect("batch has successes");
    let frames = parse_xyz_frames(&xyz).expect("rendered xyz should parse");

    assert_eq!(frames.len(), 2);
    assert!(frames[0].comment.starts_with("methane_ts.log | E(HF)=-40.518510"));
    assert!(frames[0].comment.contains("Imag=-45.3012"));
    for (frame, record) in frames.iter().zip(batch.successes()) {
        assert_eq!(frame.atoms.len(), record.geometry.len());
        for (read, source) in frame.atoms.iter().zip(record.geometry.iter()) {
            assert_eq!(read.atomic_number, source.atomic_number);
            assert!((read.x - source.x).abs() < 5e-7);
            assert!((read.y - source.y).abs() < 5e-7);
            assert!((read.z - source.z).abs() < 5e-7);
        }
    }
}
