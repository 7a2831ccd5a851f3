use qsim_core::{run_with_config, ResultBundle, SimulationConfig};
use qsim_metrics::export::json::ExportData;
use qsim_metrics::export::{export_csv, export_json};
use std::fs;

fn sample_run() -> ResultBundle {
    run_with_config(&SimulationConfig::mm1(0.5, 1.0, 400.0).with_seed(77)).unwrap()
}

#[test]
fn json_export_round_trips_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mm1.json");
    let results = sample_run();

    export_json(&results, &path, true).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'), "pretty output spans lines");
    let data: ExportData = serde_json::from_str(&text).unwrap();
    assert_eq!(data.results, results);
    assert_eq!(data.statistics.queue_wait.count, results.queue_waits.len() as u64);
    assert!((data.statistics.queue_wait.mean - results.mean_queue_wait()).abs() < 1e-9);
}

#[test]
fn compact_json_is_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compact.json");

    export_json(&ResultBundle::default(), &path, false).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));
    let data: ExportData = serde_json::from_str(&text).unwrap();
    assert!(data.results.is_empty());
    assert_eq!(data.statistics.system_time.mean, 0.0);
}

#[test]
fn csv_export_writes_both_series() {
    let dir = tempfile::tempdir().unwrap();
    let results = sample_run();

    export_csv(&results, dir.path().join("run.csv")).unwrap();

    let running = fs::read_to_string(dir.path().join("run_running_mean.csv")).unwrap();
    let mut lines = running.lines();
    assert_eq!(lines.next(), Some("departure,time,running_mean_wq"));
    assert_eq!(lines.count(), results.running_mean.len());

    let samples = fs::read_to_string(dir.path().join("run_samples.csv")).unwrap();
    assert!(samples.starts_with("service,queue_wait,service_time,system_time\n"));
    let rows: Vec<&str> = samples.lines().skip(1).collect();
    assert_eq!(rows.len(), results.service_times.len());
    let complete = rows.iter().filter(|row| !row.contains(",,")).count();
    assert_eq!(complete, results.queue_waits.len());

    let first: Vec<f64> = rows[0].split(',').map(|v| v.parse().unwrap()).collect();
    assert_eq!(first[0], 1.0);
    assert_eq!(first[1], results.queue_waits[0]);
    assert_eq!(first[2], results.service_times[0]);
    assert_eq!(first[3], results.system_times[0]);
}

#[test]
fn csv_export_of_empty_run_has_headers_only() {
    let dir = tempfile::tempdir().unwrap();

    export_csv(&ResultBundle::default(), dir.path().join("empty.csv")).unwrap();

    let running = fs::read_to_string(dir.path().join("empty_running_mean.csv")).unwrap();
    assert_eq!(running.lines().count(), 1);
    let samples = fs::read_to_string(dir.path().join("empty_samples.csv")).unwrap();
    assert_eq!(samples.lines().count(), 1);
}
