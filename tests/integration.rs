use serde::Deserialize;
use std::{env, fs, io::BufReader, path::PathBuf, process::Command};

#[derive(Deserialize)]
struct Agent {
    id: u64,
    propensity: i32,
    asset: f64,
    transaction_count: u64,
}

#[derive(Deserialize)]
struct Report {
    rounds: usize,
    total_tax: f64,
    agt_vec: Vec<Agent>,
}

fn run_bin(args: &[&str]) -> std::process::Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_commerce"));
    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command")
}

fn read_report(file: &PathBuf) -> Report {
    let file = fs::File::open(file).expect("failed to open report");
    rmp_serde::decode::from_read(BufReader::new(file)).expect("failed to decode report")
}

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let report_a = test_dir.join("report-a.msgpack");
    let report_b = test_dir.join("report-b.msgpack");

    for report in [&report_a, &report_b] {
        let report_str = report.to_str().expect("failed to convert path to string");
        let output = run_bin(&[
            "--population",
            "20",
            "--price",
            "10",
            "--tax-rate",
            "0.02",
            "--rounds",
            "30",
            "--seed",
            "7",
            "--report",
            report_str,
        ]);

        let stderr_str =
            std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");
        assert!(
            output.status.success(),
            "failed to run binary\nstderr:\n{stderr_str}\n"
        );
    }

    let a = read_report(&report_a);
    let b = read_report(&report_b);

    assert_eq!(a.rounds, 30);
    assert!((a.total_tax - 30.0 * 19.0 * 10.0 * 0.02).abs() < 1e-9);
    assert!(a.agt_vec.len() <= 20);
    for agt in &a.agt_vec {
        assert!(agt.asset > 0.0);
        assert!((-5..=5).contains(&agt.propensity));
        assert!(agt.transaction_count <= 60);
    }

    assert_eq!(a.total_tax, b.total_tax);
    assert_eq!(a.agt_vec.len(), b.agt_vec.len());
    for (x, y) in a.agt_vec.iter().zip(&b.agt_vec) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.asset, y.asset);
    }

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn invalid_tax_rate_fails() {
    let output = run_bin(&["--tax-rate", "1.5", "--rounds", "1"]);
    assert!(!output.status.success());

    let stderr_str = String::from_utf8_lossy(&output.stderr);
    assert!(stderr_str.contains("invalid tax rate"), "stderr:\n{stderr_str}");
}

#[test]
fn negative_rounds_are_rejected() {
    let output = run_bin(&["--rounds", "-3"]);
    assert!(!output.status.success());

    let stderr_str = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr_str.contains("--rounds") || stderr_str.contains("-3"),
        "stderr:\n{stderr_str}"
    );
}

#[test]
fn oversized_population_fails() {
    let output = run_bin(&["--population", "18446744073709551615", "--rounds", "1"]);
    assert!(!output.status.success());

    let stderr_str = String::from_utf8_lossy(&output.stderr);
    assert!(stderr_str.contains("invalid population"), "stderr:\n{stderr_str}");
}
