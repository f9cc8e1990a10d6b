//! Integration tests for the command-line binary.
//!
//! Each run points `--config` at a missing file so the defaults apply.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

fn rustpace(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rustpace"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(args)
        .env_remove("RUSTPACE_CONFIG")
        .output()
        .unwrap()
}

fn json(output: &Output) -> serde_json::Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr={stderr}");
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_loads(path: &Path, days: u32, load: impl Fn(u32) -> f64) {
    let entries: Vec<_> = (1..=days)
        .map(|d| serde_json::json!({ "date": format!("2024-03-{d:02}"), "load": load(d) }))
        .collect();
    std::fs::write(path, serde_json::to_string(&entries).unwrap()).unwrap();
}

#[test]
fn test_heat_reports_extreme_index() {
    let dir = tempdir().unwrap();
    let output = rustpace(&dir, &["heat", "--temp", "46", "--humidity", "81", "--dew-point", "42"]);
    let value = json(&output);
    assert_eq!(value["risk"], "Extreme");
    assert!(value["heat_stress_index"].as_f64().unwrap() > 60.0);
}

#[test]
fn test_invalid_input_exits_non_zero() {
    let dir = tempdir().unwrap();
    let output = rustpace(&dir, &["heat", "--temp", "35", "--humidity", "120", "--dew-point", "30"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("humidity_percent"));

    let output = rustpace(
        &dir,
        &["wind", "--speed", "5", "--direction", "0", "--runner-direction", "0", "--runner-speed", "0.1"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_acwr_uses_rolling_ratio_with_four_weeks() {
    let dir = tempdir().unwrap();
    let loads = dir.path().join("loads.json");
    write_loads(&loads, 28, |d| if d > 21 { 600.0 } else { 300.0 });

    let value = json(&rustpace(&dir, &["acwr", "--file", loads.to_str().unwrap()]));
    assert_eq!(value["days"], 28);
    assert!((value["rolling"]["ratio"].as_f64().unwrap() - 1.6).abs() < 1e-9);
    assert_eq!(value["rolling"]["status"], "HighRisk");
    assert!(value["recommendation"].as_str().unwrap().contains("spike"));
}

#[test]
fn test_acwr_falls_back_to_ewma_on_short_history() {
    let dir = tempdir().unwrap();
    let loads = dir.path().join("loads.json");
    write_loads(&loads, 10, |_| 300.0);

    let value = json(&rustpace(&dir, &["acwr", "--file", loads.to_str().unwrap()]));
    assert!(value["rolling"].is_null());
    assert!(value["ewma"]["ratio"].as_f64().unwrap() > 0.0);
    assert!(value["recommendation"].is_string());
}

#[test]
fn test_readiness_penalised_by_load_spike() {
    let dir = tempdir().unwrap();
    let check_in = dir.path().join("check_in.json");
    std::fs::write(
        &check_in,
        r#"{"sleep_hours": 8.5, "sleep_quality": 5, "soreness": 1, "stress": 1, "mood": 5,
            "resting_hr": 48.0, "baseline_resting_hr": 50.0}"#,
    )
    .unwrap();
    let loads = dir.path().join("loads.json");
    write_loads(&loads, 28, |d| if d > 21 { 600.0 } else { 300.0 });

    let fresh = json(&rustpace(&dir, &["readiness", "--check-in", check_in.to_str().unwrap()]));
    assert_eq!(fresh["readiness"]["load_penalty"], 0.0);

    let spiked = json(&rustpace(
        &dir,
        &[
            "readiness",
            "--check-in",
            check_in.to_str().unwrap(),
            "--loads",
            loads.to_str().unwrap(),
        ],
    ));
    assert_eq!(spiked["readiness"]["load_penalty"], 20.0);
    assert!(
        spiked["readiness"]["score"].as_f64().unwrap() < fresh["readiness"]["score"].as_f64().unwrap()
    );
}

#[test]
fn test_load_history_too_long_is_rejected() {
    let dir = tempdir().unwrap();
    let loads = dir.path().join("loads.json");
    std::fs::write(
        &loads,
        r#"[{"date": "2000-01-01", "load": 0.0}, {"date": "2024-01-01", "load": 0.0}]"#,
    )
    .unwrap();

    let output = rustpace(&dir, &["acwr", "--file", loads.to_str().unwrap()]);
    assert!(!output.status.success());
}
