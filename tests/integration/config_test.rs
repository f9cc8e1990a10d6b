//! Integration tests for configuration loading and its effect on the models.

use rustpace::config::{load_config_from, save_config, ConfigError, EngineConfig};
use rustpace::environment::{AltitudeModel, HeatModel, Intensity};
use rustpace::{EngineError, TrainingLoadCalculator};
use tempfile::tempdir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = EngineConfig::default();
    config.altitude.baseline_m = 1200.0;
    config.heat.high_threshold = 26.0;
    save_config(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "[training_load]\nacute_days = 50.0\nchronic_days = 42.0\n").unwrap();
    assert!(matches!(load_config_from(&path), Err(ConfigError::Invalid(_))));

    std::fs::write(&path, "this is not toml = = =").unwrap();
    assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_error_converts_to_engine_error() {
    let err: EngineError = ConfigError::Invalid("bad".to_string()).into();
    assert!(err.to_string().contains("bad"));
}

#[test]
fn test_custom_settings_change_results() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[heat]
breakpoints = [[15.0, 0.0], [25.0, 10.0]]
high_threshold = 22.0
extreme_threshold = 25.0

[altitude]
baseline_m = 1000.0

[training_load]
acute_days = 7.0
chronic_days = 28.0
"#,
    )
    .unwrap();
    let config = load_config_from(&path).unwrap();

    let heat = HeatModel::new(config.heat.clone()).unwrap();
    let adj = heat.pace_adjustment(20.0, false).unwrap();
    assert!((adj.slowdown_percent - 5.0).abs() < 1e-9);

    let altitude = AltitudeModel::new(config.altitude.clone()).unwrap();
    assert!(altitude.adjustment(1400.0, 0, Intensity::Tempo).unwrap() > 0.0);
    assert_eq!(AltitudeModel::default().adjustment(1400.0, 0, Intensity::Tempo).unwrap(), 0.0);

    let load = TrainingLoadCalculator::from_settings(config.training_load.clone()).unwrap();
    let day = load.calculate_day(Default::default(), 290.0);
    // k = 2/29
    assert!((day.chronic - 20.0).abs() < 1e-9);
}
