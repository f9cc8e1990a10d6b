//! Unit tests for training load and readiness.

use chrono::NaiveDate;
use rustpace::metrics::{AcwrStatus, DailyLoad, ReadinessStatus, WellnessCheckIn};
use rustpace::{ReadinessCalculator, TrainingLoadCalculator};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[test]
fn test_steady_load_converges_to_optimal() {
    let calc = TrainingLoadCalculator::new();
    let mut load = DailyLoad::default();
    for _ in 0..200 {
        load = calc.calculate_day(load, 350.0);
    }

    assert!((load.acute - 350.0).abs() < 1.0);
    assert!((load.chronic - 350.0).abs() < 1.0);
    assert_eq!(calc.acwr(load.acute, load.chronic).status, AcwrStatus::Optimal);
}

#[test]
fn test_load_spike_after_base() {
    let calc = TrainingLoadCalculator::new();
    let mut entries: Vec<(NaiveDate, f64)> = (1..=24).map(|d| (date(d), 250.0)).collect();
    entries.extend((25..=31).map(|d| (date(d), 700.0)));

    let history = calc.calculate_history(&entries).unwrap();
    let latest = history.last().unwrap().1;
    let acwr = calc.acwr(latest.acute, latest.chronic);
    assert_eq!(acwr.status, AcwrStatus::HighRisk);
    assert!(latest.balance < 0.0);

    let daily: Vec<f64> = history.iter().map(|(_, l)| l.load).collect();
    let rolling = calc.rolling_acwr(&daily).unwrap();
    assert!(rolling.ratio > 1.5);
}

#[test]
fn test_rest_week_is_undertrained() {
    let calc = TrainingLoadCalculator::new();
    let mut daily = vec![400.0; 21];
    daily.extend(vec![0.0; 7]);

    let acwr = calc.rolling_acwr(&daily).unwrap();
    assert_eq!(acwr.ratio, 0.0);
    assert_eq!(acwr.status, AcwrStatus::Undertrained);
}

#[test]
fn test_readiness_penalised_by_caution_load() {
    let calc = TrainingLoadCalculator::new();
    let check_in = WellnessCheckIn {
        sleep_hours: 7.0,
        sleep_quality: 4,
        soreness: 2,
        stress: 2,
        mood: 4,
        resting_hr: 52.0,
        baseline_resting_hr: 50.0,
        hrv_ms: Some(70.0),
        baseline_hrv_ms: Some(75.0),
    };

    let readiness = ReadinessCalculator::new();
    let fresh = readiness.score(&check_in, Some(calc.acwr(100.0, 100.0))).unwrap();
    let loaded = readiness.score(&check_in, Some(calc.acwr(140.0, 100.0))).unwrap();

    assert_eq!(fresh.load_penalty, 0.0);
    assert_eq!(loaded.load_penalty, 10.0);
    assert!((fresh.score - loaded.score - 10.0).abs() < 1e-9);
    assert_ne!(fresh.status, ReadinessStatus::Rest);
}
