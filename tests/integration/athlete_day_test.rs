//! Integration tests for a coach's planning flow.
//!
//! Tests the end-to-end flow:
//! 1. Build load history and ACWR
//! 2. Score the morning check-in
//! 3. Estimate thresholds and zones from a step test
//! 4. Assess race-day conditions
//! 5. Adjust the pacing plan for the conditions

use chrono::NaiveDate;
use rustpace::environment::WindInput;
use rustpace::metrics::{HrZones, LactateSample, PaceZones, ReadinessStatus, WellnessCheckIn};
use rustpace::{
    EnvironmentCalculator, EnvironmentalConditions, Intensity, LactateAnalyzer, PacingPlanner,
    PacingStrategy, ReadinessCalculator, TrainingLoadCalculator,
};

/// Four weeks of training: hard/easy pattern with a rest day each week.
fn simulate_training_block() -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    (0..28)
        .filter(|d| d % 7 != 6)
        .map(|d| {
            let rpe = if d % 2 == 0 { 7.0 } else { 4.0 };
            let minutes = if d % 7 == 5 { 100.0 } else { 50.0 };
            let load = TrainingLoadCalculator::session_load(rpe, minutes).unwrap();
            (start + chrono::Duration::days(d), load)
        })
        .collect()
}

fn step_test() -> Vec<LactateSample> {
    [
        (3.2, 128.0, 1.1),
        (3.6, 139.0, 1.3),
        (4.0, 150.0, 1.9),
        (4.4, 161.0, 2.8),
        (4.8, 171.0, 4.6),
        (5.2, 180.0, 7.9),
    ]
    .into_iter()
    .map(|(speed_mps, heart_rate, lactate_mmol)| LactateSample {
        speed_mps,
        heart_rate,
        lactate_mmol,
    })
    .collect()
}

#[test]
fn test_full_planning_flow() {
    // 1. Load history
    let calc = TrainingLoadCalculator::new();
    let history = calc.calculate_history(&simulate_training_block()).unwrap();
    assert_eq!(history.len(), 27);
    let latest = history.last().unwrap().1;
    let acwr = calc.acwr(latest.acute, latest.chronic);
    assert!(acwr.ratio > 0.0);

    // 2. Readiness
    let check_in = WellnessCheckIn {
        sleep_hours: 7.5,
        sleep_quality: 4,
        soreness: 2,
        stress: 2,
        mood: 4,
        resting_hr: 49.0,
        baseline_resting_hr: 50.0,
        hrv_ms: Some(78.0),
        baseline_hrv_ms: Some(80.0),
    };
    let readiness = ReadinessCalculator::new().score(&check_in, Some(acwr)).unwrap();
    assert!(readiness.score > 0.0 && readiness.score <= 100.0);
    assert_ne!(readiness.status, ReadinessStatus::Rest);

    // 3. Thresholds and zones
    let thresholds = LactateAnalyzer::from_step_test(&step_test()).unwrap();
    assert!(!thresholds.estimated);
    assert!(thresholds.lt2.heart_rate > 161.0 && thresholds.lt2.heart_rate < 171.0);
    let hr_zones = HrZones::from_lthr(thresholds.lt2.heart_rate.round() as u16).unwrap();
    let pace_zones = PaceZones::from_threshold_pace(thresholds.lt2.pace_sec_per_km).unwrap();
    assert_eq!(hr_zones.zone_for(thresholds.lt2.heart_rate.round() as u16), 5);
    assert!(pace_zones.zone_for(thresholds.lt1.pace_sec_per_km) <= 3);

    // 4. Race-day conditions: warm, humid, moderate altitude, light headwind
    let conditions = EnvironmentalConditions {
        temp_c: 29.0,
        humidity_percent: 70.0,
        dew_point_c: 23.0,
        altitude_m: 1800.0,
        acclimatization_days: 3,
        heat_acclimated: false,
        wind: Some(WindInput {
            speed_mps: 3.0,
            direction_deg: 200.0,
            runner_direction_deg: 10.0,
        }),
    };
    let race_speed = 1000.0 / thresholds.lt2.pace_sec_per_km;
    let assessment = EnvironmentCalculator::default()
        .assess(&conditions, Intensity::Threshold, race_speed)
        .unwrap();
    assert!(assessment.heat.slowdown_percent > 0.0);
    assert!(assessment.altitude_percent > 0.0);
    assert!(assessment.wind.unwrap().impact_percent > 0.0);
    assert!(assessment.total_percent > assessment.heat.slowdown_percent);

    // 5. Pacing plan adjusted for conditions
    let goal = 10_000.0 * thresholds.lt2.pace_sec_per_km / 1000.0 * 1.02;
    let plan = PacingPlanner::new()
        .plan(10_000.0, goal, 1000.0, PacingStrategy::NegativeSplit { percent: 2.0 })
        .unwrap();
    let adjusted = plan.with_adjustment(assessment.total_percent).unwrap();
    let expected = goal * (1.0 + assessment.total_percent / 100.0);
    assert!((adjusted.total_time_s() - expected).abs() < 1e-6);
    assert!(adjusted.splits[0].pace_sec_per_km > plan.splits[0].pace_sec_per_km);
}

#[test]
fn test_invalid_reading_stops_the_flow() {
    let conditions = EnvironmentalConditions {
        temp_c: 25.0,
        humidity_percent: 60.0,
        dew_point_c: 27.0,
        altitude_m: 0.0,
        acclimatization_days: 0,
        heat_acclimated: true,
        wind: None,
    };
    let result = EnvironmentCalculator::default().assess(&conditions, Intensity::Tempo, 4.0);
    assert!(result.is_err());
}

#[test]
fn test_conditions_json_defaults() {
    let json = r#"{"temp_c": 20.0, "humidity_percent": 50.0, "dew_point_c": 9.0, "altitude_m": 0.0}"#;
    let conditions: EnvironmentalConditions = serde_json::from_str(json).unwrap();
    assert_eq!(conditions.acclimatization_days, 0);
    assert!(!conditions.heat_acclimated);
    assert!(conditions.wind.is_none());
}
