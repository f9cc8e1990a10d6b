//! Unit tests for pacing plans.

use rustpace::{PacingPlanner, PacingStrategy};

#[test]
fn test_half_marathon_negative_split_sums_to_goal() {
    let goal = 90.0 * 60.0;
    let plan = PacingPlanner::new()
        .plan(21_097.5, goal, 1000.0, PacingStrategy::NegativeSplit { percent: 2.0 })
        .unwrap();

    let summed: f64 = plan.splits.iter().map(|s| s.split_time_s).sum();
    assert!((summed - goal).abs() < 1e-6);
    assert!((plan.total_time_s() - goal).abs() < 1e-6);

    let paces: Vec<f64> = plan.splits.iter().map(|s| s.pace_sec_per_km).collect();
    assert!(paces.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_splits_cover_distance() {
    let plan = PacingPlanner::new()
        .plan(5000.0, 1500.0, 400.0, PacingStrategy::Even)
        .unwrap();

    let covered: f64 = plan.splits.iter().map(|s| s.distance_m).sum();
    assert!((covered - 5000.0).abs() < 1e-9);
    assert_eq!(plan.splits.len(), 13);
    assert!((plan.splits[12].start_m - 4800.0).abs() < 1e-9);
    assert!(plan.splits.iter().enumerate().all(|(i, s)| s.index == i + 1));
}

#[test]
fn test_cumulative_times_increase() {
    let plan = PacingPlanner::new()
        .plan(10_000.0, 2700.0, 1000.0, PacingStrategy::PositiveSplit { percent: 5.0 })
        .unwrap();
    assert!(plan
        .splits
        .windows(2)
        .all(|w| w[1].cumulative_time_s > w[0].cumulative_time_s));
}

#[test]
fn test_adjustment_rejects_out_of_range() {
    let plan = PacingPlanner::new()
        .plan(10_000.0, 2700.0, 1000.0, PacingStrategy::Even)
        .unwrap();
    assert!(plan.with_adjustment(80.0).is_err());
    assert!(plan.with_adjustment(f64::NAN).is_err());
}
