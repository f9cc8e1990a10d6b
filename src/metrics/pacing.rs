//! Pacing strategy generation.
//!
//! Splits a goal time over a race distance. Uneven strategies use a linear
//! pace ramp centred on the distance-weighted mean split midpoint, so the
//! split times always add up to the goal time.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_range, EngineError, EngineResult};

/// Longest supported race distance (m).
pub const MAX_DISTANCE_M: f64 = 350_000.0;
/// Most splits a plan may contain.
pub const MAX_SPLITS: usize = 1000;
/// Largest start-to-finish pace difference accepted (percent).
pub const MAX_SPLIT_PERCENT: f64 = 20.0;

/// How pace should change over the race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PacingStrategy {
    /// Same pace throughout.
    Even,
    /// Start slower, finish faster by `percent`.
    NegativeSplit { percent: f64 },
    /// Start faster, finish slower by `percent`.
    PositiveSplit { percent: f64 },
}

impl PacingStrategy {
    /// Signed start-minus-finish pace difference as a fraction.
    fn ramp(&self) -> EngineResult<f64> {
        match *self {
            PacingStrategy::Even => Ok(0.0),
            PacingStrategy::NegativeSplit { percent } => {
                Ok(ensure_range("percent", percent, 0.0, MAX_SPLIT_PERCENT)? / 100.0)
            }
            PacingStrategy::PositiveSplit { percent } => {
                Ok(-ensure_range("percent", percent, 0.0, MAX_SPLIT_PERCENT)? / 100.0)
            }
        }
    }
}

/// One split of a pacing plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Split number, starting at 1
    pub index: usize,
    /// Distance at the start of the split (m)
    pub start_m: f64,
    /// Length of the split (m)
    pub distance_m: f64,
    /// Target pace (seconds per km)
    pub pace_sec_per_km: f64,
    /// Target time for this split (s)
    pub split_time_s: f64,
    /// Elapsed time at the end of this split (s)
    pub cumulative_time_s: f64,
}

/// A complete pacing plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingPlan {
    /// Race distance (m)
    pub distance_m: f64,
    /// Goal finish time (s)
    pub goal_time_s: f64,
    /// Strategy used
    pub strategy: PacingStrategy,
    /// Splits in race order
    pub splits: Vec<Split>,
}

impl PacingPlan {
    /// Projected finish time (s).
    pub fn total_time_s(&self) -> f64 {
        self.splits.last().map_or(0.0, |s| s.cumulative_time_s)
    }

    /// Scale every split by an environmental slowdown (percent).
    pub fn with_adjustment(&self, percent: f64) -> EngineResult<PacingPlan> {
        ensure_range("percent", percent, -10.0, 50.0)?;
        let factor = 1.0 + percent / 100.0;

        let mut cumulative = 0.0;
        let splits = self
            .splits
            .iter()
            .map(|s| {
                let split_time_s = s.split_time_s * factor;
                cumulative += split_time_s;
                Split {
                    pace_sec_per_km: s.pace_sec_per_km * factor,
                    split_time_s,
                    cumulative_time_s: cumulative,
                    ..s.clone()
                }
            })
            .collect();

        Ok(PacingPlan {
            goal_time_s: self.goal_time_s * factor,
            splits,
            ..self.clone()
        })
    }
}

/// Builds pacing plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacingPlanner;

impl PacingPlanner {
    /// Create a new planner.
    pub fn new() -> Self {
        Self
    }

    /// Plan splits of `split_m` metres over `distance_m` to finish in `goal_time_s`.
    ///
    /// The last split is shorter when the distance is not a whole number of splits.
    pub fn plan(
        &self,
        distance_m: f64,
        goal_time_s: f64,
        split_m: f64,
        strategy: PacingStrategy,
    ) -> EngineResult<PacingPlan> {
        ensure_range("distance_m", distance_m, 1.0, MAX_DISTANCE_M)?;
        ensure_range("goal_time_s", goal_time_s, 1.0, 7.0 * 86_400.0)?;
        ensure_range("split_m", split_m, 1.0, distance_m)?;
        let ramp = strategy.ramp()?;

        let count = (distance_m / split_m).ceil() as usize;
        if count > MAX_SPLITS {
            return Err(EngineError::InvalidInput(format!(
                "{count} splits requested, at most {MAX_SPLITS} allowed"
            )));
        }

        let segments: Vec<(f64, f64)> = (0..count)
            .map(|i| {
                let start = i as f64 * split_m;
                (start, split_m.min(distance_m - start))
            })
            .filter(|&(_, len)| len > 0.0)
            .collect();

        let midpoint = |&(start, len): &(f64, f64)| start + len / 2.0;
        let centre = segments.iter().map(|s| s.1 * midpoint(s)).sum::<f64>() / distance_m;
        let spread = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => midpoint(last) - midpoint(first),
            _ => 0.0,
        };
        let gradient = if spread > 0.0 { ramp / spread } else { 0.0 };
        let base_pace = goal_time_s / distance_m;

        let mut cumulative = 0.0;
        let splits = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                let pace = base_pace * (1.0 + gradient * (centre - midpoint(seg)));
                let split_time_s = pace * seg.1;
                cumulative += split_time_s;
                Split {
                    index: i + 1,
                    start_m: seg.0,
                    distance_m: seg.1,
                    pace_sec_per_km: pace * 1000.0,
                    split_time_s,
                    cumulative_time_s: cumulative,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(distance_m, goal_time_s, splits = splits.len(), ?strategy, "pacing plan");

        Ok(PacingPlan {
            distance_m,
            goal_time_s,
            strategy,
            splits,
        })
    }
}
