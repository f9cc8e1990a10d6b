//! Lactate threshold estimation.
//!
//! Two methods:
//! - Incremental step test: LT1 at baseline + 1.0 mmol/L, LT2 at the
//!   4.0 mmol/L onset of blood lactate accumulation (OBLA), interpolated
//!   between stages.
//! - 30-minute time trial: LTHR is the average heart rate of the last
//!   20 minutes, threshold pace is the average pace.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_range, EngineError, EngineResult};

/// Blood lactate concentration marking LT2 (mmol/L).
pub const OBLA_MMOL: f64 = 4.0;
/// Rise above the baseline that marks LT1 (mmol/L).
pub const LT1_RISE_MMOL: f64 = 1.0;
/// Fewest stages a step test needs.
pub const MIN_STAGES: usize = 4;
/// Slowest stage speed accepted (m/s).
pub const MIN_STAGE_SPEED_MPS: f64 = 0.5;

/// LT1 heart rate as a fraction of LTHR for field tests.
const FIELD_LT1_HR_FRACTION: f64 = 0.89;
/// LT1 pace as a multiple of threshold pace for field tests.
const FIELD_LT1_PACE_FACTOR: f64 = 1.12;

/// One stage of an incremental step test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LactateSample {
    /// Running speed during the stage (m/s)
    pub speed_mps: f64,
    /// Heart rate at the end of the stage (bpm)
    pub heart_rate: f64,
    /// Blood lactate at the end of the stage (mmol/L)
    pub lactate_mmol: f64,
}

/// A threshold expressed as pace and heart rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPoint {
    /// Pace (seconds per km)
    pub pace_sec_per_km: f64,
    /// Heart rate (bpm)
    pub heart_rate: f64,
}

/// How the thresholds were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LactateMethod {
    /// Incremental lactate step test
    StepTest,
    /// 30-minute time trial field test
    TimeTrial,
}

/// Estimated aerobic (LT1) and anaerobic (LT2) thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LactateThresholds {
    /// First lactate threshold (aerobic)
    pub lt1: ThresholdPoint,
    /// Second lactate threshold (anaerobic, OBLA)
    pub lt2: ThresholdPoint,
    /// Method used
    pub method: LactateMethod,
    /// True when a threshold was not bracketed by the data and is a fallback
    pub estimated: bool,
}

/// Lactate threshold analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LactateAnalyzer;

impl LactateAnalyzer {
    /// Estimate thresholds from a step test, stages ordered by increasing speed.
    pub fn from_step_test(samples: &[LactateSample]) -> EngineResult<LactateThresholds> {
        if samples.len() < MIN_STAGES {
            return Err(EngineError::InsufficientData(format!(
                "step test needs at least {MIN_STAGES} stages, got {}",
                samples.len()
            )));
        }
        for s in samples {
            ensure_range("speed_mps", s.speed_mps, MIN_STAGE_SPEED_MPS, 12.0)?;
            ensure_range("heart_rate", s.heart_rate, 25.0, 230.0)?;
            ensure_range("lactate_mmol", s.lactate_mmol, 0.0, 30.0)?;
        }
        if samples.windows(2).any(|w| w[1].speed_mps <= w[0].speed_mps) {
            return Err(EngineError::InvalidInput(
                "step test stages must have strictly increasing speed".to_string(),
            ));
        }

        let baseline = samples
            .iter()
            .map(|s| s.lactate_mmol)
            .fold(f64::INFINITY, f64::min);
        let (first, top) = (samples[0], samples[samples.len() - 1]);

        let (mut lt1_speed, mut lt1_hr, lt1_estimated) = match samples
            .iter()
            .find(|s| s.lactate_mmol >= baseline + LT1_RISE_MMOL)
        {
            Some(stage) => (stage.speed_mps, stage.heart_rate, false),
            None => {
                tracing::warn!(baseline, "lactate never rose {LT1_RISE_MMOL} mmol/L above baseline");
                (top.speed_mps, top.heart_rate, true)
            }
        };

        let (lt2_speed, lt2_hr, lt2_estimated) = match Self::interpolate_crossing(samples, OBLA_MMOL) {
            Some((speed, hr)) => (speed, hr, false),
            None if first.lactate_mmol >= OBLA_MMOL => {
                tracing::warn!(
                    first_lactate = first.lactate_mmol,
                    "first stage already above {OBLA_MMOL} mmol/L, using first stage"
                );
                (first.speed_mps, first.heart_rate, true)
            }
            None => {
                tracing::warn!(
                    max_lactate = top.lactate_mmol,
                    "lactate never crossed {OBLA_MMOL} mmol/L, using highest stage"
                );
                (top.speed_mps, top.heart_rate, true)
            }
        };

        // LT1 can never sit above LT2.
        let clamped = lt1_speed > lt2_speed;
        if clamped {
            lt1_speed = lt2_speed;
            lt1_hr = lt2_hr;
        }
        let estimated = lt1_estimated || lt2_estimated || clamped;

        let result = LactateThresholds {
            lt1: ThresholdPoint {
                pace_sec_per_km: speed_to_pace(lt1_speed),
                heart_rate: lt1_hr,
            },
            lt2: ThresholdPoint {
                pace_sec_per_km: speed_to_pace(lt2_speed),
                heart_rate: lt2_hr,
            },
            method: LactateMethod::StepTest,
            estimated,
        };
        tracing::debug!(?result, "step test thresholds");
        Ok(result)
    }

    /// Estimate thresholds from a 30-minute time trial.
    pub fn from_time_trial(
        avg_hr_last_20_min: f64,
        avg_pace_sec_per_km: f64,
    ) -> EngineResult<LactateThresholds> {
        ensure_range("avg_hr_last_20_min", avg_hr_last_20_min, 80.0, 230.0)?;
        ensure_range("avg_pace_sec_per_km", avg_pace_sec_per_km, 120.0, 900.0)?;

        Ok(LactateThresholds {
            lt1: ThresholdPoint {
                pace_sec_per_km: avg_pace_sec_per_km * FIELD_LT1_PACE_FACTOR,
                heart_rate: avg_hr_last_20_min * FIELD_LT1_HR_FRACTION,
            },
            lt2: ThresholdPoint {
                pace_sec_per_km: avg_pace_sec_per_km,
                heart_rate: avg_hr_last_20_min,
            },
            method: LactateMethod::TimeTrial,
            estimated: false,
        })
    }

    /// Speed and heart rate where lactate first rises through `target`
    /// between two stages.
    fn interpolate_crossing(samples: &[LactateSample], target: f64) -> Option<(f64, f64)> {
        samples.windows(2).find_map(|w| {
            let (a, b) = (w[0], w[1]);
            if a.lactate_mmol < target && b.lactate_mmol >= target {
                let t = (target - a.lactate_mmol) / (b.lactate_mmol - a.lactate_mmol);
                Some((
                    a.speed_mps + t * (b.speed_mps - a.speed_mps),
                    a.heart_rate + t * (b.heart_rate - a.heart_rate),
                ))
            } else {
                None
            }
        })
    }
}

fn speed_to_pace(speed_mps: f64) -> f64 {
    1000.0 / speed_mps
}
