//! Daily readiness scoring from a wellness check-in.
//!
//! Combines sleep, subjective wellness, resting heart rate and HRV against
//! the athlete's own baselines into a single 0-100 score, optionally
//! penalised by a training load spike.

use serde::{Deserialize, Serialize};

use super::training_load::{Acwr, AcwrStatus};
use crate::error::{ensure_range, EngineResult};

const SLEEP_WEIGHT: f64 = 0.25;
const WELLNESS_WEIGHT: f64 = 0.35;
const HEART_RATE_WEIGHT: f64 = 0.20;
const HRV_WEIGHT: f64 = 0.20;

/// HRV sub-score used when no HRV reading is available.
const NEUTRAL_HRV_SCORE: f64 = 70.0;

/// Morning wellness check-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessCheckIn {
    /// Hours slept last night
    pub sleep_hours: f64,
    /// Sleep quality, 1 (poor) - 5 (excellent)
    pub sleep_quality: u8,
    /// Muscle soreness, 1 (none) - 5 (severe)
    pub soreness: u8,
    /// Life stress, 1 (none) - 5 (very high)
    pub stress: u8,
    /// Mood, 1 (low) - 5 (great)
    pub mood: u8,
    /// Morning resting heart rate (bpm)
    pub resting_hr: f64,
    /// Athlete's normal resting heart rate (bpm)
    pub baseline_resting_hr: f64,
    /// Morning HRV (rMSSD, ms)
    #[serde(default)]
    pub hrv_ms: Option<f64>,
    /// Athlete's normal HRV (rMSSD, ms)
    #[serde(default)]
    pub baseline_hrv_ms: Option<f64>,
}

/// Readiness classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessStatus {
    /// Score >= 75
    Ready,
    /// Score 55-74
    Moderate,
    /// Score 35-54
    Low,
    /// Score < 35
    Rest,
}

impl ReadinessStatus {
    /// Classify a 0-100 score.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            ReadinessStatus::Ready
        } else if score >= 55.0 {
            ReadinessStatus::Moderate
        } else if score >= 35.0 {
            ReadinessStatus::Low
        } else {
            ReadinessStatus::Rest
        }
    }

    /// Get recommendation text.
    pub fn recommendation(&self) -> &'static str {
        match self {
            ReadinessStatus::Ready => "Good to go. Train as planned, quality sessions are fine today.",
            ReadinessStatus::Moderate => {
                "Some fatigue. Train as planned but keep hard efforts controlled."
            }
            ReadinessStatus::Low => "Noticeable fatigue. Swap intensity for an easy aerobic session.",
            ReadinessStatus::Rest => "Recovery needed. Take a rest day or very light movement only.",
        }
    }
}

/// Readiness result with component breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    /// Overall score (0-100)
    pub score: f64,
    /// Status classification
    pub status: ReadinessStatus,
    /// Sleep sub-score (0-100)
    pub sleep: f64,
    /// Subjective wellness sub-score (0-100)
    pub wellness: f64,
    /// Resting heart rate sub-score (0-100)
    pub heart_rate: f64,
    /// HRV sub-score (0-100), neutral if unknown
    pub hrv: f64,
    /// Points deducted for load spikes
    pub load_penalty: f64,
}

/// Readiness calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadinessCalculator;

impl ReadinessCalculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self
    }

    /// Score a check-in, optionally accounting for the current ACWR.
    pub fn score(&self, check_in: &WellnessCheckIn, acwr: Option<Acwr>) -> EngineResult<ReadinessScore> {
        Self::validate(check_in)?;

        let sleep = Self::sleep_score(check_in.sleep_hours);
        let wellness = Self::wellness_score(check_in);
        let heart_rate = Self::heart_rate_score(check_in.resting_hr, check_in.baseline_resting_hr);
        let hrv = match (check_in.hrv_ms, check_in.baseline_hrv_ms) {
            (Some(hrv), Some(baseline)) => Self::hrv_score(hrv, baseline),
            _ => NEUTRAL_HRV_SCORE,
        };

        let load_penalty = match acwr.map(|a| a.status) {
            Some(AcwrStatus::Caution) => 10.0,
            Some(AcwrStatus::HighRisk) => 20.0,
            _ => 0.0,
        };

        let weighted = sleep * SLEEP_WEIGHT
            + wellness * WELLNESS_WEIGHT
            + heart_rate * HEART_RATE_WEIGHT
            + hrv * HRV_WEIGHT;
        let score = (weighted - load_penalty).clamp(0.0, 100.0);
        let status = ReadinessStatus::from_score(score);

        tracing::debug!(score, ?status, sleep, wellness, heart_rate, hrv, load_penalty, "readiness");

        Ok(ReadinessScore {
            score,
            status,
            sleep,
            wellness,
            heart_rate,
            hrv,
            load_penalty,
        })
    }

    fn validate(c: &WellnessCheckIn) -> EngineResult<()> {
        ensure_range("sleep_hours", c.sleep_hours, 0.0, 24.0)?;
        for (name, value) in [
            ("sleep_quality", c.sleep_quality),
            ("soreness", c.soreness),
            ("stress", c.stress),
            ("mood", c.mood),
        ] {
            ensure_range(name, value as f64, 1.0, 5.0)?;
        }
        ensure_range("resting_hr", c.resting_hr, 25.0, 220.0)?;
        ensure_range("baseline_resting_hr", c.baseline_resting_hr, 25.0, 220.0)?;
        if let Some(hrv) = c.hrv_ms {
            ensure_range("hrv_ms", hrv, 1.0, 300.0)?;
        }
        if let Some(baseline) = c.baseline_hrv_ms {
            ensure_range("baseline_hrv_ms", baseline, 1.0, 300.0)?;
        }
        Ok(())
    }

    /// 8+ hours scores 100, dropping 15 points per missing hour.
    fn sleep_score(hours: f64) -> f64 {
        (100.0 - (8.0 - hours).max(0.0) * 15.0).max(0.0)
    }

    /// Average of the four 1-5 scales, with soreness and stress inverted.
    fn wellness_score(c: &WellnessCheckIn) -> f64 {
        let positive = |v: u8| (v as f64 - 1.0) / 4.0 * 100.0;
        let negative = |v: u8| (5.0 - v as f64) / 4.0 * 100.0;
        (positive(c.sleep_quality) + negative(c.soreness) + negative(c.stress) + positive(c.mood)) / 4.0
    }

    /// At or below baseline scores 100, losing 10 points per bpm above it.
    fn heart_rate_score(resting: f64, baseline: f64) -> f64 {
        (100.0 - (resting - baseline).max(0.0) * 10.0).max(0.0)
    }

    /// At or above baseline scores 100, losing 4 points per percent below it.
    fn hrv_score(hrv: f64, baseline: f64) -> f64 {
        let deficit_pct = ((baseline - hrv) / baseline * 100.0).max(0.0);
        (100.0 - deficit_pct * 4.0).max(0.0)
    }
}
