//! Training load calculations (acute/chronic load and ACWR).
//!
//! Implements an exponentially weighted load model:
//! - Acute load: 7-day exponentially weighted moving average
//! - Chronic load: 42-day exponentially weighted moving average
//! - Balance: chronic - acute
//! - ACWR (Acute:Chronic Workload Ratio): acute / chronic
//!
//! Loads are session-RPE units (RPE × minutes) so the model works for any
//! sport the coach programs, not only power-metered ones.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::TrainingLoadSettings;
use crate::error::{ensure_range, EngineError, EngineResult};

/// Days of history needed before ACWR is meaningful.
pub const MIN_HISTORY_DAYS: usize = 28;
/// Longest load history accepted, first to last date inclusive.
pub const MAX_HISTORY_DAYS: i64 = 3650;

/// Daily training load values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    /// Total load for the day.
    pub load: f64,
    /// Acute load (short EWMA).
    pub acute: f64,
    /// Chronic load (long EWMA).
    pub chronic: f64,
    /// Balance (chronic - acute).
    pub balance: f64,
}

/// ACWR status thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcwrStatus {
    /// Below 0.8: detraining risk.
    Undertrained,
    /// 0.8 - 1.3: the "sweet spot".
    Optimal,
    /// 1.3 - 1.5: elevated.
    Caution,
    /// Above 1.5: load spike, high injury risk.
    HighRisk,
}

/// Acute:Chronic Workload Ratio result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Acwr {
    /// The ratio value.
    pub ratio: f64,
    /// Status classification.
    pub status: AcwrStatus,
}

/// Load history summary: latest EWMA values plus both ACWR variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcwrReport {
    /// Days covered, rest days included.
    pub days: usize,
    /// EWMA loads on the last day.
    pub latest: Option<DailyLoad>,
    /// ACWR from the EWMA loads.
    pub ewma: Option<Acwr>,
    /// Rolling 7/28-day ACWR, once there is enough history.
    pub rolling: Option<Acwr>,
    /// Recommendation for the current ratio.
    pub recommendation: Option<&'static str>,
}

impl AcwrReport {
    /// The ratio to act on: rolling when available, EWMA otherwise.
    pub fn current(&self) -> Option<Acwr> {
        self.rolling.or(self.ewma)
    }
}

/// Training load calculator.
#[derive(Debug, Clone)]
pub struct TrainingLoadCalculator {
    settings: TrainingLoadSettings,
}

impl TrainingLoadCalculator {
    /// Create with default constants (7/42 day).
    pub fn new() -> Self {
        Self {
            settings: TrainingLoadSettings::default(),
        }
    }

    /// Create with custom windows.
    pub fn with_constants(acute_days: f64, chronic_days: f64) -> EngineResult<Self> {
        Self::from_settings(TrainingLoadSettings {
            acute_days,
            chronic_days,
            ..Default::default()
        })
    }

    /// Create from configuration.
    pub fn from_settings(settings: TrainingLoadSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Session load from RPE (1-10) and duration in minutes.
    pub fn session_load(rpe: f64, duration_min: f64) -> EngineResult<f64> {
        ensure_range("rpe", rpe, 1.0, 10.0)?;
        ensure_range("duration_min", duration_min, 1.0, 1440.0)?;
        Ok(rpe * duration_min)
    }

    /// Calculate training load for a day given the previous day's values and today's load.
    pub fn calculate_day(&self, prev: DailyLoad, today_load: f64) -> DailyLoad {
        // EWMA: new = old × (1 - k) + value × k, k = 2 / (N + 1)
        let acute_k = 2.0 / (self.settings.acute_days + 1.0);
        let chronic_k = 2.0 / (self.settings.chronic_days + 1.0);

        let acute = prev.acute * (1.0 - acute_k) + today_load * acute_k;
        let chronic = prev.chronic * (1.0 - chronic_k) + today_load * chronic_k;

        DailyLoad {
            load: today_load,
            acute,
            chronic,
            balance: chronic - acute,
        }
    }

    /// Calculate full history from dated loads.
    ///
    /// Dates must be strictly ascending. Days with no entry count as rest days.
    pub fn calculate_history(
        &self,
        daily_loads: &[(NaiveDate, f64)],
    ) -> EngineResult<Vec<(NaiveDate, DailyLoad)>> {
        let Some(&(first, _)) = daily_loads.first() else {
            return Ok(Vec::new());
        };

        if daily_loads.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(EngineError::InvalidInput(
                "daily loads must be in strictly ascending date order".to_string(),
            ));
        }
        for (date, load) in daily_loads {
            if !load.is_finite() || *load < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "load on {date} must be a non-negative number"
                )));
            }
        }

        let last = daily_loads[daily_loads.len() - 1].0;
        let days = (last - first).num_days() + 1;
        if days > MAX_HISTORY_DAYS {
            return Err(EngineError::InvalidInput(format!(
                "load history spans {days} days, at most {MAX_HISTORY_DAYS} are supported"
            )));
        }
        let span = days as usize;
        let mut results = Vec::with_capacity(span);
        let mut prev = DailyLoad::default();
        let mut entries = daily_loads.iter().peekable();

        for offset in 0..span {
            let date = first + Duration::days(offset as i64);
            let load = match entries.next_if(|(d, _)| *d == date) {
                Some(&(_, l)) => l,
                None => 0.0,
            };
            prev = self.calculate_day(prev, load);
            results.push((date, prev));
        }

        tracing::debug!(entries = daily_loads.len(), days = span, "calculated load history");
        Ok(results)
    }

    /// Summarise a dated load history: EWMA loads, both ACWR variants and a
    /// recommendation.
    pub fn report(&self, daily_loads: &[(NaiveDate, f64)]) -> EngineResult<AcwrReport> {
        let history = self.calculate_history(daily_loads)?;
        let latest = history.last().map(|(_, load)| *load);
        let ewma = latest.map(|l| self.acwr(l.acute, l.chronic));

        let daily: Vec<f64> = history.iter().map(|(_, load)| load.load).collect();
        let rolling = if self.has_sufficient_history(daily.len()) {
            Some(self.rolling_acwr(&daily)?)
        } else {
            tracing::info!(days = daily.len(), "not enough history for rolling ACWR");
            None
        };

        Ok(AcwrReport {
            days: history.len(),
            latest,
            ewma,
            rolling,
            recommendation: rolling.or(ewma).map(|a| a.recommendation()),
        })
    }

    /// Calculate ACWR from current acute and chronic load.
    pub fn acwr(&self, acute: f64, chronic: f64) -> Acwr {
        let ratio = if chronic > 0.0 { acute / chronic } else { 0.0 };
        Acwr {
            ratio,
            status: self.classify(ratio),
        }
    }

    /// Coupled rolling-average ACWR from a daily load series, oldest first.
    ///
    /// Mean of the last 7 days over mean of the last 28 days.
    pub fn rolling_acwr(&self, daily_loads: &[f64]) -> EngineResult<Acwr> {
        if !self.has_sufficient_history(daily_loads.len()) {
            return Err(EngineError::InsufficientData(format!(
                "rolling ACWR needs {MIN_HISTORY_DAYS} days of load, got {}",
                daily_loads.len()
            )));
        }
        if daily_loads.iter().any(|l| !l.is_finite() || *l < 0.0) {
            return Err(EngineError::InvalidInput(
                "daily loads must be non-negative numbers".to_string(),
            ));
        }

        let n = daily_loads.len();
        let acute = daily_loads[n - 7..].iter().sum::<f64>() / 7.0;
        let chronic = daily_loads[n - MIN_HISTORY_DAYS..].iter().sum::<f64>() / MIN_HISTORY_DAYS as f64;
        Ok(self.acwr(acute, chronic))
    }

    /// Check if there is enough data for meaningful ACWR.
    pub fn has_sufficient_history(&self, days: usize) -> bool {
        days >= MIN_HISTORY_DAYS
    }

    fn classify(&self, ratio: f64) -> AcwrStatus {
        let s = &self.settings;
        if ratio < s.undertrained_below {
            AcwrStatus::Undertrained
        } else if ratio <= s.optimal_max {
            AcwrStatus::Optimal
        } else if ratio <= s.caution_max {
            AcwrStatus::Caution
        } else {
            AcwrStatus::HighRisk
        }
    }
}

impl Default for TrainingLoadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Acwr {
    /// Get recommendation text.
    pub fn recommendation(&self) -> &'static str {
        match self.status {
            AcwrStatus::Undertrained => {
                "Training load is low. Consider increasing training volume gradually."
            }
            AcwrStatus::Optimal => "Training load is in the optimal zone. Keep building steadily.",
            AcwrStatus::Caution => {
                "Training load is elevated. Monitor for signs of fatigue and consider recovery."
            }
            AcwrStatus::HighRisk => {
                "Training load spike detected. High injury risk. Reduce training intensity."
            }
        }
    }
}
