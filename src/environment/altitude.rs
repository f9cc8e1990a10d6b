//! Altitude pace adjustment.

use serde::{Deserialize, Serialize};

use crate::config::AltitudeSettings;
use crate::error::{ensure_range, EngineError, EngineResult};

/// Longest acclimatization period accepted (days).
pub const MAX_ACCLIMATIZATION_DAYS: u32 = 365;

/// Workout intensity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Very easy, recovery running
    Recovery,
    /// Aerobic endurance
    #[default]
    Endurance,
    /// Steady tempo
    Tempo,
    /// Lactate threshold work
    Threshold,
    /// VO2max intervals and faster
    Interval,
}

impl Intensity {
    /// How strongly altitude affects this intensity relative to tempo.
    pub fn altitude_multiplier(&self) -> f64 {
        match self {
            Intensity::Recovery => 0.5,
            Intensity::Endurance => 0.75,
            Intensity::Tempo => 1.0,
            Intensity::Threshold => 1.15,
            Intensity::Interval => 1.3,
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intensity::Recovery => write!(f, "Recovery"),
            Intensity::Endurance => write!(f, "Endurance"),
            Intensity::Tempo => write!(f, "Tempo"),
            Intensity::Threshold => write!(f, "Threshold"),
            Intensity::Interval => write!(f, "Interval"),
        }
    }
}

impl std::str::FromStr for Intensity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recovery" => Ok(Intensity::Recovery),
            "endurance" | "easy" => Ok(Intensity::Endurance),
            "tempo" => Ok(Intensity::Tempo),
            "threshold" => Ok(Intensity::Threshold),
            "interval" | "intervals" => Ok(Intensity::Interval),
            other => Err(EngineError::InvalidInput(format!("unknown intensity '{other}'"))),
        }
    }
}

/// Altitude model with configurable constants.
#[derive(Debug, Clone, Default)]
pub struct AltitudeModel {
    settings: AltitudeSettings,
}

impl AltitudeModel {
    /// Create a model from settings.
    pub fn new(settings: AltitudeSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Expected slowdown (percent) at `altitude_m` after `acclimatization_days`.
    ///
    /// The effect grows linearly above the baseline and decays exponentially
    /// with acclimatization towards a residual fraction that never goes away.
    pub fn adjustment(
        &self,
        altitude_m: f64,
        acclimatization_days: u32,
        intensity: Intensity,
    ) -> EngineResult<f64> {
        ensure_range("altitude_m", altitude_m, -500.0, 9000.0)?;
        if acclimatization_days > MAX_ACCLIMATIZATION_DAYS {
            return Err(EngineError::InvalidInput(format!(
                "acclimatization_days must be at most {MAX_ACCLIMATIZATION_DAYS}, got {acclimatization_days}"
            )));
        }

        let s = &self.settings;
        let above = altitude_m - s.baseline_m;
        if above <= 0.0 {
            return Ok(0.0);
        }

        let base = s.percent_per_km * above / 1000.0;
        let decay = (-(acclimatization_days as f64) / s.acclimatization_tau_days).exp();
        let factor = s.residual_fraction + (1.0 - s.residual_fraction) * decay;
        let percent = base * factor * intensity.altitude_multiplier();

        tracing::debug!(altitude_m, acclimatization_days, %intensity, percent, "altitude adjustment");
        Ok(percent)
    }
}

/// Compute the altitude adjustment with the default model.
pub fn compute_altitude_adjustment(
    altitude_m: f64,
    acclimatization_days: u32,
    intensity: Intensity,
) -> EngineResult<f64> {
    AltitudeModel::default().adjustment(altitude_m, acclimatization_days, intensity)
}
