//! Environmental adjustments: heat, altitude and wind.

pub mod altitude;
pub mod heat;
pub mod wind;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_range, EngineResult};

pub use altitude::{compute_altitude_adjustment, AltitudeModel, Intensity};
pub use heat::{compute_heat_stress_index, compute_pace_adjustment, HeatModel, HeatRisk, PaceAdjustment};
pub use wind::{compute_wind_resistance, WindImpact, WindModel};

/// Largest combined benefit the environment may give (percent).
const MAX_COMBINED_BENEFIT_PERCENT: f64 = -10.0;

/// Wind reading plus the direction the athlete will travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindInput {
    /// Wind speed (m/s)
    pub speed_mps: f64,
    /// Heading the wind blows towards (degrees)
    pub direction_deg: f64,
    /// Heading of the runner (degrees)
    pub runner_direction_deg: f64,
}

/// Conditions for a single session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// Air temperature (°C)
    pub temp_c: f64,
    /// Relative humidity (0-100)
    pub humidity_percent: f64,
    /// Dew point (°C)
    pub dew_point_c: f64,
    /// Altitude of the session (m)
    pub altitude_m: f64,
    /// Days spent at altitude before the session
    #[serde(default)]
    pub acclimatization_days: u32,
    /// Whether the athlete is heat acclimated
    #[serde(default)]
    pub heat_acclimated: bool,
    /// Optional wind reading
    #[serde(default)]
    pub wind: Option<WindInput>,
}

/// Combined environmental assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentAssessment {
    /// Heat stress index (WBGT approximation)
    pub heat_stress_index: f64,
    /// Heat pace adjustment
    pub heat: PaceAdjustment,
    /// Altitude slowdown (percent)
    pub altitude_percent: f64,
    /// Wind impact, when a wind reading was provided
    pub wind: Option<WindImpact>,
    /// Combined pace change (percent). Positive is slower.
    pub total_percent: f64,
}

impl EnvironmentAssessment {
    /// Apply the combined adjustment to a pace in seconds per km.
    pub fn adjusted_pace(&self, base_pace_sec_per_km: f64) -> f64 {
        base_pace_sec_per_km * (1.0 + self.total_percent / 100.0)
    }
}

/// Runs the heat, altitude and wind models together.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCalculator {
    heat: HeatModel,
    altitude: AltitudeModel,
    wind: WindModel,
}

impl EnvironmentCalculator {
    /// Create a calculator from engine configuration.
    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        Ok(Self {
            heat: HeatModel::new(config.heat.clone())?,
            altitude: AltitudeModel::new(config.altitude.clone())?,
            wind: WindModel::new(config.wind.clone())?,
        })
    }

    /// Assess conditions for a session run at `runner_speed_mps`.
    ///
    /// Individual effects compound multiplicatively.
    pub fn assess(
        &self,
        conditions: &EnvironmentalConditions,
        intensity: Intensity,
        runner_speed_mps: f64,
    ) -> EngineResult<EnvironmentAssessment> {
        ensure_range(
            "runner_speed_mps",
            runner_speed_mps,
            wind::MIN_RUNNER_SPEED_MPS,
            wind::MAX_RUNNER_SPEED_MPS,
        )?;

        let index = self.heat.heat_stress_index(
            conditions.temp_c,
            conditions.humidity_percent,
            conditions.dew_point_c,
        )?;
        let heat = self.heat.pace_adjustment(index, conditions.heat_acclimated)?;
        let altitude_percent = self.altitude.adjustment(
            conditions.altitude_m,
            conditions.acclimatization_days,
            intensity,
        )?;
        let wind = conditions
            .wind
            .map(|w| {
                self.wind.resistance(
                    w.speed_mps,
                    w.direction_deg,
                    w.runner_direction_deg,
                    runner_speed_mps,
                )
            })
            .transpose()?;

        let wind_percent = wind.map_or(0.0, |w| w.impact_percent);
        let total = ((1.0 + heat.slowdown_percent / 100.0)
            * (1.0 + altitude_percent / 100.0)
            * (1.0 + wind_percent / 100.0)
            - 1.0)
            * 100.0;
        let total_percent = total.max(MAX_COMBINED_BENEFIT_PERCENT);

        tracing::debug!(
            heat = heat.slowdown_percent,
            altitude = altitude_percent,
            wind = wind_percent,
            total_percent,
            "environment assessment"
        );

        Ok(EnvironmentAssessment {
            heat_stress_index: index,
            heat,
            altitude_percent,
            wind,
            total_percent,
        })
    }
}
