//! Wind resistance.
//!
//! Directions are headings: where the air is moving to and where the runner
//! is moving to. Equal headings are a pure tailwind.

use serde::{Deserialize, Serialize};

use crate::config::WindSettings;
use crate::error::{ensure_range, EngineResult};

/// Slowest running speed the drag model accepts (m/s).
pub const MIN_RUNNER_SPEED_MPS: f64 = 0.5;
/// Fastest running speed the drag model accepts (m/s).
pub const MAX_RUNNER_SPEED_MPS: f64 = 12.0;

/// Wind impact on running effort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindImpact {
    /// Wind component against the runner (m/s). Negative is a tailwind.
    pub headwind_component_mps: f64,
    /// Air speed the runner moves through (m/s).
    pub relative_air_speed_mps: f64,
    /// Effort change as a percent of pace. Positive slows the runner.
    pub impact_percent: f64,
}

/// Wind model with configurable drag share.
#[derive(Debug, Clone, Default)]
pub struct WindModel {
    settings: WindSettings,
}

impl WindModel {
    /// Create a model from settings.
    pub fn new(settings: WindSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Project the wind onto the runner's direction and scale the drag change.
    pub fn resistance(
        &self,
        wind_speed_mps: f64,
        wind_direction_deg: f64,
        runner_direction_deg: f64,
        runner_speed_mps: f64,
    ) -> EngineResult<WindImpact> {
        ensure_range("wind_speed_mps", wind_speed_mps, 0.0, 40.0)?;
        ensure_range("wind_direction_deg", wind_direction_deg, 0.0, 360.0)?;
        ensure_range("runner_direction_deg", runner_direction_deg, 0.0, 360.0)?;
        ensure_range(
            "runner_speed_mps",
            runner_speed_mps,
            MIN_RUNNER_SPEED_MPS,
            MAX_RUNNER_SPEED_MPS,
        )?;

        let delta = (wind_direction_deg - runner_direction_deg).to_radians();
        let headwind = -wind_speed_mps * delta.cos();
        let air = runner_speed_mps + headwind;

        let still_air = runner_speed_mps * runner_speed_mps;
        let mut impact = self.settings.drag_share * (air * air.abs() - still_air) / still_air * 100.0;
        if impact < 0.0 {
            impact *= self.settings.tailwind_recovery;
        }

        tracing::debug!(
            wind_speed_mps,
            wind_direction_deg,
            runner_direction_deg,
            runner_speed_mps,
            headwind,
            impact,
            "wind resistance"
        );

        Ok(WindImpact {
            headwind_component_mps: headwind,
            relative_air_speed_mps: air,
            impact_percent: impact,
        })
    }
}

/// Compute wind resistance with the default model.
pub fn compute_wind_resistance(
    wind_speed_mps: f64,
    wind_direction_deg: f64,
    runner_direction_deg: f64,
    runner_speed_mps: f64,
) -> EngineResult<WindImpact> {
    WindModel::default().resistance(
        wind_speed_mps,
        wind_direction_deg,
        runner_direction_deg,
        runner_speed_mps,
    )
}
