//! Heat stress index and heat pace adjustment.
//!
//! The index is the Australian Bureau of Meteorology WBGT approximation:
//! `WBGT = 0.567 × T + 0.393 × e + 3.94`, with water vapour pressure `e`
//! taken as the mean of the humidity-derived and dew-point-derived pressures.

use serde::{Deserialize, Serialize};

use crate::config::HeatSettings;
use crate::error::{ensure_range, EngineError, EngineResult};

/// Lowest heat stress index accepted by the pace lookup.
pub const MIN_HEAT_STRESS_INDEX: f64 = -30.0;
/// Highest heat stress index accepted by the pace lookup. Covers every index
/// the model can produce from in-range weather readings.
pub const MAX_HEAT_STRESS_INDEX: f64 = 120.0;

/// Heat risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatRisk {
    /// Below the first breakpoint: no measurable effect.
    Low,
    /// Measurable slowdown, no advisory.
    Moderate,
    /// At or above the high threshold.
    High,
    /// At or above the extreme threshold.
    Extreme,
}

/// Heat pace adjustment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceAdjustment {
    /// Expected slowdown as a percent of pace.
    pub slowdown_percent: f64,
    /// Heat stress index this adjustment was computed from.
    pub heat_stress_index: f64,
    /// Risk classification.
    pub risk: HeatRisk,
    /// Advisory text, only above the high threshold.
    pub guidance: Option<String>,
}

/// Saturation vapour pressure over water in hPa (Magnus formula).
fn saturation_vapour_pressure(temp_c: f64) -> f64 {
    6.105 * (17.27 * temp_c / (237.7 + temp_c)).exp()
}

/// Heat stress model with configurable breakpoints.
#[derive(Debug, Clone, Default)]
pub struct HeatModel {
    settings: HeatSettings,
}

impl HeatModel {
    /// Create a model from settings.
    pub fn new(settings: HeatSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Compute the WBGT approximation from air temperature, humidity and dew point.
    pub fn heat_stress_index(
        &self,
        temp_c: f64,
        humidity_percent: f64,
        dew_point_c: f64,
    ) -> EngineResult<f64> {
        ensure_range("temp_c", temp_c, -40.0, 60.0)?;
        ensure_range("humidity_percent", humidity_percent, 0.0, 100.0)?;
        ensure_range("dew_point_c", dew_point_c, -60.0, 60.0)?;
        if dew_point_c > temp_c {
            return Err(EngineError::InvalidInput(format!(
                "dew_point_c ({dew_point_c}) cannot exceed temp_c ({temp_c})"
            )));
        }

        let from_humidity = humidity_percent / 100.0 * saturation_vapour_pressure(temp_c);
        let from_dew_point = saturation_vapour_pressure(dew_point_c);
        let vapour_pressure = (from_humidity + from_dew_point) / 2.0;

        let index = 0.567 * temp_c + 0.393 * vapour_pressure + 3.94;
        tracing::debug!(temp_c, humidity_percent, dew_point_c, index, "heat stress index");
        Ok(index)
    }

    /// Map a heat stress index to a pace slowdown.
    ///
    /// Acclimated athletes get exactly half the slowdown.
    pub fn pace_adjustment(
        &self,
        heat_stress_index: f64,
        heat_acclimated: bool,
    ) -> EngineResult<PaceAdjustment> {
        ensure_range(
            "heat_stress_index",
            heat_stress_index,
            MIN_HEAT_STRESS_INDEX,
            MAX_HEAT_STRESS_INDEX,
        )?;

        let mut slowdown = self.interpolate(heat_stress_index);
        if heat_acclimated {
            slowdown *= 0.5;
        }

        let risk = self.classify(heat_stress_index);
        let guidance = match risk {
            HeatRisk::Extreme => Some(
                "Extreme heat stress. Move the session to a cooler time or indoors; \
                 if running, drop intensity to easy and shorten the session."
                    .to_string(),
            ),
            HeatRisk::High => Some(
                "High heat stress. Slow down to the adjusted pace, hydrate before and \
                 during the session, and watch for signs of heat illness."
                    .to_string(),
            ),
            HeatRisk::Low | HeatRisk::Moderate => None,
        };

        tracing::debug!(heat_stress_index, heat_acclimated, slowdown, ?risk, "heat pace adjustment");

        Ok(PaceAdjustment {
            slowdown_percent: slowdown,
            heat_stress_index,
            risk,
            guidance,
        })
    }

    fn classify(&self, index: f64) -> HeatRisk {
        let first = self.settings.breakpoints.first().map_or(0.0, |bp| bp.0);
        if index >= self.settings.extreme_threshold {
            HeatRisk::Extreme
        } else if index >= self.settings.high_threshold {
            HeatRisk::High
        } else if index > first {
            HeatRisk::Moderate
        } else {
            HeatRisk::Low
        }
    }

    /// Piecewise-linear lookup, flat outside the breakpoint range.
    fn interpolate(&self, index: f64) -> f64 {
        let bps = &self.settings.breakpoints;
        let (Some(&(x0, y0)), Some(&(xn, yn))) = (bps.first(), bps.last()) else {
            return 0.0;
        };
        if index <= x0 {
            return y0;
        }
        if index >= xn {
            return yn;
        }

        bps.windows(2)
            .find(|w| index <= w[1].0)
            .map(|w| {
                let (xa, ya) = w[0];
                let (xb, yb) = w[1];
                ya + (yb - ya) * (index - xa) / (xb - xa)
            })
            .unwrap_or(yn)
    }
}

/// Compute the heat stress index with the default model.
pub fn compute_heat_stress_index(
    temp_c: f64,
    humidity_percent: f64,
    dew_point_c: f64,
) -> EngineResult<f64> {
    HeatModel::default().heat_stress_index(temp_c, humidity_percent, dew_point_c)
}

/// Compute the heat pace adjustment with the default model.
pub fn compute_pace_adjustment(
    heat_stress_index: f64,
    heat_acclimated: bool,
) -> EngineResult<PaceAdjustment> {
    HeatModel::default().pace_adjustment(heat_stress_index, heat_acclimated)
}
