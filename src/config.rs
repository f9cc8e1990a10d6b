//! Engine configuration.
//!
//! Model constants live in a TOML file so coaches can tune them without a
//! rebuild. A missing file means "use the published defaults".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Heat stress settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatSettings {
    /// `(heat stress index, slowdown percent)` breakpoints, sorted by index.
    pub breakpoints: Vec<(f64, f64)>,
    /// Index at which advisory guidance starts.
    pub high_threshold: f64,
    /// Index at which guidance escalates to "reschedule".
    pub extreme_threshold: f64,
}

impl Default for HeatSettings {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                (18.0, 0.0),
                (23.0, 3.0),
                (28.0, 8.0),
                (32.0, 15.0),
                (35.0, 25.0),
            ],
            high_threshold: 28.0,
            extreme_threshold: 32.0,
        }
    }
}

/// Altitude settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeSettings {
    /// Altitude below which there is no measurable effect (m).
    pub baseline_m: f64,
    /// Slowdown per 1000 m above baseline, unacclimatized (%).
    pub percent_per_km: f64,
    /// Fraction of the effect that remains after full acclimatization.
    pub residual_fraction: f64,
    /// Acclimatization time constant (days).
    pub acclimatization_tau_days: f64,
}

impl Default for AltitudeSettings {
    fn default() -> Self {
        Self {
            baseline_m: 1500.0,
            percent_per_km: 3.0,
            residual_fraction: 0.5,
            acclimatization_tau_days: 14.0,
        }
    }
}

/// Wind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindSettings {
    /// Share of running energy cost spent overcoming air resistance.
    pub drag_share: f64,
    /// Fraction of the drag saving a runner actually recovers in a tailwind.
    pub tailwind_recovery: f64,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self {
            drag_share: 0.04,
            tailwind_recovery: 0.5,
        }
    }
}

/// Training load settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingLoadSettings {
    /// Acute window (days).
    pub acute_days: f64,
    /// Chronic window (days).
    pub chronic_days: f64,
    /// ACWR below this is undertrained.
    pub undertrained_below: f64,
    /// ACWR up to this is optimal.
    pub optimal_max: f64,
    /// ACWR up to this is caution; above is high risk.
    pub caution_max: f64,
}

impl Default for TrainingLoadSettings {
    fn default() -> Self {
        Self {
            acute_days: 7.0,
            chronic_days: 42.0,
            undertrained_below: 0.8,
            optimal_max: 1.3,
            caution_max: 1.5,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Version that wrote the file
    pub version: String,
    /// Heat stress model
    pub heat: HeatSettings,
    /// Altitude model
    pub altitude: AltitudeSettings,
    /// Wind model
    pub wind: WindSettings,
    /// Training load model
    pub training_load: TrainingLoadSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            heat: HeatSettings::default(),
            altitude: AltitudeSettings::default(),
            wind: WindSettings::default(),
            training_load: TrainingLoadSettings::default(),
        }
    }
}

impl HeatSettings {
    /// Check that the breakpoints describe a usable slowdown curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bps = &self.breakpoints;
        if bps.len() < 2 {
            return Err(ConfigError::Invalid(
                "heat.breakpoints needs at least two points".to_string(),
            ));
        }
        if bps.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(ConfigError::Invalid(
                "heat.breakpoints must be finite numbers".to_string(),
            ));
        }
        if bps.windows(2).any(|w| w[1].0 <= w[0].0 || w[1].1 < w[0].1) {
            return Err(ConfigError::Invalid(
                "heat.breakpoints must be strictly increasing in index and non-decreasing in slowdown"
                    .to_string(),
            ));
        }
        if !self.high_threshold.is_finite()
            || !self.extreme_threshold.is_finite()
            || self.extreme_threshold < self.high_threshold
        {
            return Err(ConfigError::Invalid(
                "heat.extreme_threshold must not be below heat.high_threshold".to_string(),
            ));
        }
        Ok(())
    }
}

impl AltitudeSettings {
    /// Check the altitude constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.baseline_m.is_finite() {
            return Err(ConfigError::Invalid(
                "altitude.baseline_m must be a finite number".to_string(),
            ));
        }
        if !(self.acclimatization_tau_days.is_finite() && self.acclimatization_tau_days > 0.0) {
            return Err(ConfigError::Invalid(
                "altitude.acclimatization_tau_days must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.residual_fraction)
            || !(self.percent_per_km.is_finite() && self.percent_per_km >= 0.0)
        {
            return Err(ConfigError::Invalid(
                "altitude.residual_fraction must be 0-1 and percent_per_km non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl WindSettings {
    /// Check the wind constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.drag_share) || !(0.0..=1.0).contains(&self.tailwind_recovery) {
            return Err(ConfigError::Invalid(
                "wind.drag_share and wind.tailwind_recovery must be 0-1".to_string(),
            ));
        }
        Ok(())
    }
}

impl TrainingLoadSettings {
    /// Check the load windows and ACWR thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1.0..=365.0).contains(&self.acute_days)
            || !(1.0..=365.0).contains(&self.chronic_days)
            || self.acute_days >= self.chronic_days
        {
            return Err(ConfigError::Invalid(format!(
                "training_load windows must be 1-365 days with acute ({}) shorter than chronic ({})",
                self.acute_days, self.chronic_days
            )));
        }
        let thresholds = [self.undertrained_below, self.optimal_max, self.caution_max];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0)
            || !(self.undertrained_below <= self.optimal_max && self.optimal_max <= self.caution_max)
        {
            return Err(ConfigError::Invalid(
                "training_load ACWR thresholds must be ascending".to_string(),
            ));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Check that the settings describe a coherent model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heat.validate()?;
        self.altitude.validate()?;
        self.wind.validate()?;
        self.training_load.validate()
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rustpace", "RustPace")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`, falling back to defaults if it does not exist.
pub fn load_config_from(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: EngineConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;

    tracing::info!(path = %path.display(), "loaded engine configuration");
    Ok(config)
}

/// Save configuration to `path`.
pub fn save_config(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}
