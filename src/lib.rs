//! RustPace - Environmental pace adjustment and training analytics
//!
//! Pure, synchronous calculations for coaches and athletes: heat stress,
//! altitude and wind adjustments, training load ratios, readiness scoring,
//! pacing plans and lactate threshold estimation. Every calculation either
//! returns a value or rejects its input.

pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;

// Re-export commonly used types
pub use config::EngineConfig;
pub use environment::{
    compute_altitude_adjustment, compute_heat_stress_index, compute_pace_adjustment,
    compute_wind_resistance, EnvironmentAssessment, EnvironmentCalculator, EnvironmentalConditions,
    Intensity, PaceAdjustment, WindImpact, WindInput,
};
pub use error::{EngineError, EngineResult};
pub use metrics::{
    LactateAnalyzer, PacingPlanner, PacingStrategy, ReadinessCalculator, TrainingLoadCalculator,
};
