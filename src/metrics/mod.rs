//! Training metrics: load, readiness, pacing, lactate threshold and zones.

pub mod lactate;
pub mod pacing;
pub mod readiness;
pub mod training_load;
pub mod zones;

pub use lactate::{LactateAnalyzer, LactateMethod, LactateSample, LactateThresholds, ThresholdPoint};
pub use pacing::{PacingPlan, PacingPlanner, PacingStrategy, Split};
pub use readiness::{ReadinessCalculator, ReadinessScore, ReadinessStatus, WellnessCheckIn};
pub use training_load::{Acwr, AcwrReport, AcwrStatus, DailyLoad, TrainingLoadCalculator};
pub use zones::{HrZoneRange, HrZones, PaceZoneRange, PaceZones};
