//! Heart rate and pace zones anchored on lactate threshold.
//!
//! HR zones follow Friel's five running zones as a percent of LTHR. Pace
//! zones are a percent of threshold pace, where a larger percent is slower.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_range, EngineResult};

/// A heart rate zone range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrZoneRange {
    /// Zone number (1-5)
    pub zone: u8,
    /// Minimum BPM (inclusive)
    pub min_bpm: u16,
    /// Maximum BPM (inclusive, `u16::MAX` = no upper limit)
    pub max_bpm: u16,
    /// Zone name
    pub name: String,
}

/// A pace zone range in seconds per km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceZoneRange {
    /// Zone number (1-5)
    pub zone: u8,
    /// Fastest pace in the zone (s/km)
    pub fastest_sec_per_km: f64,
    /// Slowest pace in the zone (s/km, `None` = no limit)
    pub slowest_sec_per_km: Option<f64>,
    /// Zone name
    pub name: String,
}

const ZONE_NAMES: [&str; 5] = ["Recovery", "Aerobic", "Tempo", "Threshold", "VO2max"];

/// Five heart rate zones from LTHR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrZones {
    /// Lactate threshold heart rate
    pub lthr: u16,
    /// Zones 1-5
    pub zones: Vec<HrZoneRange>,
}

impl HrZones {
    /// Calculate zones from lactate threshold heart rate.
    ///
    /// Z1 < 85%, Z2 85-89%, Z3 90-94%, Z4 95-99%, Z5 >= 100%.
    pub fn from_lthr(lthr: u16) -> EngineResult<Self> {
        ensure_range("lthr", lthr as f64, 100.0, 220.0)?;

        let at = |pct: f64| (lthr as f64 * pct).round() as u16;
        let lower = [0, at(0.85), at(0.90), at(0.95), lthr];

        let zones = (0..5)
            .map(|i| HrZoneRange {
                zone: i as u8 + 1,
                min_bpm: lower[i],
                max_bpm: if i < 4 { lower[i + 1] - 1 } else { u16::MAX },
                name: ZONE_NAMES[i].to_string(),
            })
            .collect();

        Ok(Self { lthr, zones })
    }

    /// Get the zone (1-5) for a heart rate.
    pub fn zone_for(&self, bpm: u16) -> u8 {
        self.zones
            .iter()
            .rev()
            .find(|z| bpm >= z.min_bpm)
            .map_or(1, |z| z.zone)
    }
}

/// Five pace zones from threshold pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceZones {
    /// Threshold pace (s/km)
    pub threshold_sec_per_km: f64,
    /// Zones 1-5
    pub zones: Vec<PaceZoneRange>,
}

impl PaceZones {
    /// Calculate zones from threshold pace.
    ///
    /// Z1 > 129%, Z2 114-129%, Z3 106-113%, Z4 99-105%, Z5 < 99% of threshold pace.
    pub fn from_threshold_pace(threshold_sec_per_km: f64) -> EngineResult<Self> {
        ensure_range("threshold_sec_per_km", threshold_sec_per_km, 120.0, 900.0)?;

        // Slow edges of zones 2-5 in percent of threshold; zone 1 has no slow limit.
        let edges = [129.0, 114.0, 106.0, 99.0].map(|pct| threshold_sec_per_km * pct / 100.0);

        let zones = (0usize..5)
            .map(|i| PaceZoneRange {
                zone: i as u8 + 1,
                slowest_sec_per_km: i.checked_sub(1).map(|e| edges[e]),
                fastest_sec_per_km: edges.get(i).copied().unwrap_or(0.0),
                name: ZONE_NAMES[i].to_string(),
            })
            .collect();

        Ok(Self {
            threshold_sec_per_km,
            zones,
        })
    }

    /// Get the zone (1-5) for a pace. Faster (smaller) paces are higher zones.
    ///
    /// A pace on an edge belongs to the slower zone, except that Z2 also
    /// takes its own slow edge at 129%.
    pub fn zone_for(&self, pace_sec_per_km: f64) -> u8 {
        self.zones
            .iter()
            .rev()
            .find(|z| match z.slowest_sec_per_km {
                Some(edge) if z.zone == 2 => pace_sec_per_km <= edge,
                Some(edge) => pace_sec_per_km < edge,
                None => true,
            })
            .map_or(1, |z| z.zone)
    }
}
