//! Simulation outputs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScenarioConfig, WeeklySnapshot};

/// Burnout risk class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BurnoutRisk {
    Low,
    Medium,
    High,
}

impl BurnoutRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for BurnoutRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar statistics of a trajectory.
///
/// Derived from the weekly snapshots; never edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub predicted_gpa_min: f64,
    pub predicted_gpa_max: f64,
    pub predicted_gpa_mean: f64,
    pub burnout_risk: BurnoutRisk,
    /// Burnout probability of the final week.
    pub burnout_probability: f64,
    /// Weeks whose cognitive load exceeded the overload threshold.
    pub peak_overload_weeks: Vec<u32>,
    /// Workload hours per week not covered by allocated study time.
    pub required_study_hours_per_week: f64,
    /// Cumulative sleep shortfall against the nightly baseline (hours).
    pub sleep_deficit_hours: f64,
    pub recommendation: String,
}

/// A complete simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Assigned by the result store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub scenario_config: ScenarioConfig,
    pub summary: SimulationSummary,
    /// One snapshot per week, ordered by week.
    pub weekly_snapshots: Vec<WeeklySnapshot>,
    /// Assigned by the result store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SimulationResult {
    /// Final-week snapshot.
    pub fn last_week(&self) -> Option<&WeeklySnapshot> {
        self.weekly_snapshots.last()
    }

    /// Snapshot for a 1-based week.
    pub fn week(&self, week: u32) -> Option<&WeeklySnapshot> {
        let idx = (week as usize).checked_sub(1)?;
        self.weekly_snapshots.get(idx)
    }
}
