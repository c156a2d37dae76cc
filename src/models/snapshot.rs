//! Weekly time allocation and state snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Hours of one week, by activity.
///
/// The seven categories sum to `total_hours` (168 for a valid week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAllocation {
    pub class_hours: f64,
    pub work_hours: f64,
    pub sleep_hours: f64,
    pub deep_study_hours: f64,
    pub shallow_study_hours: f64,
    pub recovery_hours: f64,
    pub social_hours: f64,
    pub total_hours: f64,
    /// Fixed commitments that did not fit in the week (hours).
    #[serde(default)]
    pub overcommitted_hours: f64,
}

impl TimeAllocation {
    /// Deep plus shallow study hours.
    #[inline]
    pub fn study_hours(&self) -> f64 {
        self.deep_study_hours + self.shallow_study_hours
    }

    /// Sum of the seven categories.
    pub fn category_sum(&self) -> f64 {
        self.class_hours
            + self.work_hours
            + self.sleep_hours
            + self.deep_study_hours
            + self.shallow_study_hours
            + self.recovery_hours
            + self.social_hours
    }

    /// Whether fixed commitments exceeded the week.
    #[inline]
    pub fn is_overloaded(&self) -> bool {
        self.overcommitted_hours > 0.0
    }

    /// Average sleep per night.
    #[inline]
    pub fn nightly_sleep(&self) -> f64 {
        self.sleep_hours / 7.0
    }
}

/// Student state at the end of one simulated week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    /// 1-based week index.
    pub week: u32,
    /// 0.0..=100.0
    pub cognitive_load: f64,
    /// 0.0..=4.0
    pub predicted_gpa: f64,
    /// 0.0..=1.0
    pub burnout_probability: f64,
    /// 0.0..=1.0
    pub fatigue_level: f64,
    /// Mean retention across courses (0.0..=1.0).
    pub retention_score: f64,
    pub time_allocation: TimeAllocation,
    /// Course name → predicted percentage.
    pub course_grades: BTreeMap<String, f64>,
    /// Course name → retention fraction.
    pub course_retentions: BTreeMap<String, f64>,
    pub is_exam_week: bool,
}
