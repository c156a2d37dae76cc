//! Student profile.
//!
//! Owned by an external store and immutable for the duration of a run.

use serde::{Deserialize, Serialize};

/// A student whose semester is simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// GPA the student aims for (0.0..=4.0).
    pub target_gpa: f64,
    /// Hours per week committed to employment.
    pub weekly_work_hours: f64,
    /// Nightly sleep target (4.0..=12.0 hours).
    pub sleep_target_hours: f64,
}

impl Student {
    /// Creates a student with a 3.5 target, no job and 7h of sleep.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            target_gpa: 3.5,
            weekly_work_hours: 0.0,
            sleep_target_hours: 7.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_target_gpa(mut self, gpa: f64) -> Self {
        self.target_gpa = gpa;
        self
    }

    pub fn with_weekly_work_hours(mut self, hours: f64) -> Self {
        self.weekly_work_hours = hours;
        self
    }

    pub fn with_sleep_target_hours(mut self, hours: f64) -> Self {
        self.sleep_target_hours = hours;
        self
    }
}
