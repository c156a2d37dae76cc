//! Schedule optimization request and result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{SimulationResult, StudyStrategy};

/// What the schedule search optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[default]
    MaximizeGpa,
    MinimizeBurnout,
    /// Weighted blend of GPA and burnout.
    Balanced,
}

impl Objective {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaximizeGpa => "maximize_gpa",
            Self::MinimizeBurnout => "minimize_burnout",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds on the searched schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConstraints {
    /// Upper bound of the work-hours dimension.
    pub max_work_hours_per_week: f64,
    /// Lower bound of the nightly sleep dimension.
    pub min_sleep_hours: f64,
    /// Candidates below this GPA are penalized.
    pub target_min_gpa: f64,
}

impl Default for OptimizationConstraints {
    fn default() -> Self {
        Self {
            max_work_hours_per_week: 20.0,
            min_sleep_hours: 6.0,
            target_min_gpa: 3.0,
        }
    }
}

/// A schedule search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub student_id: u64,
    #[serde(default = "default_num_weeks")]
    pub num_weeks: u32,
    #[serde(default)]
    pub constraints: OptimizationConstraints,
    #[serde(default)]
    pub objective: Objective,
    /// Exam calendar every candidate is simulated against.
    #[serde(default)]
    pub exam_weeks: Vec<u32>,
}

fn default_num_weeks() -> u32 {
    16
}

impl OptimizationRequest {
    pub fn new(student_id: u64) -> Self {
        Self {
            student_id,
            num_weeks: default_num_weeks(),
            constraints: OptimizationConstraints::default(),
            objective: Objective::default(),
            exam_weeks: Vec::new(),
        }
    }

    pub fn with_num_weeks(mut self, weeks: u32) -> Self {
        self.num_weeks = weeks;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_max_work_hours(mut self, hours: f64) -> Self {
        self.constraints.max_work_hours_per_week = hours;
        self
    }

    pub fn with_min_sleep_hours(mut self, hours: f64) -> Self {
        self.constraints.min_sleep_hours = hours;
        self
    }

    pub fn with_target_min_gpa(mut self, gpa: f64) -> Self {
        self.constraints.target_min_gpa = gpa;
        self
    }

    pub fn with_exam_weeks(mut self, weeks: impl IntoIterator<Item = u32>) -> Self {
        self.exam_weeks = weeks.into_iter().collect();
        self
    }
}

/// Why a schedule search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Best fitness stopped improving.
    Converged,
    /// Generation budget exhausted.
    GenerationLimit,
    /// Wall-clock budget exhausted.
    Deadline,
    /// Caller requested cancellation.
    Cancelled,
}

impl Termination {
    /// Whether the search was cut short by a budget or the caller.
    pub fn is_truncated(self) -> bool {
        matches!(self, Self::Deadline | Self::Cancelled)
    }
}

/// Search statistics attached to an optimization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub generations: usize,
    pub evaluations: usize,
    pub best_fitness: f64,
    pub termination: Termination,
}

/// Best schedule found and the simulation it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub objective: Objective,
    pub optimal_work_hours: f64,
    pub optimal_sleep_hours: f64,
    /// Course name → weekly study hours in a regular week.
    pub optimal_study_hours_per_course: BTreeMap<String, f64>,
    pub optimal_study_strategy: StudyStrategy,
    pub predicted_gpa: f64,
    pub predicted_burnout_probability: f64,
    /// Whether the optimum meets `target_min_gpa`.
    pub feasible: bool,
    pub search: SearchReport,
    pub simulation_result: SimulationResult,
}
