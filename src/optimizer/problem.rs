//! Schedule search problem definition.
//!
//! Bridges the simulation to the generic evolution loop: a search vector
//! decodes into a scenario, the scenario is simulated, and the summary is
//! turned into a fitness value to be minimized.
//!
//! # Fitness
//!
//! | Objective | Base fitness |
//! |-----------|--------------|
//! | maximize_gpa | −gpa_mean |
//! | minimize_burnout | burnout probability |
//! | balanced | −0.6 · gpa_mean / 4 + 0.4 · burnout probability |
//!
//! Candidates whose mean GPA misses `target_min_gpa` get
//! `+ 10 + 10 · gap`, which ranks every infeasible point below every
//! feasible one without removing it from the search.

use crate::error::Result;
use crate::models::{
    Course, Objective, OptimizationRequest, SimulationResult, SimulationSummary, Student,
};
use crate::simulation::SimulationRunner;

use super::candidate::{Bound, ScheduleCandidate, search_bounds};

/// Flat penalty for missing the GPA target.
pub const INFEASIBLE_PENALTY: f64 = 10.0;
/// Additional penalty per GPA point below the target.
pub const GPA_GAP_PENALTY: f64 = 10.0;
/// Fitness of a candidate whose simulation failed.
pub const FAILED_FITNESS: f64 = 1e6;
/// GPA weight of the balanced objective; burnout gets the rest.
pub const BALANCED_GPA_WEIGHT: f64 = 0.6;

/// A bounded minimization problem.
///
/// `evaluate` must be deterministic and safe to call from several
/// threads at once.
pub trait SearchProblem: Sync {
    fn bounds(&self) -> &[Bound];

    fn dimensions(&self) -> usize {
        self.bounds().len()
    }

    /// Fitness of `x`; lower is better.
    fn evaluate(&self, x: &[f64]) -> f64;
}

/// Schedule search over work hours, sleep and study strategy.
#[derive(Debug, Clone)]
pub struct ScheduleProblem<'a> {
    runner: SimulationRunner<'a>,
    request: &'a OptimizationRequest,
    student: &'a Student,
    courses: &'a [Course],
    bounds: Vec<Bound>,
}

impl<'a> ScheduleProblem<'a> {
    pub fn new(
        runner: SimulationRunner<'a>,
        request: &'a OptimizationRequest,
        student: &'a Student,
        courses: &'a [Course],
    ) -> Self {
        Self {
            runner,
            request,
            student,
            courses,
            bounds: search_bounds(&request.constraints).to_vec(),
        }
    }

    /// Simulates a decoded candidate over all of the student's courses.
    pub fn simulate(&self, candidate: &ScheduleCandidate) -> Result<SimulationResult> {
        let scenario = candidate.to_scenario(self.request, self.courses.iter().map(|c| c.id));
        self.runner.run(&scenario, self.student, self.courses)
    }

    /// Whether a summary meets the GPA target.
    pub fn is_feasible(&self, summary: &SimulationSummary) -> bool {
        summary.predicted_gpa_mean >= self.request.constraints.target_min_gpa
    }

    /// Fitness of a simulated summary.
    pub fn fitness(&self, summary: &SimulationSummary) -> f64 {
        let gpa = summary.predicted_gpa_mean;
        let burnout = summary.burnout_probability;
        let base = match self.request.objective {
            Objective::MaximizeGpa => -gpa,
            Objective::MinimizeBurnout => burnout,
            Objective::Balanced => {
                -BALANCED_GPA_WEIGHT * gpa / 4.0 + (1.0 - BALANCED_GPA_WEIGHT) * burnout
            }
        };
        let gap = self.request.constraints.target_min_gpa - gpa;
        if gap > 0.0 {
            base + INFEASIBLE_PENALTY + GPA_GAP_PENALTY * gap
        } else {
            base
        }
    }
}

impl SearchProblem for ScheduleProblem<'_> {
    fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        match self.simulate(&ScheduleCandidate::decode(x)) {
            Ok(result) => self.fitness(&result.summary),
            Err(e) => {
                tracing::debug!(error = %e, "candidate simulation failed");
                FAILED_FITNESS
            }
        }
    }
}
