//! Schedule optimizer.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;

use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::{
    Course, OptimizationRequest, OptimizationResult, ScenarioConfig, SearchReport, Student,
};
use crate::simulation::SimulationRunner;
use crate::simulation::course_load::build_demands;
use crate::simulation::time_budget::TimeBudgetAllocator;
use crate::validation::validate_optimization_request;

use super::candidate::ScheduleCandidate;
use super::evolution::{EvolutionConfig, evolve};
use super::problem::ScheduleProblem;

/// Searches schedules for a student with differential evolution.
///
/// # Example
/// ```no_run
/// use u_academic_twin::config::ModelConfig;
/// use u_academic_twin::models::{Course, Objective, OptimizationRequest, Student};
/// use u_academic_twin::optimizer::ScheduleOptimizer;
///
/// let config = ModelConfig::default();
/// let student = Student::new(1);
/// let courses = vec![Course::new(1, "Biology"), Course::new(2, "Chemistry")];
/// let request = OptimizationRequest::new(1)
///     .with_objective(Objective::Balanced)
///     .with_target_min_gpa(3.5);
///
/// let result = ScheduleOptimizer::new(&config)
///     .optimize(&request, &student, &courses)
///     .unwrap();
/// println!("{:.1}h work, {:.1}h sleep", result.optimal_work_hours, result.optimal_sleep_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleOptimizer<'a> {
    config: &'a ModelConfig,
    evolution: EvolutionConfig,
}

impl<'a> ScheduleOptimizer<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self {
            config,
            evolution: EvolutionConfig::default(),
        }
    }

    pub fn with_evolution(mut self, evolution: EvolutionConfig) -> Self {
        self.evolution = evolution;
        self
    }

    pub fn evolution(&self) -> &EvolutionConfig {
        &self.evolution
    }

    /// Runs the search to completion or until its budget runs out.
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
        student: &Student,
        courses: &[Course],
    ) -> Result<OptimizationResult> {
        self.search(request, student, courses, None)
    }

    /// Like [`optimize`](Self::optimize), returning the best schedule so
    /// far once `cancel` is set.
    pub fn optimize_cancellable(
        &self,
        request: &OptimizationRequest,
        student: &Student,
        courses: &[Course],
        cancel: &AtomicBool,
    ) -> Result<OptimizationResult> {
        self.search(request, student, courses, Some(cancel))
    }

    fn search(
        &self,
        request: &OptimizationRequest,
        student: &Student,
        courses: &[Course],
        cancel: Option<&AtomicBool>,
    ) -> Result<OptimizationResult> {
        validate_optimization_request(request, student, courses)?;
        info!(
            student_id = request.student_id,
            objective = %request.objective,
            max_work = request.constraints.max_work_hours_per_week,
            min_sleep = request.constraints.min_sleep_hours,
            target_gpa = request.constraints.target_min_gpa,
            "starting schedule search"
        );

        let problem = ScheduleProblem::new(SimulationRunner::new(self.config), request, student, courses);
        let outcome = evolve(&problem, &self.evolution, cancel);

        let candidate = ScheduleCandidate::decode(&outcome.best);
        let simulation_result = problem.simulate(&candidate)?;
        let feasible = problem.is_feasible(&simulation_result.summary);
        let study_hours =
            self.study_hours_per_course(&simulation_result.scenario_config, courses)?;

        if outcome.termination.is_truncated() {
            warn!(
                termination = ?outcome.termination,
                generations = outcome.generations,
                "schedule search truncated, returning best so far"
            );
        }
        if !feasible {
            warn!(
                gpa = simulation_result.summary.predicted_gpa_mean,
                target = request.constraints.target_min_gpa,
                "no schedule reaches the GPA target"
            );
        }
        info!(
            work_hours = candidate.work_hours,
            sleep_hours = candidate.sleep_hours,
            strategy = %candidate.strategy,
            gpa = simulation_result.summary.predicted_gpa_mean,
            burnout = simulation_result.summary.burnout_probability,
            evaluations = outcome.evaluations,
            "schedule search complete"
        );

        Ok(OptimizationResult {
            objective: request.objective,
            optimal_work_hours: candidate.work_hours,
            optimal_sleep_hours: candidate.sleep_hours,
            optimal_study_hours_per_course: study_hours,
            optimal_study_strategy: candidate.strategy,
            predicted_gpa: simulation_result.summary.predicted_gpa_mean,
            predicted_burnout_probability: simulation_result.summary.burnout_probability,
            feasible,
            search: SearchReport {
                generations: outcome.generations,
                evaluations: outcome.evaluations,
                best_fitness: outcome.best_fitness,
                termination: outcome.termination,
            },
            simulation_result,
        })
    }

    /// Mean weekly study hours per course under `scenario`.
    ///
    /// Re-runs the allocator for every week and splits each week's study
    /// time by course demand share.
    fn study_hours_per_course(
        &self,
        scenario: &ScenarioConfig,
        courses: &[Course],
    ) -> Result<BTreeMap<String, f64>> {
        let demands = build_demands(courses, &self.config.course_load)?;
        let allocator = TimeBudgetAllocator::new(&self.config.time, scenario, &demands);
        let weeks = scenario.num_weeks.max(1);
        let mean_study = (1..=weeks)
            .map(|w| allocator.allocate(w).study_hours())
            .sum::<f64>()
            / f64::from(weeks);

        Ok(demands
            .into_iter()
            .map(|d| (d.name, mean_study * d.share))
            .collect())
    }
}
