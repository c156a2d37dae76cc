//! Engine facade.
//!
//! [`AcademicTwin`] is the entry point a request layer calls: it runs and
//! persists simulations, serves stored results, and runs schedule
//! searches. Students and courses are owned by the caller and passed in.

use std::sync::atomic::AtomicBool;

use tracing::info;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::{Course, OptimizationRequest, OptimizationResult, ScenarioConfig, SimulationResult, Student};
use crate::optimizer::{EvolutionConfig, ScheduleOptimizer};
use crate::simulation::SimulationRunner;
use crate::store::{Page, ResultStore};
use crate::validation::validate_model_config;

/// Simulation and optimization service over a result store.
#[derive(Debug)]
pub struct AcademicTwin<S> {
    config: ModelConfig,
    evolution: EvolutionConfig,
    store: S,
}

impl<S: ResultStore> AcademicTwin<S> {
    /// Creates a service after checking the model configuration.
    pub fn new(config: ModelConfig, store: S) -> Result<Self> {
        validate_model_config(&config)?;
        Ok(Self {
            config,
            evolution: EvolutionConfig::default(),
            store,
        })
    }

    pub fn with_evolution(mut self, evolution: EvolutionConfig) -> Self {
        self.evolution = evolution;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Simulates a scenario and persists the result.
    pub fn run_simulation(
        &self,
        scenario: &ScenarioConfig,
        student: &Student,
        courses: &[Course],
    ) -> Result<SimulationResult> {
        let result = SimulationRunner::new(&self.config).run_logged(scenario, student, courses)?;
        let saved = self.store.save(result)?;
        info!(id = saved.id, student_id = student.id, "simulation stored");
        Ok(saved)
    }

    pub fn get_simulation(&self, id: u64) -> Result<SimulationResult> {
        self.store.get(id)
    }

    /// A student's stored results, newest first.
    pub fn list_simulations(&self, student_id: u64, page: Page) -> Result<Vec<SimulationResult>> {
        self.store.list_for_student(student_id, page)
    }

    pub fn delete_simulation(&self, id: u64) -> Result<()> {
        self.store.delete(id)?;
        info!(id, "simulation deleted");
        Ok(())
    }

    /// Searches for the best schedule. Results are not persisted.
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
        student: &Student,
        courses: &[Course],
    ) -> Result<OptimizationResult> {
        self.optimizer().optimize(request, student, courses)
    }

    /// Like [`optimize`](Self::optimize), stopping early once `cancel` is set.
    pub fn optimize_cancellable(
        &self,
        request: &OptimizationRequest,
        student: &Student,
        courses: &[Course],
        cancel: &AtomicBool,
    ) -> Result<OptimizationResult> {
        self.optimizer()
            .optimize_cancellable(request, student, courses, cancel)
    }

    fn optimizer(&self) -> ScheduleOptimizer<'_> {
        ScheduleOptimizer::new(&self.config).with_evolution(self.evolution.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TwinError;
    use crate::models::StudyStrategy;
    use crate::store::InMemoryResultStore;

    fn service() -> AcademicTwin<InMemoryResultStore> {
        AcademicTwin::new(ModelConfig::default(), InMemoryResultStore::new())
            .unwrap()
            .with_evolution(EvolutionConfig::default().with_max_generations(5).with_parallel(false))
    }

    fn student() -> Student {
        Student::new(3).with_weekly_work_hours(12.0).with_sleep_target_hours(7.5)
    }

    fn courses() -> Vec<Course> {
        vec![
            Course::new(1, "Databases").with_workload(5.0),
            Course::new(2, "Signals").with_credits(4).with_difficulty(7.5).with_workload(7.0),
        ]
    }

    #[test]
    fn test_run_get_list_delete() {
        let twin = service();
        let scenario = ScenarioConfig::for_student(&student()).with_courses([1, 2]);
        let saved = twin.run_simulation(&scenario, &student(), &courses()).unwrap();
        let id = saved.id.unwrap();

        assert_eq!(saved.scenario_config.work_hours_per_week, 12.0);
        assert_eq!(twin.get_simulation(id).unwrap(), saved);

        let cramming = scenario.clone().with_strategy(StudyStrategy::Cramming);
        twin.run_simulation(&cramming, &student(), &courses()).unwrap();
        let listed = twin.list_simulations(3, Page::default()).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].id, Some(id));

        twin.delete_simulation(id).unwrap();
        assert!(matches!(twin.get_simulation(id), Err(TwinError::NotFound { .. })));
        assert!(matches!(twin.delete_simulation(id), Err(TwinError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_scenario_is_not_stored() {
        let twin = service();
        let scenario = ScenarioConfig::for_student(&student()).with_courses([42]);
        let err = twin.run_simulation(&scenario, &student(), &courses()).unwrap_err();
        assert!(!err.validation_errors().is_empty());
        assert!(twin.store().is_empty());
    }

    #[test]
    fn test_rejects_inconsistent_config() {
        let mut config = ModelConfig::default();
        config.time.study_share = 0.9;
        let err = AcademicTwin::new(config, InMemoryResultStore::new()).unwrap_err();
        assert!(matches!(err, TwinError::Validation(_)));
    }

    #[test]
    fn test_optimize_is_not_persisted() {
        let twin = service();
        let result = twin
            .optimize(&OptimizationRequest::new(3), &student(), &courses())
            .unwrap();
        assert_eq!(result.simulation_result.weekly_snapshots.len(), 16);
        assert!(result.simulation_result.id.is_none());
        assert!(twin.store().is_empty());
    }
}
