//! Multi-week simulation driver.

use std::iter::FusedIterator;

use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::{Course, ScenarioConfig, SimulationResult, Student, WeeklySnapshot};
use crate::validation::validate_scenario;

use super::course_load::build_demands;
use super::stepper::{WeekState, WeeklyStateStepper};
use super::summary::SummaryAggregator;
use super::time_budget::TimeBudgetAllocator;

/// Lazy, finite sequence of weekly snapshots.
///
/// Yields exactly `num_weeks` snapshots, or stops after the first error.
/// Not restartable.
#[derive(Debug)]
pub struct Trajectory<'a> {
    scenario: &'a ScenarioConfig,
    allocator: TimeBudgetAllocator<'a>,
    stepper: WeeklyStateStepper<'a>,
    state: Option<WeekState>,
}

impl Trajectory<'_> {
    /// Σ declared weekly workload of the simulated courses.
    pub fn total_workload_hours(&self) -> f64 {
        self.stepper.courses().iter().map(|c| c.workload_hours).sum()
    }
}

impl Iterator for Trajectory<'_> {
    type Item = Result<WeeklySnapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        if state.week >= self.scenario.num_weeks {
            return None;
        }

        let week = state.week + 1;
        let exam_week = self.scenario.is_exam_week(week);
        let allocation = self.allocator.allocate(week);

        match self.stepper.step(state, &allocation, exam_week) {
            Ok(next) => {
                let snapshot = self.stepper.snapshot(&next, allocation, exam_week);
                self.state = Some(next);
                Some(Ok(snapshot))
            }
            Err(e) => Some(Err(e)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            Some(s) => {
                let left = self.scenario.num_weeks.saturating_sub(s.week) as usize;
                (0, Some(left))
            }
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Trajectory<'_> {}

/// Runs scenarios against a model configuration.
#[derive(Debug, Clone, Copy)]
pub struct SimulationRunner<'a> {
    config: &'a ModelConfig,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a ModelConfig {
        self.config
    }

    /// Validates the scenario and returns its lazy trajectory.
    ///
    /// Courses are simulated in the order of `courses`, restricted to the
    /// scenario's `include_course_ids`.
    ///
    /// # Errors
    /// `TwinError::Validation` on malformed input, `TwinError::Computation`
    /// on degenerate course data.
    pub fn trajectory<'s>(
        &self,
        scenario: &'s ScenarioConfig,
        student: &Student,
        courses: &[Course],
    ) -> Result<Trajectory<'s>>
    where
        'a: 's,
    {
        validate_scenario(scenario, student, courses)?;

        let config = self.config;
        let selected = courses
            .iter()
            .filter(|c| scenario.include_course_ids.contains(&c.id));
        let demands = build_demands(selected, &config.course_load)?;
        let allocator = TimeBudgetAllocator::new(&config.time, scenario, &demands);
        let stepper = WeeklyStateStepper::new(config, scenario.study_strategy, demands);
        let state = WeekState::initial(config, stepper.courses());

        Ok(Trajectory {
            scenario,
            allocator,
            stepper,
            state: Some(state),
        })
    }

    /// Runs a scenario to completion.
    ///
    /// The returned result has no `id` or `created_at`; those belong to
    /// the store that persists it.
    pub fn run(
        &self,
        scenario: &ScenarioConfig,
        student: &Student,
        courses: &[Course],
    ) -> Result<SimulationResult> {
        let trajectory = self.trajectory(scenario, student, courses)?;
        let total_workload = trajectory.total_workload_hours();
        let weekly_snapshots = trajectory.collect::<Result<Vec<_>>>()?;
        let summary = SummaryAggregator::new(self.config).summarize(&weekly_snapshots, total_workload)?;

        debug!(
            student_id = scenario.student_id,
            weeks = weekly_snapshots.len(),
            strategy = %scenario.study_strategy,
            "simulation finished"
        );

        Ok(SimulationResult {
            id: None,
            scenario_config: scenario.clone(),
            summary,
            weekly_snapshots,
            created_at: None,
        })
    }

    /// Runs a scenario and logs its headline figures.
    pub fn run_logged(
        &self,
        scenario: &ScenarioConfig,
        student: &Student,
        courses: &[Course],
    ) -> Result<SimulationResult> {
        info!(
            student_id = scenario.student_id,
            weeks = scenario.num_weeks,
            courses = scenario.include_course_ids.len(),
            "running simulation"
        );
        let result = self.run(scenario, student, courses)?;
        info!(
            gpa_mean = result.summary.predicted_gpa_mean,
            burnout_risk = %result.summary.burnout_risk,
            overload_weeks = result.summary.peak_overload_weeks.len(),
            "simulation complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TwinError;
    use crate::models::StudyStrategy;

    fn student() -> Student {
        Student::new(1).with_target_gpa(3.5)
    }

    fn courses() -> Vec<Course> {
        vec![
            Course::new(10, "Microeconomics").with_credits(3).with_difficulty(5.0).with_workload(6.0),
            Course::new(11, "Quantum Mechanics")
                .with_credits(4)
                .with_difficulty(8.0)
                .with_workload(8.0),
            Course::new(12, "Poetry").with_credits(2).with_difficulty(3.0).with_workload(2.0),
        ]
    }

    fn scenario() -> ScenarioConfig {
        ScenarioConfig::new(1)
            .with_num_weeks(16)
            .with_work_hours(10.0)
            .with_sleep_target(7.0)
            .with_strategy(StudyStrategy::Spaced)
            .with_courses([10, 11])
            .with_exam_weeks([8, 16])
    }

    #[test]
    fn test_reference_scenario() {
        let config = ModelConfig::default();
        let result = SimulationRunner::new(&config)
            .run(&scenario(), &student(), &courses())
            .unwrap();

        assert_eq!(result.weekly_snapshots.len(), 16);
        for (i, s) in result.weekly_snapshots.iter().enumerate() {
            assert_eq!(s.week, i as u32 + 1);
            assert_eq!(s.is_exam_week, s.week == 8 || s.week == 16);
            assert!((s.time_allocation.total_hours - 168.0).abs() < 1e-6);
        }
        let w7 = result.week(7).unwrap().cognitive_load;
        let w8 = result.week(8).unwrap().cognitive_load;
        assert!(w8 > w7);
        assert!(result.id.is_none());
        assert!(result.created_at.is_none());
    }

    #[test]
    fn test_only_selected_courses_are_simulated() {
        let config = ModelConfig::default();
        let result = SimulationRunner::new(&config)
            .run(&scenario(), &student(), &courses())
            .unwrap();
        let grades = &result.weekly_snapshots[0].course_grades;
        assert_eq!(grades.len(), 2);
        assert!(!grades.contains_key("Poetry"));
    }

    #[test]
    fn test_trajectory_is_lazy_and_finite() {
        let config = ModelConfig::default();
        let runner = SimulationRunner::new(&config);
        let s = scenario().with_num_weeks(4).with_exam_weeks([4]);
        let mut t = runner.trajectory(&s, &student(), &courses()).unwrap();

        assert_eq!(t.size_hint(), (0, Some(4)));
        let first = t.next().unwrap().unwrap();
        assert_eq!(first.week, 1);
        assert_eq!(t.by_ref().count(), 3);
        assert!(t.next().is_none());
        assert!(t.next().is_none());
    }

    #[test]
    fn test_deterministic() {
        let config = ModelConfig::default();
        let runner = SimulationRunner::new(&config);
        let a = runner.run(&scenario(), &student(), &courses()).unwrap();
        let b = runner.run(&scenario(), &student(), &courses()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_scenario_fails_fast() {
        let config = ModelConfig::default();
        let s = scenario().with_courses([]);
        let err = SimulationRunner::new(&config)
            .run(&s, &student(), &courses())
            .unwrap_err();
        assert!(matches!(err, TwinError::Validation(_)));
    }

    #[test]
    fn test_summary_matches_snapshots() {
        let config = ModelConfig::default();
        let result = SimulationRunner::new(&config)
            .run(&scenario(), &student(), &courses())
            .unwrap();
        let mean = result
            .weekly_snapshots
            .iter()
            .map(|s| s.predicted_gpa)
            .sum::<f64>()
            / result.weekly_snapshots.len() as f64;
        assert!((mean - result.summary.predicted_gpa_mean).abs() < 1e-12);
        assert_eq!(
            result.summary.burnout_probability,
            result.last_week().unwrap().burnout_probability
        );
    }

    #[test]
    fn test_target_gpa_does_not_seed_grades() {
        let config = ModelConfig::default();
        let runner = SimulationRunner::new(&config);
        let low = runner
            .run(&scenario(), &Student::new(1).with_target_gpa(0.0), &courses())
            .unwrap();
        let high = runner
            .run(&scenario(), &Student::new(1).with_target_gpa(4.0), &courses())
            .unwrap();
        assert_eq!(low.weekly_snapshots, high.weekly_snapshots);
        assert_eq!(
            low.summary.predicted_gpa_mean,
            high.summary.predicted_gpa_mean
        );
    }

    #[test]
    fn test_heavy_job_and_short_sleep_cost_grades() {
        let config = ModelConfig::default();
        let runner = SimulationRunner::new(&config);
        let gpa = |s: ScenarioConfig| {
            runner
                .run(&s, &student(), &courses())
                .unwrap()
                .summary
                .predicted_gpa_mean
        };
        let reference = gpa(scenario());
        let part_time = gpa(scenario().with_work_hours(20.0));
        let strained = gpa(scenario().with_work_hours(40.0).with_sleep_target(6.0));

        assert!(reference >= 3.5);
        assert!(part_time < reference);
        assert!(strained < part_time);
        assert!(strained < 2.8);
    }

    #[test]
    fn test_cramming_retains_less_than_spaced() {
        let config = ModelConfig::default();
        let runner = SimulationRunner::new(&config);
        let mean_retention = |strategy| {
            let r = runner
                .run(&scenario().with_strategy(strategy), &student(), &courses())
                .unwrap();
            r.weekly_snapshots.iter().map(|s| s.retention_score).sum::<f64>() / 16.0
        };
        assert!(mean_retention(StudyStrategy::Cramming) < mean_retention(StudyStrategy::Spaced));
    }
}
