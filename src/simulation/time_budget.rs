//! Weekly time budget allocation.
//!
//! Splits the 168-hour week into seven categories. Fixed commitments
//! (class, work, sleep) are placed first; the remaining flexible hours
//! are shared between study, recovery and social time.
//!
//! # Algorithm
//!
//! 1. class = Σ contact hours, sleep = nightly target × 7, work = contracted
//! 2. If fixed commitments exceed the week, the excess is recorded as
//!    `overcommitted_hours` and trimmed from work, then sleep, then class
//! 3. remaining = 168 − fixed
//! 4. study and recovery by configured shares, social takes the rest;
//!    cramming shrinks study far from exams and bursts it right before
//!    and during them
//! 5. study splits into deep and shallow by the strategy's deep ratio
//! 6. In exam weeks part of recovery moves to deep study

use crate::config::TimeBudgetConfig;
use crate::models::{ScenarioConfig, StudyStrategy, TimeAllocation};

use super::course_load::CourseDemand;

/// Hours in one week.
pub const HOURS_PER_WEEK: f64 = 168.0;

/// Allocates each simulated week's hours for one scenario.
///
/// Fixed commitments are resolved once at construction; [`allocate`]
/// only varies with the exam calendar.
///
/// [`allocate`]: TimeBudgetAllocator::allocate
#[derive(Debug, Clone)]
pub struct TimeBudgetAllocator<'a> {
    config: &'a TimeBudgetConfig,
    scenario: &'a ScenarioConfig,
    class_hours: f64,
    work_hours: f64,
    sleep_hours: f64,
    overcommitted_hours: f64,
}

impl<'a> TimeBudgetAllocator<'a> {
    pub fn new(
        config: &'a TimeBudgetConfig,
        scenario: &'a ScenarioConfig,
        courses: &[CourseDemand],
    ) -> Self {
        let mut class_hours: f64 = courses.iter().map(|c| c.contact_hours).sum();
        let mut work_hours = scenario.work_hours_per_week;
        let mut sleep_hours = scenario.sleep_target_hours * 7.0;

        let overcommitted_hours = (class_hours + work_hours + sleep_hours - HOURS_PER_WEEK).max(0.0);
        let mut excess = overcommitted_hours;
        for hours in [&mut work_hours, &mut sleep_hours, &mut class_hours] {
            let cut = excess.min(*hours);
            *hours -= cut;
            excess -= cut;
        }

        Self {
            config,
            scenario,
            class_hours,
            work_hours,
            sleep_hours,
            overcommitted_hours,
        }
    }

    /// Hours of fixed commitments that did not fit in the week.
    pub fn overcommitted_hours(&self) -> f64 {
        self.overcommitted_hours
    }

    /// Fraction of flexible hours spent studying in the given week.
    pub fn study_share(&self, week: u32) -> f64 {
        let cfg = self.config;
        let mut share = cfg.study_share;
        if self.scenario.study_strategy == StudyStrategy::Cramming {
            share *= match self.scenario.weeks_until_exam(week) {
                Some(d) if d <= cfg.cramming_burst_window => cfg.cramming_burst_factor,
                Some(_) => cfg.cramming_idle_factor,
                None => 1.0,
            };
        }
        share.min(1.0 - cfg.recovery_share).max(0.0)
    }

    /// Allocation of a 1-based week.
    pub fn allocate(&self, week: u32) -> TimeAllocation {
        let cfg = self.config;
        let strategy = self.scenario.study_strategy;
        let exam_week = self.scenario.is_exam_week(week);

        let fixed = self.class_hours + self.work_hours + self.sleep_hours;
        let remaining = (HOURS_PER_WEEK - fixed).max(0.0);

        let study = remaining * self.study_share(week);
        let mut recovery = remaining * cfg.recovery_share;
        let social = (remaining - study - recovery).max(0.0);

        let mut deep = study * cfg.deep_ratio.get(strategy);
        let shallow = study - deep;

        if exam_week {
            let freed = recovery * (1.0 - cfg.exam_recovery_factor);
            recovery -= freed;
            deep += freed;
        }

        let mut allocation = TimeAllocation {
            class_hours: self.class_hours,
            work_hours: self.work_hours,
            sleep_hours: self.sleep_hours,
            deep_study_hours: deep,
            shallow_study_hours: shallow,
            recovery_hours: recovery,
            social_hours: social,
            total_hours: 0.0,
            overcommitted_hours: self.overcommitted_hours,
        };
        allocation.total_hours = allocation.category_sum();
        allocation
    }
}
