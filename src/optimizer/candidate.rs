//! Schedule encoding for the search.
//!
//! A candidate schedule is a point in a 3-dimensional box:
//!
//! | Index | Dimension | Range |
//! |-------|-----------|-------|
//! | 0 | Work hours per week | [0, max_work_hours_per_week] |
//! | 1 | Nightly sleep hours | [min_sleep_hours, 12] |
//! | 2 | Study strategy | [0, 3), one unit per strategy |
//!
//! The strategy dimension is relaxed to a real interval and decoded by
//! taking the unit bin the value falls into.

use crate::models::{OptimizationConstraints, OptimizationRequest, ScenarioConfig, StudyStrategy};
use crate::validation::MAX_SLEEP_HOURS;

pub const WORK_DIM: usize = 0;
pub const SLEEP_DIM: usize = 1;
pub const STRATEGY_DIM: usize = 2;
/// Number of search dimensions.
pub const DIMENSIONS: usize = 3;

/// Inclusive lower and upper bound of one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    #[inline]
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// Search box for a request's constraints.
pub fn search_bounds(constraints: &OptimizationConstraints) -> [Bound; DIMENSIONS] {
    [
        Bound::new(0.0, constraints.max_work_hours_per_week),
        Bound::new(constraints.min_sleep_hours, MAX_SLEEP_HOURS),
        Bound::new(0.0, StudyStrategy::ALL.len() as f64),
    ]
}

/// Decoded schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleCandidate {
    pub work_hours: f64,
    pub sleep_hours: f64,
    pub strategy: StudyStrategy,
}

impl ScheduleCandidate {
    /// Decodes a search vector.
    pub fn decode(x: &[f64]) -> Self {
        let bin = x[STRATEGY_DIM].max(0.0).floor() as usize;
        Self {
            work_hours: x[WORK_DIM],
            sleep_hours: x[SLEEP_DIM],
            strategy: StudyStrategy::from_index(bin),
        }
    }

    /// Search vector at the center of this candidate's strategy bin.
    pub fn encode(&self) -> [f64; DIMENSIONS] {
        [
            self.work_hours,
            self.sleep_hours,
            self.strategy.index() as f64 + 0.5,
        ]
    }

    /// Scenario simulating this schedule over every course in `course_ids`.
    pub fn to_scenario(
        &self,
        request: &OptimizationRequest,
        course_ids: impl IntoIterator<Item = u64>,
    ) -> ScenarioConfig {
        ScenarioConfig::new(request.student_id)
            .with_num_weeks(request.num_weeks)
            .with_work_hours(self.work_hours)
            .with_sleep_target(self.sleep_hours)
            .with_strategy(self.strategy)
            .with_courses(course_ids)
            .with_exam_weeks(request.exam_weeks.iter().copied())
            .with_name(format!(
                "optimized ({}, {:.1}h work, {:.1}h sleep)",
                self.strategy, self.work_hours, self.sleep_hours
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_constraints() {
        let c = OptimizationConstraints {
            max_work_hours_per_week: 60.0,
            min_sleep_hours: 6.5,
            target_min_gpa: 3.5,
        };
        let b = search_bounds(&c);
        assert_eq!(b[WORK_DIM], Bound::new(0.0, 60.0));
        assert_eq!(b[SLEEP_DIM], Bound::new(6.5, 12.0));
        assert_eq!(b[STRATEGY_DIM].width(), 3.0);
        assert_eq!(b[WORK_DIM].clip(75.0), 60.0);
    }

    #[test]
    fn test_strategy_decoding() {
        assert_eq!(ScheduleCandidate::decode(&[0.0, 7.0, 0.0]).strategy, StudyStrategy::Spaced);
        assert_eq!(ScheduleCandidate::decode(&[0.0, 7.0, 0.99]).strategy, StudyStrategy::Spaced);
        assert_eq!(ScheduleCandidate::decode(&[0.0, 7.0, 1.0]).strategy, StudyStrategy::Mixed);
        assert_eq!(ScheduleCandidate::decode(&[0.0, 7.0, 2.5]).strategy, StudyStrategy::Cramming);
        // Upper bound itself falls in the last bin.
        assert_eq!(ScheduleCandidate::decode(&[0.0, 7.0, 3.0]).strategy, StudyStrategy::Cramming);
    }

    #[test]
    fn test_encode_decode() {
        let c = ScheduleCandidate {
            work_hours: 12.0,
            sleep_hours: 7.5,
            strategy: StudyStrategy::Mixed,
        };
        assert_eq!(ScheduleCandidate::decode(&c.encode()), c);
    }

    #[test]
    fn test_to_scenario() {
        let request = OptimizationRequest::new(4).with_num_weeks(12).with_exam_weeks([6, 12]);
        let c = ScheduleCandidate {
            work_hours: 15.0,
            sleep_hours: 8.0,
            strategy: StudyStrategy::Spaced,
        };
        let s = c.to_scenario(&request, [1, 2, 3]);
        assert_eq!(s.student_id, 4);
        assert_eq!(s.num_weeks, 12);
        assert_eq!(s.include_course_ids, vec![1, 2, 3]);
        assert_eq!(s.exam_weeks, vec![6, 12]);
        assert_eq!(s.work_hours_per_week, 15.0);
        assert_eq!(s.sleep_target_hours, 8.0);
    }
}
