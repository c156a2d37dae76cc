//! Scenario configuration: the schedule a simulation run evaluates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Student;

/// How a student distributes study effort over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyStrategy {
    /// Regular deep sessions spread across the term.
    #[default]
    Spaced,
    /// Fixed blend of deep and shallow study.
    Mixed,
    /// Shallow bursts concentrated around exams.
    Cramming,
}

impl StudyStrategy {
    /// All strategies in index order.
    pub const ALL: [StudyStrategy; 3] = [Self::Spaced, Self::Mixed, Self::Cramming];

    /// Position in [`StudyStrategy::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Spaced => 0,
            Self::Mixed => 1,
            Self::Cramming => 2,
        }
    }

    /// Strategy at `index`, saturating at the last variant.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spaced => "spaced",
            Self::Mixed => "mixed",
            Self::Cramming => "cramming",
        }
    }
}

impl fmt::Display for StudyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed semester schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub student_id: u64,
    /// Semester length (4..=20 weeks).
    pub num_weeks: u32,
    pub work_hours_per_week: f64,
    /// Nightly sleep target (hours).
    pub sleep_target_hours: f64,
    pub study_strategy: StudyStrategy,
    /// Courses (by id) included in this run. Must be non-empty.
    pub include_course_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
    /// 1-based exam weeks.
    #[serde(default)]
    pub exam_weeks: Vec<u32>,
}

impl ScenarioConfig {
    /// Creates a 16-week spaced-study scenario with no job and 7h of sleep.
    pub fn new(student_id: u64) -> Self {
        Self {
            student_id,
            num_weeks: 16,
            work_hours_per_week: 0.0,
            sleep_target_hours: 7.0,
            study_strategy: StudyStrategy::Spaced,
            include_course_ids: Vec::new(),
            scenario_name: None,
            exam_weeks: Vec::new(),
        }
    }

    /// Creates a scenario seeded from the student's profile.
    pub fn for_student(student: &Student) -> Self {
        Self::new(student.id)
            .with_work_hours(student.weekly_work_hours)
            .with_sleep_target(student.sleep_target_hours)
    }

    pub fn with_num_weeks(mut self, weeks: u32) -> Self {
        self.num_weeks = weeks;
        self
    }

    pub fn with_work_hours(mut self, hours: f64) -> Self {
        self.work_hours_per_week = hours;
        self
    }

    pub fn with_sleep_target(mut self, hours: f64) -> Self {
        self.sleep_target_hours = hours;
        self
    }

    pub fn with_strategy(mut self, strategy: StudyStrategy) -> Self {
        self.study_strategy = strategy;
        self
    }

    pub fn with_courses(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.include_course_ids = ids.into_iter().collect();
        self
    }

    pub fn with_exam_weeks(mut self, weeks: impl IntoIterator<Item = u32>) -> Self {
        self.exam_weeks = weeks.into_iter().collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.scenario_name = Some(name.into());
        self
    }

    /// Whether `week` is an exam week.
    pub fn is_exam_week(&self, week: u32) -> bool {
        self.exam_weeks.contains(&week)
    }

    /// Weeks from `week` to the next exam at or after it (0 during an exam week).
    pub fn weeks_until_exam(&self, week: u32) -> Option<u32> {
        self.exam_weeks
            .iter()
            .filter(|&&e| e >= week)
            .map(|&e| e - week)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_index_roundtrip() {
        for s in StudyStrategy::ALL {
            assert_eq!(StudyStrategy::from_index(s.index()), s);
        }
        assert_eq!(StudyStrategy::from_index(17), StudyStrategy::Cramming);
    }

    #[test]
    fn test_strategy_wire_names() {
        assert_eq!(serde_json::to_string(&StudyStrategy::Cramming).unwrap(), "\"cramming\"");
        let s: StudyStrategy = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(s, StudyStrategy::Mixed);
        assert_eq!(StudyStrategy::Spaced.to_string(), "spaced");
    }

    #[test]
    fn test_scenario_builder() {
        let config = ScenarioConfig::new(1)
            .with_num_weeks(12)
            .with_work_hours(15.0)
            .with_sleep_target(6.5)
            .with_strategy(StudyStrategy::Mixed)
            .with_courses([1, 2])
            .with_exam_weeks([6, 12])
            .with_name("part-time job");

        assert_eq!(config.num_weeks, 12);
        assert_eq!(config.include_course_ids, vec![1, 2]);
        assert_eq!(config.scenario_name.as_deref(), Some("part-time job"));
        assert!(config.is_exam_week(6));
        assert!(!config.is_exam_week(7));
    }

    #[test]
    fn test_for_student_copies_profile() {
        let student = Student::new(4)
            .with_weekly_work_hours(12.0)
            .with_sleep_target_hours(8.0);
        let config = ScenarioConfig::for_student(&student);
        assert_eq!(config.student_id, 4);
        assert_eq!(config.work_hours_per_week, 12.0);
        assert_eq!(config.sleep_target_hours, 8.0);
    }

    #[test]
    fn test_weeks_until_exam() {
        let config = ScenarioConfig::new(1).with_exam_weeks([8, 16]);
        assert_eq!(config.weeks_until_exam(1), Some(7));
        assert_eq!(config.weeks_until_exam(8), Some(0));
        assert_eq!(config.weeks_until_exam(9), Some(7));
        assert_eq!(config.weeks_until_exam(17), None);
        assert_eq!(ScenarioConfig::new(1).weeks_until_exam(3), None);
    }

    #[test]
    fn test_exam_weeks_default_when_absent() {
        let config: ScenarioConfig = serde_json::from_str(
            r#"{"student_id":1,"num_weeks":16,"work_hours_per_week":10.0,
                "sleep_target_hours":7.0,"study_strategy":"spaced","include_course_ids":[1]}"#,
        )
        .unwrap();
        assert!(config.exam_weeks.is_empty());
        assert!(config.scenario_name.is_none());
    }
}
