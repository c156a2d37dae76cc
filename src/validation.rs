//! Input validation for simulations and schedule searches.
//!
//! Checks run to completion and report every problem found, so a caller
//! can fix a malformed request in one pass. Detects:
//! - Out-of-range or non-finite numeric fields
//! - Empty, unknown or duplicate course selections
//! - Assessment weights that do not sum to 1.0
//! - Exam weeks outside the semester
//! - Inverted optimization bounds
//! - Inconsistent model coefficients

use std::collections::HashSet;

use crate::config::ModelConfig;
use crate::models::{Course, OptimizationRequest, ScenarioConfig, Student};

/// Shortest and longest supported semester (weeks).
pub const MIN_WEEKS: u32 = 4;
pub const MAX_WEEKS: u32 = 20;
/// Nightly sleep bounds (hours).
pub const MIN_SLEEP_HOURS: f64 = 4.0;
pub const MAX_SLEEP_HOURS: f64 = 12.0;
/// Tolerance on the assessment weight total.
pub const ASSESSMENT_TOLERANCE: f64 = 1e-3;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A numeric field is outside its documented range or not finite.
    OutOfRange,
    /// No course was selected.
    EmptyCourseSet,
    /// A selected course id is not among the student's courses.
    UnknownCourse,
    /// Two courses share an id or a name.
    DuplicateCourse,
    /// Assessment weights are negative or do not sum to 1.0.
    InvalidAssessment,
    /// An exam week lies outside the semester.
    InvalidExamWeek,
    /// A lower bound exceeds its upper bound.
    InvertedBounds,
    /// The request targets a different student.
    StudentMismatch,
    /// Model coefficients contradict each other.
    InconsistentConfig,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a student profile.
pub fn validate_student(student: &Student) -> ValidationResult {
    let mut errors = Vec::new();
    check_student(student, &mut errors);
    finish(errors)
}

/// Validates a single course.
pub fn validate_course(course: &Course) -> ValidationResult {
    let mut errors = Vec::new();
    check_course(course, &mut errors);
    finish(errors)
}

/// Validates a scenario against the student and the student's courses.
///
/// Checks:
/// 1. Scenario targets this student
/// 2. `num_weeks` in [4, 20]
/// 3. Work hours non-negative and no more than a week
/// 4. Sleep target in [4, 12]
/// 5. At least one course selected, every id known, no id selected twice
/// 6. Selected courses have distinct names and valid fields
/// 7. Exam weeks inside [1, num_weeks]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_scenario(
    scenario: &ScenarioConfig,
    student: &Student,
    courses: &[Course],
) -> ValidationResult {
    let mut errors = Vec::new();

    if scenario.student_id != student.id {
        errors.push(ValidationError::new(
            ValidationErrorKind::StudentMismatch,
            format!(
                "Scenario targets student {} but student {} was supplied",
                scenario.student_id, student.id
            ),
        ));
    }
    check_student(student, &mut errors);
    check_weeks(scenario.num_weeks, &mut errors);
    check_range(
        "work_hours_per_week",
        scenario.work_hours_per_week,
        0.0,
        168.0,
        &mut errors,
    );
    check_range(
        "sleep_target_hours",
        scenario.sleep_target_hours,
        MIN_SLEEP_HOURS,
        MAX_SLEEP_HOURS,
        &mut errors,
    );

    if scenario.include_course_ids.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCourseSet,
            "No courses selected for simulation",
        ));
    }

    let mut selected_ids = HashSet::new();
    for id in &scenario.include_course_ids {
        if !selected_ids.insert(*id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Course {id} selected more than once"),
            ));
        }
        if !courses.iter().any(|c| c.id == *id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Course {id} does not belong to student {}", student.id),
            ));
        }
    }

    let selected: Vec<&Course> = courses
        .iter()
        .filter(|c| selected_ids.contains(&c.id))
        .collect();
    check_course_set(&selected, &mut errors);

    for &week in &scenario.exam_weeks {
        if week < 1 || week > scenario.num_weeks {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidExamWeek,
                format!(
                    "Exam week {week} outside semester [1, {}]",
                    scenario.num_weeks
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates a schedule search request.
///
/// Every course of the student takes part in the search, so the course
/// list itself must be non-empty and valid.
pub fn validate_optimization_request(
    request: &OptimizationRequest,
    student: &Student,
    courses: &[Course],
) -> ValidationResult {
    let mut errors = Vec::new();
    let c = &request.constraints;

    if request.student_id != student.id {
        errors.push(ValidationError::new(
            ValidationErrorKind::StudentMismatch,
            format!(
                "Request targets student {} but student {} was supplied",
                request.student_id, student.id
            ),
        ));
    }
    check_student(student, &mut errors);
    check_weeks(request.num_weeks, &mut errors);
    check_range(
        "max_work_hours_per_week",
        c.max_work_hours_per_week,
        0.0,
        168.0,
        &mut errors,
    );
    check_range("target_min_gpa", c.target_min_gpa, 0.0, 4.0, &mut errors);

    if c.min_sleep_hours > MAX_SLEEP_HOURS {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedBounds,
            format!(
                "min_sleep_hours {} exceeds the {MAX_SLEEP_HOURS}h sleep ceiling",
                c.min_sleep_hours
            ),
        ));
    } else {
        check_range(
            "min_sleep_hours",
            c.min_sleep_hours,
            MIN_SLEEP_HOURS,
            MAX_SLEEP_HOURS,
            &mut errors,
        );
    }

    if courses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCourseSet,
            format!("Student {} has no courses to optimize over", student.id),
        ));
    }
    let all: Vec<&Course> = courses.iter().collect();
    check_course_set(&all, &mut errors);

    for &week in &request.exam_weeks {
        if week < 1 || week > request.num_weeks {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidExamWeek,
                format!(
                    "Exam week {week} outside semester [1, {}]",
                    request.num_weeks
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates model coefficients.
///
/// Checks that shares and ratios are fractions, that the study and
/// recovery shares leave room for social time, that positive rates are
/// positive, and that the hysteresis and risk bands are ordered.
pub fn validate_model_config(config: &ModelConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let t = &config.time;

    check_range(
        "baseline_sleep_hours",
        config.baseline_sleep_hours,
        MIN_SLEEP_HOURS,
        MAX_SLEEP_HOURS,
        &mut errors,
    );

    for (name, value) in [
        ("time.study_share", t.study_share),
        ("time.recovery_share", t.recovery_share),
        ("time.exam_recovery_factor", t.exam_recovery_factor),
        ("fatigue.decay", config.fatigue.decay),
        ("retention.initial_retention", config.retention.initial_retention),
        ("retention.max_weekly_gain", config.retention.max_weekly_gain),
        ("burnout.strain_persistence", config.burnout.strain_persistence),
        ("burnout.rise_rate", config.burnout.rise_rate),
        ("burnout.max_recovery_step", config.burnout.max_recovery_step),
    ] {
        check_range(name, value, 0.0, 1.0, &mut errors);
    }
    for value in t.deep_ratio.values() {
        check_range("time.deep_ratio", value, 0.0, 1.0, &mut errors);
    }

    let share_total = t.study_share + t.recovery_share;
    if share_total > 1.0 + 1e-6 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InconsistentConfig,
            format!("Study and recovery shares sum to {share_total}, leaving no social time"),
        ));
    }

    for (name, value) in [
        ("course_load.reference_difficulty", config.course_load.reference_difficulty),
        ("course_load.reference_credits", config.course_load.reference_credits),
        ("course_load.min_demand_hours", config.course_load.min_demand_hours),
        ("load.exam_multiplier", config.load.exam_multiplier),
        ("retention.review_interval_days", config.retention.review_interval_days),
        ("retention.gain_curvature", config.retention.gain_curvature),
        ("burnout.steepness", config.burnout.steepness),
        ("burnout.sleep_deficit_saturation", config.burnout.sleep_deficit_saturation),
        ("grades.base_span", config.grades.base_span),
        ("grades.ratio_steepness", config.grades.ratio_steepness),
        ("grades.max_weekly_step", config.grades.max_weekly_step),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("{name} must be positive, got {value}"),
            ));
        }
    }
    for value in config.retention.stability_days.values() {
        if !(value.is_finite() && value > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("retention.stability_days must be positive, got {value}"),
            ));
        }
    }

    check_range("grades.initial_grade", config.grades.initial_grade, 0.0, 100.0, &mut errors);
    check_range(
        "load.overload_threshold",
        config.load.overload_threshold,
        0.0,
        100.0,
        &mut errors,
    );
    if config.burnout.recovery_load_threshold >= config.load.overload_threshold {
        errors.push(ValidationError::new(
            ValidationErrorKind::InconsistentConfig,
            format!(
                "burnout.recovery_load_threshold {} must be below load.overload_threshold {}",
                config.burnout.recovery_load_threshold, config.load.overload_threshold
            ),
        ));
    }
    if config.summary.medium_risk_threshold >= config.summary.high_risk_threshold {
        errors.push(ValidationError::new(
            ValidationErrorKind::InconsistentConfig,
            format!(
                "summary.medium_risk_threshold {} must be below summary.high_risk_threshold {}",
                config.summary.medium_risk_threshold, config.summary.high_risk_threshold
            ),
        ));
    }
    let grades = &config.grades;
    if grades.base_floor < 0.0 || grades.base_floor + grades.base_span > 100.0 + 1e-9 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InconsistentConfig,
            "grades.base_floor + grades.base_span must lie within 0..=100",
        ));
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_range(name: &str, value: f64, lo: f64, hi: f64, errors: &mut Vec<ValidationError>) {
    if !value.is_finite() || value < lo || value > hi {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("{name} {value} outside [{lo}, {hi}]"),
        ));
    }
}

fn check_weeks(num_weeks: u32, errors: &mut Vec<ValidationError>) {
    if !(MIN_WEEKS..=MAX_WEEKS).contains(&num_weeks) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("num_weeks {num_weeks} outside [{MIN_WEEKS}, {MAX_WEEKS}]"),
        ));
    }
}

fn check_student(student: &Student, errors: &mut Vec<ValidationError>) {
    check_range("target_gpa", student.target_gpa, 0.0, 4.0, errors);
    if !(student.weekly_work_hours.is_finite() && student.weekly_work_hours >= 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!(
                "weekly_work_hours must be non-negative, got {}",
                student.weekly_work_hours
            ),
        ));
    }
    check_range(
        "student sleep_target_hours",
        student.sleep_target_hours,
        MIN_SLEEP_HOURS,
        MAX_SLEEP_HOURS,
        errors,
    );
}

fn check_course(course: &Course, errors: &mut Vec<ValidationError>) {
    if course.credits == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("Course '{}' has zero credits", course.name),
        ));
    }
    check_range(
        &format!("Course '{}' difficulty_score", course.name),
        course.difficulty_score,
        1.0,
        10.0,
        errors,
    );
    if !(course.weekly_workload_hours.is_finite() && course.weekly_workload_hours >= 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!(
                "Course '{}' weekly_workload_hours must be non-negative, got {}",
                course.name, course.weekly_workload_hours
            ),
        ));
    }

    let a = &course.assessment_structure;
    let weights = [a.assignments, a.midterm, a.final_exam];
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0 || *w > 1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidAssessment,
            format!("Course '{}' has an assessment weight outside [0, 1]", course.name),
        ));
    } else if (a.total() - 1.0).abs() > ASSESSMENT_TOLERANCE {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidAssessment,
            format!(
                "Course '{}' assessment weights sum to {}, expected 1.0",
                course.name,
                a.total()
            ),
        ));
    }
}

fn check_course_set(courses: &[&Course], errors: &mut Vec<ValidationError>) {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for course in courses {
        if !ids.insert(course.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if !names.insert(course.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Duplicate course name: {}", course.name),
            ));
        }
        check_course(course, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssessmentStructure;

    fn sample_student() -> Student {
        Student::new(1).with_target_gpa(3.5)
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new(1, "Data Structures")
                .with_credits(3)
                .with_difficulty(7.5)
                .with_workload(6.0),
            Course::new(2, "Calculus II")
                .with_credits(4)
                .with_difficulty(8.0)
                .with_workload(8.0),
        ]
    }

    fn sample_scenario() -> ScenarioConfig {
        ScenarioConfig::new(1)
            .with_work_hours(10.0)
            .with_courses([1, 2])
            .with_exam_weeks([8, 16])
    }

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_scenario() {
        assert!(validate_scenario(&sample_scenario(), &sample_student(), &sample_courses()).is_ok());
    }

    #[test]
    fn test_empty_course_set() {
        let scenario = sample_scenario().with_courses([]);
        let errors =
            validate_scenario(&scenario, &sample_student(), &sample_courses()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::EmptyCourseSet));
    }

    #[test]
    fn test_unknown_course() {
        let scenario = sample_scenario().with_courses([1, 99]);
        let errors =
            validate_scenario(&scenario, &sample_student(), &sample_courses()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::UnknownCourse));
    }

    #[test]
    fn test_duplicate_selection_and_names() {
        let scenario = sample_scenario().with_courses([1, 1]);
        let errors =
            validate_scenario(&scenario, &sample_student(), &sample_courses()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::DuplicateCourse));

        let courses = vec![Course::new(1, "Physics"), Course::new(2, "Physics")];
        let errors =
            validate_scenario(&sample_scenario(), &sample_student(), &courses).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateCourse && e.message.contains("name")));
    }

    #[test]
    fn test_weeks_out_of_range() {
        for weeks in [0, 3, 21] {
            let scenario = sample_scenario().with_num_weeks(weeks).with_exam_weeks([]);
            let errors =
                validate_scenario(&scenario, &sample_student(), &sample_courses()).unwrap_err();
            assert!(has_kind(&errors, ValidationErrorKind::OutOfRange));
        }
    }

    #[test]
    fn test_sleep_and_work_bounds() {
        let scenario = sample_scenario().with_sleep_target(3.0).with_work_hours(-1.0);
        let errors =
            validate_scenario(&scenario, &sample_student(), &sample_courses()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::OutOfRange)
                .count(),
            2
        );

        let scenario = sample_scenario().with_work_hours(f64::NAN);
        assert!(validate_scenario(&scenario, &sample_student(), &sample_courses()).is_err());
    }

    #[test]
    fn test_exam_week_outside_semester() {
        let scenario = sample_scenario().with_exam_weeks([0, 17]);
        let errors =
            validate_scenario(&scenario, &sample_student(), &sample_courses()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidExamWeek)
                .count(),
            2
        );
    }

    #[test]
    fn test_student_mismatch() {
        let errors =
            validate_scenario(&sample_scenario(), &Student::new(2), &sample_courses()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::StudentMismatch));
    }

    #[test]
    fn test_invalid_assessment() {
        let course = Course::new(1, "Chemistry").with_assessment(AssessmentStructure::new(0.0, 0.0, 0.0));
        let errors = validate_course(&course).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidAssessment));

        let course = Course::new(1, "Chemistry").with_assessment(AssessmentStructure::new(-0.2, 0.6, 0.6));
        assert!(validate_course(&course).is_err());
    }

    #[test]
    fn test_course_field_ranges() {
        let course = Course::new(1, "Art")
            .with_credits(0)
            .with_difficulty(11.0)
            .with_workload(-2.0);
        let errors = validate_course(&course).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_student_ranges() {
        assert!(validate_student(&sample_student()).is_ok());
        let s = Student::new(1).with_target_gpa(4.5).with_sleep_target_hours(13.0);
        assert_eq!(validate_student(&s).unwrap_err().len(), 2);
    }

    #[test]
    fn test_optimization_request() {
        let req = OptimizationRequest::new(1);
        assert!(validate_optimization_request(&req, &sample_student(), &sample_courses()).is_ok());

        let req = OptimizationRequest::new(1).with_min_sleep_hours(13.0);
        let errors =
            validate_optimization_request(&req, &sample_student(), &sample_courses()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvertedBounds));

        let errors = validate_optimization_request(&OptimizationRequest::new(1), &sample_student(), &[])
            .unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::EmptyCourseSet));
    }

    #[test]
    fn test_multiple_errors() {
        let scenario = ScenarioConfig::new(1).with_num_weeks(2).with_exam_weeks([5]);
        let errors = validate_scenario(&scenario, &sample_student(), &[]).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_default_model_config_is_valid() {
        assert!(validate_model_config(&ModelConfig::default()).is_ok());
    }

    #[test]
    fn test_model_config_inconsistencies() {
        let mut config = ModelConfig::default();
        config.time.study_share = 0.8;
        config.burnout.recovery_load_threshold = 80.0;
        config.summary.medium_risk_threshold = 0.7;
        config.load.exam_multiplier = 0.0;

        let errors = validate_model_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InconsistentConfig)
                .count(),
            3
        );
        assert!(has_kind(&errors, ValidationErrorKind::OutOfRange));
    }

    #[test]
    fn test_study_and_recovery_may_leave_social_time() {
        let mut config = ModelConfig::default();
        config.time.study_share = 0.5;
        config.time.recovery_share = 0.5;
        assert!(validate_model_config(&config).is_ok());

        config.time.recovery_share = 0.6;
        config.time.study_share = 0.45;
        let errors = validate_model_config(&config).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InconsistentConfig));
    }

    #[test]
    fn test_grade_curve_bounds() {
        let mut config = ModelConfig::default();
        config.grades.base_floor = 50.0;
        config.grades.initial_grade = 120.0;
        let errors = validate_model_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_kind(&errors, ValidationErrorKind::InconsistentConfig));
        assert!(has_kind(&errors, ValidationErrorKind::OutOfRange));
    }
}
