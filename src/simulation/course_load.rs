//! Per-course demand model.
//!
//! Converts a course's credits, difficulty and declared workload into:
//! - a weekly demand in study hours, used to normalize study effort
//! - a demand share, used to split the week's study hours across courses
//! - a grade sensitivity vector from the assessment weights
//!
//! # Demand
//!
//! ```text
//! demand = max(workload × difficulty / d_ref × credits / c_ref, min_demand)
//! ```
//!
//! A 3-credit course of difficulty 5 demands exactly its declared workload.

use crate::config::CourseLoadConfig;
use crate::error::{Result, TwinError};
use crate::models::Course;

/// Normalized assessment weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeSensitivity {
    pub assignments: f64,
    pub midterm: f64,
    pub final_exam: f64,
}

impl GradeSensitivity {
    /// Midterm plus final weight.
    #[inline]
    pub fn exam(&self) -> f64 {
        self.midterm + self.final_exam
    }
}

/// Load profile of one course for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDemand {
    pub course_id: u64,
    pub name: String,
    pub credits: u32,
    pub difficulty: f64,
    /// Declared weekly workload (hours).
    pub workload_hours: f64,
    /// Difficulty- and credit-scaled study hours this course needs per week.
    pub demand_hours: f64,
    /// Fraction of total demand across the run's courses.
    pub share: f64,
    /// Weekly class contact hours.
    pub contact_hours: f64,
    pub sensitivity: GradeSensitivity,
}

impl CourseDemand {
    /// Whether this course counts as hard for sequencing purposes.
    #[inline]
    pub fn is_hard(&self, threshold: f64) -> bool {
        self.difficulty > threshold
    }
}

/// Weekly demand hours of a single course.
pub fn demand_hours(course: &Course, config: &CourseLoadConfig) -> f64 {
    let scaled = course.weekly_workload_hours
        * (course.difficulty_score / config.reference_difficulty)
        * (f64::from(course.credits) / config.reference_credits);
    scaled.max(config.min_demand_hours)
}

/// Weekly class contact hours of a single course.
///
/// One hour per credit, plus a lab/recitation hour for heavy courses.
pub fn contact_hours(course: &Course, config: &CourseLoadConfig) -> f64 {
    let lab = if course.credits >= config.lab_credit_threshold {
        config.lab_hours
    } else {
        0.0
    };
    f64::from(course.credits) + lab
}

/// Normalized assessment weights of a course.
///
/// # Errors
/// `TwinError::Computation` if the weights sum to zero or are not finite.
pub fn grade_sensitivity(course: &Course) -> Result<GradeSensitivity> {
    let a = &course.assessment_structure;
    let total = a.total();
    if !total.is_finite() || total <= 0.0 {
        return Err(TwinError::computation(format!(
            "assessment weights of course '{}' sum to {total}",
            course.name
        )));
    }
    Ok(GradeSensitivity {
        assignments: a.assignments / total,
        midterm: a.midterm / total,
        final_exam: a.final_exam / total,
    })
}

/// Builds the demand profile of every course in a run, in input order.
///
/// # Errors
/// `TwinError::Computation` on degenerate assessment weights or a
/// non-finite total demand.
pub fn build_demands<'c>(
    courses: impl IntoIterator<Item = &'c Course>,
    config: &CourseLoadConfig,
) -> Result<Vec<CourseDemand>> {
    let mut demands = Vec::new();
    for course in courses {
        demands.push(CourseDemand {
            course_id: course.id,
            name: course.name.clone(),
            credits: course.credits,
            difficulty: course.difficulty_score,
            workload_hours: course.weekly_workload_hours,
            demand_hours: demand_hours(course, config),
            share: 0.0,
            contact_hours: contact_hours(course, config),
            sensitivity: grade_sensitivity(course)?,
        });
    }

    let total: f64 = demands.iter().map(|d| d.demand_hours).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(TwinError::computation(format!(
            "total course demand is {total}"
        )));
    }
    for d in &mut demands {
        d.share = d.demand_hours / total;
    }
    Ok(demands)
}
