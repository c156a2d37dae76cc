//! Course model.
//!
//! A student owns many courses; a scenario selects a subset by id.

use serde::{Deserialize, Serialize};

/// Grade weights of a course's assessment components.
///
/// Valid structures have every weight in `[0, 1]` and a total of 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentStructure {
    /// Coursework (assignments, quizzes, labs).
    pub assignments: f64,
    pub midterm: f64,
    /// Final exam weight (`final` on the wire).
    #[serde(rename = "final")]
    pub final_exam: f64,
}

impl Default for AssessmentStructure {
    fn default() -> Self {
        Self {
            assignments: 0.30,
            midterm: 0.30,
            final_exam: 0.40,
        }
    }
}

impl AssessmentStructure {
    pub fn new(assignments: f64, midterm: f64, final_exam: f64) -> Self {
        Self {
            assignments,
            midterm,
            final_exam,
        }
    }

    /// Sum of all weights.
    #[inline]
    pub fn total(&self) -> f64 {
        self.assignments + self.midterm + self.final_exam
    }

    /// Weight carried by exams (midterm + final).
    #[inline]
    pub fn exam_weight(&self) -> f64 {
        self.midterm + self.final_exam
    }
}

/// An enrolled course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: u64,
    /// Course name. Keys the per-course maps in weekly snapshots.
    pub name: String,
    /// Credit hours (positive).
    pub credits: u32,
    /// Perceived difficulty (1.0..=10.0).
    pub difficulty_score: f64,
    /// Declared out-of-class workload (hours per week).
    pub weekly_workload_hours: f64,
    #[serde(default)]
    pub assessment_structure: AssessmentStructure,
}

impl Course {
    /// Creates a 3-credit course of medium difficulty and 3h weekly workload.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            credits: 3,
            difficulty_score: 5.0,
            weekly_workload_hours: 3.0,
            assessment_structure: AssessmentStructure::default(),
        }
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty_score = difficulty;
        self
    }

    pub fn with_workload(mut self, hours: f64) -> Self {
        self.weekly_workload_hours = hours;
        self
    }

    pub fn with_assessment(mut self, assessment: AssessmentStructure) -> Self {
        self.assessment_structure = assessment;
        self
    }
}
