//! Weekly academic state simulation.
//!
//! # Pipeline
//!
//! ```text
//! ScenarioConfig + Student + Courses
//!     → course_load (demand per course)
//!     → time_budget (168-hour allocation per week)
//!     → stepper (state t → t+1), driven by runner
//!     → summary (SimulationSummary)
//! ```
//!
//! # Example
//!
//! ```
//! use u_academic_twin::config::ModelConfig;
//! use u_academic_twin::models::{Course, ScenarioConfig, Student};
//! use u_academic_twin::simulation::SimulationRunner;
//!
//! let student = Student::new(1).with_target_gpa(3.5);
//! let courses = vec![
//!     Course::new(1, "Algorithms").with_credits(3).with_workload(6.0),
//!     Course::new(2, "Physics").with_credits(4).with_difficulty(8.0).with_workload(8.0),
//! ];
//! let scenario = ScenarioConfig::for_student(&student)
//!     .with_work_hours(10.0)
//!     .with_courses([1, 2])
//!     .with_exam_weeks([8, 16]);
//!
//! let config = ModelConfig::default();
//! let result = SimulationRunner::new(&config).run(&scenario, &student, &courses).unwrap();
//! assert_eq!(result.weekly_snapshots.len(), 16);
//! ```

pub mod course_load;
pub mod runner;
pub mod stepper;
pub mod summary;
pub mod time_budget;

pub use course_load::{CourseDemand, GradeSensitivity};
pub use runner::{SimulationRunner, Trajectory};
pub use stepper::{WeekState, WeeklyStateStepper, grade_points};
pub use summary::{SummaryAggregator, classify_risk};
pub use time_budget::{HOURS_PER_WEEK, TimeBudgetAllocator};
