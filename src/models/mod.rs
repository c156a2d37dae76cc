//! Academic domain models.
//!
//! Inputs (`Student`, `Course`, `ScenarioConfig`, `OptimizationRequest`)
//! and outputs (`WeeklySnapshot`, `SimulationResult`, `OptimizationResult`)
//! of the engine. Field names match the JSON contract consumed by the
//! presentation layer.
//!
//! | Model | Role |
//! |-------|------|
//! | Student | Profile, owned externally |
//! | Course | Enrolled course with assessment weights |
//! | ScenarioConfig | Proposed weekly schedule |
//! | WeeklySnapshot | State after one simulated week |
//! | SimulationResult | Trajectory plus summary |
//! | OptimizationResult | Best schedule plus its simulation |

mod course;
mod optimization;
mod result;
mod scenario;
mod snapshot;
mod student;

pub use course::{AssessmentStructure, Course};
pub use optimization::{
    Objective, OptimizationConstraints, OptimizationRequest, OptimizationResult, SearchReport,
    Termination,
};
pub use result::{BurnoutRisk, SimulationResult, SimulationSummary};
pub use scenario::{ScenarioConfig, StudyStrategy};
pub use snapshot::{TimeAllocation, WeeklySnapshot};
pub use student::Student;
