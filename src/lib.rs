//! Academic digital twin.
//!
//! Simulates a student's semester week by week from a proposed schedule
//! (courses, job hours, sleep, study strategy) and predicts cognitive
//! load, fatigue, retention, per-course grades, GPA and burnout risk. A
//! differential evolution search looks for the schedule that best serves
//! a chosen objective under hard limits.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Course`, `ScenarioConfig`,
//!   `WeeklySnapshot`, `SimulationResult`, `OptimizationRequest`,
//!   `OptimizationResult`
//! - **`config`**: Tunable model coefficients, loadable from TOML
//! - **`validation`**: Input and configuration integrity checks
//! - **`simulation`**: Time budget, course load, weekly stepper, runner
//!   and summary
//! - **`optimizer`**: Schedule search by differential evolution
//! - **`store`**: Persistence of simulation results
//! - **`service`**: `AcademicTwin`, the facade over all of the above
//!
//! # Architecture
//!
//! The engine is pure and synchronous. A simulation is a deterministic
//! function of its inputs and [`ModelConfig`]; only the optimizer draws
//! random numbers, from a seeded generator. Persistence is confined to
//! [`ResultStore`] implementations.
//!
//! # References
//!
//! - Ebbinghaus (1885), "Über das Gedächtnis" (forgetting curve)
//! - Cepeda et al. (2006), "Distributed practice in verbal recall tasks"
//! - Storn & Price (1997), "Differential Evolution: A Simple and Efficient
//!   Heuristic for Global Optimization over Continuous Spaces"

pub mod config;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod service;
pub mod simulation;
pub mod store;
pub mod validation;

pub use config::ModelConfig;
pub use error::{Result, TwinError};
pub use service::AcademicTwin;
pub use store::{InMemoryResultStore, Page, ResultStore};
