//! Differential evolution schedule search.
//!
//! Encodes a weekly schedule as a bounded real vector
//! (work hours, nightly sleep, study strategy) and minimizes an
//! objective-specific fitness computed by simulating each candidate.
//!
//! # Components
//! - [`candidate`]: search box and vector decoding
//! - [`population`]: flat population buffer
//! - [`operators`]: mutation and crossover strategies
//! - [`problem`]: [`SearchProblem`] trait and the schedule fitness
//! - [`evolution`]: the generation loop and its budgets
//! - [`schedule`]: [`ScheduleOptimizer`], producing [`OptimizationResult`]s
//!
//! [`OptimizationResult`]: crate::models::OptimizationResult

pub mod candidate;
pub mod evolution;
pub mod operators;
pub mod population;
pub mod problem;
pub mod schedule;

pub use candidate::{Bound, DIMENSIONS, ScheduleCandidate, search_bounds};
pub use evolution::{EvolutionConfig, EvolutionOutcome, evolve};
pub use operators::{CrossoverType, DeOperators, MutationType};
pub use population::Population;
pub use problem::{ScheduleProblem, SearchProblem};
pub use schedule::ScheduleOptimizer;
