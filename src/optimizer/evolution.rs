//! Differential evolution loop.
//!
//! # Algorithm
//!
//! 1. Sample the population uniformly inside the bounds and evaluate it
//! 2. Per generation, build one trial per member (sequentially, from the
//!    seeded RNG), evaluate all trials (in parallel when enabled), and
//!    keep each trial that is no worse than its own parent
//! 3. Stop when the fitness spread collapses, the generation budget is
//!    spent, the wall-clock budget runs out, or the caller cancels
//!
//! Because trial construction is sequential and selection only compares a
//! trial with its parent, parallel and sequential runs with the same seed
//! return the same result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

use crate::models::Termination;

use super::operators::DeOperators;
use super::population::Population;
use super::problem::SearchProblem;

/// Smallest population the mutation operators can work with.
pub const MIN_POPULATION: usize = 4;

/// Evolution parameters.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use u_academic_twin::optimizer::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(7)
///     .with_parallel(false)
///     .with_time_budget(Duration::from_secs(5));
/// assert_eq!(config.population_for(3), 20);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    /// Fixed population size. `None` uses `population_factor × dimensions`.
    pub population_size: Option<usize>,
    pub population_factor: usize,
    pub max_generations: usize,
    /// Relative fitness-spread tolerance: stop once
    /// `std(fitness) <= tolerance × |mean(fitness)|`.
    pub tolerance: f64,
    pub seed: u64,
    /// Evaluate trial vectors on the rayon pool.
    pub parallel: bool,
    /// Wall-clock budget; the best member so far is returned when exceeded.
    pub time_budget: Duration,
    pub operators: DeOperators,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: None,
            population_factor: 10,
            max_generations: 50,
            tolerance: 0.01,
            seed: 42,
            parallel: true,
            time_budget: Duration::from_secs(30),
            operators: DeOperators::default(),
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_operators(mut self, operators: DeOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Population size used for a problem of `dims` dimensions.
    pub fn population_for(&self, dims: usize) -> usize {
        self.population_size
            .unwrap_or(self.population_factor * dims)
            .max(MIN_POPULATION)
    }
}

/// Result of an evolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    pub best: Vec<f64>,
    pub best_fitness: f64,
    /// Completed generations, not counting the initial population.
    pub generations: usize,
    pub evaluations: usize,
    pub termination: Termination,
}

/// Minimizes `problem`.
///
/// Always evaluates the initial population, so a best member exists even
/// when the budget is zero or `cancel` is already set.
pub fn evolve<P: SearchProblem>(
    problem: &P,
    config: &EvolutionConfig,
    cancel: Option<&AtomicBool>,
) -> EvolutionOutcome {
    let started = Instant::now();
    let bounds = problem.bounds();
    let dims = problem.dimensions();
    let size = config.population_for(dims);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut population = Population::random(size, bounds, &mut rng);
    let initial = evaluate_all(problem, population.vectors(), dims, config.parallel);
    population.set_all_fitness(initial);
    let mut evaluations = size;
    let mut best = population.best_index();

    let mut trials = vec![0.0; size * dims];
    let mut generations = 0;

    let termination = loop {
        if converged(&population, config.tolerance) {
            break Termination::Converged;
        }
        if generations >= config.max_generations {
            break Termination::GenerationLimit;
        }
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            break Termination::Cancelled;
        }
        if started.elapsed() >= config.time_budget {
            break Termination::Deadline;
        }

        for (i, trial) in trials.chunks_mut(dims).enumerate() {
            config
                .operators
                .trial(&population, i, best, bounds, &mut rng, trial);
        }
        let trial_fitness = evaluate_all(problem, &trials, dims, config.parallel);
        evaluations += size;

        let mut improved = 0;
        for (i, (trial, fitness)) in trials.chunks(dims).zip(&trial_fitness).enumerate() {
            if *fitness <= population.fitness(i) {
                if *fitness < population.fitness(i) {
                    improved += 1;
                }
                population.replace(i, trial, *fitness);
            }
        }
        best = population.best_index();
        generations += 1;

        debug!(
            generation = generations,
            best_fitness = population.fitness(best),
            improved,
            "generation complete"
        );
    };

    EvolutionOutcome {
        best: population.member(best).to_vec(),
        best_fitness: population.fitness(best),
        generations,
        evaluations,
        termination,
    }
}

fn evaluate_all<P: SearchProblem>(
    problem: &P,
    vectors: &[f64],
    dims: usize,
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        let mut out = Vec::with_capacity(vectors.len() / dims);
        vectors
            .par_chunks(dims)
            .map(|x| problem.evaluate(x))
            .collect_into_vec(&mut out);
        out
    } else {
        vectors.chunks(dims).map(|x| problem.evaluate(x)).collect()
    }
}

fn converged(population: &Population, tolerance: f64) -> bool {
    let (std, mean) = population.fitness_spread();
    std.is_finite() && std <= tolerance * mean.abs()
}
