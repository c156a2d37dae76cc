//! Configurable differential evolution operators.
//!
//! Provides runtime-selectable mutation and crossover strategies via
//! [`DeOperators`].
//!
//! # Usage
//!
//! ```
//! use u_academic_twin::optimizer::operators::{CrossoverType, DeOperators, MutationType};
//!
//! let ops = DeOperators::default();
//! assert_eq!(ops.mutation_type, MutationType::Rand1);
//! assert_eq!(ops.crossover_type, CrossoverType::Binomial);
//! ```
//!
//! # Reference
//! Storn & Price (1997), "Differential Evolution – A Simple and Efficient
//! Heuristic for Global Optimization over Continuous Spaces"

use rand::Rng;

use super::candidate::Bound;
use super::population::Population;

/// Donor vector construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    /// `x_r1 + F (x_r2 − x_r3)` with three distinct random members.
    Rand1,
    /// `x_best + F (x_r1 − x_r2)`.
    Best1,
}

/// Mixing of donor and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverType {
    /// Each gene from the donor with probability CR.
    Binomial,
    /// A contiguous (cyclic) run of donor genes, extended while U < CR.
    Exponential,
}

/// Runtime-selectable DE operators and their rates.
#[derive(Debug, Clone)]
pub struct DeOperators {
    pub mutation_type: MutationType,
    pub crossover_type: CrossoverType,
    /// Differential weight F.
    pub differential_weight: f64,
    /// Crossover rate CR.
    pub crossover_rate: f64,
}

impl Default for DeOperators {
    fn default() -> Self {
        Self {
            mutation_type: MutationType::Rand1,
            crossover_type: CrossoverType::Binomial,
            differential_weight: 0.7,
            crossover_rate: 0.9,
        }
    }
}

impl DeOperators {
    /// Builds the trial vector for member `target` into `trial`.
    ///
    /// Mutation, crossover, then clipping to `bounds`.
    pub fn trial<R: Rng>(
        &self,
        population: &Population,
        target: usize,
        best: usize,
        bounds: &[Bound],
        rng: &mut R,
        trial: &mut [f64],
    ) {
        self.mutate(population, target, best, rng, trial);
        self.crossover(population.member(target), rng, trial);
        for (x, b) in trial.iter_mut().zip(bounds) {
            *x = b.clip(*x);
        }
    }

    /// Writes the donor vector for `target` into `donor`.
    pub fn mutate<R: Rng>(
        &self,
        population: &Population,
        target: usize,
        best: usize,
        rng: &mut R,
        donor: &mut [f64],
    ) {
        let f = self.differential_weight;
        let [r1, r2, r3] = distinct_indices(population.len(), target, rng);
        let (base, a, b) = match self.mutation_type {
            MutationType::Rand1 => (r1, r2, r3),
            MutationType::Best1 => (best, r1, r2),
        };
        let (base, a, b) = (population.member(base), population.member(a), population.member(b));
        for d in 0..donor.len() {
            donor[d] = base[d] + f * (a[d] - b[d]);
        }
    }

    /// Mixes `target` into the donor held in `trial`, in place.
    ///
    /// At least one gene always comes from the donor.
    pub fn crossover<R: Rng>(&self, target: &[f64], rng: &mut R, trial: &mut [f64]) {
        let dims = trial.len();
        let forced = rng.random_range(0..dims);
        match self.crossover_type {
            CrossoverType::Binomial => {
                for d in 0..dims {
                    if d != forced && rng.random::<f64>() >= self.crossover_rate {
                        trial[d] = target[d];
                    }
                }
            }
            CrossoverType::Exponential => {
                let mut run = 1;
                while run < dims && rng.random::<f64>() < self.crossover_rate {
                    run += 1;
                }
                for offset in run..dims {
                    let d = (forced + offset) % dims;
                    trial[d] = target[d];
                }
            }
        }
    }
}

/// Three distinct member indices, all different from `exclude`.
///
/// Requires a population of at least four.
fn distinct_indices<R: Rng>(n: usize, exclude: usize, rng: &mut R) -> [usize; 3] {
    let mut picked = [usize::MAX; 3];
    let mut k = 0;
    while k < 3 {
        let i = rng.random_range(0..n);
        if i != exclude && !picked[..k].contains(&i) {
            picked[k] = i;
            k += 1;
        }
    }
    picked
}
