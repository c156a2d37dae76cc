//! Fixed-size population buffer.
//!
//! Members are stored row-major in one flat `Vec<f64>`, so a generation
//! reuses the same allocation and members are addressed by index.

use rand::Rng;

use super::candidate::Bound;

#[derive(Debug, Clone)]
pub struct Population {
    dims: usize,
    vectors: Vec<f64>,
    fitness: Vec<f64>,
}

impl Population {
    /// Samples `size` members uniformly inside `bounds`.
    pub fn random<R: Rng>(size: usize, bounds: &[Bound], rng: &mut R) -> Self {
        let dims = bounds.len();
        let mut vectors = Vec::with_capacity(size * dims);
        for _ in 0..size {
            for b in bounds {
                vectors.push(b.lower + rng.random::<f64>() * b.width());
            }
        }
        Self {
            dims,
            vectors,
            fitness: vec![f64::INFINITY; size],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fitness.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fitness.is_empty()
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    #[inline]
    pub fn member(&self, i: usize) -> &[f64] {
        &self.vectors[i * self.dims..(i + 1) * self.dims]
    }

    #[inline]
    pub fn fitness(&self, i: usize) -> f64 {
        self.fitness[i]
    }

    /// All member vectors, row-major.
    pub fn vectors(&self) -> &[f64] {
        &self.vectors
    }

    pub fn set_all_fitness(&mut self, fitness: Vec<f64>) {
        debug_assert_eq!(fitness.len(), self.len());
        self.fitness = fitness;
    }

    /// Replaces member `i`.
    pub fn replace(&mut self, i: usize, vector: &[f64], fitness: f64) {
        self.vectors[i * self.dims..(i + 1) * self.dims].copy_from_slice(vector);
        self.fitness[i] = fitness;
    }

    /// Index of the lowest fitness; ties keep the lowest index.
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        for i in 1..self.len() {
            if self.fitness[i] < self.fitness[best] {
                best = i;
            }
        }
        best
    }

    /// Standard deviation and mean of the fitness values.
    pub fn fitness_spread(&self) -> (f64, f64) {
        let n = self.len() as f64;
        let mean = self.fitness.iter().sum::<f64>() / n;
        let var = self.fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
        (var.sqrt(), mean)
    }
}
