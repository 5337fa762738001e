//! Selection operators.
//!
//! All operators share one contract: they take the current
//! `(population, fitness)` pair plus the list of individuals already chosen
//! for the next generation, and return that list extended by `n` newly
//! chosen individuals. Every appended individual is a full copy — nothing
//! aliases into `population`.
//!
//! Fitness here is maximized: higher is better.

use crate::error::{Error, Result};
use crate::params::Genome;
use rand::Rng;

/// Appends the first `n` individuals of `population` to `new_individuals`.
///
/// The caller guarantees `population` is sorted by descending fitness;
/// this operator performs no sorting itself. The fitness slice is part of
/// the shared operator contract but is not consulted here.
///
/// Fails with [`Error::InvalidOperation`] when `n` exceeds the population.
pub fn elitism(
    population: &[Genome],
    _fitness: &[f64],
    mut new_individuals: Vec<Genome>,
    n: usize,
) -> Result<Vec<Genome>> {
    if n > population.len() {
        return Err(Error::InvalidOperation(format!(
            "elitism requested {n} individuals from a population of {}",
            population.len()
        )));
    }
    new_individuals.extend(population[..n].iter().cloned());
    Ok(new_individuals)
}

/// Fitness-proportional (roulette-wheel) selection.
///
/// Builds a cumulative-probability vector `cumsum(fitness) / sum(fitness)`,
/// draws `n` independent uniform(0,1) samples, and for each draw selects
/// the first index whose cumulative probability meets or exceeds it.
///
/// Requires `sum(fitness) > 0`. Shifting negative fitness into the
/// non-negative range is the engine's responsibility, not this operator's;
/// a non-positive sum fails with [`Error::FitnessContract`].
pub fn roulette_wheel<R: Rng>(
    rng: &mut R,
    population: &[Genome],
    fitness: &[f64],
    mut new_individuals: Vec<Genome>,
    n: usize,
) -> Result<Vec<Genome>> {
    debug_assert_eq!(population.len(), fitness.len());

    let total: f64 = fitness.iter().sum();
    if total <= 0.0 {
        return Err(Error::FitnessContract(format!(
            "roulette-wheel selection needs sum(fitness) > 0, got {total}"
        )));
    }

    let mut cumulative = Vec::with_capacity(fitness.len());
    let mut acc = 0.0;
    for &f in fitness {
        acc += f;
        cumulative.push(acc / total);
    }

    for _ in 0..n {
        let coin: f64 = rng.random_range(0.0..1.0);
        let idx = cumulative
            .iter()
            .position(|&c| c >= coin)
            .unwrap_or(population.len() - 1); // floating-point tail
        new_individuals.push(population[idx].clone());
    }
    Ok(new_individuals)
}
