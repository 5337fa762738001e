//! The generation loop.
//!
//! [`GaRunner`] orchestrates one run: sample the initial population, then
//! per generation evaluate → select → crossover → mutate → replace →
//! record. The loop is strictly sequential; the only external call is the
//! fitness function, invoked exactly once per generation with the whole
//! population so the caller can vectorize it internally.

use crate::config::GaConfig;
use crate::error::{Error, Result};
use crate::mutation;
use crate::params::{Genome, ParameterSet};
use itertools::Itertools;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Best-of-generation snapshot, one per generation. Append-only: records
/// are never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRecord {
    /// Generation index, starting at 0.
    pub generation: usize,
    /// Maximum fitness observed in this generation.
    pub best_fitness: f64,
    /// The individual that achieved it.
    pub best: Genome,
}

/// Result of a run: the full per-generation history.
#[derive(Debug, Clone, Serialize)]
pub struct GaResult {
    /// One record per completed generation, in order.
    pub history: Vec<GenerationRecord>,
    /// Whether the run was cancelled at a generation boundary.
    pub cancelled: bool,
}

impl GaResult {
    /// The record with the highest best-fitness (earliest on ties), or
    /// `None` for a zero-generation run.
    pub fn best(&self) -> Option<&GenerationRecord> {
        let mut best: Option<&GenerationRecord> = None;
        for record in &self.history {
            match best {
                Some(b) if record.best_fitness <= b.best_fitness => {}
                _ => best = Some(record),
            }
        }
        best
    }

    /// Number of generations that actually ran.
    pub fn generations(&self) -> usize {
        self.history.len()
    }
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use evoparam::{GaConfig, GaRunner, Parameter, ParameterKind, ParameterSet};
///
/// let params = ParameterSet::new(vec![
///     Parameter::new("x", -5.0, 5.0, ParameterKind::Continuous).unwrap(),
///     Parameter::new("y", -5.0, 5.0, ParameterKind::Continuous).unwrap(),
/// ]).unwrap();
/// let config = GaConfig::default().with_generations(10).with_seed(42);
///
/// // Maximize -(x² + y²)
/// let result = GaRunner::run(&params, &config, |pop| {
///     pop.iter().map(|g| -(g[0] * g[0] + g[1] * g[1])).collect()
/// }).unwrap();
/// assert_eq!(result.generations(), 10);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA to completion.
    ///
    /// `fitness_fn` is called once per generation with the whole
    /// population and must return exactly `population_size` finite scores
    /// in row order; higher is better. Any contract violation or operator
    /// failure aborts the run.
    pub fn run<F>(params: &ParameterSet, config: &GaConfig, fitness_fn: F) -> Result<GaResult>
    where
        F: FnMut(&[Genome]) -> Vec<f64>,
    {
        Self::run_with_cancel(params, config, fitness_fn, None)
    }

    /// Runs the GA with an optional cancellation flag.
    ///
    /// The flag is checked only at generation boundaries — a generation
    /// either fully completes or never starts, so the population invariant
    /// holds in the returned history either way.
    pub fn run_with_cancel<F>(
        params: &ParameterSet,
        config: &GaConfig,
        mut fitness_fn: F,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult>
    where
        F: FnMut(&[Genome]) -> Vec<f64>,
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut population = params.generate_population(&mut rng, config.population_size);
        let mut history = Vec::with_capacity(config.generations);
        let mut cancelled = false;

        for generation in 0..config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // 1. Evaluate the whole population in one batched call.
            let fitness = fitness_fn(&population);
            check_fitness_contract(&fitness, config.population_size)?;

            // 2. Fitness-proportional selection, each selected row still
            //    paired with its original score.
            let (selected_fitness, selected) = proportional_select(
                &mut rng,
                &population,
                &fitness,
                config.number_best_candidates,
            );
            trace!(
                "generation {generation}: selected {} candidates, mean fitness {:.6}",
                selected.len(),
                selected_fitness.iter().sum::<f64>() / selected_fitness.len() as f64
            );

            // 3. Crossover over every unordered pair of selected rows.
            let mut pool = recombine(
                &mut rng,
                selected,
                config.crossover_rate,
                params.len(),
            )?;

            // 4. Mutation, in place.
            mutation::full_range(&mut rng, &mut pool, config.mutation_rate, params);

            // 5. Replacement: best of the current generation always
            //    survives in slot 0.
            let (best_idx, best_fitness) = argmax(&fitness);
            let best = population[best_idx].clone();
            population = replace(&mut rng, &population, best.clone(), pool, config.population_size);
            debug_assert_eq!(population.len(), config.population_size);

            debug!("generation {generation}: best fitness {best_fitness:.6}");

            // 6. Record best-of-generation.
            history.push(GenerationRecord {
                generation,
                best_fitness,
                best,
            });
        }

        Ok(GaResult { history, cancelled })
    }
}

/// Verify the fitness callback contract: one finite score per individual.
fn check_fitness_contract(fitness: &[f64], pop_size: usize) -> Result<()> {
    if fitness.len() != pop_size {
        return Err(Error::FitnessContract(format!(
            "expected {pop_size} scores, got {}",
            fitness.len()
        )));
    }
    if let Some((i, f)) = fitness
        .iter()
        .enumerate()
        .find(|(_, f)| !f.is_finite())
    {
        return Err(Error::FitnessContract(format!(
            "non-finite score {f} at index {i}"
        )));
    }
    Ok(())
}

/// Draw `n` individuals with replacement, probability proportional to
/// fitness after shifting every score by `-min` into the non-negative
/// range. When the shifted scores sum to zero every individual is tied,
/// and selection falls back to uniform random draws instead of dividing
/// by zero.
fn proportional_select<R: Rng>(
    rng: &mut R,
    population: &[Genome],
    fitness: &[f64],
    n: usize,
) -> (Vec<f64>, Vec<Genome>) {
    let min = fitness.iter().cloned().fold(f64::INFINITY, f64::min);
    let shifted: Vec<f64> = fitness.iter().map(|f| f - min).collect();
    let total: f64 = shifted.iter().sum();

    let mut selected_fitness = Vec::with_capacity(n);
    let mut selected = Vec::with_capacity(n);
    for _ in 0..n {
        let idx = if total > 0.0 {
            let coin: f64 = rng.random_range(0.0..total);
            let mut acc = 0.0;
            shifted
                .iter()
                .position(|&s| {
                    acc += s;
                    acc >= coin
                })
                .unwrap_or(population.len() - 1)
        } else {
            rng.random_range(0..population.len())
        };
        selected_fitness.push(fitness[idx]);
        selected.push(population[idx].clone());
    }
    (selected_fitness, selected)
}

/// For every unordered pair of pool members, with probability `p_cross`
/// produce one offspring (head of the first parent, tail of the second,
/// cut uniform in `[1, n_params)`) and append it to the pool.
fn recombine<R: Rng>(
    rng: &mut R,
    mut pool: Vec<Genome>,
    p_cross: f64,
    n_params: usize,
) -> Result<Vec<Genome>> {
    if p_cross > 0.0 && pool.len() > 1 && n_params < 2 {
        return Err(Error::InvalidOperation(
            "crossover needs at least 2 parameters".into(),
        ));
    }

    let mut offspring = Vec::new();
    for (j, k) in (0..pool.len()).tuple_combinations::<(usize, usize)>() {
        if rng.random_range(0.0..1.0) < p_cross {
            let cut = rng.random_range(1..n_params);
            let mut child = pool[j].clone();
            child[cut..].copy_from_slice(&pool[k][cut..]);
            offspring.push(child);
        }
    }
    pool.extend(offspring);
    Ok(pool)
}

/// Fill the next generation. Slot 0 always holds the best individual of
/// the current generation. A pool larger than the remaining slots is
/// sampled with replacement; a smaller pool is kept whole and the
/// remainder backfilled from the pre-generation population.
fn replace<R: Rng>(
    rng: &mut R,
    current: &[Genome],
    best: Genome,
    pool: Vec<Genome>,
    pop_size: usize,
) -> Vec<Genome> {
    let mut next = Vec::with_capacity(pop_size);
    next.push(best);

    if pool.len() > pop_size - 1 {
        for _ in 0..pop_size - 1 {
            next.push(pool[rng.random_range(0..pool.len())].clone());
        }
    } else {
        let backfill = pop_size - 1 - pool.len();
        next.extend(pool);
        for _ in 0..backfill {
            next.push(current[rng.random_range(0..current.len())].clone());
        }
    }
    next
}

/// Index and value of the maximum score; earliest index on ties.
fn argmax(fitness: &[f64]) -> (usize, f64) {
    let mut best_idx = 0;
    for (i, &f) in fitness.iter().enumerate() {
        if f > fitness[best_idx] {
            best_idx = i;
        }
    }
    (best_idx, fitness[best_idx])
}
