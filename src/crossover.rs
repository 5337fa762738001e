//! Crossover operators.
//!
//! Shared contract: the operator receives the previous generation plus the
//! list of individuals already produced for the next one, and returns that
//! list extended by exactly `n` offspring. When `new_individuals` already
//! holds more than one individual, parents are drawn from it (in-generation
//! recombination); otherwise they are drawn from `population`
//! (cross-generation recombination). Inputs are never mutated.

use crate::error::{Error, Result};
use crate::params::Genome;
use rand::Rng;

/// Single-point crossover.
///
/// For each offspring: two parent indices drawn uniformly with
/// replacement, a cut column drawn uniformly in `[1, n_params)`, a 50%
/// coin to swap the parents' roles, then
/// `offspring = parent1[..cut] ++ parent2[cut..]`.
///
/// Fails with [`Error::InvalidOperation`] on a single-dimension genome,
/// where no interior cut point exists.
pub fn single_point<R: Rng>(
    rng: &mut R,
    population: &[Genome],
    mut new_individuals: Vec<Genome>,
    n: usize,
) -> Result<Vec<Genome>> {
    if n == 0 {
        return Ok(new_individuals);
    }
    let pool = parent_pool(population, &new_individuals)?;
    let n_params = pool[0].len();
    if n_params < 2 {
        return Err(Error::InvalidOperation(
            "single-point crossover needs at least 2 parameters".into(),
        ));
    }

    let mut offspring = Vec::with_capacity(n);
    for _ in 0..n {
        let mut i1 = rng.random_range(0..pool.len());
        let mut i2 = rng.random_range(0..pool.len());
        let cut = rng.random_range(1..n_params);
        if rng.random_bool(0.5) {
            std::mem::swap(&mut i1, &mut i2);
        }
        offspring.push(splice(&pool[i1], &pool[i2], cut));
    }

    new_individuals.extend(offspring);
    Ok(new_individuals)
}

/// Two-point crossover.
///
/// As [`single_point`], but with two distinct cut columns `c1 < c2`
/// (resampled until distinct):
/// `offspring = parent1[..c1] ++ parent2[c1..c2] ++ parent1[c2..]`.
///
/// Needs at least 3 parameters — with fewer there are no two distinct
/// interior cut points.
pub fn two_point<R: Rng>(
    rng: &mut R,
    population: &[Genome],
    mut new_individuals: Vec<Genome>,
    n: usize,
) -> Result<Vec<Genome>> {
    if n == 0 {
        return Ok(new_individuals);
    }
    let pool = parent_pool(population, &new_individuals)?;
    let n_params = pool[0].len();
    if n_params < 3 {
        return Err(Error::InvalidOperation(
            "two-point crossover needs at least 3 parameters".into(),
        ));
    }

    let mut offspring = Vec::with_capacity(n);
    for _ in 0..n {
        let mut i1 = rng.random_range(0..pool.len());
        let mut i2 = rng.random_range(0..pool.len());
        let mut c1 = rng.random_range(1..n_params);
        let mut c2 = rng.random_range(1..n_params);
        while c1 == c2 {
            c2 = rng.random_range(1..n_params);
        }
        if c1 > c2 {
            std::mem::swap(&mut c1, &mut c2);
        }
        if rng.random_bool(0.5) {
            std::mem::swap(&mut i1, &mut i2);
        }

        let (p1, p2) = (&pool[i1], &pool[i2]);
        let mut child = Vec::with_capacity(n_params);
        child.extend_from_slice(&p1[..c1]);
        child.extend_from_slice(&p2[c1..c2]);
        child.extend_from_slice(&p1[c2..]);
        offspring.push(child);
    }

    new_individuals.extend(offspring);
    Ok(new_individuals)
}

/// Pick the parent pool: the freshly produced individuals when more than
/// one exists, otherwise the previous generation.
fn parent_pool<'a>(
    population: &'a [Genome],
    new_individuals: &'a [Genome],
) -> Result<&'a [Genome]> {
    let pool = if new_individuals.len() > 1 {
        new_individuals
    } else {
        population
    };
    if pool.is_empty() {
        return Err(Error::InvalidOperation(
            "crossover needs a non-empty parent pool".into(),
        ));
    }
    Ok(pool)
}

fn splice(p1: &Genome, p2: &Genome, cut: usize) -> Genome {
    let mut child = Vec::with_capacity(p1.len());
    child.extend_from_slice(&p1[..cut]);
    child.extend_from_slice(&p2[cut..]);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    // Two maximally distinguishable parents: offspring structure is then
    // visible directly in the cell values.
    fn zeros_ones(n_params: usize) -> Vec<Genome> {
        vec![vec![0.0; n_params], vec![1.0; n_params]]
    }

    /// Number of adjacent cell pairs with different values.
    fn transitions(genome: &[f64]) -> usize {
        genome.windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn test_single_point_structure() {
        let pop = zeros_ones(6);
        let mut rng = rng(42);
        let out = single_point(&mut rng, &pop, Vec::new(), 200).unwrap();
        assert_eq!(out.len(), 200);
        for child in &out {
            assert_eq!(child.len(), 6);
            // Head from one parent, tail from the other: at most one
            // transition, and the cut is interior so identical-parent
            // children only occur when both indices hit the same parent.
            assert!(transitions(child) <= 1, "not a single splice: {child:?}");
        }
        // Both orientations (0s-then-1s and 1s-then-0s) must occur.
        assert!(out.iter().any(|c| c[0] == 0.0 && c[5] == 1.0));
        assert!(out.iter().any(|c| c[0] == 1.0 && c[5] == 0.0));
    }

    #[test]
    fn test_two_point_structure() {
        let pop = zeros_ones(8);
        let mut rng = rng(42);
        let out = two_point(&mut rng, &pop, Vec::new(), 200).unwrap();
        for child in &out {
            assert_eq!(child.len(), 8);
            // Outer segments from parent1, inner from parent2: the first
            // and last cells always agree, with at most one contiguous
            // swapped segment in between.
            assert_eq!(child[0], child[7], "outer cells must match: {child:?}");
            assert!(transitions(child) <= 2, "not a two-cut splice: {child:?}");
        }
        // When the parents differ the swapped segment is visible.
        assert!(out.iter().any(|c| transitions(c) == 2));
    }

    #[test]
    fn test_single_dimension_fails() {
        let pop = zeros_ones(1);
        let mut rng = rng(42);
        let err = single_point(&mut rng, &pop, Vec::new(), 1);
        assert!(matches!(err, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_two_point_needs_three_params() {
        let pop = zeros_ones(2);
        let mut rng = rng(42);
        let err = two_point(&mut rng, &pop, Vec::new(), 1);
        assert!(matches!(err, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_zero_offspring_is_noop() {
        let pop = zeros_ones(1); // would fail if offspring were requested
        let mut rng = rng(42);
        let existing = vec![vec![7.0]];
        let out = single_point(&mut rng, &pop, existing.clone(), 0).unwrap();
        assert_eq!(out, existing);
    }

    #[test]
    fn test_pool_prefers_new_individuals() {
        // Previous generation holds 0/1 markers; the already-selected pool
        // holds 2/3 markers. With more than one new individual, parents
        // must come from the latter.
        let pop = zeros_ones(4);
        let new_ind = vec![vec![2.0; 4], vec![3.0; 4]];
        let mut rng = rng(42);
        let out = single_point(&mut rng, &pop, new_ind, 50).unwrap();
        for child in &out[2..] {
            assert!(
                child.iter().all(|&v| v == 2.0 || v == 3.0),
                "offspring drew from the wrong pool: {child:?}"
            );
        }
    }

    #[test]
    fn test_single_new_individual_falls_back_to_population() {
        let pop = zeros_ones(4);
        let new_ind = vec![vec![2.0; 4]];
        let mut rng = rng(42);
        let out = single_point(&mut rng, &pop, new_ind, 50).unwrap();
        assert_eq!(out.len(), 51);
        for child in &out[1..] {
            assert!(child.iter().all(|&v| v == 0.0 || v == 1.0));
        }
    }

    #[test]
    fn test_inputs_not_mutated() {
        let pop = zeros_ones(4);
        let snapshot = pop.clone();
        let mut rng = rng(42);
        let _ = single_point(&mut rng, &pop, Vec::new(), 20).unwrap();
        assert_eq!(pop, snapshot);
    }
}
