//! Mutation operators.
//!
//! Mutation works in place on the freshly produced individuals: each cell
//! is independently mutated with a fixed probability via
//! [`Parameter::perturb`](crate::Parameter::perturb). Discrete
//! cells stay integral within bounds; continuous cells are redrawn over
//! the full domain.

use crate::params::{Genome, ParameterSet};
use rand::Rng;

/// Full-range mutation.
///
/// Each cell of each individual is mutated with probability `p` via its
/// parameter's `perturb`. An empty individual set is a no-op, not an
/// error.
pub fn full_range<R: Rng>(
    rng: &mut R,
    individuals: &mut [Genome],
    p: f64,
    params: &ParameterSet,
) {
    if individuals.is_empty() || p <= 0.0 {
        return;
    }
    for genome in individuals.iter_mut() {
        for (i, cell) in genome.iter_mut().enumerate() {
            if rng.random_range(0.0..1.0) < p {
                *cell = params[i].perturb(rng, *cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Parameter, ParameterKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn test_params() -> ParameterSet {
        ParameterSet::new(vec![
            Parameter::new("x", -10.0, 10.0, ParameterKind::Continuous).unwrap(),
            Parameter::new("n", 0.0, 100.0, ParameterKind::Discrete).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_p_zero_is_identity() {
        let params = test_params();
        let mut rng = rng(42);
        let mut pop = params.generate_population(&mut rng, 20);
        let snapshot = pop.clone();
        full_range(&mut rng, &mut pop, 0.0, &params);
        assert_eq!(pop, snapshot);
    }

    #[test]
    fn test_p_one_mutates_every_cell() {
        let params = test_params();
        let mut rng = rng(42);
        // Start from cells a full-range redraw almost surely leaves, and
        // a discrete interior value a ±1 step always changes.
        let mut pop = vec![vec![0.0, 50.0]; 30];
        full_range(&mut rng, &mut pop, 1.0, &params);
        for genome in &pop {
            assert_ne!(genome[1], 50.0, "interior discrete cell must step away");
            assert!((-10.0..10.0).contains(&genome[0]));
            assert!((0.0..=100.0).contains(&genome[1]));
            assert_eq!(genome[1], genome[1].floor());
        }
    }

    #[test]
    fn test_empty_input_is_noop() {
        let params = test_params();
        let mut rng = rng(42);
        let mut pop: Vec<Genome> = Vec::new();
        full_range(&mut rng, &mut pop, 1.0, &params);
        assert!(pop.is_empty());
    }

    #[test]
    fn test_mutated_cells_stay_in_bounds() {
        let params = test_params();
        let mut rng = rng(7);
        let mut pop = params.generate_population(&mut rng, 50);
        for _ in 0..20 {
            full_range(&mut rng, &mut pop, 0.5, &params);
        }
        for genome in &pop {
            assert!((-10.0..10.0).contains(&genome[0]));
            assert!((0.0..=100.0).contains(&genome[1]));
            assert_eq!(genome[1], genome[1].floor());
        }
    }
}
