//! Search-space definition: parameters, bounds, and population sampling.
//!
//! A [`Parameter`] describes one search dimension — its bounds and whether
//! it is continuous or discrete. A [`ParameterSet`] is an ordered collection
//! of parameters defining the genome layout: column `i` of every genome is
//! drawn from parameter `i`'s domain.

use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One candidate solution: a length-N vector, one cell per parameter,
/// in [`ParameterSet`] column order. Discrete cells hold integral values.
pub type Genome = Vec<f64>;

/// Value kind of a search dimension.
///
/// Discrete parameters take integer values in `[low, high]` inclusive;
/// continuous parameters take real values in `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Continuous,
    Discrete,
}

/// A single named search dimension with fixed bounds.
///
/// Immutable after construction. Construction fails with
/// [`Error::InvalidParameter`] when `low > high`. Discrete bounds are
/// normalized to the integers they contain (`ceil(low)..=floor(high)`);
/// construction fails when that range holds no integer.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    low: f64,
    high: f64,
    kind: ParameterKind,
}

impl Parameter {
    /// Creates a parameter with the given bounds and kind.
    pub fn new(
        name: impl Into<String>,
        low: f64,
        high: f64,
        kind: ParameterKind,
    ) -> Result<Self> {
        let name = name.into();
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::invalid_parameter(&name, "bounds must be finite"));
        }
        if low > high {
            return Err(Error::invalid_parameter(
                &name,
                format!("low bound {low} exceeds high bound {high}"),
            ));
        }
        let (low, high) = match kind {
            // Truncating casts at sample time would step outside
            // non-integral bounds, so the integer domain is fixed here.
            ParameterKind::Discrete => {
                let (lo, hi) = (low.ceil(), high.floor());
                if lo > hi {
                    return Err(Error::invalid_parameter(
                        &name,
                        format!("no integer lies within [{low}, {high}]"),
                    ));
                }
                (lo, hi)
            }
            ParameterKind::Continuous => (low, high),
        };
        Ok(Self {
            name,
            low,
            high,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds as `(low, high)`. For discrete parameters these are the
    /// normalized integer bounds.
    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn is_discrete(&self) -> bool {
        self.kind == ParameterKind::Discrete
    }

    /// Draws one domain-valid value: uniform over `[low, high)` for
    /// continuous, uniform integer over `[low, high]` for discrete.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.kind {
            ParameterKind::Discrete => {
                rng.random_range(self.low as i64..=self.high as i64) as f64
            }
            ParameterKind::Continuous => {
                if self.low == self.high {
                    self.low
                } else {
                    rng.random_range(self.low..self.high)
                }
            }
        }
    }

    /// Produces a neighboring value for mutation.
    ///
    /// Discrete: a ±1 step when both neighbors stay in range, the sign
    /// chosen uniformly; when a step would cross a boundary, a fresh
    /// uniform integer over the whole range. Continuous: a fresh uniform
    /// sample over the whole domain (full-range mutation, not a local
    /// perturbation).
    pub fn perturb<R: Rng>(&self, rng: &mut R, current: f64) -> f64 {
        match self.kind {
            ParameterKind::Discrete => {
                if current - 1.0 < self.low || current + 1.0 > self.high {
                    self.sample(rng)
                } else if rng.random_bool(0.5) {
                    current + 1.0
                } else {
                    current - 1.0
                }
            }
            ParameterKind::Continuous => self.sample(rng),
        }
    }
}

/// Ordered set of parameters defining the genome layout.
///
/// Column order is the construction order. Invariants: at least one
/// parameter, no duplicate names.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new(params: Vec<Parameter>) -> Result<Self> {
        if params.is_empty() {
            return Err(Error::invalid_parameter(
                "<set>",
                "a parameter set needs at least one parameter",
            ));
        }
        let mut seen = HashSet::new();
        for p in &params {
            if !seen.insert(p.name()) {
                return Err(Error::invalid_parameter(
                    p.name(),
                    "duplicate parameter name",
                ));
            }
        }
        Ok(Self { params })
    }

    /// Genome dimensionality N.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }

    /// Samples `size` genomes, each cell drawn independently from its
    /// column's domain. Every cell lies within bounds; discrete cells
    /// are integral.
    pub fn generate_population<R: Rng>(&self, rng: &mut R, size: usize) -> Vec<Genome> {
        (0..size)
            .map(|_| self.params.iter().map(|p| p.sample(rng)).collect())
            .collect()
    }
}

impl std::ops::Index<usize> for ParameterSet {
    type Output = Parameter;

    fn index(&self, i: usize) -> &Parameter {
        &self.params[i]
    }
}
