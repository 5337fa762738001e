//! Parameter-space genetic algorithm optimizer.
//!
//! Given a search space of named parameters — continuous or discrete —
//! and a fitness function, the engine evolves a fixed-size population
//! across generations toward higher fitness.
//!
//! # Core Types
//!
//! - [`Parameter`] / [`ParameterSet`]: the search space and genome layout
//! - [`GaConfig`]: engine hyperparameters with a builder
//! - [`GaRunner`]: the generation loop
//! - [`GaResult`] / [`GenerationRecord`]: per-generation run history
//!
//! # Operator Library
//!
//! The [`selection`], [`crossover`], and [`mutation`] modules expose the
//! operators as standalone pure functions sharing one contract, usable
//! outside the engine.
//!
//! # Example
//!
//! ```
//! use evoparam::{GaConfig, GaRunner, Parameter, ParameterKind, ParameterSet};
//!
//! let params = ParameterSet::new(vec![
//!     Parameter::new("x", -10.0, 10.0, ParameterKind::Continuous)?,
//!     Parameter::new("y", 1.0, 5.0, ParameterKind::Discrete)?,
//! ])?;
//!
//! let config = GaConfig::default()
//!     .with_population_size(50)
//!     .with_number_best_candidates(35)
//!     .with_generations(20)
//!     .with_seed(42);
//!
//! // Maximize y - |x|: best candidates sit near x = 0, y = 5.
//! let result = GaRunner::run(&params, &config, |pop| {
//!     pop.iter().map(|g| g[1] - g[0].abs()).collect()
//! })?;
//!
//! let best = result.best().expect("ran at least one generation");
//! assert!(best.best_fitness > 0.0);
//! # Ok::<(), evoparam::Error>(())
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one explicitly seeded generator threaded
//! through every operator call; a fixed [`GaConfig::seed`] reproduces a
//! run exactly.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

pub mod config;
pub mod crossover;
mod error;
pub mod loader;
pub mod mutation;
mod params;
mod runner;
pub mod selection;

pub use config::GaConfig;
pub use error::{Error, Result};
pub use loader::{ConfigFormat, ParameterSpec, RunSpec};
pub use params::{Genome, Parameter, ParameterKind, ParameterSet};
pub use runner::{GaResult, GaRunner, GenerationRecord};
