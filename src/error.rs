//! Error taxonomy for the optimizer.
//!
//! Every failure in the crate is fatal to the current run: the generation
//! loop is deterministic per call, so retrying with the same inputs would
//! reproduce the same error. Errors propagate to the caller immediately;
//! there is no partial-failure mode.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by parameter construction, operators, and the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed parameter definition or hyperparameter value.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// An operator was invoked in a state it cannot handle, e.g. crossover
    /// on a single-dimension genome or selecting more elites than the
    /// population holds.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The fitness callback violated its contract: wrong number of scores
    /// for the population, or a non-finite score.
    #[error("fitness contract violated: {0}")]
    FitnessContract(String),

    /// A configuration document failed to parse.
    #[error("config parse error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
