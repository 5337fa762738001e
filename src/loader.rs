//! Config-document loading.
//!
//! A run can be described by a structured document listing the search
//! parameters and the engine hyperparameters:
//!
//! ```yaml
//! parameters:
//!   - { name: x, min: -10.0, max: 10.0, type: continuous }
//!   - { name: y, min: 1, max: 5, type: discrete }
//! population_size: 100
//! number_best_candidates: 70
//! prob_crossover: 0.7
//! prob_mutation: 0.1
//! generations: 100
//! ```
//!
//! The caller picks the [`ConfigFormat`] explicitly (or via
//! [`ConfigFormat::from_extension`]) before anything is parsed; the engine
//! itself never touches files or formats, it consumes the already-built
//! [`ParameterSet`] and [`GaConfig`].

use crate::config::GaConfig;
use crate::error::{Error, Result};
use crate::params::{Parameter, ParameterKind, ParameterSet};
use serde::Deserialize;

/// Supported config-document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks a format from a file name's extension (`json`, `yaml`, `yml`).
    pub fn from_extension(file_name: &str) -> Result<Self> {
        let ext = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(Error::Config(format!(
                "unsupported config extension `{other}`"
            ))),
        }
    }

    /// Parses a document in this format.
    pub fn parse_str(&self, input: &str) -> Result<RunSpec> {
        match self {
            ConfigFormat::Json => Ok(serde_json::from_str(input)?),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(input)?),
        }
    }
}

/// One parameter entry in a config document.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
}

/// A full run description: search space plus hyperparameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSpec {
    pub parameters: Vec<ParameterSpec>,
    pub population_size: usize,
    pub number_best_candidates: usize,
    pub prob_crossover: f64,
    pub prob_mutation: f64,
    pub generations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunSpec {
    /// Builds the validated `(ParameterSet, GaConfig)` pair the engine
    /// consumes.
    pub fn into_parts(self) -> Result<(ParameterSet, GaConfig)> {
        let params = self
            .parameters
            .into_iter()
            .map(|p| Parameter::new(p.name, p.min, p.max, p.kind))
            .collect::<Result<Vec<_>>>()?;
        let params = ParameterSet::new(params)?;

        let config = GaConfig {
            population_size: self.population_size,
            number_best_candidates: self.number_best_candidates,
            crossover_rate: self.prob_crossover,
            mutation_rate: self.prob_mutation,
            generations: self.generations,
            seed: self.seed,
        };
        config.validate()?;
        Ok((params, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_DOC: &str = r#"{
        "parameters": [
            {"name": "x", "min": -10.0, "max": 10.0, "type": "continuous"},
            {"name": "y", "min": 1, "max": 5, "type": "discrete"}
        ],
        "population_size": 50,
        "number_best_candidates": 30,
        "prob_crossover": 0.7,
        "prob_mutation": 0.1,
        "generations": 20,
        "seed": 42
    }"#;

    const YAML_DOC: &str = "\
parameters:
  - { name: x, min: -10.0, max: 10.0, type: continuous }
  - { name: y, min: 1, max: 5, type: discrete }
population_size: 50
number_best_candidates: 30
prob_crossover: 0.7
prob_mutation: 0.1
generations: 20
";

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("run.json").unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_extension("run.YAML").unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_extension("run.yml").unwrap(),
            ConfigFormat::Yaml
        );
        assert!(matches!(
            ConfigFormat::from_extension("run.toml"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_json_document() {
        let spec = ConfigFormat::Json.parse_str(JSON_DOC).unwrap();
        let (params, config) = spec.into_parts().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name(), "x");
        assert!(params[1].is_discrete());
        assert_eq!(config.population_size, 50);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_parse_yaml_document() {
        let spec = ConfigFormat::Yaml.parse_str(YAML_DOC).unwrap();
        let (params, config) = spec.into_parts().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(config.number_best_candidates, 30);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unknown_kind_fails() {
        let doc = JSON_DOC.replace("continuous", "fuzzy");
        assert!(matches!(
            ConfigFormat::Json.parse_str(&doc),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_bad_bounds_fail_at_into_parts() {
        let doc = JSON_DOC.replace("\"min\": -10.0", "\"min\": 99.0");
        let spec = ConfigFormat::Json.parse_str(&doc).unwrap();
        assert!(matches!(
            spec.into_parts(),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_bad_hyperparameters_fail_at_into_parts() {
        let doc = JSON_DOC.replace("\"number_best_candidates\": 30", "\"number_best_candidates\": 60");
        let spec = ConfigFormat::Json.parse_str(&doc).unwrap();
        // 60 candidates from a population of 50
        assert!(matches!(spec.into_parts(), Err(Error::InvalidOperation(_))));
    }
}
