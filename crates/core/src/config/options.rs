use crate::config::{ConfigError, ConfigSource};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

pub const DETECT_CYCLES_VAR: &str = "CONFWIRE_DETECT_CYCLES";
pub const MAX_DEPTH_VAR: &str = "CONFWIRE_MAX_DEPTH";

const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration loaded from the process environment
pub trait EnvConfig: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Options controlling how a configuration graph is walked
///
/// `max_depth` bounds every walk, whether or not `detect_cycles` is set, so
/// an acyclic graph nested deeper than `max_depth` sections below the root
/// fails with `CoreError::DepthExceeded`. Raise it for deeper graphs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrarOptions {
    /// Skip sections already registered during the same pass
    pub detect_cycles: bool,
    /// Deepest nesting below the root that may be registered, cycles or not
    pub max_depth: usize,
    #[serde(skip)]
    sources: HashMap<String, ConfigSource>,
}

impl RegistrarOptions {
    pub fn new() -> Self {
        let sources = HashMap::from([
            (
                "detect_cycles".to_string(),
                ConfigSource::Default("true".to_string()),
            ),
            (
                "max_depth".to_string(),
                ConfigSource::Default(DEFAULT_MAX_DEPTH.to_string()),
            ),
        ]);

        Self {
            detect_cycles: true,
            max_depth: DEFAULT_MAX_DEPTH,
            sources,
        }
    }

    pub fn with_detect_cycles(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self.sources
            .insert("detect_cycles".to_string(), ConfigSource::Programmatic);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self.sources
            .insert("max_depth".to_string(), ConfigSource::Programmatic);
        self
    }

    /// Parse options from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.loaded_from_document()
    }

    /// Parse options from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.loaded_from_document()
    }

    fn loaded_from_document(mut self) -> Result<Self, ConfigError> {
        self.sources = HashMap::from([
            ("detect_cycles".to_string(), ConfigSource::Document),
            ("max_depth".to_string(), ConfigSource::Document),
        ]);
        self.validate()?;
        Ok(self)
    }
}

impl Default for RegistrarOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, value, "true or false")),
    }
}

impl EnvConfig for RegistrarOptions {
    fn from_env() -> Result<Self, ConfigError> {
        let mut options = Self::new();

        if let Ok(value) = env::var(DETECT_CYCLES_VAR) {
            options.detect_cycles = parse_bool("detect_cycles", &value)?;
            options.sources.insert(
                "detect_cycles".to_string(),
                ConfigSource::EnvVar(DETECT_CYCLES_VAR.to_string()),
            );
        }

        if let Ok(value) = env::var(MAX_DEPTH_VAR) {
            options.max_depth = value.trim().parse().map_err(|_| {
                ConfigError::invalid_value("max_depth", &value, "positive integer")
            })?;
            options.sources.insert(
                "max_depth".to_string(),
                ConfigSource::EnvVar(MAX_DEPTH_VAR.to_string()),
            );
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::invalid_value(
                "max_depth",
                "0",
                "max_depth of at least 1",
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        self.sources.clone()
    }
}
