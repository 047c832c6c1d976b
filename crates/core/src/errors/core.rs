use crate::config::validation::ConfigError;
use thiserror::Error;

/// Core error type for confwire
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid argument: '{name}' must be provided")]
    InvalidArgument { name: String },

    #[error("Service not found: {service_type}")]
    ServiceNotFound { service_type: String },

    #[error("Configuration graph deeper than {max_depth} sections at '{path}'")]
    DepthExceeded { max_depth: usize, path: String },

    #[error("Module '{module}' failed to load: {source}")]
    Module {
        module: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new invalid argument error
    pub fn invalid_argument(name: impl Into<String>) -> Self {
        Self::InvalidArgument { name: name.into() }
    }

    /// Create a new service not found error
    pub fn service_not_found(service_type: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            service_type: service_type.into(),
        }
    }

    /// Wrap an error raised while a module was loading
    pub fn module(
        module: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Module {
            module: module.into(),
            source: source.into(),
        }
    }

    /// Check if the error is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if the error is a service error
    pub fn is_service(&self) -> bool {
        matches!(self, Self::ServiceNotFound { .. })
    }
}
