//! # confwire-core
//!
//! Registers configuration graphs in a dependency injection container so
//! components can take typed configuration sections instead of reading a raw
//! configuration tree.
//!
//! ```
//! use confwire_core::{ConfigSection, ConfigurationModule, ContainerBuilder, InMemoryResolver};
//! use std::sync::Arc;
//!
//! pub trait Storage: Send + Sync {
//!     fn connection(&self) -> &str;
//! }
//!
//! #[derive(ConfigSection)]
//! #[section(interfaces(dyn Storage))]
//! pub struct StorageConfig {
//!     pub connection: String,
//! }
//!
//! impl Storage for StorageConfig {
//!     fn connection(&self) -> &str {
//!         &self.connection
//!     }
//! }
//!
//! #[derive(ConfigSection)]
//! pub struct AppConfig {
//!     pub name: String,
//!     pub storage: Arc<StorageConfig>,
//! }
//!
//! let config = AppConfig {
//!     name: "app".to_string(),
//!     storage: Arc::new(StorageConfig { connection: "sqlite::memory:".to_string() }),
//! };
//!
//! let mut builder = ContainerBuilder::new();
//! builder.register_module(ConfigurationModule::new(InMemoryResolver::new(config)));
//! let container = builder.build()?;
//!
//! let storage = container.resolve_interface::<dyn Storage>()?;
//! assert_eq!(storage.connection(), "sqlite::memory:");
//! # Ok::<(), confwire_core::CoreError>(())
//! ```

pub mod config;
pub mod container;
pub mod errors;

pub use config::{
    ConfigError, ConfigSection, ConfigSource, ConfigurationModule, ConfigurationResolver,
    EnvConfig, FactoryResolver, InMemoryResolver, InterfaceBinder, NullResolver,
    RegistrarOptions, RegistrationSummary, SectionKind, SectionProperty,
};
pub use container::{
    Container, ContainerBuilder, ContainerReport, Exposure, Registration, ServiceId,
    ServiceModule,
};
pub use errors::CoreError;

#[cfg(feature = "derive")]
pub use confwire_core_derive::ConfigSection;
