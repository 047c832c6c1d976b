#[doc(hidden)]
pub mod field;
pub mod module;
pub mod options;
pub mod resolver;
pub mod section;
pub mod sources;
pub mod validation;

pub use module::{ConfigurationModule, RegistrationSummary};
pub use options::{EnvConfig, RegistrarOptions};
pub use resolver::{ConfigurationResolver, FactoryResolver, InMemoryResolver, NullResolver};
pub use section::{ConfigSection, InterfaceBinder, SectionKind, SectionProperty};
pub use sources::ConfigSource;
pub use validation::ConfigError;
