//! Registers a small configuration graph and prints the container report.
//!
//! Run with `RUST_LOG=confwire_core=debug` to see each registration.

use confwire_core::{
    ConfigSection, ConfigurationModule, ContainerBuilder, CoreError, EnvConfig,
    InMemoryResolver, RegistrarOptions,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub trait Database: Send + Sync {
    fn url(&self) -> &str;
}

#[derive(ConfigSection)]
#[section(interfaces(dyn Database))]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl Database for DatabaseConfig {
    fn url(&self) -> &str {
        &self.url
    }
}

#[derive(ConfigSection)]
pub struct AppConfig {
    pub name: String,
    pub database: Arc<DatabaseConfig>,
    pub replica: Option<Arc<DatabaseConfig>>,
}

fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig {
        name: "orders".to_string(),
        database: Arc::new(DatabaseConfig {
            url: "postgres://localhost/orders".to_string(),
            pool_size: 8,
        }),
        replica: None,
    };

    let mut builder = ContainerBuilder::new();
    builder.register_module(
        ConfigurationModule::new(InMemoryResolver::new(config))
            .with_options(RegistrarOptions::from_env()?),
    );
    let container = builder.build()?;

    let database = container.resolve_interface::<dyn Database>()?;
    println!("database: {}", database.url());
    println!("{}", container.report().to_text());

    Ok(())
}
