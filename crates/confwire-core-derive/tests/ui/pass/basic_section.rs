use confwire_core::ConfigSection;
use std::sync::Arc;

pub trait Storage: Send + Sync {
    fn connection(&self) -> &str;
}

#[derive(ConfigSection)]
#[section(interfaces(dyn Storage))]
pub struct StorageConfig {
    pub connection: String,
}

impl Storage for StorageConfig {
    fn connection(&self) -> &str {
        &self.connection
    }
}

#[derive(ConfigSection)]
pub struct AppConfig {
    pub name: String,
    pub port: u16,
    pub storage: Arc<StorageConfig>,
    pub backup: Option<Arc<StorageConfig>>,
}

fn main() {
    let config = AppConfig {
        name: "app".to_string(),
        port: 8080,
        storage: Arc::new(StorageConfig {
            connection: "primary".to_string(),
        }),
        backup: None,
    };

    assert_eq!(confwire_core::config::ConfigSection::properties(&config).len(), 2);
}
