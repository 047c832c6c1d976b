use confwire_core::ConfigSection;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub trait Hook: Send + Sync {
    fn run(&self);
}

struct Noop;

impl Hook for Noop {
    fn run(&self) {}
}

#[derive(ConfigSection)]
pub struct Tls {
    pub cert: Arc<PathBuf>,
}

#[derive(ConfigSection)]
pub struct Hosts {
    pub name: String,
    pub allowed: Arc<Vec<String>>,
    pub limits: Option<Arc<HashMap<String, u32>>>,
    pub on_start: Arc<dyn Hook>,
    pub tls: Option<Arc<Tls>>,
}

fn main() {
    let hosts = Hosts {
        name: "edge".to_string(),
        allowed: Arc::new(vec!["10.0.0.1".to_string()]),
        limits: None,
        on_start: Arc::new(Noop),
        tls: Some(Arc::new(Tls {
            cert: Arc::new(PathBuf::from("/etc/tls/cert.pem")),
        })),
    };
    hosts.on_start.run();

    let properties = confwire_core::config::ConfigSection::properties(&hosts);
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name, "tls");
}
