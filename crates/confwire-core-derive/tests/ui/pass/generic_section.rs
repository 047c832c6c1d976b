use confwire_core::ConfigSection;
use std::sync::Arc;

#[derive(ConfigSection)]
pub struct Endpoint {
    pub url: String,
}

#[derive(ConfigSection)]
pub struct Pool<T: Send + Sync + 'static> {
    pub size: T,
    pub endpoint: Arc<Endpoint>,
    #[section(skip)]
    pub fallback: Option<Arc<Endpoint>>,
}

#[derive(ConfigSection)]
pub struct Marker;

fn main() {
    let pool = Pool {
        size: 4usize,
        endpoint: Arc::new(Endpoint {
            url: "http://localhost".to_string(),
        }),
        fallback: None,
    };

    assert_eq!(confwire_core::config::ConfigSection::properties(&pool).len(), 1);
    assert!(confwire_core::config::ConfigSection::properties(&Marker).is_empty());
}
