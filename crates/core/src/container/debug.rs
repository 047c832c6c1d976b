use crate::container::registry::ServiceRegistry;
use crate::errors::CoreError;
use serde::Serialize;

/// Serializable snapshot of a container's registrations
#[derive(Debug, Clone, Serialize)]
pub struct ContainerReport {
    pub registration_count: usize,
    pub service_count: usize,
    pub registrations: Vec<RegistrationReport>,
}

/// One registration in a [`ContainerReport`]
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReport {
    pub id: usize,
    pub implementation: String,
    pub services: Vec<String>,
}

impl ContainerReport {
    pub(crate) fn from_registry(registry: &ServiceRegistry) -> Self {
        let registrations = registry
            .registrations()
            .iter()
            .map(|registration| RegistrationReport {
                id: registration.id,
                implementation: registration.implementation.to_string(),
                services: registration
                    .services()
                    .map(|service| service.type_name().to_string())
                    .collect(),
            })
            .collect();

        Self {
            registration_count: registry.registration_count(),
            service_count: registry.service_count(),
            registrations,
        }
    }

    /// Render the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the report as a plain-text listing
    pub fn to_text(&self) -> String {
        let mut output = format!(
            "{} registrations, {} services\n",
            self.registration_count, self.service_count
        );
        for registration in &self.registrations {
            output.push_str(&format!(
                "  #{} {} -> [{}]\n",
                registration.id,
                registration.implementation,
                registration.services.join(", ")
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use crate::container::ContainerBuilder;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Limits {
        #[allow(dead_code)]
        max: u32,
    }

    #[test]
    fn test_report_lists_registrations() {
        let mut builder = ContainerBuilder::new();
        builder.register_instance(Arc::new(Limits { max: 3 }));
        let report = builder.build().unwrap().report();

        assert_eq!(report.registration_count, 1);
        assert_eq!(report.registrations[0].id, 0);
        assert!(report.registrations[0].implementation.ends_with("Limits"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["registration_count"], 1);
        assert_eq!(json["registrations"][0]["services"].as_array().unwrap().len(), 1);

        assert!(report.to_text().starts_with("1 registrations, 1 services"));
    }
}
