//! Static service catalog. Consultation kinds, durations, fees.

use crate::domain::entities::{Service, ServiceId};

/// Immutable catalog of bookable services, keyed by [`ServiceId`].
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            services: vec![
                Service {
                    id: ServiceId::Architecture,
                    name: "Architecture Consultation".to_string(),
                    duration_min: 90,
                    price: 200,
                },
                Service {
                    id: ServiceId::Interior,
                    name: "Interior Design Consultation".to_string(),
                    duration_min: 60,
                    price: 200,
                },
                Service {
                    id: ServiceId::Plotting,
                    name: "Plot Planning Consultation".to_string(),
                    duration_min: 60,
                    price: 200,
                },
                Service {
                    id: ServiceId::General,
                    name: "General Consultation".to_string(),
                    duration_min: 45,
                    price: 200,
                },
            ],
        }
    }
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn get(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Service] {
        &self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_lookup() {
        let catalog = ServiceCatalog::default();
        assert_eq!(catalog.all().len(), 4);
        let arch = catalog.get(ServiceId::Architecture).unwrap();
        assert_eq!(arch.duration_min, 90);
        assert_eq!(catalog.get(ServiceId::General).unwrap().duration_min, 45);
    }
}
