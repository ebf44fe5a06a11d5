//! Catalog loading from JSON and the built-in salon data.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::model::{Catalog, Service, Staff};
use crate::error::ConfigError;
use crate::slots;

/// On-disk catalog document.
///
/// ```json
/// {
///   "salon": "Charodeyka",
///   "services": [{"name": "Men's haircut", "price": 400}],
///   "staff": [{"name": "Dmitry", "specialization": ["haircut"]}],
///   "booked_slots": {"2025-11-18": ["09:00", "10:00"]}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub salon: String,
    pub services: Vec<Service>,
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub booked_slots: BTreeMap<String, Vec<String>>,
}

impl CatalogFile {
    /// Validate keys and formats and build the catalog.
    pub fn into_catalog(self) -> Result<Catalog, ConfigError> {
        let mut catalog = Catalog::new(self.salon);
        for service in self.services {
            catalog.add_service(service.name, service.price)?;
        }
        for member in self.staff {
            catalog.add_staff(member.name, member.specialization)?;
        }
        for (raw_date, times) in self.booked_slots {
            let date = NaiveDate::parse_from_str(&raw_date, slots::DATE_FORMAT).map_err(|e| {
                ConfigError::ParseError(format!("booked_slots date {raw_date:?}: {e}"))
            })?;
            for raw_time in times {
                let time = NaiveTime::parse_from_str(&raw_time, slots::TIME_FORMAT).map_err(|e| {
                    ConfigError::ParseError(format!(
                        "booked_slots time {raw_time:?} on {raw_date}: {e}"
                    ))
                })?;
                catalog.add_booked(date, time);
            }
        }
        Ok(catalog)
    }
}

impl Catalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        file.into_catalog()
    }

    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            services = catalog.services().len(),
            staff = catalog.staff_members().len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise use the built-in salon catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::salon_default()),
        }
    }

    /// The salon's own price list, team and known bookings.
    pub fn salon_default() -> Self {
        let file = CatalogFile {
            salon: "Charodeyka".to_string(),
            services: [
                ("Women's haircut", 500),
                ("Men's haircut", 400),
                ("Coloring", 1500),
                ("Shave", 300),
                ("Styling", 600),
            ]
            .into_iter()
            .map(|(name, price)| Service {
                name: name.to_string(),
                price,
            })
            .collect(),
            staff: vec![
                Staff {
                    name: "Dmitry".to_string(),
                    specialization: vec!["haircut".into(), "shave".into(), "coloring".into()],
                },
                Staff {
                    name: "Alexander".to_string(),
                    specialization: vec!["haircut".into(), "styling".into()],
                },
            ],
            booked_slots: BTreeMap::from([
                (
                    "2025-11-18".to_string(),
                    vec!["09:00".into(), "10:00".into(), "14:00".into()],
                ),
                ("2025-11-19".to_string(), vec!["11:00".into(), "15:00".into()]),
            ]),
        };
        file.into_catalog().unwrap_or_else(|e| {
            tracing::error!("Built-in catalog rejected: {}", e);
            Catalog::new("Charodeyka")
        })
    }
}
