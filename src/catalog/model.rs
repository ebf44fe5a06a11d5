//! Catalog entities.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A bookable service and its price in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub price: u32,
}

/// A staff member. Specializations are informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub name: String,
    #[serde(default)]
    pub specialization: Vec<String>,
}

/// Read-only reference data for one session.
///
/// Services and staff keep their declaration order, which is the order the
/// wizard lists them in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    salon: String,
    services: Vec<Service>,
    staff: Vec<Staff>,
    booked: BTreeMap<NaiveDate, BTreeSet<NaiveTime>>,
}

impl Catalog {
    pub fn new(salon: impl Into<String>) -> Self {
        Self {
            salon: salon.into(),
            ..Default::default()
        }
    }

    /// Register a service. Names are unique keys.
    pub fn add_service(&mut self, name: impl Into<String>, price: u32) -> Result<(), ConfigError> {
        let name = name.into();
        if self.service(&name).is_some() {
            return Err(duplicate("services", &name));
        }
        self.services.push(Service { name, price });
        Ok(())
    }

    /// Register a staff member. Names are unique keys.
    pub fn add_staff<I, S>(&mut self, name: impl Into<String>, specialization: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if self.staff(&name).is_some() {
            return Err(duplicate("staff", &name));
        }
        self.staff.push(Staff {
            name,
            specialization: specialization.into_iter().map(Into::into).collect(),
        });
        Ok(())
    }

    /// Mark a slot as already taken.
    pub fn add_booked(&mut self, date: NaiveDate, time: NaiveTime) {
        self.booked.entry(date).or_default().insert(time);
    }

    pub fn salon_name(&self) -> &str {
        &self.salon
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn staff_members(&self) -> &[Staff] {
        &self.staff
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn staff(&self, name: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.name == name)
    }

    /// Occupied times for a date, if any were recorded.
    ///
    /// Bookings are tracked per date only, regardless of staff member.
    pub fn booked_on(&self, date: NaiveDate) -> Option<&BTreeSet<NaiveTime>> {
        self.booked.get(&date)
    }
}

fn duplicate(table: &str, name: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: table.to_string(),
        message: format!("duplicate entry {name:?}"),
    }
}
