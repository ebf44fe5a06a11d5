//! The in-progress booking.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Choices made so far. Filled left to right: service, staff, date, time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub service: Option<String>,
    pub staff: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Name of the first unset field, in fill order.
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.service.is_none() {
            Some("service")
        } else if self.staff.is_none() {
            Some("staff member")
        } else if self.date.is_none() {
            Some("date")
        } else if self.time.is_none() {
            Some("time")
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
