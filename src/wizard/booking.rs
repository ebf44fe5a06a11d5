//! Booking payload and receipt.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slots;

/// The flat record handed to the platform on confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub service: String,
    pub staff: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24h
    pub time: String,
    pub price: u32,
}

impl BookingPayload {
    pub fn new(
        service: impl Into<String>,
        staff: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        price: u32,
    ) -> Self {
        Self {
            service: service.into(),
            staff: staff.into(),
            date: date.format(slots::DATE_FORMAT).to_string(),
            time: slots::format_time(time),
            price,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// One-line summary, e.g. `Haircut with Alex, 2025-11-20 at 09:00`.
    pub fn summary(&self) -> String {
        format!(
            "{} with {}, {} at {}",
            self.service, self.staff, self.date, self.time
        )
    }
}

/// Local record of a confirmed booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub payload: BookingPayload,
}

impl BookingReceipt {
    pub fn new(payload: BookingPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            payload,
        }
    }
}
