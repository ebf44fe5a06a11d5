//! Session ledger — confirmed bookings and per-staff tallies.
//!
//! In-memory only. It does not feed back into slot availability.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::wizard::BookingReceipt;

/// Bookings and revenue for one staff member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StaffStats {
    pub bookings: u32,
    pub revenue: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BookingLedger {
    receipts: Vec<BookingReceipt>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, receipt: BookingReceipt) {
        self.receipts.push(receipt);
    }

    pub fn receipts(&self) -> &[BookingReceipt] {
        &self.receipts
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    pub fn total_revenue(&self) -> u64 {
        self.receipts.iter().map(|r| u64::from(r.payload.price)).sum()
    }

    pub fn stats_by_staff(&self) -> BTreeMap<String, StaffStats> {
        let mut stats: BTreeMap<String, StaffStats> = BTreeMap::new();
        for r in &self.receipts {
            let entry = stats.entry(r.payload.staff.clone()).or_default();
            entry.bookings += 1;
            entry.revenue += u64::from(r.payload.price);
        }
        stats
    }

    /// One line per confirmed booking, oldest first.
    pub fn listing(&self) -> String {
        if self.is_empty() {
            return "No bookings yet.".to_string();
        }
        self.receipts
            .iter()
            .map(|r| format!("{}  {}  {}", r.id, r.payload.summary(), r.payload.price))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain-text report for the terminal.
    pub fn report(&self) -> String {
        if self.is_empty() {
            return "No bookings yet.".to_string();
        }
        let mut lines = vec![
            format!("Bookings: {}", self.len()),
            format!("Revenue:  {}", self.total_revenue()),
        ];
        for (staff, s) in self.stats_by_staff() {
            lines.push(format!("  {staff}: {} booking(s), {}", s.bookings, s.revenue));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::BookingPayload;
    use chrono::{NaiveDate, NaiveTime};

    fn receipt(staff: &str, price: u32) -> BookingReceipt {
        BookingReceipt::new(BookingPayload::new(
            "Haircut",
            staff,
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            price,
        ))
    }

    #[test]
    fn empty_ledger() {
        let ledger = BookingLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_revenue(), 0);
        assert_eq!(ledger.report(), "No bookings yet.");
        assert_eq!(ledger.listing(), "No bookings yet.");
    }

    #[test]
    fn listing_shows_each_booking() {
        let mut ledger = BookingLedger::new();
        let first = receipt("Alex", 500);
        let second = receipt("Sam", 1500);
        ledger.record(first.clone());
        ledger.record(second.clone());

        let listing = ledger.listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("{}  Haircut with Alex, 2025-11-20 at 09:00  500", first.id)
        );
        assert!(lines[1].starts_with(&second.id.to_string()));
        assert!(lines[1].ends_with("1500"));
    }

    #[test]
    fn tallies_per_staff() {
        let mut ledger = BookingLedger::new();
        ledger.record(receipt("Alex", 500));
        ledger.record(receipt("Sam", 1500));
        ledger.record(receipt("Alex", 300));

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.total_revenue(), 2300);
        let stats = ledger.stats_by_staff();
        assert_eq!(stats["Alex"], StaffStats { bookings: 2, revenue: 800 });
        assert_eq!(stats["Sam"], StaffStats { bookings: 1, revenue: 1500 });

        let report = ledger.report();
        assert!(report.contains("Alex: 2 booking(s), 800"), "{report}");
    }
}
