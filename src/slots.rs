//! Slot generator — bookable dates and times of day.
//!
//! Both generators are lazy, finite and restartable (`Clone`), and depend
//! only on their arguments.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::config::ScheduleConfig;

/// ISO calendar date, e.g. `2025-11-20`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 24h time of day, e.g. `09:30`.
pub const TIME_FORMAT: &str = "%H:%M";

const MINUTES_PER_DAY: u32 = 24 * 60;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).ok()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays among the `horizon_days` calendar days starting at `today`.
pub fn available_dates(today: NaiveDate, horizon_days: u32) -> AvailableDates {
    AvailableDates {
        next: Some(today),
        remaining: horizon_days,
    }
}

/// Iterator returned by [`available_dates`].
#[derive(Debug, Clone)]
pub struct AvailableDates {
    next: Option<NaiveDate>,
    remaining: u32,
}

impl Iterator for AvailableDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while self.remaining > 0 {
            let date = self.next?;
            self.remaining -= 1;
            self.next = date.succ_opt();
            if !is_weekend(date) {
                return Some(date);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

/// Step-aligned times in business hours, minus lunch and `booked`.
///
/// `None` for `booked` means nothing is taken on that date. Hours past the
/// end of the day yield nothing.
pub fn available_times<'a>(
    booked: Option<&'a BTreeSet<NaiveTime>>,
    schedule: &ScheduleConfig,
) -> AvailableTimes<'a> {
    let day_end = MINUTES_PER_DAY.min(schedule.work_end.saturating_mul(60));
    AvailableTimes {
        minute: schedule.work_start.saturating_mul(60),
        end: day_end,
        lunch: (schedule.lunch_start, schedule.lunch_end),
        step: schedule.step_minutes.max(1),
        booked,
    }
}

/// Iterator returned by [`available_times`].
#[derive(Debug, Clone)]
pub struct AvailableTimes<'a> {
    minute: u32,
    end: u32,
    lunch: (u32, u32),
    step: u32,
    booked: Option<&'a BTreeSet<NaiveTime>>,
}

impl AvailableTimes<'_> {
    fn is_lunch(&self, time: NaiveTime) -> bool {
        let (start, end) = self.lunch;
        start <= time.hour() && time.hour() < end
    }

    fn is_booked(&self, time: NaiveTime) -> bool {
        self.booked.is_some_and(|b| b.contains(&time))
    }
}

impl Iterator for AvailableTimes<'_> {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        while self.minute < self.end {
            let time = NaiveTime::from_hms_opt(self.minute / 60, self.minute % 60, 0)?;
            self.minute = self.minute.saturating_add(self.step);
            if !self.is_lunch(time) && !self.is_booked(time) {
                return Some(time);
            }
        }
        None
    }
}
