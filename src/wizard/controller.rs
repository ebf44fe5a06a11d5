//! BookingWizard — the step controller.
//!
//! Owns the selection and the current step. Every `choose_*` call checks
//! its guards first and only then mutates, so a rejected call leaves the
//! wizard exactly as it was.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use super::booking::{BookingPayload, BookingReceipt};
use super::selection::Selection;
use super::step::Step;
use crate::bridge::PlatformBridge;
use crate::catalog::Catalog;
use crate::config::{MAX_HORIZON_DAYS, ScheduleConfig};
use crate::error::{Error, InvalidSelection};
use crate::slots::{self, AvailableDates, AvailableTimes};

/// Single-user booking flow over a fixed catalog.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    catalog: Arc<Catalog>,
    schedule: ScheduleConfig,
    today: NaiveDate,
    step: Step,
    selection: Selection,
}

impl BookingWizard {
    /// Start a fresh wizard. `today` anchors the bookable date horizon.
    pub fn new(catalog: Arc<Catalog>, schedule: ScheduleConfig, today: NaiveDate) -> Self {
        Self {
            catalog,
            schedule,
            today,
            step: Step::default(),
            selection: Selection::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Dates offered at the date step.
    pub fn available_dates(&self) -> AvailableDates {
        let horizon = self.schedule.horizon_days.min(MAX_HORIZON_DAYS);
        slots::available_dates(self.today, horizon)
    }

    /// Times offered on `date`.
    pub fn times_on(&self, date: NaiveDate) -> AvailableTimes<'_> {
        slots::available_times(self.catalog.booked_on(date), &self.schedule)
    }

    /// Price of the selected service, if one is selected.
    pub fn price(&self) -> Option<u32> {
        let name = self.selection.service.as_deref()?;
        self.catalog.service(name).map(|s| s.price)
    }

    pub fn choose_service(&mut self, name: &str) -> Result<Step, InvalidSelection> {
        self.expect_step(Step::SelectingService, "choose a service")?;
        let service = self
            .catalog
            .service(name)
            .ok_or_else(|| InvalidSelection::UnknownService {
                name: name.to_string(),
            })?;
        self.selection.service = Some(service.name.clone());
        Ok(self.move_to(Step::SelectingStaff))
    }

    pub fn choose_staff(&mut self, name: &str) -> Result<Step, InvalidSelection> {
        self.expect_step(Step::SelectingStaff, "choose a staff member")?;
        let staff = self
            .catalog
            .staff(name)
            .ok_or_else(|| InvalidSelection::UnknownStaff {
                name: name.to_string(),
            })?;
        self.selection.staff = Some(staff.name.clone());
        Ok(self.move_to(Step::SelectingDate))
    }

    pub fn choose_date(&mut self, date: NaiveDate) -> Result<Step, InvalidSelection> {
        self.expect_step(Step::SelectingDate, "choose a date")?;
        if !self.available_dates().any(|d| d == date) {
            return Err(InvalidSelection::DateUnavailable { date });
        }
        self.selection.date = Some(date);
        Ok(self.move_to(Step::SelectingTime))
    }

    pub fn choose_time(&mut self, time: NaiveTime) -> Result<Step, InvalidSelection> {
        self.expect_step(Step::SelectingTime, "choose a time")?;
        let date = self
            .selection
            .date
            .ok_or(InvalidSelection::Incomplete { missing: "date" })?;
        if !self.times_on(date).any(|t| t == time) {
            return Err(InvalidSelection::TimeUnavailable { date, time });
        }
        self.selection.time = Some(time);
        Ok(self.move_to(Step::Confirming))
    }

    /// The payload the current selection would produce.
    pub fn payload(&self) -> Result<BookingPayload, InvalidSelection> {
        let s = &self.selection;
        match (&s.service, &s.staff, s.date, s.time) {
            (Some(service), Some(staff), Some(date), Some(time)) => {
                let price = self.catalog.service(service).map(|svc| svc.price).ok_or_else(|| {
                    InvalidSelection::UnknownService {
                        name: service.clone(),
                    }
                })?;
                Ok(BookingPayload::new(service, staff, date, time, price))
            }
            _ => Err(InvalidSelection::Incomplete {
                missing: s.first_missing().unwrap_or("field"),
            }),
        }
    }

    /// Hand the booking to the platform and move to Success.
    pub fn confirm(&mut self, bridge: &dyn PlatformBridge) -> Result<BookingReceipt, Error> {
        self.expect_step(Step::Confirming, "confirm")?;
        let payload = self.payload()?;
        let json = payload.to_json()?;

        bridge.send_data(&json);
        self.move_to(Step::Success);

        let receipt = BookingReceipt::new(payload);
        info!(
            booking_id = %receipt.id,
            service = %receipt.payload.service,
            staff = %receipt.payload.staff,
            date = %receipt.payload.date,
            time = %receipt.payload.time,
            price = receipt.payload.price,
            "Booking confirmed"
        );
        Ok(receipt)
    }

    /// Step back one screen without touching the selection.
    ///
    /// No-op on the first step. From Success it starts over.
    pub fn back(&mut self) -> Step {
        match self.step {
            Step::SelectingService => self.step,
            Step::Success => self.reset(),
            current => match current.previous() {
                Some(prev) => self.move_to(prev),
                None => current,
            },
        }
    }

    /// Start a new booking after a successful one.
    pub fn new_booking(&mut self) -> Result<Step, InvalidSelection> {
        self.expect_step(Step::Success, "start a new booking")?;
        Ok(self.reset())
    }

    /// Clear the selection and return to the first step.
    pub fn reset(&mut self) -> Step {
        self.selection.clear();
        self.move_to(Step::SelectingService)
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> Result<(), InvalidSelection> {
        if self.step == expected {
            Ok(())
        } else {
            Err(InvalidSelection::OutOfStep {
                action,
                current: self.step,
            })
        }
    }

    fn move_to(&mut self, target: Step) -> Step {
        debug_assert!(
            self.step.can_transition_to(target),
            "illegal transition {} -> {}",
            self.step,
            target
        );
        debug!(from = %self.step, to = %target, "Wizard step");
        self.step = target;
        target
    }
}
