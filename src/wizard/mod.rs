//! Booking wizard — the step state machine and the selection it fills.
//!
//! The user walks a fixed sequence of screens: service, staff member, date,
//! time, confirmation. The controller has no knowledge of any UI; front-ends
//! call its command methods and project its state for display.

pub mod booking;
pub mod controller;
pub mod selection;
pub mod step;

pub use booking::{BookingPayload, BookingReceipt};
pub use controller::BookingWizard;
pub use selection::Selection;
pub use step::Step;
