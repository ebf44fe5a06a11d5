//! Catalog — the static reference data for a booking session.
//!
//! Services, staff and already-booked slots are fixed when the session
//! starts and never change while it runs.

pub mod loader;
pub mod model;

pub use loader::CatalogFile;
pub use model::{Catalog, Service, Staff};
