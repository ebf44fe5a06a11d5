//! Salon booking — a step-by-step appointment wizard for chat mini-apps.

pub mod bridge;
pub mod catalog;
pub mod channels;
pub mod config;
pub mod error;
pub mod ledger;
pub mod session;
pub mod slots;
pub mod view;
pub mod wizard;
