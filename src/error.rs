//! Error types for the booking wizard.

use chrono::{NaiveDate, NaiveTime};

use crate::wizard::Step;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid selection: {0}")]
    Selection(#[from] InvalidSelection),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A wizard transition guard was violated.
///
/// The transition is rejected and the wizard is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelection {
    #[error("unknown service: {name}")]
    UnknownService { name: String },

    #[error("unknown staff member: {name}")]
    UnknownStaff { name: String },

    #[error("date {date} is not bookable")]
    DateUnavailable { date: NaiveDate },

    #[error("time {} is not available on {date}", .time.format("%H:%M"))]
    TimeUnavailable { date: NaiveDate, time: NaiveTime },

    #[error("cannot {action} on {}", .current.describe())]
    OutOfStep { action: &'static str, current: Step },

    #[error("booking is missing a {missing}")]
    Incomplete { missing: &'static str },

    #[error("no option matches {token:?}")]
    UnknownOption { token: String },
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse catalog: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
