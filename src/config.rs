//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Longest booking horizon accepted, in days.
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Business hours and booking horizon used by the slot generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Number of calendar days (starting today) offered for booking.
    pub horizon_days: u32,
    /// First bookable hour (inclusive).
    pub work_start: u32,
    /// Closing hour (exclusive).
    pub work_end: u32,
    /// Lunch break start hour (inclusive).
    pub lunch_start: u32,
    /// Lunch break end hour (exclusive).
    pub lunch_end: u32,
    /// Slot granularity in minutes.
    pub step_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon_days: 14,
            work_start: 8,
            work_end: 18,
            lunch_start: 13,
            lunch_end: 14,
            step_minutes: 30,
        }
    }
}

impl ScheduleConfig {
    /// Build from `BOOKING_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            horizon_days: env_or("BOOKING_HORIZON_DAYS", defaults.horizon_days)?,
            work_start: env_or("BOOKING_WORK_START", defaults.work_start)?,
            work_end: env_or("BOOKING_WORK_END", defaults.work_end)?,
            lunch_start: env_or("BOOKING_LUNCH_START", defaults.lunch_start)?,
            lunch_end: env_or("BOOKING_LUNCH_END", defaults.lunch_end)?,
            step_minutes: env_or("BOOKING_STEP_MINUTES", defaults.step_minutes)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject hour ranges and step sizes the slot generator cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(invalid("horizon_days", "must be at most 366"));
        }
        if self.work_end > 24 {
            return Err(invalid("work_end", "must be at most 24"));
        }
        if self.work_start >= self.work_end {
            return Err(invalid("work_start", "must be before work_end"));
        }
        if self.lunch_start > self.lunch_end {
            return Err(invalid("lunch_start", "must not be after lunch_end"));
        }
        if self.step_minutes == 0 || 60 % self.step_minutes != 0 {
            return Err(invalid("step_minutes", "must evenly divide an hour"));
        }
        Ok(())
    }
}

/// Application configuration for the terminal front-end.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub schedule: ScheduleConfig,
    /// Catalog JSON file; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            schedule: ScheduleConfig::from_env()?,
            catalog_path: std::env::var("BOOKING_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
