use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from miqat operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// Date earlier than the first day of the Hijri era.
    #[error("Date {date} is before the Hijri epoch ({epoch})")]
    DateBeforeEpoch { date: NaiveDate, epoch: NaiveDate },

    /// Latitude or longitude outside the valid range, or not finite.
    #[error("Invalid coordinate ({lat}, {lng}): latitude must be in [-90, 90], longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A prayer source has no data for the requested date.
    #[error("No data available for {date}")]
    DateNotAvailable { date: NaiveDate },

    /// Remote request failed.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Remote response could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl MiqatError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates a `DateNotAvailable` error.
    pub fn not_available(date: NaiveDate) -> Self {
        Self::DateNotAvailable { date }
    }
}
