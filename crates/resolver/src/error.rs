use thiserror::Error;
use time::{Date, PrimitiveDateTime};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Unknown meal category: {0}")]
    UnknownCategory(String),

    #[error("Invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Local time {wall} does not exist in {zone}")]
    NonexistentLocalTime {
        wall: PrimitiveDateTime,
        zone: String,
    },

    #[error("Meal time for {0} is outside the supported calendar range")]
    OutOfRange(Date),

    #[error("Failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),
}
