use mealtime_resolver::ResolveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No date given, nothing to resolve")]
    MissingDate,

    #[error("Invalid instant {value:?}: {reason}")]
    InvalidInstant { value: String, reason: String },

    #[error(transparent)]
    ResolveError(#[from] ResolveError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Caller mistakes (bad arguments or configuration) exit with 2, anything
    /// else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigError(_)
            | AppError::ValidationError(_)
            | AppError::MissingDate
            | AppError::InvalidInstant { .. }
            | AppError::ResolveError(
                ResolveError::UnknownCategory(_)
                | ResolveError::InvalidDate { .. }
                | ResolveError::UnknownTimezone(_),
            ) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::MissingDate.exit_code(), 2);
        assert_eq!(
            AppError::from(ResolveError::UnknownCategory("brunch".into())).exit_code(),
            2
        );
        assert_eq!(
            AppError::IoError(std::io::Error::other("closed")).exit_code(),
            1
        );
    }

    #[test]
    fn test_resolve_errors_display_transparently() {
        let err = AppError::from(ResolveError::UnknownCategory("brunch".into()));
        assert_eq!(err.to_string(), "Unknown meal category: brunch");
    }
}
