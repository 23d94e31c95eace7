use time::{Date, macros::format_description};

use crate::ResolveError;

/// Parse the raw value of a `<input type="date">` field.
///
/// An empty (or blank) field yields `Ok(None)`: the form has no date yet and
/// the caller should not resolve anything.
pub fn parse_date_field(raw: &str) -> Result<Option<Date>, ResolveError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|e| ResolveError::InvalidDate {
            value: raw.to_owned(),
            reason: e.to_string(),
        })
}
