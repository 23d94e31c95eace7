use std::fmt;

use serde::{Serialize, Serializer, ser::Error as _};
use time::{
    Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{MealCategory, ResolveError, Zone};

/// Computes the canonical instant of a meal on a given day.
///
/// Holds nothing but the zone, so a resolver is `Copy` and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MealTimeResolver {
    zone: Zone,
}

impl MealTimeResolver {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    pub fn utc() -> Self {
        Self::new(Zone::utc())
    }

    /// Resolver for the zone of the running process, see [`Zone::ambient`].
    pub fn ambient() -> Self {
        Self::new(Zone::ambient())
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Resolve `category` on `date`: local midnight plus the category's
    /// hour offset, with minutes and seconds at zero.
    ///
    /// The hour is preserved as a local wall-clock hour, so on DST change
    /// days the UTC offset of the result differs from the day before.
    pub fn resolve(
        &self,
        date: Date,
        category: MealCategory,
    ) -> Result<ResolvedTimestamp, ResolveError> {
        let wall = wall_clock_at(date, Duration::hours(category.hour_offset().into()))?;
        let instant = self.zone.localize(wall)?;

        tracing::debug!(
            %date,
            %category,
            zone = self.zone.name(),
            %instant,
            "Resolved meal time"
        );

        Ok(ResolvedTimestamp { instant, category })
    }

    /// Same as [`resolve`](Self::resolve) for a category given by name.
    pub fn resolve_named(
        &self,
        date: Date,
        category: &str,
    ) -> Result<ResolvedTimestamp, ResolveError> {
        let category = MealCategory::from_name(category).inspect_err(|_| {
            tracing::warn!(category, "Refusing to resolve unknown meal category");
        })?;
        self.resolve(date, category)
    }
}

/// Local midnight of `date` advanced by `offset`, carrying into later days,
/// months and years as needed.
pub(crate) fn wall_clock_at(
    date: Date,
    offset: Duration,
) -> Result<PrimitiveDateTime, ResolveError> {
    date.midnight()
        .checked_add(offset)
        .ok_or(ResolveError::OutOfRange(date))
}

/// A meal's resolved instant, carrying the UTC offset of its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    instant: OffsetDateTime,
    category: MealCategory,
}

impl ResolvedTimestamp {
    pub fn instant(&self) -> OffsetDateTime {
        self.instant
    }

    pub fn category(&self) -> MealCategory {
        self.category
    }

    /// Wall-clock date and time in the zone it was resolved in.
    pub fn local(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.instant.date(), self.instant.time())
    }

    pub fn offset(&self) -> UtcOffset {
        self.instant.offset()
    }

    /// `YYYY-MM-DDTHH:mm:ss.sssZ`, the form written to `eaten_at`.
    pub fn to_iso_string(&self) -> Result<String, ResolveError> {
        Ok(self.instant.to_offset(UtcOffset::UTC).format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))?)
    }

    /// Local wall clock without an offset, e.g. `2024-03-15T08:00:00.000`.
    pub fn to_local_string(&self) -> Result<String, ResolveError> {
        Ok(self.local().format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
        ))?)
    }

    /// RFC 3339 with the local offset, e.g. `2024-03-15T08:00:00-04:00`.
    pub fn to_rfc3339(&self) -> Result<String, ResolveError> {
        Ok(self.instant.format(&Rfc3339)?)
    }
}

impl fmt::Display for ResolvedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iso = self.to_iso_string().map_err(|_| fmt::Error)?;
        f.write_str(&iso)
    }
}

impl Serialize for ResolvedTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let iso = self.to_iso_string().map_err(S::Error::custom)?;
        serializer.serialize_str(&iso)
    }
}
