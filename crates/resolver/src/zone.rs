use std::{env, fmt};

use serde::Deserialize;
use strum::{Display, EnumString};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{OffsetError, PrimitiveDateTimeExt, TimeZone, ToTimezone, Tz, system, timezones};

use crate::ResolveError;

/// What to do with a wall-clock time that a DST change skips over.
#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Move forward by the length of the gap (02:30 becomes 03:30).
    #[default]
    ShiftForward,
    Reject,
}

/// The civil timezone meal times are computed in.
#[derive(Clone, Copy)]
pub struct Zone {
    name: &'static str,
    tz: Option<&'static Tz>,
    gap_policy: GapPolicy,
}

impl Zone {
    pub fn utc() -> Self {
        Self {
            name: "UTC",
            tz: None,
            gap_policy: GapPolicy::default(),
        }
    }

    /// Look up an IANA zone such as `America/New_York`.
    pub fn named(name: &str) -> Result<Self, ResolveError> {
        if name.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        timezones::get_by_name(name)
            .map(Self::from_tz)
            .ok_or_else(|| ResolveError::UnknownTimezone(name.to_owned()))
    }

    /// The zone of the running process.
    ///
    /// `TZ` wins when it names a known zone, then the system setting
    /// (`/etc/localtime` on Unix). UTC when neither can be determined.
    pub fn ambient() -> Self {
        if let Some(zone) = env::var("TZ").ok().and_then(|value| Self::from_tz_variable(&value)) {
            return zone;
        }

        match system::get_timezone() {
            Ok(tz) => Self::from_tz(tz),
            Err(e) => {
                tracing::debug!(error = %e, "System timezone unavailable, falling back to UTC");
                Self::utc()
            }
        }
    }

    fn from_tz(tz: &'static Tz) -> Self {
        Self {
            name: tz.name(),
            tz: Some(tz),
            gap_policy: GapPolicy::default(),
        }
    }

    /// `TZ` as libc reads it: `:Europe/Paris`, a zoneinfo path or a bare name.
    fn from_tz_variable(value: &str) -> Option<Self> {
        let name = value.trim().trim_start_matches(':');
        let name = name.rsplit_once("zoneinfo/").map_or(name, |(_, name)| name);
        if name.is_empty() {
            return None;
        }

        Self::named(name)
            .inspect_err(|_| tracing::debug!(tz = value, "Ignoring unrecognised TZ value"))
            .ok()
    }

    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    /// UTC offset in force at `instant`.
    pub fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        self.to_local(instant).offset()
    }

    /// Express `instant` in this zone's local time.
    pub fn to_local(&self, instant: OffsetDateTime) -> OffsetDateTime {
        match self.tz {
            Some(tz) => instant.to_timezone(tz),
            None => instant.to_offset(UtcOffset::UTC),
        }
    }

    /// Map a wall-clock time to an instant in this zone.
    ///
    /// Ambiguous times (the repeated hour when clocks go back) resolve to
    /// the earlier instant. Skipped times follow the zone's [`GapPolicy`].
    pub fn localize(&self, wall: PrimitiveDateTime) -> Result<OffsetDateTime, ResolveError> {
        let Some(tz) = self.tz else {
            return Ok(wall.assume_utc());
        };

        match wall.assume_timezone(tz) {
            Ok(instant) => Ok(instant),
            Err(OffsetError::Ambiguous(first, second)) => Ok(first.min(second)),
            Err(OffsetError::Undefined) => match self.gap_policy {
                GapPolicy::ShiftForward => {
                    tracing::debug!(zone = self.name, %wall, "Wall clock falls in a DST gap, shifting forward");
                    Ok(wall.assume_offset(self.offset_before_gap(wall)).to_timezone(tz))
                }
                GapPolicy::Reject => Err(ResolveError::NonexistentLocalTime {
                    wall,
                    zone: self.name.to_owned(),
                }),
            },
        }
    }

    /// Offset in force just before the transition that skips `wall`.
    ///
    /// Read with the offset from one side of the gap, `wall` is an instant
    /// on the other side, so the lookup settles into alternating between
    /// the two. Clocks move forward over a gap: the smaller one is before.
    fn offset_before_gap(&self, wall: PrimitiveDateTime) -> UtcOffset {
        let mut offset = self.offset_at(wall.assume_utc());
        for _ in 0..2 {
            offset = self.offset_at(wall.assume_offset(offset));
        }
        offset.min(self.offset_at(wall.assume_offset(offset)))
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::utc()
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.gap_policy == other.gap_policy
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zone")
            .field("name", &self.name)
            .field("gap_policy", &self.gap_policy)
            .finish()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
