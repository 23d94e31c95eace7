use time::OffsetDateTime;

use crate::Zone;

const SECONDS_PER_DAY: u64 = 60 * 60 * 24;

/// Source of "now", so day-boundary checks can be pinned in tests.
pub trait Clock {
    fn now_utc(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.0
    }
}

/// Whether `instant` falls on yesterday or earlier, as seen from `zone`.
pub fn is_before_today(instant: OffsetDateTime, zone: &Zone, clock: &impl Clock) -> bool {
    let date = zone.to_local(instant).date();
    let today = zone.to_local(clock.now_utc()).date();
    date < today
}

/// Whole days contained in `duration`.
pub fn as_days(duration: std::time::Duration) -> u64 {
    duration.as_secs() / SECONDS_PER_DAY
}
