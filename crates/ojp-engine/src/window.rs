//! The calendar day window -- the open interval of each day that may hold
//! events, anchored to a concrete date in the clinic's timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::span::TimeSpan;

fn default_tz() -> Tz {
    Tz::UTC
}

/// Daily open interval `[open, close)` in local wall-clock time.
///
/// Supplied by configuration, not owned by the engine. `open < close` is a
/// configuration precondition; overnight windows are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
    #[serde(default = "default_tz")]
    pub tz: Tz,
}

impl DayWindow {
    pub fn new(open: NaiveTime, close: NaiveTime, tz: Tz) -> Self {
        Self { open, close, tz }
    }

    /// Concrete UTC span of the window on the given calendar day.
    pub fn anchor(&self, day: NaiveDate) -> TimeSpan {
        TimeSpan::new(self.instant(day, self.open), self.instant(day, self.close))
    }

    /// UTC instant of a wall-clock time on a calendar day.
    pub fn instant(&self, day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        self.resolve(day.and_time(time))
    }

    /// Calendar day bucket of an instant, in the window's timezone.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Resolve a local wall-clock datetime to a UTC instant.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
    /// inside a DST gap shift forward one hour, which lands on a valid
    /// wall-clock time in every IANA zone (gaps never exceed one hour).
    fn resolve(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(first, _) => first.with_timezone(&Utc),
            LocalResult::None => self
                .tz
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| local.and_utc()),
        }
    }
}
