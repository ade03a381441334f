//! The scheduled-event model: rooms, event categories, and the event record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::span::TimeSpan;

/// Stable identifier of a scheduled event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical operating room ("sál"). Fixed enumerated resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Room {
    Zeleny,
    Modry,
    Zluty,
    Cerveny,
}

impl Room {
    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Zeleny => "ZELENY",
            Room::Modry => "MODRY",
            Room::Zluty => "ZLUTY",
            Room::Cerveny => "CERVENY",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Room {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ZELENY" => Ok(Room::Zeleny),
            "MODRY" => Ok(Room::Modry),
            "ZLUTY" => Ok(Room::Zluty),
            "CERVENY" => Ok(Room::Cerveny),
            other => Err(format!(
                "unknown room '{}' (expected ZELENY, MODRY, ZLUTY or CERVENY)",
                other
            )),
        }
    }
}

/// Category of a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A scheduled surgical procedure ("operace").
    Operation,
    /// The mandatory cleaning buffer following an operation ("úklid").
    CleanupSeparator,
    /// A non-surgical blocked interval ("pauza").
    Pause,
    /// A whole-day or partial holiday block.
    HolidayBlock,
}

/// An entity occupying one room for one contiguous interval on one day.
///
/// `end > start` is an upstream precondition; the engine never constructs
/// events and treats the invariant as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub room: Room,
    pub kind: EventKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surgeon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Event {
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}
