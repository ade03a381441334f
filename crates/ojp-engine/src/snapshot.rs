//! An immutable snapshot of the event set.
//!
//! The drag session controller captures one snapshot at drag start and feeds
//! it through the whole decision cycle, so a concurrent edit elsewhere can
//! never produce a shift plan computed against two different states.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventId, Room};
use crate::window::DayWindow;

/// By-value snapshot of all scheduled events.
///
/// Serializes as a plain JSON array of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleSnapshot {
    events: Vec<Event>,
}

impl ScheduleSnapshot {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events in one room on one calendar day, in ascending start order.
    ///
    /// The day bucket is the local date of the event's start in the window's
    /// timezone.
    pub fn room_day(&self, room: Room, day: NaiveDate, window: &DayWindow) -> Vec<&Event> {
        let mut bucket: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.room == room && window.day_of(e.start) == day)
            .collect();
        bucket.sort_by_key(|e| (e.start, e.id));
        bucket
    }
}
