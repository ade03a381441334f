//! Proposed placements -- the candidate new position of a dragged event.
//!
//! A placement exists only for the duration of a single drag-and-drop
//! decision cycle and is discarded after commit or cancel.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::event::{EventId, EventKind, Room};
use crate::pairing::PairingIndex;
use crate::shift::ShiftDirection;
use crate::snapshot::ScheduleSnapshot;
use crate::span::TimeSpan;
use crate::window::DayWindow;

/// A drop target as the drag session controller resolves it: which event,
/// which room, which day, and the wall-clock start time of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRequest {
    pub event_id: EventId,
    pub room: Room,
    pub day: NaiveDate,
    pub start: NaiveTime,
}

/// Resolved candidate position for a dragged event and, when the event is an
/// operation with a paired cleanup separator, for that separator too.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub event_id: EventId,
    pub separator_id: Option<EventId>,
    pub room: Room,
    pub day: NaiveDate,
    pub main: TimeSpan,
    pub separator: Option<TimeSpan>,
    original_start: DateTime<Utc>,
}

impl Placement {
    /// Resolve a drag request against a snapshot.
    ///
    /// The main span keeps the dragged event's duration. A paired separator
    /// keeps both its duration and its offset from the operation's end, so
    /// legal adjacency survives the move unchanged.
    pub fn resolve(
        snapshot: &ScheduleSnapshot,
        pairing: &PairingIndex,
        window: &DayWindow,
        request: &DragRequest,
    ) -> Result<Placement> {
        let event = snapshot
            .get(request.event_id)
            .ok_or(PlanError::UnknownEvent(request.event_id))?;

        let main_start = window.instant(request.day, request.start);
        let main = TimeSpan::new(main_start, main_start + event.duration());

        let paired = if event.kind == EventKind::Operation {
            pairing
                .separator_of(event.id)
                .and_then(|id| snapshot.get(id))
        } else {
            None
        };

        let (separator_id, separator) = match paired {
            Some(sep) => {
                let sep_start = main.end + (sep.start - event.end);
                (
                    Some(sep.id),
                    Some(TimeSpan::new(sep_start, sep_start + sep.duration())),
                )
            }
            None => (None, None),
        };

        Ok(Placement {
            event_id: event.id,
            separator_id,
            room: request.room,
            day: request.day,
            main,
            separator,
            original_start: event.start,
        })
    }

    /// Union span of the main event and its separator, the region the drag
    /// claims on the calendar.
    pub fn occupied(&self) -> TimeSpan {
        match &self.separator {
            Some(sep) => self.main.hull(sep),
            None => self.main,
        }
    }

    /// Whether the given event takes part in this placement (the dragged
    /// event itself or its paired separator). Such events are never
    /// collision candidates.
    pub fn involves(&self, id: EventId) -> bool {
        id == self.event_id || self.separator_id == Some(id)
    }

    /// Shift direction implied by the move: forward when the proposed start
    /// is at or after the dragged event's original start. One global
    /// decision per drag.
    pub fn direction(&self) -> ShiftDirection {
        if self.main.start >= self.original_start {
            ShiftDirection::Forward
        } else {
            ShiftDirection::Backward
        }
    }

    pub fn original_start(&self) -> DateTime<Utc> {
        self.original_start
    }
}
