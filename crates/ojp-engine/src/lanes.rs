//! Side-by-side lane layout for overlapping events.
//!
//! The calendar renders a room-day column; events that overlap in time are
//! drawn next to each other in separate lanes. Greedy interval packing keeps
//! the lane count minimal for the common back-to-back schedules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventId};

/// Lane index assigned to one event within its room-day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneAssignment {
    pub id: EventId,
    pub lane: usize,
}

/// Assign lanes to the events of one room-day bucket.
///
/// Events ordered by start (then end, then id) take the lowest-index lane
/// whose latest occupant ends at or before their start; touching events
/// share a lane. Returns assignments in that order.
pub fn assign_lanes(events: &[&Event]) -> Vec<LaneAssignment> {
    let mut ordered: Vec<&Event> = events.to_vec();
    ordered.sort_by_key(|e| (e.start, e.end, e.id));

    let mut lane_ends: Vec<DateTime<Utc>> = Vec::new();
    let mut assignments = Vec::with_capacity(ordered.len());
    for event in ordered {
        let lane = match lane_ends
            .iter_mut()
            .enumerate()
            .find(|(_, end)| **end <= event.start)
        {
            Some((lane, end)) => {
                *end = event.end;
                lane
            }
            None => {
                lane_ends.push(event.end);
                lane_ends.len() - 1
            }
        };
        assignments.push(LaneAssignment {
            id: event.id,
            lane,
        });
    }
    assignments
}
