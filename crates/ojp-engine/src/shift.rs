//! The shift calculator -- resolves a detected collision by computing a
//! cascade of time-shifts for every transitively affected event, or declares
//! the move infeasible.
//!
//! The cascade is a worklist fixpoint: a pending queue seeded with the direct
//! conflicts, a resolved set, and a cursor that packs shifted events against
//! the edge of the region the drag claims. Moving one event out of the way
//! can push it into the next, so every placement is followed by a rescan of
//! the not-yet-shifted events.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::event::{Event, EventId, EventKind};
use crate::pairing::PairingIndex;
use crate::placement::Placement;
use crate::snapshot::ScheduleSnapshot;
use crate::span::TimeSpan;
use crate::window::DayWindow;

/// Direction of a shift cascade. One global decision per drag operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftDirection {
    Forward,
    Backward,
}

/// One entry of a shift plan: where an event moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMove {
    pub id: EventId,
    pub new_start: DateTime<Utc>,
    pub new_end: DateTime<Utc>,
}

/// The cascade of secondary moves that resolves a collision.
///
/// The caller applies every move plus the dragged event's own move as one
/// atomic batch, or discards the whole plan; the calculator never partially
/// commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftPlan {
    pub direction: ShiftDirection,
    pub moves: Vec<EventMove>,
}

/// Compute the shift cascade for a placement that collides.
///
/// Returns an empty move list when nothing overlaps the claimed region. On
/// infeasibility (some shifted event would leave the day window) the whole
/// calculation aborts with the offending event in the error; no partial plan
/// is ever returned.
///
/// Callers are expected to have run [`crate::collision::check_placement`]
/// first; the placement's own bounds are the detector's concern, the
/// cascaded moves are checked here.
pub fn plan_shift(
    snapshot: &ScheduleSnapshot,
    pairing: &PairingIndex,
    window: &DayWindow,
    placement: &Placement,
) -> Result<ShiftPlan> {
    let direction = placement.direction();
    let bounds = window.anchor(placement.day);
    let occupied = placement.occupied();

    let candidates: Vec<&Event> = snapshot
        .room_day(placement.room, placement.day, window)
        .into_iter()
        .filter(|e| !placement.involves(e.id))
        .collect();
    let starts: HashMap<EventId, DateTime<Utc>> =
        candidates.iter().map(|e| (e.id, e.start)).collect();

    let mut pending: Vec<EventId> = candidates
        .iter()
        .filter(|e| e.span().overlaps(&occupied))
        .map(|e| e.id)
        .collect();
    sort_queue(&mut pending, &starts, direction);

    let mut resolved: HashSet<EventId> = HashSet::new();
    let mut moves: Vec<EventMove> = Vec::new();
    let mut cursor = match direction {
        ShiftDirection::Forward => occupied.end,
        ShiftDirection::Backward => occupied.start,
    };

    while !pending.is_empty() {
        let id = pending.remove(0);
        if resolved.contains(&id) {
            continue;
        }
        let Some(event) = candidates.iter().find(|e| e.id == id).copied() else {
            continue;
        };

        // A shifted operation drags its unshifted separator along and vice
        // versa, so the pair stays exactly adjacent. Placement order runs
        // away from the claimed region: forward packs the operation first
        // and its separator after it; backward packs the separator at the
        // cursor and the operation immediately before it, whichever of the
        // two was dequeued.
        let companion = companion_of(event, pairing, &candidates, &resolved, direction);
        let chain: Vec<&Event> = match (direction, companion) {
            (ShiftDirection::Forward, Some(separator)) => vec![event, separator],
            (ShiftDirection::Backward, Some(other)) => match event.kind {
                EventKind::CleanupSeparator => vec![event, other],
                _ => vec![other, event],
            },
            (_, None) => vec![event],
        };

        let mut region: Option<TimeSpan> = None;
        for link in chain {
            let new_span = match direction {
                ShiftDirection::Forward => TimeSpan::new(cursor, cursor + link.duration()),
                ShiftDirection::Backward => TimeSpan::new(cursor - link.duration(), cursor),
            };
            check_in_window(link, new_span, bounds)?;
            moves.push(EventMove {
                id: link.id,
                new_start: new_span.start,
                new_end: new_span.end,
            });
            resolved.insert(link.id);
            cursor = match direction {
                ShiftDirection::Forward => new_span.end,
                ShiftDirection::Backward => new_span.start,
            };
            region = Some(region.map_or(new_span, |r| r.hull(&new_span)));
        }

        // Re-collision rescan: the just-occupied region may now overlap
        // events that were clear of the original drag. Enqueue them so the
        // cascade stays transitive.
        if let Some(region) = region {
            for other in &candidates {
                if resolved.contains(&other.id) || pending.contains(&other.id) {
                    continue;
                }
                if other.span().overlaps(&region) {
                    pending.push(other.id);
                }
            }
        }
        sort_queue(&mut pending, &starts, direction);
    }

    Ok(ShiftPlan { direction, moves })
}

/// The paired event that must move together with `event`, when it has not
/// been shifted yet. A dequeued operation always pulls its separator; a
/// dequeued separator pulls its operation only in a backward cascade, where
/// the descending queue order hands the separator out first.
fn companion_of<'a>(
    event: &Event,
    pairing: &PairingIndex,
    candidates: &[&'a Event],
    resolved: &HashSet<EventId>,
    direction: ShiftDirection,
) -> Option<&'a Event> {
    let companion_id = match event.kind {
        EventKind::Operation => pairing.separator_of(event.id),
        EventKind::CleanupSeparator if direction == ShiftDirection::Backward => {
            pairing.operation_of(event.id)
        }
        _ => None,
    }?;
    if resolved.contains(&companion_id) {
        return None;
    }
    candidates.iter().find(|e| e.id == companion_id).copied()
}

fn check_in_window(event: &Event, span: TimeSpan, bounds: TimeSpan) -> Result<()> {
    if span.start < bounds.start || span.end > bounds.end {
        return Err(match event.kind {
            EventKind::CleanupSeparator => PlanError::SeparatorOutsideWindow { id: event.id },
            _ => PlanError::ShiftOutsideWindow { id: event.id },
        });
    }
    Ok(())
}

/// Keep the worklist in cascade order: ascending start for a forward shift,
/// descending for a backward shift, ids as the deterministic tie-break.
fn sort_queue(
    queue: &mut [EventId],
    starts: &HashMap<EventId, DateTime<Utc>>,
    direction: ShiftDirection,
) {
    match direction {
        ShiftDirection::Forward => queue.sort_by_key(|id| (starts.get(id).copied(), *id)),
        ShiftDirection::Backward => {
            queue.sort_by_key(|id| Reverse((starts.get(id).copied(), *id)))
        }
    }
}
