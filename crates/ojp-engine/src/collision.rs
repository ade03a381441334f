//! The collision detector -- decides whether a proposed placement is legal
//! and, when it is not purely out of bounds, which events it overlaps.
//!
//! Pure function of its inputs, O(n) in the room-day candidate count.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::EventId;
use crate::placement::Placement;
use crate::snapshot::ScheduleSnapshot;
use crate::window::DayWindow;

/// Why a placement cannot exist on this calendar day at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsViolation {
    /// Some instant of the placement precedes the day's opening time.
    /// Takes priority when both violations apply.
    BeforeStart,
    /// Some instant of the placement exceeds the day's closing time.
    AfterEnd,
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoundsViolation::BeforeStart => "before-start",
            BoundsViolation::AfterEnd => "after-end",
        })
    }
}

/// One candidate event the placement overlaps.
///
/// `overlap_minutes` sums the overlap against the main span and against the
/// separator span; the two spans are disjoint, so the sum is the total
/// overlapped time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub id: EventId,
    pub overlap_minutes: i64,
}

/// Verdict of the collision detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum PlacementCheck {
    /// The placement falls outside the calendar day window. No conflict set
    /// is computed for an out-of-bounds placement.
    OutOfBounds { reason: BoundsViolation },
    /// The placement overlaps nothing.
    Fits,
    /// The placement overlaps existing events, listed in ascending start
    /// order of the conflicting event. A candidate conflicting with both the
    /// main span and the separator span appears once.
    Collides { conflicts: Vec<Collision> },
}

impl PlacementCheck {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, PlacementCheck::OutOfBounds { .. })
    }

    pub fn has_collision(&self) -> bool {
        matches!(self, PlacementCheck::Collides { .. })
    }
}

/// Check a resolved placement against the room-day bucket it targets.
///
/// Bounds are tested first and short-circuit: the union span of the main
/// event and its separator must lie inside the day window anchored to the
/// placement's target day, with `before-start` reported in preference to
/// `after-end`. Only an in-bounds placement is tested for overlaps; the
/// dragged event and its paired separator are never candidates.
pub fn check_placement(
    snapshot: &ScheduleSnapshot,
    window: &DayWindow,
    placement: &Placement,
) -> PlacementCheck {
    let bounds = window.anchor(placement.day);
    let occupied = placement.occupied();

    // occupied() is the hull of main + separator, so its edges are exactly
    // the earliest and latest instants of the whole placement.
    if occupied.start < bounds.start {
        return PlacementCheck::OutOfBounds {
            reason: BoundsViolation::BeforeStart,
        };
    }
    if occupied.end > bounds.end {
        return PlacementCheck::OutOfBounds {
            reason: BoundsViolation::AfterEnd,
        };
    }

    let mut conflicts = Vec::new();
    for event in snapshot.room_day(placement.room, placement.day, window) {
        if placement.involves(event.id) {
            continue;
        }
        let span = event.span();
        let hits_main = placement.main.overlaps(&span);
        let hits_separator = placement
            .separator
            .is_some_and(|sep| sep.overlaps(&span));
        if hits_main || hits_separator {
            let overlap_minutes = placement.main.overlap_minutes(&span)
                + placement
                    .separator
                    .map_or(0, |sep| sep.overlap_minutes(&span));
            conflicts.push(Collision {
                id: event.id,
                overlap_minutes,
            });
        }
    }

    if conflicts.is_empty() {
        PlacementCheck::Fits
    } else {
        PlacementCheck::Collides { conflicts }
    }
}
