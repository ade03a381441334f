//! # ojp-engine
//!
//! Collision detection and cascading shift planning for operating-room
//! calendars.
//!
//! The engine decides what a drag-and-drop on the calendar may do: does the
//! proposed placement fit inside the day window, which events does it
//! overlap, and can the overlap be resolved by pushing the colliding events
//! (together with their cleanup separators) forward or backward in time.
//! Every computation is a pure function over an immutable
//! [`ScheduleSnapshot`] captured at drag start; applying an accepted plan is
//! the caller's concern and must happen as one atomic batch.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
//! use chrono_tz::Tz;
//! use ojp_engine::{
//!     check_placement, DayWindow, DragRequest, Event, EventId, EventKind,
//!     PairingIndex, PairingRule, Placement, PlacementCheck, Room,
//!     ScheduleSnapshot,
//! };
//!
//! let snapshot = ScheduleSnapshot::new(vec![Event {
//!     id: EventId(1),
//!     room: Room::Zeleny,
//!     kind: EventKind::Operation,
//!     start: Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap(),
//!     end: Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap(),
//!     title: "Appendectomy".into(),
//!     surgeon: None,
//!     note: None,
//! }]);
//! let window = DayWindow::new(
//!     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
//!     Tz::UTC,
//! );
//! let pairing = PairingIndex::infer(snapshot.events(), &PairingRule::default());
//!
//! let request = DragRequest {
//!     event_id: EventId(1),
//!     room: Room::Zeleny,
//!     day: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
//!     start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
//! };
//! let placement = Placement::resolve(&snapshot, &pairing, &window, &request).unwrap();
//! assert_eq!(
//!     check_placement(&snapshot, &window, &placement),
//!     PlacementCheck::Fits
//! );
//! ```
//!
//! ## Modules
//!
//! - [`span`] — half-open time intervals and the overlap test
//! - [`event`] — rooms, event categories, the event record
//! - [`window`] — the per-day calendar window, anchored in a timezone
//! - [`pairing`] — explicit operation <-> cleanup-separator relation
//! - [`snapshot`] — immutable by-value snapshot of the event set
//! - [`placement`] — drag requests resolved into candidate placements
//! - [`collision`] — bounds and overlap verdict for a placement
//! - [`shift`] — the cascading shift planner
//! - [`lanes`] — side-by-side lane layout for overlapping events
//! - [`error`] — error types

pub mod collision;
pub mod error;
pub mod event;
pub mod lanes;
pub mod pairing;
pub mod placement;
pub mod shift;
pub mod snapshot;
pub mod span;
pub mod window;

pub use collision::{check_placement, BoundsViolation, Collision, PlacementCheck};
pub use error::PlanError;
pub use event::{Event, EventId, EventKind, Room};
pub use lanes::{assign_lanes, LaneAssignment};
pub use pairing::{PairingIndex, PairingRule};
pub use placement::{DragRequest, Placement};
pub use shift::{plan_shift, EventMove, ShiftDirection, ShiftPlan};
pub use snapshot::ScheduleSnapshot;
pub use span::TimeSpan;
pub use window::DayWindow;
