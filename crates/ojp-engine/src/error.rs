//! Error types for placement resolution and shift planning.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can abort placement resolution or a shift calculation.
///
/// Detector verdicts (out-of-bounds, conflict lists) are ordinary return
/// values, not errors; see [`crate::collision::PlacementCheck`]. These
/// variants cover the cases where no plan can be produced at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The drag request names an event that is not in the snapshot.
    #[error("unknown event {0}")]
    UnknownEvent(EventId),

    /// A shifted event would leave the permitted calendar area.
    #[error("event {id} would leave the permitted calendar area")]
    ShiftOutsideWindow { id: EventId },

    /// A shifted cleanup separator would leave the permitted calendar area.
    #[error("cleanup separator {id} would leave the permitted calendar area")]
    SeparatorOutsideWindow { id: EventId },
}

/// Convenience alias used throughout ojp-engine.
pub type Result<T> = std::result::Result<T, PlanError>;
