//! Half-open time intervals -- the overlap test everything else builds on.
//!
//! Two spans overlap when `a.start < b.end && b.start < a.end`. A span that
//! ends exactly where another starts does NOT overlap it; this is what makes
//! an operation legally adjacent to its cleanup separator.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` in UTC.
///
/// Instants are integer-backed (`DateTime<Utc>`), so comparisons are exact.
/// `end > start` is a caller precondition, not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Strict half-open overlap test. Symmetric; touching spans return false.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared between the two spans, 0 when they do not overlap.
    ///
    /// The overlap is `min(a.end, b.end) - max(a.start, b.start)`.
    pub fn overlap_minutes(&self, other: &TimeSpan) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        (overlap_end - overlap_start).num_minutes()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Smallest span covering both `self` and `other`.
    pub fn hull(&self, other: &TimeSpan) -> TimeSpan {
        TimeSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
