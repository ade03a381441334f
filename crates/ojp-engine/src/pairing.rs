//! Operation / cleanup-separator pairing.
//!
//! An operation may have at most one cleanup separator that starts where the
//! operation ends, within a small adjacency tolerance. The pairing is held in
//! an explicit index: callers either supply the stored relation directly or
//! derive it once per snapshot from the adjacency rule. The algorithms never
//! re-infer pairing mid-calculation, so the tolerance window cannot produce
//! different answers at different steps of the same decision cycle.

use std::collections::HashMap;

use chrono::Duration;

use crate::event::{Event, EventId, EventKind};

/// Adjacency rule used when deriving pairing from event geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingRule {
    /// Maximum distance between an operation's end and its separator's start.
    pub tolerance: Duration,
}

impl PairingRule {
    pub fn with_tolerance_minutes(minutes: i64) -> Self {
        Self {
            tolerance: Duration::minutes(minutes),
        }
    }
}

impl Default for PairingRule {
    fn default() -> Self {
        Self::with_tolerance_minutes(5)
    }
}

/// Bidirectional operation <-> separator relation.
#[derive(Debug, Clone, Default)]
pub struct PairingIndex {
    sep_by_op: HashMap<EventId, EventId>,
    op_by_sep: HashMap<EventId, EventId>,
}

impl PairingIndex {
    /// Build the index from a stored relation of `(operation, separator)`
    /// pairs. Later pairs override earlier ones for the same operation.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (EventId, EventId)>) -> Self {
        let mut index = Self::default();
        for (op, sep) in pairs {
            index.sep_by_op.insert(op, sep);
            index.op_by_sep.insert(sep, op);
        }
        index
    }

    /// Derive the relation from event adjacency.
    ///
    /// Operations are visited in ascending start order (ties broken by id)
    /// and claim the nearest unclaimed cleanup separator in the same room
    /// whose start lies within `rule.tolerance` of the operation's end.
    /// Deterministic for any input; when several unrelated back-to-back
    /// pairs sit closer together than the tolerance, nearest-gap wins.
    pub fn infer(events: &[Event], rule: &PairingRule) -> Self {
        let mut operations: Vec<&Event> = events
            .iter()
            .filter(|e| e.kind == EventKind::Operation)
            .collect();
        operations.sort_by_key(|e| (e.start, e.id));

        let mut index = Self::default();
        for op in operations {
            let candidate = events
                .iter()
                .filter(|e| {
                    e.kind == EventKind::CleanupSeparator
                        && e.room == op.room
                        && !index.op_by_sep.contains_key(&e.id)
                })
                .filter_map(|e| {
                    let gap = (e.start - op.end).abs();
                    (gap <= rule.tolerance).then_some((gap, e.id))
                })
                .min_by_key(|&(gap, id)| (gap, id));

            if let Some((_, sep_id)) = candidate {
                index.sep_by_op.insert(op.id, sep_id);
                index.op_by_sep.insert(sep_id, op.id);
            }
        }
        index
    }

    /// Separator paired to the given operation, if any.
    pub fn separator_of(&self, operation: EventId) -> Option<EventId> {
        self.sep_by_op.get(&operation).copied()
    }

    /// Operation paired to the given separator, if any.
    pub fn operation_of(&self, separator: EventId) -> Option<EventId> {
        self.op_by_sep.get(&separator).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sep_by_op.is_empty()
    }
}
