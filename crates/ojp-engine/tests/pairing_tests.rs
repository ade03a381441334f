//! Tests for the operation/cleanup-separator pairing index.

use chrono::{DateTime, TimeZone, Utc};
use ojp_engine::{Event, EventId, EventKind, PairingIndex, PairingRule, Room};

/// Helper: instant on the test day (2024-06-03, UTC).
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, hour, min, 0).unwrap()
}

fn event(id: u64, kind: EventKind, start: (u32, u32), end: (u32, u32)) -> Event {
    Event {
        id: EventId(id),
        room: Room::Zeleny,
        kind,
        start: at(start.0, start.1),
        end: at(end.0, end.1),
        title: format!("event {}", id),
        surgeon: None,
        note: None,
    }
}

#[test]
fn adjacent_separator_is_paired() {
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        event(2, EventKind::CleanupSeparator, (10, 0), (10, 15)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert_eq!(index.separator_of(EventId(1)), Some(EventId(2)));
    assert_eq!(index.operation_of(EventId(2)), Some(EventId(1)));
}

#[test]
fn gap_at_the_tolerance_boundary_still_pairs() {
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        event(2, EventKind::CleanupSeparator, (10, 5), (10, 20)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert_eq!(index.separator_of(EventId(1)), Some(EventId(2)));
}

#[test]
fn gap_beyond_tolerance_does_not_pair() {
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        event(2, EventKind::CleanupSeparator, (10, 6), (10, 21)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert_eq!(index.separator_of(EventId(1)), None);
    assert_eq!(index.operation_of(EventId(2)), None);
}

#[test]
fn tolerance_is_configurable() {
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        event(2, EventKind::CleanupSeparator, (10, 6), (10, 21)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::with_tolerance_minutes(10));

    assert_eq!(index.separator_of(EventId(1)), Some(EventId(2)));
}

#[test]
fn separator_in_another_room_is_not_paired() {
    let mut separator = event(2, EventKind::CleanupSeparator, (10, 0), (10, 15));
    separator.room = Room::Modry;
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        separator,
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert!(index.is_empty());
}

#[test]
fn nearest_separator_wins() {
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        event(2, EventKind::CleanupSeparator, (10, 4), (10, 19)),
        event(3, EventKind::CleanupSeparator, (10, 1), (10, 16)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert_eq!(index.separator_of(EventId(1)), Some(EventId(3)));
    assert_eq!(index.operation_of(EventId(2)), None);
}

#[test]
fn each_separator_is_claimed_by_one_operation() {
    // Two unrelated back-to-back pairs closer together than the tolerance.
    // Operations claim in ascending start order, nearest gap first, so the
    // relation stays deterministic and one-to-one.
    let events = vec![
        event(1, EventKind::Operation, (8, 0), (9, 0)),
        event(2, EventKind::CleanupSeparator, (9, 2), (9, 10)),
        event(3, EventKind::Operation, (9, 10), (10, 0)),
        event(4, EventKind::CleanupSeparator, (10, 3), (10, 15)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert_eq!(index.separator_of(EventId(1)), Some(EventId(2)));
    assert_eq!(index.separator_of(EventId(3)), Some(EventId(4)));
    assert_eq!(index.operation_of(EventId(2)), Some(EventId(1)));
    assert_eq!(index.operation_of(EventId(4)), Some(EventId(3)));
}

#[test]
fn pauses_adjacent_to_an_operation_are_never_paired() {
    let events = vec![
        event(1, EventKind::Operation, (9, 0), (10, 0)),
        event(2, EventKind::Pause, (10, 0), (10, 15)),
    ];
    let index = PairingIndex::infer(&events, &PairingRule::default());

    assert!(index.is_empty());
}

#[test]
fn stored_relation_can_be_supplied_directly() {
    let index = PairingIndex::from_pairs([(EventId(7), EventId(8))]);

    assert_eq!(index.separator_of(EventId(7)), Some(EventId(8)));
    assert_eq!(index.operation_of(EventId(8)), Some(EventId(7)));
    assert_eq!(index.separator_of(EventId(8)), None);
}
