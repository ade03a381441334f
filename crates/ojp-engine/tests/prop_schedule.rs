//! Property-based tests using proptest.
//!
//! These verify invariants that should hold for *any* schedule and drag, not
//! just the specific examples in `collision_tests.rs` and `shift_tests.rs`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use ojp_engine::{
    check_placement, plan_shift, DayWindow, DragRequest, Event, EventId, EventKind, PairingIndex,
    PairingRule, Placement, PlacementCheck, Room, ScheduleSnapshot, TimeSpan,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// (duration, preceding gap) in minutes, for a run of back-to-back events.
fn arb_layout() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((15i64..=90, 0i64..=30), 1..=6)
}

/// Offset of the first event from the window's opening time, in minutes.
fn arb_offset() -> impl Strategy<Value = i64> {
    0i64..=60
}

/// Wall-clock drop target, minutes past the window's opening time.
fn arb_target() -> impl Strategy<Value = i64> {
    0i64..=780
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 7, 0, 0).unwrap()
}

fn window() -> DayWindow {
    DayWindow::new(
        NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        Tz::UTC,
    )
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

/// Lay the generated (duration, gap) runs out as a conflict-free schedule of
/// operations starting `offset` minutes after opening.
fn build_schedule(layout: &[(i64, i64)], offset: i64) -> ScheduleSnapshot {
    let mut events = Vec::with_capacity(layout.len());
    let mut cursor = open() + Duration::minutes(offset);
    for (i, &(duration, gap)) in layout.iter().enumerate() {
        let start = cursor + Duration::minutes(gap);
        let end = start + Duration::minutes(duration);
        events.push(Event {
            id: EventId(i as u64 + 1),
            room: Room::Zeleny,
            kind: EventKind::Operation,
            start,
            end,
            title: format!("op {}", i + 1),
            surgeon: None,
            note: None,
        });
        cursor = end;
    }
    ScheduleSnapshot::new(events)
}

// ---------------------------------------------------------------------------
// Property 1: The overlap test matches its formula and is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_matches_formula_and_is_symmetric(
        a in 0i64..=800,
        la in 1i64..=120,
        b in 0i64..=800,
        lb in 1i64..=120,
    ) {
        let x = TimeSpan::new(
            open() + Duration::minutes(a),
            open() + Duration::minutes(a + la),
        );
        let y = TimeSpan::new(
            open() + Duration::minutes(b),
            open() + Duration::minutes(b + lb),
        );

        let expected = a < b + lb && b < a + la;
        prop_assert_eq!(x.overlaps(&y), expected);
        prop_assert_eq!(x.overlaps(&y), y.overlaps(&x), "overlap must be symmetric");
    }
}

// ---------------------------------------------------------------------------
// Property 2: Touching spans never overlap
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn touching_spans_never_overlap(
        a in 0i64..=700,
        la in 1i64..=60,
        lb in 1i64..=60,
    ) {
        let first = TimeSpan::new(
            open() + Duration::minutes(a),
            open() + Duration::minutes(a + la),
        );
        let second = TimeSpan::new(first.end, first.end + Duration::minutes(lb));

        prop_assert!(!first.overlaps(&second));
        prop_assert!(!second.overlaps(&first));
        prop_assert_eq!(first.overlap_minutes(&second), 0);
    }
}

// ---------------------------------------------------------------------------
// Property 3: An accepted shift plan applies to a conflict-free, in-window
// schedule with every duration preserved
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn accepted_plans_apply_cleanly(
        layout in arb_layout(),
        offset in arb_offset(),
        drag_pick in 0usize..6,
        target in arb_target(),
    ) {
        let snapshot = build_schedule(&layout, offset);
        let dragged = EventId((drag_pick % layout.len()) as u64 + 1);
        let pairing = PairingIndex::infer(snapshot.events(), &PairingRule::default());
        let request = DragRequest {
            event_id: dragged,
            room: Room::Zeleny,
            day: day(),
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap()
                + Duration::minutes(target),
        };
        let placement = Placement::resolve(&snapshot, &pairing, &window(), &request).unwrap();

        // The controller rejects out-of-bounds drops before ever planning.
        if check_placement(&snapshot, &window(), &placement).is_out_of_bounds() {
            return Ok(());
        }

        let Ok(plan) = plan_shift(&snapshot, &pairing, &window(), &placement) else {
            // Infeasible is a legitimate outcome near the window edges.
            return Ok(());
        };

        // Apply the placement and the plan the way the controller would.
        let mut events = snapshot.events().to_vec();
        for ev in &mut events {
            if ev.id == placement.event_id {
                ev.start = placement.main.start;
                ev.end = placement.main.end;
            } else if let Some(m) = plan.moves.iter().find(|m| m.id == ev.id) {
                ev.start = m.new_start;
                ev.end = m.new_end;
            }
        }
        let applied = ScheduleSnapshot::new(events);

        // Durations survive every move.
        for (before, after) in snapshot.events().iter().zip(applied.events()) {
            prop_assert_eq!(before.duration(), after.duration());
        }

        // Everything stays inside the day window.
        let bounds = window().anchor(day());
        for ev in applied.events() {
            prop_assert!(
                ev.start >= bounds.start && ev.end <= bounds.end,
                "event {} left the window: {:?}..{:?}",
                ev.id,
                ev.start,
                ev.end
            );
        }

        // No two events in the bucket overlap after the apply.
        let bucket = applied.room_day(Room::Zeleny, day(), &window());
        for (i, a) in bucket.iter().enumerate() {
            for b in bucket.iter().skip(i + 1) {
                prop_assert!(
                    !a.span().overlaps(&b.span()),
                    "{} and {} overlap after apply",
                    a.id,
                    b.id
                );
            }
        }

        // Re-running the detector against the applied snapshot agrees.
        prop_assert_eq!(
            check_placement(&applied, &window(), &placement),
            PlacementCheck::Fits
        );

        // The dragged event never appears in its own shift plan.
        prop_assert!(plan.moves.iter().all(|m| m.id != dragged));
    }
}
