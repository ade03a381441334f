//! WASM bindings for ojp-engine.
//!
//! Exposes placement checking, shift planning, and lane layout to the
//! calendar front end via `wasm-bindgen`. All complex values cross the
//! boundary as JSON strings: the schedule snapshot is a JSON array of
//! events, the drag request and day window are JSON objects, and every
//! export returns a JSON string.
//!
//! Engine verdicts (out-of-bounds, collisions, infeasible plans) are data
//! and come back inside the JSON; only malformed input raises a JS error.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p ojp-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/engine/ \
//!   target/wasm32-unknown-unknown/release/ojp_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use ojp_engine::{
    assign_lanes, check_placement, plan_shift, DayWindow, DragRequest, EventMove, PairingIndex,
    PairingRule, Placement, PlacementCheck, Room, ScheduleSnapshot, ShiftDirection,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTO for the plan outcome crossing the WASM boundary
// ---------------------------------------------------------------------------

/// Outcome of a shift-plan request: either a valid plan or a reason string.
#[derive(Serialize)]
struct PlanOutcomeDto {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<ShiftDirection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    moves: Vec<EventMove>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: parse JSON inputs into engine types
// ---------------------------------------------------------------------------

fn parse_snapshot(json: &str) -> Result<ScheduleSnapshot, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

fn parse_drag(json: &str) -> Result<DragRequest, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid drag request JSON: {}", e)))
}

fn parse_window(json: &str) -> Result<DayWindow, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid day window JSON: {}", e)))
}

fn pairing_rule(tolerance_minutes: Option<u32>) -> PairingRule {
    tolerance_minutes
        .map(|m| PairingRule::with_tolerance_minutes(m as i64))
        .unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check a proposed placement against the schedule.
///
/// Returns the detector verdict as JSON, e.g.
/// `{"verdict":"collides","conflicts":[{"id":3,"overlap_minutes":30}]}` or
/// `{"verdict":"out-of-bounds","reason":"before-start"}`.
///
/// # Arguments
/// - `events_json` -- JSON array of scheduled events (the snapshot)
/// - `drag_json` -- `{event_id, room, day, start}` drop target
/// - `window_json` -- `{open, close, tz?}` day window
/// - `tolerance_minutes` -- optional pairing adjacency tolerance (default 5)
#[wasm_bindgen(js_name = "checkPlacement")]
pub fn check_placement_js(
    events_json: &str,
    drag_json: &str,
    window_json: &str,
    tolerance_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let snapshot = parse_snapshot(events_json)?;
    let request = parse_drag(drag_json)?;
    let window = parse_window(window_json)?;
    let pairing = PairingIndex::infer(snapshot.events(), &pairing_rule(tolerance_minutes));

    let placement = Placement::resolve(&snapshot, &pairing, &window, &request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&check_placement(&snapshot, &window, &placement))
}

/// Compute the shift cascade that would resolve a colliding placement.
///
/// Returns `{"valid":true,"direction":...,"moves":[...]}` on success and
/// `{"valid":false,"error":"..."}` when the placement itself is out of
/// bounds or when the cascade would push an event off the calendar. Both
/// are result values, not JS exceptions.
#[wasm_bindgen(js_name = "planShift")]
pub fn plan_shift_js(
    events_json: &str,
    drag_json: &str,
    window_json: &str,
    tolerance_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let snapshot = parse_snapshot(events_json)?;
    let request = parse_drag(drag_json)?;
    let window = parse_window(window_json)?;
    let pairing = PairingIndex::infer(snapshot.events(), &pairing_rule(tolerance_minutes));

    let placement = Placement::resolve(&snapshot, &pairing, &window, &request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // An out-of-bounds drop is fatal to the whole gesture; there is no plan
    // to compute around it.
    if let PlacementCheck::OutOfBounds { reason } = check_placement(&snapshot, &window, &placement)
    {
        return to_json(&PlanOutcomeDto {
            valid: false,
            direction: None,
            moves: Vec::new(),
            error: Some(format!(
                "placement leaves the permitted calendar area ({})",
                reason
            )),
        });
    }

    let outcome = match plan_shift(&snapshot, &pairing, &window, &placement) {
        Ok(plan) => PlanOutcomeDto {
            valid: true,
            direction: Some(plan.direction),
            moves: plan.moves,
            error: None,
        },
        Err(e) => PlanOutcomeDto {
            valid: false,
            direction: None,
            moves: Vec::new(),
            error: Some(e.to_string()),
        },
    };
    to_json(&outcome)
}

/// Lane layout for one room-day column.
///
/// Returns a JSON array of `{id, lane}` assignments for the events of the
/// given room and calendar day.
///
/// # Arguments
/// - `events_json` -- JSON array of scheduled events (the snapshot)
/// - `room` -- room name (e.g., "ZELENY")
/// - `day` -- ISO calendar date (e.g., "2024-06-03")
/// - `window_json` -- `{open, close, tz?}` day window (for day bucketing)
#[wasm_bindgen(js_name = "assignLanes")]
pub fn assign_lanes_js(
    events_json: &str,
    room: &str,
    day: &str,
    window_json: &str,
) -> Result<String, JsValue> {
    let snapshot = parse_snapshot(events_json)?;
    let window = parse_window(window_json)?;
    let room: Room = room
        .parse()
        .map_err(|e: String| JsValue::from_str(&e))?;
    let day: NaiveDate = day
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", day, e)))?;

    let bucket = snapshot.room_day(room, day, &window);
    to_json(&assign_lanes(&bucket))
}
