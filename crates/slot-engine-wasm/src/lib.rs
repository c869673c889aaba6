//! WASM bindings for slot-engine.
//!
//! Exposes labor-slot enumeration, offerable-slot computation and 12-hour
//! formatting to the JavaScript booking forms via `wasm-bindgen`. Dates and
//! slots cross the boundary as plain strings; lists and schedules as JSON
//! strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::{OccupiedSlotSet, TimeSlot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// One `<option>` for a slot picker: submitted value plus display label.
#[derive(Serialize)]
struct SlotOptionDto {
    value: String,
    label: String,
}

impl From<TimeSlot> for SlotOptionDto {
    fn from(slot: TimeSlot) -> Self {
        Self {
            value: slot.to_string(),
            label: slot.to_twelve_hour(),
        }
    }
}

// ---------------------------------------------------------------------------
// Plain-Rust core, testable off-wasm
// ---------------------------------------------------------------------------

/// Parse a JSON array of `"HH:MM"` strings into an occupied set.
fn parse_occupied_json(json: &str) -> Result<OccupiedSlotSet, String> {
    let entries: Vec<String> =
        serde_json::from_str(json).map_err(|e| format!("Invalid occupied slots JSON: {}", e))?;
    slot_engine::parse_occupied(&entries).map_err(|e| e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn labor_slots_json(date: &str) -> Result<String, String> {
    let date = slot_engine::parse_calendar_date(date).map_err(|e| e.to_string())?;
    to_json(&slot_engine::enumerate_labor_slots(date))
}

fn offerable_slots_json(date: &str, occupied_json: &str) -> Result<String, String> {
    let date = slot_engine::parse_calendar_date(date).map_err(|e| e.to_string())?;
    let occupied = parse_occupied_json(occupied_json)?;
    to_json(&slot_engine::compute_offerable_slots(date, &occupied))
}

fn twelve_hour(slot: &str) -> Result<String, String> {
    let slot: TimeSlot = slot.parse().map_err(|e: slot_engine::SlotError| e.to_string())?;
    Ok(slot_engine::format_twelve_hour(slot))
}

fn slot_options_json(date: &str, occupied_json: &str) -> Result<String, String> {
    let date = slot_engine::parse_calendar_date(date).map_err(|e| e.to_string())?;
    let occupied = parse_occupied_json(occupied_json)?;
    let options: Vec<SlotOptionDto> = slot_engine::compute_offerable_slots(date, &occupied)
        .into_iter()
        .map(SlotOptionDto::from)
        .collect();
    to_json(&options)
}

fn day_schedule_json(date: &str, occupied_json: &str) -> Result<String, String> {
    let date = slot_engine::parse_calendar_date(date).map_err(|e| e.to_string())?;
    let occupied = parse_occupied_json(occupied_json)?;
    to_json(&slot_engine::day_schedule(date, &occupied))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// All bookable slots for a date under the clinic's business hours.
///
/// `date` is `YYYY-MM-DD` or `YYYY-MM-DDT00:00:00`. Returns a JSON array of
/// `"HH:MM"` strings, empty on Sundays.
#[wasm_bindgen(js_name = "enumerateLaborSlots")]
pub fn enumerate_labor_slots(date: &str) -> Result<String, JsValue> {
    labor_slots_json(date).map_err(|e| JsValue::from_str(&e))
}

/// Labor slots for a date minus the ones already booked.
///
/// `occupied_json` is a JSON array of `"HH:MM"` strings as returned by the
/// booking-conflict query. Returns a JSON array of `"HH:MM"` strings.
#[wasm_bindgen(js_name = "computeOfferableSlots")]
pub fn compute_offerable_slots(date: &str, occupied_json: &str) -> Result<String, JsValue> {
    offerable_slots_json(date, occupied_json).map_err(|e| JsValue::from_str(&e))
}

/// Format an `"HH:MM"` slot for display, e.g. `"13:30"` → `"1:30 PM"`.
#[wasm_bindgen(js_name = "formatTwelveHour")]
pub fn format_twelve_hour(slot: &str) -> Result<String, JsValue> {
    twelve_hour(slot).map_err(|e| JsValue::from_str(&e))
}

/// Offerable slots as `{value, label}` objects ready for a `<select>`.
#[wasm_bindgen(js_name = "slotOptions")]
pub fn slot_options(date: &str, occupied_json: &str) -> Result<String, JsValue> {
    slot_options_json(date, occupied_json).map_err(|e| JsValue::from_str(&e))
}

/// Full day schedule: `{date, weekday, labor, offerable, occupied_ignored}`.
#[wasm_bindgen(js_name = "daySchedule")]
pub fn day_schedule(date: &str, occupied_json: &str) -> Result<String, JsValue> {
    day_schedule_json(date, occupied_json).map_err(|e| JsValue::from_str(&e))
}
