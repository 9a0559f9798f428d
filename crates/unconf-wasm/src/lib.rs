//! WASM bindings for unconf-engine.
//!
//! Exposes candidate start times, overlap checks, clash reports and the phase
//! gate to the scheduling form in the browser via `wasm-bindgen`. All complex
//! types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p unconf-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/unconf_wasm.wasm
//! ```

use chrono::Utc;
use serde::Deserialize;
use unconf_engine::availability::duration_options;
use unconf_engine::clock::{parse_instant, parse_timezone};
use unconf_engine::model::{Day, Event, Guest, Session, Venue};
use unconf_engine::{
    compute_available_start_times, compute_clashes, current_phase, overlaps, HostCommitments,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// A host as sent by the form: the guest plus their resolved commitments.
#[derive(Deserialize)]
struct HostInput {
    #[serde(flatten)]
    guest: Guest,
    #[serde(default)]
    hosted: Vec<Session>,
    #[serde(default)]
    attending: Vec<Session>,
}

impl From<HostInput> for HostCommitments {
    fn from(h: HostInput) -> Self {
        Self {
            guest: h.guest,
            hosted: h.hosted,
            attending: h.attending,
        }
    }
}

fn parse_json<'a, T: Deserialize<'a>>(what: &str, json: &'a str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn available_start_times(
    day_json: &str,
    sessions_json: &str,
    current_json: &str,
    venue_json: Option<&str>,
    timezone: &str,
) -> Result<String, String> {
    let day: Day = parse_json("day", day_json)?;
    let sessions: Vec<Session> = parse_json("sessions", sessions_json)?;
    let current: Session = if current_json.trim().is_empty() {
        Session::empty()
    } else {
        parse_json("session", current_json)?
    };
    let venue: Option<Venue> = venue_json.map(|v| parse_json("venue", v)).transpose()?;
    let tz = parse_timezone(timezone).map_err(|e| e.to_string())?;

    let slots = compute_available_start_times(&day, &sessions, &current, venue.as_ref(), tz);
    to_json(&slots)
}

fn clashes(candidate_json: &str, hosts_json: &str, timezone: &str) -> Result<String, String> {
    let candidate: Session = parse_json("session", candidate_json)?;
    let hosts: Vec<HostInput> = parse_json("hosts", hosts_json)?;
    let hosts: Vec<HostCommitments> = hosts.into_iter().map(HostCommitments::from).collect();
    let tz = parse_timezone(timezone).map_err(|e| e.to_string())?;

    let lines: Vec<String> = compute_clashes(&candidate, &hosts)
        .iter()
        .map(|c| c.describe(tz))
        .collect();
    to_json(&lines)
}

fn sessions_overlap_json(a_json: &str, b_json: &str) -> Result<bool, String> {
    let a: Session = parse_json("session", a_json)?;
    let b: Session = parse_json("session", b_json)?;
    Ok(overlaps(&a, &b))
}

fn phase(event_json: &str, now: Option<&str>) -> Result<String, String> {
    let event: Event = parse_json("event", event_json)?;
    let now = match now {
        Some(raw) => parse_instant(raw, chrono_tz::UTC).map_err(|e| e.to_string())?,
        None => Utc::now(),
    };
    Ok(current_phase(&event, now).as_str().to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Candidate start times for the session being scheduled.
///
/// # Arguments
/// - `day_json` -- Day object with `start_bookings`/`end_bookings`
/// - `sessions_json` -- JSON array of all committed sessions
/// - `current_json` -- Session being edited; empty string when creating
/// - `venue_json` -- Selected venue, or `undefined` before one is chosen
/// - `timezone` -- IANA display timezone for labels
///
/// Returns a JSON array of `{label, start, max_duration_minutes, available}`.
#[wasm_bindgen(js_name = "computeAvailableStartTimes")]
pub fn compute_available_start_times_js(
    day_json: &str,
    sessions_json: &str,
    current_json: &str,
    venue_json: Option<String>,
    timezone: &str,
) -> Result<String, JsValue> {
    available_start_times(
        day_json,
        sessions_json,
        current_json,
        venue_json.as_deref(),
        timezone,
    )
    .map_err(js_err)
}

/// Human-readable clash lines for the proposed hosts of `candidate_json`.
///
/// `hosts_json` is a JSON array of `{id, name, hosted: [...], attending: [...]}`.
#[wasm_bindgen(js_name = "computeClashes")]
pub fn compute_clashes_js(
    candidate_json: &str,
    hosts_json: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    clashes(candidate_json, hosts_json, timezone).map_err(js_err)
}

/// Whether two sessions overlap (half-open; same ID never overlaps).
#[wasm_bindgen(js_name = "sessionsOverlap")]
pub fn sessions_overlap(a_json: &str, b_json: &str) -> Result<bool, JsValue> {
    sessions_overlap_json(a_json, b_json).map_err(js_err)
}

/// Current phase of an event: `proposal`, `voting`, `scheduling` or `inactive`.
///
/// `now` is an RFC 3339 instant; the wall clock is used when omitted.
#[wasm_bindgen(js_name = "currentPhase")]
pub fn current_phase_js(event_json: &str, now: Option<String>) -> Result<String, JsValue> {
    phase(event_json, now.as_deref()).map_err(js_err)
}

/// Durations (minutes) the form offers for a slot with the given maximum.
#[wasm_bindgen(js_name = "durationOptions")]
pub fn duration_options_js(max_duration_minutes: i32) -> Vec<i32> {
    duration_options(i64::from(max_duration_minutes))
        .into_iter()
        .filter_map(|m| i32::try_from(m).ok())
        .collect()
}
