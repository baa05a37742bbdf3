//! JSON entrypoint for language bindings.
//!
//! A single [`run_json`] takes a mode string and JSON arguments and returns a
//! JSON string, so bindings never marshal Rust types.
//!
//! ## Response Envelope
//!
//! - Success: `{"ok": true, "data": {...}}`
//! - Error: `{"ok": false, "error": {"code": "...", "message": "...", "details": ...}}`
//!
//! ## Strict Parsing
//!
//! - `width`, `height` and `threshold` are required for `count` and `check`
//! - Missing optional keys use defaults
//! - Wrongly typed values return errors (no silent fallback to defaults)

use serde_json::Value;

use crate::error::{CoreError, ResponseEnvelope};
use crate::settings::{CountSettings, Strategy};
use crate::types::{CoverageRequest, Point};
use crate::{check_agreement, count_with_settings};

/// Run a covergrid operation with JSON arguments, returning JSON output.
///
/// # Arguments
///
/// * `mode` - `"count"`, `"check"` or `"version"`
/// * `args_json` - JSON object with the request and settings fields
///
/// # Example
///
/// ```
/// use covergrid_core::ffi::run_json;
///
/// let out = run_json("count", r#"{"width": 5, "height": 5, "threshold": 2, "markers": [[2, 2]]}"#);
/// assert!(out.starts_with(r#"{"ok":true"#));
/// assert!(out.contains(r#""cells":13"#));
/// ```
pub fn run_json(mode: &str, args_json: &str) -> String {
    match run_json_inner(mode, args_json) {
        Ok(data) => ResponseEnvelope::success(data).to_json(),
        Err(err) => ResponseEnvelope::error(&err).to_json(),
    }
}

fn run_json_inner(mode: &str, args_json: &str) -> Result<Value, CoreError> {
    let args: Value = serde_json::from_str(args_json)?;

    match mode {
        "count" => {
            let request = parse_request(&args)?;
            let settings = parse_settings(&args)?;
            let report = count_with_settings(&request, &settings)?;
            Ok(serde_json::to_value(&report)?)
        }
        "check" => {
            let request = parse_request(&args)?;
            let settings = parse_settings(&args)?;
            let report = check_agreement(&request, &settings)?;
            Ok(serde_json::to_value(&report)?)
        }
        "version" => Ok(serde_json::json!({
            "version": version(),
            "schema_version": schema_version(),
        })),
        _ => Err(CoreError::unknown_mode(mode)),
    }
}

// ============================================================================
// Strict parsing helpers
// ============================================================================

/// Parse a required integer field: missing/null -> error, non-integer -> error.
fn parse_i64(args: &Value, field: &str) -> Result<i64, CoreError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(CoreError::missing_field(field)),
        Some(v) => v
            .as_i64()
            .ok_or_else(|| CoreError::invalid_field(field, "an integer")),
    }
}

/// Parse a boolean field strictly: missing/null -> default, non-bool -> error.
fn parse_bool(args: &Value, field: &str, default: bool) -> Result<bool, CoreError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| CoreError::invalid_field(field, "a boolean (true or false)")),
    }
}

/// Parse a u64 field strictly: missing/null -> default, non-number -> error.
fn parse_u64(args: &Value, field: &str, default: u64) -> Result<u64, CoreError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_u64()
            .ok_or_else(|| CoreError::invalid_field(field, "a non-negative integer")),
    }
}

/// Parse the marker list: missing/null -> empty, anything but `[[row, col], ...]` -> error.
fn parse_markers(args: &Value) -> Result<Vec<Point>, CoreError> {
    match args.get("markers") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => serde_json::from_value::<Vec<Point>>(v.clone())
            .map_err(|_| CoreError::invalid_field("markers", "an array of [row, col] pairs")),
    }
}

fn parse_strategy(args: &Value, default: Strategy) -> Result<Strategy, CoreError> {
    match args.get("strategy") {
        None | Some(Value::Null) => Ok(default),
        Some(v) => serde_json::from_value::<Strategy>(v.clone())
            .map_err(|_| CoreError::invalid_field("strategy", "'hybrid' or 'enumerate'")),
    }
}

fn parse_request(args: &Value) -> Result<CoverageRequest, CoreError> {
    Ok(CoverageRequest::new(
        parse_i64(args, "width")?,
        parse_i64(args, "height")?,
        parse_i64(args, "threshold")?,
        parse_markers(args)?,
    ))
}

fn parse_settings(args: &Value) -> Result<CountSettings, CoreError> {
    let defaults = CountSettings::default();
    Ok(CountSettings {
        strategy: parse_strategy(args, defaults.strategy)?,
        enumeration_limit: parse_u64(args, "enumeration_limit", defaults.enumeration_limit)?,
        unbounded_enumeration: parse_bool(
            args,
            "unbounded_enumeration",
            defaults.unbounded_enumeration,
        )?,
    })
}

/// Get the covergrid version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get the schema version of JSON reports.
pub fn schema_version() -> u32 {
    covergrid_types::SCHEMA_VERSION
}
