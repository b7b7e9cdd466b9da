//! The type-conversion pipeline.
//!
//! `convert` maps a raw scalar to the primitive its logical tag declares.
//! It is pure and side-effect free; the fetch layer applies it per column
//! according to the result set's conversion table.
//!
//! DATE/DATETIME conversion parses textual timestamps best-effort (integer
//! epoch or ISO calendar form). Anything else passes through unchanged.
//! This is lossy for loosely formatted date strings; the behavior is kept
//! as-is rather than hardened, since the ambiguity is part of the
//! observable contract.

use alloc::string::String;
use trellis_core::{TypeTag, Value};

/// Converts a raw value according to its logical type tag.
///
/// Null and `false` inputs are returned unchanged for every tag.
pub fn convert(value: Value, tag: TypeTag) -> Value {
    if value.is_conversion_exempt() {
        return value;
    }
    match tag {
        TypeTag::Text => Value::Str(value.render()),
        TypeTag::Binary => value,
        TypeTag::Bool => Value::Bool(coerce_bool(&value)),
        TypeTag::Integer | TypeTag::Counter => Value::Int(coerce_int(&value)),
        TypeTag::Float => Value::Float(coerce_float(&value)),
        TypeTag::Date | TypeTag::DateTime => coerce_timestamp(value),
    }
}

/// Loose boolean coercion. The strings "f" and "F" count as false
/// (PostgreSQL drivers report booleans that way); everything else follows
/// the truthiness of the value.
fn coerce_bool(value: &Value) -> bool {
    match value.as_str() {
        Some("f") | Some("F") => false,
        _ => value.truthy(),
    }
}

/// Loose integer coercion: numeric values truncate, text parses its
/// leading numeric prefix, anything else yields 0.
fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Int(n) => *n,
        Value::Float(n) => *n as i64,
        Value::Bool(b) => *b as i64,
        Value::Str(s) => int_prefix(s),
        Value::Bytes(b) => int_prefix(&String::from_utf8_lossy(b)),
        Value::Null => 0,
    }
}

/// Loose float coercion, mirroring `coerce_int`.
fn coerce_float(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(n) => *n,
        Value::Bool(b) => *b as i64 as f64,
        Value::Str(s) => float_prefix(s),
        Value::Bytes(b) => float_prefix(&String::from_utf8_lossy(b)),
        Value::Null => 0.0,
    }
}

/// Timestamp coercion for DATE/DATETIME tags. Textual values parse to an
/// epoch-seconds integer where possible and pass through otherwise;
/// numeric values are taken as an epoch already.
fn coerce_timestamp(value: Value) -> Value {
    match value {
        Value::Str(s) => match parse_timestamp(&s) {
            Some(ts) => Value::Int(ts),
            None => Value::Str(s),
        },
        Value::Int(n) => Value::Int(n),
        Value::Float(n) => Value::Int(n as i64),
        other => other,
    }
}

/// Parses the leading integer prefix of a string (optional sign), or 0.
fn int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let mut end = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().unwrap_or(0)
}

/// Parses the leading floating-point prefix of a string, or 0.0.
fn float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    while end < bytes.len() {
        let c = bytes[end] as char;
        let ok = c.is_ascii_digit()
            || (end == 0 && (c == '-' || c == '+'))
            || (c == '.' && !seen_dot);
        if !ok {
            break;
        }
        if c == '.' {
            seen_dot = true;
        }
        end += 1;
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Best-effort parse of a textual timestamp to epoch seconds.
///
/// Accepts an optionally signed integer (already an epoch) or an ISO
/// calendar form `YYYY-MM-DD`, optionally followed by `HH:MM[:SS]`
/// separated by a space or `T`, optionally suffixed with `Z`. Returns None
/// for anything else.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(epoch) = text.parse::<i64>() {
        return Some(epoch);
    }

    let text = text.strip_suffix('Z').unwrap_or(text);
    let (date, time) = match text.split_once(|c| c == ' ' || c == 'T') {
        Some((d, t)) => (d, Some(t)),
        None => (text, None),
    };

    let mut parts = date.split('-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let mut seconds = 0i64;
    if let Some(time) = time {
        let time = time.split('.').next().unwrap_or(time);
        let mut pieces = time.split(':');
        let hour: i64 = pieces.next()?.parse().ok()?;
        let minute: i64 = pieces.next()?.parse().ok()?;
        let second: i64 = match pieces.next() {
            Some(s) => s.parse().ok()?,
            None => 0,
        };
        if pieces.next().is_some() || hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        seconds = hour * 3600 + minute * 60 + second;
    }

    days_from_civil(year, month, day)?
        .checked_mul(86_400)?
        .checked_add(seconds)
}

/// Days between 1970-01-01 and the given civil date (proleptic Gregorian).
/// None when the date lies outside the range representable in epoch days.
fn days_from_civil(year: i64, month: u32, day: u32) -> Option<i64> {
    let year = if month <= 2 { year.checked_sub(1)? } else { year };
    let era = if year >= 0 { year } else { year.checked_sub(399)? } / 400;
    let yoe = year - era * 400;
    let mp = ((month as i64) + 9) % 12;
    let doy = (153 * mp + 2) / 5 + (day as i64) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era.checked_mul(146_097)?.checked_add(doe)?.checked_sub(719_468)
}
