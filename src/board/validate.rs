//! Input coercion rules for raw observations.
//!
//! Callers send loosely typed JSON, so every field goes through a forgiving
//! coercion step. Only the address can fail validation; every other field
//! falls back to a default instead of rejecting the observation.

use serde_json::Value;

use crate::board::types::{BoardError, Observation, DEFAULT_CHAIN_ID};
use crate::types::{Address, ObservationInput};

/// Lower bound of a stored score.
pub const SCORE_MIN: i64 = 0;
/// Upper bound of a stored score.
pub const SCORE_MAX: i64 = 100;

/// Turn a raw input into a storable observation stamped with `observed_at`.
///
/// Fails only when the address is missing or does not start with `0x`
/// after lowercasing.
pub fn normalize(input: &ObservationInput, observed_at: i64) -> Result<Observation, BoardError> {
    let address = normalize_address(input.address.as_ref())?;

    Ok(Observation {
        address,
        chain_id: coerce_chain_id(input.chain_id.as_ref()),
        symbol: coerce_display(input.symbol.as_ref()),
        name: coerce_display(input.name.as_ref()),
        hype: clamp_score(input.hype.as_ref()),
        safety: clamp_score(input.safety.as_ref()),
        observed_at,
    })
}

/// Coerce to string, lowercase, and require a leading `0x`.
pub fn normalize_address(raw: Option<&Value>) -> Result<Address, BoardError> {
    let address = coerce_string(raw).to_lowercase();
    if address.starts_with("0x") {
        Ok(address)
    } else {
        Err(BoardError::InvalidAddress)
    }
}

/// Coerce to string, substituting the default chain when nothing usable
/// was sent.
pub fn coerce_chain_id(raw: Option<&Value>) -> String {
    let chain = coerce_string(raw);
    if chain.is_empty() {
        DEFAULT_CHAIN_ID.to_string()
    } else {
        chain
    }
}

/// Keep a display field only when it is a non-empty string.
pub fn coerce_display(raw: Option<&Value>) -> Option<String> {
    match raw {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Coerce to a number and clamp into the storable score range.
/// Anything unparseable counts as zero.
pub fn clamp_score(raw: Option<&Value>) -> i64 {
    let value = coerce_number(raw);
    if value.is_nan() {
        return SCORE_MIN;
    }
    value.clamp(SCORE_MIN as f64, SCORE_MAX as f64) as i64
}

fn coerce_string(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn coerce_number(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
