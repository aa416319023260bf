//! Structural checks for rate service response bodies.
//!
//! The predicates look only at field presence and JSON types. The
//! `validate_*` functions then decode a matching body into the typed model.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{ApiError, ConversionOutcome, ErrorKind, RateResult};
use crate::error::SchemaError;

/// Object with numeric `amount`, string `base`, string `date` and object `rates`.
pub fn is_success_payload(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("amount").is_some_and(Value::is_number)
        && obj.get("base").is_some_and(Value::is_string)
        && obj.get("date").is_some_and(Value::is_string)
        && obj.get("rates").is_some_and(Value::is_object)
}

/// Object carrying both a `message` and a `type` field, of any JSON type.
pub fn is_error_payload(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("message") && obj.contains_key("type"))
}

pub fn validate_rate_result(value: &Value) -> Result<RateResult, SchemaError> {
    if !is_success_payload(value) {
        return Err(SchemaError::Shape("a rate result"));
    }
    Ok(RateResult::deserialize(value)?)
}

pub fn validate_api_error(value: &Value) -> Result<ApiError, SchemaError> {
    if !is_error_payload(value) {
        return Err(SchemaError::Shape("an error payload"));
    }
    let message = field_text(&value["message"]);
    let kind = ErrorKind::from(field_text(&value["type"]));
    Ok(ApiError::new(kind, message))
}

/// Classifies a decoded body: rate result first, then error payload.
///
/// `Err` means the body is unusable and the caller should report a
/// parse failure.
pub fn classify(value: &Value) -> Result<ConversionOutcome, SchemaError> {
    if is_success_payload(value) {
        return validate_rate_result(value).map(ConversionOutcome::Success);
    }
    if is_error_payload(value) {
        return validate_api_error(value).map(ConversionOutcome::Failure);
    }
    Err(SchemaError::Unrecognized)
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
