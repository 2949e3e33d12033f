use serde_json::{Map, Value};

use crate::error::{Result, SingleKeyError};

/// Decoded JSON object as returned by the API. No schema is enforced.
pub type ApiResult = Map<String, Value>;

/// Turns a status code and raw body into a result or a typed error.
///
/// Only 401 and 404 are decided by status alone. Every other status falls
/// through to the body check, so a 500 carrying ordinary JSON comes back as a
/// result.
pub fn classify(status: u16, body: &[u8]) -> Result<ApiResult> {
    match status {
        401 => return Err(SingleKeyError::Authentication("invalid API token".to_string())),
        404 => return Err(SingleKeyError::NotFound("resource not found".to_string())),
        _ => {}
    }

    let decoded: Value = serde_json::from_slice(body).map_err(|err| {
        SingleKeyError::Client(format!("invalid JSON response (status {status}): {err}"))
    })?;

    let Value::Object(result) = decoded else {
        return Err(SingleKeyError::Client(format!(
            "unexpected response shape (status {status}): expected a JSON object"
        )));
    };

    let succeeded = result.get("success").is_some_and(is_truthy);
    if !succeeded {
        if let Some(Value::Array(errors)) = result.get("errors") {
            if !errors.is_empty() {
                return Err(SingleKeyError::Validation {
                    message: detail(&result).unwrap_or_else(|| "Validation failed".to_string()),
                    errors: errors.iter().map(error_text).collect(),
                });
            }
        }
    }

    Ok(result)
}

/// `detail` as display text, when present.
pub fn detail(result: &ApiResult) -> Option<String> {
    match result.get("detail")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// A report is finished once it reports success and carries a score.
pub fn report_is_complete(result: &ApiResult) -> bool {
    result.get("success").is_some_and(is_truthy)
        && result.get("singlekey_score").is_some_and(is_truthy)
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn error_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
