//! Plain-text rendering helpers shared by the pages

use colored::Colorize;
use serde_json::Value;
use studentdesk_core::{ApiError, Error};

/// Server-assigned id of a student record, as text
pub fn student_id(student: &Value) -> Option<String> {
    match student.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Best human label for a student; payloads are opaque so this only guesses
pub fn student_label(student: &Value) -> String {
    if let Some(name) = student.get("name").and_then(Value::as_str) {
        return name.to_string();
    }

    let first = student.get("first_name").and_then(Value::as_str);
    let last = student.get("last_name").and_then(Value::as_str);
    match (first, last) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => student.to_string(),
    }
}

/// Records in a list response: a bare array, or the array inside a
/// paginated wrapper such as `{"count": 2, "results": [...]}`
pub fn student_list(body: &Value) -> Option<&[Value]> {
    match body {
        Value::Array(students) => Some(students.as_slice()),
        Value::Object(fields) => ["results", "data", "students", "items"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice),
        _ => None,
    }
}

/// One `key: value` line per field
pub fn describe(student: &Value) -> String {
    match student {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("  {key}: {s}"),
                other => format!("  {key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => format!("  {other}"),
    }
}

/// Page heading
pub fn heading(text: &str) -> String {
    text.bold().to_string()
}

/// How a page reports an API failure to the user
pub fn failure(action: &str, error: &Error) -> String {
    let detail = match error {
        Error::Api(ApiError::Status { status, body }) if body.trim().is_empty() => {
            format!("server answered HTTP {status}")
        }
        Error::Api(ApiError::Status { status, body }) => {
            format!("server answered HTTP {status}: {body}")
        }
        other => other.to_string(),
    };
    format!("{} {}: {}", "✗".red(), action, detail)
}

/// Whether the error means the record does not exist
pub fn is_not_found(error: &Error) -> bool {
    matches!(error, Error::Api(api) if api.is_not_found())
}
