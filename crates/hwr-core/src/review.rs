//! Validation of the review API payload and notification text.

use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::{
    domain::{HomeworkRecord, HomeworkStatus},
    errors::Error,
    Result,
};

static NULL: Value = Value::Null;

/// Extract the `homeworks` array from a decoded payload.
///
/// A missing key is logged and then treated as `null`, which fails the array
/// check below. Records are returned untouched.
pub fn check_response(payload: &Value) -> Result<Vec<Value>> {
    let homeworks = match payload.get("homeworks") {
        Some(v) => v,
        None => {
            error!("Ключ homeworks в ответе сервера не обнаружен");
            &NULL
        }
    };

    match homeworks {
        Value::Array(items) => Ok(items.clone()),
        other => {
            let msg = format!("homeworks не является списком ({})", json_kind(other));
            error!("Данные по статусу работ некорректны: {msg}");
            Err(Error::MalformedData(msg))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    homework_name: Option<String>,
    status: Option<String>,
}

/// Read the name and status of one homework record.
pub fn parse_record(record: &Value) -> Result<HomeworkRecord> {
    let raw = RawRecord::deserialize(record).map_err(|e| missing_field(e.to_string()))?;

    let Some(homework_name) = raw.homework_name else {
        return Err(missing_field("homework_name".to_string()));
    };
    let Some(code) = raw.status else {
        return Err(missing_field("status".to_string()));
    };
    let Some(status) = HomeworkStatus::from_code(&code) else {
        return Err(missing_field(format!("неизвестный статус `{code}`")));
    };

    Ok(HomeworkRecord {
        homework_name,
        status,
    })
}

/// Compose the chat notification for one homework record.
pub fn parse_status(record: &Value) -> Result<String> {
    let hw = parse_record(record)?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        hw.homework_name,
        hw.status.verdict()
    ))
}

fn missing_field(detail: String) -> Error {
    error!("В данных сервера отсутствует необходимый ключ: {detail}");
    Error::MissingField(detail)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
