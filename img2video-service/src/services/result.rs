//! Response normalization: vendor JSON to [`GenericTaskResponse`].

use crate::dtos::{GenericTaskResponse, TaskStatus};
use serde_json::Value;

const RESULT_URL_KEYS: [&str; 3] = ["video_url", "result", "url"];
const TASK_ID_KEYS: [&str; 2] = ["task_id", "id"];

/// Map whatever the vendor returned onto the stable result contract. Never fails;
/// unrecognized shapes yield [`TaskStatus::Unknown`].
pub fn normalize_response(vendor: Value) -> GenericTaskResponse {
    let result_url = first_present(&vendor, &RESULT_URL_KEYS);
    let task_id = first_present(&vendor, &TASK_ID_KEYS);

    let status = if result_url.is_some() {
        TaskStatus::Succeeded
    } else if task_id.is_some() {
        TaskStatus::Queued
    } else {
        TaskStatus::Unknown
    };

    GenericTaskResponse {
        status,
        task_id,
        result_url,
        vendor_raw: vendor,
    }
}

fn first_present(vendor: &Value, keys: &[&str]) -> Option<String> {
    let object = vendor.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(present_text)
}

/// Non-empty strings and non-zero numbers count as present; everything else is skipped.
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
