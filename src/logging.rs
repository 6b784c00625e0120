use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

/// Builds one structured log line, or `None` when `level` is below `threshold`.
pub fn format_event(
    threshold: LogLevel,
    level: LogLevel,
    ts_millis: u64,
    event: &str,
    fields: serde_json::Value,
) -> Option<serde_json::Value> {
    if level < threshold {
        return None;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts_millis)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Some(serde_json::Value::Object(payload))
}

pub fn log_event(threshold: LogLevel, level: LogLevel, event: &str, fields: serde_json::Value) {
    let Some(payload) = format_event(threshold, level, now_unix_millis(), event, fields) else {
        return;
    };

    write_line(level, &payload.to_string());
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::info_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: LogLevel, line: &str) {
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn events_below_threshold_are_dropped() {
        let dropped = format_event(
            LogLevel::Info,
            LogLevel::Debug,
            1,
            "feature_inactive",
            serde_json::json!({}),
        );
        assert!(dropped.is_none());
    }

    #[test]
    fn event_fields_are_flattened_next_to_envelope() {
        let payload = format_event(
            LogLevel::Debug,
            LogLevel::Info,
            1_700_000_000_000,
            "feature_mounted",
            serde_json::json!({ "feature": "ripple" }),
        )
        .expect("info passes a debug threshold");

        assert_eq!(
            payload,
            serde_json::json!({
                "ts": 1_700_000_000_000u64,
                "level": "info",
                "event": "feature_mounted",
                "feature": "ripple",
            })
        );
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = format_event(
            LogLevel::Info,
            LogLevel::Info,
            5,
            "interactions_ready",
            serde_json::json!(42),
        )
        .expect("same level passes");
        assert_eq!(payload.as_object().map(|object| object.len()), Some(3));
    }

    #[test]
    fn levels_serialize_lowercase() {
        assert_eq!(serde_json::to_value(LogLevel::Debug).ok(), Some(serde_json::json!("debug")));
        assert!(LogLevel::Debug < LogLevel::Info);
    }
}
