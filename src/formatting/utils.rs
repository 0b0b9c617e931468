use chrono::{DateTime, Utc};
use serde_json::Value;

pub fn format_relative_time(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        let now = Utc::now();
        let duration = now.signed_duration_since(parsed);

        if duration.num_days() > 365 {
            format!("{}y ago", duration.num_days() / 365)
        } else if duration.num_days() > 30 {
            format!("{}mo ago", duration.num_days() / 30)
        } else if duration.num_days() > 0 {
            format!("{}d ago", duration.num_days())
        } else if duration.num_hours() > 0 {
            format!("{}h ago", duration.num_hours())
        } else if duration.num_minutes() > 0 {
            format!("{}m ago", duration.num_minutes())
        } else {
            "just now".to_string()
        }
    } else {
        "unknown".to_string()
    }
}

/// Shorten to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One-line rendering of a field value. Nested values are shown as compact JSON;
/// connection objects collapse to their node count.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => match map.get("edges").and_then(Value::as_array) {
            Some(edges) => format!("{} linked", edges.len()),
            None => value.to_string(),
        },
        Value::Array(_) => value.to_string(),
    }
}

pub fn is_timestamp_field(name: &str) -> bool {
    name.ends_with("At") || name.ends_with("Time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééééé", 6), "ééé...");
    }

    #[test]
    fn values_render_on_one_line() {
        assert_eq!(format_value(&json!(null)), "-");
        assert_eq!(format_value(&json!("rn_1")), "rn_1");
        assert_eq!(format_value(&json!(false)), "false");
        assert_eq!(format_value(&json!({ "edges": [{}, {}] })), "2 linked");
        assert_eq!(format_value(&json!({ "id": "x" })), r#"{"id":"x"}"#);
    }

    #[test]
    fn relative_time_of_garbage() {
        assert_eq!(format_relative_time("yesterday"), "unknown");
        assert_eq!(format_relative_time(&Utc::now().to_rfc3339()), "just now");
    }
}
