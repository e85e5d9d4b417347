//! Value conversions used by aliased fields.
//!
//! A [`Factory`] turns a raw wire value into the local representation, a
//! [`Render`] turns a local value back into the textual wire form. Both
//! report failures as a plain reason; the mapping engine attaches the model
//! and field names.

use crate::domain::quality::ScanQuality;
use serde_json::Value;

pub type Factory = fn(&Value) -> std::result::Result<Value, String>;
pub type Render = fn(&Value) -> std::result::Result<Value, String>;

const TAG_SEPARATOR: char = ',';

pub fn identity(raw: &Value) -> std::result::Result<Value, String> {
    Ok(raw.clone())
}

/// Accepts integers and strings holding an integer.
pub fn integer(raw: &Value) -> std::result::Result<Value, String> {
    match raw {
        Value::Number(number) => number
            .as_i64()
            .map(Value::from)
            .ok_or_else(|| format!("{} is not an integer", number)),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| format!("'{}' is not an integer: {}", text, e)),
        other => Err(format!("expected an integer, got {}", other)),
    }
}

pub fn text(raw: &Value) -> std::result::Result<Value, String> {
    match raw {
        Value::String(_) => Ok(raw.clone()),
        Value::Number(number) => Ok(Value::String(number.to_string())),
        Value::Bool(flag) => Ok(Value::String(flag.to_string())),
        other => Err(format!("expected text, got {}", other)),
    }
}

/// Only the fixed quality vocabulary is accepted.
pub fn scan_quality(raw: &Value) -> std::result::Result<Value, String> {
    let text = raw
        .as_str()
        .ok_or_else(|| format!("expected a scan quality, got {}", raw))?;
    let quality = text.parse::<ScanQuality>()?;
    Ok(Value::String(quality.as_str().to_string()))
}

/// Comma separated tags (or an array of strings) into a list. Both forms
/// yield only tags that render back unchanged: trimmed, non-empty and free of
/// the separator.
pub fn tags(raw: &Value) -> std::result::Result<Value, String> {
    match raw {
        Value::String(text) => Ok(Value::Array(
            text.split(TAG_SEPARATOR)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(|tag| Value::String(tag.to_string()))
                .collect(),
        )),
        Value::Array(items) => {
            let mut parsed = Vec::with_capacity(items.len());
            for item in items {
                let tag = item
                    .as_str()
                    .ok_or_else(|| format!("expected a tag, got {}", item))?
                    .trim();
                if tag.contains(TAG_SEPARATOR) {
                    return Err(format!("tag '{}' contains '{}'", tag, TAG_SEPARATOR));
                }
                if !tag.is_empty() {
                    parsed.push(Value::String(tag.to_string()));
                }
            }
            Ok(Value::Array(parsed))
        }
        other => Err(format!("expected tags, got {}", other)),
    }
}

/// Scalars into their textual form. Lists and mappings have no textual form.
pub fn render_text(value: &Value) -> std::result::Result<Value, String> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(number) => Ok(Value::String(number.to_string())),
        Value::Bool(flag) => Ok(Value::String(flag.to_string())),
        Value::Null => Err("null has no textual form".to_string()),
        Value::Array(_) => Err("a list has no textual form".to_string()),
        Value::Object(_) => Err("a mapping has no textual form".to_string()),
    }
}

pub fn render_tags(value: &Value) -> std::result::Result<Value, String> {
    match value {
        Value::Array(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                let tag = item
                    .as_str()
                    .ok_or_else(|| format!("expected a tag, got {}", item))?;
                if tag.contains(TAG_SEPARATOR) {
                    return Err(format!("tag '{}' contains '{}'", tag, TAG_SEPARATOR));
                }
                rendered.push(tag);
            }
            Ok(Value::String(rendered.join(",")))
        }
        Value::String(_) => Ok(value.clone()),
        other => Err(format!("expected tags, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer() {
        assert_eq!(integer(&json!("7")), Ok(json!(7)));
        assert_eq!(integer(&json!(" 12 ")), Ok(json!(12)));
        assert_eq!(integer(&json!(42)), Ok(json!(42)));
        assert!(integer(&json!("seven")).is_err());
        assert!(integer(&json!(1.5)).is_err());
        assert!(integer(&json!(true)).is_err());
    }

    #[test]
    fn test_text() {
        assert_eq!(text(&json!("T1")), Ok(json!("T1")));
        assert_eq!(text(&json!(3)), Ok(json!("3")));
        assert!(text(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_scan_quality() {
        assert_eq!(scan_quality(&json!("usable")), Ok(json!("usable")));
        assert!(scan_quality(&json!("excellent")).is_err());
        assert!(scan_quality(&json!(1)).is_err());
    }

    #[test]
    fn test_tags() {
        assert_eq!(tags(&json!("t1, t2,,t3")), Ok(json!(["t1", "t2", "t3"])));
        assert_eq!(tags(&json!("")), Ok(json!([])));
        assert_eq!(tags(&json!(["a", "b"])), Ok(json!(["a", "b"])));
        assert_eq!(tags(&json!([" a ", "", "  ", "b"])), Ok(json!(["a", "b"])));
        assert!(tags(&json!(["a,b"])).is_err());
        assert!(tags(&json!([1])).is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(render_text(&json!(7)), Ok(json!("7")));
        assert_eq!(render_text(&json!("xnat:mrScanData")), Ok(json!("xnat:mrScanData")));
        assert!(render_text(&json!(["a"])).is_err());
        assert!(render_text(&json!(null)).is_err());

        assert_eq!(render_tags(&json!(["t1", "t2"])), Ok(json!("t1,t2")));
        assert_eq!(render_tags(&json!([])), Ok(json!("")));
        assert!(render_tags(&json!(["a,b"])).is_err());
    }
}
