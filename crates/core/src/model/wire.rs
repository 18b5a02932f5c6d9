//! Lenient decoders for values produced by the backend.
//!
//! Check fields arrive as `0`/`1`, optional text arrives as `null`, and lists
//! are sometimes omitted entirely.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `true`/`false`, `0`/`1` and `"0"`/`"1"`; `null` is `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "True" | "yes" | "Yes"),
        _ => false,
    })
}

/// Treats `null` as an empty string.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats `null` or an empty string as `None`.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Treats `null` as an empty list.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counters that may arrive as `null`, a float, or a numeric string.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0).round() as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "flag")]
        flag: bool,
        #[serde(default, deserialize_with = "text")]
        text: String,
        #[serde(default, deserialize_with = "list")]
        list: Vec<String>,
        #[serde(default, deserialize_with = "count")]
        count: u32,
    }

    #[test]
    fn decodes_framework_shapes() {
        let probe: Probe = serde_json::from_value(serde_json::json!({
            "flag": 1,
            "text": null,
            "list": null,
            "count": "7"
        }))
        .unwrap();
        assert!(probe.flag);
        assert!(probe.text.is_empty());
        assert!(probe.list.is_empty());
        assert_eq!(probe.count, 7);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let probe: Probe = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!probe.flag);
        assert_eq!(probe.count, 0);
    }
}
