use serde_json::Value;

use crate::error::{APPLICATION_FALLBACK, RpcError};

/// Unwrap the framework's `{"message": ...}` wrapper and check `success`.
///
/// The envelope is the inner `message` object when it carries a `success`
/// field, otherwise the body itself.
pub(crate) fn open(body: Value) -> Result<Value, RpcError> {
    let envelope = match body {
        Value::Object(mut outer) => match outer.remove("message") {
            Some(inner @ Value::Object(_)) if inner.get("success").is_some() => inner,
            Some(other) => {
                outer.insert("message".to_string(), other);
                Value::Object(outer)
            }
            None => Value::Object(outer),
        },
        other => other,
    };

    if truthy(envelope.get("success")) {
        Ok(envelope)
    } else {
        Err(RpcError::Application {
            message: server_message(&envelope),
        })
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn server_message(envelope: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| envelope.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .unwrap_or(APPLICATION_FALLBACK)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_framework_wrapper() {
        let envelope = open(json!({"message": {"success": true, "templates": []}})).unwrap();
        assert_eq!(envelope, json!({"success": true, "templates": []}));
    }

    #[test]
    fn bare_envelope_is_accepted() {
        let envelope = open(json!({"success": 1, "message": {"Submit": "إرسال"}})).unwrap();
        assert_eq!(envelope["message"]["Submit"], "إرسال");
    }

    #[test]
    fn falsy_success_is_application_error() {
        let err = open(json!({"message": {"success": false, "message": "Outside audit window"}}))
            .unwrap_err();
        assert_eq!(err.user_message(), "Outside audit window");
    }

    #[test]
    fn missing_success_uses_fallback_text() {
        let err = open(json!({"message": "done"})).unwrap_err();
        assert!(matches!(err, RpcError::Application { .. }));
        assert_eq!(err.user_message(), "done");

        let err = open(json!({})).unwrap_err();
        assert_eq!(err.user_message(), APPLICATION_FALLBACK);
    }
}
