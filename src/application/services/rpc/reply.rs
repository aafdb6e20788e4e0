use serde_json::Value;

/// Result of interpreting a reply body.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedReply {
    Payload(Value),
    Malformed(String),
}

pub fn empty_reply() -> Value {
    Value::Array(Vec::new())
}

impl DecodedReply {
    /// Malformed replies degrade to an empty list.
    pub fn into_value(self) -> Value {
        match self {
            DecodedReply::Payload(v) => v,
            DecodedReply::Malformed(_) => empty_reply(),
        }
    }
}

/// Decodes a JSON reply body and extracts `expected_field`.
///
/// Accepted shapes: an object (the field is taken, missing field gives an
/// empty list), a bare list (returned whole), or either of those encoded a
/// second time as a JSON string. Without `expected_field` the whole payload
/// is the result.
pub fn decode_reply(body: &[u8], expected_field: Option<&str>) -> DecodedReply {
    let mut value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(err) => return DecodedReply::Malformed(format!("invalid json: {err}")),
    };
    if let Value::String(inner) = &value {
        match serde_json::from_str::<Value>(inner) {
            Ok(v) => value = v,
            Err(err) => {
                return DecodedReply::Malformed(format!("invalid double-encoded json: {err}"));
            }
        }
    }

    let Some(field) = expected_field else {
        return DecodedReply::Payload(value);
    };
    match value {
        Value::Object(mut map) => {
            DecodedReply::Payload(map.remove(field).unwrap_or_else(empty_reply))
        }
        list @ Value::Array(_) => DecodedReply::Payload(list),
        other => DecodedReply::Malformed(format!(
            "expected an object with `{field}` or a list, got {}",
            kind_of(&other)
        )),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_named_field_from_object() {
        let body = br#"{"orders": [{"id_order": 7, "status": 1}]}"#;
        assert_eq!(
            decode_reply(body, Some("orders")),
            DecodedReply::Payload(json!([{"id_order": 7, "status": 1}]))
        );
    }

    #[test]
    fn missing_field_yields_empty_list() {
        let out = decode_reply(br#"{"other": 1}"#, Some("orders"));
        assert_eq!(out, DecodedReply::Payload(json!([])));
    }

    #[test]
    fn bare_list_is_returned_whole() {
        let out = decode_reply(br#"[{"id": 101}, {"id": 102}]"#, Some("products"));
        assert_eq!(out, DecodedReply::Payload(json!([{"id": 101}, {"id": 102}])));
    }

    #[test]
    fn whole_payload_without_field() {
        let out = decode_reply(br#"{"a": 1}"#, None);
        assert_eq!(out, DecodedReply::Payload(json!({"a": 1})));
    }

    #[test]
    fn double_encoded_payload_is_unwrapped() {
        let inner = json!({"products": [101, 102]}).to_string();
        let body = serde_json::to_vec(&Value::String(inner)).unwrap();
        assert_eq!(
            decode_reply(&body, Some("products")),
            DecodedReply::Payload(json!([101, 102]))
        );
    }

    #[test]
    fn garbage_degrades_to_empty_and_is_stable() {
        let first = decode_reply(b"not json{", Some("orders"));
        let second = decode_reply(b"not json{", Some("orders"));
        assert!(matches!(first, DecodedReply::Malformed(_)));
        assert_eq!(first, second);
        assert_eq!(first.into_value(), json!([]));
        assert_eq!(second.into_value(), json!([]));
    }

    #[test]
    fn scalar_with_expected_field_is_malformed() {
        let out = decode_reply(b"42", Some("orders"));
        assert!(matches!(out, DecodedReply::Malformed(ref r) if r.contains("a number")));
    }
}
