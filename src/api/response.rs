use serde::{Serialize, Serializer};

/// Body of a server response, shaped by its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `application/json` payload
    Structured(serde_json::Value),
    /// Any `text/*` payload, or a JSON payload that failed to parse
    Text(String),
    /// Anything else; only the size is kept
    BinaryPlaceholder(usize),
}

impl ResponseBody {
    /// Classify raw body bytes by the response `content-type` header.
    pub fn classify(content_type: &str, bytes: &[u8]) -> Self {
        if content_type.contains("application/json") {
            match serde_json::from_slice(bytes) {
                Ok(value) => ResponseBody::Structured(value),
                Err(e) => ResponseBody::Text(format!("Failed to parse response: {}", e)),
            }
        } else if content_type.contains("text") {
            ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned())
        } else {
            ResponseBody::BinaryPlaceholder(bytes.len())
        }
    }

    /// Consume a response and classify its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        match response.bytes().await {
            Ok(bytes) => Self::classify(&content_type, &bytes),
            Err(e) => ResponseBody::Text(format!("Failed to parse response: {}", e)),
        }
    }

    /// Whether the body mentions `needle` anywhere
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            ResponseBody::Structured(value) => value.to_string().contains(needle),
            ResponseBody::Text(text) => text.contains(needle),
            ResponseBody::BinaryPlaceholder(_) => false,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        match self {
            ResponseBody::Structured(value) => value.clone(),
            ResponseBody::Text(text) => serde_json::Value::String(text.clone()),
            ResponseBody::BinaryPlaceholder(len) => {
                serde_json::Value::String(format!("Binary content ({} bytes)", len))
            }
        }
    }
}

impl Serialize for ResponseBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseBody::Structured(value) => value.serialize(serializer),
            ResponseBody::Text(text) => serializer.serialize_str(text),
            ResponseBody::BinaryPlaceholder(len) => {
                serializer.collect_str(&format_args!("Binary content ({} bytes)", len))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_json() {
        let body = ResponseBody::classify("application/json; charset=utf-8", br#"{"ok":true}"#);
        assert_eq!(body, ResponseBody::Structured(json!({"ok": true})));
    }

    #[test]
    fn test_classify_invalid_json_falls_back_to_text() {
        let body = ResponseBody::classify("application/json", b"not json");
        match body {
            ResponseBody::Text(msg) => assert!(msg.starts_with("Failed to parse response:")),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_text_and_binary() {
        assert_eq!(
            ResponseBody::classify("text/plain", b"Database setup complete"),
            ResponseBody::Text("Database setup complete".to_string())
        );
        assert_eq!(
            ResponseBody::classify("application/octet-stream", &[0u8; 17]),
            ResponseBody::BinaryPlaceholder(17)
        );
        assert_eq!(ResponseBody::classify("", b"abc"), ResponseBody::BinaryPlaceholder(3));
    }

    #[test]
    fn test_serialize_binary_placeholder() {
        let value = serde_json::to_value(ResponseBody::BinaryPlaceholder(42)).unwrap();
        assert_eq!(value, json!("Binary content (42 bytes)"));
        assert_eq!(ResponseBody::BinaryPlaceholder(42).to_value(), value);
    }

    #[test]
    fn test_contains_searches_structured_body() {
        let body = ResponseBody::Structured(json!([{"id": "test-mod-1", "version": "1.0.0"}]));
        assert!(body.contains("test-mod-1"));
        assert!(!body.contains("test-mod-2"));
        assert!(!ResponseBody::BinaryPlaceholder(10).contains("test"));
    }
}
