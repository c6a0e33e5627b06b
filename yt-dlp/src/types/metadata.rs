use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata document produced by yt-dlp.
///
/// The structure is owned by yt-dlp and varies by extractor, so it is kept
/// as raw JSON. Only a couple of read-only accessors are offered for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Value);

impl Metadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Strips internal-only fields (keys starting with `__`) at every depth.
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        strip_private_keys(&mut self.0);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

fn strip_private_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|key, _| !key.starts_with("__"));
            map.values_mut().for_each(strip_private_keys);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_private_keys),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_strips_nested_private_keys() {
        let metadata = Metadata::new(json!({
            "id": "BaW_jenozKc",
            "__real_download": true,
            "formats": [
                { "format_id": "18", "__working": true },
                { "format_id": "22" }
            ],
            "http_headers": { "__x": 1, "User-Agent": "ua" }
        }))
        .sanitize();

        assert_eq!(
            metadata.into_value(),
            json!({
                "id": "BaW_jenozKc",
                "formats": [
                    { "format_id": "18" },
                    { "format_id": "22" }
                ],
                "http_headers": { "User-Agent": "ua" }
            })
        );
    }

    #[test]
    fn test_sanitize_keeps_single_underscore_keys() {
        let metadata = Metadata::new(json!({ "_type": "video", "_version": {} })).sanitize();
        assert_eq!(metadata.as_value()["_type"], "video");
        assert!(metadata.as_value().get("_version").is_some());
    }

    #[test]
    fn test_accessors() {
        let metadata = Metadata::new(json!({ "id": "abc", "title": "A video" }));
        assert_eq!(metadata.id(), Some("abc"));
        assert_eq!(metadata.title(), Some("A video"));
        assert_eq!(Metadata::new(json!([])).title(), None);
    }

    #[test]
    fn test_serializes_transparently() {
        let metadata = Metadata::new(json!({ "id": "abc" }));
        assert_eq!(serde_json::to_string(&metadata).unwrap(), r#"{"id":"abc"}"#);
    }
}
