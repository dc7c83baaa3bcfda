//! CMS-owned document records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A content document as returned by the CMS read API.
///
/// Documents are opaque to this system beyond the handful of fields the
/// pipeline reads (`data.url` for routing, `data.blocks` for the content
/// renderer). Everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// CMS record id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Editor-facing document name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Model-specific payload
    #[serde(default)]
    pub data: Value,

    /// Remaining CMS fields, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// The URL path this document targets, when the model declares one.
    pub fn url(&self) -> Option<&str> {
        self.data.get("url").and_then(Value::as_str)
    }

    /// The nested content blocks, when present.
    ///
    /// Path enumeration asks the CMS to omit this field, so absence is the
    /// common case outside of a full page fetch.
    pub fn blocks(&self) -> Option<&Vec<Value>> {
        self.data.get("blocks").and_then(Value::as_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_url_from_data() {
        let doc: Document =
            serde_json::from_value(json!({ "id": "abc", "data": { "url": "/pricing" } })).unwrap();

        assert_eq!(doc.url(), Some("/pricing"));
    }

    #[test]
    fn url_is_none_when_omitted_or_not_a_string() {
        let no_url: Document = serde_json::from_value(json!({ "data": {} })).unwrap();
        let bad_url: Document =
            serde_json::from_value(json!({ "data": { "url": 7 } })).unwrap();

        assert_eq!(no_url.url(), None);
        assert_eq!(bad_url.url(), None);
    }

    #[test]
    fn preserves_unknown_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id": "abc",
            "data": { "url": "/" },
            "published": "published",
            "variations": {}
        }))
        .unwrap();

        assert_eq!(doc.extra["published"], "published");

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["variations"], json!({}));
    }

    #[test]
    fn exposes_blocks_when_present() {
        let doc: Document = serde_json::from_value(json!({
            "data": { "blocks": [{ "@type": "text" }] }
        }))
        .unwrap();

        assert_eq!(doc.blocks().unwrap().len(), 1);
    }
}
