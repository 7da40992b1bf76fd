//! Plugin record model and catalog document encoding

use crate::error::{MarketError, MarketResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single catalog entry.
///
/// `name` is the lookup key. The repository link is persisted as
/// `github_url` so documents written by earlier deployments keep loading.
/// Timestamps are kept as the text found in the document. Keys outside the
/// known fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord {
    pub name: String,
    pub description: String,
    pub author: String,
    #[serde(rename = "github_url", alias = "repository_url")]
    pub repository_url: String,
    pub version: String,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluginRecord {
    /// Decode one record from its position in the document.
    pub fn from_value(index: usize, value: Value) -> MarketResult<Self> {
        let record: PluginRecord =
            serde_json::from_value(value).map_err(|e| MarketError::MalformedRecord {
                index,
                reason: e.to_string(),
            })?;
        record.validate(index)?;
        Ok(record)
    }

    /// Structural checks serde cannot express.
    pub fn validate(&self, index: usize) -> MarketResult<()> {
        if self.name.trim().is_empty() {
            return Err(MarketError::MalformedRecord {
                index,
                reason: "name must not be empty".to_string(),
            });
        }

        if self.repository_url.trim().is_empty() {
            return Err(MarketError::MalformedRecord {
                index,
                reason: format!("plugin '{}' has an empty repository url", self.name),
            });
        }

        let timestamps = [
            ("created_at", &self.created_at),
            ("updated_at", &self.updated_at),
        ];
        for (field, value) in timestamps {
            if value.trim().is_empty() {
                return Err(MarketError::MalformedRecord {
                    index,
                    reason: format!("plugin '{}' has an empty {}", self.name, field),
                });
            }
        }

        Ok(())
    }
}

/// Decode a whole catalog document.
///
/// Content that is not a JSON array is `StoreUnreadable`; an array element
/// that does not form a valid record is `MalformedRecord`.
pub fn decode_document(contents: &str) -> MarketResult<Vec<PluginRecord>> {
    let entries: Vec<Value> = serde_json::from_str(contents)
        .map_err(|e| MarketError::StoreUnreadable(format!("Failed to parse catalog: {}", e)))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, value)| PluginRecord::from_value(index, value))
        .collect()
}

/// Encode the catalog as pretty-printed UTF-8 JSON.
pub fn encode_document(records: &[PluginRecord]) -> MarketResult<String> {
    let mut json = serde_json::to_string_pretty(records)
        .map_err(|e| MarketError::Internal(format!("Failed to serialize catalog: {}", e)))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "翻译插件",
            "description": "多语言翻译",
            "author": "TranslateBot",
            "github_url": "https://github.com/maibot/translate-plugin",
            "version": "1.4.0",
            "categories": ["实用工具", "翻译"],
            "keywords": ["翻译"],
            "created_at": "2024-01-18T14:20:00Z",
            "updated_at": "2024-02-02T10:10:00Z"
        })
    }

    #[test]
    fn test_decode_record() {
        let record = PluginRecord::from_value(0, sample()).unwrap();
        assert_eq!(record.name, "翻译插件");
        assert_eq!(record.repository_url, "https://github.com/maibot/translate-plugin");
        assert_eq!(record.categories, vec!["实用工具", "翻译"]);
        assert_eq!(record.created_at, "2024-01-18T14:20:00Z");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_repository_url_alias() {
        let mut value = sample();
        let url = value["github_url"].take();
        value.as_object_mut().unwrap().remove("github_url");
        value["repository_url"] = url;

        let record = PluginRecord::from_value(0, value).unwrap();
        assert_eq!(record.repository_url, "https://github.com/maibot/translate-plugin");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("author");

        match PluginRecord::from_value(3, value) {
            Err(MarketError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 3);
                assert!(reason.contains("author"));
            }
            other => panic!("Expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let mut value = sample();
        value["name"] = json!("  ");

        let err = PluginRecord::from_value(0, value).unwrap_err();
        assert_eq!(err.kind(), "malformed_record");
    }

    #[test]
    fn test_timestamps_kept_verbatim() {
        let mut value = sample();
        value["created_at"] = json!("2024-03-01T10:00:00.123456");
        value["updated_at"] = json!("2024-03-01T18:00:00+08:00");

        let record = PluginRecord::from_value(0, value).unwrap();
        assert_eq!(record.created_at, "2024-03-01T10:00:00.123456");
        assert_eq!(record.updated_at, "2024-03-01T18:00:00+08:00");
    }

    #[test]
    fn test_empty_timestamp_is_malformed() {
        let mut value = sample();
        value["updated_at"] = json!("");

        assert!(matches!(
            PluginRecord::from_value(0, value),
            Err(MarketError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let mut value = sample();
        value["downloads"] = json!(1200);
        value["homepage"] = json!("https://maibot.example/translate");

        let record = PluginRecord::from_value(0, value).unwrap();
        assert_eq!(record.extra["downloads"], 1200);

        let json = encode_document(&[record]).unwrap();
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0]["homepage"], "https://maibot.example/translate");
        assert!(back[0].get("extra").is_none());
    }

    #[test]
    fn test_non_array_document_is_unreadable() {
        assert!(matches!(
            decode_document("{\"name\": \"x\"}"),
            Err(MarketError::StoreUnreadable(_))
        ));
        assert!(matches!(
            decode_document("not json at all"),
            Err(MarketError::StoreUnreadable(_))
        ));
    }

    #[test]
    fn test_bad_element_reports_position() {
        let doc = json!([sample(), {"name": "broken"}]).to_string();

        match decode_document(&doc) {
            Err(MarketError::MalformedRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_encoding_keeps_text_readable() {
        let record = PluginRecord::from_value(0, sample()).unwrap();
        let json = encode_document(&[record]).unwrap();

        assert!(json.contains("翻译插件"));
        assert!(json.contains("\"github_url\""));
        assert!(json.contains("2024-01-18T14:20:00Z"));
        assert!(json.ends_with('\n'));
    }
}
