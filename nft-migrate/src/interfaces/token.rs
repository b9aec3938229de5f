use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// An NFT metadata document as served by the collection's metadata host.
///
/// Only `name` and `image` are interpreted; every other key is carried
/// through untouched so the re-uploaded document matches the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything known about one token during a migration run.
#[derive(Debug, Clone, Default)]
pub struct TokenRecord {
    pub token_id: u64,
    pub metadata_uri: Option<String>,
    pub document: Option<MetadataDocument>,
    pub metadata_path: Option<PathBuf>,
    pub media_path: Option<PathBuf>,
    pub remote_media_url: Option<String>,
    pub remote_metadata_url: Option<String>,
    pub failure: Option<String>,
}

impl TokenRecord {
    pub fn new(token_id: u64) -> Self {
        Self {
            token_id,
            ..Default::default()
        }
    }

    pub fn is_fetched(&self) -> bool {
        self.document.is_some() && self.metadata_path.is_some()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.document.as_ref().map(|document| document.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_unknown_keys_when_round_tripping() {
        let raw = r#"{"name":"Foo A","image":"https://host/im0","attributes":[{"trait_type":"eyes","value":"red"}],"edition":7}"#;
        let document: MetadataDocument = serde_json::from_str(raw).unwrap();

        assert_eq!(document.name, "Foo A");
        assert_eq!(document.image, "https://host/im0");
        assert_eq!(document.extra["edition"], 7);

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["attributes"][0]["value"], "red");
    }

    #[test]
    fn should_reject_document_without_image() {
        let result = serde_json::from_str::<MetadataDocument>(r#"{"name":"Foo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_record_is_not_fetched() {
        let record = TokenRecord::new(4);
        assert_eq!(record.token_id, 4);
        assert!(!record.is_fetched());
        assert!(record.display_name().is_none());
    }
}
