use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key loaders set to the path a document was read from.
pub const SOURCE_METADATA_KEY: &str = "source";

/// Plain text produced by a loader, plus free-form string metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new<S: Into<String>>(content: S) -> Self {
        Document {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_METADATA_KEY).map(String::as_str)
    }
}
