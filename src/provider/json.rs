//! Page descriptions serialized as JSON.

use std::fs;
use std::path::Path;

use super::{finish, PageProvider};
use crate::error::Result;
use crate::model::Document;

/// Loads documents stored in the serialized page-description format.
///
/// When the file carries no `name`, the file name is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProvider;

impl JsonProvider {
    /// Create a new JSON provider.
    pub fn new() -> Self {
        Self
    }

    /// Parse a page description from a JSON string.
    pub fn load_str(&self, name: &str, json: &str) -> Result<Document> {
        let mut doc: Document = serde_json::from_str(json)?;
        if doc.name.is_empty() {
            doc.name = name.to_string();
        }
        Ok(finish(doc))
    }
}

impl PageProvider for JsonProvider {
    fn load(&self, path: &Path) -> Result<Document> {
        let json = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.load_str(&name, &json)
    }
}
