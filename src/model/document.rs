//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A page-described document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source file name (external identity)
    #[serde(default)]
    pub name: String,

    /// Embedded title metadata, if any
    #[serde(default)]
    pub title: Option<String>,

    /// Pages in the document
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            pages: Vec::new(),
        }
    }

    /// Set the embedded title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new("report.pdf");
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.name, "report.pdf");
        assert!(doc.title.is_none());
    }

    #[test]
    fn test_document_deserialize_defaults() {
        let doc: Document =
            serde_json::from_str(r#"{"pages":[{"blocks":[{"lines":[]}]}]}"#).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.block_count(), 1);
        assert!(doc.pages[0].blocks[0].is_text());
    }
}
