//! Page providers: turn source files into the page-description model.
//!
//! Providers are the only place that knows about file formats. Everything
//! downstream works on [`Document`](crate::model::Document).

pub mod content;
pub mod json;
pub mod layout;
pub mod pdf;

#[cfg(test)]
#[path = "../../tests/common/pdf.rs"]
pub(crate) mod pdf_fixture;

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Document;

pub use json::JsonProvider;
pub use pdf::{detect_pdf_version, PdfProvider};

/// A source of page descriptions.
pub trait PageProvider: Send + Sync {
    /// Load a document from a file.
    fn load(&self, path: &Path) -> Result<Document>;
}

/// Pick a provider from the file extension (case-insensitive).
pub fn provider_for(path: &Path) -> Result<&'static dyn PageProvider> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => Ok(&PdfProvider),
        "json" => Ok(&JsonProvider),
        _ => Err(Error::UnknownFormat(path.display().to_string())),
    }
}

/// Normalize all span text to NFC.
#[cfg(feature = "unicode-normalize")]
pub fn normalize_document(doc: &mut Document) {
    use unicode_normalization::UnicodeNormalization;

    for page in &mut doc.pages {
        for block in &mut page.blocks {
            for line in &mut block.lines {
                for span in &mut line.spans {
                    span.text = span.text.nfc().collect();
                }
            }
        }
    }
}

/// Final pass applied by every provider.
pub(crate) fn finish(doc: Document) -> Document {
    #[cfg(feature = "unicode-normalize")]
    let doc = {
        let mut doc = doc;
        normalize_document(&mut doc);
        doc
    };
    doc
}

/// Load a PDF or a JSON page description.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    provider_for(path)?.load(path)
}
