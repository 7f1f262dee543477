//! # docsift
//!
//! Structural outlines and persona-driven section ranking for page-described
//! documents.
//!
//! A document is loaded into a page-description model (pages of blocks, lines
//! and styled spans) by a provider. From there the library can:
//!
//! - extract an **outline**: a title plus an H1/H2/H3 heading list with page
//!   numbers, using font statistics, numbering patterns and script detection;
//! - **segment** documents into titled sections and **rank** them against a
//!   persona and task, then distill the best ones into short excerpts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract_outline_file, render, OutlineOptions};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = extract_outline_file("report.pdf", &OutlineOptions::default())?;
//!     println!("{}", render::outline_to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Collections
//!
//! ```no_run
//! use docsift::{collection, HashEmbedder, RankOptions};
//! use std::path::Path;
//!
//! let embedder = HashEmbedder::default();
//! let dir = Path::new("collections/travel");
//! if let Some(report) = collection::process_collection(dir, &embedder, &RankOptions::default())? {
//!     collection::write_report(&report, &dir.join(collection::OUTPUT_FILE))?;
//! }
//! # Ok::<(), docsift::Error>(())
//! ```

pub mod analysis;
pub mod collection;
pub mod error;
pub mod model;
pub mod options;
pub mod provider;
pub mod rank;
pub mod render;

pub use analysis::{
    detect_script, extract_outline, segment_document, segment_documents, HeadingClassifier,
    Script, StyleKey, StyleLevelMap,
};
pub use collection::{CollectionInput, CollectionReport};
pub use error::{Error, Result};
pub use model::{
    Block, Document, Heading, HeadingLevel, Line, Outline, Page, RankedSection, Rect, Section,
    Span,
};
pub use options::{HeadingPolicy, OutlineOptions, RankOptions};
pub use provider::{load_document, JsonProvider, PageProvider, PdfProvider};
pub use rank::{Embedder, ExclusionPolicy, HashEmbedder, Query};
pub use render::JsonFormat;

use std::path::Path;

/// Load a file and extract its outline.
///
/// # Example
///
/// ```no_run
/// use docsift::{extract_outline_file, OutlineOptions};
///
/// let outline = extract_outline_file("file01.pdf", &OutlineOptions::new().relaxed()).unwrap();
/// for heading in &outline.outline {
///     println!("{} {} ({})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P, options: &OutlineOptions) -> Result<Outline> {
    let doc = load_document(path)?;
    Ok(extract_outline(&doc, options))
}

/// Load a file and segment it into titled sections.
pub fn segment_file<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    let doc = load_document(path)?;
    Ok(segment_document(&doc))
}

/// Load a file and render its outline as JSON.
///
/// # Example
///
/// ```no_run
/// use docsift::{outline_json, JsonFormat};
///
/// let json = outline_json("file01.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("file01.json", json).unwrap();
/// ```
pub fn outline_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline_file(path, &OutlineOptions::default())?;
    render::outline_to_json(&outline, format)
}

/// Builder bundling outline and ranking options with an embedder.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let sift = Docsift::new().relaxed().with_top_sections(10);
/// let outline = sift.outline("guide.pdf")?;
/// let report = sift.rank_collection("collections/travel")?;
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct Docsift {
    outline_options: OutlineOptions,
    rank_options: RankOptions,
    /// Custom model; `None` uses a [`HashEmbedder`] following `rank_options.parallel`.
    embedder: Option<Box<dyn Embedder>>,
}

impl Docsift {
    /// Create a builder with default options and the hashing embedder.
    pub fn new() -> Self {
        Self {
            outline_options: OutlineOptions::default(),
            rank_options: RankOptions::default(),
            embedder: None,
        }
    }

    /// Use the relaxed heading classifier.
    pub fn relaxed(mut self) -> Self {
        self.outline_options = self.outline_options.relaxed();
        self
    }

    /// Replace the outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Replace the ranking options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.rank_options = options;
        self
    }

    /// Set the number of reported sections.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.rank_options = self.rank_options.with_top_sections(n);
        self
    }

    /// Use a different embedding model.
    pub fn with_embedder(mut self, embedder: impl Embedder + 'static) -> Self {
        self.embedder = Some(Box::new(embedder));
        self
    }

    /// Disable parallel processing, including in the built-in embedder.
    pub fn sequential(mut self) -> Self {
        self.rank_options = self.rank_options.sequential();
        self
    }

    /// Extract the outline of a file.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        extract_outline_file(path, &self.outline_options)
    }

    fn default_embedder(&self) -> HashEmbedder {
        HashEmbedder::default().with_parallel(self.rank_options.parallel)
    }

    /// Rank one collection directory.
    pub fn rank_collection<P: AsRef<Path>>(&self, dir: P) -> Result<Option<CollectionReport>> {
        match &self.embedder {
            Some(embedder) => {
                collection::process_collection(dir.as_ref(), embedder.as_ref(), &self.rank_options)
            }
            None => collection::process_collection(
                dir.as_ref(),
                &self.default_embedder(),
                &self.rank_options,
            ),
        }
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_json_from_page_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flyer.json");
        std::fs::write(
            &path,
            r#"{"pages": [{"blocks": [
                {"lines": [{"spans": [{"text": "JOIN US", "size": 30.0, "font": "Arial-Bold"}]}]},
                {"lines": [{"spans": [{"text": "for a party", "size": 12.0, "font": "Arial"}]}]}
            ]}]}"#,
        )
        .unwrap();

        let json = outline_json(&path, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"","outline":[{"level":"H1","text":"JOIN US","page":0}]}"#
        );
    }

    #[test]
    fn test_builder_defaults() {
        let sift = Docsift::default().relaxed().sequential();
        assert_eq!(sift.outline_options.policy, HeadingPolicy::Relaxed);
        assert!(!sift.rank_options.parallel);
        assert!(sift.embedder.is_none());
        assert_eq!(sift.default_embedder().dimensions(), rank::DEFAULT_DIMENSIONS);
    }

    #[test]
    fn test_sequential_reaches_default_embedder() {
        assert!(Docsift::new().default_embedder().is_parallel());
        assert!(!Docsift::new().sequential().default_embedder().is_parallel());
        let custom = Docsift::new().with_embedder(HashEmbedder::new(8)).sequential();
        assert!(custom.embedder.is_some());
    }
}
