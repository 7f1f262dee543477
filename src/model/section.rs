//! Titled sections produced by segmentation and ranking.

use serde::{Deserialize, Serialize};

/// A titled run of body text inside one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Source document name
    pub document: String,
    /// Page where the section starts (1-indexed)
    pub page_number: u32,
    /// Section title
    pub section_title: String,
    /// Accumulated body text
    pub text: String,
}

impl Section {
    /// Create a new section.
    pub fn new(
        document: impl Into<String>,
        page_number: u32,
        section_title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            page_number,
            section_title: section_title.into(),
            text: text.into(),
        }
    }

    /// Title and body, lowercased, as used by keyword filters.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.section_title, self.text).to_lowercase()
    }
}

/// A section with its blended relevance score and importance rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// The underlying section
    #[serde(flatten)]
    pub section: Section,
    /// Blended similarity score
    pub score: f32,
    /// Importance rank (1-based)
    pub importance_rank: usize,
}
