//! Body text style profiling.
//!
//! The body style is the font size (or size/font pair) carrying the most
//! characters in a document. Headings are detected as deviations from it.

use indexmap::IndexMap;
use std::fmt;

use crate::model::{Block, Document, Span};

/// Body font size used when a document has no qualifying text.
pub const DEFAULT_BODY_SIZE: i32 = 12;

/// A (rounded size, font) pair identifying a text style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    /// Rounded font size
    pub size: i32,
    /// Font identifier
    pub font: String,
}

impl StyleKey {
    /// Create a new style key.
    pub fn new(size: i32, font: impl Into<String>) -> Self {
        Self {
            size,
            font: font.into(),
        }
    }

    /// Style key of a span.
    pub fn of(span: &Span) -> Self {
        Self::new(span.rounded_size(), span.font.clone())
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt {}", self.size, self.font)
    }
}

/// Which blocks contribute to the body style estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileMode {
    /// Only text blocks with more than two lines (paragraph heuristic)
    #[default]
    Paragraph,
    /// Every text block
    Fast,
}

impl ProfileMode {
    fn accepts(&self, block: &Block) -> bool {
        if !block.is_text() {
            return false;
        }
        match self {
            ProfileMode::Paragraph => block.lines.len() > 2,
            ProfileMode::Fast => true,
        }
    }
}

/// Character counts per font size and per style, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Characters per rounded size
    pub size_histogram: IndexMap<i32, usize>,
    /// Characters per (size, font) style
    pub style_histogram: IndexMap<StyleKey, usize>,
}

impl FontStatistics {
    /// Collect statistics over a whole document.
    pub fn collect(doc: &Document, mode: ProfileMode) -> Self {
        let mut stats = Self::default();
        for page in &doc.pages {
            for block in page.blocks.iter().filter(|b| mode.accepts(b)) {
                for span in block.spans() {
                    stats.add_span(span);
                }
            }
        }
        log::debug!(
            "{}: {} sizes, {} styles observed",
            doc.name,
            stats.size_histogram.len(),
            stats.style_histogram.len()
        );
        stats
    }

    /// Add a span observation.
    pub fn add_span(&mut self, span: &Span) {
        let chars = span.text.trim().chars().count();
        *self.size_histogram.entry(span.rounded_size()).or_insert(0) += chars;
        *self.style_histogram.entry(StyleKey::of(span)).or_insert(0) += chars;
    }

    /// Check if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.style_histogram.is_empty()
    }

    /// Most common rounded size, or [`DEFAULT_BODY_SIZE`].
    pub fn body_size(&self) -> i32 {
        argmax(&self.size_histogram)
            .copied()
            .unwrap_or(DEFAULT_BODY_SIZE)
    }

    /// Most common style, if any text was observed.
    pub fn body_style(&self) -> Option<StyleKey> {
        argmax(&self.style_histogram).cloned()
    }
}

/// First key with the strictly largest count.
fn argmax<K>(histogram: &IndexMap<K, usize>) -> Option<&K> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in histogram {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(k, _)| k)
}

/// Body font size of a document using the paragraph heuristic.
pub fn body_size(doc: &Document) -> i32 {
    FontStatistics::collect(doc, ProfileMode::Paragraph).body_size()
}

/// Body style of a document over all text blocks.
pub fn body_style(doc: &Document) -> Option<StyleKey> {
    FontStatistics::collect(doc, ProfileMode::Fast).body_style()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Page};

    fn block(lines: &[(&str, f32, &str)]) -> Block {
        Block::text(
            lines
                .iter()
                .map(|(t, s, f)| Line::from_spans(vec![Span::new(*t, *s, *f)]))
                .collect(),
        )
    }

    fn doc_with(blocks: Vec<Block>) -> Document {
        let mut page = Page::letter(0);
        for b in blocks {
            page.add_block(b);
        }
        let mut doc = Document::new("test.pdf");
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_paragraph_mode_ignores_short_blocks() {
        let doc = doc_with(vec![
            block(&[("A very long heading line that has many characters", 18.0, "Bold")]),
            block(&[
                ("body one", 11.0, "Regular"),
                ("body two", 11.0, "Regular"),
                ("body three", 11.0, "Regular"),
            ]),
        ]);
        assert_eq!(body_size(&doc), 11);

        let fast = FontStatistics::collect(&doc, ProfileMode::Fast);
        assert_eq!(fast.body_size(), 18);
    }

    #[test]
    fn test_default_body_size_without_paragraphs() {
        let doc = doc_with(vec![block(&[("Title", 30.0, "Bold")])]);
        assert_eq!(body_size(&doc), DEFAULT_BODY_SIZE);
    }

    #[test]
    fn test_body_style_counts_characters() {
        let doc = doc_with(vec![
            block(&[("x", 10.0, "A"), ("y", 10.0, "A"), ("z", 10.0, "A")]),
            block(&[("a much longer run of text", 10.0, "B")]),
        ]);
        assert_eq!(body_style(&doc), Some(StyleKey::new(10, "B")));
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let doc = doc_with(vec![block(&[("abc", 10.0, "A")]), block(&[("xyz", 12.0, "B")])]);
        assert_eq!(body_style(&doc), Some(StyleKey::new(10, "A")));
    }

    #[test]
    fn test_non_text_blocks_ignored() {
        let doc = doc_with(vec![Block::non_text(Default::default())]);
        assert!(body_style(&doc).is_none());
        assert!(FontStatistics::collect(&doc, ProfileMode::Fast).is_empty());
    }

    #[test]
    fn test_style_key_display() {
        assert_eq!(StyleKey::new(12, "Arial").to_string(), "12pt Arial");
    }
}
