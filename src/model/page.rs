//! Page-level layout types: spans, lines, blocks and pages.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page coordinates (origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A run of text with a uniform style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font identifier (e.g., "Helvetica-Bold")
    pub font: String,
    /// Bounding box
    #[serde(default)]
    pub bbox: Rect,
}

impl Span {
    /// Create a span without geometry.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
            bbox: Rect::default(),
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = bbox;
        self
    }

    /// Font size rounded to whole points, ties to even.
    pub fn rounded_size(&self) -> i32 {
        self.size.round_ties_even() as i32
    }

    /// Whether the font name marks a bold weight.
    pub fn is_bold(&self) -> bool {
        self.font.to_lowercase().contains("bold")
    }
}

/// A line of spans, read left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
    /// Bounding box
    #[serde(default)]
    pub bbox: Rect,
}

impl Line {
    /// Create a line from spans, computing its bounding box.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        let bbox = spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { spans, bbox }
    }

    /// Span texts concatenated without separator.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Span texts joined with single spaces.
    pub fn spaced_text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First span of the line, if any.
    pub fn first_span(&self) -> Option<&Span> {
        self.spans.first()
    }
}

/// Kind of layout block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Block containing text lines
    #[default]
    Text,
    /// Image, drawing or other non-text content
    NonText,
}

/// A layout unit on a page (paragraph, heading candidate, image...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type tag
    #[serde(default)]
    pub kind: BlockKind,
    /// Bounding box
    #[serde(default)]
    pub bbox: Rect,
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a text block from lines, computing its bounding box.
    pub fn text(lines: Vec<Line>) -> Self {
        let bbox = lines
            .iter()
            .map(|l| l.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self {
            kind: BlockKind::Text,
            bbox,
            lines,
        }
    }

    /// Create a non-text block.
    pub fn non_text(bbox: Rect) -> Self {
        Self {
            kind: BlockKind::NonText,
            bbox,
            lines: Vec::new(),
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = bbox;
        self
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }

    /// Text block that has at least one line.
    pub fn has_lines(&self) -> bool {
        self.is_text() && !self.lines.is_empty()
    }

    /// All span texts of all lines joined with single spaces, trimmed.
    pub fn full_text(&self) -> String {
        self.lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// First span of the first line.
    pub fn first_span(&self) -> Option<&Span> {
        self.lines.first().and_then(|l| l.first_span())
    }

    /// Iterate over all spans in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }
}

/// A single page of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-based)
    #[serde(default)]
    pub index: u32,
    /// Page width in points
    #[serde(default)]
    pub width: f32,
    /// Page height in points
    #[serde(default)]
    pub height: f32,
    /// Layout blocks in reading order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(index: u32, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty US Letter page.
    pub fn letter(index: u32) -> Self {
        Self::new(index, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterate over the text blocks of the page.
    pub fn text_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_text())
    }

    /// Page text as a plain dump: one line of text per layout line.
    pub fn plain_text(&self) -> String {
        self.text_blocks()
            .flat_map(|b| b.lines.iter().map(|l| l.text()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
