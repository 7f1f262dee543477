//! Structural outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level in an extracted outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Level for a zero-based depth, capped at H3.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(s)
    }
}

/// A heading detected in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,
    /// Whitespace-normalized heading text
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Document title plus heading list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (may be empty)
    pub title: String,
    /// Headings in document order
    pub outline: Vec<Heading>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Headings at the given level.
    pub fn headings_at(&self, level: HeadingLevel) -> impl Iterator<Item = &Heading> {
        self.outline.iter().filter(move |h| h.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_serialization() {
        let h = Heading::new(HeadingLevel::H2, "2.1 Background", 3);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"2.1 Background","page":3}"#);
    }

    #[test]
    fn test_empty_outline_json() {
        let json = serde_json::to_string(&Outline::new()).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_level_from_depth() {
        assert_eq!(HeadingLevel::from_depth(0), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_depth(2), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_depth(3), None);
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }
}
