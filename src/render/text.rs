//! Plain-text rendering of outlines.

use crate::model::{HeadingLevel, Outline};

/// Render an outline as an indented list, one heading per line.
///
/// Page numbers are shown as stored (0-based for multi-page documents).
pub fn outline_to_text(outline: &Outline) -> String {
    let mut out = String::new();
    if !outline.title.is_empty() {
        out.push_str(&outline.title);
        out.push('\n');
    }
    for heading in &outline.outline {
        let indent = match heading.level {
            HeadingLevel::H1 => 0,
            HeadingLevel::H2 => 1,
            HeadingLevel::H3 => 2,
        };
        out.push_str(&"  ".repeat(indent + 1));
        out.push_str(&format!("{} {} (p. {})\n", heading.level, heading.text, heading.page));
    }
    out
}
