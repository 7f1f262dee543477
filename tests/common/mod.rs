//! Shared fixtures for integration tests.

#![allow(dead_code)]

mod pdf;

pub use pdf::{build_pdf, Run};

use docsift::model::{Block, Line, Page, Span};

/// Heading run followed by `lines` body lines, starting at `y`.
pub fn titled_runs<'a>(title: &'a str, body: &'a str, y: i64, lines: usize) -> Vec<Run<'a>> {
    let mut runs = vec![("F2", 16, 72, y, title)];
    for i in 0..lines as i64 {
        runs.push(("F1", 11, 72, y - 24 - i * 14, body));
    }
    runs
}

pub fn line(text: &str, size: f32, font: &str) -> Line {
    Line::from_spans(vec![Span::new(text, size, font)])
}

/// A body paragraph of three identical lines.
pub fn paragraph(text: &str) -> Block {
    Block::text(vec![
        line(text, 11.0, "Arial"),
        line(text, 11.0, "Arial"),
        line(text, 11.0, "Arial"),
    ])
}

/// A single-line block.
pub fn single(text: &str, size: f32, font: &str) -> Block {
    Block::text(vec![line(text, size, font)])
}

/// A page from blocks.
pub fn page(index: u32, blocks: Vec<Block>) -> Page {
    let mut page = Page::letter(index);
    for block in blocks {
        page.add_block(block);
    }
    page
}
