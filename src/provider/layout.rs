//! Grouping of positioned spans into lines and blocks.

use std::cmp::Ordering;

use super::content::{is_spaceless_script_char, RawSpan};
use crate::model::{Block, Line, Page, Rect, Span};

/// Baseline tolerance for spans on the same line, as a fraction of font size.
const LINE_TOLERANCE: f32 = 0.3;

/// Line spacing assumed when a page has fewer than two lines.
const DEFAULT_LINE_SPACING: f32 = 12.0;

/// A line of raw spans sharing a baseline.
#[derive(Debug, Clone)]
struct RawLine {
    spans: Vec<RawSpan>,
    y: f32,
    x: f32,
    font_size: f32,
}

impl RawLine {
    fn from_spans(mut spans: Vec<RawSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        insert_word_gaps(&mut spans);
        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        let x = spans.first().map(|s| s.x).unwrap_or(0.0);
        let font_size = spans.iter().map(|s| s.font_size).fold(0.0, f32::max);
        Self {
            spans,
            y,
            x,
            font_size,
        }
    }
}

/// Append a space to a span when the gap to its successor looks like a word break.
///
/// The gap threshold is 20% of the successor's average glyph width. No space is
/// added between two characters of a spaceless script.
fn insert_word_gaps(spans: &mut [RawSpan]) {
    for i in 1..spans.len() {
        let (head, tail) = spans.split_at_mut(i);
        let prev = &mut head[i - 1];
        let span = &tail[0];

        let gap = span.x - prev.right();
        let chars = span.text.chars().count();
        let avg_char_width = if chars > 0 && span.width > 0.0 {
            span.width / chars as f32
        } else {
            span.font_size * 0.5
        };
        if gap <= avg_char_width * 0.2 {
            continue;
        }

        let prev_cjk = prev.text.chars().last().is_some_and(is_spaceless_script_char);
        let curr_cjk = span.text.chars().next().is_some_and(is_spaceless_script_char);
        if prev_cjk && curr_cjk {
            continue;
        }

        let prev_space = prev.text.ends_with(' ') || prev.text.ends_with('\u{00A0}');
        let curr_space = span.text.starts_with(' ') || span.text.starts_with('\u{00A0}');
        if !prev_space && !curr_space {
            prev.text.push(' ');
        }
    }
}

/// Group spans into lines, top to bottom.
fn group_into_lines(mut spans: Vec<RawSpan>) -> Vec<RawLine> {
    spans.sort_by(|a, b| match b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
        other => other,
    });

    let mut lines = Vec::new();
    let mut current: Vec<RawSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * LINE_TOLERANCE;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(RawLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(RawLine::from_spans(current));
    }

    lines
}

fn average_spacing(lines: &[RawLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();
    if spacings.is_empty() {
        return DEFAULT_LINE_SPACING;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break(prev: &RawLine, curr: &RawLine, avg_spacing: f32) -> bool {
    // paragraph gap
    if (prev.y - curr.y).abs() > avg_spacing * 1.5 {
        return true;
    }
    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }
    // indentation
    (prev.x - curr.x).abs() > 20.0
}

/// Group lines into paragraphs.
fn group_into_blocks(lines: Vec<RawLine>) -> Vec<Vec<RawLine>> {
    let avg_spacing = average_spacing(&lines);
    let mut blocks: Vec<Vec<RawLine>> = Vec::new();

    for line in lines {
        let starts_block = match blocks.last().and_then(|b| b.last()) {
            Some(prev) => should_break(prev, &line, avg_spacing),
            None => true,
        };
        if starts_block {
            blocks.push(vec![line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }

    blocks
}

/// Convert a raw span to a model span with a top-left-origin bounding box.
fn to_model_span(span: RawSpan, page_height: f32) -> Span {
    let bbox = Rect::new(
        span.x,
        page_height - span.top(),
        span.right(),
        page_height - span.bottom(),
    );
    Span::new(span.text, span.font_size, span.font).with_bbox(bbox)
}

/// Lay out the spans of one page into text blocks.
pub fn layout_page(index: u32, width: f32, height: f32, spans: Vec<RawSpan>) -> Page {
    let mut page = Page::new(index, width, height);
    for raw_lines in group_into_blocks(group_into_lines(spans)) {
        let lines = raw_lines
            .into_iter()
            .map(|line| {
                Line::from_spans(
                    line.spans
                        .into_iter()
                        .map(|s| to_model_span(s, height))
                        .collect(),
                )
            })
            .collect();
        page.add_block(Block::text(lines));
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * size * 0.5,
            font_size: size,
            font: "Helvetica".to_string(),
        }
    }

    #[test]
    fn test_lines_top_to_bottom() {
        let page = layout_page(
            0,
            612.0,
            792.0,
            vec![
                span("second", 72.0, 686.0, 12.0),
                span("first", 72.0, 700.0, 12.0),
            ],
        );
        let texts: Vec<String> = page.blocks[0].lines.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_same_baseline_joins_line_with_space() {
        let page = layout_page(
            0,
            612.0,
            792.0,
            vec![span("world", 120.0, 700.5, 12.0), span("Hello", 72.0, 700.0, 12.0)],
        );
        let line = &page.blocks[0].lines[0];
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.text(), "Hello world");
    }

    #[test]
    fn test_adjacent_spans_no_space() {
        let page = layout_page(
            0,
            612.0,
            792.0,
            vec![span("Hel", 72.0, 700.0, 10.0), span("lo", 87.0, 700.0, 10.0)],
        );
        assert_eq!(page.blocks[0].lines[0].text(), "Hello");
    }

    #[test]
    fn test_cjk_spans_no_space() {
        let page = layout_page(
            0,
            612.0,
            792.0,
            vec![span("中文", 72.0, 700.0, 10.0), span("文本", 100.0, 700.0, 10.0)],
        );
        assert_eq!(page.blocks[0].lines[0].text(), "中文文本");
    }

    #[test]
    fn test_block_breaks() {
        let page = layout_page(
            0,
            612.0,
            792.0,
            vec![
                span("Heading", 72.0, 720.0, 20.0),
                span("body one", 72.0, 690.0, 12.0),
                span("body two", 72.0, 676.0, 12.0),
                span("after gap", 72.0, 600.0, 12.0),
                span("indented", 140.0, 586.0, 12.0),
            ],
        );
        let blocks: Vec<usize> = page.blocks.iter().map(|b| b.lines.len()).collect();
        assert_eq!(blocks, vec![1, 2, 1, 1]);
    }

    #[test]
    fn test_bbox_top_left_origin() {
        let page = layout_page(0, 612.0, 792.0, vec![span("Top", 72.0, 700.0, 10.0)]);
        let bbox = page.blocks[0].bbox;
        assert!((bbox.y0 - 84.0).abs() < 1e-4);
        assert!((bbox.y1 - 94.0).abs() < 1e-4);
        assert!((bbox.x1 - 87.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_page() {
        let page = layout_page(3, 595.0, 842.0, Vec::new());
        assert_eq!(page.index, 3);
        assert!(page.blocks.is_empty());
    }
}
