//! Reunites heading numbers that the layout engine split into their own block.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Block;

/// Maximum difference between the top edges of the number and title blocks.
pub const MERGE_Y_TOLERANCE: f32 = 5.0;

lazy_static! {
    static ref STANDALONE_NUMBER: Regex = Regex::new(r"^[\d.]+\s*$").unwrap();
}

/// Check if a block's text is nothing but a number like `3.2` or `4.`.
pub fn is_standalone_number(block: &Block) -> bool {
    block.has_lines() && STANDALONE_NUMBER.is_match(&block.full_text())
}

/// Merge `"3.2"` + `"Heading Title"` block pairs into a single block.
///
/// The merged block is the number block with its first span text replaced
/// by `"{number} {title}"`; the title block is dropped. Pairs never overlap:
/// scanning resumes after a merged pair. Input blocks are not modified.
pub fn merge_split_numbers(blocks: &[Block]) -> Vec<Block> {
    let mut merged = Vec::with_capacity(blocks.len());
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];
        if let Some(next) = blocks.get(i + 1) {
            if is_standalone_number(block)
                && next.has_lines()
                && (block.bbox.y0 - next.bbox.y0).abs() < MERGE_Y_TOLERANCE
            {
                let number = block.full_text();
                let title = next.full_text();
                let mut joined = block.clone();
                if let Some(span) = joined
                    .lines
                    .first_mut()
                    .and_then(|l| l.spans.first_mut())
                {
                    span.text = format!("{} {}", number.trim(), title);
                }
                log::debug!("merged split heading number: {:?} + {:?}", number, title);
                merged.push(joined);
                i += 2;
                continue;
            }
        }
        merged.push(block.clone());
        i += 1;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Rect, Span};

    fn block_at(text: &str, y: f32) -> Block {
        let bbox = Rect::new(72.0, y, 300.0, y + 14.0);
        Block::text(vec![Line::from_spans(vec![
            Span::new(text, 14.0, "Bold").with_bbox(bbox)
        ])])
    }

    #[test]
    fn test_merges_aligned_number() {
        let blocks = vec![block_at("2.1", 100.0), block_at("Background", 102.0)];
        let merged = merge_split_numbers(&blocks);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].full_text(), "2.1 Background");
        // input untouched
        assert_eq!(blocks[0].full_text(), "2.1");
    }

    #[test]
    fn test_keeps_misaligned_blocks() {
        let blocks = vec![block_at("2.1", 100.0), block_at("Background", 130.0)];
        let merged = merge_split_numbers(&blocks);
        assert_eq!(merged, blocks);
    }

    #[test]
    fn test_non_numeric_first_block() {
        let blocks = vec![block_at("Intro", 100.0), block_at("Background", 100.0)];
        assert_eq!(merge_split_numbers(&blocks).len(), 2);
    }

    #[test]
    fn test_skips_non_text_follower() {
        let blocks = vec![
            block_at("3", 100.0),
            Block::non_text(Rect::new(72.0, 100.0, 200.0, 200.0)),
        ];
        assert_eq!(merge_split_numbers(&blocks).len(), 2);
    }

    #[test]
    fn test_greedy_non_overlapping() {
        let blocks = vec![
            block_at("1.", 100.0),
            block_at("2.", 100.0),
            block_at("Scope", 100.0),
        ];
        let merged = merge_split_numbers(&blocks);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].full_text(), "1. 2.");
        assert_eq!(merged[1].full_text(), "Scope");
    }

    #[test]
    fn test_standalone_number_detection() {
        assert!(is_standalone_number(&block_at("3.2.1", 0.0)));
        assert!(is_standalone_number(&block_at("4. ", 0.0)));
        assert!(!is_standalone_number(&block_at("4a", 0.0)));
        assert!(!is_standalone_number(&Block::text(Vec::new())));
    }
}
