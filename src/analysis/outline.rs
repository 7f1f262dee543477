//! Outline extraction: flyer mode for single pages, classified headings otherwise.

use std::borrow::Cow;
use std::collections::HashSet;

use super::classify::{is_all_uppercase, ClassifyContext, HeadingClassifier, StyleLevelMap};
use super::merge::merge_split_numbers;
use super::script::{detect_script, Script};
use super::style::body_size;
use crate::model::{Document, Heading, HeadingLevel, Outline};
use crate::options::{HeadingPolicy, OutlineOptions};

/// Minimum length of an accepted metadata title.
const MIN_TITLE_CHARS: usize = 5;

/// Flyer candidates longer than this are ignored.
const MAX_FLYER_CHARS: usize = 50;

/// Metadata titles containing these are file names, not titles.
const FILE_NAME_MARKERS: &[&str] = &[".doc", ".pdf", ".cdr"];

/// Extract a document outline.
///
/// Single-page documents go through flyer mode; multi-page documents get a
/// metadata title and classified headings.
pub fn extract_outline(doc: &Document, options: &OutlineOptions) -> Outline {
    match doc.page_count() {
        0 => Outline::new(),
        1 => extract_flyer(doc, detect_script(doc)),
        _ => extract_headings(doc, options),
    }
}

/// Metadata title, or empty if missing, too short or a file name.
pub fn clean_title(raw: Option<&str>) -> String {
    let title = raw.map(str::trim).unwrap_or_default();
    let lower = title.to_lowercase();
    if title.chars().count() < MIN_TITLE_CHARS
        || FILE_NAME_MARKERS.iter().any(|m| lower.contains(m))
    {
        return String::new();
    }
    title.to_string()
}

/// Prominence of a flyer candidate.
pub fn prominence(size: i32, bold: bool, uppercase: bool, script: Script) -> f32 {
    let size = size as f32;
    let mut score = size * size;
    if bold {
        score *= 1.2;
    }
    if uppercase && script == Script::Latin {
        score *= 1.1;
    }
    score
}

/// Pick the single most prominent short text on the first page.
pub fn extract_flyer(doc: &Document, script: Script) -> Outline {
    let mut outline = Outline::new();
    let Some(page) = doc.pages.first() else {
        return outline;
    };

    let mut best_score = 0.0f32;
    let mut best: Option<String> = None;

    for block in page.text_blocks() {
        let Some(line) = block.lines.first() else {
            continue;
        };
        let Some(span) = line.first_span() else {
            continue;
        };
        let text = line.spaced_text().trim().to_string();
        if text.is_empty() || text.chars().count() > MAX_FLYER_CHARS {
            continue;
        }

        let score = prominence(
            span.rounded_size(),
            span.is_bold(),
            is_all_uppercase(&text),
            script,
        );
        if score > best_score {
            best_score = score;
            best = Some(text);
        }
    }

    if let Some(text) = best {
        log::debug!("{}: flyer heading {:?} ({:.1})", doc.name, text, best_score);
        outline.outline.push(Heading::new(HeadingLevel::H1, text, 0));
    }
    outline
}

fn extract_headings(doc: &Document, options: &OutlineOptions) -> Outline {
    let body_size = body_size(doc);
    let script = detect_script(doc);
    let classifier = HeadingClassifier::new(options.policy);

    let observed;
    let style_levels = match (options.policy, &options.style_levels) {
        (HeadingPolicy::Strict, _) => None,
        (HeadingPolicy::Relaxed, Some(map)) => Some(map),
        (HeadingPolicy::Relaxed, None) => {
            observed = StyleLevelMap::observe(doc, body_size);
            Some(&observed)
        }
    };
    let ctx = ClassifyContext {
        body_size,
        script,
        style_levels,
    };
    log::debug!(
        "{}: body size {}, script {}, policy {:?}",
        doc.name,
        body_size,
        script,
        options.policy
    );

    let mut outline = Outline {
        title: clean_title(doc.title.as_deref()),
        outline: Vec::new(),
    };
    let mut seen: HashSet<String> = HashSet::new();

    for (page_num, page) in doc.pages.iter().enumerate() {
        let blocks: Cow<'_, [_]> = if options.merge_split_numbers {
            Cow::Owned(merge_split_numbers(&page.blocks))
        } else {
            Cow::Borrowed(&page.blocks[..])
        };

        for block in blocks.iter() {
            let Some(found) = classifier.classify(block, &ctx) else {
                continue;
            };
            if !seen.insert(found.text.clone()) {
                continue;
            }
            log::debug!("{} p{}: {} {:?} ({})", doc.name, page_num, found.level, found.text, found.rule);
            outline
                .outline
                .push(Heading::new(found.level, found.text, page_num as u32));
        }
    }

    outline
}
