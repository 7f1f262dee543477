//! Partitions document text into titled sections.

use super::classify::BoundaryClassifier;
use super::style::body_style;
use crate::model::{Document, Section};

/// The section being accumulated.
struct OpenSection {
    title: String,
    text: String,
    start_page: u32,
}

impl OpenSection {
    fn introduction(doc: &Document) -> Self {
        Self {
            title: format!("{} - Introduction", doc.name),
            text: String::new(),
            start_page: 1,
        }
    }

    fn close(self, doc: &Document, out: &mut Vec<Section>) {
        let text = self.text.trim();
        if text.is_empty() {
            return;
        }
        out.push(Section::new(&doc.name, self.start_page, self.title, text));
    }
}

/// Segment one document into sections.
///
/// Returns nothing for documents without any text to establish a body style.
pub fn segment_document(doc: &Document) -> Vec<Section> {
    let mut sections = Vec::new();
    let Some(body) = body_style(doc) else {
        log::debug!("{}: no text spans, skipping segmentation", doc.name);
        return sections;
    };
    log::debug!("{}: body style {}", doc.name, body);
    let classifier = BoundaryClassifier::new(body);

    let mut current = OpenSection::introduction(doc);
    for (page_num, page) in doc.pages.iter().enumerate() {
        for block in page.text_blocks() {
            for line in &block.lines {
                if line.spans.is_empty() {
                    continue;
                }
                let text = line.text();
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }

                if classifier.is_boundary(line) {
                    let next = OpenSection {
                        title: text.replace('\n', " ").trim().to_string(),
                        text: String::new(),
                        start_page: page_num as u32 + 1,
                    };
                    std::mem::replace(&mut current, next).close(doc, &mut sections);
                } else {
                    current.text.push_str(text);
                    current.text.push('\n');
                }
            }
        }
    }
    current.close(doc, &mut sections);

    log::debug!("{}: {} sections", doc.name, sections.len());
    sections
}

/// Segment a sequence of documents into one flat section list.
///
/// Each document starts with fresh state; order follows the input.
pub fn segment_documents(docs: &[Document]) -> Vec<Section> {
    docs.iter().flat_map(segment_document).collect()
}
