//! PDF page provider backed by lopdf.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Encoding, Object, ObjectId};

use super::content::{decode_text_simple, extract_spans, get_number, RawSpan, TextDecoder};
use super::layout::layout_page;
use super::{finish, PageProvider};
use crate::error::{Error, Result};
use crate::model::{Document, Page};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3;

/// US Letter, used when a page has no readable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Parent links followed when looking up inherited page attributes.
const MAX_INHERIT_DEPTH: usize = 16;

/// Validate a PDF header and return its version (e.g. "1.7").
pub fn detect_pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat("missing %PDF- header".to_string()));
    }

    let version =
        String::from_utf8_lossy(&data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN]).to_string();
    let bytes = version.as_bytes();
    if !(bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

fn read_header(path: &Path) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    Ok(header)
}

/// Loads PDF files into the page-description model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfProvider;

impl PdfProvider {
    /// Create a new PDF provider.
    pub fn new() -> Self {
        Self
    }

    /// Load a PDF held in memory under the given document name.
    pub fn load_bytes(&self, name: &str, data: &[u8]) -> Result<Document> {
        detect_pdf_version(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(convert(name, &doc))
    }
}

impl PageProvider for PdfProvider {
    fn load(&self, path: &Path) -> Result<Document> {
        detect_pdf_version(&read_header(path)?)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(convert(&name, &doc))
    }
}

/// Convert a parsed PDF into a model document.
///
/// Pages that fail to decode are logged and kept as empty pages so that page
/// numbering stays aligned with the source file.
fn convert(name: &str, doc: &LopdfDocument) -> Document {
    let mut document = Document::new(name);
    document.title = document_title(doc);

    for (index, (page_num, page_id)) in doc.get_pages().into_iter().enumerate() {
        let index = index as u32;
        let (width, height) = page_dimensions(doc, page_id);
        let page = match page_spans(doc, page_id) {
            Ok(spans) => layout_page(index, width, height, spans),
            Err(e) => {
                log::warn!("{}: skipping content of page {}: {}", name, page_num, e);
                Page::new(index, width, height)
            }
        };
        document.add_page(page);
    }

    log::debug!(
        "{}: loaded {} pages, {} blocks",
        name,
        document.page_count(),
        document.block_count()
    );
    finish(document)
}

/// Title from the document information dictionary.
fn document_title(doc: &LopdfDocument) -> Option<String> {
    let info_ref = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = doc.get_dictionary(info_ref).ok()?;
    get_string_from_dict(info, b"Title")
}

fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Look up a page attribute, following `Parent` links for inherited values.
fn inherited<'a>(doc: &'a LopdfDocument, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_INHERIT_DEPTH {
        if let Ok(value) = dict.get(key) {
            return match value {
                Object::Reference(r) => doc.get_object(*r).ok(),
                other => Some(other),
            };
        }
        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn page_dimensions(doc: &LopdfDocument, page_id: ObjectId) -> (f32, f32) {
    let Some(array) = inherited(doc, page_id, b"MediaBox").and_then(|o| o.as_array().ok()) else {
        return DEFAULT_PAGE_SIZE;
    };
    if array.len() < 4 {
        return DEFAULT_PAGE_SIZE;
    }
    let coord = |i: usize| get_number(&array[i]);
    match (coord(0), coord(1), coord(2), coord(3)) {
        (Some(x0), Some(y0), Some(x1), Some(y1)) => ((x1 - x0).abs(), (y1 - y0).abs()),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Font names and encodings of one page.
struct PageFonts<'a> {
    names: BTreeMap<Vec<u8>, String>,
    encodings: BTreeMap<Vec<u8>, Encoding<'a>>,
}

impl<'a> PageFonts<'a> {
    fn load(doc: &'a LopdfDocument, page_id: ObjectId) -> Result<Self> {
        let fonts = doc.get_page_fonts(page_id)?;
        let mut names = BTreeMap::new();
        let mut encodings = BTreeMap::new();
        for (resource, font) in fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| String::from_utf8_lossy(&resource).to_string());
            if let Ok(encoding) = font.get_font_encoding(doc) {
                encodings.insert(resource.clone(), encoding);
            }
            names.insert(resource, base_font);
        }
        Ok(Self { names, encodings })
    }
}

impl TextDecoder for PageFonts<'_> {
    fn decode(&self, font_resource: &[u8], bytes: &[u8]) -> String {
        self.encodings
            .get(font_resource)
            .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    fn font_name(&self, font_resource: &[u8]) -> String {
        self.names
            .get(font_resource)
            .cloned()
            .unwrap_or_else(|| String::from_utf8_lossy(font_resource).to_string())
    }
}

fn page_spans(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<RawSpan>> {
    let fonts = PageFonts::load(doc, page_id)?;
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;
    Ok(extract_spans(&content.operations, &fonts))
}
