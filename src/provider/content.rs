//! Content stream interpretation: text operators to positioned spans.

use lopdf::content::Operation;
use lopdf::Object;

/// Default text leading when the stream never sets `TL`.
const DEFAULT_LEADING: f32 = 12.0;

/// TJ adjustments beyond this (thousandths of an em) are treated as word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Average glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// A span of text as found in the content stream (PDF coordinates, y up).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpan {
    /// Decoded text
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Estimated advance width
    pub width: f32,
    /// Effective font size
    pub font_size: f32,
    /// Font name (base font, or resource name when unknown)
    pub font: String,
}

impl RawSpan {
    /// Top edge (approximate ascender).
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }

    /// Bottom edge (approximate descender).
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Decodes string operands for a font resource.
pub trait TextDecoder {
    /// Decode bytes shown with the given font resource.
    fn decode(&self, font_resource: &[u8], bytes: &[u8]) -> String;

    /// Display name of a font resource (its base font when known).
    fn font_name(&self, font_resource: &[u8]) -> String {
        String::from_utf8_lossy(font_resource).to_string()
    }
}

/// Decoder that ignores fonts and uses [`decode_text_simple`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleDecoder;

impl TextDecoder for SimpleDecoder {
    fn decode(&self, _font_resource: &[u8], bytes: &[u8]) -> String {
        decode_text_simple(bytes)
    }
}

/// Decode bytes as UTF-16BE (with BOM), UTF-8 or Latin-1, in that order.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Check if a character belongs to a script written without word spaces.
pub fn is_spaceless_script_char(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |
        '\u{3400}'..='\u{4DBF}' |
        '\u{20000}'..='\u{2EBEF}' |
        '\u{3040}'..='\u{309F}' |
        '\u{30A0}'..='\u{30FF}' |
        '\u{3000}'..='\u{303F}'
    )
}

/// Text matrix and line state.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    // start of the current line
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
            leading: DEFAULT_LEADING,
        }
    }
}

impl TextMatrix {
    fn begin(&mut self) {
        let leading = self.leading;
        *self = Self {
            leading,
            ..Self::default()
        };
    }

    fn set(&mut self, m: [f32; 6]) {
        let [a, b, c, d, e, f] = m;
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.line_e = e;
        self.line_f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn advance(&mut self, width: f32) {
        self.e += width;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Numeric value of an operand.
pub fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Interpret the text operators of a content stream.
///
/// Handles `BT`, `ET`, `Tf`, `TL`, `Td`, `TD`, `Tm`, `T*`, `Tj`, `TJ`, `'`
/// and `"`. Whitespace-only strings produce no span.
pub fn extract_spans(operations: &[Operation], decoder: &dyn TextDecoder) -> Vec<RawSpan> {
    let mut spans = Vec::new();
    let mut matrix = TextMatrix::default();
    let mut in_text = false;
    let mut font_resource: Vec<u8> = Vec::new();
    let mut font_name = String::new();
    let mut font_size: f32 = 12.0;

    for op in operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                matrix.begin();
            }
            "ET" => in_text = false,
            "Tf" => {
                if let (Some(Object::Name(name)), Some(size)) = (operands.first(), operands.get(1)) {
                    font_resource = name.clone();
                    font_name = decoder.font_name(name);
                    font_size = get_number(size).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(tl) = operands.first().and_then(get_number) {
                    matrix.leading = tl;
                }
            }
            "Td" | "TD" => {
                if operands.len() >= 2 {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let mut m = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                    for (slot, obj) in m.iter_mut().zip(operands.iter()) {
                        if let Some(v) = get_number(obj) {
                            *slot = v;
                        }
                    }
                    matrix.set(m);
                }
            }
            "T*" => matrix.next_line(),
            "Tj" | "TJ" | "'" | "\"" => {
                if matches!(op.operator.as_str(), "'" | "\"") {
                    matrix.next_line();
                }
                if !in_text {
                    continue;
                }
                let text = match op.operator.as_str() {
                    "TJ" => match operands.first() {
                        Some(Object::Array(items)) => show_array(items, &font_resource, decoder),
                        _ => String::new(),
                    },
                    "\"" => show_string(operands.get(2), &font_resource, decoder),
                    _ => show_string(operands.first(), &font_resource, decoder),
                };

                let size = font_size * matrix.scale();
                let width = text.chars().count() as f32 * size * AVG_GLYPH_WIDTH;
                if !text.trim().is_empty() {
                    let (x, y) = matrix.position();
                    spans.push(RawSpan {
                        text,
                        x,
                        y,
                        width,
                        font_size: size,
                        font: font_name.clone(),
                    });
                }
                matrix.advance(width);
            }
            _ => {}
        }
    }

    spans
}

fn show_string(obj: Option<&Object>, font: &[u8], decoder: &dyn TextDecoder) -> String {
    match obj {
        Some(Object::String(bytes, _)) => decoder.decode(font, bytes),
        _ => String::new(),
    }
}

fn show_array(items: &[Object], font: &[u8], decoder: &dyn TextDecoder) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decoder.decode(font, bytes)),
            other => {
                let Some(adjustment) = get_number(other).map(|n| -n) else {
                    continue;
                };
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.ends_with(' ')
                    && !combined.ends_with('\u{00A0}')
                {
                    if let Some(last) = combined.chars().last() {
                        if !is_spaceless_script_char(last) {
                            combined.push(' ');
                        }
                    }
                }
            }
        }
    }
    combined
}
