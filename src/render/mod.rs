//! Rendering of outlines to JSON and text.

mod json;
mod text;

pub use json::{outline_path, outline_to_json, write_outline, JsonFormat};
pub use text::outline_to_text;
