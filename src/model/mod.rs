//! Document model types.
//!
//! This module defines the page-description representation that providers
//! produce (pages of blocks, lines and spans) together with the structural
//! artifacts derived from it (outlines and sections).

mod document;
mod outline;
mod page;
mod section;

pub use document::Document;
pub use outline::{Heading, HeadingLevel, Outline};
pub use page::{Block, BlockKind, Line, Page, Rect, Span};
pub use section::{RankedSection, Section};
