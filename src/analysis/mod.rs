//! Structural analysis of page-described documents.
//!
//! This module infers document structure from positioned, styled text:
//!
//! - [`style`]: body text style profiling
//! - [`script`]: CJK vs Latin classification
//! - [`merge`]: reuniting split heading numbers
//! - [`classify`]: heading and section-boundary rules
//! - [`outline`]: heading outline extraction
//! - [`segment`]: titled section segmentation

pub mod classify;
pub mod merge;
pub mod outline;
pub mod script;
pub mod segment;
pub mod style;

pub use classify::{
    numbering_level, BoundaryClassifier, BoundaryDecision, Classification, ClassifyContext,
    HeadingClassifier, StyleLevelMap,
};
pub use merge::merge_split_numbers;
pub use outline::{extract_flyer, extract_outline};
pub use script::{detect_script, Script};
pub use segment::{segment_document, segment_documents};
pub use style::{body_size, body_style, FontStatistics, ProfileMode, StyleKey};
