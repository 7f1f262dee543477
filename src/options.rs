//! Extraction and ranking options.

use crate::analysis::StyleLevelMap;
use crate::rank::ExclusionPolicy;

/// Which heading classifier runs over multi-page documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingPolicy {
    /// Size must exceed the body size; language-aware length cap
    #[default]
    Strict,
    /// Bold, larger or uppercase text is accepted; levels may come from a style map
    Relaxed,
}

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Heading classifier for multi-page documents
    pub policy: HeadingPolicy,

    /// Explicit (size, font) to level mapping for the relaxed policy.
    /// When `None`, the mapping is observed from the document itself.
    pub style_levels: Option<StyleLevelMap>,

    /// Reunite heading numbers split into their own block
    pub merge_split_numbers: bool,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the strict heading classifier.
    pub fn strict(mut self) -> Self {
        self.policy = HeadingPolicy::Strict;
        self
    }

    /// Use the relaxed heading classifier.
    pub fn relaxed(mut self) -> Self {
        self.policy = HeadingPolicy::Relaxed;
        self
    }

    /// Set an explicit style to level mapping.
    pub fn with_style_levels(mut self, map: StyleLevelMap) -> Self {
        self.style_levels = Some(map);
        self
    }

    /// Disable the block merger pre-pass.
    pub fn without_merge(mut self) -> Self {
        self.merge_split_numbers = false;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            policy: HeadingPolicy::Strict,
            style_levels: None,
            merge_split_numbers: true,
        }
    }
}

/// Options for section ranking and refinement.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Weight of the body-text similarity
    pub content_weight: f32,

    /// Weight of the title similarity
    pub title_weight: f32,

    /// Bonus added when a job keyword occurs in the document name
    pub filename_boost: f32,

    /// Number of ranked sections reported
    pub top_sections: usize,

    /// Number of sections refined into excerpts
    pub top_refined: usize,

    /// Sentences kept per refined excerpt
    pub sentences_per_excerpt: usize,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Explicit exclusion policy. When `None`, it is derived from the job text.
    pub exclusions: Option<ExclusionPolicy>,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set content and title weights.
    pub fn with_weights(mut self, content: f32, title: f32) -> Self {
        self.content_weight = content;
        self.title_weight = title;
        self
    }

    /// Set the filename keyword boost.
    pub fn with_filename_boost(mut self, boost: f32) -> Self {
        self.filename_boost = boost;
        self
    }

    /// Set the number of reported sections.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Set the number of refined excerpts.
    pub fn with_top_refined(mut self, n: usize) -> Self {
        self.top_refined = n;
        self
    }

    /// Set the number of sentences per excerpt.
    pub fn with_sentences_per_excerpt(mut self, n: usize) -> Self {
        self.sentences_per_excerpt = n;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Use an explicit exclusion policy instead of deriving one from the job.
    pub fn with_exclusions(mut self, policy: ExclusionPolicy) -> Self {
        self.exclusions = Some(policy);
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            content_weight: 0.75,
            title_weight: 0.25,
            filename_boost: 0.1,
            top_sections: 20,
            top_refined: 5,
            sentences_per_excerpt: 5,
            parallel: true,
            exclusions: None,
        }
    }
}
