//! Relevance ranking of sections against a persona's task.

pub mod embed;
pub mod query;
pub mod ranker;
pub mod refine;

pub use embed::{cosine, cosine_similarity, Embedder, HashEmbedder, DEFAULT_DIMENSIONS};
pub use query::Query;
pub use ranker::{job_keywords, rank_sections, ExclusionPolicy};
pub use refine::{refine_text, split_sentences};
