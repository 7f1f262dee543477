//! Blended relevance ranking with keyword exclusion.

use super::embed::{cosine_similarity, embed_checked, Embedder};
use crate::error::Result;
use crate::model::{RankedSection, Section};
use crate::options::RankOptions;

/// Terms excluded for vegetarian or vegan jobs.
pub const MEAT_KEYWORDS: &[&str] = &[
    "beef", "chicken", "turkey", "pork", "fish", "lamb", "sausage", "bacon", "tuna", "salmon",
    "ham", "shrimp", "crab", "lobster", "meatball", "mince",
];

/// Terms excluded for gluten-free jobs.
pub const GLUTEN_KEYWORDS: &[&str] = &[
    "wheat", "flour", "bread", "pasta", "noodle", "barley", "rye", "couscous", "semolina",
    "tortilla", "croutons",
];

/// Sections mentioning any of these keywords are dropped from the ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    keywords: Vec<String>,
}

impl ExclusionPolicy {
    /// A policy that keeps everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Derive the dietary exclusions a job description asks for.
    pub fn from_job(job: &str) -> Self {
        let job = job.to_lowercase();
        let mut policy = Self::none();
        if job.contains("vegetarian") || job.contains("vegan") {
            log::info!("applying vegetarian exclusion filter");
            policy = policy.with_keywords(MEAT_KEYWORDS.iter().copied());
        }
        if job.contains("gluten-free") {
            log::info!("applying gluten-free exclusion filter");
            policy = policy.with_keywords(GLUTEN_KEYWORDS.iter().copied());
        }
        policy
    }

    /// Add keywords (matched lowercase).
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords
            .extend(keywords.into_iter().map(|k| k.as_ref().to_lowercase()));
        self
    }

    /// Excluded keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Check if the policy excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Check if a section mentions an excluded keyword in its title or body.
    pub fn excludes(&self, section: &Section) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let haystack = section.searchable_text();
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

/// Lowercase whitespace-separated keywords of a job description.
pub fn job_keywords(job: &str) -> Vec<String> {
    job.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Rank sections against an embedded query.
///
/// Bodies and titles are embedded in two separate batches. The blended score
/// is `content_weight * content + title_weight * title + boost`, where the
/// boost applies when a job keyword occurs in the document name. Sorting is
/// stable, exclusions are applied after sorting and ranks start at 1.
pub fn rank_sections(
    sections: Vec<Section>,
    query_embedding: &[f32],
    job: &str,
    embedder: &dyn Embedder,
    options: &RankOptions,
) -> Result<Vec<RankedSection>> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let bodies: Vec<&str> = sections.iter().map(|s| s.text.as_str()).collect();
    let titles: Vec<&str> = sections.iter().map(|s| s.section_title.as_str()).collect();
    let content = cosine_similarity(query_embedding, &embed_checked(embedder, &bodies)?);
    let title = cosine_similarity(query_embedding, &embed_checked(embedder, &titles)?);

    let keywords = job_keywords(job);
    let mut scored: Vec<(Section, f32)> = sections
        .into_iter()
        .enumerate()
        .map(|(i, section)| {
            let name = section.document.to_lowercase();
            let boost = if keywords.iter().any(|k| name.contains(k.as_str())) {
                options.filename_boost
            } else {
                0.0
            };
            let score = options.content_weight * content[i] + options.title_weight * title[i] + boost;
            (section, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let derived;
    let policy = match &options.exclusions {
        Some(policy) => policy,
        None => {
            derived = ExclusionPolicy::from_job(job);
            &derived
        }
    };

    let total = scored.len();
    let ranked: Vec<RankedSection> = scored
        .into_iter()
        .filter(|(section, _)| !policy.excludes(section))
        .enumerate()
        .map(|(i, (section, score))| RankedSection {
            section,
            score,
            importance_rank: i + 1,
        })
        .collect();

    log::debug!("ranked {} sections, {} excluded", ranked.len(), total - ranked.len());
    Ok(ranked)
}
