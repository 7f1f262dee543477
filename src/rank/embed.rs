//! Text embedding behind a trait, with a deterministic hashing model.

use lazy_static::lazy_static;
use md5::{Digest, Md5};
use rayon::prelude::*;
use regex::Regex;

use crate::error::{Error, Result};

/// Default embedding dimensionality.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Weight of character trigram features relative to whole words.
const TRIGRAM_WEIGHT: f32 = 0.5;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
}

/// A text embedding model.
///
/// Implementations must return exactly one vector per input text, all of
/// length [`Embedder::dimensions`]. The model is shared read-only across the
/// pipeline.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Length of every returned vector.
    fn dimensions(&self) -> usize;

    /// Embed a single text.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text])?
            .pop()
            .ok_or_else(|| Error::Embedding("embedder returned no vector".to_string()))
    }
}

/// Feature-hashing embedder over words and character trigrams.
///
/// Each lowercase `\w+` token and each of its character trigrams is hashed
/// with MD5 into a signed bucket; the resulting vector is L2-normalized.
/// Output is identical across runs and platforms.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
    parallel: bool,
}

impl HashEmbedder {
    /// Create an embedder with the given number of dimensions (minimum 1).
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            parallel: true,
        }
    }

    /// Enable or disable rayon for batches.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether batches are embedded with rayon.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Md5::digest(feature.as_bytes());
        let mut bucket = [0u8; 8];
        bucket.copy_from_slice(&digest[..8]);
        let index = (u64::from_le_bytes(bucket) % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }

    /// Embed one text.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lower = text.to_lowercase();

        for token in WORD.find_iter(&lower).map(|m| m.as_str()) {
            self.add_feature(&mut vector, token, 1.0);

            let chars: Vec<char> = token.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                self.add_feature(&mut vector, &format!("#{}", trigram), TRIGRAM_WEIGHT);
            }
        }

        normalize(&mut vector);
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let vectors = if self.parallel {
            texts.par_iter().map(|t| self.embed_text(t)).collect()
        } else {
            texts.iter().map(|t| self.embed_text(t)).collect()
        };
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
}

/// Cosine similarity of two vectors; 0 if either has zero norm.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Cosine similarity of `query` against each candidate.
pub fn cosine_similarity(query: &[f32], candidates: &[Vec<f32>]) -> Vec<f32> {
    candidates.iter().map(|c| cosine(query, c)).collect()
}

/// Embed a batch and verify one vector of the declared width came back per text.
pub fn embed_checked(embedder: &dyn Embedder, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
    let vectors = embedder.embed(texts)?;
    if vectors.len() != texts.len() {
        return Err(Error::Embedding(format!(
            "expected {} vectors, got {}",
            texts.len(),
            vectors.len()
        )));
    }
    let dimensions = embedder.dimensions();
    if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dimensions) {
        return Err(Error::Embedding(format!(
            "vector {} has {} dimensions, expected {}",
            i,
            v.len(),
            dimensions
        )));
    }
    Ok(vectors)
}
