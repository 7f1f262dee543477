//! Sentence-level excerpt selection.

use std::cmp::Ordering;

use super::embed::{cosine_similarity, embed_checked, Embedder};
use crate::error::Result;

/// Length of the fallback excerpt when no sentence can be split out.
pub const FALLBACK_CHARS: usize = 1000;

/// Split text into sentences on newlines and periods, dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split('\n')
        .flat_map(|line| line.split('.'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Keep the `n` sentences most similar to the query, in document order.
pub fn refine_text(
    text: &str,
    query_embedding: &[f32],
    embedder: &dyn Embedder,
    n: usize,
) -> Result<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        let flat = text.replace('\n', " ");
        return Ok(flat.trim().chars().take(FALLBACK_CHARS).collect());
    }

    let similarities = cosine_similarity(query_embedding, &embed_checked(embedder, &sentences)?);

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| {
        similarities[b]
            .partial_cmp(&similarities[a])
            .unwrap_or(Ordering::Equal)
    });
    let mut chosen: Vec<usize> = order.into_iter().take(n).collect();
    chosen.sort_unstable();

    let excerpt = chosen
        .iter()
        .map(|&i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ");
    Ok(excerpt.replace('\n', " ").trim().to_string())
}
