//! Query synthesis from a persona and a task.

use crate::error::Result;

use super::embed::Embedder;

/// A natural-language relevance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    /// Build the query for a persona role and the task it must accomplish.
    pub fn from_persona(role: &str, task: &str) -> Self {
        Self {
            text: format!(
                "An expert {} needs to accomplish the following task: {}. \
                 To do this, they are looking for the most relevant sections...",
                role.trim(),
                task.trim()
            ),
        }
    }

    /// Use a raw query string as-is.
    pub fn raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Embed the query once for reuse across ranking and refinement.
    pub fn embed(&self, embedder: &dyn Embedder) -> Result<Vec<f32>> {
        embedder.embed_one(&self.text)
    }
}
