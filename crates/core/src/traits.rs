//! Extension points implemented by concrete adapters.
//!
//! Uses RPITIT for async without boxing.

use crate::{Params, Result};
use std::future::Future;

/// Text generation.
pub trait Generate {
    /// Generate a completion for `prompt` with per-call `params`.
    fn generate(&self, prompt: &str, params: &Params)
    -> impl Future<Output = Result<String>> + Send;
}

/// Converts text into dense vector embeddings.
pub trait Embeddings {
    /// Embed a single query text.
    fn embed_query(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;

    /// Embed a batch of documents, one vector per text, in input order.
    fn embed_documents(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>>> + Send;
}
