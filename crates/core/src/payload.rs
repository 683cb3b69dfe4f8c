//! Wire payloads of the model server.

use crate::Params;
use serde::{Deserialize, Serialize};

/// Body of `POST /generate` and `POST /agenerate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    /// The literal prompt text.
    pub prompt: &'a str,

    /// Model parameters.
    pub params: &'a Params,
}

/// Non-streaming generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// The full generated text.
    pub content: String,
}

/// Data of a single stream event.
#[derive(Debug, Clone, Deserialize)]
pub struct Fragment {
    /// The text fragment (a token or part of one).
    pub content: String,
}

/// Body of `POST /embeddings`.
#[derive(Debug, Serialize)]
pub struct EmbedRequest<'a> {
    /// The text to embed.
    pub text: &'a str,
}
