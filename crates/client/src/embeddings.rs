//! Embeddings client for the LLM API server.

use crate::{ClientConfig, HttpTransport};
use lcore::{EmbedRequest, Embeddings, Result};
use reqwest::Client;

const EMBEDDINGS: &str = "embeddings";

/// Embeddings via `POST /embeddings`, one request per text.
#[derive(Clone, Debug)]
pub struct ApiEmbeddings {
    transport: HttpTransport,
}

impl ApiEmbeddings {
    /// Create an embeddings client on top of a caller-owned client.
    pub fn new(client: Client, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: HttpTransport::new(client, &config.host_name),
        })
    }

    /// Create an embeddings client with a client built from the config.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.build_client()?, config)
    }
}

impl Embeddings for ApiEmbeddings {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .transport
            .post_json(EMBEDDINGS, &EmbedRequest { text })
            .await?;
        HttpTransport::decode(response).await
    }

    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_query(text).await?);
        }
        tracing::debug!("embedded {} documents", embeddings.len());
        Ok(embeddings)
    }
}
