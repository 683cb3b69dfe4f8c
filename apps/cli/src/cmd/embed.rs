//! Embed command

use anyhow::Result;
use clap::Args;
use client::{ApiEmbeddings, ClientConfig, Embeddings};

/// Embed command arguments
#[derive(Debug, Args)]
pub struct EmbedCmd {
    /// Texts to embed; one vector is printed per text
    #[arg(required = true)]
    pub texts: Vec<String>,
}

impl EmbedCmd {
    /// Run the embed command
    pub async fn run(&self, config: ClientConfig) -> Result<()> {
        let embeddings = ApiEmbeddings::from_config(&config)?;
        let vectors = if let [text] = self.texts.as_slice() {
            vec![embeddings.embed_query(text).await?]
        } else {
            embeddings.embed_documents(&self.texts).await?
        };

        for vector in vectors {
            println!("{}", serde_json::to_string(&vector)?);
        }
        Ok(())
    }
}
