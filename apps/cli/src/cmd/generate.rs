//! Generate command

use super::parse_param;
use anyhow::Result;
use clap::Args;
use client::{CallbackManager, ClientConfig, Generate, LlmApi, ParamValue, Params, StdoutSink};
use std::sync::Arc;

/// Generate command arguments
#[derive(Debug, Args)]
pub struct GenerateCmd {
    /// The prompt to send
    pub prompt: String,

    /// Print tokens as they arrive
    #[arg(short, long)]
    pub stream: bool,

    /// Model parameter as key=value, repeatable
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,

    /// Stop sequence, repeatable
    #[arg(long)]
    pub stop: Vec<String>,
}

impl GenerateCmd {
    /// Build the per-call parameters from the command line.
    pub fn params(&self) -> Result<Params> {
        let mut params = Params::new();
        for (key, value) in &self.params {
            params.insert(key, value.clone())?;
        }
        if !self.stop.is_empty() {
            params.insert("stop", self.stop.clone())?;
        }
        Ok(params)
    }

    /// Run the generate command
    pub async fn run(&self, mut config: ClientConfig) -> Result<()> {
        config.streaming |= self.stream;
        let streaming = config.streaming;

        let mut llm = LlmApi::from_config(config)?;
        if streaming {
            llm = llm.with_callbacks(CallbackManager::new().with(Arc::new(StdoutSink)));
        }

        let text = llm.generate(&self.prompt, &self.params()?).await?;
        if streaming {
            println!();
        } else {
            println!("{text}");
        }
        Ok(())
    }
}
