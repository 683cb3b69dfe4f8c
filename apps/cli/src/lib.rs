//! llmapi CLI: generate text and embeddings against an LLM API server.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    cmd::{EmbedCmd, GenerateCmd},
    config::Config,
};

pub mod cmd;
pub mod config;

/// LLM API command-line client
#[derive(Debug, Parser)]
#[command(name = "llmapi", version, about)]
pub struct App {
    /// Path to the config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model server address, overrides the config
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a completion for a prompt
    Generate(GenerateCmd),

    /// Embed one or more texts
    Embed(EmbedCmd),

    /// Write the default configuration file
    Init,
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "warn",
                1 => "llmapi_core=debug,llmapi_client=debug",
                2 => "llmapi_core=trace,llmapi_client=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Run the selected command
    pub async fn run(self) -> Result<()> {
        match &self.command {
            Command::Init => {
                let path = self.config.clone().unwrap_or_else(config::global_config_path);
                Config::write_default(&path)?;
                println!("wrote {}", path.display());
            }
            Command::Generate(cmd) => cmd.run(self.client_config()?).await?,
            Command::Embed(cmd) => cmd.run(self.client_config()?).await?,
        }
        Ok(())
    }

    /// Resolve the client config and apply command-line overrides.
    pub fn client_config(&self) -> Result<client::ClientConfig> {
        let mut config = Config::resolve(self.config.as_deref())?.client;
        if let Some(host) = &self.host {
            config.host_name = host.clone();
        }
        Ok(config)
    }
}
