//! Client configuration.
//!
//! Mirrors the parameter object the orchestrator hands to the adapter: host
//! name, model parameters, timeouts and the streaming/verbose flags.

use lcore::{Error, Params, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model server address.
pub const DEFAULT_HOST: &str = "http://localhost:8000";

/// Default per-read timeout, in seconds.
pub const DEFAULT_TIMEOUT: f64 = 600.0;

/// Configuration shared by [`crate::LlmApi`] and [`crate::ApiEmbeddings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the model server.
    pub host_name: String,

    /// Timeout in seconds for connecting and for every read. `None` waits
    /// forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<f64>,

    /// Connect timeout in seconds. `None` falls back to `request_timeout`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<f64>,

    /// Stream tokens through `/agenerate` and the attached sinks.
    pub streaming: bool,

    /// Forwarded to sinks with every token.
    pub verbose: bool,

    /// Model parameters sent with every generation request.
    pub params: Params,
}

impl ClientConfig {
    /// Create a configuration for the given host with defaults elsewhere.
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            ..Default::default()
        }
    }

    /// Check the host name and timeouts.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.host_name)
            .map_err(|e| Error::Config(format!("invalid host_name {}: {e}", self.host_name)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "host_name must be http or https, got {}",
                url.scheme()
            )));
        }

        for (name, secs) in [
            ("request_timeout", self.request_timeout),
            ("connect_timeout", self.connect_timeout),
        ] {
            if let Some(secs) = secs
                && !(secs.is_finite() && secs > 0.0)
            {
                return Err(Error::Config(format!(
                    "{name} must be a positive number of seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// Timeout applied while connecting, in seconds.
    pub fn effective_connect_timeout(&self) -> Option<f64> {
        self.connect_timeout.or(self.request_timeout)
    }

    /// Build a `reqwest::Client` honouring the configured timeouts.
    ///
    /// `request_timeout` bounds each read rather than the whole response, so
    /// a long stream is not cut off while tokens keep arriving.
    pub fn build_client(&self) -> Result<Client> {
        self.validate()?;
        let mut builder = Client::builder();
        if let Some(secs) = self.request_timeout {
            builder = builder.read_timeout(Duration::from_secs_f64(secs));
        }
        if let Some(secs) = self.effective_connect_timeout() {
            builder = builder.connect_timeout(Duration::from_secs_f64(secs));
        }
        builder.build().map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_name: DEFAULT_HOST.to_owned(),
            request_timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: None,
            streaming: false,
            verbose: false,
            params: Params::new(),
        }
    }
}
