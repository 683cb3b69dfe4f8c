//! Generation adapter for the LLM API server.

use crate::{ClientConfig, HttpTransport};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use lcore::{
    CallbackManager, Error, Generate, GenerateRequest, GenerateResponse, Params, Result, events,
    fragments, relay,
};
use reqwest::Client;
use serde_json::{Map, Value};

const GENERATE: &str = "generate";
const STREAM: &str = "agenerate";
const LLM_TYPE: &str = "llm-api";

/// Text generation against a remote LLM API server.
///
/// ```no_run
/// use llmapi_client::{ClientConfig, Generate, LlmApi, Params};
///
/// # async fn run() -> llmapi_client::Result<()> {
/// let config = ClientConfig::new("http://localhost:8000");
/// let llm = LlmApi::from_config(config)?;
/// let params = Params::new().with("n_predict", 300)?.with("temp", 0.2)?;
/// let text = llm.generate("This is a prompt.", &params).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LlmApi {
    transport: HttpTransport,
    config: ClientConfig,
    callbacks: CallbackManager,
}

impl LlmApi {
    /// Create an adapter on top of a caller-owned client.
    pub fn new(client: Client, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: HttpTransport::new(client, &config.host_name),
            config,
            callbacks: CallbackManager::new(),
        })
    }

    /// Create an adapter with a client built from the config's timeouts.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let client = config.build_client()?;
        Self::new(client, config)
    }

    /// Attach the sinks that receive tokens in streaming mode.
    pub fn with_callbacks(mut self, callbacks: CallbackManager) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// The attached sinks.
    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    /// The adapter's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate with the orchestrator's `(prompt, stop)` call shape.
    pub async fn generate_with_stop(&self, prompt: &str, stop: &[String]) -> Result<String> {
        let params = Params::new().with("stop", stop.to_vec())?;
        self.generate(prompt, &params).await
    }

    /// Stream raw fragments from `/agenerate` without touching the sinks.
    ///
    /// Ends after the sentinel event or a clean end of the body.
    pub fn stream(
        &self,
        prompt: &str,
        params: &Params,
    ) -> impl Stream<Item = Result<String>> + Send {
        let this = self.clone();
        let prompt = prompt.to_owned();
        let params = params.clone();
        try_stream! {
            let params = this.request_params(&params)?;
            let body = GenerateRequest { prompt: &prompt, params: &params };
            let response = this.transport.post_sse(STREAM, &body).await?;
            let mut stream = std::pin::pin!(fragments(events(response.bytes_stream())));
            while let Some(fragment) = stream.next().await {
                yield fragment?;
            }
        }
    }

    /// Blocking [`Generate::generate`] for synchronous callers.
    ///
    /// Runs the call on a fresh current-thread runtime. Fails with
    /// [`Error::Config`] when called from within a tokio runtime; async
    /// callers use [`Generate::generate`] instead.
    pub fn generate_blocking(&self, prompt: &str, params: &Params) -> Result<String> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(Error::Config(
                "generate_blocking called from within an async runtime".into(),
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Connection(format!("failed to start runtime: {e}")))?;
        runtime.block_on(self.generate(prompt, params))
    }

    /// Parameters that identify this model: the host plus the model params.
    pub fn identifying_params(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        map.insert(
            "host_name".to_owned(),
            Value::String(self.config.host_name.clone()),
        );
        for (key, value) in self.config.params.iter() {
            map.insert(key.to_owned(), serde_json::to_value(value)?);
        }
        Ok(map)
    }

    /// Model type name reported to the orchestrator.
    pub fn llm_type(&self) -> &'static str {
        LLM_TYPE
    }

    /// Configured params overlaid with the call's, always carrying `stop`.
    fn request_params(&self, params: &Params) -> Result<Params> {
        let mut merged = self.config.params.merged(params);
        if !merged.contains("stop") {
            merged.insert("stop", Vec::<String>::new())?;
        }
        Ok(merged)
    }

    async fn complete(&self, prompt: &str, params: &Params) -> Result<String> {
        let body = GenerateRequest { prompt, params };
        let response = self.transport.post_json(GENERATE, &body).await?;
        let response: GenerateResponse = HttpTransport::decode(response).await?;
        Ok(response.content)
    }

    async fn complete_streaming(&self, prompt: &str, params: &Params) -> Result<String> {
        let body = GenerateRequest { prompt, params };
        let response = self.transport.post_sse(STREAM, &body).await?;
        relay(
            response.bytes_stream(),
            &self.callbacks,
            self.config.streaming,
            self.config.verbose,
        )
        .await
    }
}

impl Generate for LlmApi {
    async fn generate(&self, prompt: &str, params: &Params) -> Result<String> {
        let params = self.request_params(params)?;
        if self.config.streaming {
            tracing::debug!("streaming generation to {} sinks", self.callbacks.len());
            self.complete_streaming(prompt, &params).await
        } else {
            self.complete(prompt, &params).await
        }
    }
}
