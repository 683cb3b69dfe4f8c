//! HTTP client for LLM API model servers.
//!
//! [`LlmApi`] implements [`Generate`] against `POST /generate` and, in
//! streaming mode, `POST /agenerate` with a Server-Sent Events response
//! relayed token by token to the attached sinks. [`ApiEmbeddings`]
//! implements [`Embeddings`] against `POST /embeddings`. Both are built on
//! [`HttpTransport`], which wraps a caller-owned `reqwest::Client`.

pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_TIMEOUT};
pub use embeddings::ApiEmbeddings;
pub use lcore::{
    CallbackManager, Embeddings, Error, Generate, ParamValue, Params, Result, StdoutSink,
    TokenSink,
};
pub use llm::LlmApi;
pub use reqwest::{self, Client};
pub use transport::HttpTransport;

mod config;
mod embeddings;
mod llm;
mod transport;
