//! Core abstractions for the LLM API client.
//!
//! Provides the transport-agnostic pieces shared by every caller: the
//! parameter mapping sent to the model server, the wire payloads, the
//! [`Error`] kinds, callback sinks, the incremental SSE decoder and the
//! streaming relay that turns an event stream into a final completion.

pub use callback::{CallbackManager, StdoutSink, TokenSink};
pub use error::{Error, Result};
pub use params::{ParamValue, Params};
pub use payload::{EmbedRequest, Fragment, GenerateRequest, GenerateResponse};
pub use relay::{DONE, fragments, relay};
pub use sse::{MAX_EVENT_SIZE, SseDecoder, SseEvent, events};
pub use traits::{Embeddings, Generate};

mod callback;
mod error;
mod params;
mod payload;
mod relay;
mod sse;
mod traits;
