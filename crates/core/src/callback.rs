//! Callback sinks driven once per generated fragment.

use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

/// A caller-supplied handler for live tokens.
///
/// Invoked synchronously on the task that reads the stream, once per
/// fragment and in arrival order. Implementations must not block for long:
/// the next event is not read until every sink has returned.
pub trait TokenSink: Send + Sync {
    /// Handle a newly generated token.
    fn on_llm_new_token(&self, token: &str, verbose: bool);
}

impl<F> TokenSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_llm_new_token(&self, token: &str, _verbose: bool) {
        self(token)
    }
}

/// Ordered set of sinks.
///
/// The manager only borrows sinks for dispatch; their lifecycle stays with
/// whoever registered them.
#[derive(Clone, Default)]
pub struct CallbackManager {
    sinks: Vec<Arc<dyn TokenSink>>,
}

impl CallbackManager {
    /// Create a manager with no sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink. Sinks are invoked in registration order.
    pub fn add(&mut self, sink: Arc<dyn TokenSink>) {
        self.sinks.push(sink);
    }

    /// Builder-style [`CallbackManager::add`].
    pub fn with(mut self, sink: Arc<dyn TokenSink>) -> Self {
        self.add(sink);
        self
    }

    /// Number of registered sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sink is registered.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Dispatch a token to every sink.
    pub fn on_llm_new_token(&self, token: &str, verbose: bool) {
        for sink in &self.sinks {
            sink.on_llm_new_token(token, verbose);
        }
    }
}

impl fmt::Debug for CallbackManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackManager")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Prints tokens to stdout as they arrive.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl TokenSink for StdoutSink {
    fn on_llm_new_token(&self, token: &str, _verbose: bool) {
        let mut stdout = io::stdout().lock();
        // A closed stdout must not abort generation.
        let _ = stdout.write_all(token.as_bytes());
        let _ = stdout.flush();
    }
}
