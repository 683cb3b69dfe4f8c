//! Streaming response relay.
//!
//! Bridges an event-stream body to the attached sinks and to a single
//! accumulated completion. Each event is decoded, dispatched and appended
//! before the next one is read.

use crate::{CallbackManager, Fragment, Result, SseEvent, events};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use std::fmt::Display;

/// Data payload of the end-of-stream sentinel event.
pub const DONE: &str = "[DONE]";

/// Decode events into text fragments, stopping at the [`DONE`] sentinel.
///
/// Malformed event JSON ends the stream with [`crate::Error::Decode`]. If the
/// underlying stream ends cleanly without a sentinel, the fragments seen so
/// far stand as the complete output.
pub fn fragments<S>(events: S) -> impl Stream<Item = Result<String>>
where
    S: Stream<Item = Result<SseEvent>>,
{
    try_stream! {
        let mut events = std::pin::pin!(events);
        let mut finished = false;
        while let Some(event) = events.next().await {
            let event = event?;
            if event.data.trim() == DONE {
                finished = true;
                break;
            }
            let fragment: Fragment = serde_json::from_str(&event.data)?;
            yield fragment.content;
        }
        if !finished {
            tracing::warn!("event stream closed without the {DONE} sentinel");
        }
    }
}

/// Consume an event-stream body and return the full completion.
///
/// When `streaming` is set and at least one sink is registered, every
/// fragment is handed to the sinks in registration order before it is
/// appended. The returned text is always the complete concatenation; on
/// any error nothing partial is returned.
pub async fn relay<S, B, E>(
    bytes: S,
    callbacks: &CallbackManager,
    streaming: bool,
    verbose: bool,
) -> Result<String>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let dispatch = streaming && !callbacks.is_empty();
    let mut fragments = std::pin::pin!(fragments(events(bytes)));
    let mut completion = String::new();
    let mut count = 0usize;
    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;
        if dispatch {
            callbacks.on_llm_new_token(&fragment, verbose);
        }
        completion.push_str(&fragment);
        count += 1;
    }

    tracing::debug!(
        "relay finished: {count} fragments, {} bytes",
        completion.len()
    );
    Ok(completion)
}
