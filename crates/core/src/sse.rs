//! Incremental Server-Sent Events decoding.
//!
//! Network chunks do not line up with event boundaries, so bytes are
//! buffered until a blank line closes an event block. Buffering raw bytes
//! (rather than lossily decoding each chunk) keeps multi-byte characters
//! intact when they straddle two chunks.

use crate::{Error, Result};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use std::fmt::Display;

/// A decoded server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// The `event:` field, if any.
    pub event: Option<String>,
    /// All `data:` lines joined with `\n`.
    pub data: String,
    /// The `id:` field, if any.
    pub id: Option<String>,
}

/// Largest pending event the decoder will buffer, in bytes.
pub const MAX_EVENT_SIZE: usize = 8 * 1024 * 1024;

/// Buffers bytes and yields complete events.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    /// Start of the line being scanned.
    line: usize,
    /// Next byte to scan.
    pos: usize,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes read from the network.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Take the next complete event out of the buffer.
    ///
    /// Blocks without a `data` field (comments, keep-alives, bare `retry`)
    /// are consumed and skipped. Returns `None` once no complete block is
    /// buffered, or [`Error::Decode`] if the pending block outgrows
    /// [`MAX_EVENT_SIZE`].
    pub fn next_event(&mut self) -> Option<Result<SseEvent>> {
        while let Some((end, next)) = self.find_boundary() {
            let block: Vec<u8> = self.buf.drain(..next).take(end).collect();
            self.line = 0;
            self.pos = 0;
            match parse_block(&block) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }

        if self.buf.len() > MAX_EVENT_SIZE {
            let size = self.buf.len();
            self.reset();
            return Some(Err(Error::Decode(format!(
                "pending event of {size} bytes exceeds {MAX_EVENT_SIZE}"
            ))));
        }
        None
    }

    /// Flush a trailing block that was never closed by a blank line.
    ///
    /// Called once the byte stream has ended.
    pub fn finish(&mut self) -> Option<Result<SseEvent>> {
        let block = std::mem::take(&mut self.buf);
        self.reset();
        parse_block(&block).transpose()
    }

    /// Whether undecoded bytes remain.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.line = 0;
        self.pos = 0;
    }

    /// Find the first blank line, resuming where the last scan stopped.
    ///
    /// Lines end with `\n`, `\r\n` or a bare `\r`. Returns `(end, next)`:
    /// the block is `buf[..end]` and the following block starts at `next`.
    /// A `\r` at the end of the buffer is left for the next chunk since it
    /// may be the first half of `\r\n`.
    fn find_boundary(&mut self) -> Option<(usize, usize)> {
        while self.pos < self.buf.len() {
            let next = match self.buf[self.pos] {
                b'\n' => self.pos + 1,
                b'\r' => match self.buf.get(self.pos + 1) {
                    Some(b'\n') => self.pos + 2,
                    Some(_) => self.pos + 1,
                    None => return None,
                },
                _ => {
                    self.pos += 1;
                    continue;
                }
            };
            if self.pos == self.line {
                return Some((self.line, next));
            }
            self.line = next;
            self.pos = next;
        }
        None
    }
}

/// Decode a byte stream into a stream of events.
///
/// A transport error ends the stream with [`Error::Connection`]; a clean end
/// of the byte stream flushes any unterminated trailing block.
pub fn events<S, B, E>(bytes: S) -> impl Stream<Item = Result<SseEvent>>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    try_stream! {
        let mut bytes = std::pin::pin!(bytes);
        let mut decoder = SseDecoder::new();
        while let Some(next) = bytes.next().await {
            let chunk = next.map_err(|e| Error::Connection(e.to_string()))?;
            tracing::trace!("chunk: {}", String::from_utf8_lossy(chunk.as_ref()));
            decoder.push(chunk.as_ref());
            while let Some(event) = decoder.next_event() {
                yield event?;
            }
        }
        if let Some(event) = decoder.finish() {
            yield event?;
        }
    }
}

/// Parse one event block. `Ok(None)` if the block carries no data.
fn parse_block(block: &[u8]) -> Result<Option<SseEvent>> {
    let text = std::str::from_utf8(block)
        .map_err(|e| Error::Decode(format!("event is not valid utf-8: {e}")))?;

    let mut event = SseEvent::default();
    let mut data: Option<String> = None;
    for line in text.split(['\r', '\n']) {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => event.event = Some(value.to_owned()),
            "data" => match data.as_mut() {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => data = Some(value.to_owned()),
            },
            "id" => event.id = Some(value.to_owned()),
            "retry" => {
                if value.parse::<u64>().is_err() {
                    tracing::debug!("ignoring malformed retry field: {value}");
                }
            }
            other => tracing::debug!("ignoring unknown sse field: {other}"),
        }
    }

    Ok(data.map(|data| SseEvent { data, ..event }))
}
