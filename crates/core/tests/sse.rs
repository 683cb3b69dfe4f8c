//! Tests for the incremental SSE decoder.

use futures_util::{StreamExt, stream};
use llmapi_core::{Error, MAX_EVENT_SIZE, SseDecoder, SseEvent, events};
use std::io;

fn data(data: &str) -> SseEvent {
    SseEvent {
        data: data.into(),
        ..Default::default()
    }
}

#[test]
fn decodes_several_events_from_one_chunk() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: one\n\ndata: two\n\n");
    assert_eq!(decoder.next_event().unwrap().unwrap(), data("one"));
    assert_eq!(decoder.next_event().unwrap().unwrap(), data("two"));
    assert!(decoder.next_event().is_none());
    assert!(decoder.is_empty());
}

#[test]
fn waits_for_the_blank_line() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: par");
    assert!(decoder.next_event().is_none());
    decoder.push(b"tial\n");
    assert!(decoder.next_event().is_none());
    decoder.push(b"\n");
    assert_eq!(decoder.next_event().unwrap().unwrap(), data("partial"));
}

#[test]
fn accepts_crlf_line_endings() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"event: token\r\ndata: hi\r\n\r\n");
    let event = decoder.next_event().unwrap().unwrap();
    assert_eq!(event.event.as_deref(), Some("token"));
    assert_eq!(event.data, "hi");
}

#[test]
fn accepts_bare_cr_line_endings() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: a\r\rdata: b\r\r");
    assert_eq!(decoder.next_event().unwrap().unwrap(), data("a"));
    // the trailing `\r` could still be half of `\r\n`
    assert!(decoder.next_event().is_none());
    assert_eq!(decoder.finish().unwrap().unwrap(), data("b"));
}

#[test]
fn crlf_split_across_chunks() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: a\r");
    assert!(decoder.next_event().is_none());
    decoder.push(b"\ndata: b\r");
    assert!(decoder.next_event().is_none());
    decoder.push(b"\n\r\n");
    assert_eq!(decoder.next_event().unwrap().unwrap().data, "a\nb");
    assert!(decoder.is_empty());
}

#[test]
fn large_event_in_small_chunks() {
    let payload = "x".repeat(64 * 1024);
    let bytes = format!("data: {payload}\n\n");
    let mut decoder = SseDecoder::new();
    let mut decoded = Vec::new();
    for chunk in bytes.as_bytes().chunks(7) {
        decoder.push(chunk);
        while let Some(event) = decoder.next_event() {
            decoded.push(event.unwrap());
        }
    }
    assert_eq!(decoded, vec![data(&payload)]);
}

#[test]
fn oversized_event_is_a_decode_error() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: ");
    decoder.push(&vec![b'x'; MAX_EVENT_SIZE]);
    assert!(matches!(decoder.next_event(), Some(Err(Error::Decode(_)))));
    assert!(decoder.is_empty());
}

#[test]
fn joins_multiple_data_lines() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: first\ndata: second\n\n");
    assert_eq!(decoder.next_event().unwrap().unwrap().data, "first\nsecond");
}

#[test]
fn reads_event_and_id_fields() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"id: 7\nevent: message\ndata:{\"content\":\"x\"}\n\n");
    let event = decoder.next_event().unwrap().unwrap();
    assert_eq!(event.id.as_deref(), Some("7"));
    assert_eq!(event.event.as_deref(), Some("message"));
    assert_eq!(event.data, "{\"content\":\"x\"}");
}

#[test]
fn strips_only_one_leading_space() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data:   indented\n\n");
    assert_eq!(decoder.next_event().unwrap().unwrap().data, "  indented");
}

#[test]
fn skips_comments_and_dataless_blocks() {
    let mut decoder = SseDecoder::new();
    decoder.push(b": ping\n\nretry: 1000\n\nevent: noop\n\ndata: real\n\n");
    assert_eq!(decoder.next_event().unwrap().unwrap(), data("real"));
    assert!(decoder.next_event().is_none());
}

#[test]
fn keeps_multibyte_characters_split_across_chunks() {
    let bytes = "data: caf\u{e9}\n\n".as_bytes();
    let split = bytes.len() - 3;
    let mut decoder = SseDecoder::new();
    decoder.push(&bytes[..split]);
    assert!(decoder.next_event().is_none());
    decoder.push(&bytes[split..]);
    assert_eq!(decoder.next_event().unwrap().unwrap().data, "caf\u{e9}");
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: \xff\xfe\n\n");
    assert!(matches!(decoder.next_event(), Some(Err(Error::Decode(_)))));
}

#[test]
fn finish_flushes_trailing_block() {
    let mut decoder = SseDecoder::new();
    decoder.push(b"data: tail");
    assert!(decoder.next_event().is_none());
    assert_eq!(decoder.finish().unwrap().unwrap(), data("tail"));
    assert!(decoder.finish().is_none());
}

#[tokio::test]
async fn events_adapts_a_byte_stream() {
    let chunks: Vec<io::Result<Vec<u8>>> = vec![
        Ok(b"data: a\n".to_vec()),
        Ok(b"\ndata: b\n\n".to_vec()),
        Ok(b"data: c".to_vec()),
    ];
    let collected: Vec<String> = events(stream::iter(chunks))
        .map(|event| event.unwrap().data)
        .collect()
        .await;
    assert_eq!(collected, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn events_surfaces_read_errors() {
    let chunks: Vec<io::Result<Vec<u8>>> = vec![
        Ok(b"data: a\n\n".to_vec()),
        Err(io::Error::other("timed out")),
    ];
    let collected: Vec<_> = events(stream::iter(chunks)).collect().await;
    assert_eq!(collected.len(), 2);
    assert!(collected[0].is_ok());
    assert!(matches!(collected[1], Err(Error::Connection(_))));
}
