use serde_json::de::IoRead;
use serde_json::error::Category;
use serde_json::{Deserializer, Map, StreamDeserializer, Value};
use std::io;

/// One decoded JSON log event: keys in document order, numbers kept as their
/// exact decimal text.
pub type RawEvent = Map<String, Value>;

/// Fatal decoding failure; the stream cannot be advanced past it.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The underlying byte stream failed.
    #[error("failed to read log stream: {0}")]
    Io(#[source] serde_json::Error),
    /// The stream held something that is not a JSON object, including a
    /// truncated trailing value.
    #[error("malformed JSON event: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => DecodeError::Io(err),
            _ => DecodeError::Malformed(err),
        }
    }
}

/// Pulls top-level JSON objects off a byte stream, one per call — the
/// concatenated-objects framing log producers emit when they append one
/// object per event. Values are separated only by what JSON tokenization
/// implies; there is no enclosing array.
pub struct EventStream<R: io::Read> {
    events: StreamDeserializer<'static, IoRead<R>, RawEvent>,
}

impl<R: io::Read> EventStream<R> {
    /// The reader should be buffered; the decoder consumes it byte-wise.
    pub fn new(input: R) -> Self {
        EventStream {
            events: Deserializer::from_reader(input).into_iter(),
        }
    }

    /// Advance past exactly one top-level JSON value.
    ///
    /// **Returns**
    /// - `Ok(Some(event))`: the next decoded object.
    /// - `Ok(None)`: the stream is cleanly exhausted.
    /// - `Err(..)`: malformed input or a read failure. Terminal; the stream
    ///   must not be advanced afterwards.
    pub fn next_event(&mut self) -> Result<Option<RawEvent>, DecodeError> {
        match self.events.next() {
            None => Ok(None),
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(err)) => Err(err.into()),
        }
    }
}
