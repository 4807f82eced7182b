//! Structured blocks embedded inline in message text.
//!
//! A block is written into a text stream as
//! `!!cblk!!{"t":"<type>","d":"<payload json>"}!!end!!`. The payload is
//! JSON-encoded twice: `d` is always a JSON *string*, never a nested object.
//!
//! The delimiters are not escaped. Text (or a payload string) that contains
//! `!!cblk!!` or `!!end!!` literally will split incorrectly on extraction.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ByobResult, CodecError};

/// Opening delimiter of an embedded block.
pub const BLOCK_OPEN: &str = "!!cblk!!";

/// Closing delimiter of an embedded block.
pub const BLOCK_CLOSE: &str = "!!end!!";

/// A typed payload carried alongside (or inside) message text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBlock {
    /// Block type tag, e.g. `"card"`.
    #[serde(rename = "t", default)]
    pub kind: String,

    /// JSON encoding of the payload.
    #[serde(rename = "d", default)]
    pub data: String,

    /// Intended insertion order, independent of extraction order.
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl ResponseBlock {
    /// Creates a block by JSON-encoding `payload`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if `payload` cannot be serialized.
    pub fn new<T: Serialize + ?Sized>(kind: impl Into<String>, payload: &T) -> ByobResult<Self> {
        let data =
            serde_json::to_string(payload).map_err(|e| CodecError::encode("block payload", &e))?;
        Ok(Self {
            kind: kind.into(),
            data,
            position: None,
        })
    }

    /// Sets the intended insertion position.
    #[must_use]
    pub const fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Renders the block as a self-delimited inline token.
    #[must_use]
    pub fn encode(&self) -> String {
        // String and integer fields always serialize.
        let body = serde_json::to_string(self).unwrap_or_else(|err| {
            debug!(error = %err, kind = %self.kind, "block.encode.failed");
            String::new()
        });
        format!("{BLOCK_OPEN}{body}{BLOCK_CLOSE}")
    }

    /// Decodes the payload.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Decode` if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> ByobResult<T> {
        Ok(serde_json::from_str(&self.data).map_err(|e| CodecError::decode("block payload", &e))?)
    }
}

/// Splits embedded blocks out of `msg`.
///
/// Returns the blocks in stream order and the remaining prose with every
/// block token removed. The input is trimmed first; text before the first
/// block is kept verbatim, and text following each block's closing
/// delimiter is appended in order.
///
/// Extraction is best-effort. A fragment whose body is not a valid block is
/// dropped entirely (no block and none of its trailing text) and the call
/// carries on.
///
/// # Examples
///
/// ```
/// use byob::{extract_blocks, ResponseBlock};
///
/// let card = ResponseBlock::new("card", &serde_json::json!({"x": 1})).unwrap();
/// let msg = format!("hello {} world", card.encode());
///
/// let (blocks, text) = extract_blocks(&msg);
/// assert_eq!(blocks, vec![card]);
/// assert_eq!(text, "hello  world");
/// ```
#[must_use]
pub fn extract_blocks(msg: &str) -> (Vec<ResponseBlock>, String) {
    let msg = msg.trim();
    let leading_text = !msg.starts_with(BLOCK_OPEN);

    let mut blocks = Vec::new();
    let mut text = String::new();

    for (i, fragment) in msg.split(BLOCK_OPEN).enumerate() {
        if i == 0 {
            // Empty unless the message starts with prose.
            if leading_text {
                text.push_str(fragment);
            }
            continue;
        }

        let parts: Vec<&str> = fragment.split(BLOCK_CLOSE).collect();
        match serde_json::from_str::<ResponseBlock>(parts[0]) {
            Ok(block) => {
                if let [_, trailing] = parts.as_slice() {
                    text.push_str(trailing);
                }
                blocks.push(block);
            }
            Err(err) => {
                debug!(error = %err, fragment = i, "block.extract.skip_malformed");
            }
        }
    }

    (blocks, text)
}
