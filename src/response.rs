//! Outgoing bot messages.

use serde::{Deserialize, Serialize};

use crate::block::{extract_blocks, ResponseBlock};

/// Messages produced for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Response {
    /// Moves embedded blocks out of every message's text.
    pub fn extract_blocks(&mut self) {
        for message in &mut self.messages {
            message.extract_blocks();
        }
    }
}

/// A single outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: String,

    /// Simulated typing delay in seconds.
    #[serde(rename = "typingTime", default)]
    pub typing_time: f64,

    #[serde(rename = "shouldBatch", default)]
    pub should_batch: bool,

    #[serde(rename = "graphId", default)]
    pub graph_id: Option<i64>,

    #[serde(rename = "nodeId", default)]
    pub node_id: Option<i64>,

    #[serde(default)]
    pub blocks: Vec<ResponseBlock>,
}

impl Message {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Extracts blocks embedded in `text`, appending them to `blocks` and
    /// leaving only the prose in `text`.
    pub fn extract_blocks(&mut self) {
        let (blocks, text) = extract_blocks(&self.text);
        self.blocks.extend(blocks);
        self.text = text;
    }
}
