//! Per-user conversation session and its graph call stack.

use serde::{Deserialize, Serialize};

use crate::error::{ByobResult, ValidationError};
use crate::flaggable::Flaggable;

/// Session state carried between requests of the same user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session-scoped key/value store.
    #[serde(flatten)]
    pub data: Flaggable,

    /// Position of the conversation within nested graphs.
    #[serde(default)]
    pub stack: Stack,

    #[serde(rename = "ver", default)]
    pub version: String,
}

/// A position inside a graph module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "m")]
    pub module: i64,
    #[serde(rename = "n")]
    pub node: i64,
}

/// Call stack of graph frames. The bottom frame is the main graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Stack {
    /// Pushes a frame on top of the stack.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pops the top frame.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Frameless` if popping would leave the stack
    /// without its main-graph frame.
    pub fn pop(&mut self) -> ByobResult<Frame> {
        if self.frames.len() <= 1 {
            return Err(ValidationError::Frameless.into());
        }
        self.frames
            .pop()
            .ok_or_else(|| ValidationError::EmptyStack.into())
    }

    /// Returns the top frame, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Moves the top frame to `node` within the same module.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyStack` if there is no frame.
    pub fn set_current(&mut self, node: i64) -> ByobResult<()> {
        let frame = self.frames.last_mut().ok_or(ValidationError::EmptyStack)?;
        frame.node = node;
        Ok(())
    }

    /// Returns true once the main-graph frame is present.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Returns true if only the main-graph frame is present.
    #[must_use]
    pub fn is_on_main_graph(&self) -> bool {
        self.frames.len() == 1
    }
}
