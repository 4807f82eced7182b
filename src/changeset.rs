//! Recorded edits over a single [`Flaggable`].

use serde::{Deserialize, Serialize};

use crate::flaggable::Flaggable;
use crate::value::Value;

/// Kind of a recorded store edit. Encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ChangeKind {
    Set,
    Delete,
}

impl TryFrom<u8> for ChangeKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Set),
            1 => Ok(Self::Delete),
            other => Err(format!("unknown changeset operation: {other}")),
        }
    }
}

impl From<ChangeKind> for u8 {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Set => 0,
            ChangeKind::Delete => 1,
        }
    }
}

/// One recorded edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggableChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub key: String,
    #[serde(default)]
    pub data: Value,
}

/// Ordered list of edits, replayed in record order.
///
/// Later edits to the same key win simply because they are applied later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlaggableChangeset {
    #[serde(default)]
    pub changes: Vec<FlaggableChange>,
}

impl FlaggableChangeset {
    /// Creates an empty changeset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a set of `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.changes.push(FlaggableChange {
            kind: ChangeKind::Set,
            key: key.into(),
            data: value.into(),
        });
    }

    /// Records a delete of `key`.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.changes.push(FlaggableChange {
            kind: ChangeKind::Delete,
            key: key.into(),
            data: Value::Null,
        });
    }

    /// Replays every recorded edit onto `store`.
    pub fn apply(&self, store: &mut Flaggable) {
        for change in &self.changes {
            match change.kind {
                ChangeKind::Set => store.set(change.key.clone(), change.data.clone()),
                ChangeKind::Delete => store.delete(&change.key),
            }
        }
    }

    /// Returns the number of recorded edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
