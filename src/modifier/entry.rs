//! Diagnostic log entries and execution errors carried by a modifier.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log entry.
///
/// The integer codes (0, 5, 10, 15, 20) are a stable contract for any
/// consumer that filters or displays logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl TryFrom<i32> for LogLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<LogLevel, String> {
        match value {
            0 => Ok(LogLevel::Trace),
            5 => Ok(LogLevel::Debug),
            10 => Ok(LogLevel::Info),
            15 => Ok(LogLevel::Warning),
            20 => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => 0,
            LogLevel::Debug => 5,
            LogLevel::Info => 10,
            LogLevel::Warning => 15,
            LogLevel::Error => 20,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A timestamped message recorded during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Always UTC so entries from different producers compare directly.
    pub time: DateTime<Utc>,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Utc::now(),
        }
    }
}

/// Where an execution error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecErrorKind {
    Node,
    Link,
    Other,
}

impl fmt::Display for ExecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Link => write!(f, "link"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// An error raised while executing a node or link of a graph.
///
/// Execution errors are data: they travel inside a
/// [`ContextModifier`](super::ContextModifier) and accumulate on the
/// [`RequestContext`](crate::RequestContext) rather than aborting a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind} error in graph {graph_id} ({graph_name}): {message}")]
pub struct ExecError {
    #[serde(rename = "et")]
    pub kind: ExecErrorKind,
    #[serde(rename = "graphId")]
    pub graph_id: i64,
    #[serde(rename = "graphName", default)]
    pub graph_name: String,
    #[serde(rename = "nodeId", default)]
    pub node_id: Option<i64>,
    #[serde(rename = "linkSource", default)]
    pub link_source: Option<i64>,
    #[serde(rename = "linkDest", default)]
    pub link_dest: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl ExecError {
    /// Creates an error raised by a node.
    #[must_use]
    pub fn node(
        graph_id: i64,
        graph_name: impl Into<String>,
        node_id: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ExecErrorKind::Node,
            graph_id,
            graph_name: graph_name.into(),
            node_id: Some(node_id),
            link_source: None,
            link_dest: None,
            message: message.into(),
        }
    }

    /// Creates an error raised by the link between two nodes.
    #[must_use]
    pub fn link(
        graph_id: i64,
        graph_name: impl Into<String>,
        source: i64,
        dest: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ExecErrorKind::Link,
            graph_id,
            graph_name: graph_name.into(),
            node_id: None,
            link_source: Some(source),
            link_dest: Some(dest),
            message: message.into(),
        }
    }

    /// Creates an error not tied to a node or link.
    #[must_use]
    pub fn other(graph_id: i64, graph_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ExecErrorKind::Other,
            graph_id,
            graph_name: graph_name.into(),
            node_id: None,
            link_source: None,
            link_dest: None,
            message: message.into(),
        }
    }
}
