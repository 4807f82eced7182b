//! The per-request execution context.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flaggable::Flaggable;
use crate::modifier::ExecError;
use crate::response::Response;
use crate::session::Session;
use crate::value::Value;

/// The user making a bot request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestUser {
    /// User-scoped key/value store.
    #[serde(flatten)]
    pub data: Flaggable,

    #[serde(default)]
    pub id: Uuid,

    #[serde(rename = "platformId", default)]
    pub platform_id: String,

    #[serde(default)]
    pub name: String,
}

/// State of a single bot request.
///
/// Holds the context-scoped store plus the user, session and environment
/// scopes, and the execution errors accumulated so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Context-scoped key/value store.
    #[serde(flatten)]
    pub data: Flaggable,

    #[serde(default)]
    pub id: Uuid,

    #[serde(default)]
    pub user: RequestUser,

    #[serde(default)]
    pub session: Session,

    /// Environment variables. `None` and an empty map are distinct states.
    #[serde(rename = "envData", default)]
    pub environment_data: Option<HashMap<String, Value>>,

    #[serde(default)]
    pub text: String,

    #[serde(rename = "originPlatform", default)]
    pub origin_platform: String,

    #[serde(rename = "originalRequest", default)]
    pub original_request: Value,

    #[serde(rename = "isStart", default)]
    pub is_start: bool,

    #[serde(rename = "isTrigger", default)]
    pub is_trigger: bool,

    #[serde(default)]
    pub errors: Vec<ExecError>,

    #[serde(default)]
    pub response: Option<Response>,
}

impl RequestContext {
    /// Creates an empty context with a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    /// Records an execution error, making it the last error.
    pub fn error(&mut self, err: ExecError) {
        self.errors.push(err);
    }

    /// Returns the most recently recorded error.
    ///
    /// Always the tail of `errors`, so it is `None` exactly when `errors` is
    /// empty. A `lastError` key in decoded input is ignored.
    #[must_use]
    pub fn last_error(&self) -> Option<&ExecError> {
        self.errors.last()
    }
}
