//! Context mutation log.
//!
//! A [`ContextModifier`] records scoped edits, diagnostic log entries and
//! execution errors as data. Nothing touches a [`RequestContext`] until
//! [`ContextModifier::apply`] replays the log, so logs produced by
//! independent branches can be merged first and applied once:
//!
//! ```
//! use byob::{merge_context_modifiers, ContextModifier, RequestContext};
//!
//! let mut left = ContextModifier::new();
//! left.set("step", "left").log_info("left branch done");
//!
//! let mut right = ContextModifier::new();
//! right.set("step", "right").set_session("seen", true);
//!
//! let merged = merge_context_modifiers(&left, &right);
//! let mut ctx = RequestContext::new();
//! merged.apply(&mut ctx);
//!
//! assert_eq!(ctx.data.get_string("step"), "right");
//! assert!(ctx.session.data.get_bool("seen"));
//! ```

mod change;
mod entry;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::context::{RequestContext, RequestUser};
use crate::value::Value;

pub use change::{ChangeOp, ContextChange, Scope};
pub use entry::{ExecError, ExecErrorKind, LogEntry, LogLevel};

/// Ordered, replayable record of context edits, logs and errors.
///
/// A modifier never references a context; applying it is a pure function of
/// the log and the target context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextModifier {
    #[serde(rename = "changes", default)]
    pub changes: Vec<ContextChange>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub errors: Vec<ExecError>,
}

/// Creates a new modifier holding `a`'s entries followed by `b`'s.
///
/// Changes, logs and errors are concatenated as-is: no reordering and no
/// de-duplication.
#[must_use]
pub fn merge_context_modifiers(a: &ContextModifier, b: &ContextModifier) -> ContextModifier {
    ContextModifier::merge(a, b)
}

impl ContextModifier {
    /// Creates an empty modifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`merge_context_modifiers`].
    #[must_use]
    pub fn merge(a: &Self, b: &Self) -> Self {
        trace!(
            left = a.changes.len(),
            right = b.changes.len(),
            "modifier.merge"
        );
        Self {
            changes: a.changes.iter().chain(&b.changes).cloned().collect(),
            logs: a.logs.iter().chain(&b.logs).cloned().collect(),
            errors: a.errors.iter().chain(&b.errors).cloned().collect(),
        }
    }

    /// Records a scoped operation.
    ///
    /// Mapping payloads are normalized through a JSON round trip before they
    /// are stored; other values are stored as given (see [`Value::normalized`]).
    pub fn add_operation(
        &mut self,
        scope: Scope,
        op: ChangeOp,
        key: impl Into<String>,
        data: impl Into<Value>,
    ) -> &mut Self {
        self.changes.push(ContextChange {
            scope,
            op,
            key: key.into(),
            data: data.into().normalized(),
        });
        self
    }

    /// Replays the recorded operations onto `context` in record order, then
    /// appends the recorded errors.
    ///
    /// Clearing the user scope replaces the whole user record, identity
    /// included. Clearing the environment scope unsets the environment map
    /// rather than emptying it.
    pub fn apply(&self, context: &mut RequestContext) {
        trace!(
            changes = self.changes.len(),
            errors = self.errors.len(),
            "modifier.apply"
        );

        for change in &self.changes {
            match change.scope {
                Scope::Context => match change.op {
                    ChangeOp::Set => context.data.set(change.key.clone(), change.data.clone()),
                    ChangeOp::Delete => context.data.delete(&change.key),
                    ChangeOp::Clear => context.data.clear(),
                },
                Scope::Session => match change.op {
                    ChangeOp::Set => context
                        .session
                        .data
                        .set(change.key.clone(), change.data.clone()),
                    ChangeOp::Delete => context.session.data.delete(&change.key),
                    ChangeOp::Clear => context.session.data.clear(),
                },
                Scope::User => match change.op {
                    ChangeOp::Set => context
                        .user
                        .data
                        .set(change.key.clone(), change.data.clone()),
                    ChangeOp::Delete => context.user.data.delete(&change.key),
                    ChangeOp::Clear => context.user = RequestUser::default(),
                },
                Scope::Environment => match change.op {
                    ChangeOp::Set => {
                        context
                            .environment_data
                            .get_or_insert_with(HashMap::new)
                            .insert(change.key.clone(), change.data.clone());
                    }
                    ChangeOp::Delete => {
                        if let Some(env) = context.environment_data.as_mut() {
                            env.remove(&change.key);
                        }
                    }
                    ChangeOp::Clear => context.environment_data = None,
                },
            }
        }

        context.errors.extend(self.errors.iter().cloned());
    }

    /// Records an execution error.
    pub fn error(&mut self, err: ExecError) -> &mut Self {
        self.errors.push(err);
        self
    }

    /// Records a context-scope set.
    pub fn set(&mut self, key: impl Into<String>, data: impl Into<Value>) -> &mut Self {
        self.add_operation(Scope::Context, ChangeOp::Set, key, data)
    }

    /// Records a session-scope set.
    pub fn set_session(&mut self, key: impl Into<String>, data: impl Into<Value>) -> &mut Self {
        self.add_operation(Scope::Session, ChangeOp::Set, key, data)
    }

    /// Records a user-scope set.
    pub fn set_user(&mut self, key: impl Into<String>, data: impl Into<Value>) -> &mut Self {
        self.add_operation(Scope::User, ChangeOp::Set, key, data)
    }

    /// Records an environment-scope set.
    pub fn set_environment(&mut self, key: impl Into<String>, data: impl Into<Value>) -> &mut Self {
        self.add_operation(Scope::Environment, ChangeOp::Set, key, data)
    }

    /// Records a context-scope delete.
    pub fn delete(&mut self, key: impl Into<String>) -> &mut Self {
        self.add_operation(Scope::Context, ChangeOp::Delete, key, Value::Null)
    }

    /// Records a session-scope delete.
    pub fn delete_session(&mut self, key: impl Into<String>) -> &mut Self {
        self.add_operation(Scope::Session, ChangeOp::Delete, key, Value::Null)
    }

    /// Records a user-scope delete.
    pub fn delete_user(&mut self, key: impl Into<String>) -> &mut Self {
        self.add_operation(Scope::User, ChangeOp::Delete, key, Value::Null)
    }

    /// Records an environment-scope delete.
    pub fn delete_environment(&mut self, key: impl Into<String>) -> &mut Self {
        self.add_operation(Scope::Environment, ChangeOp::Delete, key, Value::Null)
    }

    /// Records a clear of the context store.
    pub fn clear_context(&mut self) -> &mut Self {
        self.add_operation(Scope::Context, ChangeOp::Clear, "", Value::Null)
    }

    /// Records a clear of the session store.
    pub fn clear_session(&mut self) -> &mut Self {
        self.add_operation(Scope::Session, ChangeOp::Clear, "", Value::Null)
    }

    /// Records a reset of the whole user record.
    pub fn clear_user(&mut self) -> &mut Self {
        self.add_operation(Scope::User, ChangeOp::Clear, "", Value::Null)
    }

    /// Records an unset of the environment map.
    pub fn clear_environment(&mut self) -> &mut Self {
        self.add_operation(Scope::Environment, ChangeOp::Clear, "", Value::Null)
    }

    /// Appends a log entry stamped with the current UTC time.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) -> &mut Self {
        self.logs.push(LogEntry::now(level, message));
        self
    }

    /// Appends a trace entry.
    pub fn log_trace(&mut self, message: impl Into<String>) -> &mut Self {
        self.log(LogLevel::Trace, message)
    }

    /// Appends a debug entry.
    pub fn log_debug(&mut self, message: impl Into<String>) -> &mut Self {
        self.log(LogLevel::Debug, message)
    }

    /// Appends an info entry.
    pub fn log_info(&mut self, message: impl Into<String>) -> &mut Self {
        self.log(LogLevel::Info, message)
    }

    /// Appends a warning entry.
    pub fn log_warning(&mut self, message: impl Into<String>) -> &mut Self {
        self.log(LogLevel::Warning, message)
    }

    /// Appends an error entry.
    pub fn log_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.log(LogLevel::Error, message)
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.logs.is_empty() && self.errors.is_empty()
    }
}
