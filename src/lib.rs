//! # byob - execution-context data layer for conversational bots
//!
//! `byob` holds the state a bot node sees while it runs and the records it
//! produces. Nodes never edit the request directly; they describe their edits
//! as data, and the runtime replays those edits once every branch is done.
//!
//! ## Core Concepts
//!
//! - **Flaggable**: a lazily allocated key/value store with soft-fail typed getters
//! - **ContextModifier**: an ordered log of scoped edits, logs and errors that can be
//!   merged with another log and applied to a [`RequestContext`]
//! - **ResponseBlock**: a typed payload embedded inline in message text
//! - **ExecutionMatcher** / **UQBuilder**: fluent builders for execution-log and user queries
//!
//! ## Usage
//!
//! ```rust
//! use byob::{merge_context_modifiers, ContextModifier, RequestContext};
//!
//! let mut left = ContextModifier::new();
//! left.set_user("plan", "pro").log_info("upgraded");
//!
//! let mut right = ContextModifier::new();
//! right.set("step", 2).delete_session("draft");
//!
//! let mut ctx = RequestContext::new();
//! merge_context_modifiers(&left, &right).apply(&mut ctx);
//!
//! assert_eq!(ctx.user.data.get_string("plan"), "pro");
//! assert_eq!(ctx.data.get_int("step"), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Storage and edits
pub mod changeset;
pub mod error;
pub mod flaggable;
pub mod modifier;
pub mod value;

// Request state
pub mod context;
pub mod session;

// Output
pub mod block;
pub mod response;

pub mod query;

// Re-export primary types at crate root for convenience
pub use block::{extract_blocks, ResponseBlock, BLOCK_CLOSE, BLOCK_OPEN};
pub use changeset::{ChangeKind, FlaggableChange, FlaggableChangeset};
pub use context::{RequestContext, RequestUser};
pub use error::{ByobError, ByobResult, CodecError, ValidationError};
pub use flaggable::Flaggable;
pub use modifier::{
    merge_context_modifiers, ChangeOp, ContextChange, ContextModifier, ExecError, ExecErrorKind,
    LogEntry, LogLevel, Scope,
};
pub use response::{Message, Response};
pub use session::{Frame, Session, Stack};
pub use value::Value;

pub use query::{
    ExecutionMatcher, ExecutionOp, ExecutionQuery, ExecutionQueryItem, ExecutionSort, QueryCheck,
    UQBuilder, UserQuery, UserQueryMode, UserQueryOp,
};
