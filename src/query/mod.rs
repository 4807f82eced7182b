//! Fluent query builders.
//!
//! Two builders share one clause discipline: `field` opens a clause, the
//! operator calls that follow edit it, and the next `field` or `build` files
//! it under the positive or negated list.
//!
//! - [`ExecutionMatcher`] builds an [`ExecutionQuery`] over execution logs.
//! - [`UQBuilder`] builds a [`UserQuery`] over user records.

mod cursor;
mod execution;
mod user;

pub use execution::{
    ExecutionMatcher, ExecutionOp, ExecutionQuery, ExecutionQueryItem, ExecutionSort,
};
pub use user::{QueryCheck, UQBuilder, UserQuery, UserQueryMode, UserQueryOp};
