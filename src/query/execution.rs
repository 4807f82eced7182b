//! Execution-log query builder.

use serde::{Deserialize, Serialize};

use super::cursor::{require_field, ClauseCursor};

/// Comparison applied by an execution clause. Encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExecutionOp {
    #[default]
    Equals,
    Exists,
    BetweenExclusive,
    BetweenInclusive,
    HasPrefix,
}

impl TryFrom<u8> for ExecutionOp {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Equals),
            1 => Ok(Self::Exists),
            2 => Ok(Self::BetweenExclusive),
            3 => Ok(Self::BetweenInclusive),
            4 => Ok(Self::HasPrefix),
            other => Err(format!("unknown execution query operation: {other}")),
        }
    }
}

impl From<ExecutionOp> for u8 {
    fn from(op: ExecutionOp) -> Self {
        match op {
            ExecutionOp::Equals => 0,
            ExecutionOp::Exists => 1,
            ExecutionOp::BetweenExclusive => 2,
            ExecutionOp::BetweenInclusive => 3,
            ExecutionOp::HasPrefix => 4,
        }
    }
}

/// One filter clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionQueryItem {
    pub op: ExecutionOp,
    pub field: String,
    #[serde(default)]
    pub matcher: Vec<String>,
    #[serde(rename = "lowerBound", default)]
    pub lower_bound: Option<String>,
    #[serde(rename = "upperBound", default)]
    pub upper_bound: Option<String>,
}

/// Sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSort {
    #[serde(rename = "Field")]
    pub field: String,
    #[serde(rename = "asc")]
    pub ascending: bool,
}

/// Finished execution query, ready to send to the execution service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionQuery {
    #[serde(rename = "envId", default)]
    pub env_id: String,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub filters: Vec<ExecutionQueryItem>,
    #[serde(rename = "mustNot", default)]
    pub must_not: Vec<ExecutionQueryItem>,
    #[serde(default)]
    pub sort: Vec<ExecutionSort>,
}

/// Fluent builder for [`ExecutionQuery`].
///
/// [`field`](Self::field) opens a clause; the terminal calls that follow
/// (`equals`, `exists`, `has_prefix`, `between`) edit it in place. The next
/// `field` call or [`build`](Self::build) files the clause under `filters`,
/// or under `must_not` if [`not`](Self::not) was called for it.
///
/// # Example
/// ```
/// use byob::ExecutionMatcher;
///
/// let query = ExecutionMatcher::new()
///     .field("status")
///     .equals("failed")
///     .field("graph")
///     .not()
///     .has_prefix("test_")
///     .limit(20)
///     .build();
///
/// assert_eq!(query.filters.len(), 1);
/// assert_eq!(query.must_not.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionMatcher {
    env_id: String,
    limit: usize,
    offset: usize,
    sort: Vec<ExecutionSort>,
    clauses: ClauseCursor<ExecutionQueryItem>,
}

impl ExecutionMatcher {
    /// Creates an empty matcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to one environment.
    pub fn env(&mut self, env_id: impl Into<String>) -> &mut Self {
        self.env_id = env_id.into();
        self
    }

    /// Opens a clause on `field`, flushing the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `field` is blank after trimming.
    pub fn field(&mut self, field: &str) -> &mut Self {
        let field = require_field(field);
        self.clauses.open(ExecutionQueryItem {
            field,
            ..ExecutionQueryItem::default()
        });
        self
    }

    /// Negates the open clause.
    pub fn not(&mut self) -> &mut Self {
        self.clauses.negate();
        self
    }

    /// Caps the number of results.
    pub fn limit(&mut self, limit: usize) -> &mut Self {
        self.limit = limit;
        self
    }

    /// Skips the first `offset` results.
    pub fn offset(&mut self, offset: usize) -> &mut Self {
        self.offset = offset;
        self
    }

    /// Adds an ascending sort key.
    pub fn sort_asc(&mut self, field: impl Into<String>) -> &mut Self {
        self.sort.push(ExecutionSort {
            field: field.into(),
            ascending: true,
        });
        self
    }

    /// Adds a descending sort key.
    pub fn sort_desc(&mut self, field: impl Into<String>) -> &mut Self {
        self.sort.push(ExecutionSort {
            field: field.into(),
            ascending: false,
        });
        self
    }

    /// Matches `value`. Repeated calls add alternatives.
    ///
    /// # Panics
    ///
    /// Panics if no clause is open.
    pub fn equals(&mut self, value: impl Into<String>) -> &mut Self {
        self.equals_any([value])
    }

    /// Matches any of `values`.
    ///
    /// # Panics
    ///
    /// Panics if no clause is open.
    pub fn equals_any<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item = self.clauses.current_mut("equals");
        item.op = ExecutionOp::Equals;
        item.matcher.extend(values.into_iter().map(Into::into));
        self
    }

    /// # Panics
    ///
    /// Panics if no clause is open.
    pub fn exists(&mut self) -> &mut Self {
        self.clauses.current_mut("exists").op = ExecutionOp::Exists;
        self
    }

    /// # Panics
    ///
    /// Panics if no clause is open.
    pub fn has_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        let item = self.clauses.current_mut("has_prefix");
        item.op = ExecutionOp::HasPrefix;
        item.matcher.push(prefix.into());
        self
    }

    /// Matches values between `low` and `high`.
    ///
    /// # Panics
    ///
    /// Panics if no clause is open.
    pub fn between(
        &mut self,
        low: impl Into<String>,
        high: impl Into<String>,
        inclusive: bool,
    ) -> &mut Self {
        let item = self.clauses.current_mut("between");
        item.op = if inclusive {
            ExecutionOp::BetweenInclusive
        } else {
            ExecutionOp::BetweenExclusive
        };
        item.lower_bound = Some(low.into());
        item.upper_bound = Some(high.into());
        self
    }

    /// Flushes the open clause and returns the query.
    ///
    /// Building again returns the same clauses; nothing is flushed twice.
    pub fn build(&mut self) -> ExecutionQuery {
        self.clauses.flush();
        ExecutionQuery {
            env_id: self.env_id.clone(),
            limit: self.limit,
            offset: self.offset,
            filters: self.clauses.filters.clone(),
            must_not: self.clauses.must_not.clone(),
            sort: self.sort.clone(),
        }
    }
}
