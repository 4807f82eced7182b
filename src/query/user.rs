//! User-search query builder.

use serde::{Deserialize, Serialize};

use super::cursor::{require_field, ClauseCursor};

/// Comparison applied by a user check. Encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserQueryOp {
    #[default]
    Equals,
    Exists,
    NotExists,
    NotEquals,
    StartsWith,
    GreaterThan,
    LessThan,
}

impl TryFrom<u8> for UserQueryOp {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Equals),
            1 => Ok(Self::Exists),
            2 => Ok(Self::NotExists),
            3 => Ok(Self::NotEquals),
            4 => Ok(Self::StartsWith),
            5 => Ok(Self::GreaterThan),
            6 => Ok(Self::LessThan),
            other => Err(format!("unknown user query operation: {other}")),
        }
    }
}

impl From<UserQueryOp> for u8 {
    fn from(op: UserQueryOp) -> Self {
        match op {
            UserQueryOp::Equals => 0,
            UserQueryOp::Exists => 1,
            UserQueryOp::NotExists => 2,
            UserQueryOp::NotEquals => 3,
            UserQueryOp::StartsWith => 4,
            UserQueryOp::GreaterThan => 5,
            UserQueryOp::LessThan => 6,
        }
    }
}

/// How the checks of a [`UserQuery`] combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserQueryMode {
    /// At least one check matches.
    #[default]
    Any,
    /// Every check matches.
    All,
    /// No check matches.
    None,
}

impl TryFrom<u8> for UserQueryMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Any),
            1 => Ok(Self::All),
            2 => Ok(Self::None),
            other => Err(format!("unknown user query mode: {other}")),
        }
    }
}

impl From<UserQueryMode> for u8 {
    fn from(mode: UserQueryMode) -> Self {
        match mode {
            UserQueryMode::Any => 0,
            UserQueryMode::All => 1,
            UserQueryMode::None => 2,
        }
    }
}

/// One check against a user field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCheck {
    pub field: String,
    pub operation: UserQueryOp,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Finished user query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub checks: Vec<QueryCheck>,
    #[serde(rename = "mustNot", default, skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<QueryCheck>,
    #[serde(default)]
    pub mode: UserQueryMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// Fluent builder for [`UserQuery`].
///
/// Works like [`ExecutionMatcher`](crate::ExecutionMatcher): `field` opens a
/// check, the comparison calls edit it, and the next `field` or `build`
/// flushes it.
///
/// ```
/// use byob::{UQBuilder, UserQueryMode, UserQueryOp};
///
/// let query = UQBuilder::new(UserQueryMode::All)
///     .field("plan")
///     .equals_any(["pro", "team"])
///     .field("age")
///     .greater_than("17")
///     .build();
///
/// assert_eq!(query.checks[1].operation, UserQueryOp::GreaterThan);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UQBuilder {
    mode: UserQueryMode,
    limit: Option<usize>,
    offset: Option<usize>,
    clauses: ClauseCursor<QueryCheck>,
}

impl UQBuilder {
    /// Creates a builder whose checks combine by `mode`.
    #[must_use]
    pub fn new(mode: UserQueryMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Opens a check on `field`, flushing the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `field` is blank after trimming.
    pub fn field(&mut self, field: &str) -> &mut Self {
        let field = require_field(field);
        self.clauses.open(QueryCheck {
            field,
            ..QueryCheck::default()
        });
        self
    }

    /// Negates the open check, filing it under `mustNot`.
    pub fn not(&mut self) -> &mut Self {
        self.clauses.negate();
        self
    }

    /// Caps the number of results.
    pub fn limit(&mut self, limit: usize) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` results.
    pub fn offset(&mut self, offset: usize) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    fn compare(
        &mut self,
        operator: &'static str,
        operation: UserQueryOp,
        values: impl IntoIterator<Item = String>,
    ) -> &mut Self {
        let check = self.clauses.current_mut(operator);
        check.operation = operation;
        check.values.extend(values);
        self
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn equals(&mut self, value: impl Into<String>) -> &mut Self {
        self.compare("equals", UserQueryOp::Equals, [value.into()])
    }

    /// Matches any of `values`.
    ///
    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn equals_any<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compare(
            "equals_any",
            UserQueryOp::Equals,
            values.into_iter().map(Into::into),
        )
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn not_equals(&mut self, value: impl Into<String>) -> &mut Self {
        self.compare("not_equals", UserQueryOp::NotEquals, [value.into()])
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn exists(&mut self) -> &mut Self {
        self.compare("exists", UserQueryOp::Exists, std::iter::empty())
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn not_exists(&mut self) -> &mut Self {
        self.compare("not_exists", UserQueryOp::NotExists, std::iter::empty())
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn starts_with(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.compare("starts_with", UserQueryOp::StartsWith, [prefix.into()])
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn greater_than(&mut self, value: impl Into<String>) -> &mut Self {
        self.compare("greater_than", UserQueryOp::GreaterThan, [value.into()])
    }

    /// # Panics
    ///
    /// Panics if no check is open.
    pub fn less_than(&mut self, value: impl Into<String>) -> &mut Self {
        self.compare("less_than", UserQueryOp::LessThan, [value.into()])
    }

    /// Flushes the open check and returns the query.
    pub fn build(&mut self) -> UserQuery {
        self.clauses.flush();
        UserQuery {
            checks: self.clauses.filters.clone(),
            must_not: self.clauses.must_not.clone(),
            mode: self.mode,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_in_call_order() {
        let query = UQBuilder::new(UserQueryMode::Any)
            .field("name")
            .starts_with("Al")
            .field("age")
            .less_than("30")
            .field("email")
            .exists()
            .build();

        let ops: Vec<_> = query.checks.iter().map(|c| c.operation).collect();
        assert_eq!(
            ops,
            vec![
                UserQueryOp::StartsWith,
                UserQueryOp::LessThan,
                UserQueryOp::Exists
            ]
        );
        assert_eq!(query.checks[0].values, vec!["Al"]);
        assert!(query.checks[2].values.is_empty());
    }

    #[test]
    fn test_equals_any_and_not_equals() {
        let query = UQBuilder::new(UserQueryMode::All)
            .field("plan")
            .equals_any(vec!["free".to_string(), "pro".to_string()])
            .field("country")
            .not_equals("FR")
            .build();

        assert_eq!(query.mode, UserQueryMode::All);
        assert_eq!(query.checks[0].values, vec!["free", "pro"]);
        assert_eq!(query.checks[1].operation, UserQueryOp::NotEquals);
    }

    #[test]
    fn test_not_files_under_must_not() {
        let query = UQBuilder::new(UserQueryMode::Any)
            .field("banned")
            .not()
            .exists()
            .field("name")
            .not_exists()
            .build();

        assert_eq!(query.must_not.len(), 1);
        assert_eq!(query.must_not[0].field, "banned");
        assert_eq!(query.checks.len(), 1);
        assert_eq!(query.checks[0].operation, UserQueryOp::NotExists);
    }

    #[test]
    fn test_paging() {
        let query = UQBuilder::new(UserQueryMode::None).limit(10).offset(5).build();
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(5));
        assert!(query.checks.is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot call greater_than before opening a clause")]
    fn test_comparison_before_field_panics() {
        UQBuilder::new(UserQueryMode::Any).greater_than("1");
    }

    #[test]
    #[should_panic(expected = "cannot query blank field")]
    fn test_blank_field_panics() {
        UQBuilder::new(UserQueryMode::Any).field("");
    }

    #[test]
    fn test_wire_format() {
        let query = UQBuilder::new(UserQueryMode::All)
            .field("plan")
            .equals("pro")
            .build();
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "checks": [{"field": "plan", "operation": 0, "values": ["pro"]}],
                "mode": 1
            })
        );

        let decoded: UserQuery = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, query);
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(serde_json::from_str::<UserQueryOp>("7").is_err());
        assert!(serde_json::from_str::<UserQueryMode>("3").is_err());
        assert_eq!(UserQueryMode::default(), UserQueryMode::Any);
    }
}
