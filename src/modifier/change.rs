//! Scoped context edits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Namespace a context edit targets. Encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Scope {
    Context,
    Session,
    User,
    Environment,
}

impl TryFrom<u8> for Scope {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Context),
            1 => Ok(Self::Session),
            2 => Ok(Self::User),
            3 => Ok(Self::Environment),
            other => Err(format!("unknown context scope: {other}")),
        }
    }
}

impl From<Scope> for u8 {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Context => 0,
            Scope::Session => 1,
            Scope::User => 2,
            Scope::Environment => 3,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context => write!(f, "context"),
            Self::Session => write!(f, "session"),
            Self::User => write!(f, "user"),
            Self::Environment => write!(f, "environment"),
        }
    }
}

/// Operation applied within a scope. Encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ChangeOp {
    Set,
    Delete,
    Clear,
}

impl TryFrom<u8> for ChangeOp {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Set),
            1 => Ok(Self::Delete),
            2 => Ok(Self::Clear),
            other => Err(format!("unknown context operation: {other}")),
        }
    }
}

impl From<ChangeOp> for u8 {
    fn from(op: ChangeOp) -> Self {
        match op {
            ChangeOp::Set => 0,
            ChangeOp::Delete => 1,
            ChangeOp::Clear => 2,
        }
    }
}

/// One recorded edit. `key` is empty and `data` is null for `Clear`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextChange {
    #[serde(rename = "type")]
    pub scope: Scope,
    pub op: ChangeOp,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_codes() {
        for (code, scope) in [
            (0u8, Scope::Context),
            (1, Scope::Session),
            (2, Scope::User),
            (3, Scope::Environment),
        ] {
            assert_eq!(u8::from(scope), code);
            assert_eq!(Scope::try_from(code).unwrap(), scope);
        }
        assert!(Scope::try_from(4).is_err());
    }

    #[test]
    fn test_op_codes() {
        assert_eq!(u8::from(ChangeOp::Clear), 2);
        assert_eq!(ChangeOp::try_from(1).unwrap(), ChangeOp::Delete);
        assert!(ChangeOp::try_from(3).is_err());
    }

    #[test]
    fn test_change_wire_format() {
        let change = ContextChange {
            scope: Scope::User,
            op: ChangeOp::Set,
            key: "plan".to_string(),
            data: Value::from("pro"),
        };
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(json, r#"{"type":2,"op":0,"key":"plan","data":"pro"}"#);
    }
}
