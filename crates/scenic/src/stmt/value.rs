use chrono::{DateTime, Utc};

use crate::Result;

/// A runtime value flowing through a field's pipelines.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// Unsigned 64-bit integer
    U64(u64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Point in time, UTC
    Timestamp(DateTime<Utc>),

    /// A list of values of the same type
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// Emptiness as Empty2Nil sees it: null, the empty string, the empty
    /// list, and zero numerics.
    pub fn is_empty_like(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(value) => value.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::I64(value) => *value == 0,
            Self::U64(value) => *value == 0,
            Self::F64(value) => *value == 0.0,
            Self::Bool(_) | Self::Timestamp(_) => false,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
            Self::Null => "null",
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(value) => Ok(value),
            _ => crate::bail!("cannot convert value to bool; value={self:?}"),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(value) => Ok(value),
            _ => crate::bail!("cannot convert value to i64; value={self:?}"),
        }
    }

    pub fn to_u64(self) -> Result<u64> {
        match self {
            Self::U64(value) => Ok(value),
            _ => crate::bail!("cannot convert value to u64; value={self:?}"),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Self::String(value) => Ok(value),
            _ => crate::bail!("cannot convert value to String; value={self:?}"),
        }
    }

    pub fn to_list(self) -> Result<Vec<Value>> {
        match self {
            Self::List(items) => Ok(items),
            _ => crate::bail!("cannot convert value to list; value={self:?}"),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::I64(value) => value.fmt(f),
            Self::U64(value) => value.fmt(f),
            Self::F64(value) => value.fmt(f),
            Self::String(value) => value.fmt(f),
            Self::Timestamp(value) => value.to_rfc3339().fmt(f),
            Self::List(items) => {
                let mut first = true;
                for item in items {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    item.fmt(f)?;
                }
                Ok(())
            }
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_like() {
        assert!(Value::Null.is_empty_like());
        assert!(Value::from("").is_empty_like());
        assert!(Value::List(vec![]).is_empty_like());
        assert!(Value::from(0_i64).is_empty_like());
        assert!(Value::from(0_u64).is_empty_like());

        assert!(!Value::from("x").is_empty_like());
        assert!(!Value::from(vec![1_i64]).is_empty_like());
        assert!(!Value::from(false).is_empty_like());
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(7_i64).to_i64().unwrap(), 7);
        assert_eq!(Value::from("a").into_string().unwrap(), "a");
        assert!(Value::from("a").to_i64().is_err());
        assert_eq!(
            Value::from(vec!["a", "b"]).to_list().unwrap(),
            vec![Value::from("a"), Value::from("b")]
        );
    }

    #[test]
    fn display_joins_lists() {
        let value = Value::from(vec![1_i64, 2, 3]);
        assert_eq!(value.to_string(), "1,2,3");
    }
}
