use chrono::{DateTime, Utc};

use crate::stmt::Value;

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Timestamp(value) => Ok(value),
            _ => Err(crate::err!("value is not of type DateTime<Utc>")),
        }
    }
}
