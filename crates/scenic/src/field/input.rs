use super::{Field, Fields};
use crate::stmt::Value;
use crate::Result;

use std::fmt;
use std::sync::Arc;

/// The raw input backing a field: a literal, or a resolver run against the
/// field and its statement siblings.
#[derive(Clone)]
pub enum Input {
    Value(Value),
    Resolver(Arc<dyn Fn(&Field, &Fields) -> Result<Value> + Send + Sync>),
}

impl Input {
    pub fn resolver(
        resolve: impl Fn(&Field, &Fields) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::Resolver(Arc::new(resolve))
    }

    pub fn resolve(&self, field: &Field, siblings: &Fields) -> Result<Value> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Resolver(resolve) => resolve(field, siblings),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::Value(Value::Null)
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_input_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_input_from!(
    bool,
    i32,
    i64,
    u64,
    f64,
    &str,
    String,
    chrono::DateTime<chrono::Utc>,
);

impl<T> From<Vec<T>> for Input
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Self::Value(items.into())
    }
}

impl<T> From<Option<T>> for Input
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        Self::Value(value.into())
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Resolver(_) => f.write_str("Resolver"),
        }
    }
}
