mod transform;
mod validation;

pub use transform::TransformError;
pub use validation::{ValidationError, Violation};

use std::sync::Arc;

/// Returns early with an ad-hoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while resolving a field's value or filter.
///
/// Errors are scoped to the field whose pipeline produced them; whether one
/// field's failure aborts the whole statement build is the assembly layer's
/// decision.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// A schema constraint was violated by a concrete value.
    Validation(ValidationError),

    /// A pipeline step failed to transform its input.
    Transform(TransformError),

    /// Everything else.
    Adhoc(anyhow::Error),
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        Self::new(ErrorKind::Adhoc(anyhow::anyhow!("{args}")))
    }

    pub fn is_validation(&self) -> bool {
        matches!(*self.inner, ErrorKind::Validation(_))
    }

    pub fn is_transform(&self) -> bool {
        matches!(*self.inner, ErrorKind::Transform(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match &*self.inner {
            ErrorKind::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<&TransformError> {
        match &*self.inner {
            ErrorKind::Transform(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &*self.inner {
            ErrorKind::Validation(err) => err.fmt(f),
            ErrorKind::Transform(err) => err.fmt(f),
            ErrorKind::Adhoc(err) => err.fmt(f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.inner, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Validation(err) => Some(err),
            ErrorKind::Transform(err) => Some(err),
            ErrorKind::Adhoc(err) => Some(err.as_ref()),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Self::new(ErrorKind::Validation(value))
    }
}

impl From<TransformError> for Error {
    fn from(value: TransformError) -> Self {
        Self::new(ErrorKind::Transform(value))
    }
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Self::new(ErrorKind::Adhoc(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_accessors() {
        let err: Error = ValidationError::new("id", Violation::Required).into();
        assert!(err.is_validation());
        assert!(!err.is_transform());
        assert_eq!(err.as_validation().unwrap().field, "id");

        let err: Error = TransformError::new("tags", "not a scalar").into();
        assert!(err.is_transform());
        assert!(err.as_validation().is_none());

        let err = crate::err!("boom: {}", 42);
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "boom: 42");
    }

    #[test]
    fn display_carries_field_name() {
        let err: Error = ValidationError::new("email", Violation::Required).into();
        assert!(err.to_string().contains("email"));
    }
}
