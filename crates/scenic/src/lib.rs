mod error;
pub use error::{Error, TransformError, ValidationError, Violation};

pub mod field;
pub use field::{Builder, Field, Fields, ValueFn};

pub mod protocol;

pub mod registry;

pub mod scene;
pub use scene::Scene;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses Scenic's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
