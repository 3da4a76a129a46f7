/// A pipeline step failed while transforming a field's input.
///
/// Aborts the remaining steps for that field only; sibling fields keep
/// resolving.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformError {
    /// Name of the field whose pipeline failed.
    pub field: String,

    /// What went wrong.
    pub detail: String,
}

impl TransformError {
    pub fn new(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl std::error::Error for TransformError {}

impl core::fmt::Display for TransformError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "transform failed for field `{}`: {}", self.field, self.detail)
    }
}
