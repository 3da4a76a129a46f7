use super::Expr;

/// A reference to a storage column by name.
///
/// Columns are referenced by their storage name rather than a resolved
/// index; this core owns no table metadata beyond the field definitions
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprColumn {
    /// The storage column name.
    pub name: String,
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        ExprColumn { name: name.into() }.into()
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl core::fmt::Display for ExprColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.name.fmt(f)
    }
}
