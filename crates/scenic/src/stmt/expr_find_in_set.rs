use super::*;

/// Tests whether a value appears inside a delimited multi-value column.
///
/// Used for tag/classification columns that pack several keys into one
/// storage column.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFindInSet {
    /// The value to look for.
    pub value: Box<Expr>,

    /// The expression holding the delimited set, usually a column.
    pub set: Box<Expr>,
}

impl Expr {
    pub fn find_in_set(value: impl Into<Self>, set: impl Into<Self>) -> Self {
        ExprFindInSet {
            value: Box::new(value.into()),
            set: Box::new(set.into()),
        }
        .into()
    }
}

impl From<ExprFindInSet> for Expr {
    fn from(value: ExprFindInSet) -> Self {
        Self::FindInSet(value)
    }
}
