use super::Expr;

use indexmap::IndexMap;
use std::ops;

/// The ordered write-set produced by a statement build.
///
/// Keys are storage column names; insertion order is preserved so the
/// assembly layer renders columns in field-declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignments {
    assignments: IndexMap<String, Expr>,
}

impl Assignments {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            assignments: IndexMap::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.assignments.contains_key(column)
    }

    pub fn get(&self, column: &str) -> Option<&Expr> {
        self.assignments.get(column)
    }

    /// Set a column, replacing any current assignment.
    pub fn set(&mut self, column: impl Into<String>, expr: impl Into<Expr>) {
        self.assignments.insert(column.into(), expr.into());
    }

    pub fn unset(&mut self, column: &str) {
        self.assignments.shift_remove(column);
    }

    pub fn take(&mut self, column: &str) -> Option<Expr> {
        self.assignments.shift_remove(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.assignments.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> + '_ {
        self.assignments
            .iter()
            .map(|(column, expr)| (column.as_str(), expr))
    }
}

impl IntoIterator for Assignments {
    type Item = (String, Expr);

    type IntoIter = indexmap::map::IntoIter<String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

impl ops::Index<&str> for Assignments {
    type Output = Expr;

    fn index(&self, column: &str) -> &Self::Output {
        match self.assignments.get(column) {
            Some(ret) => ret,
            None => panic!("no assignment for column `{column}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Value;

    #[test]
    fn preserves_insertion_order() {
        let mut assignments = Assignments::default();
        assignments.set("b", Value::from(1_i64));
        assignments.set("a", Value::from(2_i64));
        assignments.set("c", Value::from(3_i64));
        assignments.unset("a");

        let columns: Vec<_> = assignments.columns().collect();
        assert_eq!(columns, ["b", "c"]);
    }

    #[test]
    fn set_replaces() {
        let mut assignments = Assignments::default();
        assignments.set("a", Value::from(1_i64));
        assignments.set("a", Value::from(2_i64));

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments["a"], Expr::Value(Value::from(2_i64)));
    }
}
