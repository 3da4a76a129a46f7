//! Filter-side pipeline steps.
//!
//! These share the [`ValueFn`] type with the value pipeline; each turns a
//! concrete value into a predicate against the field's storage column.
//! Absent, shielded, and already-built expression states pass through.

use super::{Resolved, ValueFn};
use crate::error::TransformError;
use crate::stmt::{Expr, Value};

impl ValueFn {
    /// Substring-match predicate. The empty string yields no predicate;
    /// collections are malformed input.
    pub fn like() -> Self {
        Self::shared(|state, field, _| {
            let value = match state {
                Resolved::Value(value) => value,
                other => return Ok(other),
            };

            match value {
                Value::String(value) if value.is_empty() => Ok(Resolved::Absent),
                Value::List(_) => Err(TransformError::new(
                    field.name(),
                    "substring match needs a scalar, got a list",
                )
                .into()),
                scalar => Ok(Resolved::Expr(Expr::like(
                    Expr::column(field.db_name()),
                    Value::from(format!("%{scalar}%")),
                ))),
            }
        })
    }

    /// Lower-bound predicate (`column >= value`).
    pub fn gte() -> Self {
        Self::compare("lower bound", Expr::ge)
    }

    /// Upper-bound predicate (`column <= value`).
    pub fn lte() -> Self {
        Self::compare("upper bound", Expr::le)
    }

    fn compare(what: &'static str, build: fn(Expr, Expr) -> Expr) -> Self {
        Self::shared(move |state, field, _| {
            let value = match state {
                Resolved::Value(value) => value,
                other => return Ok(other),
            };

            if value.is_list() {
                return Err(TransformError::new(
                    field.name(),
                    format!("{what} needs a scalar, got a list"),
                )
                .into());
            }

            Ok(Resolved::Expr(build(
                Expr::column(field.db_name()),
                Expr::Value(value),
            )))
        })
    }

    /// Membership test inside a delimited multi-value column.
    pub fn find_in_set() -> Self {
        Self::shared(|state, field, _| {
            let value = match state {
                Resolved::Value(value) => value,
                other => return Ok(other),
            };

            if value.is_list() {
                return Err(TransformError::new(
                    field.name(),
                    "set membership needs a scalar, got a list",
                )
                .into());
            }

            Ok(Resolved::Expr(Expr::find_in_set(
                Expr::Value(value),
                Expr::column(field.db_name()),
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, Fields};

    fn run(step: &ValueFn, field: &Field, state: Resolved) -> Resolved {
        step.apply(state, field, &Fields::default()).unwrap()
    }

    fn named(name: &str) -> Field {
        let mut field = Field::new(Value::Null);
        field.set_name(name);
        field
    }

    #[test]
    fn like_wraps_in_wildcards() {
        let field = named("title");
        let resolved = run(&ValueFn::like(), &field, Resolved::value("abc"));
        assert_eq!(
            resolved,
            Resolved::Expr(Expr::like(Expr::column("title"), Value::from("%abc%")))
        );

        assert_eq!(
            run(&ValueFn::like(), &field, Resolved::value("")),
            Resolved::Absent
        );
    }

    #[test]
    fn bounds_build_comparisons() {
        let field = named("created_at");
        assert_eq!(
            run(&ValueFn::gte(), &field, Resolved::value(10_i64)),
            Resolved::Expr(Expr::ge(Expr::column("created_at"), Value::from(10_i64)))
        );
        assert_eq!(
            run(&ValueFn::lte(), &field, Resolved::value(20_i64)),
            Resolved::Expr(Expr::le(Expr::column("created_at"), Value::from(20_i64)))
        );
    }

    #[test]
    fn find_in_set_targets_column() {
        let field = named("tags");
        assert_eq!(
            run(&ValueFn::find_in_set(), &field, Resolved::value("rust")),
            Resolved::Expr(Expr::find_in_set(
                Expr::Value(Value::from("rust")),
                Expr::column("tags")
            ))
        );
    }

    #[test]
    fn lists_are_transform_errors() {
        let field = named("tags");
        let state = Resolved::value(vec!["a", "b"]);
        let err = ValueFn::gte()
            .apply(state, &field, &Fields::default())
            .unwrap_err();
        assert!(err.is_transform());
    }
}
