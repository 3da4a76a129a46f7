//! Optimistic locking through pipeline composition.
//!
//! The token column is rewritten on every write; a caller presenting the
//! token it last read gets an equality precondition on Update, so the
//! write applies only if nobody else won the race. No locking primitive
//! exists beyond the predicate itself.

use chrono::Utc;

use crate::field::{Field, Resolved, ValueFn};

use std::sync::atomic::{AtomicI64, Ordering};

/// A fresh lock token: wall-clock nanoseconds, clamped strictly above the
/// previously issued token so interleaved writers never collide.
pub fn next_token() -> i64 {
    static LAST: AtomicI64 = AtomicI64::new(0);

    let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
    let prev = match LAST.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
        Some(prev.saturating_add(1).max(now))
    }) {
        Ok(prev) | Err(prev) => prev,
    };
    prev.saturating_add(1).max(now)
}

/// Configures `field` as an optimistic-lock token.
///
/// The value pipeline regenerates the token for every write regardless of
/// caller input; the caller-supplied value matters only as the Update
/// precondition, and an empty one yields no precondition at all.
pub fn version(field: &mut Field) -> &mut Field {
    field.value_fns.append(ValueFn::only_for_data(|_, _, _| {
        Ok(Resolved::value(next_token()))
    }));

    field.scene_update(|f, _| {
        f.where_fns.append(ValueFn::empty2nil());
    });

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Builder, Fields};
    use crate::scene::Scene;
    use crate::schema::Schema;
    use crate::stmt::{Expr, Type, Value};

    fn version_field() -> Field {
        let mut field = Field::new(Value::Null);
        field
            .set_name("version")
            .merge_schema(Schema::new(Type::I64));
        version(&mut field);
        field
    }

    fn written_token(output: &crate::field::Output) -> i64 {
        match output.assignments.get("version") {
            Some(Expr::Value(Value::I64(token))) => *token,
            other => panic!("expected a regenerated token; got {other:?}"),
        }
    }

    #[test]
    fn tokens_are_strictly_increasing() {
        let mut last = next_token();
        for _ in 0..1_000 {
            let token = next_token();
            assert!(token > last);
            last = token;
        }
    }

    #[test]
    fn every_write_regenerates_the_token() {
        let templates = Fields::default().with(version_field());

        let first = Builder::new(Scene::Update, &templates)
            .input("version", 7_i64)
            .finish()
            .unwrap();
        let second = Builder::new(Scene::Update, &templates)
            .input("version", 7_i64)
            .finish()
            .unwrap();

        assert_ne!(written_token(&first), written_token(&second));
    }

    #[test]
    fn caller_token_becomes_the_precondition() {
        let templates = Fields::default().with(version_field());

        let output = Builder::new(Scene::Update, &templates)
            .input("version", 7_i64)
            .finish()
            .unwrap();

        assert_eq!(
            output.filter,
            Some(Expr::eq(Expr::column("version"), Value::from(7_i64)))
        );
        // the regenerated token is in the write-set, not the filter
        assert_ne!(written_token(&output), 7);
    }

    #[test]
    fn empty_token_means_no_precondition() {
        let templates = Fields::default().with(version_field());

        let output = Builder::new(Scene::Update, &templates).finish().unwrap();

        assert_eq!(output.filter, None);
        // the write still happens
        assert!(output.assignments.contains("version"));
    }

    #[test]
    fn token_stays_out_of_select_filters() {
        let templates = Fields::default().with(version_field());

        let output = Builder::new(Scene::Select, &templates)
            .input("version", 7_i64)
            .finish()
            .unwrap();

        assert_eq!(output.filter, None);
    }
}
