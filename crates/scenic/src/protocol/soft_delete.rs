//! Soft delete: a logical delete executed as an update statement.
//!
//! Two variants. The marker variant stamps a timestamp column and hides it
//! from normal writes entirely. The status variant uses a user-visible
//! status column: inserts populate it (falling back to the registered
//! column default), and "not deleted" becomes an inequality against the
//! deleted key.

use chrono::Utc;

use crate::field::{Field, Fields, Resolved, ValueFn};
use crate::registry::ColumnRegistry;
use crate::stmt::{Expr, Value};

/// Configures `field` as a timestamp soft-delete marker.
///
/// Insert and Update never write the marker. Select filters to rows whose
/// marker is null. Delete replaces both pipelines wholesale: the value
/// becomes the deletion timestamp, the filter becomes the same "not
/// deleted" predicate.
pub fn marker(field: &mut Field) -> &mut Field {
    field.value_fns.append(ValueFn::shield_data());

    field.scene_select(|f, _| {
        f.where_fns.append(not_deleted_null());
    });

    field.scene_delete(|f, _| {
        f.value_fns.reset(ValueFn::only_for_data(|_, _, _| {
            Ok(Resolved::Value(Value::Timestamp(Utc::now())))
        }));
        f.where_fns.reset(not_deleted_null());
    });

    field
}

/// Configures `field` as a status-column soft delete with the given
/// deleted key.
///
/// Rows are live unless `status == deleted_key`. The column is
/// user-visible, so Insert resolves an absent value from the Column
/// Registry's declared default instead of shielding the write.
pub fn status(field: &mut Field, deleted_key: impl Into<Value>) -> &mut Field {
    let deleted = deleted_key.into();

    field.scene_insert(|f, _| {
        f.value_fns.append(ValueFn::set_if_empty(|f, _| {
            Ok(ColumnRegistry::global()
                .lookup_default(f.db_name())
                .unwrap_or(Value::Null))
        }));
    });

    let select_key = deleted.clone();
    field.scene_select(move |f, _| {
        f.where_fns.append(not_deleted_ne(select_key.clone()));
    });

    field.scene_delete(move |f, _| {
        let written = deleted.clone();
        f.value_fns.reset(ValueFn::only_for_data(move |_, _, _| {
            Ok(Resolved::Value(written.clone()))
        }));
        f.where_fns.reset(not_deleted_ne(deleted.clone()));
    });

    field
}

/// "Not deleted" for marker columns: `column IS NULL`.
///
/// An explicit caller-supplied value takes precedence over the synthetic
/// predicate, and a sibling field claiming the same storage column with its
/// own value silences this one entirely.
fn not_deleted_null() -> ValueFn {
    ValueFn::shared(|state, field, siblings| {
        match &state {
            Resolved::Value(value) if !value.is_empty_like() => return Ok(state),
            Resolved::Expr(_) => return Ok(state),
            _ => {}
        }

        if column_claimed_by_sibling(field, siblings) {
            return Ok(Resolved::Shielded);
        }

        Ok(Resolved::Expr(Expr::is_null(Expr::column(field.db_name()))))
    })
}

/// "Not deleted" for status columns: `column != deleted_key`, with the same
/// precedence rules as [`not_deleted_null`].
fn not_deleted_ne(deleted: Value) -> ValueFn {
    ValueFn::shared(move |state, field, siblings| {
        match &state {
            Resolved::Value(value) if !value.is_empty_like() => return Ok(state),
            Resolved::Expr(_) => return Ok(state),
            _ => {}
        }

        if column_claimed_by_sibling(field, siblings) {
            return Ok(Resolved::Shielded);
        }

        Ok(Resolved::Expr(Expr::ne(
            Expr::column(field.db_name()),
            deleted.clone(),
        )))
    })
}

/// Whether another field in the statement maps to the same storage column
/// and carries an explicit caller value. Silently deferring to it avoids a
/// duplicate, conflicting delete-filter.
fn column_claimed_by_sibling(field: &Field, siblings: &Fields) -> bool {
    siblings
        .by_column(field.db_name())
        .filter(|sibling| sibling.name() != field.name())
        .any(|sibling| {
            sibling
                .input_value(siblings)
                .map(|value| !value.is_empty_like())
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Builder, Fields};
    use crate::registry::Column;
    use crate::scene::Scene;
    use crate::schema::{Enum, Schema};
    use crate::stmt::Type;

    fn deleted_at() -> Field {
        let mut field = Field::new(Value::Null);
        field
            .set_name("deletedAt")
            .set_db_name("deleted_at")
            .merge_schema(Schema::new(Type::Timestamp));
        marker(&mut field);
        field
    }

    fn status_field(db_name: &str) -> Field {
        let mut field = Field::new(Value::Null);
        field
            .set_name("status")
            .set_db_name(db_name)
            .merge_schema(Schema::new(Type::I64))
            .append_enum(Enum::new(1_i64, "active"))
            .append_enum(Enum::new(0_i64, "deleted"));
        status(&mut field, 0_i64);
        field
    }

    #[test]
    fn marker_never_written_on_insert_or_update() {
        let templates = Fields::default().with(deleted_at());

        let output = Builder::new(Scene::Insert, &templates).finish().unwrap();
        assert!(output.assignments.is_empty());

        let output = Builder::new(Scene::Update, &templates).finish().unwrap();
        assert!(output.assignments.is_empty());
    }

    #[test]
    fn marker_select_filters_live_rows() {
        let templates = Fields::default().with(deleted_at());

        let output = Builder::new(Scene::Select, &templates).finish().unwrap();
        assert_eq!(
            output.filter,
            Some(Expr::is_null(Expr::column("deleted_at")))
        );
    }

    #[test]
    fn marker_delete_stamps_and_filters() {
        let templates = Fields::default().with(deleted_at());

        let output = Builder::new(Scene::Delete, &templates).finish().unwrap();

        // the deletion-effective value is always produced
        match output.assignments.get("deleted_at") {
            Some(Expr::Value(Value::Timestamp(_))) => {}
            other => panic!("expected a timestamp write; got {other:?}"),
        }
        // and the filter only touches rows that are not already deleted
        assert_eq!(
            output.filter,
            Some(Expr::is_null(Expr::column("deleted_at")))
        );
    }

    #[test]
    fn status_insert_falls_back_to_registry_default() {
        ColumnRegistry::global()
            .register(Column::new("sd_status_with_default").with_default(1_i64));

        let templates = Fields::default().with(status_field("sd_status_with_default"));
        let output = Builder::new(Scene::Insert, &templates).finish().unwrap();
        assert_eq!(
            output.assignments.get("sd_status_with_default"),
            Some(&Expr::Value(Value::from(1_i64)))
        );

        // explicit caller value wins over the default
        let output = Builder::new(Scene::Insert, &templates)
            .input("status", 0_i64)
            .finish()
            .unwrap();
        assert_eq!(
            output.assignments.get("sd_status_with_default"),
            Some(&Expr::Value(Value::from(0_i64)))
        );
    }

    #[test]
    fn status_insert_absent_when_unregistered() {
        let templates = Fields::default().with(status_field("sd_status_unregistered"));

        let output = Builder::new(Scene::Insert, &templates).finish().unwrap();
        assert!(output.assignments.is_empty());
    }

    #[test]
    fn status_select_synthesizes_not_deleted() {
        let templates = Fields::default().with(status_field("status"));

        let output = Builder::new(Scene::Select, &templates).finish().unwrap();
        assert_eq!(
            output.filter,
            Some(Expr::ne(Expr::column("status"), Value::from(0_i64)))
        );

        // an explicit status filter takes precedence
        let output = Builder::new(Scene::Select, &templates)
            .input("status", 1_i64)
            .finish()
            .unwrap();
        assert_eq!(
            output.filter,
            Some(Expr::eq(Expr::column("status"), Value::from(1_i64)))
        );
    }

    #[test]
    fn status_delete_is_an_update_to_the_deleted_key() {
        let templates = Fields::default().with(status_field("status"));

        let output = Builder::new(Scene::Delete, &templates).finish().unwrap();
        assert_eq!(
            output.assignments.get("status"),
            Some(&Expr::Value(Value::from(0_i64)))
        );
        assert_eq!(
            output.filter,
            Some(Expr::ne(Expr::column("status"), Value::from(0_i64)))
        );
    }

    #[test]
    fn duplicate_marker_defers_to_explicit_sibling() {
        // a second field mapped to the same column, carrying an explicit
        // caller filter
        let mut explicit = Field::new(1_i64);
        explicit.set_name("statusFilter").set_db_name("status");
        explicit.scene_select(|f, _| {
            f.where_fns.append(ValueFn::empty2nil());
        });

        let templates = Fields::default()
            .with(status_field("status"))
            .with(explicit);

        let output = Builder::new(Scene::Select, &templates).finish().unwrap();

        // the synthetic not-deleted predicate is skipped, not duplicated;
        // only the explicit filter survives
        assert_eq!(
            output.filter,
            Some(Expr::eq(Expr::column("status"), Value::from(1_i64)))
        );
    }
}
