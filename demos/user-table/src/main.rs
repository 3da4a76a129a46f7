//! A hand-rolled field catalog for one `user` table, built for every scene.
//!
//! This is the caller side of the core: each factory wires identity,
//! schema, base pipelines, and scene callbacks once, and statement builds
//! reuse the resulting templates.

use chrono::Utc;

use scenic::protocol::{lock, soft_delete};
use scenic::registry::{Column, ColumnRegistry};
use scenic::schema::{Enum, Schema};
use scenic::stmt::{Type, Value};
use scenic::{Builder, Field, Fields, Scene, ValueFn};

/// Auto-increment primary key: never written, a required filter key at
/// Update, an array-aware optional filter at Select.
fn auto_id() -> Field {
    let mut field = Field::new(Value::Null);
    field.set_name("id").set_title("ID").merge_schema(Schema {
        ty: Type::I64,
        primary: true,
        auto_increment: true,
        ..Schema::default()
    });

    field.scene_insert(|f, _| {
        f.value_fns.append(ValueFn::shield());
    });
    field.scene_update(|f, _| {
        f.shield_update(true).set_required(true);
        f.where_fns.append(ValueFn::format_array());
        f.merge_schema(Schema {
            minimum: Some(1),
            ..Schema::default()
        });
    });
    field.scene_select(|f, _| {
        f.where_fns.append(ValueFn::empty2nil());
        f.where_fns.append(ValueFn::format_array());
    });
    field.scene_delete(|f, _| {
        f.set_required(true);
        f.value_fns.append(ValueFn::shield_data());
        f.where_fns.append(ValueFn::format_array());
    });
    field
}

fn user_name() -> Field {
    let mut field = Field::new(Value::Null);
    field
        .set_name("name")
        .set_title("Name")
        .set_required(true)
        .merge_schema(Schema {
            ty: Type::String,
            max_length: Some(64),
            ..Schema::default()
        });

    field.scene_select(|f, _| {
        f.set_required(false);
        f.where_fns.append(ValueFn::empty2nil());
        f.where_fns.append(ValueFn::like());
    });
    field
}

fn email() -> Field {
    let mut field = Field::new(Value::Null);
    field
        .set_name("email")
        .set_title("Email")
        .merge_schema(Schema {
            ty: Type::String,
            max_length: Some(254),
            regexp: Some(r"[^@\s]+@[^@\s]+\.[^@\s]+".to_string()),
            format: Some("email".to_string()),
            ..Schema::default()
        });

    field.scene_select(|f, _| {
        f.where_fns.append(ValueFn::empty2nil());
    });
    field
}

/// First write wins; later updates never touch it.
fn created_at() -> Field {
    let mut field = Field::new(Value::Null);
    field
        .set_name("createdAt")
        .set_db_name("created_at")
        .set_title("Created")
        .merge_schema(Schema::new(Type::Timestamp));

    field.scene_insert(|f, _| {
        f.value_fns
            .append(ValueFn::set_if_empty(|_, _| Ok(Value::Timestamp(Utc::now()))));
    });
    field.scene_update(|f, _| {
        f.shield_update(true);
    });
    field
}

/// Range filter over `created_at`; structural, never written.
fn created_after() -> Field {
    let mut field = Field::new(Value::Null);
    field
        .set_name("createdAfter")
        .set_db_name("created_at")
        .merge_schema(Schema::new(Type::Timestamp));

    field.value_fns.append(ValueFn::shield());
    field.scene_select(|f, _| {
        f.where_fns.append(ValueFn::empty2nil());
        f.where_fns.append(ValueFn::gte());
    });
    field
}

fn status() -> Field {
    let mut field = Field::new(Value::Null);
    field
        .set_name("status")
        .set_title("Status")
        .merge_schema(Schema::new(Type::I64))
        .append_enum(Enum::new(1_i64, "active"))
        .append_enum(Enum::new(0_i64, "deleted"));
    soft_delete::status(&mut field, 0_i64);
    field
}

fn version() -> Field {
    let mut field = Field::new(Value::Null);
    field
        .set_name("version")
        .set_title("Version")
        .merge_schema(Schema::new(Type::I64));
    lock::version(&mut field);
    field
}

/// Pagination parameter: structural, contributes neither value nor filter.
fn page_index() -> Field {
    let mut field = Field::new(1_i64);
    field.set_name("pageIndex");
    field.value_fns.append(ValueFn::shield());
    field.scene_select(|f, _| {
        f.where_fns.clear();
    });
    field
}

fn user_fields() -> Fields {
    Fields::default()
        .with(auto_id())
        .with(user_name())
        .with(email())
        .with(created_at())
        .with(created_after())
        .with(status())
        .with(version())
        .with(page_index())
}

fn main() -> scenic::Result<()> {
    ColumnRegistry::global().register(
        Column::new("status")
            .with_default(1_i64)
            .with_comment("1 active, 0 deleted"),
    );

    let templates = user_fields();

    let insert = Builder::new(Scene::Insert, &templates)
        .input("name", "Ada Lovelace")
        .input("email", "ada@example.com")
        .finish()?;
    println!("insert:\n  set    {:?}\n  where  {:?}", insert.assignments, insert.filter);

    let select = Builder::new(Scene::Select, &templates)
        .input("id", vec![3_i64, 5, 8])
        .input("name", "Ada")
        .input("pageIndex", 2_i64)
        .finish()?;
    println!("select:\n  set    {:?}\n  where  {:?}", select.assignments, select.filter);

    let update = Builder::new(Scene::Update, &templates)
        .input("id", 5_i64)
        .input("name", "Ada K. Lovelace")
        .input("version", 1_722_000_000_000_000_000_i64)
        .finish()?;
    println!("update:\n  set    {:?}\n  where  {:?}", update.assignments, update.filter);

    let delete = Builder::new(Scene::Delete, &templates)
        .input("id", 5_i64)
        .finish()?;
    println!("delete:\n  set    {:?}\n  where  {:?}", delete.assignments, delete.filter);

    Ok(())
}
