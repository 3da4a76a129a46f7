mod build;
pub use build::{Builder, Output};

mod fields;
pub use fields::Fields;

mod input;
pub use input::Input;

mod pipeline;
pub use pipeline::Pipeline;

mod resolved;
pub use resolved::Resolved;

mod value_fn;
pub use value_fn::{Layer, ValueFn};

mod where_fn;

use crate::error::{ValidationError, Violation};
use crate::scene::{Scene, SceneFn};
use crate::schema::{Enum, Schema};
use crate::stmt::{Expr, Value};
use crate::Result;

/// One named column's schema and behavior across all CRUD scenes.
///
/// A factory configures a field once -- identity, schema, base pipelines,
/// scene callbacks -- and the result is an immutable template. Statement
/// builds clone the template, fire the callbacks registered for their scene,
/// then execute the pipelines; scene-induced mutation never leaks back.
#[derive(Clone, Debug, Default)]
pub struct Field {
    name: String,
    db_name: Option<String>,
    title: String,
    tag: String,
    input: Input,

    /// Validation and description metadata.
    pub schema: Schema,

    /// Steps producing the stored value, or omitting the field.
    pub value_fns: Pipeline<ValueFn>,

    /// Steps producing the filter predicate. An empty pipeline means the
    /// field does not participate in filtering.
    pub where_fns: Pipeline<ValueFn>,

    scene_fns: Vec<SceneFn>,
}

impl Field {
    /// Creates a field whose value pipeline starts by resolving `input`.
    pub fn new(input: impl Into<Input>) -> Self {
        let mut field = Self {
            input: input.into(),
            ..Self::default()
        };
        field.value_fns.append(ValueFn::source());
        field
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The storage column name; falls back to the field name.
    pub fn db_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(&self.name)
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = tag.into();
        self
    }

    pub fn set_db_name(&mut self, db_name: impl Into<String>) -> &mut Self {
        self.db_name = Some(db_name.into());
        self
    }

    /// Replaces the raw input; used by builds to supply per-statement
    /// caller values on a cloned template.
    pub fn set_input(&mut self, input: impl Into<Input>) -> &mut Self {
        self.input = input.into();
        self
    }

    pub fn merge_schema(&mut self, other: Schema) -> &mut Self {
        self.schema.merge(other);
        self
    }

    pub fn append_enum(&mut self, item: Enum) -> &mut Self {
        self.schema.enums.append([item]);
        self
    }

    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.schema.required = required;
        self
    }

    pub fn shield_update(&mut self, shield: bool) -> &mut Self {
        self.schema.shield_update = shield;
        self
    }

    /// Registers a pipeline mutation for `scene`.
    pub fn scene(
        &mut self,
        scene: Scene,
        apply: impl Fn(&mut Field, &Fields) + Send + Sync + 'static,
    ) -> &mut Self {
        self.scene_fns.push(SceneFn::new(scene, apply));
        self
    }

    pub fn scene_insert(
        &mut self,
        apply: impl Fn(&mut Field, &Fields) + Send + Sync + 'static,
    ) -> &mut Self {
        self.scene(Scene::Insert, apply)
    }

    pub fn scene_update(
        &mut self,
        apply: impl Fn(&mut Field, &Fields) + Send + Sync + 'static,
    ) -> &mut Self {
        self.scene(Scene::Update, apply)
    }

    pub fn scene_select(
        &mut self,
        apply: impl Fn(&mut Field, &Fields) + Send + Sync + 'static,
    ) -> &mut Self {
        self.scene(Scene::Select, apply)
    }

    pub fn scene_delete(
        &mut self,
        apply: impl Fn(&mut Field, &Fields) + Send + Sync + 'static,
    ) -> &mut Self {
        self.scene(Scene::Delete, apply)
    }

    /// Runs the callbacks registered for `scene`, in registration order.
    /// Callbacks for other scenes do not fire; an unregistered scene is a
    /// no-op.
    pub fn apply_scene(&mut self, scene: &Scene, siblings: &Fields) {
        let scene_fns = self.scene_fns.clone();
        for scene_fn in scene_fns.iter().filter(|scene_fn| scene_fn.scene == *scene) {
            scene_fn.apply(self, siblings);
        }
    }

    /// Resolves the raw input without running any pipeline.
    pub fn input_value(&self, siblings: &Fields) -> Result<Value> {
        self.input.resolve(self, siblings)
    }

    /// Runs the value pipeline, producing the stored value for a write
    /// scene.
    ///
    /// `required` binds here at Insert only: a row must be created
    /// complete, while an absent value on Update or Delete just leaves the
    /// column untouched.
    pub fn resolve_value(&self, scene: &Scene, siblings: &Fields) -> Result<Resolved> {
        let mut state = Resolved::Absent;
        for step in self.value_fns.iter() {
            state = step.apply(state, self, siblings)?;
        }

        if scene.is_update() && self.schema.shield_update {
            state = Resolved::Shielded;
        }

        match &state {
            Resolved::Absent if scene.is_insert() && self.schema.required => {
                Err(ValidationError::new(self.name(), Violation::Required).into())
            }
            Resolved::Value(value) => {
                self.schema.validate(self.name(), value)?;
                Ok(state)
            }
            _ => Ok(state),
        }
    }

    /// Runs the filter pipeline, producing this field's predicate for a
    /// filtering scene.
    ///
    /// The pipeline is seeded by the shared-layer value steps, so a value
    /// resolved for writing is visible here unless it was produced by an
    /// `only_for_data` step.
    pub fn resolve_where(&self, siblings: &Fields) -> Result<Option<Expr>> {
        if self.where_fns.is_empty() {
            return Ok(None);
        }

        let mut state = Resolved::Absent;
        for step in self.value_fns.iter().filter(|step| step.layer() == Layer::Shared) {
            state = step.apply(state, self, siblings)?;
        }
        for step in self.where_fns.iter() {
            state = step.apply(state, self, siblings)?;
        }

        match state {
            Resolved::Absent if self.schema.required => {
                Err(ValidationError::new(self.name(), Violation::Required).into())
            }
            Resolved::Absent | Resolved::Shielded => Ok(None),
            Resolved::Value(value) => {
                self.schema.validate(self.name(), &value)?;
                Ok(Some(self.render_predicate(value)))
            }
            Resolved::Expr(expr) => Ok(Some(expr)),
        }
    }

    /// Standard rendering: scalars compare for equality, lists become
    /// membership tests.
    fn render_predicate(&self, value: Value) -> Expr {
        let column = Expr::column(self.db_name());
        match value {
            Value::List(items) => Expr::in_list(column, Value::List(items)),
            scalar => Expr::eq(column, scalar),
        }
    }
}
