use super::{Fields, Input, Resolved};
use crate::scene::Scene;
use crate::stmt::{Assignments, Expr};
use crate::Result;

/// Per-statement working context.
///
/// The field templates are cloned up front; scene dispatch and pipeline
/// execution only ever touch the clones, so a template can serve any number
/// of concurrent builds.
#[derive(Debug)]
pub struct Builder {
    scene: Scene,
    fields: Fields,
    dispatched: bool,
}

/// The artifacts handed to the statement-assembly layer.
#[derive(Debug, Clone, Default)]
pub struct Output {
    /// Ordered write-set, keyed by storage column.
    pub assignments: Assignments,

    /// AND of every participating field's predicate; `None` when no field
    /// contributed one.
    pub filter: Option<Expr>,
}

impl Builder {
    pub fn new(scene: Scene, templates: &Fields) -> Self {
        Self {
            scene,
            fields: templates.clone(),
            dispatched: false,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Supplies the caller's raw input for the named field on this build's
    /// working copy. The template keeps its configured input.
    pub fn input(mut self, name: &str, input: impl Into<Input>) -> Self {
        if let Some(field) = self.fields.get_mut(name) {
            field.set_input(input);
        }
        self
    }

    /// Dispatches the scene and executes both pipelines.
    ///
    /// The first field error aborts the build; errors stay scoped to the
    /// field that produced them.
    pub fn finish(mut self) -> Result<Output> {
        self.dispatch();

        let siblings = self.fields.clone();
        let mut assignments = Assignments::with_capacity(self.fields.len());
        let mut predicates = Vec::new();

        for field in self.fields.iter() {
            if self.scene.writes() {
                match field.resolve_value(&self.scene, &siblings)? {
                    Resolved::Value(value) => assignments.set(field.db_name(), Expr::from(value)),
                    Resolved::Expr(expr) => assignments.set(field.db_name(), expr),
                    Resolved::Absent | Resolved::Shielded => {}
                }
            }

            if self.scene.filters() {
                if let Some(predicate) = field.resolve_where(&siblings)? {
                    predicates.push(predicate);
                }
            }
        }

        let filter = if predicates.is_empty() {
            None
        } else {
            Some(Expr::and_from_vec(predicates))
        };

        Ok(Output {
            assignments,
            filter,
        })
    }

    /// Scene callbacks run exactly once per build, in registration order,
    /// against a snapshot of the pre-dispatch sibling set.
    fn dispatch(&mut self) {
        if self.dispatched {
            return;
        }
        self.dispatched = true;

        let snapshot = self.fields.clone();
        for field in self.fields.iter_mut() {
            field.apply_scene(&self.scene, &snapshot);
        }
    }
}
