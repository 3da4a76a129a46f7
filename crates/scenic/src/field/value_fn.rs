use super::{Field, Fields, Resolved};
use crate::error::TransformError;
use crate::stmt::Value;
use crate::Result;

use std::fmt;
use std::sync::Arc;

type Transform = Arc<dyn Fn(Resolved, &Field, &Fields) -> Result<Resolved> + Send + Sync>;

/// Which resolution paths a pipeline step applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Applies when resolving the stored value and when seeding the filter.
    Shared,

    /// Applies to the stored value only; the filter path never sees it.
    DataOnly,
}

/// One transformation step in a value or filter pipeline.
///
/// Steps are ordered and composable; each receives the state produced by
/// its predecessor together with the owning field and the statement's
/// sibling fields.
#[derive(Clone)]
pub struct ValueFn {
    layer: Layer,
    transform: Transform,
}

impl ValueFn {
    pub fn new(
        layer: Layer,
        transform: impl Fn(Resolved, &Field, &Fields) -> Result<Resolved> + Send + Sync + 'static,
    ) -> Self {
        Self {
            layer,
            transform: Arc::new(transform),
        }
    }

    /// A step applying to both the stored value and the filter seed.
    pub fn shared(
        transform: impl Fn(Resolved, &Field, &Fields) -> Result<Resolved> + Send + Sync + 'static,
    ) -> Self {
        Self::new(Layer::Shared, transform)
    }

    /// Executes `transform` but applies its result only to the stored-value
    /// path. Values generated at write time (timestamps, lock tokens) never
    /// reach filter predicates through this step.
    pub fn only_for_data(
        transform: impl Fn(Resolved, &Field, &Fields) -> Result<Resolved> + Send + Sync + 'static,
    ) -> Self {
        Self::new(Layer::DataOnly, transform)
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub(crate) fn apply(
        &self,
        state: Resolved,
        field: &Field,
        siblings: &Fields,
    ) -> Result<Resolved> {
        (self.transform)(state, field, siblings)
    }

    /// The seed step installed by [`Field::new`]: resolves the raw input.
    pub(crate) fn source() -> Self {
        Self::shared(|_, field, siblings| {
            let value = field.input().resolve(field, siblings)?;
            Ok(Resolved::from_value(value))
        })
    }

    /// Removes the field from the written value set unconditionally.
    pub fn shield() -> Self {
        Self::shared(|_, _, _| Ok(Resolved::Shielded))
    }

    /// Removes the field from the written value set while leaving the
    /// filter path untouched.
    pub fn shield_data() -> Self {
        Self::only_for_data(|_, _, _| Ok(Resolved::Shielded))
    }

    /// Replaces a zero/empty-equivalent value with "absent"; downstream
    /// steps and the assembler omit the field.
    pub fn empty2nil() -> Self {
        Self::shared(|state, _, _| match state {
            Resolved::Value(value) if value.is_empty_like() => Ok(Resolved::Absent),
            other => Ok(other),
        })
    }

    /// Passes the state through unchanged. Appended to a filter pipeline,
    /// it makes the resolved value participate in filtering.
    pub fn forward() -> Self {
        Self::shared(|state, _, _| Ok(state))
    }

    /// Normalizes collection inputs for multi-value matching: an empty
    /// collection cancels the field, a singleton collapses to its scalar,
    /// anything larger stays a list. Comma-separated strings count as
    /// collections.
    pub fn format_array() -> Self {
        Self::shared(|state, field, _| {
            let value = match state {
                Resolved::Value(value) => value,
                other => return Ok(other),
            };

            let items = match value {
                Value::List(items) => {
                    if items.iter().any(Value::is_list) {
                        return Err(TransformError::new(
                            field.name(),
                            "nested lists cannot be formatted for membership",
                        )
                        .into());
                    }
                    items
                }
                Value::String(value) if value.contains(',') => value
                    .split(',')
                    .map(|part| Value::from(part.trim()))
                    .collect(),
                scalar => return Ok(Resolved::Value(scalar)),
            };

            Ok(match items.len() {
                0 => Resolved::Absent,
                1 => Resolved::Value(items.into_iter().next().unwrap()),
                _ => Resolved::Value(Value::List(items)),
            })
        })
    }

    /// Preserves an already-present value and only computes a new one when
    /// the current state is empty. First write wins.
    pub fn set_if_empty(
        compute: impl Fn(&Field, &Fields) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::only_for_data(move |state, field, siblings| match state {
            Resolved::Value(value) if !value.is_empty_like() => Ok(Resolved::Value(value)),
            Resolved::Shielded => Ok(Resolved::Shielded),
            Resolved::Expr(expr) => Ok(Resolved::Expr(expr)),
            _ => Ok(Resolved::from_value(compute(field, siblings)?)),
        })
    }
}

impl fmt::Debug for ValueFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFn").field("layer", &self.layer).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Expr;

    fn run(step: &ValueFn, state: Resolved) -> Resolved {
        let field = Field::new(Value::Null);
        let siblings = Fields::default();
        step.apply(state, &field, &siblings).unwrap()
    }

    #[test]
    fn empty2nil_cancels_empty_values() {
        let step = ValueFn::empty2nil();
        assert_eq!(run(&step, Resolved::value("")), Resolved::Absent);
        assert_eq!(run(&step, Resolved::value(0_i64)), Resolved::Absent);
        assert_eq!(
            run(&step, Resolved::value("x")),
            Resolved::Value(Value::from("x"))
        );
        assert_eq!(run(&step, Resolved::Shielded), Resolved::Shielded);
    }

    #[test]
    fn format_array_normalizes() {
        let step = ValueFn::format_array();

        assert_eq!(run(&step, Resolved::value(Vec::<i64>::new())), Resolved::Absent);
        assert_eq!(
            run(&step, Resolved::value(vec![5_i64])),
            Resolved::Value(Value::from(5_i64))
        );
        assert_eq!(
            run(&step, Resolved::value(vec![5_i64, 6])),
            Resolved::Value(Value::from(vec![5_i64, 6]))
        );
        assert_eq!(
            run(&step, Resolved::value("a, b")),
            Resolved::Value(Value::from(vec!["a", "b"]))
        );
        assert_eq!(
            run(&step, Resolved::value("solo")),
            Resolved::Value(Value::from("solo"))
        );
    }

    #[test]
    fn format_array_rejects_nested_lists() {
        let step = ValueFn::format_array();
        let field = Field::new(Value::Null);
        let siblings = Fields::default();

        let nested = Resolved::value(Value::List(vec![Value::List(vec![])]));
        let err = step.apply(nested, &field, &siblings).unwrap_err();
        assert!(err.is_transform());
    }

    #[test]
    fn shield_layers() {
        assert_eq!(ValueFn::shield().layer(), Layer::Shared);
        assert_eq!(ValueFn::shield_data().layer(), Layer::DataOnly);
        assert_eq!(run(&ValueFn::shield(), Resolved::value(1_i64)), Resolved::Shielded);
    }

    #[test]
    fn set_if_empty_keeps_existing() {
        let step = ValueFn::set_if_empty(|_, _| Ok(Value::from("generated")));

        assert_eq!(
            run(&step, Resolved::value("existing")),
            Resolved::Value(Value::from("existing"))
        );
        assert_eq!(
            run(&step, Resolved::Absent),
            Resolved::Value(Value::from("generated"))
        );
        assert_eq!(
            run(&step, Resolved::value("")),
            Resolved::Value(Value::from("generated"))
        );
        assert_eq!(
            run(&step, Resolved::Expr(Expr::null())),
            Resolved::Expr(Expr::null())
        );
    }
}
