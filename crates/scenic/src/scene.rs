use crate::field::{Field, Fields};

use std::fmt;
use std::sync::Arc;

/// The CRUD phase a statement is being assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Scene {
    Insert,
    Update,
    Select,
    Delete,

    /// An application-defined phase outside the standard four.
    Custom(&'static str),
}

impl Scene {
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert)
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update)
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select)
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }

    /// Scenes that contribute a write-set.
    pub(crate) fn writes(&self) -> bool {
        !self.is_select()
    }

    /// Scenes that contribute filter predicates.
    pub(crate) fn filters(&self) -> bool {
        !self.is_insert()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => "insert".fmt(f),
            Self::Update => "update".fmt(f),
            Self::Select => "select".fmt(f),
            Self::Delete => "delete".fmt(f),
            Self::Custom(tag) => tag.fmt(f),
        }
    }
}

/// A pipeline mutation bound to a scene.
///
/// Registered at field-construction time and run exactly once per statement
/// build, in registration order, before the pipelines execute.
#[derive(Clone)]
pub struct SceneFn {
    /// The scene this mutation fires for.
    pub scene: Scene,

    apply: Arc<dyn Fn(&mut Field, &Fields) + Send + Sync>,
}

impl SceneFn {
    pub fn new(scene: Scene, apply: impl Fn(&mut Field, &Fields) + Send + Sync + 'static) -> Self {
        Self {
            scene,
            apply: Arc::new(apply),
        }
    }

    pub(crate) fn apply(&self, field: &mut Field, siblings: &Fields) {
        (self.apply)(field, siblings);
    }
}

impl fmt::Debug for SceneFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneFn").field("scene", &self.scene).finish()
    }
}
