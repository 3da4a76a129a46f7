use crate::stmt::Value;

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Declared metadata for one storage column.
#[derive(Debug, Clone)]
pub struct Column {
    /// The storage column name.
    pub name: String,

    /// The declared default value, if any.
    pub default: Option<Value>,

    /// Column comment.
    pub comment: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            comment: String::new(),
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Process-wide column registry.
///
/// Read-mostly: register columns before the first statement build; lookups
/// during builds take the read lock only. Fields defined before a column is
/// registered keep working -- a missing entry is not an error.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    columns: RwLock<HashMap<String, Column>>,
}

impl ColumnRegistry {
    /// The process-wide instance.
    pub fn global() -> &'static ColumnRegistry {
        static GLOBAL: OnceLock<ColumnRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ColumnRegistry::default)
    }

    pub fn register(&self, column: Column) {
        let mut columns = self
            .columns
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        columns.insert(column.name.clone(), column);
    }

    pub fn lookup(&self, name: &str) -> Option<Column> {
        let columns = self
            .columns
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        columns.get(name).cloned()
    }

    /// The declared default for a column; `None` when the column was never
    /// registered.
    pub fn lookup_default(&self, name: &str) -> Option<Value> {
        self.lookup(name).and_then(|column| column.default)
    }
}
