mod enums;
pub use enums::{Enum, Enums};

mod validate;

use crate::stmt::Type;

/// Static validation and description metadata for a field.
///
/// Constraints only apply to values of the matching type; a `maximum` on a
/// string field is inert. Nothing here is checked at configuration time --
/// validation runs when a pipeline resolves a concrete value.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// The type values must match. `Unknown` skips the check.
    pub ty: Type,

    /// Maximum length for string values, in characters.
    pub max_length: Option<u64>,

    /// Inclusive lower bound for numeric values.
    pub minimum: Option<i64>,

    /// Inclusive upper bound for numeric values.
    pub maximum: Option<i64>,

    /// A concrete value must be produced.
    pub required: bool,

    /// Part of the primary key.
    pub primary: bool,

    /// Populated by the storage engine on insert.
    pub auto_increment: bool,

    /// Exclude the field's value from Update write-sets.
    pub shield_update: bool,

    /// Pattern string values must fully match.
    pub regexp: Option<String>,

    /// Free-form format tag (`email`, `phone`, ...) consumed by catalogs.
    pub format: Option<String>,

    /// Admissible values; empty means unconstrained.
    pub enums: Enums,

    /// Column comment.
    pub comment: String,
}

impl Schema {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    /// Field-wise override merge: an attribute the other schema sets wins,
    /// except `enums`, which appends.
    ///
    /// "Set" means `Some` for options, non-`Unknown` for the type, `true`
    /// for flags, and non-empty for strings. A conflicting type is not an
    /// error; the last merge wins.
    pub fn merge(&mut self, other: Schema) -> &mut Self {
        if !other.ty.is_unknown() {
            self.ty = other.ty;
        }
        if other.max_length.is_some() {
            self.max_length = other.max_length;
        }
        if other.minimum.is_some() {
            self.minimum = other.minimum;
        }
        if other.maximum.is_some() {
            self.maximum = other.maximum;
        }
        if other.required {
            self.required = true;
        }
        if other.primary {
            self.primary = true;
        }
        if other.auto_increment {
            self.auto_increment = true;
        }
        if other.shield_update {
            self.shield_update = true;
        }
        if other.regexp.is_some() {
            self.regexp = other.regexp;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if !other.comment.is_empty() {
            self.comment = other.comment;
        }
        self.enums.append(other.enums);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Value;

    #[test]
    fn merge_overrides_set_attributes() {
        let mut schema = Schema {
            ty: Type::String,
            max_length: Some(32),
            comment: "original".to_string(),
            ..Schema::default()
        };

        schema.merge(Schema {
            ty: Type::I64,
            minimum: Some(1),
            required: true,
            ..Schema::default()
        });

        assert_eq!(schema.ty, Type::I64);
        assert_eq!(schema.max_length, Some(32));
        assert_eq!(schema.minimum, Some(1));
        assert!(schema.required);
        assert_eq!(schema.comment, "original");
    }

    #[test]
    fn merge_appends_enums() {
        let mut schema = Schema::default();
        schema.enums.append([Enum::new(1_i64, "active")]);

        let mut other = Schema::default();
        other.enums.append([Enum::new(0_i64, "deleted")]);

        schema.merge(other);
        assert_eq!(schema.enums.len(), 2);
        assert!(schema.enums.contains_key(&Value::from(0_i64)));
        assert!(schema.enums.contains_key(&Value::from(1_i64)));
    }
}
