use regex::Regex;

use super::Schema;
use crate::error::{ValidationError, Violation};
use crate::stmt::Value;

impl Schema {
    /// Validates a concrete value against the schema constraints.
    ///
    /// List values validate element-wise. Null is admissible here;
    /// required-but-absent is the pipeline's concern, not the schema's.
    pub fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        if let Value::List(items) = value {
            for item in items {
                self.validate(field, item)?;
            }
            return Ok(());
        }

        if value.is_null() {
            return Ok(());
        }

        if !self.ty.matches(value) {
            return Err(ValidationError::new(
                field,
                Violation::TypeMismatch {
                    expected: self.ty,
                    actual: value.type_name(),
                },
            ));
        }

        match value {
            Value::String(value) => self.validate_string(field, value)?,
            Value::I64(value) => self.validate_bounds(field, *value as i128)?,
            Value::U64(value) => self.validate_bounds(field, *value as i128)?,
            Value::F64(value) => self.validate_float(field, *value)?,
            _ => {}
        }

        if !self.enums.is_empty() && !self.enums.contains_key(value) {
            return Err(ValidationError::new(field, Violation::NotInEnums));
        }

        Ok(())
    }

    fn validate_string(&self, field: &str, value: &str) -> Result<(), ValidationError> {
        if let Some(max_length) = self.max_length {
            let actual = value.chars().count() as u64;
            if actual > max_length {
                return Err(ValidationError::new(
                    field,
                    Violation::TooLong { max_length, actual },
                ));
            }
        }

        if let Some(pattern) = &self.regexp {
            // Anchored; the whole value must match.
            let matched = Regex::new(&format!("^(?:{pattern})$"))
                .map(|re| re.is_match(value))
                .unwrap_or(false);
            if !matched {
                return Err(ValidationError::new(
                    field,
                    Violation::PatternMismatch {
                        pattern: pattern.clone(),
                    },
                ));
            }
        }

        Ok(())
    }

    fn validate_bounds(&self, field: &str, value: i128) -> Result<(), ValidationError> {
        if let Some(minimum) = self.minimum {
            if value < i128::from(minimum) {
                return Err(ValidationError::new(field, Violation::BelowMinimum { minimum }));
            }
        }

        if let Some(maximum) = self.maximum {
            if value > i128::from(maximum) {
                return Err(ValidationError::new(field, Violation::AboveMaximum { maximum }));
            }
        }

        Ok(())
    }

    fn validate_float(&self, field: &str, value: f64) -> Result<(), ValidationError> {
        if let Some(minimum) = self.minimum {
            if value < minimum as f64 {
                return Err(ValidationError::new(field, Violation::BelowMinimum { minimum }));
            }
        }

        if let Some(maximum) = self.maximum {
            if value > maximum as f64 {
                return Err(ValidationError::new(field, Violation::AboveMaximum { maximum }));
            }
        }

        Ok(())
    }
}
