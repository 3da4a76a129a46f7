use crate::stmt::Value;

/// One admissible value with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    /// The stored value.
    pub key: Value,

    /// The display label.
    pub title: String,
}

impl Enum {
    pub fn new(key: impl Into<Value>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// An ordered set of admissible values.
///
/// Key uniqueness is not enforced; duplicate keys are allowed and both
/// match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enums {
    items: Vec<Enum>,
}

impl Enums {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enum> + '_ {
        self.items.iter()
    }

    pub fn append(&mut self, items: impl IntoIterator<Item = Enum>) {
        self.items.extend(items);
    }

    /// Inserts a synthetic choice ahead of the declared ones (e.g. "all").
    pub fn prepend(&mut self, item: Enum) {
        self.items.insert(0, item);
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.items.iter().any(|item| item.key == *key)
    }

    /// The label of the first entry matching `key`.
    pub fn title(&self, key: &Value) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.key == *key)
            .map(|item| item.title.as_str())
    }
}

impl FromIterator<Enum> for Enums {
    fn from_iter<T: IntoIterator<Item = Enum>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Enums {
    type Item = Enum;

    type IntoIter = std::vec::IntoIter<Enum>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Enums {
    type Item = &'a Enum;

    type IntoIter = std::slice::Iter<'a, Enum>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_both_match() {
        let mut enums = Enums::new();
        enums.append([Enum::new(1_i64, "first"), Enum::new(1_i64, "second")]);

        assert_eq!(enums.len(), 2);
        assert!(enums.contains_key(&Value::from(1_i64)));
        assert_eq!(enums.title(&Value::from(1_i64)), Some("first"));
    }

    #[test]
    fn prepend_goes_first() {
        let mut enums: Enums = [Enum::new(1_i64, "active")].into_iter().collect();
        enums.prepend(Enum::new("", "all"));

        assert_eq!(enums.iter().next().unwrap().title, "all");
    }
}
