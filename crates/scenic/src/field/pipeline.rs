/// An ordered, composable chain of transformation steps.
///
/// Steps run in registration order. Scene callbacks mutate a build's working
/// copy by appending, resetting, or clearing.
#[derive(Clone, Debug)]
pub struct Pipeline<T> {
    steps: Vec<T>,
}

impl<T> Pipeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, step: T) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = T>) -> &mut Self {
        self.steps.extend(steps);
        self
    }

    /// Drops every step and installs `step` as the only one.
    pub fn reset(&mut self, step: T) -> &mut Self {
        self.steps.clear();
        self.steps.push(step);
        self
    }

    /// Drops every step; the field stops contributing on this path.
    pub fn clear(&mut self) -> &mut Self {
        self.steps.clear();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.steps.iter()
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}
