use super::{Mode, Transform, TransformError, TransformSpec};

/// Ordered list of transforms owned by a single field.
#[derive(Debug, Default, Clone)]
pub struct Pipeline {
    transforms: Vec<Transform>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transforms.iter().map(Transform::name)
    }

    /// Adds the transforms described by `spec` to the end of the pipeline.
    /// Nothing is added if the spec does not resolve.
    pub fn append(&mut self, spec: impl Into<TransformSpec>) -> Result<(), TransformError> {
        let resolved = spec.into().resolve()?;
        log::debug!(added:? = resolved; "Appending transforms");
        self.transforms.extend(resolved);

        Ok(())
    }

    /// Inserts the transforms described by `spec` at the front of the
    /// pipeline one by one, so a spec resolving to several transforms ends up
    /// in reverse order.
    pub fn prepend(&mut self, spec: impl Into<TransformSpec>) -> Result<(), TransformError> {
        let resolved = spec.into().resolve()?;
        log::debug!(added:? = resolved; "Prepending transforms");
        for transform in resolved {
            self.transforms.insert(0, transform);
        }

        Ok(())
    }

    /// Runs every transform in order. Stops early once the value becomes
    /// empty.
    pub fn apply(&self, text: &str, mode: Mode) -> String {
        let mut value = text.to_owned();
        for transform in &self.transforms {
            if value.is_empty() {
                break;
            }
            value = transform.apply(&value, mode);
        }

        value
    }
}
