use core::fmt;
use std::sync::Arc;

use morph_reflect::{Reflect, Value};

use crate::{ConvertError, Result};

/// The default recursion bound.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// The outcome of a [`Transform`].
#[derive(Debug, Clone)]
pub enum Transformed {
    /// Keep converting the value as is.
    Unchanged,
    /// Convert this value instead.
    Replace(Value),
    /// Skip the value. The destination keeps what it holds; a new map
    /// entry or list slot holds its zero value.
    Absent,
}

/// A value-rewriting hook, applied to every visited source value.
pub type Transform = Arc<dyn Fn(&dyn Reflect) -> Transformed + Send + Sync>;

/// Conversion options.
///
/// ```
/// use morph_convert::{Options, Transformed};
/// use morph_reflect::Value;
///
/// let options = Options::new()
///     .string_to_float64(true)
///     .transform(|value| match value.downcast_ref::<String>() {
///         Some(text) if text.is_empty() => Transformed::Absent,
///         Some(text) => Transformed::Replace(Value::from(text.trim())),
///         None => Transformed::Unchanged,
///     });
/// assert_eq!(options.transforms.len(), 1);
/// ```
#[derive(Clone)]
pub struct Options {
    /// Parse numeric strings into float destinations. Off by default, as
    /// the textual round trip does not do it.
    pub string_to_float64: bool,
    /// Applied in order; see [`Transformed`].
    pub transforms: Vec<Transform>,
    /// Recursion bound. Exceeding it fails with
    /// [`ConvertError::CycleSuspected`].
    pub max_depth: usize,
}

impl Options {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string_to_float64(mut self, enabled: bool) -> Self {
        self.string_to_float64 = enabled;
        self
    }

    /// Appends a transform.
    pub fn transform(
        mut self,
        f: impl Fn(&dyn Reflect) -> Transformed + Send + Sync + 'static,
    ) -> Self {
        self.transforms.push(Arc::new(f));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ConvertError::InvalidArgument("max_depth must be at least 1"));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            string_to_float64: false,
            transforms: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("string_to_float64", &self.string_to_float64)
            .field("transforms", &self.transforms.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
