use crate::Reflect;

/// A growable sequence, such as `Vec<T>`.
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the contents with `len` zero values.
    fn reset(&mut self, len: usize);

    /// Truncates, or extends with zero values, keeping existing items.
    fn resize(&mut self, len: usize);
}

/// A fixed-size sequence, such as `[T; N]`.
pub trait Array: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn len(&self) -> usize;
}
