use crate::Reflect;

/// An optional or owning pointer.
///
/// `Option<T>` and `OnceLock<T>` can be absent. `Box<T>` and `Arc<T>`
/// always hold a value, and "clearing" them stores a zero value.
pub trait Pointer: Reflect {
    /// Returns the pointee, or `None` if absent.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// Returns the pointee mutably, or `None` if absent.
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the pointee, allocating a zero value first if absent.
    fn get_or_alloc(&mut self) -> &mut dyn Reflect;

    /// Sets the pointer to its absent (or zero) state.
    fn set_none(&mut self);

    #[inline]
    fn is_none(&self) -> bool {
        self.pointee().is_none()
    }
}
