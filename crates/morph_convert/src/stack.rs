//! Stack growth for the recursive walks.
//!
//! One level of nesting costs several frames, so a walk that reaches the
//! depth bound would overflow an ordinary thread stack long before the
//! bound trips. Every recursive entry point runs through [`guarded`].

/// Remaining stack below which a fresh segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each fresh segment.
const SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Runs `f`, switching to a new stack segment first when the current one
/// is nearly used up.
#[inline]
pub(crate) fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
