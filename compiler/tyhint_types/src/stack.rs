//! Stack growth for the recursive resolver.
//!
//! Hints are trees of arbitrary depth, and the depth limit is configurable,
//! so the resolver wraps each level in [`ensure_sufficient_stack`]. On native
//! targets `stacker` switches to a fresh segment when the current one runs
//! low; on wasm the closure just runs.

/// Grow when less than this much stack is left.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
