//! Stack growth for the recursive passes.
//!
//! The parser, resolver and interpreter all recurse once per nesting level of
//! the program. Each recursive entry point runs through
//! [`ensure_sufficient_stack`], which moves onto a fresh heap-allocated
//! segment when the current stack runs low.

/// Runs `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Space that must stay free before `f` starts (100KB).
    const RED_ZONE: usize = 100 * 1024;

    /// Size of each new segment (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
