//! Recursion safety for the parser, the evaluator and the selector engine.
//!
//! Two independent mechanisms:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so that
//!   legitimately deep input does not crash the process.
//! - [`NestingGuard`] counts nesting depth and refuses to go past a
//!   configured maximum, turning pathological input into an ordinary error.
//!
//! The guard is a plain counter owned by whoever recurses (a parser, an
//! interpreter); there is no global state.

use std::fmt;

/// Remaining stack below which we grow (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_NESTING: usize = 512;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Raised when [`NestingGuard::enter`] would exceed the limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NestingExceeded {
    pub limit: usize,
}

impl fmt::Display for NestingExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nesting depth exceeds the maximum of {}", self.limit)
    }
}

impl std::error::Error for NestingExceeded {}

/// Depth counter with an upper bound.
///
/// Every successful [`enter`](Self::enter) must be paired with an
/// [`exit`](Self::exit); [`NestingGuard::scope`] does the pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestingGuard {
    depth: usize,
    limit: usize,
}

impl Default for NestingGuard {
    fn default() -> Self {
        NestingGuard::new(DEFAULT_MAX_NESTING)
    }
}

impl NestingGuard {
    pub fn new(limit: usize) -> Self {
        NestingGuard { depth: 0, limit }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn enter(&mut self) -> Result<(), NestingExceeded> {
        if self.depth >= self.limit {
            return Err(NestingExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` one level deeper, on a stack large enough for it.
    ///
    /// `owner` is the value holding this guard; `guard` projects the guard
    /// out of it so that `f` can receive `owner` mutably.
    pub fn scope<O, T, E>(
        owner: &mut O,
        guard: fn(&mut O) -> &mut NestingGuard,
        f: impl FnOnce(&mut O) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<NestingExceeded>,
    {
        guard(owner).enter()?;
        let result = ensure_sufficient_stack(|| f(owner));
        guard(owner).exit();
        result
    }
}

#[cfg(test)]
mod tests;
