//! Stack safety utilities for deep recursion.
//!
//! Prevents stack overflow in the recursive-descent parser and the
//! recursive expression-type inference walk by dynamically growing the
//! stack when needed.
//!
//! # Platform support
//!
//! - **Native targets**: uses the `stacker` crate to grow the stack on
//!   demand.
//! - **WASM targets**: no-op passthrough (WASM manages its own stack).
//!
//! # Usage
//!
//! Wrap recursive calls that could overflow with
//! [`ensure_sufficient_stack`]:
//!
//! ```text
//! fn parse_expr(&mut self) -> Expr {
//!     ensure_sufficient_stack(|| {
//!         // ... recursive parsing logic ...
//!     })
//! }
//! ```

/// Minimum stack space to keep available (100KB red zone). If less than
/// this remains, the stack is grown before continuing.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB per growth).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM has its own stack management; just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_recursion() {
        fn factorial(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
        }
        assert_eq!(factorial(10), 3_628_800);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn deep(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep(n - 1) + 1 })
        }
        assert_eq!(deep(200_000), 200_000);
    }
}
