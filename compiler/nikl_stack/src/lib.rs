//! Stack growth for deep recursion.
//!
//! Nikl's parser and evaluator are both recursive over the syntax tree, and
//! user programs may recurse as deep as the interpreter's call-depth limit.
//! Wrapping the recursive entry points in [`ensure_sufficient_stack`] keeps
//! the host stack from overflowing before the interpreter can report a
//! `StackOverflow` diagnostic of its own.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// ```text
/// fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(expr))
/// }
/// ```
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_recursion() {
        fn sum_to(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
        }

        assert_eq!(sum_to(100), 5050);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn passes_result_through() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
