//! Stack growth for deep recursion.
//!
//! The parser descends once per nesting level of the source, and tree
//! traversal and drop descend once per node of a chain such as `a.b.c` or
//! `1 + 1 + 1`. Both run through [`ensure_sufficient_stack`], which moves the
//! work onto a fresh stack segment when the current one runs low.

/// Grow the stack when less than this much is left.
const RED_ZONE: usize = 256 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
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
    fn test_returns_closure_result() {
        assert_eq!(ensure_sufficient_stack(|| 7 * 6), 42);
    }

    #[test]
    fn test_deep_recursion_on_default_thread() {
        fn depth(n: u32) -> u32 {
            ensure_sufficient_stack(|| {
                std::hint::black_box([0u8; 512]);
                if n == 0 {
                    0
                } else {
                    depth(n - 1) + 1
                }
            })
        }

        assert_eq!(depth(50_000), 50_000);
    }
}
