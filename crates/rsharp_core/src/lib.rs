//! rsharp_core: Core utilities for the rsharp C# parser.
//!
//! Provides text spans and line maps used throughout the parser pipeline,
//! and the stack guard for deep recursion.

pub mod stack;
pub mod text;

// Re-export commonly used types
pub use stack::ensure_sufficient_stack;
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
