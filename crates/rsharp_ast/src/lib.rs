//! rsharp_ast: Concrete syntax tree definitions for the C# parser.
//!
//! Defines the SyntaxKind enum, tokens and trivia, the node structs and
//! category enums, tree walking, and the parse result types. Trees are
//! lossless: every character of the source text belongs to exactly one
//! token or trivia.

pub mod factory;
pub mod node;
pub mod nodes;
pub mod syntax_kind;
pub mod syntax_tree;
pub mod token;
pub mod visitor;

// Re-export key types
pub use node::{SeparatedList, Slot, SyntaxElement, SyntaxNode};
pub use nodes::*;
pub use syntax_kind::SyntaxKind;
pub use syntax_tree::{Parsed, SyntaxTree};
pub use token::{
    contains_dropped_identifier_characters, is_formatting_char, DirectiveTrivia, SyntaxToken,
    SyntaxTrivia, TokenFlags,
};
pub use visitor::{descendant_nodes, descendant_tokens, descendant_trivia, SyntaxWalker, WalkDepth};
