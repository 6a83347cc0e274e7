//! rsharp_scanner: Lexical analysis for C# source text.
//!
//! The scanner produces a flat token stream where every character of the
//! input belongs to exactly one token's text or trivia. Preprocessor
//! directives are evaluated while scanning, so inactive regions arrive as
//! disabled-text trivia.

mod char_codes;
mod directives;
mod scanner;

pub use char_codes::{is_identifier_part, is_identifier_start, is_line_break, is_white_space};
pub use scanner::Scanner;

use rsharp_ast::SyntaxToken;
use rsharp_options::ParseOptions;

/// Scan `text` into tokens. The last token is always the end-of-file token.
pub fn tokenize(text: &str, options: &ParseOptions) -> Vec<SyntaxToken> {
    Scanner::new(text, options).tokenize()
}
