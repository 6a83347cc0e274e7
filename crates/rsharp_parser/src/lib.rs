//! rsharp_parser: Recursive descent parser for C#.
//!
//! Turns the scanner's token stream into a lossless concrete syntax tree.
//! The parser never fails: malformed input produces missing tokens, skipped
//! token trivia and diagnostics attached to the tokens where they occur.

mod parser;
mod precedence;
mod utilities;

pub use parser::Parser;

use rsharp_ast::{
    ExpressionSyntax, MemberDeclaration, NameSyntax, Parsed, StatementSyntax, SyntaxTree,
    TypeSyntax,
};
use rsharp_options::ParseOptions;

/// Parse a whole source file.
pub fn parse_compilation_unit(text: &str, options: &ParseOptions) -> SyntaxTree {
    Parser::new(text, options).parse_compilation_unit()
}

/// Parse a possibly qualified name. Text after the name is kept as skipped
/// trivia of the returned end-of-file token.
pub fn parse_name(text: &str) -> Parsed<NameSyntax> {
    Parser::new(text, &ParseOptions::default()).parse_name_fragment()
}

pub fn parse_type_name(text: &str) -> Parsed<TypeSyntax> {
    Parser::new(text, &ParseOptions::default()).parse_type_fragment()
}

pub fn parse_expression(text: &str) -> Parsed<ExpressionSyntax> {
    Parser::new(text, &ParseOptions::default()).parse_expression_fragment()
}

pub fn parse_statement(text: &str) -> Parsed<StatementSyntax> {
    Parser::new(text, &ParseOptions::default()).parse_statement_fragment()
}

/// Parse a single member declaration as it would appear in a type body.
/// Returns no node when the text does not start a member.
pub fn parse_member_declaration(text: &str, options: &ParseOptions) -> Parsed<Option<MemberDeclaration>> {
    Parser::new(text, options).parse_member_fragment()
}
