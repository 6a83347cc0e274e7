//! Token factories and the direct construction entry points for
//! interpolated strings.
//!
//! Tokens built here are not tied to any source text: their position is 0
//! and they carry no trivia.

use crate::nodes::{
    ExpressionSyntax, IdentifierName, InterpolatedStringContent, InterpolatedStringExpression,
    InterpolatedStringText, Interpolation,
};
use crate::syntax_kind::SyntaxKind;
use crate::token::{is_formatting_char, SyntaxToken, TokenFlags};

/// A token of a fixed-text kind (punctuation or keyword).
pub fn token(kind: SyntaxKind) -> SyntaxToken {
    SyntaxToken::new(kind, 0, kind.text())
}

/// An identifier token. A leading `@` marks it verbatim; formatting
/// characters are kept in the text and dropped from the value text.
pub fn identifier(text: &str) -> SyntaxToken {
    let mut token = SyntaxToken::new(SyntaxKind::IdentifierToken, 0, text);
    let (verbatim, body) = match text.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    token.value_text = body.chars().filter(|c| !is_formatting_char(*c)).collect();
    if verbatim {
        token.flags |= TokenFlags::VERBATIM_IDENTIFIER;
    }
    token.contextual_kind =
        SyntaxKind::contextual_keyword(&token.value_text).unwrap_or(SyntaxKind::None);
    token
}

pub fn identifier_name(text: &str) -> IdentifierName {
    IdentifierName {
        identifier: identifier(text),
    }
}

/// Literal text inside an interpolated string.
pub fn interpolated_string_text(text: &str) -> InterpolatedStringText {
    InterpolatedStringText {
        text_token: SyntaxToken::new(SyntaxKind::InterpolatedStringTextToken, 0, text),
    }
}

/// `{expression}` with no alignment or format clause.
pub fn interpolation(expression: ExpressionSyntax) -> Interpolation {
    Interpolation {
        open_brace_token: token(SyntaxKind::OpenBraceToken),
        expression: Box::new(expression),
        alignment_clause: None,
        format_clause: None,
        close_brace_token: token(SyntaxKind::CloseBraceToken),
    }
}

impl InterpolatedStringExpression {
    pub fn new(
        string_start_token: SyntaxToken,
        contents: Vec<InterpolatedStringContent>,
        string_end_token: SyntaxToken,
    ) -> Self {
        Self {
            string_start_token,
            contents,
            string_end_token,
        }
    }

    /// An empty interpolated string closed by a synthesized `"`.
    pub fn with_start(string_start_token: SyntaxToken) -> Self {
        Self::with_contents(string_start_token, Vec::new())
    }

    pub fn with_contents(
        string_start_token: SyntaxToken,
        contents: Vec<InterpolatedStringContent>,
    ) -> Self {
        Self::new(
            string_start_token,
            contents,
            token(SyntaxKind::InterpolatedStringEndToken),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SyntaxNode;
    use pretty_assertions::assert_eq;

    fn start() -> SyntaxToken {
        SyntaxToken::new(SyntaxKind::InterpolatedStringStartToken, 0, "$\"")
    }

    #[test]
    fn test_identifier_value_text() {
        let token = identifier("@class");
        assert_eq!(token.text, "@class");
        assert_eq!(token.value_text(), "class");
        assert!(token.flags.contains(TokenFlags::VERBATIM_IDENTIFIER));

        let token = identifier("a\u{200D}b");
        assert_eq!(token.value_text(), "ab");
    }

    #[test]
    fn test_identifier_contextual_kind() {
        assert_eq!(identifier("partial").contextual_kind, SyntaxKind::PartialKeyword);
        assert!(identifier("partial").is_contextual(SyntaxKind::PartialKeyword));
        assert!(!identifier("@partial").is_contextual(SyntaxKind::PartialKeyword));
        assert_eq!(identifier("goo").contextual_kind, SyntaxKind::None);
    }

    #[test]
    fn test_interpolated_string_with_start() {
        let node = InterpolatedStringExpression::with_start(start());
        assert!(node.contents.is_empty());
        assert_eq!(node.string_end_token.kind, SyntaxKind::InterpolatedStringEndToken);
        assert_eq!(node.to_full_string(), "$\"\"");
    }

    #[test]
    fn test_interpolated_string_with_contents() {
        let contents: Vec<InterpolatedStringContent> = vec![
            interpolated_string_text("a ").into(),
            interpolation(identifier_name("b").into()).into(),
        ];
        let node = InterpolatedStringExpression::with_contents(start(), contents);
        assert_eq!(node.to_full_string(), "$\"a {b}\"");
        assert_eq!(node.kind(), SyntaxKind::InterpolatedStringExpression);
    }

    #[test]
    fn test_interpolated_string_new_keeps_end_token() {
        let end = SyntaxToken::missing(SyntaxKind::InterpolatedStringEndToken, 0);
        let node = InterpolatedStringExpression::new(start(), Vec::new(), end);
        assert!(node.string_end_token.is_missing());
        assert_eq!(node.to_full_string(), "$\"");
    }
}
