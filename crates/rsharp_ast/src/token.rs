//! Tokens and trivia.
//!
//! A token owns the trivia around it. Leading trivia runs from the end of the
//! previous token's trailing trivia up to the token text; trailing trivia runs
//! to the end of the line. Concatenating the full text of every token in a
//! file reproduces the file.

use crate::syntax_kind::SyntaxKind;
use rsharp_core::text::{TextPos, TextSpan};
use rsharp_diagnostics::Diagnostic;
use std::fmt;

bitflags::bitflags! {
    /// Flags carried by a token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        const NONE                = 0;
        /// Synthesized by the parser; the token has no text.
        const MISSING             = 1 << 0;
        /// An identifier written with the `@` prefix.
        const VERBATIM_IDENTIFIER = 1 << 1;
        /// An identifier containing `\u` escapes.
        const UNICODE_ESCAPE      = 1 << 2;
    }
}

/// A lexical token with its surrounding trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    /// The contextual keyword an identifier is spelled like, or `SyntaxKind::None`.
    pub contextual_kind: SyntaxKind,
    /// Absolute offset of the token's full start (start of its leading trivia).
    pub position: TextPos,
    pub leading: Vec<SyntaxTrivia>,
    pub text: String,
    /// The token's value after escape processing.
    pub value_text: String,
    pub trailing: Vec<SyntaxTrivia>,
    pub flags: TokenFlags,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxToken {
    /// A token with no trivia whose value text equals its text.
    pub fn new(kind: SyntaxKind, position: TextPos, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind,
            contextual_kind: SyntaxKind::None,
            position,
            leading: Vec::new(),
            value_text: text.clone(),
            text,
            trailing: Vec::new(),
            flags: TokenFlags::NONE,
            diagnostics: Vec::new(),
        }
    }

    /// A zero-width token synthesized where `kind` was expected.
    pub fn missing(kind: SyntaxKind, position: TextPos) -> Self {
        Self {
            flags: TokenFlags::MISSING,
            ..Self::new(kind, position, "")
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(TokenFlags::MISSING)
    }

    #[inline]
    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    /// The kind this token has when it is read as a keyword: its own kind for
    /// reserved keywords, its contextual kind for identifiers.
    pub fn keyword_kind(&self) -> SyntaxKind {
        if self.kind == SyntaxKind::IdentifierToken {
            self.contextual_kind
        } else {
            self.kind
        }
    }

    /// Whether this is an identifier spelled like the contextual keyword `kind`.
    /// Verbatim identifiers (`@partial`) never act as contextual keywords.
    pub fn is_contextual(&self, kind: SyntaxKind) -> bool {
        self.kind == SyntaxKind::IdentifierToken
            && self.contextual_kind == kind
            && !self.flags.contains(TokenFlags::VERBATIM_IDENTIFIER)
    }

    pub fn leading_width(&self) -> u32 {
        self.leading.iter().map(SyntaxTrivia::full_width).sum()
    }

    pub fn trailing_width(&self) -> u32 {
        self.trailing.iter().map(SyntaxTrivia::full_width).sum()
    }

    pub fn width(&self) -> u32 {
        self.text.len() as u32
    }

    pub fn full_width(&self) -> u32 {
        self.leading_width() + self.width() + self.trailing_width()
    }

    /// The span of the token text, excluding trivia.
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.position + self.leading_width(), self.width())
    }

    pub fn full_span(&self) -> TextSpan {
        TextSpan::new(self.position, self.full_width())
    }

    pub fn full_end(&self) -> TextPos {
        self.position + self.full_width()
    }

    /// Whether the trailing trivia ends the line.
    pub fn has_trailing_end_of_line(&self) -> bool {
        self.trailing
            .iter()
            .any(|t| t.kind() == SyntaxKind::EndOfLineTrivia)
    }

    pub fn write_full_to(&self, out: &mut String) {
        for trivia in &self.leading {
            trivia.write_to(out);
        }
        out.push_str(&self.text);
        for trivia in &self.trailing {
            trivia.write_to(out);
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut out = String::with_capacity(self.full_width() as usize);
        self.write_full_to(&mut out);
        out
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Put `skipped` in front of this token as skipped-tokens trivia. The
    /// token's full start moves back to the first skipped token.
    pub fn prepend_skipped(&mut self, skipped: Vec<SyntaxToken>) {
        if let Some(first) = skipped.first() {
            self.position = first.position;
            self.leading.insert(0, SyntaxTrivia::Skipped(skipped));
        }
    }

    /// Append `skipped` after this token's trailing trivia.
    pub fn append_skipped(&mut self, skipped: Vec<SyntaxToken>) {
        if !skipped.is_empty() {
            self.trailing.push(SyntaxTrivia::Skipped(skipped));
        }
    }

    /// Visit every diagnostic of this token, including those stored on tokens
    /// inside its skipped trivia, in document order.
    pub fn for_each_diagnostic<'a>(&'a self, f: &mut dyn FnMut(&'a Diagnostic)) {
        for trivia in &self.leading {
            trivia.for_each_diagnostic(f);
        }
        for diagnostic in &self.diagnostics {
            f(diagnostic);
        }
        for trivia in &self.trailing {
            trivia.for_each_diagnostic(f);
        }
    }

    pub fn contains_diagnostics(&self) -> bool {
        let mut found = false;
        self.for_each_diagnostic(&mut |_| found = true);
        found
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Trivia attached to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxTrivia {
    /// Whitespace, end of line, comments and disabled text.
    Text { kind: SyntaxKind, text: String },
    /// Tokens the parser could not place in the tree.
    Skipped(Vec<SyntaxToken>),
    /// A preprocessor directive line.
    Directive(DirectiveTrivia),
}

impl SyntaxTrivia {
    pub fn text(kind: SyntaxKind, text: impl Into<String>) -> Self {
        SyntaxTrivia::Text {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::text(SyntaxKind::WhitespaceTrivia, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::text(SyntaxKind::EndOfLineTrivia, text)
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxTrivia::Text { kind, .. } => *kind,
            SyntaxTrivia::Skipped(_) => SyntaxKind::SkippedTokensTrivia,
            SyntaxTrivia::Directive(d) => d.kind,
        }
    }

    pub fn full_width(&self) -> u32 {
        match self {
            SyntaxTrivia::Text { text, .. } => text.len() as u32,
            SyntaxTrivia::Skipped(tokens) => tokens.iter().map(SyntaxToken::full_width).sum(),
            SyntaxTrivia::Directive(d) => d.text.len() as u32,
        }
    }

    pub fn write_to(&self, out: &mut String) {
        match self {
            SyntaxTrivia::Text { text, .. } => out.push_str(text),
            SyntaxTrivia::Skipped(tokens) => tokens.iter().for_each(|t| t.write_full_to(out)),
            SyntaxTrivia::Directive(d) => out.push_str(&d.text),
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    pub fn skipped_tokens(&self) -> &[SyntaxToken] {
        match self {
            SyntaxTrivia::Skipped(tokens) => tokens,
            _ => &[],
        }
    }

    fn for_each_diagnostic<'a>(&'a self, f: &mut dyn FnMut(&'a Diagnostic)) {
        if let SyntaxTrivia::Skipped(tokens) = self {
            for token in tokens {
                token.for_each_diagnostic(f);
            }
        }
    }
}

/// A preprocessor directive kept as trivia. The text spans from `#` up to,
/// but not including, the end of line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveTrivia {
    pub kind: SyntaxKind,
    pub text: String,
    /// Whether the directive sits in an active region.
    pub is_active: bool,
    /// For `#if`/`#elif`/`#else`: whether this branch was selected.
    pub branch_taken: bool,
}

/// Whether `c` is a Unicode formatting character (general category `Cf`).
/// These are legal inside identifiers but are dropped from the value text.
pub fn is_formatting_char(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    )
}

/// Whether an identifier's text differs from its value text because of an
/// `@` prefix or formatting characters.
pub fn contains_dropped_identifier_characters(text: &str) -> bool {
    text.starts_with('@') || text.chars().any(is_formatting_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsharp_diagnostics::messages;

    fn ident(position: TextPos, text: &str) -> SyntaxToken {
        SyntaxToken::new(SyntaxKind::IdentifierToken, position, text)
    }

    #[test]
    fn test_token_spans_include_trivia() {
        let mut token = ident(0, "abc");
        token.leading.push(SyntaxTrivia::whitespace("  "));
        token.trailing.push(SyntaxTrivia::end_of_line("\n"));
        assert_eq!(token.span(), TextSpan::new(2, 3));
        assert_eq!(token.full_span(), TextSpan::new(0, 6));
        assert_eq!(token.to_full_string(), "  abc\n");
        assert!(token.has_trailing_end_of_line());
    }

    #[test]
    fn test_missing_token() {
        let token = SyntaxToken::missing(SyntaxKind::SemicolonToken, 7);
        assert!(token.is_missing());
        assert_eq!(token.text, "");
        assert_eq!(token.span(), TextSpan::empty(7));
    }

    #[test]
    fn test_prepend_skipped_moves_full_start() {
        let mut skipped = ident(0, "x");
        skipped.add_diagnostic(Diagnostic::new(&messages::EOF_EXPECTED, skipped.span(), &[]));
        let mut token = ident(2, "y");
        token.leading.push(SyntaxTrivia::whitespace(" "));
        token.prepend_skipped(vec![skipped]);
        assert_eq!(token.position, 0);
        assert_eq!(token.leading[0].kind(), SyntaxKind::SkippedTokensTrivia);
        assert_eq!(token.span(), TextSpan::new(2, 1));
        assert!(token.contains_diagnostics());
    }

    #[test]
    fn test_diagnostic_order_follows_trivia() {
        let mut leading = ident(0, "a");
        leading.add_diagnostic(Diagnostic::new(&messages::EOF_EXPECTED, TextSpan::new(0, 1), &[]));
        let mut trailing = ident(2, "b");
        trailing.add_diagnostic(Diagnostic::new(&messages::UNEXPECTED_TOKEN, TextSpan::new(2, 1), &["b"]));
        let mut token = ident(1, "c");
        token.prepend_skipped(vec![leading]);
        token.add_diagnostic(Diagnostic::new(&messages::IDENTIFIER_EXPECTED, TextSpan::new(1, 1), &[]));
        token.append_skipped(vec![trailing]);

        let mut codes = Vec::new();
        token.for_each_diagnostic(&mut |d| codes.push(d.code));
        assert_eq!(codes, vec![1022, 1001, 8635]);
    }

    #[test]
    fn test_contains_dropped_identifier_characters() {
        assert!(contains_dropped_identifier_characters("@class"));
        assert!(contains_dropped_identifier_characters("a\u{200D}b"));
        assert!(contains_dropped_identifier_characters("soft\u{00AD}hyphen"));
        assert!(!contains_dropped_identifier_characters("plain"));
        assert!(!contains_dropped_identifier_characters("a@b"));
    }

    #[test]
    fn test_contextual_keyword_requires_plain_identifier() {
        let mut token = ident(0, "partial");
        token.contextual_kind = SyntaxKind::PartialKeyword;
        assert!(token.is_contextual(SyntaxKind::PartialKeyword));
        token.flags |= TokenFlags::VERBATIM_IDENTIFIER;
        assert!(!token.is_contextual(SyntaxKind::PartialKeyword));
    }
}
