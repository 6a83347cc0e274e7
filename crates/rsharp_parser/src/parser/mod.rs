//! The C# parser.
//!
//! A recursive descent parser over the token array produced by the scanner.
//! The parser never fails: where the grammar expects a token that is not
//! there it synthesizes a missing token, and tokens it cannot place are
//! carried as skipped trivia on the next token it consumes. Every character
//! of the input therefore ends up in the tree.

mod declarations;
mod expressions;
mod interpolation;
mod members;
mod names;
mod statements;

use rsharp_ast::*;
use rsharp_core::text::{TextPos, TextSpan};
use rsharp_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use rsharp_options::{Feature, LanguageVersion, ParseOptions};
use tracing::{debug, trace};

pub(crate) use names::{NameMode, TypeMode};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 200;

/// End of the last token consumed or skipped, for placing diagnostics of
/// missing tokens.
#[derive(Debug, Clone, Copy)]
struct PreviousToken {
    end: TextPos,
    ends_line: bool,
}

/// Saved cursor state for speculative parsing.
#[derive(Debug, Clone)]
pub(crate) struct ParserSnapshot {
    position: usize,
    split: Vec<SyntaxToken>,
    pending_skipped: Vec<SyntaxToken>,
    previous: Option<PreviousToken>,
    recursion_depth: u32,
    exhausted: bool,
    eof_diagnostics: usize,
}

/// The parser produces syntax trees from C# source text.
pub struct Parser {
    text: String,
    options: ParseOptions,
    /// Scanned tokens; the last one is always the end-of-file token.
    tokens: Vec<SyntaxToken>,
    position: usize,
    /// Pieces of a split token, last one current. They precede `tokens[position]`.
    split: Vec<SyntaxToken>,
    /// Tokens waiting to be attached as skipped trivia to the next token consumed.
    pending_skipped: Vec<SyntaxToken>,
    previous: Option<PreviousToken>,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    /// Set once the depth limit is hit; the rest of the input has been skipped.
    exhausted: bool,
    /// Diagnostics that belong to the end-of-file token once it is consumed.
    eof_diagnostics: Vec<Diagnostic>,
    seen_file_scoped_namespace: bool,
    seen_block_namespace: bool,
}

impl Parser {
    pub fn new(text: &str, options: &ParseOptions) -> Self {
        let mut tokens = rsharp_scanner::tokenize(text, options);
        if tokens.last().map(|t| t.kind) != Some(SyntaxKind::EndOfFileToken) {
            tokens.push(SyntaxToken::new(
                SyntaxKind::EndOfFileToken,
                text.len() as TextPos,
                "",
            ));
        }
        trace!(tokens = tokens.len(), "parser created");
        Self {
            text: text.to_string(),
            options: options.clone(),
            tokens,
            position: 0,
            split: Vec::new(),
            pending_skipped: Vec::new(),
            previous: None,
            recursion_depth: 0,
            exhausted: false,
            eof_diagnostics: Vec::new(),
            seen_file_scoped_namespace: false,
            seen_block_namespace: false,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse the whole input as a compilation unit.
    pub fn parse_compilation_unit(mut self) -> SyntaxTree {
        trace!(len = self.text.len(), "parse compilation unit");
        let root = self.parse_compilation_unit_node();
        let text = std::mem::take(&mut self.text);
        SyntaxTree::new(root, self.options, text)
    }

    pub fn parse_name_fragment(mut self) -> Parsed<NameSyntax> {
        let node = self.parse_qualified_name(NameMode::Type);
        self.finish_fragment(node)
    }

    pub fn parse_type_fragment(mut self) -> Parsed<TypeSyntax> {
        let node = self.parse_type(TypeMode::Normal);
        self.finish_fragment(node)
    }

    pub fn parse_expression_fragment(mut self) -> Parsed<ExpressionSyntax> {
        let node = self.parse_expression();
        self.finish_fragment(node)
    }

    pub fn parse_statement_fragment(mut self) -> Parsed<StatementSyntax> {
        let node = self.parse_statement();
        self.finish_fragment(node)
    }

    pub fn parse_member_fragment(mut self) -> Parsed<Option<MemberDeclaration>> {
        let node = self.parse_member_declaration(&members::MemberContext::type_body(None));
        self.finish_fragment(node)
    }

    /// Everything after the fragment becomes skipped trivia of the end-of-file token.
    fn finish_fragment<T>(&mut self, node: T) -> Parsed<T> {
        while self.current_kind() != SyntaxKind::EndOfFileToken {
            self.skip_token();
        }
        Parsed {
            node,
            eof: self.eat_token(),
        }
    }

    // ========================================================================
    // Token access
    // ========================================================================

    fn token_at(&self, index: usize) -> &SyntaxToken {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    pub(crate) fn current(&self) -> &SyntaxToken {
        self.peek(0)
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.current().kind
    }

    /// The token `n` positions ahead of the current one.
    pub(crate) fn peek(&self, n: usize) -> &SyntaxToken {
        if n < self.split.len() {
            &self.split[self.split.len() - 1 - n]
        } else {
            self.token_at(self.position + n - self.split.len())
        }
    }

    pub(crate) fn peek_kind(&self, n: usize) -> SyntaxKind {
        self.peek(n).kind
    }

    /// Whether the current token is an identifier spelled like contextual keyword `kind`.
    pub(crate) fn at_contextual(&self, kind: SyntaxKind) -> bool {
        self.current().is_contextual(kind)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current_kind() == SyntaxKind::EndOfFileToken
    }

    /// A value that changes whenever the cursor moves.
    pub(crate) fn progress_key(&self) -> (usize, usize) {
        (self.position, self.split.len())
    }

    /// Take the current token out of the stream. The end-of-file token is
    /// never removed.
    fn take_current(&mut self) -> SyntaxToken {
        if let Some(token) = self.split.pop() {
            return token;
        }
        let token = self.token_at(self.position).clone();
        if token.kind != SyntaxKind::EndOfFileToken {
            self.position += 1;
        }
        token
    }

    fn advance(&mut self) -> SyntaxToken {
        let token = self.take_current();
        self.previous = Some(PreviousToken {
            end: token.span().end(),
            ends_line: token.has_trailing_end_of_line(),
        });
        token
    }

    /// Consume the current token, attaching any pending skipped tokens to it.
    pub(crate) fn eat_token(&mut self) -> SyntaxToken {
        let mut token = self.advance();
        if token.kind == SyntaxKind::EndOfFileToken {
            for diagnostic in self.eof_diagnostics.drain(..) {
                token.add_diagnostic(diagnostic);
            }
        }
        let skipped = std::mem::take(&mut self.pending_skipped);
        token.prepend_skipped(skipped);
        token
    }

    /// Consume the current token and give it the keyword kind it is spelled
    /// like, for contextual keywords the grammar calls for here.
    pub(crate) fn eat_contextual(&mut self, kind: SyntaxKind) -> SyntaxToken {
        let mut token = self.eat_token();
        token.kind = kind;
        token
    }

    /// Consume the current token if it has `kind`.
    pub(crate) fn eat_optional(&mut self, kind: SyntaxKind) -> Option<SyntaxToken> {
        (self.current_kind() == kind).then(|| self.eat_token())
    }

    /// Consume a token of `kind`, or synthesize a missing one and report it.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.current_kind() == kind {
            self.eat_token()
        } else {
            self.missing(kind)
        }
    }

    // ========================================================================
    // Split and merged tokens
    // ========================================================================

    /// Split the current token after `len` bytes. The first piece, of
    /// `first_kind`, becomes current and the rest, of `rest_kind`, follows it.
    pub(crate) fn split_current(&mut self, first_kind: SyntaxKind, len: usize, rest_kind: SyntaxKind) {
        let token = self.take_current();
        let leading_width = token.leading_width();
        let (head, tail) = token.text.split_at(len.min(token.text.len()));
        let mut first = SyntaxToken::new(first_kind, token.position, head);
        first.leading = token.leading.clone();
        first.diagnostics = token.diagnostics.clone();
        let mut rest = SyntaxToken::new(
            rest_kind,
            token.position + leading_width + head.len() as TextPos,
            tail,
        );
        rest.trailing = token.trailing;
        self.split.push(rest);
        self.split.push(first);
    }

    /// The operator at the current position, joining `>` tokens the scanner
    /// keeps apart so generic argument lists can close one at a time. Returns
    /// the operator kind and how many tokens it spans.
    pub(crate) fn current_operator(&self) -> (SyntaxKind, usize) {
        let kind = self.current_kind();
        if kind != SyntaxKind::GreaterThanToken || !self.adjacent(0) {
            return (kind, 1);
        }
        match self.peek_kind(1) {
            SyntaxKind::GreaterThanToken if self.adjacent(1) => match self.peek_kind(2) {
                SyntaxKind::GreaterThanToken => {
                    (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
                }
                SyntaxKind::GreaterThanEqualsToken => {
                    (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 3)
                }
                _ => (SyntaxKind::GreaterThanGreaterThanToken, 2),
            },
            SyntaxKind::GreaterThanToken => (SyntaxKind::GreaterThanGreaterThanToken, 2),
            SyntaxKind::GreaterThanEqualsToken => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 2),
            _ => (kind, 1),
        }
    }

    /// Whether the token `n` ahead touches the one after it with no trivia between.
    fn adjacent(&self, n: usize) -> bool {
        self.peek(n).trailing.is_empty() && self.peek(n + 1).leading.is_empty()
    }

    /// Consume `count` tokens as a single token of `kind`.
    pub(crate) fn eat_merged(&mut self, kind: SyntaxKind, count: usize) -> SyntaxToken {
        let mut token = self.eat_token();
        for _ in 1..count {
            let next = self.advance();
            token.text.push_str(&next.text);
            token.trailing = next.trailing;
            token.diagnostics.extend(next.diagnostics);
        }
        token.value_text = token.text.clone();
        token.kind = kind;
        token
    }

    // ========================================================================
    // Missing tokens and diagnostics
    // ========================================================================

    /// Where to report a missing token: right after the previous token when
    /// that token ends its line, otherwise on the current token.
    pub(crate) fn missing_span(&self) -> TextSpan {
        match self.previous {
            Some(previous) if previous.ends_line => TextSpan::empty(previous.end),
            _ => self.current().span(),
        }
    }

    pub(crate) fn diagnostic_here(&self, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        Diagnostic::new(message, self.missing_span(), args)
    }

    fn identifier_expected(&self) -> Diagnostic {
        let current = self.current();
        if current.kind.is_reserved_keyword() {
            self.diagnostic_here(&messages::IDENTIFIER_EXPECTED_KW, &["", current.text.as_str()])
        } else {
            self.diagnostic_here(&messages::IDENTIFIER_EXPECTED, &[])
        }
    }

    fn expected_diagnostic(&self, kind: SyntaxKind) -> Diagnostic {
        match kind {
            SyntaxKind::IdentifierToken => self.identifier_expected(),
            SyntaxKind::SemicolonToken => self.diagnostic_here(&messages::SEMICOLON_EXPECTED, &[]),
            SyntaxKind::OpenBraceToken => self.diagnostic_here(&messages::LBRACE_EXPECTED, &[]),
            SyntaxKind::CloseBraceToken => self.diagnostic_here(&messages::RBRACE_EXPECTED, &[]),
            SyntaxKind::CloseParenToken => {
                self.diagnostic_here(&messages::CLOSE_PAREN_EXPECTED, &[])
            }
            _ => self.diagnostic_here(&messages::SYNTAX_ERROR, &[kind.text()]),
        }
    }

    /// A missing token reported with the usual "expected" diagnostic for `kind`.
    pub(crate) fn missing(&mut self, kind: SyntaxKind) -> SyntaxToken {
        let diagnostic = self.expected_diagnostic(kind);
        self.missing_with(kind, diagnostic)
    }

    pub(crate) fn missing_with(&mut self, kind: SyntaxKind, diagnostic: Diagnostic) -> SyntaxToken {
        let mut token = self.missing_silent(kind);
        if !self.exhausted {
            token.add_diagnostic(diagnostic);
        }
        token
    }

    /// A missing token with no diagnostic, for places where an error was
    /// already reported for the same gap.
    pub(crate) fn missing_silent(&self, kind: SyntaxKind) -> SyntaxToken {
        SyntaxToken::missing(kind, self.current().position)
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Move the current token into the pending skipped tokens without a report.
    pub(crate) fn skip_token(&mut self) {
        let token = self.advance();
        debug!(kind = ?token.kind, text = %token.text, "skipped token");
        self.pending_skipped.push(token);
    }

    /// Skip the current token, reporting `message` with the token text as argument.
    pub(crate) fn skip_token_with(&mut self, message: &DiagnosticMessage) {
        let mut token = self.advance();
        debug!(kind = ?token.kind, text = %token.text, "skipped token");
        let diagnostic = Diagnostic::new(message, token.span(), &[token.text.as_str()]);
        token.add_diagnostic(diagnostic);
        self.pending_skipped.push(token);
    }

    /// Skip the current token, storing a prepared diagnostic on it.
    pub(crate) fn skip_token_reporting(&mut self, diagnostic: Diagnostic) {
        let mut token = self.advance();
        debug!(kind = ?token.kind, text = %token.text, "skipped token");
        token.add_diagnostic(diagnostic);
        self.pending_skipped.push(token);
    }

    /// Turn an already built node back into skipped tokens, reporting
    /// `diagnostic` on its first token.
    pub(crate) fn skip_node(&mut self, node: &dyn SyntaxNode, diagnostic: Option<Diagnostic>) {
        let start = self.pending_skipped.len();
        self.pending_skipped.extend(node.tokens().into_iter().cloned());
        if let (Some(diagnostic), Some(first)) = (diagnostic, self.pending_skipped.get_mut(start)) {
            first.add_diagnostic(diagnostic);
        }
    }

    /// Hand the pending skipped tokens to a token the parser synthesized.
    pub(crate) fn attach_pending(&mut self, token: &mut SyntaxToken) {
        let skipped = std::mem::take(&mut self.pending_skipped);
        token.prepend_skipped(skipped);
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            position: self.position,
            split: self.split.clone(),
            pending_skipped: self.pending_skipped.clone(),
            previous: self.previous,
            recursion_depth: self.recursion_depth,
            exhausted: self.exhausted,
            eof_diagnostics: self.eof_diagnostics.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.position = snapshot.position;
        self.split = snapshot.split;
        self.pending_skipped = snapshot.pending_skipped;
        self.previous = snapshot.previous;
        self.recursion_depth = snapshot.recursion_depth;
        self.exhausted = snapshot.exhausted;
        self.eof_diagnostics.truncate(snapshot.eof_diagnostics);
    }

    // ========================================================================
    // Recursion guard
    // ========================================================================

    /// Enter one level of nesting. Returns false once the depth limit is
    /// reached; the rest of the input is then skipped and reported once.
    pub(crate) fn enter(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.exhaust();
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    fn exhaust(&mut self) {
        debug!(depth = self.recursion_depth, "recursion limit reached");
        self.exhausted = true;
        let start = self.pending_skipped.len();
        while self.current_kind() != SyntaxKind::EndOfFileToken {
            let token = self.advance();
            self.pending_skipped.push(token);
        }
        match self.pending_skipped.get_mut(start) {
            Some(first) => {
                let span = first.span();
                first.add_diagnostic(Diagnostic::new(&messages::INSUFFICIENT_STACK, span, &[]));
            }
            None => {
                let span = self.current().span();
                self.eof_diagnostics
                    .push(Diagnostic::new(&messages::INSUFFICIENT_STACK, span, &[]));
            }
        }
    }

    // ========================================================================
    // Language version
    // ========================================================================

    pub(crate) fn feature_diagnostic(&self, feature: Feature, span: TextSpan) -> Option<Diagnostic> {
        if self.options.is_feature_enabled(feature) {
            return None;
        }
        let required = feature.required_version();
        Some(if required == LanguageVersion::Preview {
            Diagnostic::new(&messages::FEATURE_IN_PREVIEW, span, &[feature.name()])
        } else {
            Diagnostic::new(
                self.options.language_version.feature_unavailable_message(),
                span,
                &[feature.name(), required.display_name()],
            )
        })
    }

    /// Report `feature` on `token` when the language version lacks it.
    pub(crate) fn check_feature(&self, token: &mut SyntaxToken, feature: Feature) {
        if let Some(diagnostic) = self.feature_diagnostic(feature, token.span()) {
            token.add_diagnostic(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(text: &str) -> Parser {
        Parser::new(text, &ParseOptions::default())
    }

    #[test]
    fn test_peek_past_end_returns_eof() {
        let p = parser("a");
        assert_eq!(p.peek_kind(0), SyntaxKind::IdentifierToken);
        assert_eq!(p.peek_kind(5), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_eat_at_eof_does_not_advance() {
        let mut p = parser("");
        assert_eq!(p.eat_token().kind, SyntaxKind::EndOfFileToken);
        assert_eq!(p.current_kind(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_split_current() {
        let mut p = parser("a.. b");
        p.eat_token();
        p.split_current(SyntaxKind::DotToken, 1, SyntaxKind::DotToken);
        let first = p.eat_token();
        let second = p.eat_token();
        assert_eq!(first.text, ".");
        assert_eq!(second.text, ".");
        assert_eq!(second.span(), TextSpan::new(2, 1));
        assert_eq!(second.to_full_string(), ". ");
        assert_eq!(p.current_kind(), SyntaxKind::IdentifierToken);
    }

    #[test]
    fn test_merged_shift_operator() {
        let mut p = parser("a >>= b");
        p.eat_token();
        let (kind, count) = p.current_operator();
        assert_eq!(kind, SyntaxKind::GreaterThanGreaterThanEqualsToken);
        let token = p.eat_merged(kind, count);
        assert_eq!(token.text, ">>=");
        assert_eq!(token.to_full_string(), " >>= ");
    }

    #[test]
    fn test_separated_greater_than_is_not_merged() {
        let mut p = parser("a > > b");
        p.eat_token();
        assert_eq!(p.current_operator(), (SyntaxKind::GreaterThanToken, 1));
    }

    #[test]
    fn test_skipped_tokens_attach_to_next_token() {
        let mut p = parser("a b c");
        p.skip_token();
        p.skip_token();
        let token = p.eat_token();
        assert_eq!(token.text, "c");
        assert_eq!(token.position, 0);
        assert_eq!(token.to_full_string(), "a b c");
    }

    #[test]
    fn test_missing_after_line_end_reports_at_previous_token() {
        let mut p = parser("a\nb");
        p.eat_token();
        let missing = p.missing(SyntaxKind::SemicolonToken);
        assert_eq!(missing.diagnostics[0].span, TextSpan::empty(1));
    }

    #[test]
    fn test_missing_on_same_line_reports_current_token() {
        let mut p = parser("a b");
        p.eat_token();
        let missing = p.missing(SyntaxKind::SemicolonToken);
        assert_eq!(missing.diagnostics[0].span, TextSpan::new(2, 1));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut p = parser("a b c");
        let snapshot = p.snapshot();
        p.eat_token();
        p.skip_token();
        p.restore(snapshot);
        assert_eq!(p.current().text, "a");
        assert!(p.pending_skipped.is_empty());
    }
}
