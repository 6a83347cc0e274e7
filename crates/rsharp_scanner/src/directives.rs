//! Preprocessor directives and conditional compilation.
//!
//! The scanner hands every directive line to `Preprocessor::directive`, which
//! updates the symbol set and the condition stack and returns the directive
//! trivia. Whether the text that follows is active is read back through
//! `Preprocessor::is_active`.

use rsharp_ast::{DirectiveTrivia, SyntaxKind};
use rsharp_core::text::TextSpan;
use rsharp_diagnostics::{messages, Diagnostic};
use rustc_hash::FxHashSet;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct Condition {
    /// Whether the enclosing region is active.
    parent_active: bool,
    /// Whether the current branch is active.
    active: bool,
    /// Whether any branch so far was taken.
    taken: bool,
    seen_else: bool,
}

#[derive(Debug, Default)]
pub(crate) struct Preprocessor {
    symbols: FxHashSet<String>,
    conditions: Vec<Condition>,
    regions: usize,
}

impl Preprocessor {
    pub fn new<'s>(symbols: impl IntoIterator<Item = &'s String>) -> Self {
        Self {
            symbols: symbols.into_iter().cloned().collect(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.conditions.last().map_or(true, |c| c.active)
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Process one directive line. `text` runs from `#` to the end of the
    /// line, `start` is the offset of `#`.
    pub fn directive(
        &mut self,
        text: &str,
        start: usize,
        seen_token: bool,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> DirectiveTrivia {
        let span = TextSpan::new(start as u32, text.len() as u32);
        let body = text[1..].trim_start_matches(|c: char| c == ' ' || c == '\t');
        let name_len = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (name, rest) = body.split_at(name_len);
        let argument = strip_comment(rest).trim();
        let active = self.is_active();
        trace!(directive = name, pos = start, active, "preprocessor directive");

        let mut branch_taken = false;
        let (kind, is_active) = match name {
            "if" => {
                let value = active && self.evaluate(argument, span, diagnostics);
                self.conditions.push(Condition {
                    parent_active: active,
                    active: value,
                    taken: value,
                    seen_else: false,
                });
                branch_taken = value;
                (SyntaxKind::IfDirectiveTrivia, active)
            }
            "elif" => match self.conditions.last().copied() {
                Some(c) if !c.seen_else => {
                    let value =
                        c.parent_active && !c.taken && self.evaluate(argument, span, diagnostics);
                    if let Some(top) = self.conditions.last_mut() {
                        top.active = value;
                        top.taken |= value;
                    }
                    branch_taken = value;
                    (SyntaxKind::ElifDirectiveTrivia, c.parent_active)
                }
                _ => {
                    report(active, diagnostics, &messages::UNEXPECTED_DIRECTIVE, span, &[]);
                    (SyntaxKind::BadDirectiveTrivia, active)
                }
            },
            "else" => match self.conditions.last().copied() {
                Some(c) if !c.seen_else => {
                    let value = c.parent_active && !c.taken;
                    if let Some(top) = self.conditions.last_mut() {
                        top.active = value;
                        top.taken = true;
                        top.seen_else = true;
                    }
                    branch_taken = value;
                    (SyntaxKind::ElseDirectiveTrivia, c.parent_active)
                }
                _ => {
                    report(active, diagnostics, &messages::UNEXPECTED_DIRECTIVE, span, &[]);
                    (SyntaxKind::BadDirectiveTrivia, active)
                }
            },
            "endif" => match self.conditions.pop() {
                Some(c) => (SyntaxKind::EndIfDirectiveTrivia, c.parent_active),
                None => {
                    report(active, diagnostics, &messages::UNEXPECTED_DIRECTIVE, span, &[]);
                    (SyntaxKind::BadDirectiveTrivia, active)
                }
            },
            "define" | "undef" => {
                let kind = if name == "define" {
                    SyntaxKind::DefineDirectiveTrivia
                } else {
                    SyntaxKind::UndefDirectiveTrivia
                };
                if active {
                    if seen_token {
                        diagnostics.push(Diagnostic::new(&messages::PP_DEF_FOLLOWS_TOKEN, span, &[]));
                    } else if !is_symbol(argument) {
                        diagnostics.push(Diagnostic::new(&messages::IDENTIFIER_EXPECTED, span, &[]));
                    } else if name == "define" {
                        self.symbols.insert(argument.to_string());
                    } else {
                        self.symbols.remove(argument);
                    }
                }
                (kind, active)
            }
            "region" => {
                self.regions += 1;
                (SyntaxKind::RegionDirectiveTrivia, active)
            }
            "endregion" => {
                if self.regions == 0 {
                    report(active, diagnostics, &messages::UNEXPECTED_DIRECTIVE, span, &[]);
                    (SyntaxKind::BadDirectiveTrivia, active)
                } else {
                    self.regions -= 1;
                    (SyntaxKind::EndRegionDirectiveTrivia, active)
                }
            }
            "error" => {
                let message = rest.trim();
                report(active, diagnostics, &messages::ERROR_DIRECTIVE, span, &[message]);
                (SyntaxKind::ErrorDirectiveTrivia, active)
            }
            "warning" => {
                let message = rest.trim();
                report(active, diagnostics, &messages::WARNING_DIRECTIVE, span, &[message]);
                (SyntaxKind::WarningDirectiveTrivia, active)
            }
            "line" => (SyntaxKind::LineDirectiveTrivia, active),
            "nullable" => (SyntaxKind::NullableDirectiveTrivia, active),
            "pragma" => {
                let kind = if argument.starts_with("checksum") {
                    SyntaxKind::PragmaChecksumDirectiveTrivia
                } else {
                    SyntaxKind::PragmaWarningDirectiveTrivia
                };
                (kind, active)
            }
            _ => {
                report(active, diagnostics, &messages::PP_DIRECTIVE_EXPECTED, span, &[]);
                (SyntaxKind::BadDirectiveTrivia, active)
            }
        };

        DirectiveTrivia {
            kind,
            text: text.to_string(),
            is_active,
            branch_taken,
        }
    }

    /// Report conditions and regions left open at end of file.
    pub fn finish(&self, pos: usize, diagnostics: &mut Vec<Diagnostic>) {
        let span = TextSpan::empty(pos as u32);
        if !self.conditions.is_empty() {
            diagnostics.push(Diagnostic::new(&messages::END_IF_DIRECTIVE_EXPECTED, span, &[]));
        }
        if self.regions > 0 {
            diagnostics.push(Diagnostic::new(&messages::END_REGION_DIRECTIVE_EXPECTED, span, &[]));
        }
    }

    fn evaluate(&self, expression: &str, span: TextSpan, diagnostics: &mut Vec<Diagnostic>) -> bool {
        let mut parser = ExpressionParser {
            tokens: lex_expression(expression),
            pos: 0,
            preprocessor: self,
        };
        match parser.parse_or() {
            Some(value) if parser.pos == parser.tokens.len() => value,
            _ => {
                diagnostics.push(Diagnostic::new(&messages::INVALID_PREPROC_EXPR, span, &[]));
                false
            }
        }
    }
}

fn report(
    active: bool,
    diagnostics: &mut Vec<Diagnostic>,
    message: &rsharp_diagnostics::DiagnosticMessage,
    span: TextSpan,
    args: &[&str],
) {
    if active {
        diagnostics.push(Diagnostic::new(message, span, args));
    }
}

fn strip_comment(text: &str) -> &str {
    match text.find("//") {
        Some(i) => &text[..i],
        None => text,
    }
}

fn is_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

// ============================================================================
// Conditional expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExprToken<'s> {
    Symbol(&'s str),
    Not,
    And,
    Or,
    Equals,
    NotEquals,
    Open,
    Close,
    Bad,
}

fn lex_expression(text: &str) -> Vec<ExprToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    loop {
        rest = rest.trim_start();
        let Some(ch) = rest.chars().next() else {
            break;
        };
        let (token, len) = match ch {
            '(' => (ExprToken::Open, 1),
            ')' => (ExprToken::Close, 1),
            '!' if rest.starts_with("!=") => (ExprToken::NotEquals, 2),
            '!' => (ExprToken::Not, 1),
            '=' if rest.starts_with("==") => (ExprToken::Equals, 2),
            '&' if rest.starts_with("&&") => (ExprToken::And, 2),
            '|' if rest.starts_with("||") => (ExprToken::Or, 2),
            c if c == '_' || c.is_alphanumeric() => {
                let len = rest
                    .find(|c: char| !(c == '_' || c.is_alphanumeric()))
                    .unwrap_or(rest.len());
                (ExprToken::Symbol(&rest[..len]), len)
            }
            c => (ExprToken::Bad, c.len_utf8()),
        };
        tokens.push(token);
        rest = &rest[len..];
    }
    tokens
}

struct ExpressionParser<'p, 's> {
    tokens: Vec<ExprToken<'s>>,
    pos: usize,
    preprocessor: &'p Preprocessor,
}

impl ExpressionParser<'_, '_> {
    fn eat(&mut self, token: &ExprToken<'_>) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Option<bool> {
        let mut value = self.parse_and()?;
        while self.eat(&ExprToken::Or) {
            let right = self.parse_and()?;
            value = value || right;
        }
        Some(value)
    }

    fn parse_and(&mut self) -> Option<bool> {
        let mut value = self.parse_equality()?;
        while self.eat(&ExprToken::And) {
            let right = self.parse_equality()?;
            value = value && right;
        }
        Some(value)
    }

    fn parse_equality(&mut self) -> Option<bool> {
        let mut value = self.parse_unary()?;
        loop {
            if self.eat(&ExprToken::Equals) {
                value = value == self.parse_unary()?;
            } else if self.eat(&ExprToken::NotEquals) {
                value = value != self.parse_unary()?;
            } else {
                return Some(value);
            }
        }
    }

    fn parse_unary(&mut self) -> Option<bool> {
        if self.eat(&ExprToken::Not) {
            return self.parse_unary().map(|v| !v);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<bool> {
        if self.eat(&ExprToken::Open) {
            let value = self.parse_or()?;
            return self.eat(&ExprToken::Close).then_some(value);
        }
        match self.tokens.get(self.pos)? {
            ExprToken::Symbol(symbol) => {
                let symbol = *symbol;
                self.pos += 1;
                Some(match symbol {
                    "true" => true,
                    "false" => false,
                    _ => self.preprocessor.is_defined(symbol),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocessor(symbols: &[&str]) -> Preprocessor {
        let symbols: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        Preprocessor::new(&symbols)
    }

    fn eval(pp: &Preprocessor, text: &str) -> (bool, usize) {
        let mut diagnostics = Vec::new();
        let value = pp.evaluate(text, TextSpan::default(), &mut diagnostics);
        (value, diagnostics.len())
    }

    #[test]
    fn test_evaluate_expressions() {
        let pp = preprocessor(&["DEBUG", "TRACE"]);
        assert_eq!(eval(&pp, "DEBUG"), (true, 0));
        assert_eq!(eval(&pp, "!DEBUG"), (false, 0));
        assert_eq!(eval(&pp, "DEBUG && !RELEASE"), (true, 0));
        assert_eq!(eval(&pp, "RELEASE || (TRACE && true)"), (true, 0));
        assert_eq!(eval(&pp, "DEBUG == false"), (false, 0));
        assert_eq!(eval(&pp, "DEBUG != RELEASE"), (true, 0));
    }

    #[test]
    fn test_invalid_expression_reports() {
        let pp = preprocessor(&[]);
        assert_eq!(eval(&pp, "(A"), (false, 1));
        assert_eq!(eval(&pp, "A +"), (false, 1));
        assert_eq!(eval(&pp, ""), (false, 1));
    }

    #[test]
    fn test_if_else_branches() {
        let mut pp = preprocessor(&["A"]);
        let mut diagnostics = Vec::new();
        let d = pp.directive("#if B", 0, false, &mut diagnostics);
        assert!(!d.branch_taken);
        assert!(!pp.is_active());
        let d = pp.directive("#elif A", 0, false, &mut diagnostics);
        assert!(d.branch_taken);
        assert!(pp.is_active());
        let d = pp.directive("#else", 0, false, &mut diagnostics);
        assert!(!d.branch_taken);
        assert!(!pp.is_active());
        pp.directive("#endif", 0, false, &mut diagnostics);
        assert!(pp.is_active());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_nested_inactive_if_is_not_taken() {
        let mut pp = preprocessor(&["A"]);
        let mut diagnostics = Vec::new();
        pp.directive("#if false", 0, false, &mut diagnostics);
        let d = pp.directive("#if A", 0, false, &mut diagnostics);
        assert!(!d.is_active);
        assert!(!d.branch_taken);
        pp.directive("#endif", 0, false, &mut diagnostics);
        pp.directive("#endif", 0, false, &mut diagnostics);
        assert!(pp.is_active());
    }

    #[test]
    fn test_define_after_token() {
        let mut pp = preprocessor(&[]);
        let mut diagnostics = Vec::new();
        pp.directive("#define X", 0, false, &mut diagnostics);
        assert!(pp.is_defined("X"));
        pp.directive("#undef X", 0, true, &mut diagnostics);
        assert!(pp.is_defined("X"));
        assert!(diagnostics[0].is(&messages::PP_DEF_FOLLOWS_TOKEN));
    }

    #[test]
    fn test_unexpected_and_unknown_directives() {
        let mut pp = preprocessor(&[]);
        let mut diagnostics = Vec::new();
        let d = pp.directive("#endif", 0, false, &mut diagnostics);
        assert_eq!(d.kind, SyntaxKind::BadDirectiveTrivia);
        let d = pp.directive("#foo", 0, false, &mut diagnostics);
        assert_eq!(d.kind, SyntaxKind::BadDirectiveTrivia);
        let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![1028, 1024]);
    }

    #[test]
    fn test_error_and_warning() {
        let mut pp = preprocessor(&[]);
        let mut diagnostics = Vec::new();
        pp.directive("#error stop here", 4, false, &mut diagnostics);
        pp.directive("#warning careful", 20, false, &mut diagnostics);
        assert_eq!(diagnostics[0].args, vec!["stop here".to_string()]);
        assert!(!diagnostics[1].is_error());
        assert_eq!(diagnostics[0].span, TextSpan::new(4, 16));
    }

    #[test]
    fn test_finish_reports_open_blocks() {
        let mut pp = preprocessor(&[]);
        let mut diagnostics = Vec::new();
        pp.directive("#region R", 0, false, &mut diagnostics);
        pp.directive("#if true", 0, false, &mut diagnostics);
        pp.finish(10, &mut diagnostics);
        let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![1027, 1038]);
    }
}
