//! The C# scanner.
//!
//! Converts source text into tokens carrying their trivia. Leading trivia
//! holds everything between the previous token's trailing trivia and the
//! token text, including directives and disabled text. Trailing trivia stops
//! after the first end of line.

use crate::char_codes::*;
use crate::directives::Preprocessor;
use rsharp_ast::{is_formatting_char, SyntaxKind, SyntaxToken, SyntaxTrivia, TokenFlags};
use rsharp_core::text::TextSpan;
use rsharp_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use rsharp_options::{DocumentationMode, ParseOptions};
use tracing::trace;

/// Scanner state inside interpolated strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// The literal text of an interpolated string.
    Text { verbatim: bool },
    /// An interpolation hole. `depth` counts open brackets of any kind.
    Hole {
        verbatim: bool,
        depth: u32,
        in_format: bool,
    },
}

/// What a token body scan produced.
struct Lexed {
    kind: SyntaxKind,
    value: Option<String>,
    flags: TokenFlags,
}

impl Lexed {
    fn kind(kind: SyntaxKind) -> Self {
        Self {
            kind,
            value: None,
            flags: TokenFlags::NONE,
        }
    }
}

/// The scanner converts C# source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current byte offset.
    pos: usize,
    preprocessor: Preprocessor,
    documentation_mode: DocumentationMode,
    modes: Vec<Mode>,
    /// Diagnostics for the token being built.
    diagnostics: Vec<Diagnostic>,
    seen_token: bool,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str, options: &ParseOptions) -> Self {
        Self {
            text,
            pos: 0,
            preprocessor: Preprocessor::new(&options.preprocessor_symbols),
            documentation_mode: options.documentation_mode,
            modes: Vec::new(),
            diagnostics: Vec::new(),
            seen_token: false,
            done: false,
        }
    }

    /// Scan the whole text. The last token is always the end-of-file token.
    pub fn tokenize(mut self) -> Vec<SyntaxToken> {
        let mut tokens = Vec::with_capacity(self.text.len() / 4 + 1);
        loop {
            let token = self.next_token();
            let is_eof = token.kind == SyntaxKind::EndOfFileToken;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        trace!(count = tokens.len(), len = self.text.len(), "tokenized");
        tokens
    }

    /// Scan the next token. After the end-of-file token, keeps returning
    /// end-of-file tokens.
    pub fn next_token(&mut self) -> SyntaxToken {
        match self.modes.last().copied() {
            Some(Mode::Text { verbatim }) => return self.scan_interpolated_text(verbatim),
            Some(Mode::Hole {
                verbatim,
                in_format: true,
                ..
            }) => return self.scan_format_text(verbatim),
            _ => {}
        }

        let full_start = self.pos;
        let leading = self.scan_leading_trivia();
        let start = self.pos;

        let lexed = if self.is_eof() {
            self.finish();
            Lexed::kind(SyntaxKind::EndOfFileToken)
        } else {
            self.scan_token_body()
        };

        let mut token = SyntaxToken::new(lexed.kind, full_start as u32, &self.text[start..self.pos]);
        if let Some(value) = lexed.value {
            token.value_text = value;
        }
        token.flags = lexed.flags;
        if token.kind == SyntaxKind::IdentifierToken {
            token.contextual_kind =
                SyntaxKind::contextual_keyword(&token.value_text).unwrap_or(SyntaxKind::None);
        }
        token.leading = leading;
        if self.trivia_allowed() && token.kind != SyntaxKind::EndOfFileToken {
            token.trailing = self.scan_trailing_trivia();
        }
        token.diagnostics = std::mem::take(&mut self.diagnostics);
        if token.kind != SyntaxKind::EndOfFileToken {
            self.seen_token = true;
        }
        token
    }

    fn finish(&mut self) {
        if !self.done {
            self.preprocessor.finish(self.pos, &mut self.diagnostics);
            if !self.modes.is_empty() {
                self.report(&messages::UNTERMINATED_STRING_LIT, TextSpan::empty(self.pos as u32), &[]);
                self.modes.clear();
            }
            self.done = true;
        }
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` characters after the current one.
    #[inline]
    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn report(&mut self, message: &DiagnosticMessage, span: TextSpan, args: &[&str]) {
        self.diagnostics.push(Diagnostic::new(message, span, args));
    }

    fn span_from(&self, start: usize) -> TextSpan {
        TextSpan::from_bounds(start as u32, self.pos as u32)
    }

    fn trivia_allowed(&self) -> bool {
        !matches!(
            self.modes.last(),
            Some(Mode::Text { .. }) | Some(Mode::Hole { in_format: true, .. })
        )
    }

    /// Whether only whitespace precedes `pos` on its line.
    fn at_line_start(&self, pos: usize) -> bool {
        for ch in self.text[..pos].chars().rev() {
            if is_line_break(ch) {
                return true;
            }
            if !is_white_space(ch) {
                return false;
            }
        }
        true
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn scan_leading_trivia(&mut self) -> Vec<SyntaxTrivia> {
        let mut trivia = Vec::new();
        loop {
            if !self.preprocessor.is_active() {
                let eol = line_break_len(self.rest());
                if eol > 0 {
                    self.push_trivia(&mut trivia, SyntaxKind::EndOfLineTrivia, eol);
                    continue;
                }
                let end = self.disabled_text_end();
                if end > self.pos {
                    self.push_trivia(&mut trivia, SyntaxKind::DisabledTextTrivia, end - self.pos);
                    continue;
                }
            }
            let Some(ch) = self.peek() else {
                break;
            };
            if is_white_space(ch) {
                self.scan_whitespace(&mut trivia);
            } else if line_break_len(self.rest()) > 0 {
                let eol = line_break_len(self.rest());
                self.push_trivia(&mut trivia, SyntaxKind::EndOfLineTrivia, eol);
            } else if ch == '/' && self.peek_at(1) == Some('/') {
                self.scan_single_line_comment(&mut trivia);
            } else if ch == '/' && self.peek_at(1) == Some('*') {
                self.scan_multi_line_comment(&mut trivia);
            } else if ch == '#' && self.at_line_start(self.pos) {
                self.scan_directive(&mut trivia);
            } else {
                break;
            }
        }
        trivia
    }

    fn scan_trailing_trivia(&mut self) -> Vec<SyntaxTrivia> {
        let mut trivia = Vec::new();
        while let Some(ch) = self.peek() {
            if is_white_space(ch) {
                self.scan_whitespace(&mut trivia);
            } else if line_break_len(self.rest()) > 0 {
                let eol = line_break_len(self.rest());
                self.push_trivia(&mut trivia, SyntaxKind::EndOfLineTrivia, eol);
                break;
            } else if ch == '/' && self.peek_at(1) == Some('/') {
                self.scan_single_line_comment(&mut trivia);
            } else if ch == '/' && self.peek_at(1) == Some('*') {
                self.scan_multi_line_comment(&mut trivia);
            } else {
                break;
            }
        }
        trivia
    }

    fn push_trivia(&mut self, trivia: &mut Vec<SyntaxTrivia>, kind: SyntaxKind, len: usize) {
        let text = &self.text[self.pos..self.pos + len];
        trivia.push(SyntaxTrivia::text(kind, text));
        self.pos += len;
    }

    fn scan_whitespace(&mut self, trivia: &mut Vec<SyntaxTrivia>) {
        let len = self
            .rest()
            .char_indices()
            .find(|(_, c)| !is_white_space(*c))
            .map_or(self.rest().len(), |(i, _)| i);
        self.push_trivia(trivia, SyntaxKind::WhitespaceTrivia, len);
    }

    fn scan_single_line_comment(&mut self, trivia: &mut Vec<SyntaxTrivia>) {
        let rest = self.rest();
        let len = find_line_end(rest);
        let is_doc = rest.starts_with("///")
            && !rest.starts_with("////")
            && self.documentation_mode != DocumentationMode::None;
        let kind = if is_doc {
            SyntaxKind::SingleLineDocumentationCommentTrivia
        } else {
            SyntaxKind::SingleLineCommentTrivia
        };
        self.push_trivia(trivia, kind, len);
    }

    fn scan_multi_line_comment(&mut self, trivia: &mut Vec<SyntaxTrivia>) {
        let start = self.pos;
        let rest = self.rest();
        let len = match memchr::memmem::find(&rest.as_bytes()[2..], b"*/") {
            Some(i) => i + 4,
            None => {
                self.report(&messages::OPEN_ENDED_COMMENT, TextSpan::new(start as u32, 2), &[]);
                rest.len()
            }
        };
        let is_doc = rest.starts_with("/**")
            && !rest.starts_with("/**/")
            && self.documentation_mode != DocumentationMode::None;
        let kind = if is_doc {
            SyntaxKind::MultiLineDocumentationCommentTrivia
        } else {
            SyntaxKind::MultiLineCommentTrivia
        };
        self.push_trivia(trivia, kind, len);
    }

    fn scan_directive(&mut self, trivia: &mut Vec<SyntaxTrivia>) {
        let start = self.pos;
        let len = find_line_end(self.rest());
        let text = &self.text[start..start + len];
        let directive =
            self.preprocessor
                .directive(text, start, self.seen_token, &mut self.diagnostics);
        trivia.push(SyntaxTrivia::Directive(directive));
        self.pos += len;
    }

    /// End of the disabled text starting at the current line: the start of
    /// the next line whose first non-whitespace character is `#`.
    fn disabled_text_end(&self) -> usize {
        let mut line = self.pos;
        loop {
            let rest = &self.text[line..];
            if rest.trim_start_matches(is_white_space).starts_with('#') {
                return line;
            }
            let end = line + find_line_end(rest);
            let eol = line_break_len(&self.text[end..]);
            if eol == 0 {
                return end;
            }
            line = end + eol;
        }
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    fn scan_token_body(&mut self) -> Lexed {
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Lexed::kind(SyntaxKind::EndOfFileToken);
        };
        let next = self.peek_at(1);
        let next2 = self.peek_at(2);

        macro_rules! op {
            ($len:expr, $kind:ident) => {{
                self.pos += $len;
                Lexed::kind(SyntaxKind::$kind)
            }};
        }

        match ch {
            '(' | '[' | '{' => {
                self.enter_bracket();
                self.pos += 1;
                Lexed::kind(match ch {
                    '(' => SyntaxKind::OpenParenToken,
                    '[' => SyntaxKind::OpenBracketToken,
                    _ => SyntaxKind::OpenBraceToken,
                })
            }
            ')' => {
                self.leave_bracket(false);
                op!(1, CloseParenToken)
            }
            ']' => {
                self.leave_bracket(false);
                op!(1, CloseBracketToken)
            }
            '}' => {
                self.leave_bracket(true);
                op!(1, CloseBraceToken)
            }
            ';' => op!(1, SemicolonToken),
            ',' => op!(1, CommaToken),
            '~' => op!(1, TildeToken),
            ':' if next == Some(':') => op!(2, ColonColonToken),
            ':' => {
                if let Some(Mode::Hole {
                    depth: 0,
                    in_format,
                    ..
                }) = self.modes.last_mut()
                {
                    *in_format = true;
                }
                op!(1, ColonToken)
            }
            '?' if next == Some('?') && next2 == Some('=') => op!(3, QuestionQuestionEqualsToken),
            '?' if next == Some('?') => op!(2, QuestionQuestionToken),
            '?' => op!(1, QuestionToken),
            '.' if next.is_some_and(is_decimal_digit) => self.scan_number(),
            '.' if next == Some('.') => op!(2, DotDotToken),
            '.' => op!(1, DotToken),
            '<' if next == Some('<') && next2 == Some('=') => op!(3, LessThanLessThanEqualsToken),
            '<' if next == Some('<') => op!(2, LessThanLessThanToken),
            '<' if next == Some('=') => op!(2, LessThanEqualsToken),
            '<' => op!(1, LessThanToken),
            // `>>` and `>>>` are assembled by the parser from adjacent `>` tokens.
            '>' if next == Some('=') => op!(2, GreaterThanEqualsToken),
            '>' => op!(1, GreaterThanToken),
            '=' if next == Some('=') => op!(2, EqualsEqualsToken),
            '=' if next == Some('>') => op!(2, EqualsGreaterThanToken),
            '=' => op!(1, EqualsToken),
            '!' if next == Some('=') => op!(2, ExclamationEqualsToken),
            '!' => op!(1, ExclamationToken),
            '+' if next == Some('+') => op!(2, PlusPlusToken),
            '+' if next == Some('=') => op!(2, PlusEqualsToken),
            '+' => op!(1, PlusToken),
            '-' if next == Some('-') => op!(2, MinusMinusToken),
            '-' if next == Some('=') => op!(2, MinusEqualsToken),
            '-' if next == Some('>') => op!(2, MinusGreaterThanToken),
            '-' => op!(1, MinusToken),
            '*' if next == Some('=') => op!(2, AsteriskEqualsToken),
            '*' => op!(1, AsteriskToken),
            '/' if next == Some('=') => op!(2, SlashEqualsToken),
            '/' => op!(1, SlashToken),
            '%' if next == Some('=') => op!(2, PercentEqualsToken),
            '%' => op!(1, PercentToken),
            '&' if next == Some('&') => op!(2, AmpersandAmpersandToken),
            '&' if next == Some('=') => op!(2, AmpersandEqualsToken),
            '&' => op!(1, AmpersandToken),
            '|' if next == Some('|') => op!(2, BarBarToken),
            '|' if next == Some('=') => op!(2, BarEqualsToken),
            '|' => op!(1, BarToken),
            '^' if next == Some('=') => op!(2, CaretEqualsToken),
            '^' => op!(1, CaretToken),
            '"' => self.scan_string_literal(),
            '\'' => self.scan_character_literal(),
            '@' => self.scan_verbatim(),
            '$' => self.scan_dollar(),
            '0'..='9' => self.scan_number(),
            '\\' if matches!(next, Some('u') | Some('U')) => self.scan_identifier(false),
            c if is_identifier_start(c) => self.scan_identifier(false),
            '#' => {
                self.pos += 1;
                self.report(&messages::BAD_DIRECTIVE_PLACEMENT, self.span_from(start), &[]);
                Lexed::kind(SyntaxKind::BadToken)
            }
            c => {
                self.bump(c);
                let text = c.to_string();
                self.report(&messages::UNEXPECTED_CHARACTER, self.span_from(start), &[&text]);
                Lexed::kind(SyntaxKind::BadToken)
            }
        }
    }

    fn enter_bracket(&mut self) {
        if let Some(Mode::Hole { depth, .. }) = self.modes.last_mut() {
            *depth += 1;
        }
    }

    /// Close a bracket. A `}` at depth zero closes the interpolation hole.
    fn leave_bracket(&mut self, is_brace: bool) {
        match self.modes.last_mut() {
            Some(Mode::Hole { depth, .. }) if *depth > 0 => *depth -= 1,
            Some(Mode::Hole { depth: 0, .. }) if is_brace => {
                self.modes.pop();
            }
            _ => {}
        }
    }

    fn scan_number(&mut self) -> Lexed {
        let start = self.pos;
        let mut valid = true;
        let rest = self.rest();
        if rest.starts_with("0x") || rest.starts_with("0X") {
            self.pos += 2;
            valid = self.eat_digits(is_hex_digit) > 0;
        } else if rest.starts_with("0b") || rest.starts_with("0B") {
            self.pos += 2;
            valid = self.eat_digits(is_binary_digit) > 0;
        } else {
            self.eat_digits(is_decimal_digit);
            if self.peek() == Some('.') && self.peek_at(1).is_some_and(is_decimal_digit) {
                self.pos += 1;
                self.eat_digits(is_decimal_digit);
            }
            if matches!(self.peek(), Some('e') | Some('E')) {
                self.pos += 1;
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.pos += 1;
                }
                valid = self.eat_digits(is_decimal_digit) > 0;
            }
        }
        let mut suffix = 0;
        while suffix < 2
            && matches!(
                self.peek(),
                Some('u' | 'U' | 'l' | 'L' | 'f' | 'F' | 'd' | 'D' | 'm' | 'M')
            )
        {
            self.pos += 1;
            suffix += 1;
        }
        if !valid {
            self.report(&messages::INVALID_NUMBER, self.span_from(start), &[]);
        }
        Lexed::kind(SyntaxKind::NumericLiteralToken)
    }

    /// Consume digits and `_` separators; returns the number of digits.
    fn eat_digits(&mut self, is_digit: fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if is_digit(ch) {
                count += 1;
            } else if ch != '_' {
                break;
            }
            self.pos += 1;
        }
        count
    }

    fn scan_character_literal(&mut self) -> Lexed {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        let mut closed = false;
        while let Some(ch) = self.peek() {
            match ch {
                '\'' => {
                    self.pos += 1;
                    closed = true;
                    break;
                }
                '\\' => self.scan_escape(&mut value),
                c if is_line_break(c) => break,
                c => {
                    value.push(c);
                    self.bump(c);
                }
            }
        }
        if !closed {
            self.report(&messages::NEWLINE_IN_CONST, self.span_from(start), &[]);
        } else if value.is_empty() {
            self.report(&messages::EMPTY_CHAR_CONST, self.span_from(start), &[]);
        } else if value.chars().count() > 1 {
            self.report(&messages::TOO_MANY_CHARS_IN_CONST, self.span_from(start), &[]);
        }
        Lexed {
            kind: SyntaxKind::CharacterLiteralToken,
            value: Some(value),
            flags: TokenFlags::NONE,
        }
    }

    fn scan_string_literal(&mut self) -> Lexed {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        let mut closed = false;
        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.pos += 1;
                    closed = true;
                    break;
                }
                '\\' => self.scan_escape(&mut value),
                c if is_line_break(c) => break,
                c => {
                    value.push(c);
                    self.bump(c);
                }
            }
        }
        if !closed {
            self.report(&messages::NEWLINE_IN_CONST, self.span_from(start), &[]);
        }
        Lexed {
            kind: SyntaxKind::StringLiteralToken,
            value: Some(value),
            flags: TokenFlags::NONE,
        }
    }

    /// `@"..."`, with the scanner positioned on `"`.
    fn scan_verbatim_string_literal(&mut self, start: usize) -> Lexed {
        self.pos += 1;
        let mut value = String::new();
        let mut closed = false;
        while let Some(ch) = self.peek() {
            if ch == '"' {
                if self.peek_at(1) == Some('"') {
                    value.push('"');
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                closed = true;
                break;
            }
            value.push(ch);
            self.bump(ch);
        }
        if !closed {
            self.report(&messages::UNTERMINATED_STRING_LIT, self.span_from(start), &[]);
        }
        Lexed {
            kind: SyntaxKind::StringLiteralToken,
            value: Some(value),
            flags: TokenFlags::NONE,
        }
    }

    /// Scan an escape sequence at `\` and append its value.
    fn scan_escape(&mut self, value: &mut String) {
        let start = self.pos;
        self.pos += 1;
        let Some(ch) = self.peek() else {
            self.report(&messages::ILLEGAL_ESCAPE, self.span_from(start), &[]);
            return;
        };
        let simple = match ch {
            '\'' => Some('\''),
            '"' => Some('"'),
            '\\' => Some('\\'),
            '0' => Some('\0'),
            'a' => Some('\u{0007}'),
            'b' => Some('\u{0008}'),
            'f' => Some('\u{000C}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{000B}'),
            _ => None,
        };
        if let Some(c) = simple {
            self.pos += 1;
            value.push(c);
            return;
        }
        let decoded = match ch {
            'x' => {
                self.pos += 1;
                self.scan_hex(1, 4)
            }
            'u' => {
                self.pos += 1;
                self.scan_hex(4, 4)
            }
            'U' => {
                self.pos += 1;
                self.scan_hex(8, 8)
            }
            c => {
                self.bump(c);
                None
            }
        };
        match decoded.and_then(char::from_u32) {
            Some(c) => value.push(c),
            None => self.report(&messages::ILLEGAL_ESCAPE, self.span_from(start), &[]),
        }
    }

    /// Read between `min` and `max` hex digits.
    fn scan_hex(&mut self, min: usize, max: usize) -> Option<u32> {
        let digits: String = self.rest().chars().take(max).take_while(|c| is_hex_digit(*c)).collect();
        self.pos += digits.len();
        if digits.len() < min {
            return None;
        }
        u32::from_str_radix(&digits, 16).ok()
    }

    fn scan_identifier(&mut self, verbatim: bool) -> Lexed {
        let start = self.pos;
        let mut value = String::new();
        let mut escaped = false;
        let mut dropped = false;
        loop {
            match self.peek() {
                Some('\\') if matches!(self.peek_at(1), Some('u') | Some('U')) => {
                    let save = self.pos;
                    let long = self.peek_at(1) == Some('U');
                    self.pos += 2;
                    let decoded = if long { self.scan_hex(8, 8) } else { self.scan_hex(4, 4) };
                    match decoded.and_then(char::from_u32) {
                        Some(c) if is_identifier_part(c) => {
                            escaped = true;
                            if is_formatting_char(c) {
                                dropped = true;
                            } else {
                                value.push(c);
                            }
                        }
                        _ => {
                            self.pos = save;
                            break;
                        }
                    }
                }
                Some(c) if is_identifier_part(c) => {
                    if is_formatting_char(c) {
                        dropped = true;
                    } else {
                        value.push(c);
                    }
                    self.bump(c);
                }
                _ => break,
            }
        }

        if self.pos == start {
            // A `\u` escape that does not name an identifier character.
            self.pos += 1;
            self.report(&messages::UNEXPECTED_CHARACTER, self.span_from(start), &["\\"]);
            return Lexed::kind(SyntaxKind::BadToken);
        }

        let mut flags = TokenFlags::NONE;
        if verbatim {
            flags |= TokenFlags::VERBATIM_IDENTIFIER;
        }
        if escaped {
            flags |= TokenFlags::UNICODE_ESCAPE;
        }
        let kind = if verbatim || escaped || dropped {
            SyntaxKind::IdentifierToken
        } else {
            SyntaxKind::from_keyword_text(&value).unwrap_or(SyntaxKind::IdentifierToken)
        };
        Lexed {
            kind,
            value: Some(value),
            flags,
        }
    }

    /// `@identifier`, `@"..."` or `@$"..."`.
    fn scan_verbatim(&mut self) -> Lexed {
        let start = self.pos;
        match (self.peek_at(1), self.peek_at(2)) {
            (Some('"'), _) => {
                self.pos += 1;
                self.scan_verbatim_string_literal(start)
            }
            (Some('$'), Some('"')) => {
                self.pos += 3;
                self.modes.push(Mode::Text { verbatim: true });
                Lexed::kind(SyntaxKind::InterpolatedVerbatimStringStartToken)
            }
            (Some(c), escape)
                if is_identifier_start(c) || (c == '\\' && matches!(escape, Some('u' | 'U'))) =>
            {
                self.pos += 1;
                self.scan_identifier(true)
            }
            _ => {
                self.pos += 1;
                self.report(&messages::EXPECTED_VERBATIM_LITERAL, self.span_from(start), &[]);
                Lexed::kind(SyntaxKind::BadToken)
            }
        }
    }

    /// `$"..."` or `$@"..."`.
    fn scan_dollar(&mut self) -> Lexed {
        let start = self.pos;
        match (self.peek_at(1), self.peek_at(2)) {
            (Some('"'), _) => {
                self.pos += 2;
                self.modes.push(Mode::Text { verbatim: false });
                Lexed::kind(SyntaxKind::InterpolatedStringStartToken)
            }
            (Some('@'), Some('"')) => {
                self.pos += 3;
                self.modes.push(Mode::Text { verbatim: true });
                Lexed::kind(SyntaxKind::InterpolatedVerbatimStringStartToken)
            }
            _ => {
                self.pos += 1;
                self.report(&messages::UNEXPECTED_CHARACTER, self.span_from(start), &["$"]);
                Lexed::kind(SyntaxKind::BadToken)
            }
        }
    }

    // ========================================================================
    // Interpolated strings
    // ========================================================================

    /// Scan the next piece of an interpolated string's text: a text token,
    /// the `{` opening a hole, or the closing `"`.
    fn scan_interpolated_text(&mut self, verbatim: bool) -> SyntaxToken {
        let start = self.pos;
        let mut value = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '"' if verbatim && self.peek_at(1) == Some('"') => {
                    value.push('"');
                    self.pos += 2;
                }
                '"' => break,
                '{' if self.peek_at(1) == Some('{') => {
                    value.push('{');
                    self.pos += 2;
                }
                '{' => break,
                '}' if self.peek_at(1) == Some('}') => {
                    value.push('}');
                    self.pos += 2;
                }
                '}' => {
                    let at = TextSpan::new(self.pos as u32, 1);
                    self.report(&messages::UNESCAPED_CURLY, at, &["}"]);
                    value.push('}');
                    self.pos += 1;
                }
                '\\' if !verbatim => self.scan_escape(&mut value),
                c if !verbatim && is_line_break(c) => break,
                c => {
                    value.push(c);
                    self.bump(c);
                }
            }
        }

        if self.pos > start {
            let mut token = SyntaxToken::new(
                SyntaxKind::InterpolatedStringTextToken,
                start as u32,
                &self.text[start..self.pos],
            );
            token.value_text = value;
            token.diagnostics = std::mem::take(&mut self.diagnostics);
            return token;
        }

        match self.peek() {
            Some('{') => {
                self.pos += 1;
                self.modes.push(Mode::Hole {
                    verbatim,
                    depth: 0,
                    in_format: false,
                });
                let mut token = SyntaxToken::new(SyntaxKind::OpenBraceToken, start as u32, "{");
                token.trailing = self.scan_trailing_trivia();
                token.diagnostics = std::mem::take(&mut self.diagnostics);
                token
            }
            Some('"') => {
                self.pos += 1;
                self.modes.pop();
                let mut token =
                    SyntaxToken::new(SyntaxKind::InterpolatedStringEndToken, start as u32, "\"");
                if self.trivia_allowed() {
                    token.trailing = self.scan_trailing_trivia();
                }
                token.diagnostics = std::mem::take(&mut self.diagnostics);
                token
            }
            _ => {
                self.modes.pop();
                let mut token =
                    SyntaxToken::missing(SyntaxKind::InterpolatedStringEndToken, start as u32);
                token.add_diagnostic(Diagnostic::new(
                    &messages::UNTERMINATED_STRING_LIT,
                    TextSpan::empty(start as u32),
                    &[],
                ));
                token
            }
        }
    }

    /// The format specifier after `:` in a hole, up to the closing `}`.
    fn scan_format_text(&mut self, verbatim: bool) -> SyntaxToken {
        let start = self.pos;
        let mut value = String::new();
        let mut closed = false;
        while let Some(ch) = self.peek() {
            match ch {
                '}' => {
                    closed = true;
                    break;
                }
                '"' if verbatim && self.peek_at(1) == Some('"') => {
                    value.push('"');
                    self.pos += 2;
                }
                '"' => break,
                '\\' if !verbatim => self.scan_escape(&mut value),
                c if !verbatim && is_line_break(c) => break,
                c => {
                    value.push(c);
                    self.bump(c);
                }
            }
        }

        if closed {
            if let Some(Mode::Hole { in_format, .. }) = self.modes.last_mut() {
                *in_format = false;
            }
        } else {
            // The hole never closes; hand the rest back to the string text.
            self.modes.pop();
        }

        let mut token = SyntaxToken::new(
            SyntaxKind::InterpolatedStringTextToken,
            start as u32,
            &self.text[start..self.pos],
        );
        token.value_text = value;
        if token.text.is_empty() {
            token.add_diagnostic(Diagnostic::new(
                &messages::EMPTY_FORMAT_SPECIFIER,
                TextSpan::empty(start as u32),
                &[],
            ));
        }
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        token.diagnostics.append(&mut diagnostics);
        token
    }
}

impl Iterator for Scanner<'_> {
    type Item = SyntaxToken;

    /// Yields every token up to and including the end-of-file token.
    fn next(&mut self) -> Option<SyntaxToken> {
        if self.done {
            return None;
        }
        Some(self.next_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<SyntaxToken> {
        Scanner::new(text, &ParseOptions::default()).tokenize()
    }

    #[test]
    fn test_eof_holds_trailing_trivia() {
        let tokens = scan("a // c\n  ");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].trailing.len(), 3);
        assert_eq!(tokens[1].kind, SyntaxKind::EndOfFileToken);
        assert_eq!(tokens[1].leading_width(), 2);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let scanner = Scanner::new("x y", &ParseOptions::default());
        let kinds: Vec<_> = scanner.map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::IdentifierToken,
                SyntaxKind::IdentifierToken,
                SyntaxKind::EndOfFileToken
            ]
        );
    }

    #[test]
    fn test_hole_depth_tracks_nested_braces() {
        let tokens = scan("$\"{new[] {1}[0]}\"");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds.last(), Some(&SyntaxKind::EndOfFileToken));
        assert_eq!(
            kinds[kinds.len() - 2],
            SyntaxKind::InterpolatedStringEndToken
        );
        assert!(tokens.iter().all(|t| t.diagnostics.is_empty()));
    }
}
