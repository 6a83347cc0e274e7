//! Names and types, plus the token-level scans used to decide whether a
//! type starts at some position without building nodes.

use super::Parser;
use crate::utilities::{can_follow_type_argument_list, can_start_expression, can_start_type};
use rsharp_ast::*;
use rsharp_core::ensure_sufficient_stack;
use rsharp_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use rsharp_options::Feature;

/// Nesting limit for speculative type scans.
const MAX_SCAN_DEPTH: u32 = 32;

/// How a type is being parsed; controls which suffixes it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeMode {
    Normal,
    /// After `new`: bracketed ranks belong to the creation expression.
    NewExpression,
    /// The right operand of `is` or `as`.
    AfterIs,
}

/// How a simple name treats a following `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameMode {
    /// `<` always opens a type argument list.
    Type,
    /// `<` opens a type argument list only if what follows scans as one.
    Expression,
}

impl Parser {
    // ========================================================================
    // Identifiers
    // ========================================================================

    pub(crate) fn parse_identifier_token(&mut self) -> SyntaxToken {
        if self.current_kind() == SyntaxKind::IdentifierToken {
            self.eat_token()
        } else {
            self.missing(SyntaxKind::IdentifierToken)
        }
    }

    pub(crate) fn parse_identifier_name(&mut self) -> IdentifierName {
        IdentifierName {
            identifier: self.parse_identifier_token(),
        }
    }

    /// A missing name reported with `message` rather than "identifier expected".
    pub(crate) fn missing_identifier_name(&mut self, message: &DiagnosticMessage) -> IdentifierName {
        let diagnostic = self.diagnostic_here(message, &[]);
        IdentifierName {
            identifier: self.missing_with(SyntaxKind::IdentifierToken, diagnostic),
        }
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Parse a possibly qualified name: `A`, `A.B<C>`, `global::A.B`.
    pub(crate) fn parse_qualified_name(&mut self, mode: NameMode) -> NameSyntax {
        let mut name = self.parse_alias_qualified_or_simple_name(mode);
        let mut empty_segment = false;
        loop {
            let dot_token = match self.current_kind() {
                SyntaxKind::DotToken => self.eat_token(),
                SyntaxKind::DotDotToken => {
                    self.split_current(SyntaxKind::DotToken, 1, SyntaxKind::DotToken);
                    self.eat_token()
                }
                SyntaxKind::ColonColonToken => self.recover_colon_colon(),
                _ => break,
            };
            let right = self.parse_name_segment(mode, &mut empty_segment);
            name = QualifiedName {
                left: Box::new(name),
                dot_token,
                right,
            }
            .into();
        }
        name
    }

    /// A `::` after the first segment reads as `.`: the `::` becomes skipped
    /// trivia of a missing dot.
    fn recover_colon_colon(&mut self) -> SyntaxToken {
        let mut colon_colon = self.advance();
        let span = colon_colon.span();
        colon_colon.add_diagnostic(Diagnostic::new(&messages::UNEXPECTED_ALIASED_NAME, span, &[]));
        self.pending_skipped.push(colon_colon);
        let mut dot = self.missing_silent(SyntaxKind::DotToken);
        self.attach_pending(&mut dot);
        dot
    }

    /// The segment after a dot. Consecutive empty segments report once.
    fn parse_name_segment(&mut self, mode: NameMode, empty_segment: &mut bool) -> SimpleNameSyntax {
        if self.current_kind() == SyntaxKind::IdentifierToken {
            *empty_segment = false;
            return self.parse_simple_name(mode);
        }
        let identifier = if *empty_segment {
            self.missing_silent(SyntaxKind::IdentifierToken)
        } else {
            self.missing(SyntaxKind::IdentifierToken)
        };
        *empty_segment = true;
        IdentifierName { identifier }.into()
    }

    pub(crate) fn parse_alias_qualified_or_simple_name(&mut self, mode: NameMode) -> NameSyntax {
        if self.current_kind() == SyntaxKind::IdentifierToken
            && self.peek_kind(1) == SyntaxKind::ColonColonToken
        {
            let identifier = if self.at_contextual(SyntaxKind::GlobalKeyword) {
                self.eat_contextual(SyntaxKind::GlobalKeyword)
            } else {
                self.eat_token()
            };
            let colon_colon_token = self.eat_token();
            let name = self.parse_simple_name(mode);
            return AliasQualifiedName {
                alias: IdentifierName { identifier },
                colon_colon_token,
                name,
            }
            .into();
        }
        self.parse_simple_name(mode).into()
    }

    pub(crate) fn parse_simple_name(&mut self, mode: NameMode) -> SimpleNameSyntax {
        let identifier = self.parse_identifier_token();
        if !identifier.is_missing() && self.current_kind() == SyntaxKind::LessThanToken {
            let is_generic = match mode {
                NameMode::Type => true,
                NameMode::Expression => self.is_type_argument_list_in_expression(),
            };
            if is_generic {
                let type_argument_list = self.parse_type_argument_list();
                return GenericName {
                    identifier,
                    type_argument_list,
                }
                .into();
            }
        }
        IdentifierName { identifier }.into()
    }

    /// In an expression, `A<B>` is generic only if the argument list scans
    /// and the token after it is one that cannot continue a comparison.
    pub(crate) fn is_type_argument_list_in_expression(&self) -> bool {
        self.scan_type_argument_list(0, 0)
            .is_some_and(|end| can_follow_type_argument_list(self.peek_kind(end)))
    }

    pub(crate) fn parse_type_argument_list(&mut self) -> TypeArgumentList {
        let less_than_token = self.eat_token();
        let mut arguments = SeparatedList::new();
        if matches!(
            self.current_kind(),
            SyntaxKind::CommaToken | SyntaxKind::GreaterThanToken
        ) {
            arguments.push(self.omitted_type_argument());
            while self.current_kind() == SyntaxKind::CommaToken {
                arguments.push_separator(self.eat_token());
                arguments.push(self.omitted_type_argument());
            }
        } else {
            loop {
                arguments.push(self.parse_type_argument());
                match self.eat_optional(SyntaxKind::CommaToken) {
                    Some(comma) => arguments.push_separator(comma),
                    None => break,
                }
            }
        }
        let greater_than_token = self.expect(SyntaxKind::GreaterThanToken);
        TypeArgumentList {
            less_than_token,
            arguments,
            greater_than_token,
        }
    }

    fn omitted_type_argument(&self) -> TypeSyntax {
        OmittedTypeArgument {
            omitted_type_argument_token: SyntaxToken::new(
                SyntaxKind::OmittedTypeArgumentToken,
                self.current().position,
                "",
            ),
        }
        .into()
    }

    /// A type argument. Attributes and variance keywords are not allowed
    /// here; they are kept as skipped trivia in front of the argument.
    fn parse_type_argument(&mut self) -> TypeSyntax {
        if self.current_kind() == SyntaxKind::OpenBracketToken {
            let lists = self.parse_attribute_lists();
            if let (Some(first), Some(last)) = (lists.first(), lists.last()) {
                let span = first.span().union(&last.span());
                let diagnostic = Diagnostic::new(&messages::ATTRIBUTES_NOT_ALLOWED, span, &[]);
                let start = self.pending_skipped.len();
                for list in &lists {
                    self.skip_node(list, None);
                }
                if let Some(token) = self.pending_skipped.get_mut(start) {
                    token.add_diagnostic(diagnostic);
                }
            }
        }
        if matches!(
            self.current_kind(),
            SyntaxKind::InKeyword | SyntaxKind::OutKeyword
        ) {
            self.skip_token_with(&messages::ILLEGAL_VARIANCE_SYNTAX);
        }
        if can_start_type(self.current_kind()) || self.current_kind() == SyntaxKind::RefKeyword {
            self.parse_type(TypeMode::Normal)
        } else {
            self.missing_identifier_name(&messages::TYPE_EXPECTED).into()
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn parse_type(&mut self, mode: TypeMode) -> TypeSyntax {
        if !self.enter() {
            return IdentifierName {
                identifier: self.missing_silent(SyntaxKind::IdentifierToken),
            }
            .into();
        }
        let ty = ensure_sufficient_stack(|| {
            if self.current_kind() == SyntaxKind::RefKeyword {
                self.parse_ref_type(mode).into()
            } else {
                self.parse_type_core(mode)
            }
        });
        self.leave();
        ty
    }

    fn parse_ref_type(&mut self, mode: TypeMode) -> RefType {
        let mut ref_keyword = self.eat_token();
        self.check_feature(&mut ref_keyword, Feature::RefLocalsReturns);
        let readonly_keyword = self.eat_optional(SyntaxKind::ReadOnlyKeyword).map(|mut token| {
            self.check_feature(&mut token, Feature::ReadOnlyReferences);
            token
        });
        RefType {
            ref_keyword,
            readonly_keyword,
            ty: Box::new(self.parse_type_core(mode)),
        }
    }

    fn parse_type_core(&mut self, mode: TypeMode) -> TypeSyntax {
        let kind = self.current_kind();
        let mut ty: TypeSyntax = if kind.is_predefined_type() {
            PredefinedType {
                keyword: self.eat_token(),
            }
            .into()
        } else if kind == SyntaxKind::IdentifierToken {
            self.parse_qualified_name(NameMode::Type).into()
        } else if kind == SyntaxKind::OpenParenToken {
            self.parse_tuple_type().into()
        } else {
            self.missing_identifier_name(&messages::TYPE_EXPECTED).into()
        };

        loop {
            match self.current_kind() {
                SyntaxKind::QuestionToken
                    if !matches!(ty, TypeSyntax::NullableType(_))
                        && self.question_is_nullable(mode) =>
                {
                    ty = NullableType {
                        element_type: Box::new(ty),
                        question_token: self.eat_token(),
                    }
                    .into();
                }
                SyntaxKind::AsteriskToken if mode != TypeMode::AfterIs => {
                    ty = PointerType {
                        element_type: Box::new(ty),
                        asterisk_token: self.eat_token(),
                    }
                    .into();
                }
                SyntaxKind::OpenBracketToken
                    if mode != TypeMode::NewExpression && self.at_omitted_rank() =>
                {
                    let mut rank_specifiers = Vec::new();
                    while self.current_kind() == SyntaxKind::OpenBracketToken
                        && self.at_omitted_rank()
                    {
                        rank_specifiers.push(self.parse_omitted_rank_specifier());
                    }
                    ty = ArrayType {
                        element_type: Box::new(ty),
                        rank_specifiers,
                    }
                    .into();
                }
                _ => break,
            }
        }
        ty
    }

    /// After `is`/`as`, `?` is a nullable suffix only when a conditional
    /// expression could not continue from it.
    fn question_is_nullable(&self, mode: TypeMode) -> bool {
        mode != TypeMode::AfterIs || !can_start_expression(self.peek_kind(1))
    }

    /// `[` followed by commas and `]`.
    pub(crate) fn at_omitted_rank(&self) -> bool {
        let mut n = 1;
        while self.peek_kind(n) == SyntaxKind::CommaToken {
            n += 1;
        }
        self.peek_kind(n) == SyntaxKind::CloseBracketToken
    }

    pub(crate) fn parse_omitted_rank_specifier(&mut self) -> ArrayRankSpecifier {
        let open_bracket_token = self.eat_token();
        let mut sizes = SeparatedList::single(self.omitted_array_size());
        while self.current_kind() == SyntaxKind::CommaToken {
            sizes.push_separator(self.eat_token());
            sizes.push(self.omitted_array_size());
        }
        ArrayRankSpecifier {
            open_bracket_token,
            sizes,
            close_bracket_token: self.expect(SyntaxKind::CloseBracketToken),
        }
    }

    pub(crate) fn omitted_array_size(&self) -> ExpressionSyntax {
        OmittedArraySizeExpression {
            omitted_array_size_expression_token: SyntaxToken::new(
                SyntaxKind::OmittedArraySizeExpressionToken,
                self.current().position,
                "",
            ),
        }
        .into()
    }

    fn parse_tuple_type(&mut self) -> TupleType {
        let mut open_paren_token = self.eat_token();
        self.check_feature(&mut open_paren_token, Feature::Tuples);
        let mut elements = SeparatedList::new();
        loop {
            let ty = if can_start_type(self.current_kind())
                || self.current_kind() == SyntaxKind::RefKeyword
            {
                self.parse_type(TypeMode::Normal)
            } else {
                self.missing_identifier_name(&messages::TYPE_EXPECTED).into()
            };
            let identifier = self.eat_optional(SyntaxKind::IdentifierToken);
            elements.push(TupleElement { ty, identifier });
            match self.eat_optional(SyntaxKind::CommaToken) {
                Some(comma) => elements.push_separator(comma),
                None => break,
            }
        }
        let mut close_paren_token = self.expect(SyntaxKind::CloseParenToken);
        if elements.len() < 2 {
            let span = open_paren_token.span().union(&close_paren_token.span());
            close_paren_token.add_diagnostic(Diagnostic::new(
                &messages::TUPLE_TOO_FEW_ELEMENTS,
                span,
                &[],
            ));
        }
        TupleType {
            open_paren_token,
            elements,
            close_paren_token,
        }
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    /// Scan a type starting `offset` tokens ahead without consuming anything.
    /// Returns the offset just past the type.
    pub(crate) fn scan_type(&self, offset: usize) -> Option<usize> {
        self.scan_type_at(offset, 0)
    }

    fn scan_type_at(&self, mut n: usize, depth: u32) -> Option<usize> {
        if depth > MAX_SCAN_DEPTH {
            return None;
        }
        if self.peek_kind(n) == SyntaxKind::RefKeyword {
            n += 1;
            if self.peek_kind(n) == SyntaxKind::ReadOnlyKeyword {
                n += 1;
            }
        }
        let kind = self.peek_kind(n);
        n = if kind.is_predefined_type() {
            n + 1
        } else if kind == SyntaxKind::IdentifierToken {
            self.scan_name(n, depth)?
        } else if kind == SyntaxKind::OpenParenToken {
            self.scan_tuple_type(n, depth)?
        } else {
            return None;
        };
        loop {
            match self.peek_kind(n) {
                SyntaxKind::QuestionToken | SyntaxKind::AsteriskToken => n += 1,
                SyntaxKind::OpenBracketToken => {
                    let mut end = n + 1;
                    while self.peek_kind(end) == SyntaxKind::CommaToken {
                        end += 1;
                    }
                    if self.peek_kind(end) != SyntaxKind::CloseBracketToken {
                        break;
                    }
                    n = end + 1;
                }
                _ => break,
            }
        }
        Some(n)
    }

    fn scan_name(&self, mut n: usize, depth: u32) -> Option<usize> {
        n += 1;
        if self.peek_kind(n) == SyntaxKind::ColonColonToken
            && self.peek_kind(n + 1) == SyntaxKind::IdentifierToken
        {
            n += 2;
        }
        if self.peek_kind(n) == SyntaxKind::LessThanToken {
            n = self.scan_type_argument_list(n, depth + 1)?;
        }
        while self.peek_kind(n) == SyntaxKind::DotToken
            && self.peek_kind(n + 1) == SyntaxKind::IdentifierToken
        {
            n += 2;
            if self.peek_kind(n) == SyntaxKind::LessThanToken {
                n = self.scan_type_argument_list(n, depth + 1)?;
            }
        }
        Some(n)
    }

    fn scan_tuple_type(&self, mut n: usize, depth: u32) -> Option<usize> {
        n += 1;
        loop {
            n = self.scan_type_at(n, depth + 1)?;
            if self.peek_kind(n) == SyntaxKind::IdentifierToken {
                n += 1;
            }
            match self.peek_kind(n) {
                SyntaxKind::CommaToken => n += 1,
                SyntaxKind::CloseParenToken => return Some(n + 1),
                _ => return None,
            }
        }
    }

    /// Scan a type argument list whose `<` is `n` tokens ahead.
    pub(crate) fn scan_type_argument_list(&self, mut n: usize, depth: u32) -> Option<usize> {
        if self.peek_kind(n) != SyntaxKind::LessThanToken || depth > MAX_SCAN_DEPTH {
            return None;
        }
        n += 1;
        if matches!(
            self.peek_kind(n),
            SyntaxKind::CommaToken | SyntaxKind::GreaterThanToken
        ) {
            while self.peek_kind(n) == SyntaxKind::CommaToken {
                n += 1;
            }
            return (self.peek_kind(n) == SyntaxKind::GreaterThanToken).then_some(n + 1);
        }
        loop {
            n = self.scan_type_at(n, depth + 1)?;
            match self.peek_kind(n) {
                SyntaxKind::CommaToken => n += 1,
                SyntaxKind::GreaterThanToken => return Some(n + 1),
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsharp_options::ParseOptions;

    fn parser(text: &str) -> Parser {
        Parser::new(text, &ParseOptions::default())
    }

    #[test]
    fn test_scan_type_generic() {
        let p = parser("List<Dictionary<int, string>> x");
        assert_eq!(p.scan_type(0), Some(9));
    }

    #[test]
    fn test_scan_type_array_and_nullable() {
        let p = parser("int?[,] x");
        assert_eq!(p.scan_type(0), Some(5));
    }

    #[test]
    fn test_scan_type_rejects_comparison() {
        let p = parser("a < b ;");
        assert_eq!(p.scan_type(0), None);
        assert_eq!(p.scan_type_argument_list(1, 0), None);
    }

    #[test]
    fn test_generic_in_expression_needs_follow_token() {
        assert!(parser("<B>(x)").is_type_argument_list_in_expression());
        assert!(!parser("<B> c").is_type_argument_list_in_expression());
    }
}
