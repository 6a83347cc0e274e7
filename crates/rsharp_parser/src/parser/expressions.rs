//! Expressions: precedence climbing over binary and assignment operators,
//! with lambdas, casts and creation expressions recognized at term start.

use super::{NameMode, Parser, TypeMode};
use crate::precedence::{expression_precedence, is_right_associative, Precedence};
use crate::utilities::{can_follow_cast, can_start_expression, literal_expression_kind};
use rsharp_ast::*;
use rsharp_core::ensure_sufficient_stack;
use rsharp_diagnostics::{messages, Diagnostic};
use rsharp_options::Feature;

/// How far ahead a parenthesized lambda head is searched for its `=>`.
const MAX_LAMBDA_SCAN: usize = 256;

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> ExpressionSyntax {
        self.parse_sub_expression(Precedence::Expression)
    }

    fn parse_sub_expression(&mut self, precedence: Precedence) -> ExpressionSyntax {
        if !self.enter() {
            return IdentifierName {
                identifier: self.missing_silent(SyntaxKind::IdentifierToken),
            }
            .into();
        }
        let expression = ensure_sufficient_stack(|| self.parse_sub_expression_core(precedence));
        self.leave();
        expression
    }

    fn parse_sub_expression_core(&mut self, precedence: Precedence) -> ExpressionSyntax {
        let kind = self.current_kind();
        if kind == SyntaxKind::ThrowKeyword {
            return self.parse_throw_expression().into();
        }
        if kind == SyntaxKind::RefKeyword {
            return self.parse_ref_expression().into();
        }
        if self.is_lambda_start() {
            return self.parse_lambda_expression();
        }

        let mut left = match kind.prefix_unary_expression_kind() {
            Some(unary_kind) => {
                let operator_token = self.eat_token();
                let operand = self.parse_sub_expression(Precedence::Unary);
                PrefixUnaryExpression {
                    kind: unary_kind,
                    operator_token,
                    operand: Box::new(operand),
                }
                .into()
            }
            None => self.parse_term(),
        };

        loop {
            let (operator_kind, count) = self.current_operator();
            let (expression_kind, is_assignment) =
                if let Some(kind) = operator_kind.assignment_expression_kind() {
                    (kind, true)
                } else if let Some(kind) = operator_kind.binary_expression_kind() {
                    (kind, false)
                } else {
                    break;
                };
            let new_precedence = expression_precedence(expression_kind);
            if new_precedence < precedence
                || (new_precedence == precedence && !is_right_associative(expression_kind))
            {
                break;
            }

            let mut operator_token = if count > 1 {
                self.eat_merged(operator_kind, count)
            } else {
                self.eat_token()
            };
            if matches!(
                operator_kind,
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
                    | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            ) {
                self.check_feature(&mut operator_token, Feature::UnsignedRightShift);
            }

            let right: ExpressionSyntax = if matches!(
                expression_kind,
                SyntaxKind::IsExpression | SyntaxKind::AsExpression
            ) {
                self.parse_type(TypeMode::AfterIs).into()
            } else {
                self.parse_sub_expression(new_precedence)
            };

            left = if is_assignment {
                AssignmentExpression {
                    kind: expression_kind,
                    left: Box::new(left),
                    operator_token,
                    right: Box::new(right),
                }
                .into()
            } else {
                BinaryExpression {
                    kind: expression_kind,
                    left: Box::new(left),
                    operator_token,
                    right: Box::new(right),
                }
                .into()
            };
        }

        if self.current_kind() == SyntaxKind::QuestionToken && precedence <= Precedence::Conditional {
            let question_token = self.eat_token();
            let when_true = self.parse_expression();
            let colon_token = self.expect(SyntaxKind::ColonToken);
            let when_false = self.parse_expression();
            left = ConditionalExpression {
                condition: Box::new(left),
                question_token,
                when_true: Box::new(when_true),
                colon_token,
                when_false: Box::new(when_false),
            }
            .into();
        }
        left
    }

    fn parse_throw_expression(&mut self) -> ThrowExpression {
        let mut throw_keyword = self.eat_token();
        self.check_feature(&mut throw_keyword, Feature::ThrowExpressions);
        let expression = self.parse_sub_expression(Precedence::Coalescing);
        ThrowExpression {
            throw_keyword,
            expression: Box::new(expression),
        }
    }

    /// `ref x` in a return, an expression body or a ref local initializer.
    fn parse_ref_expression(&mut self) -> RefExpression {
        let mut ref_keyword = self.eat_token();
        self.check_feature(&mut ref_keyword, Feature::RefLocalsReturns);
        let expression = self.parse_expression();
        RefExpression {
            ref_keyword,
            expression: Box::new(expression),
        }
    }

    // ========================================================================
    // Terms
    // ========================================================================

    fn parse_term(&mut self) -> ExpressionSyntax {
        let primary = self.parse_primary_expression();
        self.parse_postfix_expression(primary)
    }

    fn parse_primary_expression(&mut self) -> ExpressionSyntax {
        let kind = self.current_kind();
        if let Some(literal_kind) = literal_expression_kind(kind) {
            return LiteralExpression {
                kind: literal_kind,
                token: self.eat_token(),
            }
            .into();
        }
        if kind.is_predefined_type() {
            let mut keyword = self.eat_token();
            if self.current_kind() != SyntaxKind::DotToken {
                let span = keyword.span();
                let diagnostic =
                    Diagnostic::new(&messages::INVALID_EXPR_TERM, span, &[keyword.text.as_str()]);
                keyword.add_diagnostic(diagnostic);
            }
            return TypeSyntax::from(PredefinedType { keyword }).into();
        }
        match kind {
            SyntaxKind::IdentifierToken => {
                self.parse_alias_qualified_or_simple_name(NameMode::Expression).into()
            }
            SyntaxKind::ThisKeyword => ThisExpression {
                token: self.eat_token(),
            }
            .into(),
            SyntaxKind::BaseKeyword => BaseExpression {
                token: self.eat_token(),
            }
            .into(),
            SyntaxKind::DefaultKeyword => self.parse_default_expression(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_term(),
            SyntaxKind::NewKeyword => self.parse_creation_expression(),
            SyntaxKind::TypeOfKeyword => {
                let keyword = self.eat_token();
                let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
                let ty = self.parse_type(TypeMode::Normal);
                TypeOfExpression {
                    keyword,
                    open_paren_token,
                    ty,
                    close_paren_token: self.expect(SyntaxKind::CloseParenToken),
                }
                .into()
            }
            SyntaxKind::SizeOfKeyword => {
                let keyword = self.eat_token();
                let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
                let ty = self.parse_type(TypeMode::Normal);
                SizeOfExpression {
                    keyword,
                    open_paren_token,
                    ty,
                    close_paren_token: self.expect(SyntaxKind::CloseParenToken),
                }
                .into()
            }
            SyntaxKind::CheckedKeyword | SyntaxKind::UncheckedKeyword => {
                let expression_kind = if kind == SyntaxKind::CheckedKeyword {
                    SyntaxKind::CheckedExpression
                } else {
                    SyntaxKind::UncheckedExpression
                };
                let keyword = self.eat_token();
                let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
                let expression = self.parse_expression();
                CheckedExpression {
                    kind: expression_kind,
                    keyword,
                    open_paren_token,
                    expression: Box::new(expression),
                    close_paren_token: self.expect(SyntaxKind::CloseParenToken),
                }
                .into()
            }
            SyntaxKind::InterpolatedStringStartToken
            | SyntaxKind::InterpolatedVerbatimStringStartToken => {
                self.parse_interpolated_string_expression().into()
            }
            _ => self.missing_expression_term(),
        }
    }

    /// A missing identifier standing in for an expression that is not there.
    fn missing_expression_term(&mut self) -> ExpressionSyntax {
        let diagnostic = if self.at_eof() {
            self.diagnostic_here(&messages::EXPRESSION_EXPECTED, &[])
        } else {
            let current = self.current();
            Diagnostic::new(
                &messages::INVALID_EXPR_TERM,
                current.span(),
                &[current.text.as_str()],
            )
        };
        IdentifierName {
            identifier: self.missing_with(SyntaxKind::IdentifierToken, diagnostic),
        }
        .into()
    }

    fn parse_default_expression(&mut self) -> ExpressionSyntax {
        let mut keyword = self.eat_token();
        if self.current_kind() != SyntaxKind::OpenParenToken {
            self.check_feature(&mut keyword, Feature::DefaultLiteral);
            return LiteralExpression {
                kind: SyntaxKind::DefaultLiteralExpression,
                token: keyword,
            }
            .into();
        }
        let open_paren_token = self.eat_token();
        let ty = self.parse_type(TypeMode::Normal);
        DefaultExpression {
            keyword,
            open_paren_token,
            ty,
            close_paren_token: self.expect(SyntaxKind::CloseParenToken),
        }
        .into()
    }

    fn parse_postfix_expression(&mut self, mut expression: ExpressionSyntax) -> ExpressionSyntax {
        loop {
            expression = match self.current_kind() {
                SyntaxKind::OpenParenToken => InvocationExpression {
                    expression: Box::new(expression),
                    argument_list: self.parse_argument_list(),
                }
                .into(),
                SyntaxKind::OpenBracketToken => ElementAccessExpression {
                    expression: Box::new(expression),
                    argument_list: self.parse_bracketed_argument_list(),
                }
                .into(),
                SyntaxKind::DotToken | SyntaxKind::MinusGreaterThanToken => {
                    let kind = if self.current_kind() == SyntaxKind::DotToken {
                        SyntaxKind::SimpleMemberAccessExpression
                    } else {
                        SyntaxKind::PointerMemberAccessExpression
                    };
                    let operator_token = self.eat_token();
                    MemberAccessExpression {
                        kind,
                        expression: Box::new(expression),
                        operator_token,
                        name: self.parse_simple_name(NameMode::Expression),
                    }
                    .into()
                }
                SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::ExclamationToken => {
                    let kind = match self.current_kind() {
                        SyntaxKind::PlusPlusToken => SyntaxKind::PostIncrementExpression,
                        SyntaxKind::MinusMinusToken => SyntaxKind::PostDecrementExpression,
                        _ => SyntaxKind::SuppressNullableWarningExpression,
                    };
                    PostfixUnaryExpression {
                        kind,
                        operand: Box::new(expression),
                        operator_token: self.eat_token(),
                    }
                    .into()
                }
                _ => return expression,
            };
        }
    }

    // ========================================================================
    // Parenthesized, tuple and cast
    // ========================================================================

    fn parse_parenthesized_term(&mut self) -> ExpressionSyntax {
        if self.is_cast() {
            let open_paren_token = self.eat_token();
            let ty = self.parse_type(TypeMode::Normal);
            let close_paren_token = self.expect(SyntaxKind::CloseParenToken);
            let expression = self.parse_sub_expression(Precedence::Cast);
            return CastExpression {
                open_paren_token,
                ty,
                close_paren_token,
                expression: Box::new(expression),
            }
            .into();
        }

        let open_paren_token = self.eat_token();
        let name_colon = self.parse_name_colon();
        let expression = self.parse_expression();
        if name_colon.is_none() && self.current_kind() != SyntaxKind::CommaToken {
            return ParenthesizedExpression {
                open_paren_token,
                expression: Box::new(expression),
                close_paren_token: self.expect(SyntaxKind::CloseParenToken),
            }
            .into();
        }

        let mut arguments = SeparatedList::single(Argument {
            name_colon,
            ref_kind_keyword: None,
            expression,
        });
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            arguments.push_separator(comma);
            arguments.push(self.parse_argument());
        }
        let mut open_paren_token = open_paren_token;
        self.check_feature(&mut open_paren_token, Feature::Tuples);
        let mut close_paren_token = self.expect(SyntaxKind::CloseParenToken);
        if arguments.len() < 2 {
            let span = open_paren_token.span().union(&close_paren_token.span());
            close_paren_token.add_diagnostic(Diagnostic::new(
                &messages::TUPLE_TOO_FEW_ELEMENTS,
                span,
                &[],
            ));
        }
        TupleExpression {
            open_paren_token,
            arguments,
            close_paren_token,
        }
        .into()
    }

    /// `(T)x`: a type, `)`, then a token that starts the operand. A
    /// predefined type alone in the parentheses is always a cast.
    fn is_cast(&self) -> bool {
        let Some(end) = self.scan_type(1) else {
            return false;
        };
        if self.peek_kind(end) != SyntaxKind::CloseParenToken {
            return false;
        }
        let next = self.peek_kind(end + 1);
        if end == 2 && self.peek_kind(1).is_predefined_type() {
            return can_start_expression(next);
        }
        can_follow_cast(next)
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// `name:` in front of an argument or tuple element.
    fn parse_name_colon(&mut self) -> Option<NameColon> {
        if self.current_kind() == SyntaxKind::IdentifierToken
            && self.peek_kind(1) == SyntaxKind::ColonToken
        {
            let name = self.parse_identifier_name();
            return Some(NameColon {
                name,
                colon_token: self.eat_token(),
            });
        }
        None
    }

    pub(crate) fn parse_argument(&mut self) -> Argument {
        let name_colon = self.parse_name_colon();
        let ref_kind_keyword = match self.current_kind() {
            SyntaxKind::RefKeyword | SyntaxKind::OutKeyword | SyntaxKind::InKeyword => {
                Some(self.eat_token())
            }
            _ => None,
        };
        Argument {
            name_colon,
            ref_kind_keyword,
            expression: self.parse_expression(),
        }
    }

    fn parse_arguments(&mut self, close: SyntaxKind) -> SeparatedList<Argument> {
        let mut arguments = SeparatedList::new();
        if self.current_kind() == close {
            return arguments;
        }
        loop {
            arguments.push(self.parse_argument());
            match self.eat_optional(SyntaxKind::CommaToken) {
                Some(comma) => arguments.push_separator(comma),
                None => break,
            }
        }
        arguments
    }

    pub(crate) fn parse_argument_list(&mut self) -> ArgumentList {
        let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
        let arguments = self.parse_arguments(SyntaxKind::CloseParenToken);
        ArgumentList {
            open_paren_token,
            arguments,
            close_paren_token: self.expect(SyntaxKind::CloseParenToken),
        }
    }

    pub(crate) fn parse_bracketed_argument_list(&mut self) -> BracketedArgumentList {
        let open_bracket_token = self.expect(SyntaxKind::OpenBracketToken);
        let arguments = self.parse_arguments(SyntaxKind::CloseBracketToken);
        BracketedArgumentList {
            open_bracket_token,
            arguments,
            close_bracket_token: self.expect(SyntaxKind::CloseBracketToken),
        }
    }

    // ========================================================================
    // Creation expressions and initializers
    // ========================================================================

    fn parse_creation_expression(&mut self) -> ExpressionSyntax {
        let mut new_keyword = self.eat_token();
        match self.current_kind() {
            SyntaxKind::OpenBracketToken => {
                let open_bracket_token = self.eat_token();
                let mut commas = Vec::new();
                while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
                    commas.push(comma);
                }
                let close_bracket_token = self.expect(SyntaxKind::CloseBracketToken);
                ImplicitArrayCreationExpression {
                    new_keyword,
                    open_bracket_token,
                    commas,
                    close_bracket_token,
                    initializer: self.parse_initializer(SyntaxKind::ArrayInitializerExpression),
                }
                .into()
            }
            SyntaxKind::OpenParenToken => {
                self.check_feature(&mut new_keyword, Feature::ImplicitObjectCreation);
                let argument_list = self.parse_argument_list();
                ImplicitObjectCreationExpression {
                    new_keyword,
                    argument_list,
                    initializer: self.parse_optional_object_initializer(),
                }
                .into()
            }
            _ => {
                let ty = self.parse_type(TypeMode::NewExpression);
                if self.current_kind() == SyntaxKind::OpenBracketToken {
                    let mut rank_specifiers = vec![self.parse_sized_rank_specifier()];
                    while self.current_kind() == SyntaxKind::OpenBracketToken
                        && self.at_omitted_rank()
                    {
                        rank_specifiers.push(self.parse_omitted_rank_specifier());
                    }
                    let initializer = (self.current_kind() == SyntaxKind::OpenBraceToken)
                        .then(|| self.parse_initializer(SyntaxKind::ArrayInitializerExpression));
                    return ArrayCreationExpression {
                        new_keyword,
                        ty: ArrayType {
                            element_type: Box::new(ty),
                            rank_specifiers,
                        },
                        initializer,
                    }
                    .into();
                }
                let mut argument_list = (self.current_kind() == SyntaxKind::OpenParenToken)
                    .then(|| self.parse_argument_list());
                let initializer = self.parse_optional_object_initializer();
                if argument_list.is_none() && initializer.is_none() {
                    argument_list = Some(ArgumentList {
                        open_paren_token: self.missing(SyntaxKind::OpenParenToken),
                        arguments: SeparatedList::new(),
                        close_paren_token: self.missing_silent(SyntaxKind::CloseParenToken),
                    });
                }
                ObjectCreationExpression {
                    new_keyword,
                    ty,
                    argument_list,
                    initializer,
                }
                .into()
            }
        }
    }

    /// `[a, b]` after `new T`, where sizes may be omitted.
    fn parse_sized_rank_specifier(&mut self) -> ArrayRankSpecifier {
        let open_bracket_token = self.eat_token();
        let mut sizes = SeparatedList::new();
        loop {
            let size = if matches!(
                self.current_kind(),
                SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
            ) {
                self.omitted_array_size()
            } else {
                self.parse_expression()
            };
            sizes.push(size);
            match self.eat_optional(SyntaxKind::CommaToken) {
                Some(comma) => sizes.push_separator(comma),
                None => break,
            }
        }
        ArrayRankSpecifier {
            open_bracket_token,
            sizes,
            close_bracket_token: self.expect(SyntaxKind::CloseBracketToken),
        }
    }

    fn parse_optional_object_initializer(&mut self) -> Option<InitializerExpression> {
        (self.current_kind() == SyntaxKind::OpenBraceToken)
            .then(|| self.parse_object_or_collection_initializer())
    }

    /// `{ A = 1 }` and `{ }` initialize members; anything else is a collection.
    fn parse_object_or_collection_initializer(&mut self) -> InitializerExpression {
        let is_object = self.peek_kind(1) == SyntaxKind::CloseBraceToken
            || (self.peek_kind(1) == SyntaxKind::IdentifierToken
                && self.peek_kind(2) == SyntaxKind::EqualsToken);
        self.parse_initializer(if is_object {
            SyntaxKind::ObjectInitializerExpression
        } else {
            SyntaxKind::CollectionInitializerExpression
        })
    }

    fn parse_initializer(&mut self, kind: SyntaxKind) -> InitializerExpression {
        if !self.enter() {
            return InitializerExpression {
                kind,
                open_brace_token: self.missing_silent(SyntaxKind::OpenBraceToken),
                expressions: SeparatedList::new(),
                close_brace_token: self.missing_silent(SyntaxKind::CloseBraceToken),
            };
        }
        let initializer = ensure_sufficient_stack(|| self.parse_initializer_core(kind));
        self.leave();
        initializer
    }

    fn parse_initializer_core(&mut self, kind: SyntaxKind) -> InitializerExpression {
        let open_brace_token = self.expect(SyntaxKind::OpenBraceToken);
        let mut expressions = SeparatedList::new();
        while !matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            expressions.push(self.parse_initializer_element(kind));
            match self.eat_optional(SyntaxKind::CommaToken) {
                Some(comma) => expressions.push_separator(comma),
                None => break,
            }
        }
        InitializerExpression {
            kind,
            open_brace_token,
            expressions,
            close_brace_token: self.expect(SyntaxKind::CloseBraceToken),
        }
    }

    fn parse_initializer_element(&mut self, kind: SyntaxKind) -> ExpressionSyntax {
        if self.current_kind() == SyntaxKind::OpenBraceToken {
            let nested = if kind == SyntaxKind::ArrayInitializerExpression {
                SyntaxKind::ArrayInitializerExpression
            } else {
                SyntaxKind::CollectionInitializerExpression
            };
            return self.parse_initializer(nested).into();
        }
        if kind == SyntaxKind::ObjectInitializerExpression
            && self.current_kind() == SyntaxKind::IdentifierToken
            && self.peek_kind(1) == SyntaxKind::EqualsToken
        {
            let left = self.parse_identifier_name();
            let operator_token = self.eat_token();
            let right = if self.current_kind() == SyntaxKind::OpenBraceToken {
                self.parse_object_or_collection_initializer().into()
            } else {
                self.parse_expression()
            };
            return AssignmentExpression {
                kind: SyntaxKind::SimpleAssignmentExpression,
                left: Box::new(left.into()),
                operator_token,
                right: Box::new(right),
            }
            .into();
        }
        self.parse_expression()
    }

    /// The value after `=` in a variable declarator: an expression or an
    /// array initializer.
    pub(crate) fn parse_variable_initializer(&mut self) -> ExpressionSyntax {
        if self.current_kind() == SyntaxKind::OpenBraceToken {
            self.parse_initializer(SyntaxKind::ArrayInitializerExpression).into()
        } else {
            self.parse_expression()
        }
    }

    // ========================================================================
    // Lambdas
    // ========================================================================

    fn is_lambda_start(&self) -> bool {
        match self.current_kind() {
            SyntaxKind::IdentifierToken => {
                if self.peek_kind(1) == SyntaxKind::EqualsGreaterThanToken {
                    return true;
                }
                self.at_contextual(SyntaxKind::AsyncKeyword)
                    && ((self.peek_kind(1) == SyntaxKind::IdentifierToken
                        && self.peek_kind(2) == SyntaxKind::EqualsGreaterThanToken)
                        || (self.peek_kind(1) == SyntaxKind::OpenParenToken
                            && self.scan_parenthesized_lambda(1)))
            }
            SyntaxKind::OpenParenToken => self.scan_parenthesized_lambda(0),
            _ => false,
        }
    }

    /// Whether the parenthesized group `offset` tokens ahead is followed by `=>`.
    fn scan_parenthesized_lambda(&self, offset: usize) -> bool {
        let mut depth = 0usize;
        for n in offset..offset + MAX_LAMBDA_SCAN {
            match self.peek_kind(n) {
                SyntaxKind::OpenParenToken => depth += 1,
                SyntaxKind::CloseParenToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.peek_kind(n + 1) == SyntaxKind::EqualsGreaterThanToken;
                    }
                }
                SyntaxKind::SemicolonToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
        }
        false
    }

    fn parse_lambda_expression(&mut self) -> ExpressionSyntax {
        let mut modifiers = Vec::new();
        if self.at_contextual(SyntaxKind::AsyncKeyword)
            && self.peek_kind(1) != SyntaxKind::EqualsGreaterThanToken
        {
            modifiers.push(self.eat_contextual(SyntaxKind::AsyncKeyword));
        }

        if self.current_kind() == SyntaxKind::IdentifierToken {
            let parameter = Parameter {
                attribute_lists: Vec::new(),
                modifiers: Vec::new(),
                ty: None,
                identifier: self.eat_token(),
                default: None,
            };
            let arrow_token = self.expect(SyntaxKind::EqualsGreaterThanToken);
            return SimpleLambdaExpression {
                modifiers,
                parameter: Box::new(parameter),
                arrow_token,
                body: self.parse_lambda_body(),
            }
            .into();
        }

        let parameter_list = self.parse_lambda_parameter_list();
        let arrow_token = self.expect(SyntaxKind::EqualsGreaterThanToken);
        ParenthesizedLambdaExpression {
            modifiers,
            parameter_list,
            arrow_token,
            body: self.parse_lambda_body(),
        }
        .into()
    }

    /// Lambda parameters may leave out their types.
    fn parse_lambda_parameter_list(&mut self) -> ParameterList {
        let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
        let mut parameters = SeparatedList::new();
        if self.current_kind() != SyntaxKind::CloseParenToken {
            loop {
                let implicit = self.current_kind() == SyntaxKind::IdentifierToken
                    && matches!(
                        self.peek_kind(1),
                        SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
                    );
                let parameter = if implicit {
                    Parameter {
                        attribute_lists: Vec::new(),
                        modifiers: Vec::new(),
                        ty: None,
                        identifier: self.eat_token(),
                        default: None,
                    }
                } else {
                    self.parse_parameter()
                };
                parameters.push(parameter);
                match self.eat_optional(SyntaxKind::CommaToken) {
                    Some(comma) => parameters.push_separator(comma),
                    None => break,
                }
            }
        }
        ParameterList {
            open_paren_token,
            parameters,
            close_paren_token: self.expect(SyntaxKind::CloseParenToken),
        }
    }

    fn parse_lambda_body(&mut self) -> LambdaBody {
        if self.current_kind() == SyntaxKind::OpenBraceToken {
            self.parse_block().into()
        } else {
            self.parse_expression().into()
        }
    }
}
