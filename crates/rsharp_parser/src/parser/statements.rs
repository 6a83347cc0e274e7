//! Statements and local declarations.

use super::{Parser, TypeMode};
use crate::utilities::{can_start_expression, is_modifier_keyword, is_type_declaration_keyword};
use rsharp_ast::*;
use rsharp_core::ensure_sufficient_stack;
use rsharp_diagnostics::{messages, Diagnostic};

/// What the tokens at the start of a statement look like.
enum StatementStart {
    LocalDeclaration,
    /// A type followed by an identifier, then a token that does not fit a
    /// declarator. Tried as a declaration first.
    MaybeLocalDeclaration,
    Expression,
}

impl Parser {
    pub(crate) fn parse_block(&mut self) -> Block {
        let open_brace_token = self.expect(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list();
        Block {
            open_brace_token,
            statements,
            close_brace_token: self.expect(SyntaxKind::CloseBraceToken),
        }
    }

    fn parse_statement_list(&mut self) -> Vec<StatementSyntax> {
        let mut statements = Vec::new();
        while !self.at_statement_list_end() {
            let start = self.progress_key();
            statements.push(self.parse_statement());
            if self.progress_key() == start {
                break;
            }
        }
        statements
    }

    /// A block ends at `}`, at the end of the file, or where a member
    /// declaration clearly starts.
    fn at_statement_list_end(&self) -> bool {
        let kind = self.current_kind();
        matches!(
            kind,
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken | SyntaxKind::NamespaceKeyword
        ) || is_type_declaration_keyword(kind)
            || matches!(
                kind,
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::InternalKeyword
            )
    }

    pub(crate) fn parse_statement(&mut self) -> StatementSyntax {
        if !self.enter() {
            return EmptyStatement {
                semicolon_token: self.missing_silent(SyntaxKind::SemicolonToken),
            }
            .into();
        }
        let statement = ensure_sufficient_stack(|| self.parse_statement_core());
        self.leave();
        statement
    }

    fn parse_statement_core(&mut self) -> StatementSyntax {
        match self.current_kind() {
            SyntaxKind::OpenBraceToken => self.parse_block().into(),
            SyntaxKind::SemicolonToken => EmptyStatement {
                semicolon_token: self.eat_token(),
            }
            .into(),
            SyntaxKind::ReturnKeyword => {
                let return_keyword = self.eat_token();
                let expression = self.parse_optional_statement_expression();
                ReturnStatement {
                    return_keyword,
                    expression,
                    semicolon_token: self.expect(SyntaxKind::SemicolonToken),
                }
                .into()
            }
            SyntaxKind::ThrowKeyword => {
                let throw_keyword = self.eat_token();
                let expression = self.parse_optional_statement_expression();
                ThrowStatement {
                    throw_keyword,
                    expression,
                    semicolon_token: self.expect(SyntaxKind::SemicolonToken),
                }
                .into()
            }
            SyntaxKind::BreakKeyword => BreakStatement {
                break_keyword: self.eat_token(),
                semicolon_token: self.expect(SyntaxKind::SemicolonToken),
            }
            .into(),
            SyntaxKind::ContinueKeyword => ContinueStatement {
                continue_keyword: self.eat_token(),
                semicolon_token: self.expect(SyntaxKind::SemicolonToken),
            }
            .into(),
            SyntaxKind::IfKeyword => self.parse_if_statement().into(),
            SyntaxKind::WhileKeyword => {
                let while_keyword = self.eat_token();
                let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
                let condition = self.parse_expression();
                let close_paren_token = self.expect(SyntaxKind::CloseParenToken);
                WhileStatement {
                    while_keyword,
                    open_paren_token,
                    condition,
                    close_paren_token,
                    statement: Box::new(self.parse_statement()),
                }
                .into()
            }
            SyntaxKind::DoKeyword => {
                let do_keyword = self.eat_token();
                let statement = Box::new(self.parse_statement());
                let while_keyword = self.expect(SyntaxKind::WhileKeyword);
                let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
                let condition = self.parse_expression();
                let close_paren_token = self.expect(SyntaxKind::CloseParenToken);
                DoStatement {
                    do_keyword,
                    statement,
                    while_keyword,
                    open_paren_token,
                    condition,
                    close_paren_token,
                    semicolon_token: self.expect(SyntaxKind::SemicolonToken),
                }
                .into()
            }
            SyntaxKind::ForKeyword => self.parse_for_statement().into(),
            SyntaxKind::ForEachKeyword => self.parse_foreach_statement().into(),
            SyntaxKind::TryKeyword => self.parse_try_statement().into(),
            SyntaxKind::ConstKeyword => {
                let modifiers = vec![self.eat_token()];
                let ty = self.parse_type(TypeMode::Normal);
                self.parse_local_declaration_rest(modifiers, ty).into()
            }
            SyntaxKind::IdentifierToken
                if self.at_contextual(SyntaxKind::YieldKeyword)
                    && matches!(
                        self.peek_kind(1),
                        SyntaxKind::ReturnKeyword | SyntaxKind::BreakKeyword
                    ) =>
            {
                self.parse_yield_statement().into()
            }
            _ => self.parse_declaration_or_expression_statement(),
        }
    }

    fn parse_optional_statement_expression(&mut self) -> Option<ExpressionSyntax> {
        let kind = self.current_kind();
        let starts_expression = can_start_expression(kind) || kind == SyntaxKind::RefKeyword;
        starts_expression.then(|| self.parse_expression())
    }

    fn parse_if_statement(&mut self) -> IfStatement {
        let if_keyword = self.eat_token();
        let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        let close_paren_token = self.expect(SyntaxKind::CloseParenToken);
        let statement = Box::new(self.parse_statement());
        let else_clause = self
            .eat_optional(SyntaxKind::ElseKeyword)
            .map(|else_keyword| ElseClause {
                else_keyword,
                statement: Box::new(self.parse_statement()),
            });
        IfStatement {
            if_keyword,
            open_paren_token,
            condition,
            close_paren_token,
            statement,
            else_clause,
        }
    }

    fn parse_yield_statement(&mut self) -> YieldStatement {
        let yield_keyword = self.eat_contextual(SyntaxKind::YieldKeyword);
        let return_or_break_keyword = self.eat_token();
        let (kind, expression) = if return_or_break_keyword.kind == SyntaxKind::ReturnKeyword {
            (SyntaxKind::YieldReturnStatement, Some(self.parse_expression()))
        } else {
            (SyntaxKind::YieldBreakStatement, None)
        };
        YieldStatement {
            kind,
            yield_keyword,
            return_or_break_keyword,
            expression,
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        }
    }

    fn parse_for_statement(&mut self) -> ForStatement {
        let for_keyword = self.eat_token();
        let open_paren_token = self.expect(SyntaxKind::OpenParenToken);

        let mut declaration = None;
        let mut initializers = SeparatedList::new();
        if self.current_kind() != SyntaxKind::SemicolonToken {
            if matches!(self.statement_start(), StatementStart::LocalDeclaration) {
                let ty = self.parse_type(TypeMode::Normal);
                declaration = Some(self.parse_variable_declaration(ty, false));
            } else {
                initializers = self.parse_expression_list();
            }
        }
        let first_semicolon_token = self.expect(SyntaxKind::SemicolonToken);

        let condition = (self.current_kind() != SyntaxKind::SemicolonToken)
            .then(|| self.parse_expression());
        let second_semicolon_token = self.expect(SyntaxKind::SemicolonToken);

        let incrementors = if self.current_kind() != SyntaxKind::CloseParenToken {
            self.parse_expression_list()
        } else {
            SeparatedList::new()
        };
        let close_paren_token = self.expect(SyntaxKind::CloseParenToken);

        ForStatement {
            for_keyword,
            open_paren_token,
            declaration,
            initializers,
            first_semicolon_token,
            condition,
            second_semicolon_token,
            incrementors,
            close_paren_token,
            statement: Box::new(self.parse_statement()),
        }
    }

    fn parse_expression_list(&mut self) -> SeparatedList<ExpressionSyntax> {
        let mut list = SeparatedList::single(self.parse_expression());
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            list.push_separator(comma);
            list.push(self.parse_expression());
        }
        list
    }

    fn parse_foreach_statement(&mut self) -> ForEachStatement {
        let foreach_keyword = self.eat_token();
        let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
        let ty = self.parse_type(TypeMode::Normal);
        let identifier = self.parse_identifier_token();
        let in_keyword = self.expect(SyntaxKind::InKeyword);
        let expression = self.parse_expression();
        let close_paren_token = self.expect(SyntaxKind::CloseParenToken);
        ForEachStatement {
            foreach_keyword,
            open_paren_token,
            ty,
            identifier,
            in_keyword,
            expression,
            close_paren_token,
            statement: Box::new(self.parse_statement()),
        }
    }

    fn parse_try_statement(&mut self) -> TryStatement {
        let try_keyword = self.eat_token();
        let block = self.parse_block();
        let mut catches = Vec::new();
        while self.current_kind() == SyntaxKind::CatchKeyword {
            catches.push(self.parse_catch_clause());
        }
        let finally = self
            .eat_optional(SyntaxKind::FinallyKeyword)
            .map(|finally_keyword| FinallyClause {
                finally_keyword,
                block: self.parse_block(),
            });
        TryStatement {
            try_keyword,
            block,
            catches,
            finally,
        }
    }

    fn parse_catch_clause(&mut self) -> CatchClause {
        let catch_keyword = self.eat_token();
        let declaration = (self.current_kind() == SyntaxKind::OpenParenToken).then(|| {
            let open_paren_token = self.eat_token();
            let ty = self.parse_type(TypeMode::Normal);
            let identifier = self.eat_optional(SyntaxKind::IdentifierToken);
            CatchDeclaration {
                open_paren_token,
                ty,
                identifier,
                close_paren_token: self.expect(SyntaxKind::CloseParenToken),
            }
        });
        let filter = self.at_contextual(SyntaxKind::WhenKeyword).then(|| {
            let when_keyword = self.eat_contextual(SyntaxKind::WhenKeyword);
            let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
            let filter_expression = self.parse_expression();
            CatchFilterClause {
                when_keyword,
                open_paren_token,
                filter_expression,
                close_paren_token: self.expect(SyntaxKind::CloseParenToken),
            }
        });
        CatchClause {
            catch_keyword,
            declaration,
            filter,
            block: self.parse_block(),
        }
    }

    // ========================================================================
    // Local declarations and expression statements
    // ========================================================================

    fn statement_start(&self) -> StatementStart {
        let kind = self.current_kind();
        if kind.is_predefined_type() && self.peek_kind(1) != SyntaxKind::DotToken {
            return StatementStart::LocalDeclaration;
        }
        if !matches!(
            kind,
            SyntaxKind::IdentifierToken | SyntaxKind::OpenParenToken | SyntaxKind::RefKeyword
        ) {
            return StatementStart::Expression;
        }
        match self.scan_type(0) {
            Some(end) if self.peek_kind(end) == SyntaxKind::IdentifierToken => {
                match self.peek_kind(end + 1) {
                    SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::InKeyword
                    | SyntaxKind::EndOfFileToken => StatementStart::LocalDeclaration,
                    _ => StatementStart::MaybeLocalDeclaration,
                }
            }
            _ => StatementStart::Expression,
        }
    }

    fn parse_declaration_or_expression_statement(&mut self) -> StatementSyntax {
        match self.statement_start() {
            StatementStart::LocalDeclaration => {
                let ty = self.parse_type(TypeMode::Normal);
                self.parse_local_declaration_rest(Vec::new(), ty).into()
            }
            StatementStart::MaybeLocalDeclaration => {
                let snapshot = self.snapshot();
                let ty = self.parse_type(TypeMode::Normal);
                let declaration = self.parse_local_declaration_rest(Vec::new(), ty);
                if !declaration.semicolon_token.is_missing() {
                    return declaration.into();
                }
                self.restore(snapshot);
                self.parse_expression_statement().into()
            }
            StatementStart::Expression => self.parse_expression_statement().into(),
        }
    }

    fn parse_local_declaration_rest(
        &mut self,
        modifiers: Vec<SyntaxToken>,
        ty: TypeSyntax,
    ) -> LocalDeclarationStatement {
        let declaration = self.parse_variable_declaration(ty, false);
        LocalDeclarationStatement {
            modifiers,
            declaration,
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        }
    }

    /// Declarators after an already parsed type. Only fixed-size buffers may
    /// give a size in brackets.
    pub(crate) fn parse_variable_declaration(
        &mut self,
        ty: TypeSyntax,
        is_fixed: bool,
    ) -> VariableDeclaration {
        let mut variables = SeparatedList::single(self.parse_variable_declarator(is_fixed));
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            variables.push_separator(comma);
            variables.push(self.parse_variable_declarator(is_fixed));
        }
        VariableDeclaration { ty, variables }
    }

    fn parse_variable_declarator(&mut self, is_fixed: bool) -> VariableDeclarator {
        let identifier = self.parse_identifier_token();
        let argument_list = (self.current_kind() == SyntaxKind::OpenBracketToken).then(|| {
            let mut list = self.parse_bracketed_argument_list();
            if !is_fixed {
                let span = list.span();
                list.add_diagnostic(Diagnostic::new(&messages::ARRAY_SIZE_IN_DECLARATION, span, &[]));
            }
            list
        });
        let initializer = self
            .eat_optional(SyntaxKind::EqualsToken)
            .map(|equals_token| EqualsValueClause {
                equals_token,
                value: self.parse_variable_initializer(),
            });
        VariableDeclarator {
            identifier,
            argument_list,
            initializer,
        }
    }

    /// An expression statement. When no expression could be parsed, the
    /// offending token is skipped so the enclosing list makes progress; the
    /// missing expression already carries the report.
    pub(crate) fn parse_expression_statement(&mut self) -> ExpressionStatement {
        let expression = self.parse_expression();
        let stuck = expression.is_missing()
            && !matches!(
                self.current_kind(),
                SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            )
            && !is_modifier_keyword(self.current_kind());
        let semicolon_token = if stuck {
            self.skip_token();
            self.missing_silent(SyntaxKind::SemicolonToken)
        } else {
            self.expect(SyntaxKind::SemicolonToken)
        };
        ExpressionStatement {
            expression,
            semicolon_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsharp_options::ParseOptions;

    fn statement(text: &str) -> StatementSyntax {
        Parser::new(text, &ParseOptions::default()).parse_statement()
    }

    #[test]
    fn test_local_declaration_versus_expression() {
        assert!(matches!(statement("int x = 1;"), StatementSyntax::LocalDeclaration(_)));
        assert!(matches!(statement("List<int> x;"), StatementSyntax::LocalDeclaration(_)));
        assert!(matches!(statement("x = 1;"), StatementSyntax::Expression(_)));
        assert!(matches!(statement("int.Parse(s);"), StatementSyntax::Expression(_)));
    }

    #[test]
    fn test_speculative_declaration_is_abandoned() {
        let StatementSyntax::Expression(statement) = statement("a b c;") else {
            panic!("expected an expression statement");
        };
        assert_eq!(statement.expression.to_string(), "a");
        assert!(statement.semicolon_token.is_missing());
    }

    #[test]
    fn test_tuple_local() {
        assert!(matches!(
            statement("(int a, string b) t = default;"),
            StatementSyntax::LocalDeclaration(_)
        ));
        assert!(matches!(statement("(a, b) = t;"), StatementSyntax::Expression(_)));
    }
}
