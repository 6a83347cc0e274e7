//! Members: fields, methods, properties, events, operators and the pieces
//! they share (modifiers, parameters, accessors, bodies).

use super::{NameMode, Parser, TypeMode};
use crate::utilities::{
    accessor_kind, can_start_expression, can_start_type, is_contextual_modifier,
    is_modifier_keyword, is_statement_keyword, is_type_declaration_keyword,
};
use rsharp_ast::*;
use rsharp_core::ensure_sufficient_stack;
use rsharp_core::text::TextSpan;
use rsharp_diagnostics::{messages, Diagnostic};
use rsharp_options::Feature;
use tracing::{debug, trace};

/// Where a member list lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberLevel {
    CompilationUnit,
    Namespace,
    TypeBody,
}

#[derive(Debug, Clone)]
pub(crate) struct MemberContext {
    pub(crate) level: MemberLevel,
    /// Name of the enclosing type, used to tell constructors from methods
    /// missing their return type.
    type_name: Option<String>,
}

impl MemberContext {
    pub(crate) fn compilation_unit() -> Self {
        Self {
            level: MemberLevel::CompilationUnit,
            type_name: None,
        }
    }

    pub(crate) fn namespace() -> Self {
        Self {
            level: MemberLevel::Namespace,
            type_name: None,
        }
    }

    pub(crate) fn type_body(type_name: Option<String>) -> Self {
        Self {
            level: MemberLevel::TypeBody,
            type_name,
        }
    }
}

/// Attributes and modifiers read before the kind of member is known.
#[derive(Debug, Default)]
pub(crate) struct MemberStart {
    pub(crate) attribute_lists: Vec<AttributeList>,
    pub(crate) modifiers: Vec<SyntaxToken>,
}

impl MemberStart {
    fn is_empty(&self) -> bool {
        self.attribute_lists.is_empty() && self.modifiers.is_empty()
    }

    fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifiers.iter().any(|m| m.kind == kind)
    }
}

const CONTEXTUAL_MODIFIERS: [SyntaxKind; 4] = [
    SyntaxKind::AsyncKeyword,
    SyntaxKind::PartialKeyword,
    SyntaxKind::RequiredKeyword,
    SyntaxKind::FileKeyword,
];

const ACCESSOR_KEYWORDS: [SyntaxKind; 5] = [
    SyntaxKind::GetKeyword,
    SyntaxKind::SetKeyword,
    SyntaxKind::InitKeyword,
    SyntaxKind::AddKeyword,
    SyntaxKind::RemoveKeyword,
];

/// A method-like body: a block, an expression body, or a semicolon.
type MemberBody = (Option<Block>, Option<ArrowExpressionClause>, Option<SyntaxToken>);

impl Parser {
    /// Parse one member. Returns `None` without consuming anything when the
    /// current token cannot start a member.
    pub(crate) fn parse_member_declaration(&mut self, ctx: &MemberContext) -> Option<MemberDeclaration> {
        trace!(position = self.current().position, level = ?ctx.level, "parse member");
        if !self.enter() {
            return None;
        }
        let member = ensure_sufficient_stack(|| self.parse_member_core(ctx));
        self.leave();
        member
    }

    fn parse_member_core(&mut self, ctx: &MemberContext) -> Option<MemberDeclaration> {
        if ctx.level == MemberLevel::CompilationUnit && self.is_global_statement_start() {
            return Some(
                GlobalStatement {
                    attribute_lists: Vec::new(),
                    modifiers: Vec::new(),
                    statement: self.parse_statement(),
                }
                .into(),
            );
        }

        let attribute_lists = self.parse_attribute_lists();
        let modifiers = self.parse_modifiers();
        let start = MemberStart {
            attribute_lists,
            modifiers,
        };

        if self.at_contextual(SyntaxKind::PartialKeyword)
            && start.modifiers.last().map(|m| m.kind) == Some(SyntaxKind::PartialKeyword)
        {
            return Some(self.parse_repeated_partial(start).into());
        }

        let kind = self.current_kind();
        let member: MemberDeclaration = match kind {
            SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword | SyntaxKind::InterfaceKeyword => {
                self.parse_type_declaration(start)
            }
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(start).into(),
            SyntaxKind::DelegateKeyword => self.parse_delegate_declaration(start).into(),
            SyntaxKind::NamespaceKeyword => {
                let mut namespace = self.parse_namespace_declaration(start);
                if ctx.level == MemberLevel::TypeBody {
                    let span = namespace.span();
                    namespace.add_diagnostic(Diagnostic::new(
                        &messages::INVALID_MEMBER_DECL,
                        span,
                        &["namespace"],
                    ));
                }
                namespace
            }
            SyntaxKind::TildeToken => self.parse_destructor_declaration(start).into(),
            SyntaxKind::EventKeyword => self.parse_event_declaration(start),
            SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                self.parse_conversion_operator_declaration(start).into()
            }
            SyntaxKind::IdentifierToken if self.peek_kind(1) == SyntaxKind::OpenParenToken => {
                self.parse_constructor_declaration(ctx, start).into()
            }
            _ if can_start_type(kind) || kind == SyntaxKind::RefKeyword => {
                let ty = self.parse_type(TypeMode::Normal);
                self.parse_member_after_type(ctx, start, ty)
            }
            _ if start.is_empty() => return None,
            _ => self.incomplete_member(ctx, start, None).into(),
        };
        Some(member)
    }

    /// At compilation-unit level, tokens that start a statement but not a
    /// member form a top-level statement.
    fn is_global_statement_start(&self) -> bool {
        let kind = self.current_kind();
        if is_statement_keyword(kind) {
            return true;
        }
        if self.at_contextual(SyntaxKind::YieldKeyword)
            && matches!(
                self.peek_kind(1),
                SyntaxKind::ReturnKeyword | SyntaxKind::BreakKeyword
            )
        {
            return true;
        }
        if !can_start_expression(kind) {
            return false;
        }
        match self.scan_type(0) {
            Some(end) => !is_member_name_start(self.peek_kind(end)),
            None => true,
        }
    }

    /// `partial partial void M();` keeps the first `partial` as a modifier of
    /// a statement made of the second.
    fn parse_repeated_partial(&mut self, start: MemberStart) -> GlobalStatement {
        let mut token = self.eat_token();
        let span = token.span();
        let text = token.text.clone();
        token.add_diagnostic(Diagnostic::new(&messages::INVALID_EXPR_TERM, span, &[text.as_str()]));
        let statement = ExpressionStatement {
            expression: IdentifierName { identifier: token }.into(),
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        };
        GlobalStatement {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            statement: statement.into(),
        }
    }

    fn incomplete_member(
        &mut self,
        ctx: &MemberContext,
        start: MemberStart,
        ty: Option<TypeSyntax>,
    ) -> IncompleteMember {
        debug!(position = self.current().position, "incomplete member");
        let has_type = ty.is_some();
        let mut member = IncompleteMember {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            ty,
        };
        let diagnostic = if has_type {
            self.identifier_expected()
        } else if ctx.level == MemberLevel::TypeBody {
            let current = self.current();
            Diagnostic::new(&messages::INVALID_MEMBER_DECL, current.span(), &[current.text.as_str()])
        } else {
            Diagnostic::new(&messages::NAMESPACE_UNEXPECTED, member.span(), &[])
        };
        member.add_diagnostic(diagnostic);
        member
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    pub(crate) fn parse_modifiers(&mut self) -> Vec<SyntaxToken> {
        let mut modifiers: Vec<SyntaxToken> = Vec::new();
        loop {
            if is_modifier_keyword(self.current_kind()) {
                modifiers.push(self.eat_token());
                continue;
            }
            let Some(kind) = self.contextual_modifier() else {
                break;
            };
            if kind == SyntaxKind::PartialKeyword
                && modifiers.last().map(|m| m.kind) == Some(SyntaxKind::PartialKeyword)
            {
                break;
            }
            let mut token = self.eat_contextual(kind);
            match kind {
                SyntaxKind::RequiredKeyword => self.check_feature(&mut token, Feature::RequiredMembers),
                SyntaxKind::FileKeyword => self.check_feature(&mut token, Feature::FileTypes),
                _ => {}
            }
            modifiers.push(token);
        }
        modifiers
    }

    /// The contextual modifier spelled by the current token, if it acts as
    /// one here rather than as a type or member name.
    fn contextual_modifier(&self) -> Option<SyntaxKind> {
        let kind = CONTEXTUAL_MODIFIERS
            .into_iter()
            .find(|k| self.at_contextual(*k))?;
        let next = self.peek(1);
        let acts = if kind == SyntaxKind::PartialKeyword {
            matches!(
                next.kind,
                SyntaxKind::ClassKeyword
                    | SyntaxKind::StructKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::EnumKeyword
                    | SyntaxKind::VoidKeyword
            ) || next.is_contextual(SyntaxKind::RecordKeyword)
                || next.is_contextual(SyntaxKind::PartialKeyword)
                || self.type_then_member_name(1)
        } else {
            is_modifier_keyword(next.kind)
                || is_type_declaration_keyword(next.kind)
                || (next.kind == SyntaxKind::IdentifierToken
                    && is_contextual_modifier(next.contextual_kind)
                    && !next.is_contextual(SyntaxKind::PartialKeyword))
                || self.type_then_member_name(1)
        };
        acts.then_some(kind)
    }

    fn type_then_member_name(&self, offset: usize) -> bool {
        self.scan_type(offset)
            .is_some_and(|end| is_member_name_start(self.peek_kind(end)))
    }

    // ========================================================================
    // Type-led members
    // ========================================================================

    fn parse_member_after_type(
        &mut self,
        ctx: &MemberContext,
        start: MemberStart,
        ty: TypeSyntax,
    ) -> MemberDeclaration {
        if self.current_kind() == SyntaxKind::OperatorKeyword {
            return self.parse_operator_declaration(start, ty, None).into();
        }

        let dots = self.scan_explicit_interface();
        if dots == 0
            && self.current_kind() == SyntaxKind::IdentifierToken
            && !matches!(
                self.peek_kind(1),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::EqualsGreaterThanToken
            )
        {
            return self.parse_field_declaration(start, ty).into();
        }

        let explicit = (dots > 0).then(|| self.parse_explicit_interface_specifier(dots));
        match self.current_kind() {
            SyntaxKind::ThisKeyword => self.parse_indexer_declaration(start, ty, explicit).into(),
            SyntaxKind::OperatorKeyword => self.parse_operator_declaration(start, ty, explicit).into(),
            SyntaxKind::IdentifierToken => {
                let identifier = self.eat_token();
                match self.current_kind() {
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => self
                        .parse_method_declaration(start, ty, explicit, identifier)
                        .into(),
                    _ => self
                        .parse_property_declaration(start, ty, explicit, identifier)
                        .into(),
                }
            }
            _ => self.incomplete_member(ctx, start, Some(ty)).into(),
        }
    }

    /// Count the dots of an `I.` or `N.I<T>.` prefix before a member name.
    /// Returns zero when there is none.
    fn scan_explicit_interface(&self) -> usize {
        let mut n = 0;
        let mut dots = 0;
        let mut name_at = 0;
        while self.peek_kind(n) == SyntaxKind::IdentifierToken {
            let mut after = n + 1;
            if self.peek_kind(after) == SyntaxKind::LessThanToken {
                match self.scan_type_argument_list(after, 0) {
                    Some(end) => after = end,
                    None => break,
                }
            }
            if self.peek_kind(after) != SyntaxKind::DotToken {
                break;
            }
            dots += 1;
            n = after + 1;
            name_at = n;
        }
        if dots > 0 && is_member_name_start(self.peek_kind(name_at)) {
            dots
        } else {
            0
        }
    }

    fn parse_explicit_interface_specifier(&mut self, dots: usize) -> ExplicitInterfaceSpecifier {
        let mut name: NameSyntax = self.parse_simple_name(NameMode::Type).into();
        let mut dot_token = self.expect(SyntaxKind::DotToken);
        for _ in 1..dots {
            let right = self.parse_simple_name(NameMode::Type);
            name = QualifiedName {
                left: Box::new(name),
                dot_token,
                right,
            }
            .into();
            dot_token = self.expect(SyntaxKind::DotToken);
        }
        ExplicitInterfaceSpecifier { name, dot_token }
    }

    fn parse_field_declaration(&mut self, start: MemberStart, ty: TypeSyntax) -> FieldDeclaration {
        let is_fixed = start.has_modifier(SyntaxKind::FixedKeyword);
        let is_const = start.has_modifier(SyntaxKind::ConstKeyword);
        let mut declaration = self.parse_variable_declaration(ty, is_fixed);
        for variable in declaration.variables.elements.iter_mut() {
            let span = variable.identifier.span();
            if is_fixed && variable.argument_list.is_none() {
                variable
                    .identifier
                    .add_diagnostic(Diagnostic::new(&messages::FIXED_DIMS_REQUIRED, span, &[]));
            }
            if is_const && variable.initializer.is_none() {
                variable
                    .identifier
                    .add_diagnostic(Diagnostic::new(&messages::CONST_VALUE_REQUIRED, span, &[]));
            }
        }
        FieldDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            declaration,
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        }
    }

    fn parse_method_declaration(
        &mut self,
        start: MemberStart,
        return_type: TypeSyntax,
        explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        identifier: SyntaxToken,
    ) -> MethodDeclaration {
        let type_parameter_list = (self.current_kind() == SyntaxKind::LessThanToken)
            .then(|| self.parse_type_parameter_list());
        let parameter_list = self.parse_parameter_list();
        let constraint_clauses = self.parse_constraint_clauses();
        let (body, expression_body, semicolon_token) = self.parse_member_body();
        MethodDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            return_type,
            explicit_interface_specifier,
            identifier,
            type_parameter_list,
            parameter_list,
            constraint_clauses,
            body,
            expression_body,
            semicolon_token,
        }
    }

    fn parse_property_declaration(
        &mut self,
        start: MemberStart,
        ty: TypeSyntax,
        explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        identifier: SyntaxToken,
    ) -> PropertyDeclaration {
        let mut accessor_list = None;
        let mut expression_body = None;
        let mut initializer = None;
        let mut semicolon_token = None;
        if self.current_kind() == SyntaxKind::EqualsGreaterThanToken {
            expression_body = Some(self.parse_arrow_expression_clause());
            semicolon_token = Some(self.expect(SyntaxKind::SemicolonToken));
        } else {
            accessor_list = Some(self.parse_accessor_list(false));
            if self.current_kind() == SyntaxKind::EqualsToken {
                let mut equals_token = self.eat_token();
                self.check_feature(&mut equals_token, Feature::AutoPropertyInitializer);
                initializer = Some(EqualsValueClause {
                    equals_token,
                    value: self.parse_variable_initializer(),
                });
                semicolon_token = Some(self.expect(SyntaxKind::SemicolonToken));
            }
        }
        PropertyDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            ty,
            explicit_interface_specifier,
            identifier,
            accessor_list,
            expression_body,
            initializer,
            semicolon_token,
        }
    }

    fn parse_indexer_declaration(
        &mut self,
        start: MemberStart,
        ty: TypeSyntax,
        explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
    ) -> IndexerDeclaration {
        let this_keyword = self.eat_token();
        let parameter_list = self.parse_bracketed_parameter_list();
        let (accessor_list, expression_body, semicolon_token) =
            if self.current_kind() == SyntaxKind::EqualsGreaterThanToken {
                let clause = self.parse_arrow_expression_clause();
                (None, Some(clause), Some(self.expect(SyntaxKind::SemicolonToken)))
            } else {
                (Some(self.parse_accessor_list(false)), None, None)
            };
        IndexerDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            ty,
            explicit_interface_specifier,
            this_keyword,
            parameter_list,
            accessor_list,
            expression_body,
            semicolon_token,
        }
    }

    fn parse_operator_declaration(
        &mut self,
        start: MemberStart,
        return_type: TypeSyntax,
        explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
    ) -> OperatorDeclaration {
        let operator_keyword = self.expect(SyntaxKind::OperatorKeyword);
        let checked_keyword = self.parse_checked_operator_keyword();

        let (kind, count) = self.current_operator();
        let operator_token = if kind.is_overloadable_operator() {
            let mut token = self.eat_merged(kind, count);
            if kind == SyntaxKind::GreaterThanGreaterThanGreaterThanToken {
                self.check_feature(&mut token, Feature::UnsignedRightShift);
            }
            token
        } else if kind.is_punctuation() && kind != SyntaxKind::OpenParenToken {
            let mut token = self.eat_token();
            let span = token.span();
            token.add_diagnostic(Diagnostic::new(&messages::OVL_OPERATOR_EXPECTED, span, &[]));
            token
        } else {
            let diagnostic = self.diagnostic_here(&messages::OVL_OPERATOR_EXPECTED, &[]);
            self.missing_with(SyntaxKind::PlusToken, diagnostic)
        };

        let parameter_list = self.parse_parameter_list();
        let (body, expression_body, semicolon_token) = self.parse_member_body();
        OperatorDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            return_type,
            explicit_interface_specifier,
            operator_keyword,
            checked_keyword,
            operator_token,
            parameter_list,
            body,
            expression_body,
            semicolon_token,
        }
    }

    fn parse_checked_operator_keyword(&mut self) -> Option<SyntaxToken> {
        let mut token = self.eat_optional(SyntaxKind::CheckedKeyword)?;
        self.check_feature(&mut token, Feature::CheckedUserDefinedOperators);
        Some(token)
    }

    fn parse_conversion_operator_declaration(
        &mut self,
        start: MemberStart,
    ) -> ConversionOperatorDeclaration {
        let implicit_or_explicit_keyword = self.eat_token();
        let dots = self.scan_explicit_interface();
        let explicit_interface_specifier =
            (dots > 0).then(|| self.parse_explicit_interface_specifier(dots));
        let operator_keyword = self.expect(SyntaxKind::OperatorKeyword);
        let checked_keyword = self.parse_checked_operator_keyword();
        let ty = self.parse_type(TypeMode::Normal);
        let parameter_list = self.parse_parameter_list();
        let (body, expression_body, semicolon_token) = self.parse_member_body();
        ConversionOperatorDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            implicit_or_explicit_keyword,
            explicit_interface_specifier,
            operator_keyword,
            checked_keyword,
            ty,
            parameter_list,
            body,
            expression_body,
            semicolon_token,
        }
    }

    fn parse_constructor_declaration(
        &mut self,
        ctx: &MemberContext,
        start: MemberStart,
    ) -> ConstructorDeclaration {
        let mut identifier = self.eat_token();
        let names_type = ctx
            .type_name
            .as_deref()
            .map_or(ctx.level == MemberLevel::TypeBody, |name| name == identifier.value_text());
        if !names_type {
            let span = identifier.span();
            identifier.add_diagnostic(Diagnostic::new(&messages::MEMBER_NEEDS_TYPE, span, &[]));
        }
        let parameter_list = self.parse_parameter_list();
        let initializer = (self.current_kind() == SyntaxKind::ColonToken)
            .then(|| self.parse_constructor_initializer());
        let (body, expression_body, semicolon_token) = self.parse_member_body();
        ConstructorDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            identifier,
            parameter_list,
            initializer,
            body,
            expression_body,
            semicolon_token,
        }
    }

    fn parse_constructor_initializer(&mut self) -> ConstructorInitializer {
        let colon_token = self.eat_token();
        let (kind, this_or_base_keyword) = match self.current_kind() {
            SyntaxKind::BaseKeyword => (SyntaxKind::BaseConstructorInitializer, self.eat_token()),
            SyntaxKind::ThisKeyword => (SyntaxKind::ThisConstructorInitializer, self.eat_token()),
            _ => {
                let diagnostic = self.diagnostic_here(&messages::THIS_OR_BASE_EXPECTED, &[]);
                (
                    SyntaxKind::BaseConstructorInitializer,
                    self.missing_with(SyntaxKind::BaseKeyword, diagnostic),
                )
            }
        };
        ConstructorInitializer {
            kind,
            colon_token,
            this_or_base_keyword,
            argument_list: self.parse_argument_list(),
        }
    }

    fn parse_destructor_declaration(&mut self, start: MemberStart) -> DestructorDeclaration {
        let tilde_token = self.eat_token();
        let identifier = self.parse_identifier_token();
        let parameter_list = self.parse_parameter_list();
        let (body, expression_body, semicolon_token) = self.parse_member_body();
        DestructorDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            tilde_token,
            identifier,
            parameter_list,
            body,
            expression_body,
            semicolon_token,
        }
    }

    fn parse_event_declaration(&mut self, start: MemberStart) -> MemberDeclaration {
        let event_keyword = self.eat_token();
        let ty = self.parse_type(TypeMode::Normal);
        let dots = self.scan_explicit_interface();

        if dots == 0 && self.peek_kind(1) != SyntaxKind::OpenBraceToken {
            let declaration = self.parse_variable_declaration(ty, false);
            return EventFieldDeclaration {
                attribute_lists: start.attribute_lists,
                modifiers: start.modifiers,
                event_keyword,
                declaration,
                semicolon_token: self.expect(SyntaxKind::SemicolonToken),
            }
            .into();
        }

        let explicit_interface_specifier =
            (dots > 0).then(|| self.parse_explicit_interface_specifier(dots));
        let identifier = self.parse_identifier_token();
        let (accessor_list, semicolon_token) = if self.current_kind() == SyntaxKind::OpenBraceToken {
            (self.parse_accessor_list(true), None)
        } else {
            // `event T I.E;` is recovered with an empty accessor list.
            let diagnostic = self.diagnostic_here(&messages::EXPLICIT_EVENT_FIELD_IMPL, &[]);
            let list = AccessorList {
                open_brace_token: self.missing_with(SyntaxKind::OpenBraceToken, diagnostic),
                accessors: Vec::new(),
                close_brace_token: self.missing_silent(SyntaxKind::CloseBraceToken),
            };
            (list, self.eat_optional(SyntaxKind::SemicolonToken))
        };
        EventDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            event_keyword,
            ty,
            explicit_interface_specifier,
            identifier,
            accessor_list: Some(accessor_list),
            semicolon_token,
        }
        .into()
    }

    // ========================================================================
    // Bodies and accessors
    // ========================================================================

    fn parse_arrow_expression_clause(&mut self) -> ArrowExpressionClause {
        ArrowExpressionClause {
            arrow_token: self.eat_token(),
            expression: self.parse_expression(),
        }
    }

    fn parse_member_body(&mut self) -> MemberBody {
        match self.current_kind() {
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block();
                let semicolon = self.eat_optional(SyntaxKind::SemicolonToken).map(|mut token| {
                    let span = token.span();
                    token.add_diagnostic(Diagnostic::new(&messages::UNEXPECTED_SEMICOLON, span, &[]));
                    token
                });
                (Some(block), None, semicolon)
            }
            SyntaxKind::EqualsGreaterThanToken => {
                let clause = self.parse_arrow_expression_clause();
                (None, Some(clause), Some(self.expect(SyntaxKind::SemicolonToken)))
            }
            SyntaxKind::SemicolonToken => (None, None, Some(self.eat_token())),
            _ => {
                let diagnostic = self.diagnostic_here(&messages::LBRACE_OR_SEMICOLON_EXPECTED, &[]);
                (None, None, Some(self.missing_with(SyntaxKind::SemicolonToken, diagnostic)))
            }
        }
    }

    fn parse_accessor_list(&mut self, is_event: bool) -> AccessorList {
        if self.current_kind() != SyntaxKind::OpenBraceToken {
            let open_brace_token = self.missing(SyntaxKind::OpenBraceToken);
            return AccessorList {
                open_brace_token,
                accessors: Vec::new(),
                close_brace_token: self.missing_silent(SyntaxKind::CloseBraceToken),
            };
        }
        let open_brace_token = self.eat_token();
        let mut accessors = Vec::new();
        while !matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            if let Some(accessor) = self.parse_accessor(is_event) {
                accessors.push(accessor);
            }
        }
        AccessorList {
            open_brace_token,
            accessors,
            close_brace_token: self.expect(SyntaxKind::CloseBraceToken),
        }
    }

    /// One accessor. A token that starts nothing is skipped and `None` returned,
    /// so every call makes progress.
    fn parse_accessor(&mut self, is_event: bool) -> Option<AccessorDeclaration> {
        let expected = if is_event {
            &messages::ADD_OR_REMOVE_EXPECTED
        } else {
            &messages::GET_OR_SET_EXPECTED
        };
        let attribute_lists = self.parse_attribute_lists();
        let mut modifiers = Vec::new();
        while is_modifier_keyword(self.current_kind()) {
            modifiers.push(self.eat_token());
        }

        let known = ACCESSOR_KEYWORDS
            .into_iter()
            .find(|k| self.at_contextual(*k))
            .and_then(|k| accessor_kind(k, is_event).map(|kind| (k, kind)));
        let (kind, keyword) = match known {
            Some((keyword_kind, kind)) => {
                let mut keyword = self.eat_contextual(keyword_kind);
                if keyword_kind == SyntaxKind::InitKeyword {
                    self.check_feature(&mut keyword, Feature::InitOnlySetters);
                }
                (kind, keyword)
            }
            None if self.current_kind() == SyntaxKind::IdentifierToken => {
                let mut keyword = self.eat_token();
                let span = keyword.span();
                keyword.add_diagnostic(Diagnostic::new(expected, span, &[]));
                (SyntaxKind::UnknownAccessorDeclaration, keyword)
            }
            None if !attribute_lists.is_empty() || !modifiers.is_empty() => {
                let diagnostic = self.diagnostic_here(expected, &[]);
                (
                    SyntaxKind::UnknownAccessorDeclaration,
                    self.missing_with(SyntaxKind::IdentifierToken, diagnostic),
                )
            }
            None => {
                let diagnostic = Diagnostic::new(expected, self.current().span(), &[]);
                self.skip_token_reporting(diagnostic);
                return None;
            }
        };

        let (body, expression_body, semicolon_token) = self.parse_member_body();
        Some(AccessorDeclaration {
            kind,
            attribute_lists,
            modifiers,
            keyword,
            body,
            expression_body,
            semicolon_token,
        })
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    pub(crate) fn parse_parameter_list(&mut self) -> ParameterList {
        let open_paren_token = self.expect(SyntaxKind::OpenParenToken);
        let parameters = self.parse_parameters(SyntaxKind::CloseParenToken);
        ParameterList {
            open_paren_token,
            parameters,
            close_paren_token: self.expect(SyntaxKind::CloseParenToken),
        }
    }

    fn parse_bracketed_parameter_list(&mut self) -> BracketedParameterList {
        let open_bracket_token = self.expect(SyntaxKind::OpenBracketToken);
        let parameters = self.parse_parameters(SyntaxKind::CloseBracketToken);
        BracketedParameterList {
            open_bracket_token,
            parameters,
            close_bracket_token: self.expect(SyntaxKind::CloseBracketToken),
        }
    }

    fn parse_parameters(&mut self, close: SyntaxKind) -> SeparatedList<Parameter> {
        let mut parameters = SeparatedList::new();
        if self.current_kind() == close {
            return parameters;
        }
        loop {
            parameters.push(self.parse_parameter());
            match self.eat_optional(SyntaxKind::CommaToken) {
                Some(comma) => parameters.push_separator(comma),
                None => break,
            }
        }
        // Leftovers before the closing delimiter, as in `M(a b c)`.
        let mut first = true;
        while !matches!(
            self.current_kind(),
            SyntaxKind::OpenBraceToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EqualsGreaterThanToken
                | SyntaxKind::EndOfFileToken
        ) && self.current_kind() != close
        {
            if first {
                self.skip_token_with(&messages::UNEXPECTED_TOKEN);
                first = false;
            } else {
                self.skip_token();
            }
        }
        parameters
    }

    pub(crate) fn parse_parameter(&mut self) -> Parameter {
        let attribute_lists = self.parse_attribute_lists();
        if self.current_kind() == SyntaxKind::ArgListKeyword {
            return Parameter {
                attribute_lists,
                modifiers: Vec::new(),
                ty: None,
                identifier: self.eat_token(),
                default: None,
            };
        }

        let mut modifiers = Vec::new();
        loop {
            match self.current_kind() {
                SyntaxKind::RefKeyword
                | SyntaxKind::OutKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::ParamsKeyword
                | SyntaxKind::ThisKeyword => modifiers.push(self.eat_token()),
                SyntaxKind::IdentifierToken
                    if self.at_contextual(SyntaxKind::ScopedKeyword)
                        && self
                            .scan_type(1)
                            .is_some_and(|end| self.peek_kind(end) == SyntaxKind::IdentifierToken) =>
                {
                    modifiers.push(self.eat_contextual(SyntaxKind::ScopedKeyword));
                }
                _ => break,
            }
        }

        let ty = self.parse_type(TypeMode::Normal);
        let identifier = self.parse_identifier_token();
        self.skip_null_check_suffix();
        let default = self
            .eat_optional(SyntaxKind::EqualsToken)
            .map(|equals_token| EqualsValueClause {
                equals_token,
                value: self.parse_expression(),
            });
        Parameter {
            attribute_lists,
            modifiers,
            ty: Some(ty),
            identifier,
            default,
        }
    }

    /// `name!!` parameter null checking was never shipped: both `!` go to
    /// skipped trivia with a single report.
    fn skip_null_check_suffix(&mut self) {
        if self.current_kind() != SyntaxKind::ExclamationToken
            || !matches!(
                self.peek_kind(1),
                SyntaxKind::ExclamationToken | SyntaxKind::ExclamationEqualsToken
            )
        {
            return;
        }
        let start = self.current().span().start;
        let end = self.peek(1).span().start + 1;
        let diagnostic = Diagnostic::new(
            &messages::PARAMETER_NULL_CHECKING_NOT_SUPPORTED,
            TextSpan::from_bounds(start, end),
            &[],
        );
        self.skip_token_reporting(diagnostic);
        if self.current_kind() == SyntaxKind::ExclamationEqualsToken {
            self.split_current(SyntaxKind::ExclamationToken, 1, SyntaxKind::EqualsToken);
        }
        self.skip_token();
    }
}

fn is_member_name_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IdentifierToken | SyntaxKind::ThisKeyword | SyntaxKind::OperatorKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsharp_options::ParseOptions;

    fn member(text: &str) -> Option<MemberDeclaration> {
        Parser::new(text, &ParseOptions::default())
            .parse_member_declaration(&MemberContext::type_body(Some("C".to_string())))
    }

    #[test]
    fn test_contextual_modifiers() {
        let Some(MemberDeclaration::Method(method)) = member("async Task M() { }") else {
            panic!("expected a method");
        };
        assert_eq!(method.modifiers[0].kind, SyntaxKind::AsyncKeyword);

        let Some(MemberDeclaration::Field(field)) = member("async x;") else {
            panic!("expected a field");
        };
        assert!(field.modifiers.is_empty());
        assert_eq!(field.declaration.ty.to_string(), "async");
    }

    #[test]
    fn test_explicit_interface_scan() {
        let p = Parser::new("N.I<T>.M()", &ParseOptions::default());
        assert_eq!(p.scan_explicit_interface(), 2);
        let p = Parser::new("M()", &ParseOptions::default());
        assert_eq!(p.scan_explicit_interface(), 0);
    }

    #[test]
    fn test_constructor_name_checked_against_type() {
        let Some(MemberDeclaration::Constructor(ctor)) = member("C() { }") else {
            panic!("expected a constructor");
        };
        assert!(!ctor.contains_diagnostics());

        let Some(MemberDeclaration::Constructor(ctor)) = member("D() { }") else {
            panic!("expected a constructor");
        };
        assert_eq!(ctor.errors()[0].code, messages::MEMBER_NEEDS_TYPE.code);
    }

    #[test]
    fn test_nothing_to_parse() {
        assert!(member("}").is_none());
    }
}
