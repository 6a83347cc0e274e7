//! Compilation units, namespaces, directives, attributes and type
//! declarations.

use super::members::{MemberContext, MemberStart};
use super::{NameMode, Parser, TypeMode};
use crate::utilities::{
    can_start_expression, can_start_member, can_start_namespace_member, is_modifier_keyword,
    is_statement_keyword,
};
use rsharp_ast::*;
use rsharp_diagnostics::{messages, Diagnostic};
use rsharp_options::Feature;
use tracing::{debug, trace};

/// Ordering of the elements of a namespace body. Each kind must come before
/// the ones after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BodyState {
    ExternAliases,
    Usings,
    GlobalAttributes,
    Members,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEnd {
    /// The body runs to the end of the file; stray `}` are skipped.
    EndOfFile,
    CloseBrace,
}

#[derive(Debug, Default)]
struct NamespaceBody {
    externs: Vec<ExternAliasDirective>,
    usings: Vec<UsingDirective>,
    attribute_lists: Vec<AttributeList>,
    members: Vec<MemberDeclaration>,
}

impl Parser {
    pub(crate) fn parse_compilation_unit_node(&mut self) -> CompilationUnit {
        let mut body = NamespaceBody::default();
        self.parse_namespace_body(&MemberContext::compilation_unit(), BodyEnd::EndOfFile, &mut body);
        CompilationUnit {
            externs: body.externs,
            usings: body.usings,
            attribute_lists: body.attribute_lists,
            members: body.members,
            end_of_file_token: self.eat_token(),
        }
    }

    // ========================================================================
    // Namespace bodies
    // ========================================================================

    fn parse_namespace_body(&mut self, ctx: &MemberContext, end: BodyEnd, body: &mut NamespaceBody) {
        let at_compilation_unit = ctx.level == super::members::MemberLevel::CompilationUnit;
        let mut state = BodyState::ExternAliases;
        // Incomplete members seen before any complete one. They do not move
        // the ordering state, and fold into a following directive.
        let mut pending: Vec<MemberDeclaration> = Vec::new();

        loop {
            let kind = self.current_kind();
            let before = self.progress_key();
            match kind {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if end == BodyEnd::CloseBrace => break,
                SyntaxKind::CloseBraceToken => {
                    let span = self.current().span();
                    self.skip_token_reporting(Diagnostic::new(&messages::EOF_EXPECTED, span, &[]));
                }
                SyntaxKind::ExternKeyword if self.peek(1).is_contextual(SyntaxKind::AliasKeyword) => {
                    self.fold_pending(&mut pending);
                    let directive = self.parse_extern_alias_directive();
                    if state > BodyState::ExternAliases {
                        let span = directive.span();
                        let diagnostic = Diagnostic::new(&messages::EXTERN_AFTER_ELEMENTS, span, &[]);
                        self.skip_node(&directive, Some(diagnostic));
                    } else {
                        body.externs.push(directive);
                    }
                }
                _ if self.at_using_directive() => {
                    self.fold_pending(&mut pending);
                    let directive = self.parse_using_directive();
                    if state > BodyState::Usings {
                        let span = directive.span();
                        let diagnostic = Diagnostic::new(&messages::USING_AFTER_ELEMENTS, span, &[]);
                        self.skip_node(&directive, Some(diagnostic));
                    } else {
                        body.usings.push(directive);
                        state = BodyState::Usings;
                    }
                }
                SyntaxKind::OpenBracketToken
                    if at_compilation_unit && self.at_global_attribute_list() =>
                {
                    let list = self.parse_attribute_list();
                    if state > BodyState::GlobalAttributes || !pending.is_empty() {
                        let span = list.span();
                        let diagnostic =
                            Diagnostic::new(&messages::GLOBAL_ATTRIBUTES_NOT_FIRST, span, &[]);
                        self.skip_node(&list, Some(diagnostic));
                    } else {
                        body.attribute_lists.push(list);
                        state = BodyState::GlobalAttributes;
                    }
                }
                _ => match self.parse_member_declaration(ctx) {
                    Some(member @ MemberDeclaration::Incomplete(_))
                        if state < BodyState::Members && body.members.is_empty() =>
                    {
                        pending.push(member);
                    }
                    Some(mut member) => {
                        // Namespaces before it already report the mix of both forms.
                        let after_members = !pending.is_empty()
                            || body.members.iter().any(|m| {
                                !matches!(
                                    m,
                                    MemberDeclaration::Namespace(_)
                                        | MemberDeclaration::FileScopedNamespace(_)
                                )
                            });
                        if matches!(member, MemberDeclaration::FileScopedNamespace(_)) && after_members {
                            let span = member.span();
                            member.add_diagnostic(Diagnostic::new(
                                &messages::FILE_SCOPED_NAMESPACE_NOT_BEFORE_ALL_MEMBERS,
                                span,
                                &[],
                            ));
                        }
                        body.members.append(&mut pending);
                        body.members.push(member);
                        state = BodyState::Members;
                    }
                    None => self.skip_namespace_garbage(at_compilation_unit),
                },
            }
            if self.progress_key() == before && !self.at_eof() {
                self.skip_token();
            }
        }
        body.members.append(&mut pending);
    }

    /// Incomplete members before a directive become skipped trivia of that
    /// directive; their diagnostics come along.
    fn fold_pending(&mut self, pending: &mut Vec<MemberDeclaration>) {
        for member in pending.drain(..) {
            debug!(position = member.span().start, "folding incomplete member into directive");
            self.skip_node(&member, None);
        }
    }

    /// Skip tokens that start nothing at namespace level, reporting the first.
    fn skip_namespace_garbage(&mut self, at_compilation_unit: bool) {
        if self.at_eof() {
            return;
        }
        let span = self.current().span();
        self.skip_token_reporting(Diagnostic::new(&messages::EOF_EXPECTED, span, &[]));
        while !self.at_namespace_element_start(at_compilation_unit) {
            self.skip_token();
        }
    }

    fn at_namespace_element_start(&self, at_compilation_unit: bool) -> bool {
        let kind = self.current_kind();
        matches!(
            kind,
            SyntaxKind::EndOfFileToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::UsingKeyword
                | SyntaxKind::ExternKeyword
        ) || can_start_member(self.current())
            || (at_compilation_unit && (is_statement_keyword(kind) || can_start_expression(kind)))
    }

    fn at_using_directive(&self) -> bool {
        self.current_kind() == SyntaxKind::UsingKeyword
            || (self.at_contextual(SyntaxKind::GlobalKeyword)
                && self.peek_kind(1) == SyntaxKind::UsingKeyword)
    }

    fn at_global_attribute_list(&self) -> bool {
        attribute_location(self.peek(1)).is_some() && self.peek_kind(2) == SyntaxKind::ColonToken
    }

    // ========================================================================
    // Directives
    // ========================================================================

    fn parse_extern_alias_directive(&mut self) -> ExternAliasDirective {
        ExternAliasDirective {
            extern_keyword: self.eat_token(),
            alias_keyword: self.eat_contextual(SyntaxKind::AliasKeyword),
            identifier: self.parse_identifier_token(),
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        }
    }

    fn parse_using_directive(&mut self) -> UsingDirective {
        let global_keyword = self.at_contextual(SyntaxKind::GlobalKeyword).then(|| {
            let mut token = self.eat_contextual(SyntaxKind::GlobalKeyword);
            self.check_feature(&mut token, Feature::GlobalUsingDirective);
            token
        });
        let using_keyword = self.eat_token();
        let static_keyword = self.eat_optional(SyntaxKind::StaticKeyword);

        // Leave a following member alone rather than reading it as the name.
        if can_start_namespace_member(self.current_kind()) {
            let diagnostic = self.identifier_expected();
            let name = IdentifierName {
                identifier: self.missing_with(SyntaxKind::IdentifierToken, diagnostic),
            };
            return UsingDirective {
                global_keyword,
                using_keyword,
                static_keyword,
                alias: None,
                name: name.into(),
                semicolon_token: self.missing_silent(SyntaxKind::SemicolonToken),
            };
        }

        let alias = (self.current_kind() == SyntaxKind::IdentifierToken
            && self.peek_kind(1) == SyntaxKind::EqualsToken)
            .then(|| NameEquals {
                name: self.parse_identifier_name(),
                equals_token: self.eat_token(),
            });
        let name = self.parse_qualified_name(NameMode::Type);
        UsingDirective {
            global_keyword,
            using_keyword,
            static_keyword,
            alias,
            name,
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        }
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    pub(crate) fn parse_namespace_declaration(&mut self, start: MemberStart) -> MemberDeclaration {
        trace!(position = self.current().position, "parse namespace");
        let mut namespace_keyword = self.eat_token();
        let name = self.parse_qualified_name(NameMode::Type);

        if self.current_kind() == SyntaxKind::SemicolonToken {
            self.check_feature(&mut namespace_keyword, Feature::FileScopedNamespaces);
            let conflict = if self.seen_file_scoped_namespace {
                Some(&messages::MULTIPLE_FILE_SCOPED_NAMESPACE)
            } else if self.seen_block_namespace {
                Some(&messages::FILE_SCOPED_AND_NORMAL_NAMESPACE)
            } else {
                None
            };
            if let Some(message) = conflict {
                let span = namespace_keyword.span();
                namespace_keyword.add_diagnostic(Diagnostic::new(message, span, &[]));
            }
            self.seen_file_scoped_namespace = true;

            let semicolon_token = self.eat_token();
            let mut body = NamespaceBody::default();
            self.parse_namespace_body(&MemberContext::namespace(), BodyEnd::EndOfFile, &mut body);
            return FileScopedNamespaceDeclaration {
                attribute_lists: start.attribute_lists,
                modifiers: start.modifiers,
                namespace_keyword,
                name,
                semicolon_token,
                externs: body.externs,
                usings: body.usings,
                members: body.members,
            }
            .into();
        }

        if self.seen_file_scoped_namespace {
            let span = namespace_keyword.span();
            namespace_keyword.add_diagnostic(Diagnostic::new(
                &messages::FILE_SCOPED_AND_NORMAL_NAMESPACE,
                span,
                &[],
            ));
        }
        self.seen_block_namespace = true;

        let open_brace_token = self.expect(SyntaxKind::OpenBraceToken);
        let mut body = NamespaceBody::default();
        if !open_brace_token.is_missing() {
            self.parse_namespace_body(&MemberContext::namespace(), BodyEnd::CloseBrace, &mut body);
        }
        NamespaceDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            namespace_keyword,
            name,
            open_brace_token,
            externs: body.externs,
            usings: body.usings,
            members: body.members,
            close_brace_token: self.expect(SyntaxKind::CloseBraceToken),
            semicolon_token: self.eat_optional(SyntaxKind::SemicolonToken),
        }
        .into()
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    pub(crate) fn parse_attribute_lists(&mut self) -> Vec<AttributeList> {
        let mut lists = Vec::new();
        while self.current_kind() == SyntaxKind::OpenBracketToken {
            lists.push(self.parse_attribute_list());
        }
        lists
    }

    fn parse_attribute_list(&mut self) -> AttributeList {
        let open_bracket_token = self.eat_token();
        let target = (self.peek_kind(1) == SyntaxKind::ColonToken
            && (self.current_kind() == SyntaxKind::IdentifierToken
                || self.current_kind().is_keyword()))
        .then(|| AttributeTargetSpecifier {
            identifier: self.eat_token(),
            colon_token: self.eat_token(),
        });

        let mut attributes = SeparatedList::single(self.parse_attribute());
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            attributes.push_separator(comma);
            if self.current_kind() == SyntaxKind::CloseBracketToken {
                break;
            }
            attributes.push(self.parse_attribute());
        }
        AttributeList {
            open_bracket_token,
            target,
            attributes,
            close_bracket_token: self.expect(SyntaxKind::CloseBracketToken),
        }
    }

    fn parse_attribute(&mut self) -> Attribute {
        let name = self.parse_qualified_name(NameMode::Type);
        let argument_list = (self.current_kind() == SyntaxKind::OpenParenToken)
            .then(|| self.parse_attribute_argument_list());
        Attribute { name, argument_list }
    }

    fn parse_attribute_argument_list(&mut self) -> AttributeArgumentList {
        let open_paren_token = self.eat_token();
        let mut arguments = SeparatedList::new();
        if self.current_kind() != SyntaxKind::CloseParenToken {
            loop {
                arguments.push(self.parse_attribute_argument());
                match self.eat_optional(SyntaxKind::CommaToken) {
                    Some(comma) => arguments.push_separator(comma),
                    None => break,
                }
            }
        }
        AttributeArgumentList {
            open_paren_token,
            arguments,
            close_paren_token: self.expect(SyntaxKind::CloseParenToken),
        }
    }

    fn parse_attribute_argument(&mut self) -> AttributeArgument {
        let named = self.current_kind() == SyntaxKind::IdentifierToken;
        let name_equals = (named && self.peek_kind(1) == SyntaxKind::EqualsToken).then(|| NameEquals {
            name: self.parse_identifier_name(),
            equals_token: self.eat_token(),
        });
        let name_colon = (name_equals.is_none() && named && self.peek_kind(1) == SyntaxKind::ColonToken)
            .then(|| NameColon {
                name: self.parse_identifier_name(),
                colon_token: self.eat_token(),
            });
        AttributeArgument {
            name_equals,
            name_colon,
            expression: self.parse_expression(),
        }
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// A class, struct or interface declaration.
    pub(crate) fn parse_type_declaration(&mut self, start: MemberStart) -> MemberDeclaration {
        trace!(position = self.current().position, "parse type declaration");
        let keyword = self.eat_token();
        let identifier = self.parse_identifier_token();
        let type_parameter_list = (self.current_kind() == SyntaxKind::LessThanToken)
            .then(|| self.parse_type_parameter_list());
        let base_list = self.parse_base_list();
        let constraint_clauses = self.parse_constraint_clauses();

        let mut members = Vec::new();
        let (open_brace_token, close_brace_token, semicolon_token) = match self.current_kind() {
            SyntaxKind::OpenBraceToken => {
                let open = self.eat_token();
                let type_name = (!identifier.is_missing()).then(|| identifier.value_text().to_string());
                members = self.parse_type_body(type_name);
                let close = self.expect(SyntaxKind::CloseBraceToken);
                (Some(open), Some(close), self.eat_optional(SyntaxKind::SemicolonToken))
            }
            SyntaxKind::SemicolonToken => (None, None, Some(self.eat_token())),
            _ => {
                let open = self.missing(SyntaxKind::OpenBraceToken);
                let close = self.missing(SyntaxKind::CloseBraceToken);
                (Some(open), Some(close), None)
            }
        };

        macro_rules! build {
            ($node:ident) => {
                $node {
                    attribute_lists: start.attribute_lists,
                    modifiers: start.modifiers,
                    keyword,
                    identifier,
                    type_parameter_list,
                    base_list,
                    constraint_clauses,
                    open_brace_token,
                    members,
                    close_brace_token,
                    semicolon_token,
                }
                .into()
            };
        }
        match keyword.kind {
            SyntaxKind::StructKeyword => build!(StructDeclaration),
            SyntaxKind::InterfaceKeyword => build!(InterfaceDeclaration),
            _ => build!(ClassDeclaration),
        }
    }

    fn parse_type_body(&mut self, type_name: Option<String>) -> Vec<MemberDeclaration> {
        let ctx = MemberContext::type_body(type_name);
        let mut members = Vec::new();
        // An incomplete member without a type has already reported the
        // token that stopped it.
        let mut reported = false;
        while !matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let before = self.progress_key();
            match self.parse_member_declaration(&ctx) {
                Some(member) => {
                    reported = matches!(&member, MemberDeclaration::Incomplete(m) if m.ty.is_none());
                    members.push(member);
                }
                None => {
                    self.skip_invalid_member_tokens(!reported);
                    reported = false;
                }
            }
            if self.progress_key() == before && !self.at_eof() {
                self.skip_token();
            }
        }
        members
    }

    /// Skip tokens that cannot start a member, reporting the first one when
    /// `report` is set.
    fn skip_invalid_member_tokens(&mut self, report: bool) {
        if self.at_eof() {
            return;
        }
        if report {
            self.skip_token_with(&messages::INVALID_MEMBER_DECL);
        } else {
            self.skip_token();
        }
        while !matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) && !can_start_member(self.current())
        {
            self.skip_token();
        }
    }

    fn parse_base_list(&mut self) -> Option<BaseList> {
        let colon_token = self.eat_optional(SyntaxKind::ColonToken)?;
        let mut types = SeparatedList::single(SimpleBaseType {
            ty: self.parse_type(TypeMode::Normal),
        });
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            types.push_separator(comma);
            types.push(SimpleBaseType {
                ty: self.parse_type(TypeMode::Normal),
            });
        }
        Some(BaseList { colon_token, types })
    }

    pub(crate) fn parse_type_parameter_list(&mut self) -> TypeParameterList {
        let less_than_token = self.eat_token();
        let mut parameters = SeparatedList::single(self.parse_type_parameter());
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            parameters.push_separator(comma);
            parameters.push(self.parse_type_parameter());
        }
        TypeParameterList {
            less_than_token,
            parameters,
            greater_than_token: self.expect(SyntaxKind::GreaterThanToken),
        }
    }

    fn parse_type_parameter(&mut self) -> TypeParameter {
        let attribute_lists = self.parse_attribute_lists();
        let variance_keyword = matches!(
            self.current_kind(),
            SyntaxKind::InKeyword | SyntaxKind::OutKeyword
        )
        .then(|| self.eat_token());
        TypeParameter {
            attribute_lists,
            variance_keyword,
            identifier: self.parse_identifier_token(),
        }
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    pub(crate) fn parse_constraint_clauses(&mut self) -> Vec<TypeParameterConstraintClause> {
        let mut clauses = Vec::new();
        while self.at_contextual(SyntaxKind::WhereKeyword) {
            clauses.push(self.parse_constraint_clause());
        }
        clauses
    }

    fn parse_constraint_clause(&mut self) -> TypeParameterConstraintClause {
        let where_keyword = self.eat_contextual(SyntaxKind::WhereKeyword);
        let name = self.parse_identifier_name();
        let colon_token = self.expect(SyntaxKind::ColonToken);
        let mut constraints = SeparatedList::single(self.parse_constraint());
        while let Some(comma) = self.eat_optional(SyntaxKind::CommaToken) {
            constraints.push_separator(comma);
            constraints.push(self.parse_constraint());
        }
        TypeParameterConstraintClause {
            where_keyword,
            name,
            colon_token,
            constraints,
        }
    }

    fn parse_constraint(&mut self) -> TypeParameterConstraint {
        match self.current_kind() {
            SyntaxKind::NewKeyword => ConstructorConstraint {
                new_keyword: self.eat_token(),
                open_paren_token: self.expect(SyntaxKind::OpenParenToken),
                close_paren_token: self.expect(SyntaxKind::CloseParenToken),
            }
            .into(),
            SyntaxKind::ClassKeyword => {
                let class_or_struct_keyword = self.eat_token();
                let question_token = self.eat_optional(SyntaxKind::QuestionToken).map(|mut token| {
                    self.check_feature(&mut token, Feature::NullableReferenceTypes);
                    token
                });
                ClassOrStructConstraint {
                    kind: SyntaxKind::ClassConstraint,
                    class_or_struct_keyword,
                    question_token,
                }
                .into()
            }
            SyntaxKind::StructKeyword => {
                let class_or_struct_keyword = self.eat_token();
                let question_token = self.eat_optional(SyntaxKind::QuestionToken).map(|mut token| {
                    let span = token.span();
                    token.add_diagnostic(Diagnostic::new(&messages::UNEXPECTED_TOKEN, span, &["?"]));
                    token
                });
                ClassOrStructConstraint {
                    kind: SyntaxKind::StructConstraint,
                    class_or_struct_keyword,
                    question_token,
                }
                .into()
            }
            SyntaxKind::DefaultKeyword => {
                let mut default_keyword = self.eat_token();
                self.check_feature(&mut default_keyword, Feature::DefaultTypeParameterConstraint);
                DefaultConstraint { default_keyword }.into()
            }
            _ => TypeConstraint {
                ty: self.parse_type(TypeMode::Normal),
            }
            .into(),
        }
    }

    // ========================================================================
    // Enums and delegates
    // ========================================================================

    pub(crate) fn parse_enum_declaration(&mut self, start: MemberStart) -> EnumDeclaration {
        trace!(position = self.current().position, "parse enum");
        let enum_keyword = self.eat_token();
        let identifier = self.parse_identifier_token();
        let base_list = self.parse_base_list();

        if self.current_kind() != SyntaxKind::OpenBraceToken {
            let open_brace_token = self.missing(SyntaxKind::OpenBraceToken);
            return EnumDeclaration {
                attribute_lists: start.attribute_lists,
                modifiers: start.modifiers,
                enum_keyword,
                identifier,
                base_list,
                open_brace_token,
                members: SeparatedList::new(),
                close_brace_token: self.missing(SyntaxKind::CloseBraceToken),
                semicolon_token: None,
            };
        }

        let open_brace_token = self.eat_token();
        let mut members = SeparatedList::new();
        while !matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            if !self.at_enum_member_start() {
                if can_start_member(self.current()) {
                    break;
                }
                self.skip_token_with(&messages::UNEXPECTED_TOKEN);
                continue;
            }
            members.push(self.parse_enum_member());
            match self.eat_optional(SyntaxKind::CommaToken) {
                Some(comma) => members.push_separator(comma),
                None if self.at_enum_member_start() => {
                    let comma = self.missing(SyntaxKind::CommaToken);
                    members.push_separator(comma);
                }
                None => {}
            }
        }
        EnumDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            enum_keyword,
            identifier,
            base_list,
            open_brace_token,
            members,
            close_brace_token: self.expect(SyntaxKind::CloseBraceToken),
            semicolon_token: self.eat_optional(SyntaxKind::SemicolonToken),
        }
    }

    fn at_enum_member_start(&self) -> bool {
        let kind = self.current_kind();
        matches!(kind, SyntaxKind::IdentifierToken | SyntaxKind::OpenBracketToken)
            || is_modifier_keyword(kind)
    }

    fn parse_enum_member(&mut self) -> EnumMemberDeclaration {
        let attribute_lists = self.parse_attribute_lists();
        let mut modifiers = Vec::new();
        while is_modifier_keyword(self.current_kind()) {
            modifiers.push(self.eat_token());
        }
        let identifier = self.parse_identifier_token();
        let equals_value = self
            .eat_optional(SyntaxKind::EqualsToken)
            .map(|equals_token| EqualsValueClause {
                equals_token,
                value: self.parse_expression(),
            });
        EnumMemberDeclaration {
            attribute_lists,
            modifiers,
            identifier,
            equals_value,
        }
    }

    pub(crate) fn parse_delegate_declaration(&mut self, start: MemberStart) -> DelegateDeclaration {
        let delegate_keyword = self.eat_token();
        let return_type = self.parse_type(TypeMode::Normal);
        let identifier = self.parse_identifier_token();
        let type_parameter_list = (self.current_kind() == SyntaxKind::LessThanToken)
            .then(|| self.parse_type_parameter_list());
        let parameter_list = self.parse_parameter_list();
        let constraint_clauses = self.parse_constraint_clauses();
        DelegateDeclaration {
            attribute_lists: start.attribute_lists,
            modifiers: start.modifiers,
            delegate_keyword,
            return_type,
            identifier,
            type_parameter_list,
            parameter_list,
            constraint_clauses,
            semicolon_token: self.expect(SyntaxKind::SemicolonToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsharp_options::ParseOptions;

    fn unit(text: &str) -> CompilationUnit {
        Parser::new(text, &ParseOptions::default()).parse_compilation_unit_node()
    }

    #[test]
    fn test_directive_order() {
        let cu = unit("extern alias a; using b; class C { }");
        assert_eq!(cu.externs.len(), 1);
        assert_eq!(cu.usings.len(), 1);
        assert_eq!(cu.members.len(), 1);
        assert!(!cu.contains_diagnostics());
    }

    #[test]
    fn test_extern_after_using_is_skipped() {
        let cu = unit("using b; extern alias c;");
        assert!(cu.externs.is_empty());
        assert_eq!(cu.errors().len(), 1);
        assert_eq!(cu.to_full_string(), "using b; extern alias c;");
    }

    #[test]
    fn test_stray_close_brace_at_top_level() {
        let cu = unit("class C { } }");
        assert_eq!(cu.members.len(), 1);
        assert_eq!(cu.errors()[0].code, messages::EOF_EXPECTED.code);
    }

    #[test]
    fn test_missing_type_body() {
        let cu = unit("class a");
        let codes: Vec<u32> = cu.errors().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![messages::LBRACE_EXPECTED.code, messages::RBRACE_EXPECTED.code]
        );
    }
}
