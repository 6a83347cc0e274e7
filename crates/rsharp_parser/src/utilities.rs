//! Parser utility functions.

use rsharp_ast::{SyntaxKind, SyntaxToken};

/// Reserved keywords that act as member modifiers.
pub fn is_modifier_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::InternalKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::SealedKeyword
            | SyntaxKind::VirtualKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::ExternKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::ReadOnlyKeyword
            | SyntaxKind::VolatileKeyword
            | SyntaxKind::UnsafeKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FixedKeyword
    )
}

/// Contextual keywords that can act as member modifiers.
pub fn is_contextual_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AsyncKeyword
            | SyntaxKind::PartialKeyword
            | SyntaxKind::RequiredKeyword
            | SyntaxKind::FileKeyword
    )
}

/// Keywords that introduce a type or namespace declaration.
pub fn is_type_declaration_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ClassKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::DelegateKeyword
    )
}

/// Check if a token can start a type.
pub fn can_start_type(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::IdentifierToken
        || kind == SyntaxKind::OpenParenToken
        || kind.is_predefined_type()
}

/// Check if a token can start a namespace member. A `using` directive whose
/// name position holds one of these gives up on its name and semicolon.
pub fn can_start_namespace_member(kind: SyntaxKind) -> bool {
    is_modifier_keyword(kind)
        || is_type_declaration_keyword(kind)
        || matches!(
            kind,
            SyntaxKind::NamespaceKeyword
                | SyntaxKind::UsingKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::OpenBracketToken
        )
}

/// Check if a token can start a member in a type body.
pub fn can_start_member(token: &SyntaxToken) -> bool {
    let kind = token.kind;
    can_start_type(kind)
        || is_modifier_keyword(kind)
        || is_type_declaration_keyword(kind)
        || matches!(
            kind,
            SyntaxKind::OpenBracketToken
                | SyntaxKind::TildeToken
                | SyntaxKind::EventKeyword
                | SyntaxKind::ImplicitKeyword
                | SyntaxKind::ExplicitKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::RefKeyword
        )
}

/// The literal expression kind for a literal token.
pub fn literal_expression_kind(kind: SyntaxKind) -> Option<SyntaxKind> {
    Some(match kind {
        SyntaxKind::NumericLiteralToken => SyntaxKind::NumericLiteralExpression,
        SyntaxKind::StringLiteralToken => SyntaxKind::StringLiteralExpression,
        SyntaxKind::CharacterLiteralToken => SyntaxKind::CharacterLiteralExpression,
        SyntaxKind::TrueKeyword => SyntaxKind::TrueLiteralExpression,
        SyntaxKind::FalseKeyword => SyntaxKind::FalseLiteralExpression,
        SyntaxKind::NullKeyword => SyntaxKind::NullLiteralExpression,
        SyntaxKind::ArgListKeyword => SyntaxKind::ArgListExpression,
        _ => return None,
    })
}

/// Check if a token can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    literal_expression_kind(kind).is_some()
        || kind.prefix_unary_expression_kind().is_some()
        || kind.is_predefined_type()
        || matches!(
            kind,
            SyntaxKind::IdentifierToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::ThisKeyword
                | SyntaxKind::BaseKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::SizeOfKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CheckedKeyword
                | SyntaxKind::UncheckedKeyword
                | SyntaxKind::ThrowKeyword
                | SyntaxKind::InterpolatedStringStartToken
                | SyntaxKind::InterpolatedVerbatimStringStartToken
        )
}

/// Check if a token starts a statement that is never a member.
pub fn is_statement_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IfKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ForEachKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::SemicolonToken
    )
}

/// Tokens after which `A<B>` in an expression is read as a generic name.
pub fn can_follow_type_argument_list(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::ColonToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::DotToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken
            | SyntaxKind::AmpersandAmpersandToken
            | SyntaxKind::BarBarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::EndOfFileToken
    )
}

/// Tokens after `(Name)` that make it a cast rather than a parenthesized
/// expression. Operators that are both unary and binary are excluded.
pub fn can_follow_cast(kind: SyntaxKind) -> bool {
    literal_expression_kind(kind).is_some()
        || kind.is_predefined_type()
        || matches!(
            kind,
            SyntaxKind::IdentifierToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::ThisKeyword
                | SyntaxKind::BaseKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::SizeOfKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CheckedKeyword
                | SyntaxKind::UncheckedKeyword
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::InterpolatedStringStartToken
                | SyntaxKind::InterpolatedVerbatimStringStartToken
        )
}

/// Accessor keywords for properties and indexers, or events.
pub fn accessor_kind(keyword: SyntaxKind, is_event: bool) -> Option<SyntaxKind> {
    match (keyword, is_event) {
        (SyntaxKind::GetKeyword, false) => Some(SyntaxKind::GetAccessorDeclaration),
        (SyntaxKind::SetKeyword, false) => Some(SyntaxKind::SetAccessorDeclaration),
        (SyntaxKind::InitKeyword, false) => Some(SyntaxKind::InitAccessorDeclaration),
        (SyntaxKind::AddKeyword, true) => Some(SyntaxKind::AddAccessorDeclaration),
        (SyntaxKind::RemoveKeyword, true) => Some(SyntaxKind::RemoveAccessorDeclaration),
        _ => None,
    }
}
