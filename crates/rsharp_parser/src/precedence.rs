//! Operator precedence for binary and assignment operators.

use rsharp_ast::SyntaxKind;

/// Operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
    Expression = 0,
    Assignment = 1,
    Conditional = 2,
    Coalescing = 3,
    ConditionalOr = 4,
    ConditionalAnd = 5,
    LogicalOr = 6,
    LogicalXor = 7,
    LogicalAnd = 8,
    Equality = 9,
    Relational = 10,
    Shift = 11,
    Additive = 12,
    Multiplicative = 13,
    Unary = 14,
    Cast = 15,
    Primary = 16,
}

/// Get the precedence of the expression kind an operator produces.
pub fn expression_precedence(expression_kind: SyntaxKind) -> Precedence {
    match expression_kind {
        SyntaxKind::SimpleAssignmentExpression
        | SyntaxKind::AddAssignmentExpression
        | SyntaxKind::SubtractAssignmentExpression
        | SyntaxKind::MultiplyAssignmentExpression
        | SyntaxKind::DivideAssignmentExpression
        | SyntaxKind::ModuloAssignmentExpression
        | SyntaxKind::AndAssignmentExpression
        | SyntaxKind::ExclusiveOrAssignmentExpression
        | SyntaxKind::OrAssignmentExpression
        | SyntaxKind::LeftShiftAssignmentExpression
        | SyntaxKind::RightShiftAssignmentExpression
        | SyntaxKind::UnsignedRightShiftAssignmentExpression
        | SyntaxKind::CoalesceAssignmentExpression => Precedence::Assignment,
        SyntaxKind::CoalesceExpression => Precedence::Coalescing,
        SyntaxKind::LogicalOrExpression => Precedence::ConditionalOr,
        SyntaxKind::LogicalAndExpression => Precedence::ConditionalAnd,
        SyntaxKind::BitwiseOrExpression => Precedence::LogicalOr,
        SyntaxKind::ExclusiveOrExpression => Precedence::LogicalXor,
        SyntaxKind::BitwiseAndExpression => Precedence::LogicalAnd,
        SyntaxKind::EqualsExpression | SyntaxKind::NotEqualsExpression => Precedence::Equality,
        SyntaxKind::LessThanExpression
        | SyntaxKind::LessThanOrEqualExpression
        | SyntaxKind::GreaterThanExpression
        | SyntaxKind::GreaterThanOrEqualExpression
        | SyntaxKind::IsExpression
        | SyntaxKind::AsExpression => Precedence::Relational,
        SyntaxKind::LeftShiftExpression
        | SyntaxKind::RightShiftExpression
        | SyntaxKind::UnsignedRightShiftExpression => Precedence::Shift,
        SyntaxKind::AddExpression | SyntaxKind::SubtractExpression => Precedence::Additive,
        SyntaxKind::MultiplyExpression
        | SyntaxKind::DivideExpression
        | SyntaxKind::ModuloExpression => Precedence::Multiplicative,
        _ => Precedence::Primary,
    }
}

/// Assignment and `??` group to the right.
pub fn is_right_associative(expression_kind: SyntaxKind) -> bool {
    expression_precedence(expression_kind) == Precedence::Assignment
        || expression_kind == SyntaxKind::CoalesceExpression
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        assert!(
            expression_precedence(SyntaxKind::MultiplyExpression)
                > expression_precedence(SyntaxKind::AddExpression)
        );
    }

    #[test]
    fn test_right_associative_operators() {
        assert!(is_right_associative(SyntaxKind::SimpleAssignmentExpression));
        assert!(is_right_associative(SyntaxKind::CoalesceExpression));
        assert!(!is_right_associative(SyntaxKind::SubtractExpression));
    }
}
