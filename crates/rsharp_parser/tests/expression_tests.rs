//! Expression, statement and interpolated string integration tests.

use pretty_assertions::assert_eq;
use rsharp_ast::*;
use rsharp_diagnostics::messages;
use rsharp_parser::{parse_expression, parse_statement};

fn expression(source: &str) -> Parsed<ExpressionSyntax> {
    let parsed = parse_expression(source);
    assert_eq!(parsed.to_full_string(), source);
    parsed
}

fn statement(source: &str) -> Parsed<StatementSyntax> {
    let parsed = parse_statement(source);
    assert_eq!(parsed.to_full_string(), source);
    parsed
}

fn kind_of(source: &str) -> SyntaxKind {
    let parsed = expression(source);
    assert!(parsed.errors().is_empty(), "{source}: {:?}", parsed.errors());
    parsed.node.kind()
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_precedence() {
    let parsed = expression("a + b * c");
    let ExpressionSyntax::Binary(add) = &parsed.node else {
        panic!("expected a binary expression");
    };
    assert_eq!(add.kind, SyntaxKind::AddExpression);
    assert_eq!(add.right.kind(), SyntaxKind::MultiplyExpression);
}

#[test]
fn test_left_associative() {
    let parsed = expression("a - b - c");
    let ExpressionSyntax::Binary(outer) = &parsed.node else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.left.to_string(), "a - b");
}

#[test]
fn test_cast_binds_tighter_than_binary() {
    let parsed = expression("(int)x * y");
    let ExpressionSyntax::Binary(multiply) = &parsed.node else {
        panic!("expected a binary expression");
    };
    assert_eq!(multiply.left.kind(), SyntaxKind::CastExpression);
    assert_eq!(multiply.right.to_string(), "y");
}

#[test]
fn test_assignment_is_right_associative() {
    let parsed = expression("a = b += c");
    let ExpressionSyntax::Assignment(outer) = &parsed.node else {
        panic!("expected an assignment");
    };
    assert_eq!(outer.right.kind(), SyntaxKind::AddAssignmentExpression);
}

#[test]
fn test_operator_kinds() {
    let cases = [
        ("a ?? b", SyntaxKind::CoalesceExpression),
        ("a ??= b", SyntaxKind::CoalesceAssignmentExpression),
        ("a || b && c", SyntaxKind::LogicalOrExpression),
        ("a == b", SyntaxKind::EqualsExpression),
        ("a != b", SyntaxKind::NotEqualsExpression),
        ("a >> 2", SyntaxKind::RightShiftExpression),
        ("a >>> 2", SyntaxKind::UnsignedRightShiftExpression),
        ("a >>= 2", SyntaxKind::RightShiftAssignmentExpression),
        ("a is string", SyntaxKind::IsExpression),
        ("a as string", SyntaxKind::AsExpression),
        ("a ? b : c", SyntaxKind::ConditionalExpression),
        ("!a", SyntaxKind::LogicalNotExpression),
        ("-a", SyntaxKind::UnaryMinusExpression),
        ("++a", SyntaxKind::PreIncrementExpression),
        ("a++", SyntaxKind::PostIncrementExpression),
    ];
    for (source, kind) in cases {
        assert_eq!(kind_of(source), kind, "{source}");
    }
}

#[test]
fn test_separated_greater_than_is_comparison() {
    let parsed = expression("a > > b");
    assert!(!parsed.errors().is_empty());
}

// ============================================================================
// Primary expressions
// ============================================================================

#[test]
fn test_primary_kinds() {
    let cases = [
        ("1", SyntaxKind::NumericLiteralExpression),
        ("\"s\"", SyntaxKind::StringLiteralExpression),
        ("true", SyntaxKind::TrueLiteralExpression),
        ("null", SyntaxKind::NullLiteralExpression),
        ("this", SyntaxKind::ThisExpression),
        ("base.M()", SyntaxKind::InvocationExpression),
        ("a.b", SyntaxKind::SimpleMemberAccessExpression),
        ("a[1, 2]", SyntaxKind::ElementAccessExpression),
        ("int.Parse", SyntaxKind::SimpleMemberAccessExpression),
        ("(a)", SyntaxKind::ParenthesizedExpression),
        ("(a, b)", SyntaxKind::TupleExpression),
        ("typeof(List<>)", SyntaxKind::TypeOfExpression),
        ("sizeof(int)", SyntaxKind::SizeOfExpression),
        ("default(int)", SyntaxKind::DefaultExpression),
        ("default", SyntaxKind::DefaultLiteralExpression),
        ("checked(a + b)", SyntaxKind::CheckedExpression),
        ("(int)x", SyntaxKind::CastExpression),
        ("throw e", SyntaxKind::ThrowExpression),
        ("ref a[0]", SyntaxKind::RefExpression),
        ("c ? ref a : ref b", SyntaxKind::ConditionalExpression),
    ];
    for (source, kind) in cases {
        assert_eq!(kind_of(source), kind, "{source}");
    }
}

#[test]
fn test_creation_expressions() {
    let cases = [
        ("new C(1) { A = 2 }", SyntaxKind::ObjectCreationExpression),
        ("new List<int> { 1, 2 }", SyntaxKind::ObjectCreationExpression),
        ("new int[3]", SyntaxKind::ArrayCreationExpression),
        ("new int[] { 1, 2 }", SyntaxKind::ArrayCreationExpression),
        ("new[] { 1, 2 }", SyntaxKind::ImplicitArrayCreationExpression),
    ];
    for (source, kind) in cases {
        assert_eq!(kind_of(source), kind, "{source}");
    }
}

#[test]
fn test_lambdas() {
    assert_eq!(kind_of("x => x + 1"), SyntaxKind::SimpleLambdaExpression);
    assert_eq!(kind_of("(a, b) => a"), SyntaxKind::ParenthesizedLambdaExpression);
    assert_eq!(kind_of("(int a) => { return a; }"), SyntaxKind::ParenthesizedLambdaExpression);
    assert_eq!(kind_of("() => 0"), SyntaxKind::ParenthesizedLambdaExpression);
}

#[test]
fn test_generic_invocation_versus_comparison() {
    assert_eq!(kind_of("F<T>(x)"), SyntaxKind::InvocationExpression);
    assert_eq!(kind_of("a < b"), SyntaxKind::LessThanExpression);
    let parsed = expression("F(a < b, c > d)");
    let ExpressionSyntax::Invocation(invocation) = &parsed.node else {
        panic!("expected an invocation");
    };
    assert_eq!(invocation.argument_list.arguments.len(), 2);
}

#[test]
fn test_named_and_ref_arguments() {
    let parsed = expression("M(name: 1, ref a, out b)");
    let ExpressionSyntax::Invocation(invocation) = &parsed.node else {
        panic!("expected an invocation");
    };
    let arguments = &invocation.argument_list.arguments;
    assert!(arguments.elements[0].name_colon.is_some());
    assert!(arguments.elements[1].ref_kind_keyword.is_some());
    assert!(arguments.elements[2].ref_kind_keyword.is_some());
    assert!(parsed.errors().is_empty());
}

#[test]
fn test_missing_operand() {
    let parsed = expression("a +");
    assert_eq!(
        parsed.errors().iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![messages::EXPRESSION_EXPECTED.code]
    );
}

#[test]
fn test_invalid_operand() {
    let parsed = expression("a + )");
    assert_eq!(
        parsed.errors().first().map(|d| d.code),
        Some(messages::INVALID_EXPR_TERM.code)
    );
}

// ============================================================================
// Interpolated strings
// ============================================================================

#[test]
fn test_interpolated_string() {
    let parsed = expression("$\"a{b,5:x2}c\"");
    let ExpressionSyntax::InterpolatedString(string) = &parsed.node else {
        panic!("expected an interpolated string");
    };
    assert_eq!(string.contents.len(), 3);
    let InterpolatedStringContent::Interpolation(hole) = &string.contents[1] else {
        panic!("expected an interpolation");
    };
    assert_eq!(hole.expression.to_string(), "b");
    assert!(hole.alignment_clause.is_some());
    assert_eq!(
        hole.format_clause.as_ref().map(|f| f.format_string_token.text.as_str()),
        Some("x2")
    );
    assert!(parsed.errors().is_empty());
}

#[test]
fn test_empty_interpolated_string() {
    let parsed = expression("$\"\"");
    let ExpressionSyntax::InterpolatedString(string) = &parsed.node else {
        panic!("expected an interpolated string");
    };
    assert!(string.contents.is_empty());
    assert!(parsed.errors().is_empty());
}

#[test]
fn test_verbatim_interpolated_string() {
    assert_eq!(kind_of("$@\"a{b}\""), SyntaxKind::InterpolatedStringExpression);
    assert_eq!(kind_of("@$\"a{b}\""), SyntaxKind::InterpolatedStringExpression);
}

#[test]
fn test_empty_hole() {
    let parsed = expression("$\"{}\"");
    assert_eq!(
        parsed.errors().iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![messages::EXPRESSION_EXPECTED.code]
    );
}

#[test]
fn test_unterminated_interpolated_string() {
    let parsed = expression("$\"abc");
    let ExpressionSyntax::InterpolatedString(string) = &parsed.node else {
        panic!("expected an interpolated string");
    };
    assert!(string.string_end_token.is_missing());
    assert_eq!(
        parsed.errors().iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![messages::UNTERMINATED_STRING_LIT.code]
    );
}

#[test]
fn test_constructed_interpolated_string() {
    let start = SyntaxToken::new(SyntaxKind::InterpolatedStringStartToken, 0, "$\"");
    let node = InterpolatedStringExpression::with_start(start);
    assert_eq!(node.to_full_string(), "$\"\"");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_statement_kinds() {
    let cases = [
        ("{ }", SyntaxKind::Block),
        (";", SyntaxKind::EmptyStatement),
        ("a();", SyntaxKind::ExpressionStatement),
        ("int a = 1;", SyntaxKind::LocalDeclarationStatement),
        ("var a = 1;", SyntaxKind::LocalDeclarationStatement),
        ("const int a = 1;", SyntaxKind::LocalDeclarationStatement),
        ("List<int> a;", SyntaxKind::LocalDeclarationStatement),
        ("return;", SyntaxKind::ReturnStatement),
        ("return a;", SyntaxKind::ReturnStatement),
        ("return ref a;", SyntaxKind::ReturnStatement),
        ("ref int r = ref a;", SyntaxKind::LocalDeclarationStatement),
        ("throw;", SyntaxKind::ThrowStatement),
        ("break;", SyntaxKind::BreakStatement),
        ("continue;", SyntaxKind::ContinueStatement),
        ("if (a) b(); else c();", SyntaxKind::IfStatement),
        ("while (a) { }", SyntaxKind::WhileStatement),
        ("do { } while (a);", SyntaxKind::DoStatement),
        ("for (int i = 0; i < n; i++) { }", SyntaxKind::ForStatement),
        ("for (;;) { }", SyntaxKind::ForStatement),
        ("foreach (var x in xs) { }", SyntaxKind::ForEachStatement),
        ("try { } catch (Exception e) when (e != null) { } finally { }", SyntaxKind::TryStatement),
        ("yield return 1;", SyntaxKind::YieldReturnStatement),
        ("yield break;", SyntaxKind::YieldBreakStatement),
    ];
    for (source, kind) in cases {
        let parsed = statement(source);
        assert!(parsed.errors().is_empty(), "{source}: {:?}", parsed.errors());
        assert_eq!(parsed.node.kind(), kind, "{source}");
    }
}

#[test]
fn test_generic_comparison_statement() {
    let parsed = statement("a < b;");
    assert_eq!(parsed.node.kind(), SyntaxKind::ExpressionStatement);
}

#[test]
fn test_missing_semicolon() {
    let parsed = statement("return a");
    assert_eq!(
        parsed.errors().iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![messages::SEMICOLON_EXPECTED.code]
    );
}

#[test]
fn test_unterminated_block() {
    let parsed = statement("{ a();");
    assert_eq!(
        parsed.errors().iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![messages::RBRACE_EXPECTED.code]
    );
}
