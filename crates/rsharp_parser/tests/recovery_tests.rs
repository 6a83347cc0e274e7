//! Error recovery integration tests: missing delimiters, skipped garbage,
//! the recursion limit and long chains. Deep inputs run on the default test
//! thread.

use pretty_assertions::assert_eq;
use rsharp_ast::*;
use rsharp_diagnostics::messages;
use rsharp_options::ParseOptions;
use rsharp_parser::{parse_compilation_unit, parse_expression};

fn parse(source: &str) -> CompilationUnit {
    let tree = parse_compilation_unit(source, &ParseOptions::default());
    assert_eq!(tree.to_full_string(), source);
    tree.into_root()
}

fn error_codes(node: &dyn SyntaxNode) -> Vec<u32> {
    node.errors().iter().map(|d| d.code).collect()
}

fn class_members(unit: &CompilationUnit) -> &[MemberDeclaration] {
    match unit.members.first() {
        Some(MemberDeclaration::Class(class)) => &class.members,
        Some(MemberDeclaration::Namespace(namespace)) => match namespace.members.first() {
            Some(MemberDeclaration::Class(class)) => &class.members,
            other => panic!("expected a class, got {other:?}"),
        },
        other => panic!("expected a class, got {other:?}"),
    }
}

// ============================================================================
// Missing delimiters
// ============================================================================

#[test]
fn test_unterminated_scopes_each_get_a_close_brace() {
    let unit = parse("namespace N { class C { void M() { ");
    assert_eq!(
        error_codes(&unit),
        vec![
            messages::RBRACE_EXPECTED.code,
            messages::RBRACE_EXPECTED.code,
            messages::RBRACE_EXPECTED.code,
        ]
    );
}

#[test]
fn test_block_ends_at_member_modifier() {
    let unit = parse("class C { void M() { a(); public int x; }");
    assert_eq!(error_codes(&unit), vec![messages::RBRACE_EXPECTED.code]);
    assert_eq!(class_members(&unit).len(), 2);
}

#[test]
fn test_missing_close_paren() {
    let unit = parse("class C { void M( { } }");
    assert_eq!(
        error_codes(&unit).first(),
        Some(&messages::CLOSE_PAREN_EXPECTED.code)
    );
    assert_eq!(class_members(&unit).len(), 1);
}

// ============================================================================
// Skipped tokens
// ============================================================================

#[test]
fn test_bad_initializer_keeps_following_members() {
    let unit = parse("class C { void M() { int x = ; } int y; }");
    assert_eq!(error_codes(&unit), vec![messages::INVALID_EXPR_TERM.code]);
    assert_eq!(class_members(&unit).len(), 2);
}

#[test]
fn test_garbage_between_types() {
    let unit = parse("class A { } ) ] class B { }");
    assert_eq!(error_codes(&unit), vec![messages::EOF_EXPECTED.code]);
    assert_eq!(unit.members.len(), 2);
    assert_eq!(unit.to_string(), "class A { } ) ] class B { }");
}

#[test]
fn test_skipped_tokens_live_in_trivia() {
    let unit = parse("class A { } ) class B { }");
    let skipped: Vec<String> = descendant_trivia(&unit)
        .into_iter()
        .filter(|t| t.kind() == SyntaxKind::SkippedTokensTrivia)
        .map(|t| t.to_full_string())
        .collect();
    assert_eq!(skipped, vec![") ".to_string()]);
}

#[test]
fn test_stray_tokens_in_class_body() {
    let unit = parse("class C { int x; ) ) int y; }");
    assert_eq!(error_codes(&unit), vec![messages::INVALID_MEMBER_DECL.code]);
    assert_eq!(class_members(&unit).len(), 2);
}

#[test]
fn test_statement_garbage_in_block() {
    let unit = parse("class C { void M() { ) a(); } }");
    assert_eq!(error_codes(&unit), vec![messages::INVALID_EXPR_TERM.code]);
}

// ============================================================================
// Recursion limit
// ============================================================================

#[test]
fn test_deep_parentheses() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let parsed = parse_expression(&source);
    assert_eq!(parsed.to_full_string(), source);
    let codes: Vec<u32> = parsed.errors().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![messages::INSUFFICIENT_STACK.code]);
}

#[test]
fn test_deep_classes() {
    let depth = 5_000;
    let source = format!("{}{}", "class C { ".repeat(depth), "} ".repeat(depth));
    let tree = parse_compilation_unit(&source, &ParseOptions::default());
    assert_eq!(tree.to_full_string(), source);
    let stack_errors = tree
        .errors()
        .iter()
        .filter(|d| d.code == messages::INSUFFICIENT_STACK.code)
        .count();
    assert_eq!(stack_errors, 1);
}

#[test]
fn test_nesting_just_under_the_limit() {
    let depth = 190;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let parsed = parse_expression(&source);
    assert_eq!(parsed.to_full_string(), source);
    assert!(parsed.errors().is_empty());

    let source = format!(
        "class C {{ void M() {{ {}{} }} }}",
        "{ ".repeat(depth),
        "} ".repeat(depth)
    );
    let tree = parse_compilation_unit(&source, &ParseOptions::preview());
    assert_eq!(tree.to_full_string(), source);
    assert!(tree.errors().is_empty());

    let source = format!(
        "class C {{ int[] x = {}1{}; }}",
        "{ ".repeat(depth),
        " }".repeat(depth)
    );
    let unit = parse(&source);
    assert!(error_codes(&unit).is_empty());
}

#[test]
fn test_deep_initializers() {
    let depth = 5_000;
    let source = format!("class C {{ int[] x = {}; }}", "{".repeat(depth));
    let unit = parse(&source);
    let stack_errors = error_codes(&unit)
        .into_iter()
        .filter(|&code| code == messages::INSUFFICIENT_STACK.code)
        .count();
    assert_eq!(stack_errors, 1);
}

// ============================================================================
// Long chains
// ============================================================================

#[test]
fn test_long_binary_chain() {
    let source = format!("class C {{ int x = 1{}; }}", " + 1".repeat(20_000));
    let unit = parse(&source);
    assert!(error_codes(&unit).is_empty());
}

#[test]
fn test_long_member_access_chain() {
    let source = format!("class C {{ void M() {{ a{}(); }} }}", ".b".repeat(20_000));
    let unit = parse(&source);
    assert!(error_codes(&unit).is_empty());
    assert_eq!(class_members(&unit).len(), 1);
}

#[test]
fn test_long_qualified_namespace_name() {
    let source = format!("namespace a{} {{ }}", ".b".repeat(20_000));
    let unit = parse(&source);
    assert!(error_codes(&unit).is_empty());
    let Some(MemberDeclaration::Namespace(namespace)) = unit.members.first() else {
        panic!("expected a namespace");
    };
    assert_eq!(namespace.name.kind(), SyntaxKind::QualifiedName);
}

#[test]
fn test_long_pointer_type() {
    let source = format!("class C {{ unsafe int{} p; }}", "*".repeat(20_000));
    let unit = parse(&source);
    assert!(error_codes(&unit).is_empty());
}

#[test]
fn test_moderate_nesting_is_fine() {
    let source = format!("{}a{}", "(".repeat(50), ")".repeat(50));
    let parsed = parse_expression(&source);
    assert!(parsed.errors().is_empty());
}
