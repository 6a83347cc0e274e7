//! Declaration parser integration tests.
//!
//! Compilation units, directives, namespaces, attributes, type declarations
//! and constraint clauses.

use pretty_assertions::assert_eq;
use rsharp_ast::*;
use rsharp_diagnostics::messages;
use rsharp_options::{LanguageVersion, ParseOptions};
use rsharp_parser::parse_compilation_unit;

/// Helper: parse with default options and check the round trip.
fn parse(source: &str) -> CompilationUnit {
    parse_with(source, &ParseOptions::default())
}

fn parse_with(source: &str, options: &ParseOptions) -> CompilationUnit {
    let tree = parse_compilation_unit(source, options);
    assert_eq!(tree.root().to_full_string(), source);
    tree.into_root()
}

fn error_codes(node: &dyn SyntaxNode) -> Vec<u32> {
    node.errors().iter().map(|d| d.code).collect()
}

fn class(member: &MemberDeclaration) -> &ClassDeclaration {
    match member {
        MemberDeclaration::Class(c) => c,
        other => panic!("expected a class, got {:?}", other.kind()),
    }
}

// ============================================================================
// Using directives
// ============================================================================

#[test]
fn test_using_static() {
    let cu = parse("using static a;");
    assert_eq!(cu.usings.len(), 1);
    let using = &cu.usings[0];
    assert_eq!(
        using.static_keyword.as_ref().map(|t| t.kind),
        Some(SyntaxKind::StaticKeyword)
    );
    assert!(using.alias.is_none());
    assert_eq!(using.name.to_string(), "a");
    assert!(cu.errors().is_empty());
}

#[test]
fn test_using_alias() {
    let cu = parse("using A = B.C;");
    let using = &cu.usings[0];
    assert_eq!(using.alias.as_ref().map(|a| a.name.to_string()), Some("A".to_string()));
    assert_eq!(using.name.to_string(), "B.C");
    assert!(cu.errors().is_empty());
}

#[test]
fn test_global_using() {
    let cu = parse("global using System;");
    assert!(cu.usings[0].global_keyword.is_some());
    assert!(cu.errors().is_empty());

    let old = ParseOptions::default().with_language_version(LanguageVersion::CSharp9);
    let cu = parse_with("global using System;", &old);
    assert_eq!(
        error_codes(&cu),
        vec![messages::FEATURE_NOT_AVAILABLE_IN_VERSION9.code]
    );
}

#[test]
fn test_using_static_static() {
    let cu = parse("using static static a;");
    assert_eq!(cu.usings.len(), 1);
    assert!(cu.usings[0].name.is_missing());
    assert_eq!(
        error_codes(&cu.usings[0]),
        vec![messages::IDENTIFIER_EXPECTED_KW.code]
    );
}

#[test]
fn test_static_before_using() {
    let cu = parse("static using a;");
    assert_eq!(cu.usings.len(), 1);
    assert!(cu.members.is_empty());
    assert_eq!(error_codes(&cu), vec![messages::NAMESPACE_UNEXPECTED.code]);
    assert_eq!(cu.usings[0].to_full_string(), "static using a;");
    assert_eq!(cu.usings[0].to_string(), "using a;");
}

#[test]
fn test_using_after_member() {
    let cu = parse("class C { } using a;");
    assert!(cu.usings.is_empty());
    assert_eq!(cu.members.len(), 1);
    assert_eq!(error_codes(&cu), vec![messages::USING_AFTER_ELEMENTS.code]);
}

// ============================================================================
// Extern aliases
// ============================================================================

#[test]
fn test_extern_alias() {
    let cu = parse("extern alias a;");
    assert_eq!(cu.externs.len(), 1);
    assert_eq!(cu.externs[0].identifier.text, "a");
    assert!(cu.errors().is_empty());
}

#[test]
fn test_extern_alias_after_using_is_dropped() {
    let cu = parse("using b; extern alias c;");
    assert_eq!(cu.usings.len(), 1);
    assert!(cu.externs.is_empty());
    assert_eq!(error_codes(&cu), vec![messages::EXTERN_AFTER_ELEMENTS.code]);
}

// ============================================================================
// Namespaces
// ============================================================================

#[test]
fn test_block_namespace() {
    let cu = parse("namespace a.b { using c; class d { } }");
    let MemberDeclaration::Namespace(ns) = &cu.members[0] else {
        panic!("expected a namespace");
    };
    assert_eq!(ns.name.to_string(), "a.b");
    assert_eq!(ns.usings.len(), 1);
    assert_eq!(ns.members.len(), 1);
    assert!(ns.semicolon_token.is_none());
    assert!(cu.errors().is_empty());
}

#[test]
fn test_file_scoped_namespace() {
    let cu = parse("namespace a; using b; class c { }");
    let MemberDeclaration::FileScopedNamespace(ns) = &cu.members[0] else {
        panic!("expected a file-scoped namespace");
    };
    assert_eq!(ns.usings.len(), 1);
    assert_eq!(ns.members.len(), 1);
    assert!(cu.errors().is_empty());
}

#[test]
fn test_file_scoped_namespace_needs_csharp10() {
    let options = ParseOptions::default().with_language_version(LanguageVersion::CSharp9);
    let cu = parse_with("namespace a;", &options);
    assert_eq!(
        error_codes(&cu),
        vec![messages::FEATURE_NOT_AVAILABLE_IN_VERSION9.code]
    );
}

#[test]
fn test_multiple_file_scoped_namespaces() {
    let cu = parse("namespace a; namespace b;");
    assert_eq!(
        error_codes(&cu),
        vec![messages::MULTIPLE_FILE_SCOPED_NAMESPACE.code]
    );
}

#[test]
fn test_file_scoped_after_block_namespace() {
    let cu = parse("namespace a { } namespace b;");
    assert_eq!(
        error_codes(&cu),
        vec![messages::FILE_SCOPED_AND_NORMAL_NAMESPACE.code]
    );
}

#[test]
fn test_file_scoped_namespace_after_members() {
    let cu = parse("class c { } namespace a;");
    assert_eq!(
        error_codes(&cu),
        vec![messages::FILE_SCOPED_NAMESPACE_NOT_BEFORE_ALL_MEMBERS.code]
    );
}

#[test]
fn test_unterminated_namespace() {
    let cu = parse("namespace a {");
    assert_eq!(error_codes(&cu), vec![messages::RBRACE_EXPECTED.code]);
}

#[test]
fn test_stray_close_brace() {
    let cu = parse("namespace a { } }");
    assert_eq!(cu.members.len(), 1);
    assert_eq!(error_codes(&cu), vec![messages::EOF_EXPECTED.code]);
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_global_attribute() {
    let cu = parse("[assembly:a(b = c)]");
    assert_eq!(cu.attribute_lists.len(), 1);
    let list = &cu.attribute_lists[0];
    assert_eq!(list.location(), Some(AttributeLocation::Assembly));
    assert_eq!(list.attributes.len(), 1);
    let attribute = &list.attributes.elements[0];
    assert_eq!(attribute.name.to_string(), "a");
    let arguments = &attribute.argument_list.as_ref().expect("arguments").arguments;
    assert_eq!(arguments.len(), 1);
    let name_equals = arguments.elements[0].name_equals.as_ref().expect("named argument");
    assert_eq!(name_equals.name.to_string(), "b");
    assert_eq!(arguments.elements[0].expression.to_string(), "c");
    assert!(cu.errors().is_empty());
}

#[test]
fn test_verbatim_attribute_target() {
    let cu = parse("[@module: a]");
    assert_eq!(cu.attribute_lists[0].location(), Some(AttributeLocation::Module));
}

#[test]
fn test_member_attributes() {
    let cu = parse("[Serializable, Obsolete(\"x\")] class C { }");
    assert!(cu.attribute_lists.is_empty());
    let c = class(&cu.members[0]);
    assert_eq!(c.attribute_lists.len(), 1);
    assert_eq!(c.attribute_lists[0].attributes.len(), 2);
    assert!(cu.errors().is_empty());
}

#[test]
fn test_global_attribute_after_member() {
    let cu = parse("class C { } [assembly: a]");
    assert!(cu.attribute_lists.is_empty());
    assert_eq!(
        error_codes(&cu),
        vec![messages::GLOBAL_ATTRIBUTES_NOT_FIRST.code]
    );
}

// ============================================================================
// Type declarations
// ============================================================================

#[test]
fn test_class_with_constraints() {
    let cu = parse("class a<b> where b : class, c, new() { }");
    let c = class(&cu.members[0]);
    assert_eq!(
        c.type_parameter_list.as_ref().map(|l| l.to_string()),
        Some("<b>".to_string())
    );
    assert_eq!(c.constraint_clauses.len(), 1);
    let kinds: Vec<SyntaxKind> = c.constraint_clauses[0]
        .constraints
        .iter()
        .map(|c| c.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ClassConstraint,
            SyntaxKind::TypeConstraint,
            SyntaxKind::ConstructorConstraint,
        ]
    );
    assert_eq!(c.constraint_clauses[0].constraints.elements[1].to_string(), "c");
    assert!(cu.errors().is_empty());
}

#[test]
fn test_incomplete_constraint_clause() {
    let cu = parse("class a<b> where b : c where { }");
    let c = class(&cu.members[0]);
    assert_eq!(c.constraint_clauses.len(), 2);
    let second = &c.constraint_clauses[1];
    assert!(second.name.is_missing());
    assert!(second.colon_token.is_missing());
    assert_eq!(second.constraints.len(), 1);
    let TypeParameterConstraint::Type(constraint) = &second.constraints.elements[0] else {
        panic!("expected a type constraint");
    };
    assert!(constraint.ty.is_missing());
    assert_eq!(cu.errors().len(), 3);
}

#[test]
fn test_struct_nullable_constraint() {
    let cu = parse("class a<b> where b : struct? { }");
    assert_eq!(error_codes(&cu), vec![messages::UNEXPECTED_TOKEN.code]);
}

#[test]
fn test_default_constraint_version() {
    let text = "class a<b> where b : default { }";
    assert!(parse(text).errors().is_empty());
    let options = ParseOptions::default().with_language_version(LanguageVersion::CSharp8);
    assert_eq!(
        error_codes(&parse_with(text, &options)),
        vec![messages::FEATURE_NOT_AVAILABLE_IN_VERSION8.code]
    );
}

#[test]
fn test_variant_type_parameters() {
    let cu = parse("interface I<in T, [A] out U> { }");
    let MemberDeclaration::Interface(i) = &cu.members[0] else {
        panic!("expected an interface");
    };
    let parameters = &i.type_parameter_list.as_ref().expect("type parameters").parameters;
    assert_eq!(parameters.len(), 2);
    assert!(parameters.elements[0].variance_keyword.is_some());
    assert_eq!(parameters.elements[1].attribute_lists.len(), 1);
    assert!(cu.errors().is_empty());
}

#[test]
fn test_base_list() {
    let cu = parse("struct S : I, J<int> { }");
    let MemberDeclaration::Struct(s) = &cu.members[0] else {
        panic!("expected a struct");
    };
    assert_eq!(s.base_list.as_ref().map(|b| b.types.len()), Some(2));
}

#[test]
fn test_nested_types_and_trailing_semicolon() {
    let cu = parse("class A { class B { } enum E { X } };");
    let a = class(&cu.members[0]);
    assert_eq!(a.members.len(), 2);
    assert!(a.semicolon_token.is_some());
    assert!(cu.errors().is_empty());
}

#[test]
fn test_missing_class_body() {
    let cu = parse("class a");
    let c = class(&cu.members[0]);
    assert!(c.open_brace_token.as_ref().is_some_and(|t| t.is_missing()));
    assert_eq!(
        error_codes(&cu),
        vec![messages::LBRACE_EXPECTED.code, messages::RBRACE_EXPECTED.code]
    );
}

#[test]
fn test_unterminated_class() {
    let cu = parse("class a { int x;");
    let c = class(&cu.members[0]);
    assert_eq!(c.members.len(), 1);
    assert_eq!(error_codes(&cu), vec![messages::RBRACE_EXPECTED.code]);
}

// ============================================================================
// Enums and delegates
// ============================================================================

#[test]
fn test_enum() {
    let cu = parse("enum E : byte { A, B = 2, C, }");
    let MemberDeclaration::Enum(e) = &cu.members[0] else {
        panic!("expected an enum");
    };
    assert_eq!(e.members.len(), 3);
    assert_eq!(e.members.separators.len(), 3);
    assert!(e.members.elements[1].equals_value.is_some());
    assert!(cu.errors().is_empty());
}

#[test]
fn test_enum_missing_comma() {
    let cu = parse("enum E { A B }");
    let MemberDeclaration::Enum(e) = &cu.members[0] else {
        panic!("expected an enum");
    };
    assert_eq!(e.members.len(), 2);
    assert_eq!(cu.errors().len(), 1);
}

#[test]
fn test_delegate() {
    let cu = parse("delegate ref readonly T D<T>(int a) where T : struct;");
    let MemberDeclaration::Delegate(d) = &cu.members[0] else {
        panic!("expected a delegate");
    };
    assert_eq!(d.identifier.text, "D");
    assert_eq!(d.return_type.kind(), SyntaxKind::RefType);
    assert_eq!(d.parameter_list.parameters.len(), 1);
    assert_eq!(d.constraint_clauses.len(), 1);
    assert!(cu.errors().is_empty());
}

// ============================================================================
// Top-level statements
// ============================================================================

#[test]
fn test_top_level_declaration_is_a_field() {
    let cu = parse("int x = 2;");
    assert!(matches!(cu.members[0], MemberDeclaration::Field(_)));
    assert!(cu.errors().is_empty());
}

#[test]
fn test_global_statements() {
    let cu = parse("using System; Console.WriteLine(1); x = 2;");
    assert_eq!(cu.usings.len(), 1);
    assert_eq!(cu.members.len(), 2);
    assert!(cu
        .members
        .iter()
        .all(|m| matches!(m, MemberDeclaration::GlobalStatement(_))));
    assert!(cu.errors().is_empty());
}

// ============================================================================
// Shared declaration shapes
// ============================================================================

#[test]
fn test_type_declarations_share_a_shape() {
    let cu = parse("public struct S<T> : I { int x; } internal interface I { } enum E { }");
    let shapes: Vec<(String, usize, usize)> = cu
        .members
        .iter()
        .filter_map(|m| m.as_type_declaration())
        .map(|t| (t.identifier().text.clone(), t.arity(), t.members().len()))
        .collect();
    assert_eq!(
        shapes,
        vec![("S".to_string(), 1, 1), ("I".to_string(), 0, 0)]
    );
    assert!(cu.members.iter().all(|m| m.is_type_or_namespace()));
    assert!(cu.members[0].as_member().has_modifier(SyntaxKind::PublicKeyword));
    assert!(cu.members[1].as_member().has_modifier(SyntaxKind::InternalKeyword));
}

#[test]
fn test_field_is_not_a_namespace_member() {
    let cu = parse("class C { int x; }");
    let field = &class(&cu.members[0]).members[0];
    assert!(!field.is_type_or_namespace());
    assert!(field.as_type_declaration().is_none());
}
