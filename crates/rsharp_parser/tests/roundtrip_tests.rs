//! Lossless round-trip tests over hand-written sources and generated token
//! soups.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rsharp_ast::*;
use rsharp_core::TextSpan;
use rsharp_options::ParseOptions;
use rsharp_parser::{parse_compilation_unit, parse_expression, parse_member_declaration, parse_statement};

const SAMPLE: &str = r#"// header comment
#define TRACE
extern alias Legacy;
using System;
using static System.Math;
using Map = System.Collections.Generic.Dictionary<string, int>;

[assembly: Version("1.0")]

namespace Demo.Shapes
{
    /// <summary>A shape.</summary>
    public interface IShape<out T> where T : class, new()
    {
        double Area { get; }
        T Tag { get; init; }
    }

    public enum Color : byte { Red = 1, Green, Blue, }

    public delegate void Changed(object sender, int value);

    internal sealed class Circle : IShape<object>
    {
        private readonly double radius;
        public const double Tau = 2 * Math.PI;
        public event Changed OnChanged;

        public Circle(double radius) : base() { this.radius = radius; }
        ~Circle() { }

        public double Area => Math.PI * radius * radius;
        public object Tag { get; init; } = new object();
        public int this[int i] { get { return i; } set { } }

        public static Circle operator +(Circle a, Circle b) => new Circle(a.radius + b.radius);
        public static explicit operator double(Circle c) => c.radius;

        public IEnumerable<int> Range(int start, int count = 10)
        {
#if TRACE
            Trace("range");
#else
            this is never tokenized
#endif
            for (int i = start; i < start + count; i++)
            {
                if (i % 2 == 0) continue;
                yield return i;
            }
            foreach (var x in new[] { 1, 2, 3 }) { Use(x); }
            try { Risky(); }
            catch (Exception e) when (e != null) { throw; }
            finally { }
            var text = $"r={radius,8:F2} {{ok}}";
            Func<int, int> twice = x => x * 2;
            var pair = (first: 1, second: "two");
            List<int> list = null;
            list ??= new List<int> { 1 };
            var size = sizeof(int) + (int)radius;
        }
    }
}
"#;

fn assert_round_trip(source: &str) {
    let tree = parse_compilation_unit(source, &ParseOptions::default());
    assert_eq!(tree.to_full_string(), source);
    let text = TextSpan::new(0, source.len() as u32);
    for diagnostic in tree.diagnostics() {
        assert!(
            text.contains_span(&diagnostic.span),
            "{diagnostic:?} lies outside {text:?}"
        );
    }
}

// ============================================================================
// Fixed sources
// ============================================================================

#[test]
fn test_sample_round_trips_without_errors() {
    let tree = parse_compilation_unit(SAMPLE, &ParseOptions::default());
    assert_eq!(tree.to_full_string(), SAMPLE);
    assert!(tree.errors().is_empty(), "{:?}", tree.errors());
}

#[test]
fn test_inactive_region_is_trivia() {
    let tree = parse_compilation_unit(SAMPLE, &ParseOptions::default());
    let tokens: Vec<String> = descendant_tokens(tree.root())
        .into_iter()
        .map(|t| t.text.clone())
        .collect();
    assert!(!tokens.iter().any(|t| t == "tokenized"));
    let disabled = descendant_trivia(tree.root())
        .into_iter()
        .any(|t| t.kind() == SyntaxKind::DisabledTextTrivia);
    assert!(disabled);
}

#[test]
fn test_diagnostic_line_and_column() {
    let source = "class C\n{\n    int x\n}";
    let tree = parse_compilation_unit(source, &ParseOptions::default());
    let errors = tree.errors();
    assert_eq!(errors.len(), 1);
    let position = tree.line_map().line_and_column_of(errors[0].span.start);
    assert_eq!(position.to_string(), "(3,10)");
}

#[test]
fn test_broken_sources_round_trip() {
    let sources = [
        "",
        "}",
        "class",
        "class C {",
        "namespace",
        "namespace N; namespace M;",
        "using",
        "[",
        "[assembly:",
        "class C { void M( }",
        "class C { int this[ }",
        "class C { operator",
        "class C { void M() { for (;; }",
        "class C { void M() { x = $\"{",
        "class C<T where T : { }",
        "enum E { A = , B",
        "delegate",
        "a < b > c; d",
        "#if X\nclass C { }",
        "/* unterminated",
    ];
    for source in sources {
        assert_round_trip(source);
    }
}

#[test]
fn test_fragments_round_trip() {
    for source in ["a +", "(int)", "new int[", "x => {", "$\"a{b"] {
        assert_eq!(parse_expression(source).to_full_string(), source);
    }
    for source in ["if (", "for (int i", "try { }", "{ { }"] {
        assert_eq!(parse_statement(source).to_full_string(), source);
    }
    for source in ["public", "int M(", "event", "} class"] {
        let parsed = parse_member_declaration(source, &ParseOptions::default());
        assert_eq!(parsed.to_full_string(), source);
    }
}

// ============================================================================
// Generated token soups
// ============================================================================

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "class", "struct", "interface", "enum", "delegate", "namespace", "using", "extern",
        "alias", "static", "public", "partial", "async", "event", "operator", "implicit",
        "this", "base", "new", "return", "if", "else", "for", "foreach", "in", "try",
        "catch", "finally", "yield", "var", "int", "string", "void", "A", "b", "T",
        "global", "::", ".", ",", ";", ":", "?", "??", "=", "=>", "+", "-", "*", ">",
        ">>", ">>>", "<", "(", ")", "[", "]", "{", "}", "1", "\"s\"", "$\"a{", "}\"",
        "'c'", "//c\n", "/*c*/", "\n#if X\n", "\n#endif\n", "@if", "!!", " ", "\n",
    ])
}

proptest! {
    #[test]
    fn test_token_soup_round_trips(parts in prop::collection::vec(fragment(), 0..60)) {
        let source = parts.join(" ");
        let tree = parse_compilation_unit(&source, &ParseOptions::default());
        prop_assert_eq!(tree.to_full_string(), source.clone());
        let text = TextSpan::new(0, source.len() as u32);
        for diagnostic in tree.diagnostics() {
            prop_assert!(text.contains_span(&diagnostic.span));
        }
    }

    #[test]
    fn test_expression_soup_round_trips(parts in prop::collection::vec(fragment(), 0..30)) {
        let source = parts.join("");
        prop_assert_eq!(parse_expression(&source).to_full_string(), source);
    }

    #[test]
    fn test_preview_soup_round_trips(parts in prop::collection::vec(fragment(), 0..40)) {
        let source = parts.join(" ");
        let tree = parse_compilation_unit(&source, &ParseOptions::preview());
        prop_assert_eq!(tree.to_full_string(), source);
    }
}
