//! Tree walking.
//!
//! `SyntaxWalker` visits nodes, tokens and trivia in document order. Default
//! methods descend into children; override a method to observe an element and
//! call the matching `walk_*` function to keep descending.

use crate::node::{SyntaxElement, SyntaxNode};
use crate::token::{SyntaxToken, SyntaxTrivia};
use rsharp_core::ensure_sufficient_stack;

/// How deep a walker descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WalkDepth {
    Node,
    Token,
    Trivia,
    /// Also descend into tokens held in skipped-tokens trivia.
    StructuredTrivia,
}

pub trait SyntaxWalker<'a> {
    fn depth(&self) -> WalkDepth {
        WalkDepth::Token
    }

    fn visit_node(&mut self, node: &'a dyn SyntaxNode) {
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &'a SyntaxToken) {
        walk_token(self, token);
    }

    fn visit_trivia(&mut self, trivia: &'a SyntaxTrivia) {
        walk_trivia(self, trivia);
    }
}

pub fn walk_node<'a, W: SyntaxWalker<'a> + ?Sized>(walker: &mut W, node: &'a dyn SyntaxNode) {
    let depth = walker.depth();
    ensure_sufficient_stack(|| {
        node.for_each_child(&mut |child| match child {
            SyntaxElement::Node(n) => walker.visit_node(n),
            SyntaxElement::Token(t) if depth >= WalkDepth::Token => walker.visit_token(t),
            SyntaxElement::Token(_) => {}
        })
    });
}

pub fn walk_token<'a, W: SyntaxWalker<'a> + ?Sized>(walker: &mut W, token: &'a SyntaxToken) {
    if walker.depth() < WalkDepth::Trivia {
        return;
    }
    for trivia in &token.leading {
        walker.visit_trivia(trivia);
    }
    for trivia in &token.trailing {
        walker.visit_trivia(trivia);
    }
}

pub fn walk_trivia<'a, W: SyntaxWalker<'a> + ?Sized>(walker: &mut W, trivia: &'a SyntaxTrivia) {
    if walker.depth() < WalkDepth::StructuredTrivia {
        return;
    }
    for token in trivia.skipped_tokens() {
        walker.visit_token(token);
    }
}

// ============================================================================
// Descendant queries
// ============================================================================

#[derive(Default)]
struct Collector<'a> {
    depth: Option<WalkDepth>,
    nodes: Vec<&'a dyn SyntaxNode>,
    tokens: Vec<&'a SyntaxToken>,
    trivia: Vec<&'a SyntaxTrivia>,
}

impl<'a> SyntaxWalker<'a> for Collector<'a> {
    fn depth(&self) -> WalkDepth {
        self.depth.unwrap_or(WalkDepth::Token)
    }

    fn visit_node(&mut self, node: &'a dyn SyntaxNode) {
        self.nodes.push(node);
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &'a SyntaxToken) {
        self.tokens.push(token);
        walk_token(self, token);
    }

    fn visit_trivia(&mut self, trivia: &'a SyntaxTrivia) {
        self.trivia.push(trivia);
        walk_trivia(self, trivia);
    }
}

/// Every node below `node`, in pre-order. `node` itself is not included.
pub fn descendant_nodes(node: &dyn SyntaxNode) -> Vec<&dyn SyntaxNode> {
    let mut collector = Collector {
        depth: Some(WalkDepth::Node),
        ..Default::default()
    };
    walk_node(&mut collector, node);
    collector.nodes
}

/// Every token of `node` in document order, excluding skipped tokens.
pub fn descendant_tokens(node: &dyn SyntaxNode) -> Vec<&SyntaxToken> {
    let mut collector = Collector::default();
    walk_node(&mut collector, node);
    collector.tokens
}

/// Every trivia of `node` in document order, including the trivia of tokens
/// held in skipped-tokens trivia.
pub fn descendant_trivia(node: &dyn SyntaxNode) -> Vec<&SyntaxTrivia> {
    let mut collector = Collector {
        depth: Some(WalkDepth::StructuredTrivia),
        ..Default::default()
    };
    walk_node(&mut collector, node);
    collector.trivia
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::nodes::{NameSyntax, QualifiedName, SimpleNameSyntax};
    use crate::SyntaxKind;

    fn qualified(left: &str, right: &str) -> QualifiedName {
        QualifiedName {
            left: Box::new(factory::identifier_name(left).into()),
            dot_token: factory::token(SyntaxKind::DotToken),
            right: SimpleNameSyntax::IdentifierName(factory::identifier_name(right)),
        }
    }

    #[test]
    fn test_descendant_nodes_pre_order() {
        let name = qualified("a", "b");
        let kinds: Vec<_> = descendant_nodes(&name).iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::IdentifierName, SyntaxKind::IdentifierName]);
    }

    #[test]
    fn test_descendant_tokens_document_order() {
        let name = qualified("a", "b");
        let texts: Vec<_> = descendant_tokens(&name).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", ".", "b"]);
    }

    #[test]
    fn test_descendant_trivia_includes_skipped_tokens() {
        let mut name = qualified("a", "b");
        let mut skipped = factory::token(SyntaxKind::ColonColonToken);
        skipped.trailing.push(SyntaxTrivia::whitespace(" "));
        name.dot_token.prepend_skipped(vec![skipped]);

        let kinds: Vec<_> = descendant_trivia(&name).iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::SkippedTokensTrivia, SyntaxKind::WhitespaceTrivia]
        );
    }

    #[test]
    fn test_walks_long_dotted_chain() {
        let links = 50_000;
        let mut name = NameSyntax::from(factory::identifier_name("a"));
        for _ in 0..links {
            name = QualifiedName {
                left: Box::new(name),
                dot_token: factory::token(SyntaxKind::DotToken),
                right: SimpleNameSyntax::IdentifierName(factory::identifier_name("b")),
            }
            .into();
        }
        assert_eq!(descendant_nodes(&name).len(), 2 * links);
        assert_eq!(descendant_tokens(&name).len(), 2 * links + 1);
    }

    struct Counter {
        tokens: usize,
    }

    impl<'a> SyntaxWalker<'a> for Counter {
        fn visit_token(&mut self, _token: &'a SyntaxToken) {
            self.tokens += 1;
        }
    }

    #[test]
    fn test_custom_walker_overrides_token_visit() {
        let name = qualified("x", "y");
        let mut counter = Counter { tokens: 0 };
        counter.visit_node(&name);
        assert_eq!(counter.tokens, 3);
    }
}
