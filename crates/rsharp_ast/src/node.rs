//! The node model: the `SyntaxNode` trait, child slots, and the macros that
//! declare node structs and category enums.
//!
//! Every node is a plain struct whose fields are its slots in source order.
//! Walking the slots in declaration order visits the node's tokens in
//! document order, which is what makes `to_full_string` lossless.

use crate::syntax_kind::SyntaxKind;
use crate::token::SyntaxToken;
use rsharp_core::text::TextSpan;
use rsharp_diagnostics::{Diagnostic, Severity};
use std::ops::ControlFlow;

#[doc(hidden)]
pub use rsharp_core::ensure_sufficient_stack;

// ============================================================================
// Elements and slots
// ============================================================================

/// A child of a node: either a token or another node.
#[derive(Clone, Copy)]
pub enum SyntaxElement<'a> {
    Token(&'a SyntaxToken),
    Node(&'a dyn SyntaxNode),
}

impl<'a> SyntaxElement<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Token(t) => t.kind,
            SyntaxElement::Node(n) => n.kind(),
        }
    }

    pub fn as_token(&self) -> Option<&'a SyntaxToken> {
        match self {
            SyntaxElement::Token(t) => Some(t),
            SyntaxElement::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&'a dyn SyntaxNode> {
        match self {
            SyntaxElement::Token(_) => None,
            SyntaxElement::Node(n) => Some(*n),
        }
    }
}

impl std::fmt::Debug for SyntaxElement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxElement::Token(t) => write!(f, "Token({:?} {:?})", t.kind, t.text),
            SyntaxElement::Node(n) => write!(f, "Node({:?})", n.kind()),
        }
    }
}

/// Anything that can occupy a node slot.
pub trait Slot {
    fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>));
    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()>;
}

impl Slot for SyntaxToken {
    fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>)) {
        f(SyntaxElement::Token(self));
    }

    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        f(self)
    }
}

impl<T: Slot> Slot for Option<T> {
    fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>)) {
        if let Some(inner) = self {
            inner.for_each_element(f);
        }
    }

    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        match self {
            Some(inner) => inner.visit_tokens_mut(f),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<T: Slot> Slot for Box<T> {
    fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>)) {
        (**self).for_each_element(f);
    }

    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).visit_tokens_mut(f)
    }
}

impl<T: Slot> Slot for Vec<T> {
    fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>)) {
        for item in self {
            item.for_each_element(f);
        }
    }

    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for item in self.iter_mut() {
            item.visit_tokens_mut(f)?;
        }
        ControlFlow::Continue(())
    }
}

/// A list of nodes separated by tokens (usually commas).
///
/// `separators.len()` is `elements.len() - 1` or `elements.len()` (trailing
/// separator). Slots are visited interleaved: element, separator, element...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatedList<T> {
    pub elements: Vec<T>,
    pub separators: Vec<SyntaxToken>,
}

impl<T> Default for SeparatedList<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            separators: Vec::new(),
        }
    }
}

impl<T> SeparatedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(element: T) -> Self {
        Self {
            elements: vec![element],
            separators: Vec::new(),
        }
    }

    pub fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    pub fn push_separator(&mut self, separator: SyntaxToken) {
        self.separators.push(separator);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }
}

impl<T> std::ops::Index<usize> for SeparatedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<'l, T> IntoIterator for &'l SeparatedList<T> {
    type Item = &'l T;
    type IntoIter = std::slice::Iter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Slot> Slot for SeparatedList<T> {
    fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>)) {
        for (i, element) in self.elements.iter().enumerate() {
            element.for_each_element(f);
            if let Some(separator) = self.separators.get(i) {
                f(SyntaxElement::Token(separator));
            }
        }
    }

    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let mut separators = self.separators.iter_mut();
        for element in self.elements.iter_mut() {
            element.visit_tokens_mut(f)?;
            if let Some(separator) = separators.next() {
                f(separator)?;
            }
        }
        ControlFlow::Continue(())
    }
}

// ============================================================================
// SyntaxNode
// ============================================================================

/// Common behavior of every syntax node.
pub trait SyntaxNode: std::fmt::Debug {
    fn kind(&self) -> SyntaxKind;

    /// Visit the node's direct children in slot order.
    fn for_each_child<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>));

    /// Visit every token of the subtree mutably, in document order, until
    /// `f` breaks.
    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()>;

    /// All tokens of the subtree in document order (skipped trivia excluded).
    fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        self.for_each_child(&mut |el| push_tokens(el, &mut out));
        out
    }

    fn first_token(&self) -> Option<&SyntaxToken> {
        let mut first = None;
        self.for_each_child(&mut |el| {
            if first.is_none() {
                first = first_token_of(el);
            }
        });
        first
    }

    fn last_token(&self) -> Option<&SyntaxToken> {
        self.tokens().last().copied()
    }

    fn to_full_string(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            token.write_full_to(&mut out);
        }
        out
    }

    /// The node text without the leading trivia of its first token and the
    /// trailing trivia of its last token.
    fn to_text(&self) -> String {
        let tokens = self.tokens();
        let last = tokens.len().saturating_sub(1);
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                token.leading.iter().for_each(|t| t.write_to(&mut out));
            }
            out.push_str(&token.text);
            if i < last {
                token.trailing.iter().for_each(|t| t.write_to(&mut out));
            }
        }
        out
    }

    fn full_span(&self) -> TextSpan {
        let tokens = self.tokens();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => TextSpan::from_bounds(first.position, last.full_end()),
            _ => TextSpan::default(),
        }
    }

    fn span(&self) -> TextSpan {
        let tokens = self.tokens();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => {
                TextSpan::from_bounds(first.span().start, last.span().end())
            }
            _ => TextSpan::default(),
        }
    }

    /// Every diagnostic stored on a token of this subtree, including tokens
    /// held in skipped trivia, in document order.
    fn diagnostics(&self) -> Vec<&Diagnostic> {
        let mut out = Vec::new();
        for token in self.tokens() {
            token.for_each_diagnostic(&mut |d| out.push(d));
        }
        out
    }

    fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    fn contains_diagnostics(&self) -> bool {
        self.tokens().iter().any(|t| t.contains_diagnostics())
    }

    /// Whether the node consists only of missing tokens.
    fn is_missing(&self) -> bool {
        self.tokens().iter().all(|t| t.is_missing())
    }

    /// Store a node-level diagnostic on the node's first token.
    fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        let mut diagnostic = Some(diagnostic);
        let _ = self.visit_tokens_mut(&mut |token| {
            if let Some(d) = diagnostic.take() {
                token.add_diagnostic(d);
            }
            ControlFlow::Break(())
        });
    }

    /// Apply `f` to the last token of the node.
    fn with_last_token_mut(&mut self, f: &mut dyn FnMut(&mut SyntaxToken)) {
        let count = self.tokens().len();
        if count == 0 {
            return;
        }
        let mut index = 0;
        let _ = self.visit_tokens_mut(&mut |token| {
            index += 1;
            if index == count {
                f(token);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
    }
}

impl<T: SyntaxNode> SyntaxNode for Box<T> {
    fn kind(&self) -> SyntaxKind {
        (**self).kind()
    }

    fn for_each_child<'a>(&'a self, f: &mut dyn FnMut(SyntaxElement<'a>)) {
        (**self).for_each_child(f)
    }

    fn visit_tokens_mut(
        &mut self,
        f: &mut dyn FnMut(&mut SyntaxToken) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).visit_tokens_mut(f)
    }
}

fn push_tokens<'a>(el: SyntaxElement<'a>, out: &mut Vec<&'a SyntaxToken>) {
    match el {
        SyntaxElement::Token(t) => out.push(t),
        SyntaxElement::Node(n) => {
            ensure_sufficient_stack(|| n.for_each_child(&mut |c| push_tokens(c, out)))
        }
    }
}

fn first_token_of(el: SyntaxElement<'_>) -> Option<&SyntaxToken> {
    match el {
        SyntaxElement::Token(t) => Some(t),
        SyntaxElement::Node(n) => ensure_sufficient_stack(|| n.first_token()),
    }
}

// ============================================================================
// Chains
// ============================================================================

/// A category with a cheap stand-in value.
pub(crate) trait Vacant {
    fn vacant() -> Self;
}

/// Drop the boxed child of a chain link, growing the stack first if needed.
///
/// Postfix, binary, dotted-name and type-suffix loops nest one node per link
/// with no depth limit, and each link's drop runs through here.
pub(crate) fn drop_link<T: Vacant>(link: &mut Box<T>) {
    let child = std::mem::replace(&mut **link, T::vacant());
    ensure_sufficient_stack(move || drop(child));
}

// ============================================================================
// Declaration macros
// ============================================================================

/// Declare a node struct. Fields are slots, listed in source order.
///
/// `pub struct Name: Kind { ... }` gives the node a fixed kind;
/// `pub struct Name: dyn { ... }` adds a `kind` field for nodes shared by
/// several kinds.
#[macro_export]
macro_rules! syntax_node {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : dyn {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub kind: $crate::SyntaxKind,
            $( $(#[$fmeta])* pub $field: $ty ),*
        }

        $crate::syntax_node!(@impl $name, |this| this.kind, $( $field ),*);
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $kind:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty ),*
        }

        $crate::syntax_node!(@impl $name, |_this| $crate::SyntaxKind::$kind, $( $field ),*);
    };
    (@impl $name:ident, |$this:ident| $kind:expr, $( $field:ident ),*) => {
        impl $crate::node::SyntaxNode for $name {
            fn kind(&self) -> $crate::SyntaxKind {
                let $this = self;
                $kind
            }

            fn for_each_child<'a>(
                &'a self,
                f: &mut dyn FnMut($crate::node::SyntaxElement<'a>),
            ) {
                $( $crate::node::Slot::for_each_element(&self.$field, f); )*
            }

            fn visit_tokens_mut(
                &mut self,
                f: &mut dyn FnMut(&mut $crate::SyntaxToken) -> ::std::ops::ControlFlow<()>,
            ) -> ::std::ops::ControlFlow<()> {
                $( $crate::node::Slot::visit_tokens_mut(&mut self.$field, f)?; )*
                ::std::ops::ControlFlow::Continue(())
            }
        }

        impl $crate::node::Slot for $name {
            fn for_each_element<'a>(&'a self, f: &mut dyn FnMut($crate::node::SyntaxElement<'a>)) {
                f($crate::node::SyntaxElement::Node(self));
            }

            fn visit_tokens_mut(
                &mut self,
                f: &mut dyn FnMut(&mut $crate::SyntaxToken) -> ::std::ops::ControlFlow<()>,
            ) -> ::std::ops::ControlFlow<()> {
                $crate::node::ensure_sufficient_stack(|| {
                    $crate::node::SyntaxNode::visit_tokens_mut(self, f)
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::node::SyntaxNode::to_text(self))
            }
        }
    };
}

/// Declare a category enum over node structs. The enum delegates the node
/// behavior to whichever variant it holds.
#[macro_export]
macro_rules! syntax_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant($ty) ),*
        }

        impl $crate::node::SyntaxNode for $name {
            fn kind(&self) -> $crate::SyntaxKind {
                match self {
                    $( $name::$variant(n) => $crate::node::SyntaxNode::kind(n) ),*
                }
            }

            fn for_each_child<'a>(
                &'a self,
                f: &mut dyn FnMut($crate::node::SyntaxElement<'a>),
            ) {
                match self {
                    $( $name::$variant(n) => $crate::node::SyntaxNode::for_each_child(n, f) ),*
                }
            }

            fn visit_tokens_mut(
                &mut self,
                f: &mut dyn FnMut(&mut $crate::SyntaxToken) -> ::std::ops::ControlFlow<()>,
            ) -> ::std::ops::ControlFlow<()> {
                match self {
                    $( $name::$variant(n) => $crate::node::SyntaxNode::visit_tokens_mut(n, f) ),*
                }
            }
        }

        impl $crate::node::Slot for $name {
            fn for_each_element<'a>(&'a self, f: &mut dyn FnMut($crate::node::SyntaxElement<'a>)) {
                match self {
                    $( $name::$variant(n) => $crate::node::Slot::for_each_element(n, f) ),*
                }
            }

            fn visit_tokens_mut(
                &mut self,
                f: &mut dyn FnMut(&mut $crate::SyntaxToken) -> ::std::ops::ControlFlow<()>,
            ) -> ::std::ops::ControlFlow<()> {
                $crate::node::ensure_sufficient_stack(|| {
                    $crate::node::SyntaxNode::visit_tokens_mut(self, f)
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::node::SyntaxNode::to_text(self))
            }
        }
    };
}

/// `From` conversions from node structs into a category enum.
#[macro_export]
macro_rules! impl_from_nodes {
    ($name:ident { $( $variant:ident($ty:ty) ),* $(,)? }) => {
        $(
            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    $name::$variant(node)
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::nodes::{
        ArgumentList, BinaryExpression, ExpressionSyntax, IdentifierName, InvocationExpression,
    };
    use crate::token::SyntaxTrivia;
    use rsharp_diagnostics::messages;

    fn spaced(mut token: SyntaxToken, leading: &str, trailing: &str) -> SyntaxToken {
        if !leading.is_empty() {
            token.leading.push(SyntaxTrivia::whitespace(leading));
        }
        if !trailing.is_empty() {
            token.trailing.push(SyntaxTrivia::whitespace(trailing));
        }
        token
    }

    fn layout(node: &mut dyn SyntaxNode) {
        let mut pos = 0;
        let _ = node.visit_tokens_mut(&mut |t| {
            t.position = pos;
            pos += t.full_width();
            ControlFlow::Continue(())
        });
    }

    fn name(identifier: SyntaxToken) -> ExpressionSyntax {
        IdentifierName { identifier }.into()
    }

    /// ` a + b `
    fn add() -> BinaryExpression {
        let mut node = BinaryExpression {
            kind: SyntaxKind::AddExpression,
            left: Box::new(name(spaced(factory::identifier("a"), " ", " "))),
            operator_token: spaced(factory::token(SyntaxKind::PlusToken), "", " "),
            right: Box::new(name(spaced(factory::identifier("b"), "", " "))),
        };
        layout(&mut node);
        node
    }

    #[test]
    fn test_full_string_and_display() {
        let node = add();
        assert_eq!(node.to_full_string(), " a + b ");
        assert_eq!(node.to_string(), "a + b");
        assert_eq!(node.kind(), SyntaxKind::AddExpression);
    }

    #[test]
    fn test_spans() {
        let node = add();
        assert_eq!(node.full_span(), TextSpan::new(0, 7));
        assert_eq!(node.span(), TextSpan::new(1, 5));
    }

    #[test]
    fn test_first_and_last_token() {
        let node = add();
        assert_eq!(node.first_token().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(node.last_token().map(|t| t.text.as_str()), Some("b"));
    }

    #[test]
    fn test_add_diagnostic_lands_on_first_token() {
        let mut node = add();
        let span = node.span();
        node.add_diagnostic(Diagnostic::new(&messages::INVALID_EXPR_TERM, span, &["a"]));
        assert_eq!(node.errors().len(), 1);
        assert_eq!(node.first_token().map(|t| t.diagnostics.len()), Some(1));
    }

    #[test]
    fn test_with_last_token_mut() {
        let mut node = add();
        node.with_last_token_mut(&mut |t| t.trailing.clear());
        assert_eq!(node.to_full_string(), " a + b");
    }

    #[test]
    fn test_long_chain_traversal_and_drop() {
        let links = 100_000;
        let mut chain = name(factory::identifier("a"));
        for _ in 0..links {
            chain = BinaryExpression {
                kind: SyntaxKind::AddExpression,
                left: Box::new(chain),
                operator_token: factory::token(SyntaxKind::PlusToken),
                right: Box::new(name(factory::identifier("b"))),
            }
            .into();
        }
        assert_eq!(chain.tokens().len(), 2 * links + 1);
        assert_eq!(chain.first_token().map(|t| t.text.as_str()), Some("a"));
        assert!(chain.errors().is_empty());

        let mut visited = 0;
        let _ = SyntaxNode::visit_tokens_mut(&mut chain, &mut |_| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(visited, 2 * links + 1);
        drop(chain);
    }

    #[test]
    fn test_missing_node() {
        let mut list = ArgumentList {
            open_paren_token: SyntaxToken::missing(SyntaxKind::OpenParenToken, 0),
            arguments: SeparatedList::new(),
            close_paren_token: SyntaxToken::missing(SyntaxKind::CloseParenToken, 0),
        };
        assert!(list.is_missing());
        list.close_paren_token = factory::token(SyntaxKind::CloseParenToken);
        assert!(!list.is_missing());
    }

    #[test]
    fn test_separated_list_visits_interleaved() {
        let mut arguments = SeparatedList::new();
        arguments.push(crate::nodes::Argument {
            name_colon: None,
            ref_kind_keyword: None,
            expression: factory::identifier_name("x").into(),
        });
        arguments.push_separator(factory::token(SyntaxKind::CommaToken));
        arguments.push(crate::nodes::Argument {
            name_colon: None,
            ref_kind_keyword: None,
            expression: factory::identifier_name("y").into(),
        });
        let mut node = InvocationExpression {
            expression: Box::new(ExpressionSyntax::from(factory::identifier_name("f"))),
            argument_list: ArgumentList {
                open_paren_token: factory::token(SyntaxKind::OpenParenToken),
                arguments,
                close_paren_token: factory::token(SyntaxKind::CloseParenToken),
            },
        };
        layout(&mut node);
        assert_eq!(node.to_full_string(), "f(x,y)");
        assert_eq!(node.argument_list.arguments.len(), 2);
        assert_eq!(node.span(), TextSpan::new(0, 6));

        let mut children = Vec::new();
        node.argument_list.for_each_child(&mut |el| {
            children.push(match el.as_token() {
                Some(token) => token.text.clone(),
                None => el.as_node().map(|n| n.kind()).map_or(String::new(), |k| format!("{k:?}")),
            })
        });
        assert_eq!(children, vec!["(", "Argument", ",", "Argument", ")"]);
    }
}
