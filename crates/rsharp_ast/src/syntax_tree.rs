//! Parse results: whole-file trees and fragment results.

use crate::node::{Slot, SyntaxElement, SyntaxNode};
use crate::nodes::CompilationUnit;
use crate::token::SyntaxToken;
use rsharp_core::text::LineMap;
use rsharp_diagnostics::{Diagnostic, Severity};
use rsharp_options::ParseOptions;

/// The result of parsing a whole file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: CompilationUnit,
    options: ParseOptions,
    text: String,
}

impl SyntaxTree {
    pub fn new(root: CompilationUnit, options: ParseOptions, text: impl Into<String>) -> Self {
        Self {
            root,
            options,
            text: text.into(),
        }
    }

    pub fn root(&self) -> &CompilationUnit {
        &self.root
    }

    pub fn into_root(self) -> CompilationUnit {
        self.root
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_map(&self) -> LineMap {
        LineMap::new(&self.text)
    }

    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.root.diagnostics()
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.root.errors()
    }

    /// The text reproduced from the tree, equal to [`SyntaxTree::text`].
    pub fn to_full_string(&self) -> String {
        self.root.to_full_string()
    }
}

/// The result of a fragment parse. Input left after the fragment is held as
/// skipped trivia on `eof`, so `node` followed by `eof` reproduces the text.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub node: T,
    pub eof: SyntaxToken,
}

impl<T: Slot> Parsed<T> {
    fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        self.node.for_each_element(&mut |el| collect_tokens(el, &mut out));
        out.push(&self.eof);
        out
    }

    /// Diagnostics of the fragment and of any trailing input, in document order.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        let mut out = Vec::new();
        for token in self.tokens() {
            token.for_each_diagnostic(&mut |d| out.push(d));
        }
        out
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    pub fn to_full_string(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            token.write_full_to(&mut out);
        }
        out
    }
}

fn collect_tokens<'a>(el: SyntaxElement<'a>, out: &mut Vec<&'a SyntaxToken>) {
    match el {
        SyntaxElement::Token(t) => out.push(t),
        SyntaxElement::Node(n) => out.extend(n.tokens()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::nodes::NameSyntax;
    use crate::SyntaxKind;
    use rsharp_diagnostics::messages;

    #[test]
    fn test_parsed_round_trip_includes_eof() {
        let mut eof = SyntaxToken::missing(SyntaxKind::EndOfFileToken, 0);
        let mut extra = factory::identifier("b");
        extra.add_diagnostic(Diagnostic::new(&messages::EOF_EXPECTED, extra.span(), &[]));
        eof.prepend_skipped(vec![extra]);
        eof.flags = crate::TokenFlags::NONE;

        let parsed = Parsed {
            node: NameSyntax::from(factory::identifier_name("a")),
            eof,
        };
        assert_eq!(parsed.to_full_string(), "ab");
        assert_eq!(parsed.errors().len(), 1);
    }

    #[test]
    fn test_parsed_option_node() {
        let parsed: Parsed<Option<NameSyntax>> = Parsed {
            node: None,
            eof: SyntaxToken::new(SyntaxKind::EndOfFileToken, 0, ""),
        };
        assert!(parsed.diagnostics().is_empty());
        assert_eq!(parsed.to_full_string(), "");
    }
}
