//! Interpolated strings. The scanner has already split the string into its
//! start token, text tokens, hole tokens and end token.

use super::Parser;
use rsharp_ast::*;
use rsharp_diagnostics::messages;
use rsharp_options::Feature;

impl Parser {
    pub(crate) fn parse_interpolated_string_expression(&mut self) -> InterpolatedStringExpression {
        let mut string_start_token = self.eat_token();
        self.check_feature(&mut string_start_token, Feature::InterpolatedStrings);

        let mut contents: Vec<InterpolatedStringContent> = Vec::new();
        loop {
            match self.current_kind() {
                SyntaxKind::InterpolatedStringTextToken => contents.push(
                    InterpolatedStringText {
                        text_token: self.eat_token(),
                    }
                    .into(),
                ),
                SyntaxKind::OpenBraceToken => contents.push(self.parse_interpolation().into()),
                _ => break,
            }
        }

        // The scanner reports an unterminated string on its own end token, or
        // on the end-of-file token when a hole runs to the end of the text.
        let string_end_token = match self.current_kind() {
            SyntaxKind::InterpolatedStringEndToken => self.eat_token(),
            SyntaxKind::EndOfFileToken => self.missing_silent(SyntaxKind::InterpolatedStringEndToken),
            _ => {
                let diagnostic = self.diagnostic_here(&messages::UNTERMINATED_STRING_LIT, &[]);
                self.missing_with(SyntaxKind::InterpolatedStringEndToken, diagnostic)
            }
        };

        InterpolatedStringExpression {
            string_start_token,
            contents,
            string_end_token,
        }
    }

    fn parse_interpolation(&mut self) -> Interpolation {
        let open_brace_token = self.eat_token();

        let expression: ExpressionSyntax = if matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken | SyntaxKind::ColonToken | SyntaxKind::CommaToken
        ) {
            let diagnostic = self.diagnostic_here(&messages::EXPRESSION_EXPECTED, &[]);
            IdentifierName {
                identifier: self.missing_with(SyntaxKind::IdentifierToken, diagnostic),
            }
            .into()
        } else {
            self.parse_expression()
        };

        let alignment_clause = match self.eat_optional(SyntaxKind::CommaToken) {
            Some(comma_token) => Some(InterpolationAlignmentClause {
                comma_token,
                value: Box::new(self.parse_expression()),
            }),
            None => None,
        };

        let format_clause = match self.eat_optional(SyntaxKind::ColonToken) {
            Some(colon_token) => {
                let format_string_token =
                    match self.eat_optional(SyntaxKind::InterpolatedStringTextToken) {
                        Some(token) => token,
                        None => self.missing_silent(SyntaxKind::InterpolatedStringTextToken),
                    };
                Some(InterpolationFormatClause {
                    colon_token,
                    format_string_token,
                })
            }
            None => None,
        };

        // A hole whose format text runs into the closing quote hands the
        // rest back to the string, so string tokens also end the hole.
        let mut first = true;
        while !matches!(
            self.current_kind(),
            SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
                | SyntaxKind::InterpolatedStringTextToken
                | SyntaxKind::InterpolatedStringEndToken
        ) {
            if first {
                self.skip_token_with(&messages::UNEXPECTED_TOKEN);
                first = false;
            } else {
                self.skip_token();
            }
        }

        let close_brace_token = match self.eat_optional(SyntaxKind::CloseBraceToken) {
            Some(token) => token,
            None => {
                let diagnostic = self.diagnostic_here(&messages::UNCLOSED_EXPRESSION_HOLE, &[]);
                self.missing_with(SyntaxKind::CloseBraceToken, diagnostic)
            }
        };

        Interpolation {
            open_brace_token,
            expression: Box::new(expression),
            alignment_clause,
            format_clause,
            close_brace_token,
        }
    }
}
