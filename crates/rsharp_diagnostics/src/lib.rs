//! rsharp_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! This module defines every diagnostic the scanner and parser can report,
//! using the compiler's `CS####` numbering. Diagnostics are plain data: the
//! parser stores them on the token that detected the problem and never
//! returns them as Rust errors.

use rsharp_core::text::TextSpan;
use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hidden => write!(f, "hidden"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The numeric part of the diagnostic id (e.g., 1002 for `CS1002`).
    pub code: u32,
    /// The severity of this diagnostic.
    pub severity: Severity,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// The `CS####` identifier of this message.
    pub fn id(&self) -> String {
        format!("CS{:04}", self.code)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: u32,
    /// The severity.
    pub severity: Severity,
    /// The source text span the diagnostic refers to.
    pub span: TextSpan,
    /// The message arguments, in placeholder order.
    pub args: Vec<String>,
    /// The formatted message text.
    pub message_text: String,
}

impl Diagnostic {
    /// Create a new diagnostic at `span`.
    pub fn new(message: &DiagnosticMessage, span: TextSpan, args: &[&str]) -> Self {
        Self {
            code: message.code,
            severity: message.severity,
            span,
            args: args.iter().map(|a| a.to_string()).collect(),
            message_text: format_message(message.message, args),
        }
    }

    /// Whether this diagnostic was created from `message`.
    pub fn is(&self, message: &DiagnosticMessage) -> bool {
        self.code == message.code
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The `CS####` identifier of this diagnostic.
    pub fn id(&self) -> String {
        format!("CS{:04}", self.code)
    }

    /// Return a copy of this diagnostic moved by `delta` bytes.
    pub fn shifted(&self, delta: i64) -> Self {
        let start = (self.span.start as i64 + delta).max(0) as u32;
        Self {
            span: TextSpan::new(start, self.span.length),
            ..self.clone()
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} {}: {}",
            self.span,
            self.severity,
            self.id(),
            self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Create and add a diagnostic in one step.
    pub fn report(&mut self, message: &DiagnosticMessage, span: TextSpan, args: &[&str]) {
        self.diagnostics.push(Diagnostic::new(message, span, args));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by position. The sort is stable, so diagnostics at
    /// the same position keep the order they were reported in.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| (d.span.start, d.span.end()));
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, severity: Severity::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, severity: Severity::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Lexical errors
    // ========================================================================
    pub const ILLEGAL_ESCAPE: DiagnosticMessage = diag!(1009, Error, "Unrecognized escape sequence");
    pub const NEWLINE_IN_CONST: DiagnosticMessage = diag!(1010, Error, "Newline in constant");
    pub const EMPTY_CHAR_CONST: DiagnosticMessage = diag!(1011, Error, "Empty character literal");
    pub const TOO_MANY_CHARS_IN_CONST: DiagnosticMessage = diag!(1012, Error, "Too many characters in character literal");
    pub const INVALID_NUMBER: DiagnosticMessage = diag!(1013, Error, "Invalid number");
    pub const OPEN_ENDED_COMMENT: DiagnosticMessage = diag!(1035, Error, "End-of-file found, '*/' expected");
    pub const UNTERMINATED_STRING_LIT: DiagnosticMessage = diag!(1039, Error, "Unterminated string literal");
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1056, Error, "Unexpected character '{0}'");
    pub const EXPECTED_VERBATIM_LITERAL: DiagnosticMessage = diag!(1646, Error, "Keyword, identifier, or string expected after verbatim specifier: @");
    pub const UNCLOSED_EXPRESSION_HOLE: DiagnosticMessage = diag!(8076, Error, "Missing close delimiter '}' for interpolated expression started with '{'.");
    pub const UNESCAPED_CURLY: DiagnosticMessage = diag!(8087, Error, "A '{0}' character may only be escaped by doubling '{0}{0}' in an interpolated string.");
    pub const EMPTY_FORMAT_SPECIFIER: DiagnosticMessage = diag!(8089, Error, "Empty format specifier.");

    // ========================================================================
    // Preprocessor directives
    // ========================================================================
    pub const PP_DIRECTIVE_EXPECTED: DiagnosticMessage = diag!(1024, Error, "Preprocessor directive expected");
    pub const END_IF_DIRECTIVE_EXPECTED: DiagnosticMessage = diag!(1027, Error, "#endif directive expected");
    pub const UNEXPECTED_DIRECTIVE: DiagnosticMessage = diag!(1028, Error, "Unexpected preprocessor directive");
    pub const ERROR_DIRECTIVE: DiagnosticMessage = diag!(1029, Error, "#error: '{0}'");
    pub const WARNING_DIRECTIVE: DiagnosticMessage = diag!(1030, Warning, "#warning: '{0}'");
    pub const PP_DEF_FOLLOWS_TOKEN: DiagnosticMessage = diag!(1032, Error, "Cannot define/undefine preprocessor symbols after first token in file");
    pub const END_REGION_DIRECTIVE_EXPECTED: DiagnosticMessage = diag!(1038, Error, "#endregion directive expected");
    pub const BAD_DIRECTIVE_PLACEMENT: DiagnosticMessage = diag!(1040, Error, "Preprocessor directives must appear as the first non-whitespace character on a line");
    pub const INVALID_PREPROC_EXPR: DiagnosticMessage = diag!(1517, Error, "Invalid preprocessor expression");

    // ========================================================================
    // Missing tokens
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1001, Error, "Identifier expected");
    pub const SEMICOLON_EXPECTED: DiagnosticMessage = diag!(1002, Error, "; expected");
    pub const SYNTAX_ERROR: DiagnosticMessage = diag!(1003, Error, "Syntax error, '{0}' expected");
    pub const CLOSE_PAREN_EXPECTED: DiagnosticMessage = diag!(1026, Error, ") expected");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1031, Error, "Type expected");
    pub const IDENTIFIER_EXPECTED_KW: DiagnosticMessage = diag!(1041, Error, "Identifier expected; '{1}' is a keyword");
    pub const LBRACE_OR_SEMICOLON_EXPECTED: DiagnosticMessage = diag!(1043, Error, "{ or ; expected");
    pub const RBRACE_EXPECTED: DiagnosticMessage = diag!(1513, Error, "} expected");
    pub const LBRACE_EXPECTED: DiagnosticMessage = diag!(1514, Error, "{ expected");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1733, Error, "Expected expression");

    // ========================================================================
    // Contextual misuse
    // ========================================================================
    pub const EXPLICIT_EVENT_FIELD_IMPL: DiagnosticMessage = diag!(71, Error, "An explicit interface implementation of an event must use event accessor syntax");
    pub const NAMESPACE_UNEXPECTED: DiagnosticMessage = diag!(116, Error, "A namespace cannot directly contain members such as fields, methods or statements");
    pub const CONST_VALUE_REQUIRED: DiagnosticMessage = diag!(145, Error, "A const field requires a value to be provided");
    pub const ARRAY_SIZE_IN_DECLARATION: DiagnosticMessage = diag!(270, Error, "Array size cannot be specified in a variable declaration (try initializing with a 'new' expression)");
    pub const EXTERN_AFTER_ELEMENTS: DiagnosticMessage = diag!(439, Error, "An extern alias declaration must precede all other elements defined in the namespace");
    pub const GET_OR_SET_EXPECTED: DiagnosticMessage = diag!(1014, Error, "A get or set accessor expected");
    pub const THIS_OR_BASE_EXPECTED: DiagnosticMessage = diag!(1018, Error, "Keyword 'this' or 'base' expected");
    pub const EOF_EXPECTED: DiagnosticMessage = diag!(1022, Error, "Type or namespace definition, or end-of-file expected");
    pub const OVL_OPERATOR_EXPECTED: DiagnosticMessage = diag!(1037, Error, "Overloadable operator expected");
    pub const ADD_OR_REMOVE_EXPECTED: DiagnosticMessage = diag!(1055, Error, "An add or remove accessor expected");
    pub const INVALID_MEMBER_DECL: DiagnosticMessage = diag!(1519, Error, "Invalid token '{0}' in class, record, struct, or interface member declaration");
    pub const MEMBER_NEEDS_TYPE: DiagnosticMessage = diag!(1520, Error, "Method must have a return type");
    pub const INVALID_EXPR_TERM: DiagnosticMessage = diag!(1525, Error, "Invalid expression term '{0}'");
    pub const USING_AFTER_ELEMENTS: DiagnosticMessage = diag!(1529, Error, "A using clause must precede all other elements defined in the namespace except extern alias declarations");
    pub const UNEXPECTED_SEMICOLON: DiagnosticMessage = diag!(1597, Error, "Semicolon after method or accessor block is not valid");
    pub const FIXED_DIMS_REQUIRED: DiagnosticMessage = diag!(1641, Error, "A fixed size buffer field must have the array size specifier after the field name");
    pub const GLOBAL_ATTRIBUTES_NOT_FIRST: DiagnosticMessage = diag!(1730, Error, "Assembly and module attributes must precede all other elements defined in a file except using clauses and extern alias declarations");
    pub const ILLEGAL_VARIANCE_SYNTAX: DiagnosticMessage = diag!(1960, Error, "Invalid variance modifier. Only interface and delegate type parameters can be specified as variant.");
    pub const UNEXPECTED_ALIASED_NAME: DiagnosticMessage = diag!(7000, Error, "Unexpected use of an aliased name");
    pub const ATTRIBUTES_NOT_ALLOWED: DiagnosticMessage = diag!(7014, Error, "Attributes are not valid in this context.");
    pub const INSUFFICIENT_STACK: DiagnosticMessage = diag!(8078, Error, "An expression is too long or complex to compile");
    pub const TUPLE_TOO_FEW_ELEMENTS: DiagnosticMessage = diag!(8124, Error, "Tuple must contain at least two elements.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(8635, Error, "Unexpected character sequence '{0}'");
    pub const MULTIPLE_FILE_SCOPED_NAMESPACE: DiagnosticMessage = diag!(8954, Error, "Source file can only contain one file-scoped namespace declaration.");
    pub const FILE_SCOPED_AND_NORMAL_NAMESPACE: DiagnosticMessage = diag!(8955, Error, "Source file can not contain both file-scoped and normal namespace declarations.");
    pub const FILE_SCOPED_NAMESPACE_NOT_BEFORE_ALL_MEMBERS: DiagnosticMessage = diag!(8956, Error, "File-scoped namespace must precede all other members in a file.");

    // ========================================================================
    // Feature availability
    // ========================================================================
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION1: DiagnosticMessage = diag!(8022, Error, "Feature '{0}' is not available in C# 1. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION2: DiagnosticMessage = diag!(8023, Error, "Feature '{0}' is not available in C# 2. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION3: DiagnosticMessage = diag!(8024, Error, "Feature '{0}' is not available in C# 3. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION4: DiagnosticMessage = diag!(8025, Error, "Feature '{0}' is not available in C# 4. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION5: DiagnosticMessage = diag!(8026, Error, "Feature '{0}' is not available in C# 5. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION6: DiagnosticMessage = diag!(8059, Error, "Feature '{0}' is not available in C# 6. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION7: DiagnosticMessage = diag!(8107, Error, "Feature '{0}' is not available in C# 7.0. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION7_1: DiagnosticMessage = diag!(8302, Error, "Feature '{0}' is not available in C# 7.1. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION7_2: DiagnosticMessage = diag!(8320, Error, "Feature '{0}' is not available in C# 7.2. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION7_3: DiagnosticMessage = diag!(8370, Error, "Feature '{0}' is not available in C# 7.3. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION8: DiagnosticMessage = diag!(8400, Error, "Feature '{0}' is not available in C# 8.0. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION9: DiagnosticMessage = diag!(8773, Error, "Feature '{0}' is not available in C# 9.0. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION10: DiagnosticMessage = diag!(8936, Error, "Feature '{0}' is not available in C# 10.0. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION11: DiagnosticMessage = diag!(9058, Error, "Feature '{0}' is not available in C# 11.0. Please use language version {1} or greater.");
    pub const FEATURE_NOT_AVAILABLE_IN_VERSION12: DiagnosticMessage = diag!(9202, Error, "Feature '{0}' is not available in C# 12.0. Please use language version {1} or greater.");
    pub const FEATURE_IN_PREVIEW: DiagnosticMessage = diag!(8652, Error, "The feature '{0}' is currently in Preview and *unsupported*. To use Preview features, use the 'preview' language version.");
    pub const PARAMETER_NULL_CHECKING_NOT_SUPPORTED: DiagnosticMessage = diag!(8989, Error, "The 'parameter null-checking' feature is not supported.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Syntax error, '{0}' expected", &[","]);
        assert_eq!(msg, "Syntax error, ',' expected");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("; expected", &[]);
        assert_eq!(msg, "; expected");
    }

    #[test]
    fn test_format_message_repeated_placeholder() {
        let msg = format_message(messages::UNESCAPED_CURLY.message, &["}"]);
        assert_eq!(
            msg,
            "A '}' character may only be escaped by doubling '}}' in an interpolated string."
        );
    }

    #[test]
    fn test_format_message_second_argument_only() {
        let msg = format_message(messages::IDENTIFIER_EXPECTED_KW.message, &["", "static"]);
        assert_eq!(msg, "Identifier expected; 'static' is a keyword");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(&messages::INVALID_EXPR_TERM, TextSpan::new(10, 5), &["class"]);
        let display = format!("{}", diag);
        assert_eq!(display, "10..15: error CS1525: Invalid expression term 'class'");
    }

    #[test]
    fn test_message_ids_are_zero_padded() {
        assert_eq!(messages::NAMESPACE_UNEXPECTED.id(), "CS0116");
        assert_eq!(messages::EXPLICIT_EVENT_FIELD_IMPL.id(), "CS0071");
        assert_eq!(messages::SEMICOLON_EXPECTED.id(), "CS1002");
    }

    #[test]
    fn test_diagnostic_is_and_severity() {
        let diag = Diagnostic::new(&messages::WARNING_DIRECTIVE, TextSpan::empty(0), &["careful"]);
        assert!(diag.is(&messages::WARNING_DIRECTIVE));
        assert!(!diag.is_error());
        assert_eq!(diag.args, vec!["careful".to_string()]);
        assert_eq!(diag.message_text, "#warning: 'careful'");
    }

    #[test]
    fn test_diagnostic_bag() {
        let mut bag = DiagnosticBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);

        bag.report(&messages::SEMICOLON_EXPECTED, TextSpan::empty(3), &[]);
        bag.report(&messages::WARNING_DIRECTIVE, TextSpan::empty(0), &["w"]);
        assert!(bag.has_errors());
        assert_eq!(bag.error_count(), 1);
        assert_eq!(bag.len(), 2);

        bag.truncate(1);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_diagnostic_bag_sort_is_stable() {
        let mut bag = DiagnosticBag::new();
        bag.report(&messages::RBRACE_EXPECTED, TextSpan::empty(9), &[]);
        bag.report(&messages::IDENTIFIER_EXPECTED, TextSpan::empty(4), &[]);
        bag.report(&messages::SEMICOLON_EXPECTED, TextSpan::empty(4), &[]);
        bag.sort();
        let codes: Vec<u32> = bag.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![1001, 1002, 1513]);
    }

    #[test]
    fn test_shifted_moves_span() {
        let diag = Diagnostic::new(&messages::IDENTIFIER_EXPECTED, TextSpan::new(4, 2), &[]);
        assert_eq!(diag.shifted(3).span, TextSpan::new(7, 2));
        assert_eq!(diag.shifted(-10).span, TextSpan::new(0, 2));
    }
}
