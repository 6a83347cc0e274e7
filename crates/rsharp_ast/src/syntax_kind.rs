//! SyntaxKind enum - all token, trivia and node kinds in the C# syntax tree.
//!
//! Kinds are grouped in contiguous ranges (punctuation, reserved keywords,
//! contextual keywords, literal tokens, trivia, nodes) so range predicates
//! are a pair of integer comparisons.

/// The kind of a syntax token, trivia or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    None = 0,
    EndOfFileToken,
    BadToken,

    // ========================================================================
    // Punctuation
    // ========================================================================
    TildeToken,
    ExclamationToken,
    DollarToken,
    PercentToken,
    CaretToken,
    AmpersandToken,
    AsteriskToken,
    OpenParenToken,
    CloseParenToken,
    MinusToken,
    PlusToken,
    EqualsToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    BarToken,
    ColonToken,
    SemicolonToken,
    DoubleQuoteToken,
    LessThanToken,
    CommaToken,
    GreaterThanToken,
    DotToken,
    QuestionToken,
    HashToken,
    SlashToken,
    DotDotToken,
    BarBarToken,
    AmpersandAmpersandToken,
    MinusMinusToken,
    PlusPlusToken,
    ColonColonToken,
    QuestionQuestionToken,
    MinusGreaterThanToken,
    ExclamationEqualsToken,
    EqualsEqualsToken,
    EqualsGreaterThanToken,
    LessThanEqualsToken,
    LessThanLessThanToken,
    LessThanLessThanEqualsToken,
    GreaterThanEqualsToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    SlashEqualsToken,
    AsteriskEqualsToken,
    BarEqualsToken,
    AmpersandEqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    CaretEqualsToken,
    PercentEqualsToken,
    QuestionQuestionEqualsToken,

    // ========================================================================
    // Reserved keywords
    // ========================================================================
    BoolKeyword,
    ByteKeyword,
    SByteKeyword,
    ShortKeyword,
    UShortKeyword,
    IntKeyword,
    UIntKeyword,
    LongKeyword,
    ULongKeyword,
    DoubleKeyword,
    FloatKeyword,
    DecimalKeyword,
    StringKeyword,
    CharKeyword,
    VoidKeyword,
    ObjectKeyword,
    TypeOfKeyword,
    SizeOfKeyword,
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    ForKeyword,
    ForEachKeyword,
    DoKeyword,
    SwitchKeyword,
    CaseKeyword,
    DefaultKeyword,
    TryKeyword,
    CatchKeyword,
    FinallyKeyword,
    LockKeyword,
    GotoKeyword,
    BreakKeyword,
    ContinueKeyword,
    ReturnKeyword,
    ThrowKeyword,
    PublicKeyword,
    PrivateKeyword,
    InternalKeyword,
    ProtectedKeyword,
    StaticKeyword,
    ReadOnlyKeyword,
    SealedKeyword,
    ConstKeyword,
    FixedKeyword,
    StackAllocKeyword,
    VolatileKeyword,
    NewKeyword,
    OverrideKeyword,
    AbstractKeyword,
    VirtualKeyword,
    EventKeyword,
    ExternKeyword,
    RefKeyword,
    OutKeyword,
    InKeyword,
    IsKeyword,
    AsKeyword,
    ParamsKeyword,
    ArgListKeyword,
    MakeRefKeyword,
    RefTypeKeyword,
    RefValueKeyword,
    ThisKeyword,
    BaseKeyword,
    NamespaceKeyword,
    UsingKeyword,
    ClassKeyword,
    StructKeyword,
    InterfaceKeyword,
    EnumKeyword,
    DelegateKeyword,
    CheckedKeyword,
    UncheckedKeyword,
    UnsafeKeyword,
    OperatorKeyword,
    ExplicitKeyword,
    ImplicitKeyword,

    // ========================================================================
    // Contextual keywords
    // ========================================================================
    YieldKeyword,
    PartialKeyword,
    AliasKeyword,
    GlobalKeyword,
    AssemblyKeyword,
    ModuleKeyword,
    GetKeyword,
    SetKeyword,
    InitKeyword,
    AddKeyword,
    RemoveKeyword,
    WhereKeyword,
    NameOfKeyword,
    AsyncKeyword,
    AwaitKeyword,
    WhenKeyword,
    RecordKeyword,
    UnmanagedKeyword,
    NotNullKeyword,
    VarKeyword,
    RequiredKeyword,
    ScopedKeyword,
    FileKeyword,

    // ========================================================================
    // Literal and identifier tokens
    // ========================================================================
    IdentifierToken,
    NumericLiteralToken,
    CharacterLiteralToken,
    StringLiteralToken,
    InterpolatedStringStartToken,
    InterpolatedVerbatimStringStartToken,
    InterpolatedStringTextToken,
    InterpolatedStringEndToken,
    OmittedTypeArgumentToken,
    OmittedArraySizeExpressionToken,

    // ========================================================================
    // Trivia
    // ========================================================================
    EndOfLineTrivia,
    WhitespaceTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    SingleLineDocumentationCommentTrivia,
    MultiLineDocumentationCommentTrivia,
    DisabledTextTrivia,
    SkippedTokensTrivia,
    IfDirectiveTrivia,
    ElifDirectiveTrivia,
    ElseDirectiveTrivia,
    EndIfDirectiveTrivia,
    RegionDirectiveTrivia,
    EndRegionDirectiveTrivia,
    DefineDirectiveTrivia,
    UndefDirectiveTrivia,
    ErrorDirectiveTrivia,
    WarningDirectiveTrivia,
    LineDirectiveTrivia,
    PragmaWarningDirectiveTrivia,
    PragmaChecksumDirectiveTrivia,
    NullableDirectiveTrivia,
    BadDirectiveTrivia,

    // ========================================================================
    // Names and types
    // ========================================================================
    IdentifierName,
    QualifiedName,
    AliasQualifiedName,
    GenericName,
    TypeArgumentList,
    PredefinedType,
    ArrayType,
    ArrayRankSpecifier,
    PointerType,
    NullableType,
    RefType,
    TupleType,
    TupleElement,
    OmittedTypeArgument,

    // ========================================================================
    // Expressions
    // ========================================================================
    ParenthesizedExpression,
    TupleExpression,
    ConditionalExpression,
    InvocationExpression,
    ElementAccessExpression,
    ArgumentList,
    BracketedArgumentList,
    Argument,
    NameColon,
    CastExpression,
    SimpleLambdaExpression,
    ParenthesizedLambdaExpression,
    ObjectInitializerExpression,
    CollectionInitializerExpression,
    ArrayInitializerExpression,
    ObjectCreationExpression,
    ImplicitObjectCreationExpression,
    ArrayCreationExpression,
    ImplicitArrayCreationExpression,
    OmittedArraySizeExpression,
    InterpolatedStringExpression,
    InterpolatedStringText,
    Interpolation,
    InterpolationAlignmentClause,
    InterpolationFormatClause,
    ThrowExpression,
    RefExpression,
    SimpleMemberAccessExpression,
    PointerMemberAccessExpression,
    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    ModuloExpression,
    LeftShiftExpression,
    RightShiftExpression,
    UnsignedRightShiftExpression,
    LogicalOrExpression,
    LogicalAndExpression,
    BitwiseOrExpression,
    BitwiseAndExpression,
    ExclusiveOrExpression,
    EqualsExpression,
    NotEqualsExpression,
    LessThanExpression,
    LessThanOrEqualExpression,
    GreaterThanExpression,
    GreaterThanOrEqualExpression,
    IsExpression,
    AsExpression,
    CoalesceExpression,
    SimpleAssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    MultiplyAssignmentExpression,
    DivideAssignmentExpression,
    ModuloAssignmentExpression,
    AndAssignmentExpression,
    ExclusiveOrAssignmentExpression,
    OrAssignmentExpression,
    LeftShiftAssignmentExpression,
    RightShiftAssignmentExpression,
    UnsignedRightShiftAssignmentExpression,
    CoalesceAssignmentExpression,
    UnaryPlusExpression,
    UnaryMinusExpression,
    BitwiseNotExpression,
    LogicalNotExpression,
    PreIncrementExpression,
    PreDecrementExpression,
    PointerIndirectionExpression,
    AddressOfExpression,
    PostIncrementExpression,
    PostDecrementExpression,
    SuppressNullableWarningExpression,
    ThisExpression,
    BaseExpression,
    ArgListExpression,
    NumericLiteralExpression,
    StringLiteralExpression,
    CharacterLiteralExpression,
    TrueLiteralExpression,
    FalseLiteralExpression,
    NullLiteralExpression,
    DefaultLiteralExpression,
    TypeOfExpression,
    SizeOfExpression,
    CheckedExpression,
    UncheckedExpression,
    DefaultExpression,

    // ========================================================================
    // Statements
    // ========================================================================
    Block,
    LocalDeclarationStatement,
    VariableDeclaration,
    VariableDeclarator,
    EqualsValueClause,
    ExpressionStatement,
    EmptyStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    YieldReturnStatement,
    YieldBreakStatement,
    ThrowStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    IfStatement,
    ElseClause,
    TryStatement,
    CatchClause,
    CatchDeclaration,
    CatchFilterClause,
    FinallyClause,

    // ========================================================================
    // Declarations
    // ========================================================================
    CompilationUnit,
    GlobalStatement,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    UsingDirective,
    ExternAliasDirective,
    NameEquals,
    AttributeList,
    AttributeTargetSpecifier,
    Attribute,
    AttributeArgumentList,
    AttributeArgument,
    TypeParameterList,
    TypeParameter,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    DelegateDeclaration,
    BaseList,
    SimpleBaseType,
    TypeParameterConstraintClause,
    ConstructorConstraint,
    ClassConstraint,
    StructConstraint,
    TypeConstraint,
    DefaultConstraint,
    ExplicitInterfaceSpecifier,
    EnumMemberDeclaration,
    FieldDeclaration,
    EventFieldDeclaration,
    MethodDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    ConstructorDeclaration,
    BaseConstructorInitializer,
    ThisConstructorInitializer,
    DestructorDeclaration,
    PropertyDeclaration,
    ArrowExpressionClause,
    EventDeclaration,
    IndexerDeclaration,
    AccessorList,
    GetAccessorDeclaration,
    SetAccessorDeclaration,
    InitAccessorDeclaration,
    AddAccessorDeclaration,
    RemoveAccessorDeclaration,
    UnknownAccessorDeclaration,
    ParameterList,
    BracketedParameterList,
    Parameter,
    IncompleteMember,
}

// Range markers. These can't be enum variants because Rust doesn't allow
// duplicate discriminants.
impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::TildeToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_RESERVED_KEYWORD: SyntaxKind = SyntaxKind::BoolKeyword;
    pub const LAST_RESERVED_KEYWORD: SyntaxKind = SyntaxKind::ImplicitKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::FileKeyword;
    pub const FIRST_TRIVIA: SyntaxKind = SyntaxKind::EndOfLineTrivia;
    pub const LAST_TRIVIA: SyntaxKind = SyntaxKind::BadDirectiveTrivia;
    pub const FIRST_DIRECTIVE: SyntaxKind = SyntaxKind::IfDirectiveTrivia;
    pub const LAST_DIRECTIVE: SyntaxKind = SyntaxKind::BadDirectiveTrivia;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::IdentifierName;
}

impl SyntaxKind {
    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind represents a punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// Whether this kind is a reserved or contextual keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.is_reserved_keyword() || self.is_contextual_keyword()
    }

    #[inline]
    pub fn is_reserved_keyword(self) -> bool {
        self.in_range(Self::FIRST_RESERVED_KEYWORD, Self::LAST_RESERVED_KEYWORD)
    }

    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.in_range(Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        self.in_range(Self::FIRST_TRIVIA, Self::LAST_TRIVIA)
    }

    #[inline]
    pub fn is_directive(self) -> bool {
        self.in_range(Self::FIRST_DIRECTIVE, Self::LAST_DIRECTIVE)
    }

    /// Whether this kind is a token (anything that is neither trivia nor a node).
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < Self::FIRST_TRIVIA as u16
    }

    #[inline]
    pub fn is_node(self) -> bool {
        (self as u16) >= Self::FIRST_NODE as u16
    }

    /// Whether this keyword names a predefined type.
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKeyword
                | SyntaxKind::ByteKeyword
                | SyntaxKind::SByteKeyword
                | SyntaxKind::ShortKeyword
                | SyntaxKind::UShortKeyword
                | SyntaxKind::IntKeyword
                | SyntaxKind::UIntKeyword
                | SyntaxKind::LongKeyword
                | SyntaxKind::ULongKeyword
                | SyntaxKind::DoubleKeyword
                | SyntaxKind::FloatKeyword
                | SyntaxKind::DecimalKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::CharKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// The expression kind produced by an assignment operator token.
    pub fn assignment_expression_kind(self) -> Option<SyntaxKind> {
        Some(match self {
            SyntaxKind::EqualsToken => SyntaxKind::SimpleAssignmentExpression,
            SyntaxKind::PlusEqualsToken => SyntaxKind::AddAssignmentExpression,
            SyntaxKind::MinusEqualsToken => SyntaxKind::SubtractAssignmentExpression,
            SyntaxKind::AsteriskEqualsToken => SyntaxKind::MultiplyAssignmentExpression,
            SyntaxKind::SlashEqualsToken => SyntaxKind::DivideAssignmentExpression,
            SyntaxKind::PercentEqualsToken => SyntaxKind::ModuloAssignmentExpression,
            SyntaxKind::AmpersandEqualsToken => SyntaxKind::AndAssignmentExpression,
            SyntaxKind::BarEqualsToken => SyntaxKind::OrAssignmentExpression,
            SyntaxKind::CaretEqualsToken => SyntaxKind::ExclusiveOrAssignmentExpression,
            SyntaxKind::LessThanLessThanEqualsToken => SyntaxKind::LeftShiftAssignmentExpression,
            SyntaxKind::GreaterThanGreaterThanEqualsToken => {
                SyntaxKind::RightShiftAssignmentExpression
            }
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                SyntaxKind::UnsignedRightShiftAssignmentExpression
            }
            SyntaxKind::QuestionQuestionEqualsToken => SyntaxKind::CoalesceAssignmentExpression,
            _ => return None,
        })
    }

    /// The expression kind produced by a binary operator token.
    pub fn binary_expression_kind(self) -> Option<SyntaxKind> {
        Some(match self {
            SyntaxKind::PlusToken => SyntaxKind::AddExpression,
            SyntaxKind::MinusToken => SyntaxKind::SubtractExpression,
            SyntaxKind::AsteriskToken => SyntaxKind::MultiplyExpression,
            SyntaxKind::SlashToken => SyntaxKind::DivideExpression,
            SyntaxKind::PercentToken => SyntaxKind::ModuloExpression,
            SyntaxKind::LessThanLessThanToken => SyntaxKind::LeftShiftExpression,
            SyntaxKind::GreaterThanGreaterThanToken => SyntaxKind::RightShiftExpression,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                SyntaxKind::UnsignedRightShiftExpression
            }
            SyntaxKind::BarBarToken => SyntaxKind::LogicalOrExpression,
            SyntaxKind::AmpersandAmpersandToken => SyntaxKind::LogicalAndExpression,
            SyntaxKind::BarToken => SyntaxKind::BitwiseOrExpression,
            SyntaxKind::AmpersandToken => SyntaxKind::BitwiseAndExpression,
            SyntaxKind::CaretToken => SyntaxKind::ExclusiveOrExpression,
            SyntaxKind::EqualsEqualsToken => SyntaxKind::EqualsExpression,
            SyntaxKind::ExclamationEqualsToken => SyntaxKind::NotEqualsExpression,
            SyntaxKind::LessThanToken => SyntaxKind::LessThanExpression,
            SyntaxKind::LessThanEqualsToken => SyntaxKind::LessThanOrEqualExpression,
            SyntaxKind::GreaterThanToken => SyntaxKind::GreaterThanExpression,
            SyntaxKind::GreaterThanEqualsToken => SyntaxKind::GreaterThanOrEqualExpression,
            SyntaxKind::IsKeyword => SyntaxKind::IsExpression,
            SyntaxKind::AsKeyword => SyntaxKind::AsExpression,
            SyntaxKind::QuestionQuestionToken => SyntaxKind::CoalesceExpression,
            _ => return None,
        })
    }

    /// The expression kind produced by a prefix unary operator token.
    pub fn prefix_unary_expression_kind(self) -> Option<SyntaxKind> {
        Some(match self {
            SyntaxKind::PlusToken => SyntaxKind::UnaryPlusExpression,
            SyntaxKind::MinusToken => SyntaxKind::UnaryMinusExpression,
            SyntaxKind::TildeToken => SyntaxKind::BitwiseNotExpression,
            SyntaxKind::ExclamationToken => SyntaxKind::LogicalNotExpression,
            SyntaxKind::PlusPlusToken => SyntaxKind::PreIncrementExpression,
            SyntaxKind::MinusMinusToken => SyntaxKind::PreDecrementExpression,
            SyntaxKind::AsteriskToken => SyntaxKind::PointerIndirectionExpression,
            SyntaxKind::AmpersandToken => SyntaxKind::AddressOfExpression,
            _ => return None,
        })
    }

    /// Whether this token can be the operator of a user-defined operator.
    pub fn is_overloadable_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::SlashToken
                | SyntaxKind::PercentToken
                | SyntaxKind::AmpersandToken
                | SyntaxKind::BarToken
                | SyntaxKind::CaretToken
                | SyntaxKind::LessThanLessThanToken
                | SyntaxKind::GreaterThanGreaterThanToken
                | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
                | SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::LessThanEqualsToken
                | SyntaxKind::GreaterThanEqualsToken
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
        )
    }

    /// The fixed source text of a punctuation or keyword kind, or `""`.
    pub fn text(self) -> &'static str {
        match self {
            SyntaxKind::TildeToken => "~",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::DollarToken => "$",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::BarToken => "|",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::DoubleQuoteToken | SyntaxKind::InterpolatedStringEndToken => "\"",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::DotToken => ".",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::HashToken => "#",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::DotDotToken => "..",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::ColonColonToken => "::",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::MinusGreaterThanToken => "->",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            SyntaxKind::InterpolatedStringStartToken => "$\"",
            SyntaxKind::InterpolatedVerbatimStringStartToken => "$@\"",
            _ => self.keyword_text().unwrap_or(""),
        }
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .chain(CONTEXTUAL_KEYWORDS.iter())
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Look up a reserved keyword from its text.
    pub fn from_keyword_text(text: &str) -> Option<SyntaxKind> {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == text)
            .map(|(_, kind)| *kind)
    }

    /// Look up a contextual keyword from an identifier's value text.
    pub fn contextual_keyword(text: &str) -> Option<SyntaxKind> {
        CONTEXTUAL_KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == text)
            .map(|(_, kind)| *kind)
    }
}

static KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("bool", SyntaxKind::BoolKeyword),
    ("byte", SyntaxKind::ByteKeyword),
    ("sbyte", SyntaxKind::SByteKeyword),
    ("short", SyntaxKind::ShortKeyword),
    ("ushort", SyntaxKind::UShortKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("uint", SyntaxKind::UIntKeyword),
    ("long", SyntaxKind::LongKeyword),
    ("ulong", SyntaxKind::ULongKeyword),
    ("double", SyntaxKind::DoubleKeyword),
    ("float", SyntaxKind::FloatKeyword),
    ("decimal", SyntaxKind::DecimalKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("char", SyntaxKind::CharKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("sizeof", SyntaxKind::SizeOfKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("foreach", SyntaxKind::ForEachKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("lock", SyntaxKind::LockKeyword),
    ("goto", SyntaxKind::GotoKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("internal", SyntaxKind::InternalKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("readonly", SyntaxKind::ReadOnlyKeyword),
    ("sealed", SyntaxKind::SealedKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("fixed", SyntaxKind::FixedKeyword),
    ("stackalloc", SyntaxKind::StackAllocKeyword),
    ("volatile", SyntaxKind::VolatileKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("abstract", SyntaxKind::AbstractKeyword),
    ("virtual", SyntaxKind::VirtualKeyword),
    ("event", SyntaxKind::EventKeyword),
    ("extern", SyntaxKind::ExternKeyword),
    ("ref", SyntaxKind::RefKeyword),
    ("out", SyntaxKind::OutKeyword),
    ("in", SyntaxKind::InKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("params", SyntaxKind::ParamsKeyword),
    ("__arglist", SyntaxKind::ArgListKeyword),
    ("__makeref", SyntaxKind::MakeRefKeyword),
    ("__reftype", SyntaxKind::RefTypeKeyword),
    ("__refvalue", SyntaxKind::RefValueKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("base", SyntaxKind::BaseKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("using", SyntaxKind::UsingKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("struct", SyntaxKind::StructKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("delegate", SyntaxKind::DelegateKeyword),
    ("checked", SyntaxKind::CheckedKeyword),
    ("unchecked", SyntaxKind::UncheckedKeyword),
    ("unsafe", SyntaxKind::UnsafeKeyword),
    ("operator", SyntaxKind::OperatorKeyword),
    ("explicit", SyntaxKind::ExplicitKeyword),
    ("implicit", SyntaxKind::ImplicitKeyword),
];

static CONTEXTUAL_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("yield", SyntaxKind::YieldKeyword),
    ("partial", SyntaxKind::PartialKeyword),
    ("alias", SyntaxKind::AliasKeyword),
    ("global", SyntaxKind::GlobalKeyword),
    ("assembly", SyntaxKind::AssemblyKeyword),
    ("module", SyntaxKind::ModuleKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("init", SyntaxKind::InitKeyword),
    ("add", SyntaxKind::AddKeyword),
    ("remove", SyntaxKind::RemoveKeyword),
    ("where", SyntaxKind::WhereKeyword),
    ("nameof", SyntaxKind::NameOfKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("await", SyntaxKind::AwaitKeyword),
    ("when", SyntaxKind::WhenKeyword),
    ("record", SyntaxKind::RecordKeyword),
    ("unmanaged", SyntaxKind::UnmanagedKeyword),
    ("notnull", SyntaxKind::NotNullKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("required", SyntaxKind::RequiredKeyword),
    ("scoped", SyntaxKind::ScopedKeyword),
    ("file", SyntaxKind::FileKeyword),
];

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::from_keyword_text("class"), Some(SyntaxKind::ClassKeyword));
        assert_eq!(SyntaxKind::from_keyword_text("partial"), None);
        assert_eq!(SyntaxKind::contextual_keyword("partial"), Some(SyntaxKind::PartialKeyword));
        assert_eq!(SyntaxKind::contextual_keyword("class"), None);
        assert_eq!(SyntaxKind::from_keyword_text("__arglist"), Some(SyntaxKind::ArgListKeyword));
    }

    #[test]
    fn test_keyword_ranges() {
        assert!(SyntaxKind::ImplicitKeyword.is_reserved_keyword());
        assert!(!SyntaxKind::YieldKeyword.is_reserved_keyword());
        assert!(SyntaxKind::FileKeyword.is_contextual_keyword());
        assert!(SyntaxKind::AssemblyKeyword.is_keyword());
        assert!(!SyntaxKind::IdentifierToken.is_keyword());
    }

    #[test]
    fn test_every_keyword_round_trips_through_text() {
        for (text, kind) in KEYWORDS.iter() {
            assert!(kind.is_reserved_keyword(), "{text}");
            assert_eq!(kind.text(), *text);
        }
        for (text, kind) in CONTEXTUAL_KEYWORDS.iter() {
            assert!(kind.is_contextual_keyword(), "{text}");
            assert_eq!(kind.text(), *text);
        }
    }

    #[test]
    fn test_token_text() {
        assert_eq!(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken.text(), ">>>=");
        assert_eq!(SyntaxKind::ColonColonToken.text(), "::");
        assert_eq!(SyntaxKind::IdentifierToken.text(), "");
    }

    #[test]
    fn test_category_predicates() {
        assert!(SyntaxKind::SkippedTokensTrivia.is_trivia());
        assert!(SyntaxKind::IfDirectiveTrivia.is_directive());
        assert!(!SyntaxKind::DisabledTextTrivia.is_directive());
        assert!(SyntaxKind::CompilationUnit.is_node());
        assert!(SyntaxKind::OmittedTypeArgumentToken.is_token());
        assert!(SyntaxKind::VoidKeyword.is_predefined_type());
        assert!(!SyntaxKind::VarKeyword.is_predefined_type());
    }

    #[test]
    fn test_operator_kind_maps() {
        assert_eq!(
            SyntaxKind::QuestionQuestionEqualsToken.assignment_expression_kind(),
            Some(SyntaxKind::CoalesceAssignmentExpression)
        );
        assert_eq!(
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken.binary_expression_kind(),
            Some(SyntaxKind::UnsignedRightShiftExpression)
        );
        assert_eq!(
            SyntaxKind::AmpersandToken.prefix_unary_expression_kind(),
            Some(SyntaxKind::AddressOfExpression)
        );
        assert!(SyntaxKind::TrueKeyword.is_overloadable_operator());
        assert!(!SyntaxKind::EqualsToken.is_overloadable_operator());
    }
}
