//! Expressions.

use crate::node::{drop_link, SeparatedList, Vacant};
use crate::nodes::{
    AliasQualifiedName, ArrayType, Block, GenericName, IdentifierName, NameSyntax, Parameter,
    ParameterList, QualifiedName, SimpleNameSyntax, TypeSyntax,
};
use crate::token::SyntaxToken;
use crate::SyntaxKind;
use crate::{impl_from_nodes, syntax_enum, syntax_node};

syntax_node! {
    /// Numeric, string, character, `true`, `false`, `null`, `default` and `__arglist` literals.
    pub struct LiteralExpression: dyn {
        pub token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ThisExpression: ThisExpression {
        pub token: SyntaxToken,
    }
}

syntax_node! {
    pub struct BaseExpression: BaseExpression {
        pub token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ParenthesizedExpression: ParenthesizedExpression {
        pub open_paren_token: SyntaxToken,
        pub expression: Box<ExpressionSyntax>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct TupleExpression: TupleExpression {
        pub open_paren_token: SyntaxToken,
        pub arguments: SeparatedList<Argument>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct NameColon: NameColon {
        pub name: IdentifierName,
        pub colon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct Argument: Argument {
        pub name_colon: Option<NameColon>,
        /// `ref`, `out` or `in`.
        pub ref_kind_keyword: Option<SyntaxToken>,
        pub expression: ExpressionSyntax,
    }
}

syntax_node! {
    pub struct ArgumentList: ArgumentList {
        pub open_paren_token: SyntaxToken,
        pub arguments: SeparatedList<Argument>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct BracketedArgumentList: BracketedArgumentList {
        pub open_bracket_token: SyntaxToken,
        pub arguments: SeparatedList<Argument>,
        pub close_bracket_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct InvocationExpression: InvocationExpression {
        pub expression: Box<ExpressionSyntax>,
        pub argument_list: ArgumentList,
    }
}

syntax_node! {
    pub struct ElementAccessExpression: ElementAccessExpression {
        pub expression: Box<ExpressionSyntax>,
        pub argument_list: BracketedArgumentList,
    }
}

syntax_node! {
    /// `a.b` or `a->b`.
    pub struct MemberAccessExpression: dyn {
        pub expression: Box<ExpressionSyntax>,
        pub operator_token: SyntaxToken,
        pub name: SimpleNameSyntax,
    }
}

syntax_node! {
    pub struct PrefixUnaryExpression: dyn {
        pub operator_token: SyntaxToken,
        pub operand: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    pub struct PostfixUnaryExpression: dyn {
        pub operand: Box<ExpressionSyntax>,
        pub operator_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct CastExpression: CastExpression {
        pub open_paren_token: SyntaxToken,
        pub ty: TypeSyntax,
        pub close_paren_token: SyntaxToken,
        pub expression: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    /// Binary operators, including `is` and `as` whose right side is a type.
    pub struct BinaryExpression: dyn {
        pub left: Box<ExpressionSyntax>,
        pub operator_token: SyntaxToken,
        pub right: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    pub struct AssignmentExpression: dyn {
        pub left: Box<ExpressionSyntax>,
        pub operator_token: SyntaxToken,
        pub right: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    pub struct ConditionalExpression: ConditionalExpression {
        pub condition: Box<ExpressionSyntax>,
        pub question_token: SyntaxToken,
        pub when_true: Box<ExpressionSyntax>,
        pub colon_token: SyntaxToken,
        pub when_false: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    /// `{ a, b }` as an object, collection or array initializer.
    pub struct InitializerExpression: dyn {
        pub open_brace_token: SyntaxToken,
        pub expressions: SeparatedList<ExpressionSyntax>,
        pub close_brace_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ObjectCreationExpression: ObjectCreationExpression {
        pub new_keyword: SyntaxToken,
        pub ty: TypeSyntax,
        pub argument_list: Option<ArgumentList>,
        pub initializer: Option<InitializerExpression>,
    }
}

syntax_node! {
    /// `new(args)`.
    pub struct ImplicitObjectCreationExpression: ImplicitObjectCreationExpression {
        pub new_keyword: SyntaxToken,
        pub argument_list: ArgumentList,
        pub initializer: Option<InitializerExpression>,
    }
}

syntax_node! {
    pub struct ArrayCreationExpression: ArrayCreationExpression {
        pub new_keyword: SyntaxToken,
        pub ty: ArrayType,
        pub initializer: Option<InitializerExpression>,
    }
}

syntax_node! {
    /// `new[] { ... }`.
    pub struct ImplicitArrayCreationExpression: ImplicitArrayCreationExpression {
        pub new_keyword: SyntaxToken,
        pub open_bracket_token: SyntaxToken,
        pub commas: Vec<SyntaxToken>,
        pub close_bracket_token: SyntaxToken,
        pub initializer: InitializerExpression,
    }
}

syntax_node! {
    pub struct OmittedArraySizeExpression: OmittedArraySizeExpression {
        pub omitted_array_size_expression_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct TypeOfExpression: TypeOfExpression {
        pub keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub ty: TypeSyntax,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct SizeOfExpression: SizeOfExpression {
        pub keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub ty: TypeSyntax,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    /// `default(T)`. The bare `default` literal is a `LiteralExpression`.
    pub struct DefaultExpression: DefaultExpression {
        pub keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub ty: TypeSyntax,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    /// `checked(expr)` or `unchecked(expr)`.
    pub struct CheckedExpression: dyn {
        pub keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub expression: Box<ExpressionSyntax>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct SimpleLambdaExpression: SimpleLambdaExpression {
        pub modifiers: Vec<SyntaxToken>,
        pub parameter: Box<Parameter>,
        pub arrow_token: SyntaxToken,
        pub body: LambdaBody,
    }
}

syntax_node! {
    pub struct ParenthesizedLambdaExpression: ParenthesizedLambdaExpression {
        pub modifiers: Vec<SyntaxToken>,
        pub parameter_list: ParameterList,
        pub arrow_token: SyntaxToken,
        pub body: LambdaBody,
    }
}

syntax_node! {
    pub struct ThrowExpression: ThrowExpression {
        pub throw_keyword: SyntaxToken,
        pub expression: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    pub struct RefExpression: RefExpression {
        pub ref_keyword: SyntaxToken,
        pub expression: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    /// `$"..."`. The end token is present even when the source is
    /// unterminated; it is then missing.
    pub struct InterpolatedStringExpression: InterpolatedStringExpression {
        pub string_start_token: SyntaxToken,
        pub contents: Vec<InterpolatedStringContent>,
        pub string_end_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct InterpolatedStringText: InterpolatedStringText {
        pub text_token: SyntaxToken,
    }
}

syntax_node! {
    /// `{ expression [, alignment] [: format] }`.
    pub struct Interpolation: Interpolation {
        pub open_brace_token: SyntaxToken,
        pub expression: Box<ExpressionSyntax>,
        pub alignment_clause: Option<InterpolationAlignmentClause>,
        pub format_clause: Option<InterpolationFormatClause>,
        pub close_brace_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct InterpolationAlignmentClause: InterpolationAlignmentClause {
        pub comma_token: SyntaxToken,
        pub value: Box<ExpressionSyntax>,
    }
}

syntax_node! {
    pub struct InterpolationFormatClause: InterpolationFormatClause {
        pub colon_token: SyntaxToken,
        pub format_string_token: SyntaxToken,
    }
}

syntax_enum! {
    pub enum InterpolatedStringContent {
        Text(InterpolatedStringText),
        Interpolation(Interpolation),
    }
}

impl_from_nodes!(InterpolatedStringContent {
    Text(InterpolatedStringText),
    Interpolation(Interpolation),
});

syntax_enum! {
    pub enum LambdaBody {
        Block(Block),
        Expression(Box<ExpressionSyntax>),
    }
}

syntax_enum! {
    pub enum ExpressionSyntax {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
        QualifiedName(QualifiedName),
        AliasQualifiedName(AliasQualifiedName),
        /// A non-name type used as an expression (`int.MaxValue`, `is int[]`).
        Type(TypeSyntax),
        Literal(LiteralExpression),
        This(ThisExpression),
        Base(BaseExpression),
        Parenthesized(ParenthesizedExpression),
        Tuple(TupleExpression),
        Invocation(InvocationExpression),
        ElementAccess(ElementAccessExpression),
        MemberAccess(MemberAccessExpression),
        PrefixUnary(PrefixUnaryExpression),
        PostfixUnary(PostfixUnaryExpression),
        Cast(CastExpression),
        Binary(BinaryExpression),
        Assignment(AssignmentExpression),
        Conditional(ConditionalExpression),
        Initializer(InitializerExpression),
        ObjectCreation(ObjectCreationExpression),
        ImplicitObjectCreation(ImplicitObjectCreationExpression),
        ArrayCreation(ArrayCreationExpression),
        ImplicitArrayCreation(ImplicitArrayCreationExpression),
        OmittedArraySize(OmittedArraySizeExpression),
        TypeOf(TypeOfExpression),
        SizeOf(SizeOfExpression),
        Default(DefaultExpression),
        Checked(CheckedExpression),
        SimpleLambda(SimpleLambdaExpression),
        ParenthesizedLambda(ParenthesizedLambdaExpression),
        Throw(ThrowExpression),
        Ref(RefExpression),
        InterpolatedString(InterpolatedStringExpression),
    }
}

impl_from_nodes!(ExpressionSyntax {
    IdentifierName(IdentifierName),
    GenericName(GenericName),
    QualifiedName(QualifiedName),
    AliasQualifiedName(AliasQualifiedName),
    Literal(LiteralExpression),
    This(ThisExpression),
    Base(BaseExpression),
    Parenthesized(ParenthesizedExpression),
    Tuple(TupleExpression),
    Invocation(InvocationExpression),
    ElementAccess(ElementAccessExpression),
    MemberAccess(MemberAccessExpression),
    PrefixUnary(PrefixUnaryExpression),
    PostfixUnary(PostfixUnaryExpression),
    Cast(CastExpression),
    Binary(BinaryExpression),
    Assignment(AssignmentExpression),
    Conditional(ConditionalExpression),
    Initializer(InitializerExpression),
    ObjectCreation(ObjectCreationExpression),
    ImplicitObjectCreation(ImplicitObjectCreationExpression),
    ArrayCreation(ArrayCreationExpression),
    ImplicitArrayCreation(ImplicitArrayCreationExpression),
    OmittedArraySize(OmittedArraySizeExpression),
    TypeOf(TypeOfExpression),
    SizeOf(SizeOfExpression),
    Default(DefaultExpression),
    Checked(CheckedExpression),
    SimpleLambda(SimpleLambdaExpression),
    ParenthesizedLambda(ParenthesizedLambdaExpression),
    Throw(ThrowExpression),
    Ref(RefExpression),
    InterpolatedString(InterpolatedStringExpression),
});

impl Vacant for ExpressionSyntax {
    fn vacant() -> Self {
        IdentifierName {
            identifier: SyntaxToken::missing(SyntaxKind::IdentifierToken, 0),
        }
        .into()
    }
}

impl Drop for InvocationExpression {
    fn drop(&mut self) {
        drop_link(&mut self.expression);
    }
}

impl Drop for ElementAccessExpression {
    fn drop(&mut self) {
        drop_link(&mut self.expression);
    }
}

impl Drop for MemberAccessExpression {
    fn drop(&mut self) {
        drop_link(&mut self.expression);
    }
}

impl Drop for PostfixUnaryExpression {
    fn drop(&mut self) {
        drop_link(&mut self.operand);
    }
}

impl Drop for BinaryExpression {
    fn drop(&mut self) {
        drop_link(&mut self.left);
    }
}

impl From<TypeSyntax> for ExpressionSyntax {
    /// Names become name expressions; other types are wrapped.
    fn from(ty: TypeSyntax) -> Self {
        match ty.into_name() {
            Ok(name) => name.into(),
            Err(other) => ExpressionSyntax::Type(other),
        }
    }
}

impl From<NameSyntax> for ExpressionSyntax {
    fn from(name: NameSyntax) -> Self {
        match name {
            NameSyntax::IdentifierName(n) => ExpressionSyntax::IdentifierName(n),
            NameSyntax::GenericName(n) => ExpressionSyntax::GenericName(n),
            NameSyntax::QualifiedName(n) => ExpressionSyntax::QualifiedName(n),
            NameSyntax::AliasQualifiedName(n) => ExpressionSyntax::AliasQualifiedName(n),
        }
    }
}

impl From<SimpleNameSyntax> for ExpressionSyntax {
    fn from(name: SimpleNameSyntax) -> Self {
        NameSyntax::from(name).into()
    }
}

impl From<ExpressionSyntax> for LambdaBody {
    fn from(expression: ExpressionSyntax) -> Self {
        LambdaBody::Expression(Box::new(expression))
    }
}

impl From<Block> for LambdaBody {
    fn from(block: Block) -> Self {
        LambdaBody::Block(block)
    }
}

impl ExpressionSyntax {
    /// The expression as a name, if it is one.
    pub fn into_name(self) -> Result<NameSyntax, ExpressionSyntax> {
        match self {
            ExpressionSyntax::IdentifierName(n) => Ok(NameSyntax::IdentifierName(n)),
            ExpressionSyntax::GenericName(n) => Ok(NameSyntax::GenericName(n)),
            ExpressionSyntax::QualifiedName(n) => Ok(NameSyntax::QualifiedName(n)),
            ExpressionSyntax::AliasQualifiedName(n) => Ok(NameSyntax::AliasQualifiedName(n)),
            other => Err(other),
        }
    }
}
