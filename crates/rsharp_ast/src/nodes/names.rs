//! Names and types.

use crate::node::{drop_link, SeparatedList, Vacant};
use crate::nodes::ExpressionSyntax;
use crate::token::SyntaxToken;
use crate::SyntaxKind;
use crate::{impl_from_nodes, syntax_enum, syntax_node};

syntax_node! {
    pub struct IdentifierName: IdentifierName {
        pub identifier: SyntaxToken,
    }
}

syntax_node! {
    /// `left.right`. Dotted chains nest to the left.
    pub struct QualifiedName: QualifiedName {
        pub left: Box<NameSyntax>,
        pub dot_token: SyntaxToken,
        pub right: SimpleNameSyntax,
    }
}

syntax_node! {
    /// `alias::name`, including `global::name`.
    pub struct AliasQualifiedName: AliasQualifiedName {
        pub alias: IdentifierName,
        pub colon_colon_token: SyntaxToken,
        pub name: SimpleNameSyntax,
    }
}

syntax_node! {
    pub struct GenericName: GenericName {
        pub identifier: SyntaxToken,
        pub type_argument_list: TypeArgumentList,
    }
}

impl GenericName {
    /// `A<>` or `A<,>`: every argument is omitted.
    pub fn is_unbound_generic_name(&self) -> bool {
        self.type_argument_list
            .arguments
            .iter()
            .all(|a| matches!(a, TypeSyntax::OmittedTypeArgument(_)))
    }
}

syntax_node! {
    pub struct TypeArgumentList: TypeArgumentList {
        pub less_than_token: SyntaxToken,
        pub arguments: SeparatedList<TypeSyntax>,
        pub greater_than_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct PredefinedType: PredefinedType {
        pub keyword: SyntaxToken,
    }
}

syntax_node! {
    pub struct ArrayType: ArrayType {
        pub element_type: Box<TypeSyntax>,
        pub rank_specifiers: Vec<ArrayRankSpecifier>,
    }
}

syntax_node! {
    /// One `[ , , ]` group. Unsized dimensions hold `OmittedArraySizeExpression`.
    pub struct ArrayRankSpecifier: ArrayRankSpecifier {
        pub open_bracket_token: SyntaxToken,
        pub sizes: SeparatedList<ExpressionSyntax>,
        pub close_bracket_token: SyntaxToken,
    }
}

impl ArrayRankSpecifier {
    pub fn rank(&self) -> usize {
        self.sizes.len()
    }
}

syntax_node! {
    pub struct PointerType: PointerType {
        pub element_type: Box<TypeSyntax>,
        pub asterisk_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct NullableType: NullableType {
        pub element_type: Box<TypeSyntax>,
        pub question_token: SyntaxToken,
    }
}

syntax_node! {
    /// `ref T` or `ref readonly T`.
    pub struct RefType: RefType {
        pub ref_keyword: SyntaxToken,
        pub readonly_keyword: Option<SyntaxToken>,
        pub ty: Box<TypeSyntax>,
    }
}

syntax_node! {
    pub struct TupleType: TupleType {
        pub open_paren_token: SyntaxToken,
        pub elements: SeparatedList<TupleElement>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct TupleElement: TupleElement {
        pub ty: TypeSyntax,
        pub identifier: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct OmittedTypeArgument: OmittedTypeArgument {
        pub omitted_type_argument_token: SyntaxToken,
    }
}

syntax_enum! {
    /// A simple (unqualified) name.
    pub enum SimpleNameSyntax {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
    }
}

impl_from_nodes!(SimpleNameSyntax {
    IdentifierName(IdentifierName),
    GenericName(GenericName),
});

syntax_enum! {
    pub enum NameSyntax {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
        QualifiedName(QualifiedName),
        AliasQualifiedName(AliasQualifiedName),
    }
}

impl_from_nodes!(NameSyntax {
    IdentifierName(IdentifierName),
    GenericName(GenericName),
    QualifiedName(QualifiedName),
    AliasQualifiedName(AliasQualifiedName),
});

impl From<SimpleNameSyntax> for NameSyntax {
    fn from(name: SimpleNameSyntax) -> Self {
        match name {
            SimpleNameSyntax::IdentifierName(n) => NameSyntax::IdentifierName(n),
            SimpleNameSyntax::GenericName(n) => NameSyntax::GenericName(n),
        }
    }
}

impl SimpleNameSyntax {
    pub fn identifier(&self) -> &SyntaxToken {
        match self {
            SimpleNameSyntax::IdentifierName(n) => &n.identifier,
            SimpleNameSyntax::GenericName(n) => &n.identifier,
        }
    }
}

syntax_enum! {
    pub enum TypeSyntax {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
        QualifiedName(QualifiedName),
        AliasQualifiedName(AliasQualifiedName),
        PredefinedType(PredefinedType),
        ArrayType(ArrayType),
        PointerType(PointerType),
        NullableType(NullableType),
        RefType(RefType),
        TupleType(TupleType),
        OmittedTypeArgument(OmittedTypeArgument),
    }
}

impl_from_nodes!(TypeSyntax {
    IdentifierName(IdentifierName),
    GenericName(GenericName),
    QualifiedName(QualifiedName),
    AliasQualifiedName(AliasQualifiedName),
    PredefinedType(PredefinedType),
    ArrayType(ArrayType),
    PointerType(PointerType),
    NullableType(NullableType),
    RefType(RefType),
    TupleType(TupleType),
    OmittedTypeArgument(OmittedTypeArgument),
});

impl From<NameSyntax> for TypeSyntax {
    fn from(name: NameSyntax) -> Self {
        match name {
            NameSyntax::IdentifierName(n) => TypeSyntax::IdentifierName(n),
            NameSyntax::GenericName(n) => TypeSyntax::GenericName(n),
            NameSyntax::QualifiedName(n) => TypeSyntax::QualifiedName(n),
            NameSyntax::AliasQualifiedName(n) => TypeSyntax::AliasQualifiedName(n),
        }
    }
}

impl From<SimpleNameSyntax> for TypeSyntax {
    fn from(name: SimpleNameSyntax) -> Self {
        NameSyntax::from(name).into()
    }
}

impl Vacant for NameSyntax {
    fn vacant() -> Self {
        IdentifierName {
            identifier: SyntaxToken::missing(SyntaxKind::IdentifierToken, 0),
        }
        .into()
    }
}

impl Vacant for TypeSyntax {
    fn vacant() -> Self {
        NameSyntax::vacant().into()
    }
}

impl Drop for QualifiedName {
    fn drop(&mut self) {
        drop_link(&mut self.left);
    }
}

impl Drop for ArrayType {
    fn drop(&mut self) {
        drop_link(&mut self.element_type);
    }
}

impl Drop for PointerType {
    fn drop(&mut self) {
        drop_link(&mut self.element_type);
    }
}

impl Drop for NullableType {
    fn drop(&mut self) {
        drop_link(&mut self.element_type);
    }
}

impl TypeSyntax {
    /// The type as a name, if it is one.
    pub fn into_name(self) -> Result<NameSyntax, TypeSyntax> {
        match self {
            TypeSyntax::IdentifierName(n) => Ok(NameSyntax::IdentifierName(n)),
            TypeSyntax::GenericName(n) => Ok(NameSyntax::GenericName(n)),
            TypeSyntax::QualifiedName(n) => Ok(NameSyntax::QualifiedName(n)),
            TypeSyntax::AliasQualifiedName(n) => Ok(NameSyntax::AliasQualifiedName(n)),
            other => Err(other),
        }
    }
}
