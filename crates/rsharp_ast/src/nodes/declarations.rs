//! Compilation units, namespaces, types and members.

use crate::node::SeparatedList;
use crate::nodes::{
    ArgumentList, Block, EqualsValueClause, ExpressionSyntax, IdentifierName, NameColon,
    NameSyntax, StatementSyntax, TypeSyntax, VariableDeclaration,
};
use crate::syntax_kind::SyntaxKind;
use crate::token::SyntaxToken;
use crate::{impl_from_nodes, syntax_enum, syntax_node};

// ============================================================================
// Compilation unit and namespaces
// ============================================================================

syntax_node! {
    pub struct CompilationUnit: CompilationUnit {
        pub externs: Vec<ExternAliasDirective>,
        pub usings: Vec<UsingDirective>,
        /// Global (`assembly:`/`module:`) attribute lists.
        pub attribute_lists: Vec<AttributeList>,
        pub members: Vec<MemberDeclaration>,
        pub end_of_file_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ExternAliasDirective: ExternAliasDirective {
        pub extern_keyword: SyntaxToken,
        pub alias_keyword: SyntaxToken,
        pub identifier: SyntaxToken,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    /// `[global] using [static] [alias =] name;`
    pub struct UsingDirective: UsingDirective {
        pub global_keyword: Option<SyntaxToken>,
        pub using_keyword: SyntaxToken,
        pub static_keyword: Option<SyntaxToken>,
        pub alias: Option<NameEquals>,
        pub name: NameSyntax,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct NameEquals: NameEquals {
        pub name: IdentifierName,
        pub equals_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct NamespaceDeclaration: NamespaceDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub namespace_keyword: SyntaxToken,
        pub name: NameSyntax,
        pub open_brace_token: SyntaxToken,
        pub externs: Vec<ExternAliasDirective>,
        pub usings: Vec<UsingDirective>,
        pub members: Vec<MemberDeclaration>,
        pub close_brace_token: SyntaxToken,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    /// `namespace N;` followed by the rest of the file.
    pub struct FileScopedNamespaceDeclaration: FileScopedNamespaceDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub namespace_keyword: SyntaxToken,
        pub name: NameSyntax,
        pub semicolon_token: SyntaxToken,
        pub externs: Vec<ExternAliasDirective>,
        pub usings: Vec<UsingDirective>,
        pub members: Vec<MemberDeclaration>,
    }
}

// ============================================================================
// Attributes
// ============================================================================

syntax_node! {
    pub struct AttributeList: AttributeList {
        pub open_bracket_token: SyntaxToken,
        pub target: Option<AttributeTargetSpecifier>,
        pub attributes: SeparatedList<Attribute>,
        pub close_bracket_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct AttributeTargetSpecifier: AttributeTargetSpecifier {
        pub identifier: SyntaxToken,
        pub colon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct Attribute: Attribute {
        pub name: NameSyntax,
        pub argument_list: Option<AttributeArgumentList>,
    }
}

syntax_node! {
    pub struct AttributeArgumentList: AttributeArgumentList {
        pub open_paren_token: SyntaxToken,
        pub arguments: SeparatedList<AttributeArgument>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct AttributeArgument: AttributeArgument {
        pub name_equals: Option<NameEquals>,
        pub name_colon: Option<NameColon>,
        pub expression: ExpressionSyntax,
    }
}

/// The target of a global attribute list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeLocation {
    Assembly,
    Module,
}

/// Map an attribute target identifier to a global attribute location.
/// Compares the value text, so `@assembly` and `assembly` qualify.
pub fn attribute_location(token: &SyntaxToken) -> Option<AttributeLocation> {
    if token.kind != SyntaxKind::IdentifierToken {
        return None;
    }
    match token.value_text() {
        "assembly" => Some(AttributeLocation::Assembly),
        "module" => Some(AttributeLocation::Module),
        _ => None,
    }
}

impl AttributeList {
    /// The global location this list targets, if any.
    pub fn location(&self) -> Option<AttributeLocation> {
        self.target
            .as_ref()
            .and_then(|t| attribute_location(&t.identifier))
    }
}

// ============================================================================
// Type declarations
// ============================================================================

syntax_node! {
    pub struct TypeParameterList: TypeParameterList {
        pub less_than_token: SyntaxToken,
        pub parameters: SeparatedList<TypeParameter>,
        pub greater_than_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct TypeParameter: TypeParameter {
        pub attribute_lists: Vec<AttributeList>,
        /// `in` or `out`.
        pub variance_keyword: Option<SyntaxToken>,
        pub identifier: SyntaxToken,
    }
}

syntax_node! {
    pub struct BaseList: BaseList {
        pub colon_token: SyntaxToken,
        pub types: SeparatedList<SimpleBaseType>,
    }
}

syntax_node! {
    pub struct SimpleBaseType: SimpleBaseType {
        pub ty: TypeSyntax,
    }
}

syntax_node! {
    /// `where T : constraint, ...`
    pub struct TypeParameterConstraintClause: TypeParameterConstraintClause {
        pub where_keyword: SyntaxToken,
        pub name: IdentifierName,
        pub colon_token: SyntaxToken,
        pub constraints: SeparatedList<TypeParameterConstraint>,
    }
}

syntax_node! {
    pub struct ConstructorConstraint: ConstructorConstraint {
        pub new_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    /// `class`, `class?`, `struct` or `struct?`.
    pub struct ClassOrStructConstraint: dyn {
        pub class_or_struct_keyword: SyntaxToken,
        pub question_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct TypeConstraint: TypeConstraint {
        pub ty: TypeSyntax,
    }
}

syntax_node! {
    pub struct DefaultConstraint: DefaultConstraint {
        pub default_keyword: SyntaxToken,
    }
}

syntax_enum! {
    pub enum TypeParameterConstraint {
        Constructor(ConstructorConstraint),
        ClassOrStruct(ClassOrStructConstraint),
        Type(TypeConstraint),
        Default(DefaultConstraint),
    }
}

impl_from_nodes!(TypeParameterConstraint {
    Constructor(ConstructorConstraint),
    ClassOrStruct(ClassOrStructConstraint),
    Type(TypeConstraint),
    Default(DefaultConstraint),
});

macro_rules! type_declaration {
    ($(#[$meta:meta])* $name:ident: $kind:ident) => {
        syntax_node! {
            $(#[$meta])*
            pub struct $name: $kind {
                pub attribute_lists: Vec<AttributeList>,
                pub modifiers: Vec<SyntaxToken>,
                pub keyword: SyntaxToken,
                pub identifier: SyntaxToken,
                pub type_parameter_list: Option<TypeParameterList>,
                pub base_list: Option<BaseList>,
                pub constraint_clauses: Vec<TypeParameterConstraintClause>,
                pub open_brace_token: Option<SyntaxToken>,
                pub members: Vec<MemberDeclaration>,
                pub close_brace_token: Option<SyntaxToken>,
                pub semicolon_token: Option<SyntaxToken>,
            }
        }

        impl TypeDeclarationSyntax for $name {
            fn keyword(&self) -> &SyntaxToken {
                &self.keyword
            }
            fn identifier(&self) -> &SyntaxToken {
                &self.identifier
            }
            fn type_parameter_list(&self) -> Option<&TypeParameterList> {
                self.type_parameter_list.as_ref()
            }
            fn base_list(&self) -> Option<&BaseList> {
                self.base_list.as_ref()
            }
            fn constraint_clauses(&self) -> &[TypeParameterConstraintClause] {
                &self.constraint_clauses
            }
            fn open_brace_token(&self) -> Option<&SyntaxToken> {
                self.open_brace_token.as_ref()
            }
            fn members(&self) -> &[MemberDeclaration] {
                &self.members
            }
            fn close_brace_token(&self) -> Option<&SyntaxToken> {
                self.close_brace_token.as_ref()
            }
            fn semicolon_token(&self) -> Option<&SyntaxToken> {
                self.semicolon_token.as_ref()
            }
        }
    };
}

type_declaration!(ClassDeclaration: ClassDeclaration);
type_declaration!(StructDeclaration: StructDeclaration);
type_declaration!(InterfaceDeclaration: InterfaceDeclaration);

syntax_node! {
    pub struct EnumDeclaration: EnumDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub enum_keyword: SyntaxToken,
        pub identifier: SyntaxToken,
        pub base_list: Option<BaseList>,
        pub open_brace_token: SyntaxToken,
        pub members: SeparatedList<EnumMemberDeclaration>,
        pub close_brace_token: SyntaxToken,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct EnumMemberDeclaration: EnumMemberDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub identifier: SyntaxToken,
        pub equals_value: Option<EqualsValueClause>,
    }
}

syntax_node! {
    pub struct DelegateDeclaration: DelegateDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub delegate_keyword: SyntaxToken,
        pub return_type: TypeSyntax,
        pub identifier: SyntaxToken,
        pub type_parameter_list: Option<TypeParameterList>,
        pub parameter_list: ParameterList,
        pub constraint_clauses: Vec<TypeParameterConstraintClause>,
        pub semicolon_token: SyntaxToken,
    }
}

// ============================================================================
// Members
// ============================================================================

syntax_node! {
    pub struct FieldDeclaration: FieldDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub declaration: VariableDeclaration,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct EventFieldDeclaration: EventFieldDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub event_keyword: SyntaxToken,
        pub declaration: VariableDeclaration,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    /// `I.` or `N.I<T>.` before an explicitly implemented member.
    pub struct ExplicitInterfaceSpecifier: ExplicitInterfaceSpecifier {
        pub name: NameSyntax,
        pub dot_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ArrowExpressionClause: ArrowExpressionClause {
        pub arrow_token: SyntaxToken,
        pub expression: ExpressionSyntax,
    }
}

syntax_node! {
    pub struct MethodDeclaration: MethodDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub return_type: TypeSyntax,
        pub explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        pub identifier: SyntaxToken,
        pub type_parameter_list: Option<TypeParameterList>,
        pub parameter_list: ParameterList,
        pub constraint_clauses: Vec<TypeParameterConstraintClause>,
        pub body: Option<Block>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct OperatorDeclaration: OperatorDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub return_type: TypeSyntax,
        pub explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        pub operator_keyword: SyntaxToken,
        pub checked_keyword: Option<SyntaxToken>,
        pub operator_token: SyntaxToken,
        pub parameter_list: ParameterList,
        pub body: Option<Block>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct ConversionOperatorDeclaration: ConversionOperatorDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub implicit_or_explicit_keyword: SyntaxToken,
        pub explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        pub operator_keyword: SyntaxToken,
        pub checked_keyword: Option<SyntaxToken>,
        pub ty: TypeSyntax,
        pub parameter_list: ParameterList,
        pub body: Option<Block>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct ConstructorDeclaration: ConstructorDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub identifier: SyntaxToken,
        pub parameter_list: ParameterList,
        pub initializer: Option<ConstructorInitializer>,
        pub body: Option<Block>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    /// `: base(...)` or `: this(...)`.
    pub struct ConstructorInitializer: dyn {
        pub colon_token: SyntaxToken,
        pub this_or_base_keyword: SyntaxToken,
        pub argument_list: ArgumentList,
    }
}

syntax_node! {
    pub struct DestructorDeclaration: DestructorDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub tilde_token: SyntaxToken,
        pub identifier: SyntaxToken,
        pub parameter_list: ParameterList,
        pub body: Option<Block>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct PropertyDeclaration: PropertyDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub ty: TypeSyntax,
        pub explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        pub identifier: SyntaxToken,
        pub accessor_list: Option<AccessorList>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub initializer: Option<EqualsValueClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct IndexerDeclaration: IndexerDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub ty: TypeSyntax,
        pub explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        pub this_keyword: SyntaxToken,
        pub parameter_list: BracketedParameterList,
        pub accessor_list: Option<AccessorList>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct EventDeclaration: EventDeclaration {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub event_keyword: SyntaxToken,
        pub ty: TypeSyntax,
        pub explicit_interface_specifier: Option<ExplicitInterfaceSpecifier>,
        pub identifier: SyntaxToken,
        pub accessor_list: Option<AccessorList>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct AccessorList: AccessorList {
        pub open_brace_token: SyntaxToken,
        pub accessors: Vec<AccessorDeclaration>,
        pub close_brace_token: SyntaxToken,
    }
}

syntax_node! {
    /// `get`, `set`, `init`, `add`, `remove`, or an unknown accessor name.
    pub struct AccessorDeclaration: dyn {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub keyword: SyntaxToken,
        pub body: Option<Block>,
        pub expression_body: Option<ArrowExpressionClause>,
        pub semicolon_token: Option<SyntaxToken>,
    }
}

syntax_node! {
    pub struct ParameterList: ParameterList {
        pub open_paren_token: SyntaxToken,
        pub parameters: SeparatedList<Parameter>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct BracketedParameterList: BracketedParameterList {
        pub open_bracket_token: SyntaxToken,
        pub parameters: SeparatedList<Parameter>,
        pub close_bracket_token: SyntaxToken,
    }
}

syntax_node! {
    /// A parameter. `__arglist` has no type; its identifier is the keyword.
    pub struct Parameter: Parameter {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub ty: Option<TypeSyntax>,
        pub identifier: SyntaxToken,
        pub default: Option<EqualsValueClause>,
    }
}

syntax_node! {
    /// A member that could not be completed: whatever attributes, modifiers
    /// and type were recognized before parsing gave up.
    pub struct IncompleteMember: IncompleteMember {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub ty: Option<TypeSyntax>,
    }
}

syntax_node! {
    /// A top-level statement.
    pub struct GlobalStatement: GlobalStatement {
        pub attribute_lists: Vec<AttributeList>,
        pub modifiers: Vec<SyntaxToken>,
        pub statement: StatementSyntax,
    }
}

syntax_enum! {
    pub enum MemberDeclaration {
        Namespace(NamespaceDeclaration),
        FileScopedNamespace(FileScopedNamespaceDeclaration),
        Class(ClassDeclaration),
        Struct(StructDeclaration),
        Interface(InterfaceDeclaration),
        Enum(EnumDeclaration),
        Delegate(DelegateDeclaration),
        Field(FieldDeclaration),
        EventField(EventFieldDeclaration),
        Method(MethodDeclaration),
        Operator(OperatorDeclaration),
        ConversionOperator(ConversionOperatorDeclaration),
        Constructor(ConstructorDeclaration),
        Destructor(DestructorDeclaration),
        Property(PropertyDeclaration),
        Indexer(IndexerDeclaration),
        Event(EventDeclaration),
        Incomplete(IncompleteMember),
        GlobalStatement(GlobalStatement),
    }
}

impl_from_nodes!(MemberDeclaration {
    Namespace(NamespaceDeclaration),
    FileScopedNamespace(FileScopedNamespaceDeclaration),
    Class(ClassDeclaration),
    Struct(StructDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Delegate(DelegateDeclaration),
    Field(FieldDeclaration),
    EventField(EventFieldDeclaration),
    Method(MethodDeclaration),
    Operator(OperatorDeclaration),
    ConversionOperator(ConversionOperatorDeclaration),
    Constructor(ConstructorDeclaration),
    Destructor(DestructorDeclaration),
    Property(PropertyDeclaration),
    Indexer(IndexerDeclaration),
    Event(EventDeclaration),
    Incomplete(IncompleteMember),
    GlobalStatement(GlobalStatement),
});

// ============================================================================
// Capability traits
// ============================================================================

/// Members carry attribute lists and modifiers.
pub trait MemberDeclarationSyntax {
    fn attribute_lists(&self) -> &[AttributeList];
    fn modifiers(&self) -> &[SyntaxToken];

    fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifiers().iter().any(|m| m.kind == kind)
    }
}

macro_rules! member_declaration_syntax {
    ($($name:ident),* $(,)?) => {
        $(
            impl MemberDeclarationSyntax for $name {
                fn attribute_lists(&self) -> &[AttributeList] {
                    &self.attribute_lists
                }
                fn modifiers(&self) -> &[SyntaxToken] {
                    &self.modifiers
                }
            }
        )*
    };
}

member_declaration_syntax!(
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    EnumMemberDeclaration,
    DelegateDeclaration,
    FieldDeclaration,
    EventFieldDeclaration,
    MethodDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    ConstructorDeclaration,
    DestructorDeclaration,
    PropertyDeclaration,
    IndexerDeclaration,
    EventDeclaration,
    IncompleteMember,
    GlobalStatement,
);

impl MemberDeclaration {
    /// The variant as a `MemberDeclarationSyntax` trait object.
    pub fn as_member(&self) -> &dyn MemberDeclarationSyntax {
        match self {
            MemberDeclaration::Namespace(n) => n,
            MemberDeclaration::FileScopedNamespace(n) => n,
            MemberDeclaration::Class(n) => n,
            MemberDeclaration::Struct(n) => n,
            MemberDeclaration::Interface(n) => n,
            MemberDeclaration::Enum(n) => n,
            MemberDeclaration::Delegate(n) => n,
            MemberDeclaration::Field(n) => n,
            MemberDeclaration::EventField(n) => n,
            MemberDeclaration::Method(n) => n,
            MemberDeclaration::Operator(n) => n,
            MemberDeclaration::ConversionOperator(n) => n,
            MemberDeclaration::Constructor(n) => n,
            MemberDeclaration::Destructor(n) => n,
            MemberDeclaration::Property(n) => n,
            MemberDeclaration::Indexer(n) => n,
            MemberDeclaration::Event(n) => n,
            MemberDeclaration::Incomplete(n) => n,
            MemberDeclaration::GlobalStatement(n) => n,
        }
    }

    /// Class, struct or interface declarations viewed through their shared shape.
    pub fn as_type_declaration(&self) -> Option<&dyn TypeDeclarationSyntax> {
        match self {
            MemberDeclaration::Class(n) => Some(n),
            MemberDeclaration::Struct(n) => Some(n),
            MemberDeclaration::Interface(n) => Some(n),
            _ => None,
        }
    }

    /// Whether this member may appear directly in a namespace.
    pub fn is_type_or_namespace(&self) -> bool {
        matches!(
            self,
            MemberDeclaration::Namespace(_)
                | MemberDeclaration::FileScopedNamespace(_)
                | MemberDeclaration::Class(_)
                | MemberDeclaration::Struct(_)
                | MemberDeclaration::Interface(_)
                | MemberDeclaration::Enum(_)
                | MemberDeclaration::Delegate(_)
        )
    }
}

/// The shape shared by class, struct and interface declarations.
pub trait TypeDeclarationSyntax: MemberDeclarationSyntax {
    fn keyword(&self) -> &SyntaxToken;
    fn identifier(&self) -> &SyntaxToken;
    fn type_parameter_list(&self) -> Option<&TypeParameterList>;
    fn base_list(&self) -> Option<&BaseList>;
    fn constraint_clauses(&self) -> &[TypeParameterConstraintClause];
    fn open_brace_token(&self) -> Option<&SyntaxToken>;
    fn members(&self) -> &[MemberDeclaration];
    fn close_brace_token(&self) -> Option<&SyntaxToken>;
    fn semicolon_token(&self) -> Option<&SyntaxToken>;

    fn arity(&self) -> usize {
        self.type_parameter_list().map_or(0, |l| l.parameters.len())
    }
}
