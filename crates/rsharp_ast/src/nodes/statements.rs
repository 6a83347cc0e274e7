//! Statements.

use crate::node::SeparatedList;
use crate::nodes::{BracketedArgumentList, ExpressionSyntax, TypeSyntax};
use crate::token::SyntaxToken;
use crate::{impl_from_nodes, syntax_enum, syntax_node};

syntax_node! {
    pub struct Block: Block {
        pub open_brace_token: SyntaxToken,
        pub statements: Vec<StatementSyntax>,
        pub close_brace_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct EmptyStatement: EmptyStatement {
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ExpressionStatement: ExpressionStatement {
        pub expression: ExpressionSyntax,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    /// `T a = 1, b;` shared by fields, events, locals and `for` initializers.
    pub struct VariableDeclaration: VariableDeclaration {
        pub ty: TypeSyntax,
        pub variables: SeparatedList<VariableDeclarator>,
    }
}

syntax_node! {
    pub struct VariableDeclarator: VariableDeclarator {
        pub identifier: SyntaxToken,
        /// `[size]`, used by fixed-size buffers.
        pub argument_list: Option<BracketedArgumentList>,
        pub initializer: Option<EqualsValueClause>,
    }
}

syntax_node! {
    pub struct EqualsValueClause: EqualsValueClause {
        pub equals_token: SyntaxToken,
        pub value: ExpressionSyntax,
    }
}

syntax_node! {
    pub struct LocalDeclarationStatement: LocalDeclarationStatement {
        pub modifiers: Vec<SyntaxToken>,
        pub declaration: VariableDeclaration,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ReturnStatement: ReturnStatement {
        pub return_keyword: SyntaxToken,
        pub expression: Option<ExpressionSyntax>,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ThrowStatement: ThrowStatement {
        pub throw_keyword: SyntaxToken,
        pub expression: Option<ExpressionSyntax>,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct BreakStatement: BreakStatement {
        pub break_keyword: SyntaxToken,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ContinueStatement: ContinueStatement {
        pub continue_keyword: SyntaxToken,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    /// `yield return expr;` or `yield break;`.
    pub struct YieldStatement: dyn {
        pub yield_keyword: SyntaxToken,
        pub return_or_break_keyword: SyntaxToken,
        pub expression: Option<ExpressionSyntax>,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct IfStatement: IfStatement {
        pub if_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub condition: ExpressionSyntax,
        pub close_paren_token: SyntaxToken,
        pub statement: Box<StatementSyntax>,
        pub else_clause: Option<ElseClause>,
    }
}

syntax_node! {
    pub struct ElseClause: ElseClause {
        pub else_keyword: SyntaxToken,
        pub statement: Box<StatementSyntax>,
    }
}

syntax_node! {
    pub struct WhileStatement: WhileStatement {
        pub while_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub condition: ExpressionSyntax,
        pub close_paren_token: SyntaxToken,
        pub statement: Box<StatementSyntax>,
    }
}

syntax_node! {
    pub struct DoStatement: DoStatement {
        pub do_keyword: SyntaxToken,
        pub statement: Box<StatementSyntax>,
        pub while_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub condition: ExpressionSyntax,
        pub close_paren_token: SyntaxToken,
        pub semicolon_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct ForStatement: ForStatement {
        pub for_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub declaration: Option<VariableDeclaration>,
        pub initializers: SeparatedList<ExpressionSyntax>,
        pub first_semicolon_token: SyntaxToken,
        pub condition: Option<ExpressionSyntax>,
        pub second_semicolon_token: SyntaxToken,
        pub incrementors: SeparatedList<ExpressionSyntax>,
        pub close_paren_token: SyntaxToken,
        pub statement: Box<StatementSyntax>,
    }
}

syntax_node! {
    pub struct ForEachStatement: ForEachStatement {
        pub foreach_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub ty: TypeSyntax,
        pub identifier: SyntaxToken,
        pub in_keyword: SyntaxToken,
        pub expression: ExpressionSyntax,
        pub close_paren_token: SyntaxToken,
        pub statement: Box<StatementSyntax>,
    }
}

syntax_node! {
    pub struct TryStatement: TryStatement {
        pub try_keyword: SyntaxToken,
        pub block: Block,
        pub catches: Vec<CatchClause>,
        pub finally: Option<FinallyClause>,
    }
}

syntax_node! {
    pub struct CatchClause: CatchClause {
        pub catch_keyword: SyntaxToken,
        pub declaration: Option<CatchDeclaration>,
        pub filter: Option<CatchFilterClause>,
        pub block: Block,
    }
}

syntax_node! {
    pub struct CatchDeclaration: CatchDeclaration {
        pub open_paren_token: SyntaxToken,
        pub ty: TypeSyntax,
        pub identifier: Option<SyntaxToken>,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct CatchFilterClause: CatchFilterClause {
        pub when_keyword: SyntaxToken,
        pub open_paren_token: SyntaxToken,
        pub filter_expression: ExpressionSyntax,
        pub close_paren_token: SyntaxToken,
    }
}

syntax_node! {
    pub struct FinallyClause: FinallyClause {
        pub finally_keyword: SyntaxToken,
        pub block: Block,
    }
}

syntax_enum! {
    pub enum StatementSyntax {
        Block(Block),
        Empty(EmptyStatement),
        Expression(ExpressionStatement),
        LocalDeclaration(LocalDeclarationStatement),
        Return(ReturnStatement),
        Throw(ThrowStatement),
        Break(BreakStatement),
        Continue(ContinueStatement),
        Yield(YieldStatement),
        If(IfStatement),
        While(WhileStatement),
        Do(DoStatement),
        For(ForStatement),
        ForEach(ForEachStatement),
        Try(TryStatement),
    }
}

impl_from_nodes!(StatementSyntax {
    Block(Block),
    Empty(EmptyStatement),
    Expression(ExpressionStatement),
    LocalDeclaration(LocalDeclarationStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Yield(YieldStatement),
    If(IfStatement),
    While(WhileStatement),
    Do(DoStatement),
    For(ForStatement),
    ForEach(ForEachStatement),
    Try(TryStatement),
});
