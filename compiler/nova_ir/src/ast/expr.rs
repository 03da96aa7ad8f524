//! Expression AST nodes (spec §3 "Expressions").

use crate::arena::Idx;
use crate::ast::common::Parameter;
use crate::ast::stmt::StmtId;
use crate::ast::ty::TypeRef;
use crate::name::Name;
use crate::span::Span;

pub type ExprId = Idx<Expr>;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    RefEq,
    RefNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
    In,
    NotIn,
    RangeInclusive,
    RangeExclusive,
    To,
    Pipeline,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    PreInc,
    PreDec,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PostfixOp {
    PostInc,
    PostDec,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TypeCheckKind {
    Is,
    IsNot,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TypeCastKind {
    As,
    AsSafe,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum JumpKind {
    Break,
    Continue,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LiteralKind {
    Int(i64),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Null,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StringPart {
    pub literal: Option<Name>,
    pub expr: Option<ExprId>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MapEntryExpr {
    pub key: ExprId,
    pub value: ExprId,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct WhenBranch {
    /// `None` denotes the `else` branch.
    pub conditions: Vec<ExprId>,
    pub body: ExprId,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CatchClause {
    pub param_name: Name,
    pub param_ty: Option<TypeRef>,
    pub body: StmtId,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LambdaParam {
    pub name: Name,
    pub ty: Option<TypeRef>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    Literal(LiteralKind),
    Identifier(Name),
    This,
    Super,

    Call {
        callee: ExprId,
        type_args: Vec<TypeRef>,
        args: Vec<ExprId>,
        /// Name of each named argument, parallel to `args`; `None` for
        /// positional arguments.
        arg_names: Vec<Option<Name>>,
        trailing_lambda: Option<ExprId>,
    },
    Member {
        receiver: ExprId,
        name: Name,
        name_span: Span,
    },
    Assign {
        target: ExprId,
        op: Option<BinaryOp>,
        value: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Postfix {
        op: PostfixOp,
        operand: ExprId,
    },
    Index {
        receiver: ExprId,
        index: ExprId,
    },
    Slice {
        receiver: ExprId,
        from: Option<ExprId>,
        to: Option<ExprId>,
    },
    Lambda {
        params: Vec<LambdaParam>,
        /// `true` when no parameter list was written and `it` is implicit.
        implicit_it: bool,
        body: StmtId,
    },
    If {
        condition: ExprId,
        /// Optional smart-cast binding introduced by the condition
        /// (`if (val x = expr) ...` / `if x is T`), named for scope lookup.
        binding: Option<Name>,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    When {
        subject: Option<ExprId>,
        branches: Vec<WhenBranch>,
    },
    Try {
        body: StmtId,
        catches: Vec<CatchClause>,
        finally: Option<StmtId>,
    },
    Await {
        operand: ExprId,
    },
    Collection {
        kind: CollectionKind,
        elements: Vec<ExprId>,
        map_entries: Vec<MapEntryExpr>,
    },
    Range {
        from: ExprId,
        to: ExprId,
        inclusive: bool,
        step: Option<ExprId>,
    },
    StringInterpolation(Vec<StringPart>),
    TypeCheck {
        kind: TypeCheckKind,
        operand: ExprId,
        ty: TypeRef,
    },
    TypeCast {
        kind: TypeCastKind,
        operand: ExprId,
        ty: TypeRef,
    },
    Spread {
        operand: ExprId,
    },
    Pipeline {
        left: ExprId,
        right: ExprId,
    },
    MethodRef {
        receiver: Option<ExprId>,
        method_name: Name,
    },
    ObjectLiteral {
        super_type: Option<TypeRef>,
        members: Vec<crate::ast::decl::DeclId>,
    },
    Elvis {
        left: ExprId,
        right: ExprId,
    },
    SafeCall {
        receiver: ExprId,
        name: Name,
        name_span: Span,
    },
    SafeIndex {
        receiver: ExprId,
        index: ExprId,
    },
    NotNull {
        operand: ExprId,
    },
    ErrorPropagation {
        operand: ExprId,
    },
    /// `.member` shorthand resolved against an inferred scope type.
    ScopeShorthand {
        name: Name,
    },
    Jump {
        kind: JumpKind,
        label: Option<Name>,
        value: Option<ExprId>,
    },
    /// `_` placeholder, used in destructuring and partial application.
    Placeholder,
    Conditional {
        condition: ExprId,
        then_value: ExprId,
        else_value: ExprId,
    },
    /// Produced only in tolerant-parse recovery, never in a strict parse.
    Error,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

// Every primary-constructor/lambda parameter reuses `Parameter`.
pub type ExprParameter = Parameter;
