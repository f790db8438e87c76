// AST (Abstract Syntax Tree) definitions for Quill programs
//
// Every node keeps the token its production started at. It is only used for
// diagnostics; later phases must not give it meaning.

use super::token::{Kind, Token};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Relational
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
    // Shift
    Shl,
    Shr,
}

impl BinOp {
    pub fn from_kind(kind: Kind) -> Option<Self> {
        let op = match kind {
            Kind::Bar => BinOp::Or,
            Kind::And => BinOp::And,
            Kind::Equal => BinOp::Eq,
            Kind::NotEqual => BinOp::Ne,
            Kind::Lt => BinOp::Lt,
            Kind::Gt => BinOp::Gt,
            Kind::Le => BinOp::Le,
            Kind::Ge => BinOp::Ge,
            Kind::Plus => BinOp::Add,
            Kind::Minus => BinOp::Sub,
            Kind::Times => BinOp::Mul,
            Kind::Div => BinOp::Div,
            Kind::LShift => BinOp::Shl,
            Kind::RShift => BinOp::Shr,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "|",
            BinOp::And => "&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not, // !x
    Neg, // -x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Not => "!",
            UnOp::Neg => "-",
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub imports: Vec<QualifiedName>,
    pub class_name: String,
    pub block: Block,
    pub first_token: Token,
}

/// Dotted import path, stored with `/` separators (`a.b.c` becomes `a/b/c`).
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub name: String,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub elems: Vec<BlockElem>,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockElem {
    Declaration(Declaration),
    Statement(Statement),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Var(VarDec),
    Closure(ClosureDec),
}

/// Variable declaration. Without a `: Type` annotation the type is
/// [`Type::Undeclared`].
#[derive(Debug, Clone, PartialEq)]
pub struct VarDec {
    pub name: String,
    pub var_type: Type,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosureDec {
    pub name: String,
    pub closure: Closure,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub formal_args: Vec<VarDec>,
    pub body: Vec<Statement>,
    pub first_token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKind {
    Int,
    Boolean,
    String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleType {
    pub kind: SimpleKind,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Simple(SimpleType),
    List {
        element: Box<Type>,
        first_token: Token,
    },
    KeyValue {
        key: SimpleType,
        value: Box<Type>,
        first_token: Token,
    },
    /// No annotation was written; a later inference phase resolves it.
    Undeclared { first_token: Token },
}

impl Type {
    pub fn first_token(&self) -> &Token {
        match self {
            Type::Simple(simple) => &simple.first_token,
            Type::List { first_token, .. }
            | Type::KeyValue { first_token, .. }
            | Type::Undeclared { first_token } => first_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment {
        lvalue: LValue,
        expr: Expression,
        first_token: Token,
    },
    Print {
        expr: Expression,
        first_token: Token,
    },
    While {
        condition: Expression,
        block: Block,
        first_token: Token,
    },
    WhileStar {
        condition: Expression,
        block: Block,
        first_token: Token,
    },
    WhileRange {
        range: RangeExpression,
        block: Block,
        first_token: Token,
    },
    If {
        condition: Expression,
        block: Block,
        first_token: Token,
    },
    IfElse {
        condition: Expression,
        then_block: Block,
        else_block: Block,
        first_token: Token,
    },
    /// `%expr`
    Expression {
        expr: Expression,
        first_token: Token,
    },
    Return {
        expr: Expression,
        first_token: Token,
    },
}

impl Statement {
    pub fn first_token(&self) -> &Token {
        match self {
            Statement::Assignment { first_token, .. }
            | Statement::Print { first_token, .. }
            | Statement::While { first_token, .. }
            | Statement::WhileStar { first_token, .. }
            | Statement::WhileRange { first_token, .. }
            | Statement::If { first_token, .. }
            | Statement::IfElse { first_token, .. }
            | Statement::Expression { first_token, .. }
            | Statement::Return { first_token, .. } => first_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Ident {
        name: String,
        first_token: Token,
    },
    Indexed {
        name: String,
        index: Expression,
        first_token: Token,
    },
}

/// `low..high`, legal only as the condition of `while*`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpression {
    pub low: Box<Expression>,
    pub high: Box<Expression>,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpression {
    pub key: Expression,
    pub value: Expression,
    pub first_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
        first_token: Token,
    },
    Unary {
        op: UnOp,
        operand: Box<Expression>,
        first_token: Token,
    },
    IntLit {
        value: i32,
        first_token: Token,
    },
    BooleanLit {
        value: bool,
        first_token: Token,
    },
    StringLit {
        value: String,
        first_token: Token,
    },
    Ident {
        name: String,
        first_token: Token,
    },
    /// `name[index]` on a list or map
    IndexedAccess {
        name: String,
        index: Box<Expression>,
        first_token: Token,
    },
    ClosureEval {
        name: String,
        args: Vec<Expression>,
        first_token: Token,
    },
    ClosureLiteral {
        closure: Closure,
        first_token: Token,
    },
    Size {
        expr: Box<Expression>,
        first_token: Token,
    },
    Key {
        expr: Box<Expression>,
        first_token: Token,
    },
    Value {
        expr: Box<Expression>,
        first_token: Token,
    },
    List {
        elements: Vec<Expression>,
        first_token: Token,
    },
    MapList {
        entries: Vec<KeyValueExpression>,
        first_token: Token,
    },
    Range(RangeExpression),
}

impl Expression {
    /// Get the token this expression started at
    pub fn first_token(&self) -> &Token {
        match self {
            Expression::Binary { first_token, .. }
            | Expression::Unary { first_token, .. }
            | Expression::IntLit { first_token, .. }
            | Expression::BooleanLit { first_token, .. }
            | Expression::StringLit { first_token, .. }
            | Expression::Ident { first_token, .. }
            | Expression::IndexedAccess { first_token, .. }
            | Expression::ClosureEval { first_token, .. }
            | Expression::ClosureLiteral { first_token, .. }
            | Expression::Size { first_token, .. }
            | Expression::Key { first_token, .. }
            | Expression::Value { first_token, .. }
            | Expression::List { first_token, .. }
            | Expression::MapList { first_token, .. } => first_token,
            Expression::Range(range) => &range.first_token,
        }
    }
}
