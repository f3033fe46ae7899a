use crate::expression::lexer::Span;

/// Untyped syntax tree; names are resolved later by [`crate::expression::bind`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Ast {
    Int(i64),
    Float(f64),
    Ident {
        name: String,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Ast>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    /// Left-associative run of one precedence level: `first op1 r1 op2 r2 ...`.
    Chain {
        first: Box<Ast>,
        rest: Vec<(BinaryOp, Ast)>,
    },
    Call {
        func: String,
        span: Span,
        args: Vec<Ast>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}
