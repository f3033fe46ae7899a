use crate::expression::ast::{Ast, BinaryOp, UnaryOp};
use crate::foundation::error::{MathpipeError, MathpipeResult};
use crate::symbolic::{Expr, Func, Number, Symbol};
use crate::symbols::{Binding, Builtin, SymbolEnv, UnboundPolicy};

/// Resolve every name in `ast` against `env` and build the canonical expression.
pub(crate) fn bind_ast(ast: &Ast, env: &SymbolEnv) -> MathpipeResult<Expr> {
    match ast {
        Ast::Int(v) => Ok(Expr::int(*v)),
        Ast::Float(v) => Ok(Expr::Number(Number::float(*v))),
        Ast::Ident { name, span } => bind_name(name, span.start, env),
        Ast::Unary { op, expr } => {
            let e = bind_ast(expr, env)?;
            Ok(match op {
                UnaryOp::Neg => Expr::neg(e),
                UnaryOp::Pos => e,
            })
        }
        Ast::Binary { op, left, right } => {
            let l = bind_ast(left, env)?;
            let r = bind_ast(right, env)?;
            Ok(match op {
                BinaryOp::Add => Expr::add(vec![l, r]),
                BinaryOp::Sub => Expr::sub(l, r),
                BinaryOp::Mul => Expr::mul(vec![l, r]),
                BinaryOp::Div => Expr::div(l, r),
                BinaryOp::Pow => Expr::pow(l, r),
            })
        }
        Ast::Chain { first, rest } => {
            let mut operands = Vec::with_capacity(rest.len() + 1);
            operands.push(bind_ast(first, env)?);
            for (op, operand) in rest {
                let e = bind_ast(operand, env)?;
                operands.push(match op {
                    BinaryOp::Sub => Expr::neg(e),
                    BinaryOp::Div => Expr::recip(e),
                    BinaryOp::Add | BinaryOp::Mul | BinaryOp::Pow => e,
                });
            }
            // A chain holds one precedence level; its first operator decides which.
            Ok(match rest.first() {
                Some((BinaryOp::Mul | BinaryOp::Div, _)) => Expr::mul(operands),
                _ => Expr::add(operands),
            })
        }
        Ast::Call { func, span, args } => {
            let mut out_args = Vec::with_capacity(args.len());
            for a in args {
                out_args.push(bind_ast(a, env)?);
            }
            bind_call(func, span.start, out_args, env)
        }
    }
}

fn bind_name(name: &str, offset: usize, env: &SymbolEnv) -> MathpipeResult<Expr> {
    match env.lookup(name) {
        Some(Binding::Symbol(s)) => Ok(Expr::symbol(s.clone())),
        Some(Binding::Constant(c)) => Ok(Expr::Constant(*c)),
        Some(Binding::Builtin(_) | Binding::Function(_)) => Err(MathpipeError::unbound(format!(
            "function `{name}` used without arguments at byte {offset}"
        ))),
        None => match env.policy() {
            UnboundPolicy::AutoBind => Ok(Expr::symbol(Symbol::new(name))),
            UnboundPolicy::Reject => Err(MathpipeError::unbound(format!(
                "unknown name `{name}` at byte {offset}"
            ))),
        },
    }
}

fn bind_call(
    name: &str,
    offset: usize,
    mut args: Vec<Expr>,
    env: &SymbolEnv,
) -> MathpipeResult<Expr> {
    let got = args.len();
    let arity = |expected: &str| {
        MathpipeError::parse(
            offset,
            format!("`{name}` takes {expected} argument(s), got {got}"),
        )
    };
    match env.lookup(name) {
        Some(Binding::Builtin(Builtin::Elementary(Func::Log))) if args.len() == 2 => {
            let base = args.pop().map(|b| Expr::func(Func::Log, b));
            let value = args.pop().map(|a| Expr::func(Func::Log, a));
            match (value, base) {
                (Some(v), Some(b)) => Ok(Expr::div(v, b)),
                _ => Err(arity("1 or 2")),
            }
        }
        Some(Binding::Builtin(builtin)) => {
            let builtin = *builtin;
            let [arg] = <[Expr; 1]>::try_from(args).map_err(|_| arity("1"))?;
            Ok(match builtin {
                Builtin::Elementary(f) => Expr::func(f, arg),
                Builtin::Sqrt => Expr::sqrt(arg),
            })
        }
        Some(Binding::Function(f)) => {
            if args.is_empty() {
                return Err(arity("at least 1"));
            }
            Ok(Expr::applied(f.clone(), args))
        }
        Some(Binding::Symbol(_) | Binding::Constant(_)) => Err(MathpipeError::unbound(format!(
            "`{name}` is not a function (byte {offset})"
        ))),
        None => match env.policy() {
            UnboundPolicy::AutoBind if !args.is_empty() => Ok(Expr::applied(name, args)),
            UnboundPolicy::AutoBind => Err(arity("at least 1")),
            UnboundPolicy::Reject => Err(MathpipeError::unbound(format!(
                "unknown function `{name}` at byte {offset}"
            ))),
        },
    }
}
