//! Symbolic differentiation.

use crate::symbolic::expr::{Condition, Expr, Func, Symbol};

/// `d expr / d var`, simplified only by the canonical constructors.
///
/// Undefined functions stay unevaluated: `f(x)` becomes `Derivative(f(x), x)` and a composite
/// argument goes through the chain rule with an evaluation point, `Subs(Derivative(f(xi), xi),
/// xi, x**2)*2*x`.
pub fn diff(expr: &Expr, var: &Symbol) -> Expr {
    if !expr.depends_on(var) {
        return Expr::zero();
    }
    match expr {
        Expr::Number(_) | Expr::Constant(_) => Expr::zero(),
        Expr::Symbol(s) => {
            if s == var {
                Expr::one()
            } else {
                Expr::zero()
            }
        }
        Expr::Add(terms) => Expr::add(terms.iter().map(|t| diff(t, var)).collect()),
        Expr::Mul(factors) => {
            let mut terms = Vec::with_capacity(factors.len());
            for (i, f) in factors.iter().enumerate() {
                let d = diff(f, var);
                if d.is_zero() {
                    continue;
                }
                let mut product: Vec<Expr> = factors
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, g)| g.clone())
                    .collect();
                product.push(d);
                terms.push(Expr::mul(product));
            }
            Expr::add(terms)
        }
        Expr::Pow(base, exp) => diff_pow(base, exp, var),
        Expr::Func(f, arg) => {
            let outer = func_derivative(*f, arg);
            Expr::mul(vec![outer, diff(arg, var)])
        }
        Expr::Applied { name, args } => diff_applied(expr, name, args, var),
        Expr::Derivative { .. } => Expr::derivative(expr.clone(), var.clone()),
        Expr::Subs {
            expr: body,
            var: bound,
            point,
        } => {
            let mut terms = Vec::new();
            if bound != var {
                terms.push(Expr::subs_at(diff(body, var), bound.clone(), (**point).clone()));
            }
            let dp = diff(point, var);
            if !dp.is_zero() {
                let inner = Expr::subs_at(diff(body, bound), bound.clone(), (**point).clone());
                terms.push(Expr::mul(vec![inner, dp]));
            }
            Expr::add(terms)
        }
        Expr::Integral {
            integrand,
            var: bound,
        } => {
            if bound == var {
                (**integrand).clone()
            } else {
                Expr::integral(diff(integrand, var), bound.clone())
            }
        }
        Expr::Piecewise(pieces) => Expr::piecewise(
            pieces
                .iter()
                .map(|(e, c)| (diff(e, var), c.clone()))
                .collect::<Vec<(Expr, Condition)>>(),
        ),
    }
}

fn diff_pow(base: &Expr, exp: &Expr, var: &Symbol) -> Expr {
    let db = diff(base, var);
    let de = diff(exp, var);
    let power = Expr::pow(base.clone(), exp.clone());
    if de.is_zero() {
        // n * b**(n-1) * b'
        return Expr::mul(vec![
            exp.clone(),
            Expr::pow(base.clone(), Expr::sub(exp.clone(), Expr::one())),
            db,
        ]);
    }
    let log_b = Expr::func(Func::Log, base.clone());
    if db.is_zero() {
        return Expr::mul(vec![power, log_b, de]);
    }
    Expr::mul(vec![
        power,
        Expr::add(vec![
            Expr::mul(vec![de, log_b]),
            Expr::mul(vec![exp.clone(), db, Expr::recip(base.clone())]),
        ]),
    ])
}

/// `f'(u)` for a built-in `f`.
fn func_derivative(f: Func, u: &Expr) -> Expr {
    let call = |g: Func| Expr::func(g, u.clone());
    let square = |e: Expr| Expr::pow(e, Expr::int(2));
    match f {
        Func::Sin => call(Func::Cos),
        Func::Cos => Expr::neg(call(Func::Sin)),
        Func::Tan => Expr::add(vec![square(call(Func::Tan)), Expr::one()]),
        Func::Cot => Expr::neg(Expr::add(vec![square(call(Func::Cot)), Expr::one()])),
        Func::Sec => Expr::mul(vec![call(Func::Tan), call(Func::Sec)]),
        Func::Csc => Expr::neg(Expr::mul(vec![call(Func::Cot), call(Func::Csc)])),
        Func::Asin => Expr::pow(
            Expr::sub(Expr::one(), square(u.clone())),
            Expr::frac(-1, 2),
        ),
        Func::Acos => Expr::neg(Expr::pow(
            Expr::sub(Expr::one(), square(u.clone())),
            Expr::frac(-1, 2),
        )),
        Func::Atan => Expr::recip(Expr::add(vec![square(u.clone()), Expr::one()])),
        Func::Sinh => call(Func::Cosh),
        Func::Cosh => call(Func::Sinh),
        Func::Tanh => Expr::sub(Expr::one(), square(call(Func::Tanh))),
        Func::Exp => call(Func::Exp),
        Func::Log => Expr::recip(u.clone()),
        Func::Abs => call(Func::Sign),
        Func::Sign => Expr::zero(),
    }
}

fn diff_applied(whole: &Expr, name: &str, args: &[Expr], var: &Symbol) -> Expr {
    let var_expr = Expr::symbol(var.clone());
    let mut terms = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        if !arg.depends_on(var) {
            continue;
        }
        let only_here = args
            .iter()
            .enumerate()
            .all(|(j, other)| j == i || !other.depends_on(var));
        if *arg == var_expr && only_here {
            terms.push(Expr::derivative(whole.clone(), var.clone()));
            continue;
        }
        let xi = Symbol::dummy(format!("xi_{}", i + 1));
        let mut replaced = args.to_vec();
        replaced[i] = Expr::symbol(xi.clone());
        let inner = Expr::derivative(Expr::applied(name, replaced), xi.clone());
        terms.push(Expr::mul(vec![
            Expr::subs_at(inner, xi, arg.clone()),
            diff(arg, var),
        ]));
    }
    Expr::add(terms)
}

#[cfg(test)]
#[path = "../../tests/unit/symbolic/diff.rs"]
mod tests;
