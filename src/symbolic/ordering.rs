//! Total orders over expressions.
//!
//! `cmp_exprs` is the canonical order used when building sums, `cmp_factors` the one used for
//! products (numbers first, then by base so `x` and `x**2` sit together). `print_order` is the
//! reading order of a sum: highest degree first, positive before negative, constants last.

use std::cmp::Ordering;

use crate::symbolic::expr::{Condition, Expr};

fn rank(e: &Expr) -> u8 {
    match e {
        Expr::Number(_) => 0,
        Expr::Constant(_) => 1,
        Expr::Symbol(_) => 2,
        Expr::Pow(..) => 3,
        Expr::Mul(_) => 4,
        Expr::Add(_) => 5,
        Expr::Func(..) => 6,
        Expr::Applied { .. } => 7,
        Expr::Derivative { .. } => 8,
        Expr::Subs { .. } => 9,
        Expr::Integral { .. } => 10,
        Expr::Piecewise(_) => 11,
    }
}

/// Canonical total order.
pub fn cmp_exprs(a: &Expr, b: &Expr) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
        (Expr::Number(x), Expr::Number(y)) => x.total_cmp(y),
        (Expr::Constant(x), Expr::Constant(y)) => x.cmp(y),
        (Expr::Symbol(x), Expr::Symbol(y)) => x.cmp(y),
        (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) => cmp_exprs(b1, b2).then_with(|| cmp_exprs(e1, e2)),
        (Expr::Mul(x), Expr::Mul(y)) | (Expr::Add(x), Expr::Add(y)) => cmp_slices(x, y),
        (Expr::Func(f1, u1), Expr::Func(f2, u2)) => f1.cmp(f2).then_with(|| cmp_exprs(u1, u2)),
        (
            Expr::Applied { name: n1, args: a1 },
            Expr::Applied { name: n2, args: a2 },
        ) => n1.cmp(n2).then_with(|| cmp_slices(a1, a2)),
        (
            Expr::Derivative { expr: e1, var: v1 },
            Expr::Derivative { expr: e2, var: v2 },
        ) => v1.cmp(v2).then_with(|| cmp_exprs(e1, e2)),
        (
            Expr::Subs {
                expr: e1,
                var: v1,
                point: p1,
            },
            Expr::Subs {
                expr: e2,
                var: v2,
                point: p2,
            },
        ) => v1
            .cmp(v2)
            .then_with(|| cmp_exprs(p1, p2))
            .then_with(|| cmp_exprs(e1, e2)),
        (
            Expr::Integral {
                integrand: i1,
                var: v1,
            },
            Expr::Integral {
                integrand: i2,
                var: v2,
            },
        ) => v1.cmp(v2).then_with(|| cmp_exprs(i1, i2)),
        (Expr::Piecewise(p1), Expr::Piecewise(p2)) => {
            for ((e1, c1), (e2, c2)) in p1.iter().zip(p2.iter()) {
                let o = cmp_exprs(e1, e2).then_with(|| cmp_conditions(c1, c2));
                if o != Ordering::Equal {
                    return o;
                }
            }
            p1.len().cmp(&p2.len())
        }
        _ => Ordering::Equal,
    })
}

fn cmp_conditions(a: &Condition, b: &Condition) -> Ordering {
    match (a, b) {
        (Condition::Equals(l1, r1), Condition::Equals(l2, r2)) => {
            cmp_exprs(l1, l2).then_with(|| cmp_exprs(r1, r2))
        }
        (Condition::Equals(..), Condition::Otherwise) => Ordering::Less,
        (Condition::Otherwise, Condition::Equals(..)) => Ordering::Greater,
        (Condition::Otherwise, Condition::Otherwise) => Ordering::Equal,
    }
}

fn cmp_slices(a: &[Expr], b: &[Expr]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let o = cmp_exprs(x, y);
        if o != Ordering::Equal {
            return o;
        }
    }
    a.len().cmp(&b.len())
}

/// Order of factors inside a product.
pub fn cmp_factors(a: &Expr, b: &Expr) -> Ordering {
    let (ba, ea) = a.as_base_exp();
    let (bb, eb) = b.as_base_exp();
    let num = |e: &Expr| !matches!(e, Expr::Number(_));
    num(a)
        .cmp(&num(b))
        .then_with(|| cmp_exprs(&ba, &bb))
        .then_with(|| cmp_exprs(&ea, &eb))
}

/// Polynomial-style degree used only for display ordering.
pub fn degree(e: &Expr) -> f64 {
    match e {
        Expr::Symbol(_) => 1.0,
        Expr::Pow(b, ex) => match ex.as_number() {
            Some(n) => degree(b) * n.to_f64(),
            None if b.is_symbol() => 0.5,
            None => 0.0,
        },
        Expr::Mul(fs) => fs.iter().map(degree).sum(),
        Expr::Add(ts) => ts.iter().map(degree).fold(0.0, f64::max),
        _ => 0.0,
    }
}

/// Reading order of the terms of a sum.
pub fn print_order(terms: &[Expr]) -> Vec<&Expr> {
    let mut out: Vec<&Expr> = terms.iter().collect();
    out.sort_by(|a, b| {
        let is_num = |e: &Expr| matches!(e, Expr::Number(_));
        let negative = |e: &Expr| e.split_coefficient().0.is_negative();
        is_num(a)
            .cmp(&is_num(b))
            .then_with(|| degree(b).total_cmp(&degree(a)))
            .then_with(|| negative(a).cmp(&negative(b)))
    });
    out
}

