use crate::symbolic::expr::Expr;

/// Replace every free occurrence of `from` in `expr` with `to`.
///
/// Matching is structural. Variables bound by an integral or an evaluation point shadow `from`
/// inside their body.
pub fn subs(expr: &Expr, from: &Expr, to: &Expr) -> Expr {
    if expr == from {
        return to.clone();
    }
    let shadowed = |var| from.as_symbol() == Some(var);
    match expr {
        Expr::Integral { var, .. } if shadowed(var) => expr.clone(),
        Expr::Subs { expr: body, var, point } if shadowed(var) => {
            Expr::subs_at((**body).clone(), var.clone(), subs(point, from, to))
        }
        _ => expr.map_children(&mut |c| subs(c, from, to)),
    }
}
