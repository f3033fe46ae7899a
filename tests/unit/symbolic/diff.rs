use super::*;

fn x() -> Symbol {
    Symbol::new("x")
}

fn sx() -> Expr {
    Expr::symbol(x())
}

fn d(e: &Expr) -> String {
    diff(e, &x()).to_string()
}

#[test]
fn power_rule() {
    assert_eq!(d(&Expr::pow(sx(), Expr::int(2))), "2*x");
    assert_eq!(d(&Expr::pow(sx(), Expr::int(3))), "3*x**2");
    assert_eq!(d(&Expr::recip(sx())), "-1/x**2");
}

#[test]
fn constants_and_other_symbols_vanish() {
    assert!(diff(&Expr::int(5), &x()).is_zero());
    assert!(diff(&Expr::symbol(Symbol::new("y")), &x()).is_zero());
    assert!(diff(&Expr::func(Func::Sin, Expr::symbol(Symbol::new("y"))), &x()).is_zero());
}

#[test]
fn product_and_chain_rules() {
    let e = Expr::mul(vec![sx(), Expr::func(Func::Sin, sx())]);
    assert_eq!(d(&e), "x*cos(x) + sin(x)");

    let e = Expr::func(Func::Exp, Expr::mul(vec![Expr::int(2), sx()]));
    assert_eq!(d(&e), "2*exp(2*x)");

    assert_eq!(d(&Expr::func(Func::Log, sx())), "1/x");
    assert_eq!(d(&Expr::func(Func::Tan, sx())), "tan(x)**2 + 1");
}

#[test]
fn variable_exponent() {
    let e = Expr::pow(sx(), sx());
    assert_eq!(d(&e), "x**x*(log(x) + 1)");
}

#[test]
fn undefined_functions_stay_unevaluated() {
    let f = Expr::applied("f", vec![sx()]);
    assert_eq!(d(&f), "Derivative(f(x), x)");

    let g = Expr::applied("f", vec![Expr::pow(sx(), Expr::int(2))]);
    assert_eq!(d(&g), "2*x*Subs(Derivative(f(xi_1), xi_1), xi_1, x**2)");
}

#[test]
fn derivative_of_integral_returns_integrand() {
    let f = Expr::applied("f", vec![sx()]);
    let e = Expr::integral(f.clone(), x());
    assert_eq!(diff(&e, &x()), f);
}
