use super::*;

fn x() -> Expr {
    Expr::symbol(Symbol::new("x"))
}

fn y() -> Expr {
    Expr::symbol(Symbol::new("y"))
}

#[test]
fn sums_collect_like_terms() {
    let e = Expr::add(vec![x(), x(), Expr::int(1), Expr::int(2)]);
    assert_eq!(e.to_string(), "2*x + 3");

    let e = Expr::sub(x(), x());
    assert!(e.is_zero());
}

#[test]
fn sums_are_order_independent() {
    let a = Expr::add(vec![x(), y(), Expr::int(1)]);
    let b = Expr::add(vec![Expr::int(1), y(), x()]);
    assert_eq!(a, b);
}

#[test]
fn products_merge_powers() {
    let e = Expr::mul(vec![x(), x(), Expr::pow(x(), Expr::int(3))]);
    assert_eq!(e, Expr::pow(x(), Expr::int(5)));

    let e = Expr::mul(vec![x(), Expr::recip(x())]);
    assert!(e.is_one());

    let e = Expr::mul(vec![Expr::int(0), x()]);
    assert!(e.is_zero());
}

#[test]
fn numeric_coefficient_distributes_over_a_single_sum() {
    let e = Expr::mul(vec![Expr::int(2), Expr::add(vec![x(), Expr::one()])]);
    assert_eq!(e.to_string(), "2*x + 2");
}

#[test]
fn powers_fold_numbers_and_roots() {
    assert_eq!(Expr::pow(Expr::int(2), Expr::int(10)), Expr::int(1024));
    assert_eq!(Expr::pow(Expr::int(4), Expr::frac(1, 2)), Expr::int(2));
    assert_eq!(Expr::pow(Expr::int(8), Expr::frac(-1, 3)), Expr::frac(1, 2));
    assert_eq!(
        Expr::pow(Expr::zero(), Expr::minus_one()),
        Expr::Constant(Constant::ComplexInfinity)
    );
    assert_eq!(Expr::sqrt(Expr::int(2)).to_string(), "sqrt(2)");
}

#[test]
fn nested_integer_powers_multiply() {
    let e = Expr::pow(Expr::pow(x(), Expr::int(2)), Expr::int(3));
    assert_eq!(e, Expr::pow(x(), Expr::int(6)));
}

#[test]
fn e_powers_become_exp() {
    let e = Expr::pow(Expr::Constant(Constant::E), x());
    assert_eq!(e, Expr::func(Func::Exp, x()));
    let e = Expr::mul(vec![Expr::func(Func::Exp, x()), Expr::func(Func::Exp, y())]);
    assert_eq!(e.to_string(), "exp(x + y)");
}

#[test]
fn imaginary_unit_cycles() {
    let i = Expr::Constant(Constant::I);
    assert_eq!(Expr::pow(i.clone(), Expr::int(2)), Expr::minus_one());
    assert_eq!(Expr::pow(i.clone(), Expr::int(4)), Expr::one());
}

#[test]
fn functions_evaluate_special_values_and_parity() {
    assert!(Expr::func(Func::Sin, Expr::zero()).is_zero());
    assert!(Expr::func(Func::Cos, Expr::zero()).is_one());
    assert!(Expr::func(Func::Log, Expr::one()).is_zero());
    assert_eq!(Expr::func(Func::Sin, Expr::neg(x())).to_string(), "-sin(x)");
    assert_eq!(Expr::func(Func::Cos, Expr::neg(x())).to_string(), "cos(x)");
    assert_eq!(
        Expr::func(Func::Exp, Expr::func(Func::Log, x())),
        x()
    );
}

#[test]
fn free_symbols_skip_bound_variables() {
    let integral = Expr::integral(Expr::mul(vec![x(), y()]), Symbol::new("x"));
    let free: Vec<String> = integral
        .free_symbols()
        .into_iter()
        .map(|s| s.name().to_owned())
        .collect();
    assert_eq!(free, vec!["y".to_owned()]);
}

#[test]
fn integer_and_generic_symbols_differ() {
    assert_ne!(Symbol::new("n"), Symbol::integer("n"));
    assert_eq!(Symbol::integer("n").kind(), SymbolKind::Integer);
}

#[test]
fn expand_distributes_and_multiplies_out_powers() {
    let e = Expr::pow(Expr::add(vec![x(), Expr::one()]), Expr::int(2));
    assert_eq!(e.expand().to_string(), "x**2 + 2*x + 1");

    let e = Expr::mul(vec![x(), Expr::add(vec![x(), y()])]);
    assert_eq!(e.expand().to_string(), "x**2 + x*y");
}

#[test]
fn display_uses_fractions_and_signs() {
    let e = Expr::div(x(), Expr::int(2));
    assert_eq!(e.to_string(), "x/2");
    let e = Expr::sub(Expr::recip(x()), y());
    assert_eq!(e.to_string(), "-y + 1/x");
    let e = Expr::div(Expr::one(), Expr::mul(vec![x(), y()]));
    assert_eq!(e.to_string(), "1/(x*y)");
}

fn oo() -> Expr {
    Expr::Constant(Constant::Infinity)
}

fn zoo() -> Expr {
    Expr::Constant(Constant::ComplexInfinity)
}

#[test]
fn zero_times_an_infinity_is_nan() {
    assert!(Expr::mul(vec![Expr::zero(), oo()]).is_nan());
    assert!(Expr::mul(vec![zoo(), Expr::zero()]).is_nan());
    assert!(Expr::div(Expr::zero(), Expr::zero()).is_nan());
    assert!(Expr::mul(vec![x(), Expr::div(Expr::zero(), Expr::zero())]).is_nan());
}

#[test]
fn opposing_infinities_do_not_cancel() {
    assert!(Expr::sub(oo(), oo()).is_nan());
    assert!(Expr::add(vec![zoo(), zoo()]).is_nan());
    assert!(Expr::add(vec![zoo(), oo()]).is_nan());
    assert_eq!(Expr::add(vec![oo(), oo()]), oo());
    assert_eq!(Expr::add(vec![oo(), Expr::int(5)]), oo());
    assert_eq!(Expr::add(vec![x(), oo()]).to_string(), "x + oo");
}

#[test]
fn infinities_keep_only_their_sign() {
    assert_eq!(Expr::mul(vec![Expr::int(2), oo()]), oo());
    assert_eq!(Expr::mul(vec![Expr::int(-3), oo()]), Expr::neg(oo()));
    assert_eq!(Expr::mul(vec![Expr::int(-3), zoo()]), zoo());
    assert_eq!(Expr::pow(oo(), Expr::int(2)), oo());
    assert!(Expr::pow(oo(), Expr::minus_one()).is_zero());
}

#[test]
fn nan_absorbs_everything() {
    let nan = Expr::nan();
    assert!(Expr::add(vec![x(), nan.clone()]).is_nan());
    assert!(Expr::mul(vec![Expr::zero(), nan.clone()]).is_nan());
    assert!(Expr::pow(x(), nan.clone()).is_nan());
    assert!(Expr::func(Func::Sin, nan.clone()).is_nan());
    assert_eq!(nan.to_string(), "nan");
}
