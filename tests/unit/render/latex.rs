use super::*;
use crate::expression::parse;
use crate::symbols::{SymbolEnv, UnboundPolicy};

fn tex(src: &str) -> String {
    let env = SymbolEnv::standard(UnboundPolicy::AutoBind);
    latex(&parse(&env, src).unwrap())
}

#[test]
fn polynomials_read_by_descending_degree() {
    assert_eq!(tex("1 + 2*x + x**2"), "x^{2} + 2 x + 1");
    assert_eq!(tex("x - 1"), "x - 1");
    assert_eq!(tex("-x"), "- x");
}

#[test]
fn fractions_and_roots() {
    assert_eq!(tex("x/2"), r"\frac{x}{2}");
    assert_eq!(tex("1/x"), r"\frac{1}{x}");
    assert_eq!(tex("1/2"), r"\frac{1}{2}");
    assert_eq!(tex("(x + 1)/(y + 1)"), r"\frac{x + 1}{y + 1}");
    assert_eq!(tex("sqrt(x)"), r"\sqrt{x}");
    assert_eq!(tex("x**(1/3)"), r"\sqrt[3]{x}");
    assert_eq!(tex("(x + 1)**2"), r"\left(x + 1\right)^{2}");
}

#[test]
fn functions() {
    assert_eq!(tex("sin(x)"), r"\sin{\left(x \right)}");
    assert_eq!(tex("sin(x)**2"), r"\sin^{2}{\left(x \right)}");
    assert_eq!(tex("asin(x)"), r"\operatorname{asin}{\left(x \right)}");
    assert_eq!(tex("exp(x)"), "e^{x}");
    assert_eq!(tex("Abs(x)"), r"\left|{x}\right|");
    assert_eq!(tex("f(x, y)"), r"f{\left(x,y \right)}");
}

#[test]
fn names_and_constants() {
    assert_eq!(tex("alpha"), r"\alpha");
    assert_eq!(tex("x_1"), "x_{1}");
    assert_eq!(tex("theta2"), r"\theta_{2}");
    assert_eq!(tex("pi"), r"\pi");
    assert_eq!(tex("oo"), r"\infty");
}

#[test]
fn underscores_only_subscript_between_name_parts() {
    assert_eq!(tex("x_max"), "x_{max}");
    assert_eq!(tex("x_"), r"x\_");
    assert_eq!(tex("x_ + 1"), r"x\_ + 1");
    assert_eq!(tex("a__b"), r"a\_\_b");
    assert_eq!(tex("a_b_"), r"a_{b\_}");
}

#[test]
fn floats_print_as_mantissa_and_power_of_ten() {
    assert_eq!(tex("0.5"), "0.5");
    assert_eq!(tex("1.0e40"), r"1 \cdot 10^{40}");
    assert_eq!(tex("2.5e-10"), r"2.5 \cdot 10^{-10}");
    assert_eq!(tex("1.0e40**x"), r"\left(1 \cdot 10^{40}\right)^{x}");
    assert_eq!(latex(&Expr::Number(Number::float(f64::INFINITY))), r"\infty");
    assert_eq!(latex(&Expr::Number(Number::float(f64::NEG_INFINITY))), r"- \infty");
    assert_eq!(latex(&Expr::Number(Number::float(f64::NAN))), r"\text{NaN}");
}

#[test]
fn indeterminate_forms_print_as_nan() {
    assert_eq!(tex("0/0"), r"\text{NaN}");
    assert_eq!(tex("oo - oo"), r"\text{NaN}");
    assert_eq!(tex("-2*oo"), r"- \infty");
}

#[test]
fn unevaluated_calculus() {
    let x = Symbol::new("x");
    let f = Expr::applied("f", vec![Expr::symbol(x.clone())]);
    assert_eq!(
        latex(&Expr::derivative(f.clone(), x.clone())),
        r"\frac{d}{d x} f{\left(x \right)}"
    );
    assert_eq!(
        latex(&Expr::derivative(Expr::derivative(f.clone(), x.clone()), x.clone())),
        r"\frac{d^{2}}{d x^{2}} f{\left(x \right)}"
    );
    assert_eq!(
        latex(&Expr::integral(f, x)),
        r"\int f{\left(x \right)}\, dx"
    );
}

#[test]
fn piecewise_uses_cases() {
    let n = Expr::symbol(Symbol::integer("n"));
    let x = Expr::symbol(Symbol::new("x"));
    let e = Expr::piecewise(vec![
        (
            Expr::func(Func::Log, x.clone()),
            Condition::Equals(n.clone(), Expr::minus_one()),
        ),
        (x, Condition::Otherwise),
    ]);
    assert_eq!(
        latex(&e),
        r"\begin{cases} \log{\left(x \right)} & \text{for}\: n = -1 \\ x & \text{otherwise} \end{cases}"
    );
}
