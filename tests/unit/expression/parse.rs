use super::*;
use crate::foundation::error::MathpipeError;
use crate::symbolic::{Constant, Func, Symbol};
use crate::symbols::UnboundPolicy;

fn env() -> SymbolEnv {
    SymbolEnv::standard(UnboundPolicy::AutoBind)
}

fn p(text: &str) -> Expr {
    parse(&env(), text).unwrap()
}

#[test]
fn parses_polynomials_into_canonical_form() {
    assert_eq!(p("x**2 + 2*x + 1").to_string(), "x**2 + 2*x + 1");
    assert_eq!(p("x^2"), p("x**2"));
    assert_eq!(p("1 + x"), p("x + 1"));
    assert_eq!(p("-x**2").to_string(), "-x**2");
}

#[test]
fn integer_literals_are_exact_and_decimals_are_floats() {
    assert_eq!(p("1/2").to_string(), "1/2");
    assert_eq!(p("0.5").to_string(), "0.5");
}

#[test]
fn resolves_environment_names() {
    assert_eq!(p("n"), Expr::symbol(Symbol::integer("n")));
    assert_eq!(p("pi"), Expr::Constant(Constant::Pi));
    assert_eq!(p("sin(x)"), Expr::func(Func::Sin, Expr::symbol(Symbol::new("x"))));
    assert_eq!(p("ln(x)"), p("log(x)"));
    assert_eq!(p("sqrt(x)").to_string(), "sqrt(x)");
    assert_eq!(p("f(x)").to_string(), "f(x)");
    assert_eq!(p("log(x, 2)").to_string(), "log(x)/log(2)");
}

#[test]
fn auto_bind_creates_symbols_and_functions() {
    assert_eq!(p("alpha"), Expr::symbol(Symbol::new("alpha")));
    assert_eq!(p("q(x)").to_string(), "q(x)");
}

#[test]
fn reject_policy_refuses_unknown_names() {
    let env = SymbolEnv::standard(UnboundPolicy::Reject);
    assert!(matches!(parse(&env, "alpha"), Err(MathpipeError::Unbound(_))));
    assert!(matches!(parse(&env, "q(x)"), Err(MathpipeError::Unbound(_))));
    assert!(parse(&env, "x + y").is_ok());
}

#[test]
fn kind_misuse_is_rejected() {
    assert!(parse(&env(), "x(2)").is_err());
    assert!(parse(&env(), "sin").is_err());
    assert!(parse(&env(), "f").is_err());
    assert!(parse(&env(), "sin(x, y)").is_err());
    assert!(parse(&env(), "f()").is_err());
}

#[test]
fn malformed_text_is_a_parse_error() {
    for src in ["", "nonsense(((", "2x", "x = 1", "__import__('os')"] {
        match parse(&env(), src) {
            Err(MathpipeError::Parse { .. }) => {}
            other => panic!("{src:?}: expected parse error, got {other:?}"),
        }
    }
}

#[test]
fn nesting_limit_is_a_parse_error() {
    let deep = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
    match parse(&env(), &deep) {
        Err(MathpipeError::Parse { message, .. }) => {
            assert_eq!(message, "expression nested too deeply")
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(matches!(
        parse(&env(), &"-".repeat(100_000)),
        Err(MathpipeError::Parse { .. })
    ));
}

#[test]
fn chains_fold_like_binary_operators() {
    assert_eq!(p("x - y - z"), p("x - (y + z)"));
    assert_eq!(p("x / y / z"), p("x / (y*z)"));
    assert_eq!(p("x - 2*y + y"), p("x - y"));
    assert_eq!(p(&vec!["x"; 1_000].join(" + ")).to_string(), "1000*x");
}
