use super::*;
use crate::foundation::error::Status;
use crate::symbols::UnboundPolicy;

fn env() -> SymbolEnv {
    SymbolEnv::standard(UnboundPolicy::AutoBind)
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    assert_eq!(Operation::from_name("display"), Some(Operation::Display));
    assert_eq!(
        Operation::from_name("differentiate"),
        Some(Operation::Differentiate)
    );
    assert_eq!(Operation::from_name("integrate"), Some(Operation::Integrate));
    assert_eq!(Operation::from_name("Display"), None);
    assert_eq!(Operation::from_name("display "), None);
    assert_eq!(Operation::from_name(""), None);
}

#[test]
fn names_round_trip() {
    for op in Operation::ALL {
        assert_eq!(Operation::from_name(op.name()), Some(op));
    }
}

#[test]
fn wrong_arity_is_a_bad_request() {
    let err = Operation::Differentiate.apply(&env(), &["x**2"]).unwrap_err();
    assert!(matches!(
        err,
        MathpipeError::Arity {
            op: "differentiate",
            expected: 2,
            got: 1
        }
    ));
    assert_eq!(err.status(), Status::BadRequest);
    assert!(Operation::Display.apply(&env(), &[]).is_err());
    assert!(Operation::Display.apply(&env(), &["x", "y"]).is_err());
}

#[test]
fn display_returns_the_expression() {
    let out = Operation::Display.apply(&env(), &["x + x"]).unwrap();
    assert_eq!(out.to_string(), "2*x");
}

#[test]
fn differentiate_x_squared_is_two_x() {
    let out = Operation::Differentiate
        .apply(&env(), &["x**2", "x"])
        .unwrap();
    assert_eq!(out, parse(&env(), "2*x").unwrap());
}

#[test]
fn integrate_returns_an_antiderivative() {
    let out = Operation::Integrate.apply(&env(), &["2*x", "x"]).unwrap();
    assert_eq!(out.to_string(), "x**2");
}

#[test]
fn calculus_variable_must_be_a_symbol() {
    for args in [["x**2", "2"], ["x**2", "x + 1"], ["x**2", "(("]] {
        assert!(Operation::Differentiate.apply(&env(), &args).is_err());
        assert!(Operation::Integrate.apply(&env(), &args).is_err());
    }
}

#[test]
fn integration_steps_are_dumped_only_under_debug_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::sink)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, || {
        Operation::Integrate.apply(&env(), &["2*x", "x"]).unwrap()
    });
    assert_eq!(out.to_string(), "x**2");
}
