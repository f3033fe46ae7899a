use super::*;
use crate::symbolic::SymbolKind;

#[test]
fn standard_environment_declares_the_usual_names() {
    let env = SymbolEnv::standard(UnboundPolicy::AutoBind);

    match env.lookup("x") {
        Some(Binding::Symbol(s)) => assert_eq!(s.kind(), SymbolKind::Generic),
        other => panic!("unexpected binding for x: {other:?}"),
    }
    match env.lookup("n") {
        Some(Binding::Symbol(s)) => assert_eq!(s.kind(), SymbolKind::Integer),
        other => panic!("unexpected binding for n: {other:?}"),
    }
    assert_eq!(env.lookup("f"), Some(&Binding::Function("f".to_owned())));
    assert_eq!(env.lookup("pi"), Some(&Binding::Constant(Constant::Pi)));
    assert_eq!(
        env.lookup("ln"),
        Some(&Binding::Builtin(Builtin::Elementary(Func::Log)))
    );
    assert_eq!(env.lookup("sqrt"), Some(&Binding::Builtin(Builtin::Sqrt)));
    assert_eq!(env.lookup("w"), None);
}

#[test]
fn declare_overrides_existing_bindings() {
    let mut env = SymbolEnv::empty(UnboundPolicy::Reject);
    env.declare("a", Binding::Symbol(Symbol::new("a")));
    env.declare("a", Binding::Function("a".to_owned()));
    assert_eq!(env.lookup("a"), Some(&Binding::Function("a".to_owned())));
    assert_eq!(env.policy(), UnboundPolicy::Reject);
    assert_eq!(env.iter().count(), 1);
}

#[test]
fn default_policy_auto_binds() {
    assert_eq!(SymbolEnv::default().policy(), UnboundPolicy::AutoBind);
}
