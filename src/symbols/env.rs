use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::symbolic::{Constant, Func, Symbol};

/// What happens to a name that is not in the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnboundPolicy {
    /// A bare name becomes a generic symbol, an applied name an undefined function.
    #[default]
    AutoBind,
    /// Any unknown name fails the request.
    Reject,
}

/// Built-in function callable from expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// One-argument elementary function. `log` also accepts a second argument, the base.
    Elementary(Func),
    /// `sqrt(u)`, stored as `u**(1/2)`.
    Sqrt,
}

/// Meaning of one name.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Symbol(Symbol),
    Constant(Constant),
    Builtin(Builtin),
    /// Undefined function, kept unevaluated when applied.
    Function(String),
}

/// Immutable name table shared by every request of a session.
#[derive(Debug, Clone)]
pub struct SymbolEnv {
    bindings: BTreeMap<String, Binding>,
    policy: UnboundPolicy,
}

impl SymbolEnv {
    /// Table with no names at all.
    pub fn empty(policy: UnboundPolicy) -> Self {
        Self {
            bindings: BTreeMap::new(),
            policy,
        }
    }

    /// The standard environment: `x y z t` generic, `k m n` integer, `f g h` undefined
    /// functions, plus the built-in constants and elementary functions.
    pub fn standard(policy: UnboundPolicy) -> Self {
        let mut env = Self::empty(policy);
        for name in ["x", "y", "z", "t"] {
            env.declare(name, Binding::Symbol(Symbol::new(name)));
        }
        for name in ["k", "m", "n"] {
            env.declare(name, Binding::Symbol(Symbol::integer(name)));
        }
        for name in ["f", "g", "h"] {
            env.declare(name, Binding::Function(name.to_owned()));
        }
        for (name, c) in [
            ("pi", Constant::Pi),
            ("E", Constant::E),
            ("I", Constant::I),
            ("oo", Constant::Infinity),
            ("zoo", Constant::ComplexInfinity),
            ("nan", Constant::NaN),
        ] {
            env.declare(name, Binding::Constant(c));
        }
        for f in Func::ALL {
            env.declare(f.name(), Binding::Builtin(Builtin::Elementary(f)));
        }
        env.declare("ln", Binding::Builtin(Builtin::Elementary(Func::Log)));
        env.declare("sqrt", Binding::Builtin(Builtin::Sqrt));
        env
    }

    /// Bind `name`, replacing any previous binding.
    pub fn declare(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    /// Binding for `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Policy for names without a binding.
    pub fn policy(&self) -> UnboundPolicy {
        self.policy
    }

    /// All bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for SymbolEnv {
    fn default() -> Self {
        Self::standard(UnboundPolicy::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/symbols/env.rs"]
mod tests;
