//! Names an expression may refer to.

mod env;

pub use env::{Binding, Builtin, SymbolEnv, UnboundPolicy};
