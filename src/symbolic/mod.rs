//! In-process computer algebra: expression trees, differentiation and integration.

pub mod diff;
pub mod display;
pub mod expr;
pub mod integrate;
pub mod number;
pub mod ordering;
pub mod subs;

pub use diff::diff;
pub use expr::{Condition, Constant, Expr, Func, Symbol, SymbolKind};
pub use integrate::{Antiderivative, IntegralStep, Rule, manual_integrate};
pub use number::Number;
pub use subs::subs;
