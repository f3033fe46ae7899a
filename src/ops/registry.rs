use tracing::{Level, debug};

use crate::expression::parse;
use crate::foundation::error::{MathpipeError, MathpipeResult};
use crate::symbolic::{Expr, Symbol, diff, manual_integrate};
use crate::symbols::SymbolEnv;

/// Closed set of supported commands, each with a fixed argument count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `display, expr`: the expression itself.
    Display,
    /// `differentiate, expr, var`
    Differentiate,
    /// `integrate, expr, var`: step-by-step antiderivative.
    Integrate,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Display,
        Operation::Differentiate,
        Operation::Integrate,
    ];

    /// Exact, case-sensitive command lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Display => "display",
            Operation::Differentiate => "differentiate",
            Operation::Integrate => "integrate",
        }
    }

    /// Number of positional arguments after the command token.
    pub fn arity(self) -> usize {
        match self {
            Operation::Display => 1,
            Operation::Differentiate | Operation::Integrate => 2,
        }
    }

    /// Validate arity, parse the arguments and compute the result expression.
    pub fn apply(self, env: &SymbolEnv, args: &[&str]) -> MathpipeResult<Expr> {
        if args.len() != self.arity() {
            return Err(MathpipeError::Arity {
                op: self.name(),
                expected: self.arity(),
                got: args.len(),
            });
        }

        let expr = parse(env, args[0])?;
        debug!(op = self.name(), %expr, "parsed");

        let result = match self {
            Operation::Display => expr,
            Operation::Differentiate => {
                let var = parse_variable(env, args[1])?;
                diff(&expr, &var)
            }
            Operation::Integrate => {
                let var = parse_variable(env, args[1])?;
                let out = manual_integrate(&expr, &var);
                if tracing::enabled!(Level::DEBUG) {
                    match serde_json::to_string(&out.steps) {
                        Ok(steps) => debug!(%steps, "integration steps"),
                        Err(e) => debug!(error = %e, "integration steps not serializable"),
                    }
                }
                out.result
            }
        };
        debug!(op = self.name(), %result, "computed");
        Ok(result)
    }
}

fn parse_variable(env: &SymbolEnv, text: &str) -> MathpipeResult<Symbol> {
    match parse(env, text)? {
        Expr::Symbol(s) => Ok(s),
        other => Err(MathpipeError::evaluation(format!(
            "cannot take calculus with respect to `{other}`, not a symbol"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/registry.rs"]
mod tests;
