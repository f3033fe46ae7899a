//! Expression text to symbolic expression.
//!
//! Input is read strictly as mathematical notation: numbers, names, `+ - * / ** ^`,
//! parentheses and function application. Nothing in the text is ever executed.

mod ast;
mod bind;
mod error;
mod lexer;
mod parser;

pub use error::ExprError;

use crate::foundation::error::MathpipeResult;
use crate::symbolic::Expr;
use crate::symbols::SymbolEnv;

/// Parse `text` and resolve its names against `env`.
#[tracing::instrument(level = "trace", skip(env))]
pub fn parse(env: &SymbolEnv, text: &str) -> MathpipeResult<Expr> {
    let ast = parser::parse_ast(text)?;
    bind::bind_ast(&ast, env)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parse.rs"]
mod tests;
