//! mathpipe is a line-oriented symbolic math shim.
//!
//! A host process writes requests such as `differentiate, x**2, x` to stdin; mathpipe parses the
//! expression, computes the result with its built-in algebra engine, typesets it through the
//! system LaTeX toolchain and answers with a status line plus a base64 PNG.
//!
//! - [`expression::parse`] turns text into an [`Expr`] against a [`SymbolEnv`]
//! - [`Operation`] is the closed set of commands
//! - [`Renderer`] produces a [`RenderedArtifact`]
//! - [`Session`] runs the request loop
#![forbid(unsafe_code)]

pub mod expression;
pub mod foundation;
pub mod ops;
pub mod render;
pub mod session;
pub mod symbolic;
pub mod symbols;

pub use crate::foundation::config::{Config, LoggingConfig, RenderConfig, SymbolsConfig};
pub use crate::foundation::error::{MathpipeError, MathpipeResult, Status};

pub use crate::expression::parse;
pub use crate::ops::Operation;
pub use crate::render::{
    InMemoryRasterizer, LatexToolchain, Rasterizer, RenderedArtifact, Renderer, Theme,
};
pub use crate::session::{Request, Response, Session, SessionState, SessionStats};
pub use crate::symbolic::{Expr, Symbol};
pub use crate::symbols::{SymbolEnv, UnboundPolicy};
