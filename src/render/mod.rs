//! Typesetting expressions into PNG images.
//!
//! [`latex`] prints an expression as LaTeX math, [`Theme`] wraps it in a standalone document,
//! a [`Rasterizer`] turns the document into PNG bytes and [`RenderedArtifact`] verifies them.

pub mod artifact;
pub mod document;
pub mod latex;
pub mod pipeline;
pub mod toolchain;

pub use artifact::RenderedArtifact;
pub use document::Theme;
pub use latex::latex;
pub use pipeline::Renderer;
pub use toolchain::{InMemoryRasterizer, LatexToolchain, Rasterizer, is_program_on_path};
