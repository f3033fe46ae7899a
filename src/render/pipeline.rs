use crate::foundation::config::RenderConfig;
use crate::foundation::error::MathpipeResult;
use crate::render::artifact::RenderedArtifact;
use crate::render::document::Theme;
use crate::render::latex::latex;
use crate::render::toolchain::{LatexToolchain, Rasterizer};
use crate::symbolic::Expr;

/// Expression → LaTeX → standalone document → verified PNG.
pub struct Renderer {
    theme: Theme,
    rasterizer: Box<dyn Rasterizer>,
}

impl Renderer {
    pub fn new(theme: Theme, rasterizer: Box<dyn Rasterizer>) -> Self {
        Self { theme, rasterizer }
    }

    /// Renderer driving the system TeX toolchain described by `cfg`.
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self::new(
            Theme::from_config(cfg),
            Box::new(LatexToolchain::from_config(cfg)),
        )
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render `expr` to a PNG.
    ///
    /// Toolchain failures, timeouts and undecodable output all surface as errors; no partial
    /// image is ever returned.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn render(&self, expr: &Expr) -> MathpipeResult<RenderedArtifact> {
        let source = latex(expr);
        tracing::debug!(latex = %source, "typesetting");
        let document = self.theme.document(&source);
        let png = self.rasterizer.rasterize(&document)?;
        let artifact = RenderedArtifact::from_png(png)?;
        tracing::debug!(
            width = artifact.width(),
            height = artifact.height(),
            "rendered"
        );
        Ok(artifact)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
