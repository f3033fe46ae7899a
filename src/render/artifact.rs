use base64::Engine as _;

use crate::foundation::error::{MathpipeError, MathpipeResult};

/// A decoded-and-verified PNG produced by the rasterizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedArtifact {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl RenderedArtifact {
    /// Validate `png` by decoding it; anything that is not a non-empty PNG is rejected.
    pub fn from_png(png: Vec<u8>) -> MathpipeResult<Self> {
        let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .map_err(|e| MathpipeError::render(format!("rasterizer output is not a PNG: {e}")))?;
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(MathpipeError::render("rasterizer produced an empty image"));
        }
        Ok(Self { png, width, height })
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Standard-alphabet, padded base64 of the PNG bytes, no line breaks.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.png)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/artifact.rs"]
mod tests;
