use super::*;
use crate::foundation::error::MathpipeError;
use crate::render::toolchain::InMemoryRasterizer;
use crate::symbolic::Symbol;

fn renderer(raster: &InMemoryRasterizer) -> Renderer {
    Renderer::new(Theme::default(), Box::new(raster.clone()))
}

#[test]
fn renders_expression_through_themed_document() {
    let raster = InMemoryRasterizer::new();
    let x = Expr::symbol(Symbol::new("x"));
    let artifact = renderer(&raster)
        .render(&Expr::pow(x, Expr::int(2)))
        .unwrap();
    assert_eq!((artifact.width(), artifact.height()), (4, 2));

    let docs = raster.documents();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].contains("$\\displaystyle x^{2}$"));
    assert!(docs[0].contains("\\pagecolor{background}"));
}

#[test]
fn rasterizer_failure_propagates() {
    let raster = InMemoryRasterizer::failing();
    let err = renderer(&raster).render(&Expr::int(1)).unwrap_err();
    assert!(matches!(err, MathpipeError::Render(_)), "{err:?}");
    assert_eq!(raster.documents().len(), 1);
}

struct Garbage;

impl Rasterizer for Garbage {
    fn rasterize(&self, _document: &str) -> MathpipeResult<Vec<u8>> {
        Ok(b"GIF89a".to_vec())
    }
}

#[test]
fn undecodable_output_is_rejected() {
    let r = Renderer::new(Theme::default(), Box::new(Garbage));
    assert!(r.render(&Expr::int(1)).is_err());
}
