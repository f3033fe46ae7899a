use super::*;
use base64::Engine as _;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn accepts_png_and_records_dimensions() {
    let artifact = RenderedArtifact::from_png(png(7, 3)).unwrap();
    assert_eq!((artifact.width(), artifact.height()), (7, 3));
    assert!(artifact.png().starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn base64_is_single_line_and_decodes_back() {
    let bytes = png(5, 5);
    let artifact = RenderedArtifact::from_png(bytes.clone()).unwrap();
    let b64 = artifact.to_base64();
    assert!(!b64.contains('\n'));
    assert!(b64.starts_with("iVBORw0KGgo"));
    let decoded = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
    assert_eq!(decoded, bytes);
}

#[test]
fn rejects_non_png_bytes() {
    for bytes in [Vec::new(), b"not an image".to_vec(), png(2, 2)[..20].to_vec()] {
        let err = RenderedArtifact::from_png(bytes).unwrap_err();
        assert!(matches!(err, MathpipeError::Render(_)), "{err:?}");
    }
}
