use super::*;

fn fonts() -> Arc<usvg::fontdb::Database> {
    Arc::new(usvg::fontdb::Database::new())
}

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
  <rect x="0" y="0" width="5" height="10" fill="#ff0000"/>
  <rect x="5" y="0" width="5" height="10" fill="#0000ff" fill-opacity="0.5"/>
</svg>"##;

#[test]
fn scales_to_requested_size_and_outputs_straight_alpha() {
    let img = render_svg(SQUARE.as_bytes(), 40, 20, &fonts()).unwrap();
    assert_eq!((img.width(), img.height()), (40, 20));
    assert_eq!(img.pixel(5, 10), Some([255, 0, 0, 255]));

    let [r, g, b, a] = img.pixel(35, 10).unwrap();
    assert_eq!((r, g), (0, 0));
    assert!(b >= 253, "blue stays saturated after unpremultiply, got {b}");
    assert!((127..=128).contains(&a), "alpha {a}");
}

#[test]
fn rendering_is_deterministic() {
    let a = render_svg(SQUARE.as_bytes(), 24, 24, &fonts()).unwrap();
    let b = render_svg(SQUARE.as_bytes(), 24, 24, &fonts()).unwrap();
    assert_eq!(a.content_hash(), b.content_hash());
}

#[test]
fn rejects_zero_size_and_invalid_markup() {
    assert!(matches!(
        render_svg(SQUARE.as_bytes(), 0, 10, &fonts()),
        Err(TesseraError::Validation(_))
    ));
    assert!(matches!(
        render_svg(b"<not-svg", 10, 10, &fonts()),
        Err(TesseraError::Render(_))
    ));
}
