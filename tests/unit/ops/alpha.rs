use super::*;

fn one_px(px: [u8; 4]) -> ImageArtifact {
    ImageArtifact::new(1, 1, px.to_vec()).unwrap()
}

#[test]
fn colorize_replaces_rgb_and_multiplies_alpha() {
    let src = one_px([1, 2, 3, 200]);
    let out = colorize(&src, Rgba8::new(255, 0, 0, 128)).unwrap();
    assert_eq!(out.pixel(0, 0), Some([255, 0, 0, 100]));

    let opaque = colorize(&src, Rgba8::new(9, 8, 7, 255)).unwrap();
    assert_eq!(opaque.pixel(0, 0), Some([9, 8, 7, 200]));
}

#[test]
fn mask_alpha_multiplies_and_keeps_rgb() {
    let img = one_px([10, 20, 30, 200]);
    let mask = one_px([0, 0, 0, 128]);
    let out = mask_alpha(&img, &mask).unwrap();
    assert_eq!(out.pixel(0, 0), Some([10, 20, 30, 100]));
}

#[test]
fn mask_alpha_rejects_size_mismatch() {
    let img = ImageArtifact::filled(2, 2, Rgba8::new(0, 0, 0, 255)).unwrap();
    let mask = ImageArtifact::filled(2, 3, Rgba8::new(0, 0, 0, 255)).unwrap();
    assert!(matches!(
        mask_alpha(&img, &mask),
        Err(TesseraError::Validation(_))
    ));
}

#[test]
fn opacity_floors_exact_decimal_product() {
    let img = one_px([5, 6, 7, 255]);
    let half = opacity(&img, Decimal::new(5, 1)).unwrap();
    assert_eq!(half.pixel(0, 0), Some([5, 6, 7, 127]));

    let img = one_px([5, 6, 7, 10]);
    let tenth = opacity(&img, Decimal::new(1, 1)).unwrap();
    assert_eq!(tenth.pixel(0, 0), Some([5, 6, 7, 1]));

    let full = opacity(&img, Decimal::ONE).unwrap();
    assert_eq!(full, img);
    let zero = opacity(&img, Decimal::ZERO).unwrap();
    assert_eq!(zero.pixel(0, 0), Some([5, 6, 7, 0]));
}

#[test]
fn opacity_rejects_out_of_range_factor() {
    let img = one_px([0, 0, 0, 255]);
    assert!(opacity(&img, Decimal::new(11, 1)).is_err());
    assert!(opacity(&img, Decimal::new(-1, 2)).is_err());
}

#[test]
fn invert_alpha_is_involution() {
    let img = one_px([1, 2, 3, 40]);
    let inv = invert_alpha(&img).unwrap();
    assert_eq!(inv.pixel(0, 0), Some([1, 2, 3, 215]));
    assert_eq!(invert_alpha(&inv).unwrap(), img);
}

#[test]
fn threshold_is_inclusive_at_boundary() {
    let img = ImageArtifact::new(3, 1, vec![1, 1, 1, 127, 2, 2, 2, 128, 3, 3, 3, 129]).unwrap();
    let out = threshold_alpha(&img, 128).unwrap();
    assert_eq!(out.pixel(0, 0), Some([1, 1, 1, 0]));
    assert_eq!(out.pixel(1, 0), Some([2, 2, 2, 255]));
    assert_eq!(out.pixel(2, 0), Some([3, 3, 3, 255]));
}

#[test]
fn threshold_rejects_out_of_range() {
    let img = one_px([0, 0, 0, 0]);
    assert!(threshold_alpha(&img, 256).is_err());
    assert!(threshold_alpha(&img, -1).is_err());
    let all = threshold_alpha(&img, 0).unwrap();
    assert_eq!(all.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn extract_alpha_zeroes_rgb() {
    let out = extract_alpha(&one_px([100, 150, 200, 77])).unwrap();
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 77]));
}
