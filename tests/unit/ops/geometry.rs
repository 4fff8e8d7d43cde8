use super::*;
use crate::foundation::core::Rgba8;

/// Image whose pixel (x, y) is `[x, y, 7, 255]`.
fn coords(w: u32, h: u32) -> ImageArtifact {
    let mut px = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            px.extend_from_slice(&[x as u8, y as u8, 7, 255]);
        }
    }
    ImageArtifact::new(w, h, px).unwrap()
}

#[test]
fn crop_keeps_inner_rectangle() {
    let out = crop(&coords(10, 8), Insets::new(1, 2, 3, 4)).unwrap();
    assert_eq!((out.width(), out.height()), (6, 2));
    assert_eq!(out.pixel(0, 0), Some([1, 2, 7, 255]));
    assert_eq!(out.pixel(5, 1), Some([6, 3, 7, 255]));
}

#[test]
fn crop_rejects_collapse_and_negative_insets() {
    let img = coords(4, 4);
    assert!(matches!(
        crop(&img, Insets::new(2, 0, 2, 0)),
        Err(TesseraError::Geometry(_))
    ));
    assert!(matches!(
        crop(&img, Insets::new(0, 3, 0, 1)),
        Err(TesseraError::Geometry(_))
    ));
    assert!(matches!(
        crop(&img, Insets::new(-1, 0, 0, 0)),
        Err(TesseraError::Validation(_))
    ));
    assert!(crop(&img, Insets::new(1, 1, 2, 2)).is_ok());
}

#[test]
fn pad_places_original_at_left_top_exactly() {
    let src = ImageArtifact::filled(2, 2, Rgba8::new(10, 20, 30, 128)).unwrap();
    let out = pad(&src, Insets::new(3, 1, 2, 4)).unwrap();
    assert_eq!((out.width(), out.height()), (7, 7));
    assert_eq!(out.pixel(3, 1), Some([10, 20, 30, 128]));
    assert_eq!(out.pixel(4, 2), Some([10, 20, 30, 128]));
    assert_eq!(out.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(5, 3), Some([0, 0, 0, 0]));
    assert!(pad(&src, Insets::new(0, 0, -1, 0)).is_err());
}

#[test]
fn crop_then_pad_restores_size() {
    let img = coords(12, 9);
    for insets in [
        Insets::new(0, 0, 0, 0),
        Insets::new(1, 2, 3, 4),
        Insets::new(11, 0, 0, 8),
        Insets::new(5, 4, 6, 4),
    ] {
        let restored = pad(&crop(&img, insets).unwrap(), insets).unwrap();
        assert_eq!((restored.width(), restored.height()), (12, 9), "{insets:?}");
    }
}

#[test]
fn translate_positive_and_negative_offsets() {
    let src = ImageArtifact::filled(2, 2, Rgba8::new(255, 0, 0, 255)).unwrap();

    let right_down = translate(&src, 3, 1).unwrap();
    assert_eq!((right_down.width(), right_down.height()), (5, 3));
    assert_eq!(right_down.pixel(3, 1), Some([255, 0, 0, 255]));
    assert_eq!(right_down.pixel(0, 0), Some([0, 0, 0, 0]));

    let left_up = translate(&src, -3, -1).unwrap();
    assert_eq!((left_up.width(), left_up.height()), (5, 3));
    assert_eq!(left_up.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(left_up.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(left_up.pixel(4, 2), Some([0, 0, 0, 0]));

    assert_eq!(translate(&src, 0, 0).unwrap(), src);
}

#[test]
fn resize_changes_dimensions_and_rejects_zero() {
    let src = ImageArtifact::filled(4, 4, Rgba8::new(10, 200, 30, 255)).unwrap();
    let out = resize(&src, 8, 2).unwrap();
    assert_eq!((out.width(), out.height()), (8, 2));
    assert_eq!(out.pixel(3, 1).map(|px| px[3]), Some(255));
    assert!(resize(&src, 0, 2).is_err());
    assert_eq!(resize(&src, 4, 4).unwrap(), src);
}
