use super::*;

#[test]
fn create_solid_fills_every_pixel() {
    let img = create_solid(3, 2, Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert!(img.pixels().chunks_exact(4).all(|px| px == [1, 2, 3, 4]));
}

#[test]
fn create_solid_rejects_zero_size() {
    assert!(matches!(
        create_solid(0, 4, Rgba8::TRANSPARENT),
        Err(TesseraError::Validation(_))
    ));
    assert!(create_solid(4, 0, Rgba8::TRANSPARENT).is_err());
}

#[test]
fn blob_to_image_decodes_png_to_rgba() {
    let src = create_solid(4, 3, Rgba8::new(200, 100, 50, 128)).unwrap();
    let blob = BlobArtifact::new(src.encode_png().unwrap(), "image/png");
    let decoded = blob_to_image(&blob).unwrap();
    assert_eq!(decoded, src);
    assert_eq!(decoded.content_hash(), src.content_hash());
}

#[test]
fn blob_to_image_normalizes_rgb_to_rgba() {
    let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([9, 8, 7]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let decoded = blob_to_image(&BlobArtifact::new(buf, "image/png")).unwrap();
    assert_eq!(decoded.pixel(1, 1), Some([9, 8, 7, 255]));
}

#[test]
fn blob_to_image_reports_content_type_on_garbage() {
    let blob = BlobArtifact::new(b"not an image".to_vec(), "image/webp");
    match blob_to_image(&blob) {
        Err(TesseraError::Decode { content_type, .. }) => assert_eq!(content_type, "image/webp"),
        other => panic!("expected decode error, got {other:?}"),
    }
}
