use super::*;

#[test]
fn new_rejects_mismatched_buffer_and_zero_size() {
    assert!(ImageArtifact::new(2, 2, vec![0; 16]).is_ok());
    assert!(matches!(
        ImageArtifact::new(2, 2, vec![0; 15]),
        Err(TesseraError::Validation(_))
    ));
    assert!(matches!(
        ImageArtifact::new(0, 2, vec![]),
        Err(TesseraError::Geometry(_))
    ));
}

#[test]
fn filled_sets_every_pixel() {
    let img = ImageArtifact::filled(3, 2, Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(img.pixels().len(), 3 * 2 * 4);
    assert!(img.pixels().chunks_exact(4).all(|px| px == [1, 2, 3, 4]));
    assert_eq!(img.pixel(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(img.pixel(3, 0), None);
}

#[test]
fn equal_content_hashes_equal() {
    let a = ImageArtifact::filled(4, 4, Rgba8::new(9, 9, 9, 255)).unwrap();
    let b = ImageArtifact::new(4, 4, [9u8, 9, 9, 255].repeat(16)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.content_hash(), b.content_hash());
    assert_eq!(a.content_hash().to_hex().len(), 64);
}

#[test]
fn any_pixel_or_dimension_change_changes_hash() {
    let base = ImageArtifact::filled(4, 2, Rgba8::new(9, 9, 9, 255)).unwrap();

    let mut pixels = base.pixels().to_vec();
    pixels[5] = 10;
    let one_pixel = ImageArtifact::new(4, 2, pixels).unwrap();
    assert_ne!(base.content_hash(), one_pixel.content_hash());

    let transposed = ImageArtifact::filled(2, 4, Rgba8::new(9, 9, 9, 255)).unwrap();
    assert_ne!(base.content_hash(), transposed.content_hash());
}

#[test]
fn blob_hash_covers_content_type() {
    let svg = BlobArtifact::new(b"<svg/>".to_vec(), "image/svg+xml");
    let txt = BlobArtifact::new(b"<svg/>".to_vec(), "text/plain");
    assert_ne!(svg.content_hash(), txt.content_hash());
    assert_eq!(
        svg.content_hash(),
        BlobArtifact::new(b"<svg/>".to_vec(), "image/svg+xml").content_hash()
    );
}

#[test]
fn image_and_blob_hashes_never_collide_on_same_bytes() {
    let img = ImageArtifact::new(1, 1, vec![1, 2, 3, 4]).unwrap();
    let blob = BlobArtifact::new(vec![1u8, 2, 3, 4], "image/rgba8");
    assert_ne!(
        Artifact::from(img).content_hash(),
        Artifact::from(blob).content_hash()
    );
}

#[test]
fn as_image_rejects_blobs() {
    let blob = Artifact::from(BlobArtifact::new(vec![0u8], "font/ttf"));
    let err = blob.as_image("gfx:dilate", "image").unwrap_err();
    assert!(err.to_string().contains("gfx:dilate"));
    assert!(blob.as_blob("gfx:blob_to_image", "blob").is_ok());
}

#[test]
fn png_encode_decodes_back_to_same_pixels() {
    let img = ImageArtifact::new(2, 1, vec![10, 20, 30, 40, 50, 60, 70, 80]).unwrap();
    let png = img.encode_png().unwrap();
    let decoded = ImageArtifact::from_dynamic(image::load_from_memory(&png).unwrap()).unwrap();
    assert_eq!(decoded, img);
}
