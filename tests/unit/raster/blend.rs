use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src_unchanged() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_red_on_opaque_blue() {
    let out = over([0, 0, 255, 255], [255, 0, 0, 128]);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn over_result_alpha_never_decreases() {
    for da in [0u8, 1, 64, 128, 200, 255] {
        for sa in [0u8, 1, 64, 128, 200, 255] {
            let out = over([50, 60, 70, da], [200, 100, 0, sa]);
            assert!(out[3] >= da.max(sa), "da={da} sa={sa} out={out:?}");
        }
    }
}

#[test]
fn paste_clips_negative_offsets() {
    let src = ImageArtifact::filled(4, 4, Rgba8::new(255, 0, 0, 255)).unwrap();
    let mut canvas = vec![0u8; 3 * 3 * 4];
    let visible = paste_into(&mut canvas, 3, 3, &src, -2, 1, Paste::Copy).unwrap();
    assert_eq!(visible, PixelRect::new(0, 1, 2, 2));

    let red = |x: usize, y: usize| canvas[(y * 3 + x) * 4] == 255;
    assert!(!red(0, 0));
    assert!(red(0, 1) && red(1, 1) && red(1, 2));
    assert!(!red(2, 1));
}

#[test]
fn paste_fully_outside_is_none_and_untouched() {
    let src = ImageArtifact::filled(2, 2, Rgba8::new(1, 1, 1, 255)).unwrap();
    let mut canvas = vec![0u8; 2 * 2 * 4];
    assert!(paste_into(&mut canvas, 2, 2, &src, 5, 5, Paste::Over).is_none());
    assert!(canvas.iter().all(|&b| b == 0));
}

#[test]
fn paste_copy_overwrites_but_over_keeps_background_under_transparency() {
    let hole = ImageArtifact::filled(1, 1, Rgba8::TRANSPARENT).unwrap();

    let mut copied = [9u8, 9, 9, 255].to_vec();
    paste_into(&mut copied, 1, 1, &hole, 0, 0, Paste::Copy);
    assert_eq!(copied, vec![0, 0, 0, 0]);

    let mut blended = [9u8, 9, 9, 255].to_vec();
    paste_into(&mut blended, 1, 1, &hole, 0, 0, Paste::Over);
    assert_eq!(blended, vec![9, 9, 9, 255]);
}
