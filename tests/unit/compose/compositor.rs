use super::*;
use crate::foundation::core::Rgba8;

fn solid(w: u32, h: u32, c: [u8; 4]) -> ImageArtifact {
    ImageArtifact::filled(w, h, Rgba8::from(c)).unwrap()
}

#[test]
fn first_layer_defines_canvas_and_centering_is_exact() {
    let layers = vec![
        Layer::new("background", solid(72, 72, [0, 0, 255, 255]), Anchor::absolute(0, 0)),
        Layer::new(
            "icon",
            solid(32, 32, [255, 0, 0, 255]),
            Anchor::relative("background", "c@c", 0, 0).unwrap(),
        ),
    ];
    let rects = resolve_placements(&layers).unwrap();
    assert_eq!(rects[1], PixelRect::new(20, 20, 32, 32));

    let out = composite(&layers).unwrap();
    assert_eq!((out.width(), out.height()), (72, 72));
    assert_eq!(out.pixel(19, 19), Some([0, 0, 255, 255]));
    assert_eq!(out.pixel(20, 20), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(51, 51), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(52, 52), Some([0, 0, 255, 255]));
}

#[test]
fn canvas_size_ignores_first_layer_anchor() {
    let layers = vec![
        Layer::new("bg", solid(10, 8, [1, 1, 1, 255]), Anchor::absolute(3, 3)),
        Layer::new("big", solid(50, 50, [2, 2, 2, 255]), Anchor::absolute(-5, -5)),
    ];
    let out = composite(&layers).unwrap();
    assert_eq!((out.width(), out.height()), (10, 8));
    assert_eq!(out.pixel(0, 0), Some([2, 2, 2, 255]));
}

#[test]
fn relative_chain_with_offsets() {
    let layers = vec![
        Layer::new("bg", solid(100, 100, [0, 0, 0, 0]), Anchor::absolute(0, 0)),
        Layer::new("a", solid(10, 10, [0, 0, 0, 255]), Anchor::absolute(5, 5)),
        Layer::new(
            "b",
            solid(4, 6, [0, 0, 0, 255]),
            Anchor::relative("a", "es@ss", 2, 1).unwrap(),
        ),
        Layer::new(
            "badge",
            solid(8, 8, [0, 0, 0, 255]),
            Anchor::relative("bg", "e@e", -3, -3).unwrap(),
        ),
    ];
    let rects = resolve_placements(&layers).unwrap();
    assert_eq!(rects[2], PixelRect::new(17, 6, 4, 6));
    assert_eq!(rects[3], PixelRect::new(89, 89, 8, 8));
}

#[test]
fn later_layers_blend_over_earlier_ones() {
    let layers = vec![
        Layer::new("bg", solid(2, 2, [0, 0, 255, 255]), Anchor::absolute(0, 0)),
        Layer::new("tint", solid(2, 2, [255, 0, 0, 128]), Anchor::absolute(0, 0)),
    ];
    let out = composite(&layers).unwrap();
    assert_eq!(out.pixel(1, 1), Some([128, 0, 127, 255]));
}

#[test]
fn off_canvas_layers_are_clipped() {
    let layers = vec![
        Layer::new("bg", solid(4, 4, [9, 9, 9, 255]), Anchor::absolute(0, 0)),
        Layer::new("away", solid(4, 4, [1, 2, 3, 255]), Anchor::absolute(100, 100)),
        Layer::new("edge", solid(4, 4, [5, 5, 5, 255]), Anchor::absolute(2, -2)),
    ];
    let out = composite(&layers).unwrap();
    assert_eq!(out.pixel(3, 1), Some([5, 5, 5, 255]));
    assert_eq!(out.pixel(3, 2), Some([9, 9, 9, 255]));
    assert_eq!(out.pixel(1, 0), Some([9, 9, 9, 255]));
}

#[test]
fn reference_errors() {
    let bg = solid(4, 4, [0, 0, 0, 255]);
    let forward = vec![
        Layer::new("bg", bg.clone(), Anchor::absolute(0, 0)),
        Layer::new("a", bg.clone(), Anchor::relative("b", "c@c", 0, 0).unwrap()),
        Layer::new("b", bg.clone(), Anchor::absolute(0, 0)),
    ];
    match composite(&forward) {
        Err(TesseraError::Reference(msg)) => assert!(msg.contains("before it is placed"), "{msg}"),
        other => panic!("expected reference error, got {other:?}"),
    }

    let unknown = vec![
        Layer::new("bg", bg.clone(), Anchor::absolute(0, 0)),
        Layer::new("a", bg.clone(), Anchor::relative("nope", "c@c", 0, 0).unwrap()),
    ];
    assert!(matches!(composite(&unknown), Err(TesseraError::Reference(_))));
}

#[test]
fn empty_and_duplicate_layers_are_rejected() {
    assert!(matches!(composite(&[]), Err(TesseraError::Validation(_))));
    let bg = solid(4, 4, [0, 0, 0, 255]);
    let dup = vec![
        Layer::new("bg", bg.clone(), Anchor::absolute(0, 0)),
        Layer::new("bg", bg, Anchor::absolute(1, 1)),
    ];
    assert!(matches!(composite(&dup), Err(TesseraError::Validation(_))));
}

#[test]
fn extreme_anchors_clip_or_fail_without_overflow() {
    let bg = solid(4, 4, [9, 9, 9, 255]);
    let far = vec![
        Layer::new("bg", bg.clone(), Anchor::absolute(0, 0)),
        Layer::new("max", bg.clone(), Anchor::absolute(i64::MAX, 0)),
        Layer::new("min", bg.clone(), Anchor::absolute(i64::MIN, i64::MIN)),
    ];
    assert_eq!(composite(&far).unwrap(), bg);

    let shifted = vec![
        Layer::new("bg", bg.clone(), Anchor::absolute(0, 0)),
        Layer::new("a", bg.clone(), Anchor::absolute(5, 0)),
        Layer::new("b", bg.clone(), Anchor::relative("a", "s@s", i64::MAX, 0).unwrap()),
    ];
    assert!(matches!(composite(&shifted), Err(TesseraError::Geometry(_))));

    let doubled = vec![
        Layer::new("bg", bg.clone(), Anchor::absolute(0, 0)),
        Layer::new("a", bg.clone(), Anchor::absolute(i64::MAX / 2 + 1, 0)),
        Layer::new("b", bg, Anchor::relative("a", "c@c", 0, 0).unwrap()),
    ];
    assert!(matches!(composite(&doubled), Err(TesseraError::Geometry(_))));
}
