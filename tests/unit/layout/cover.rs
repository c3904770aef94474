use super::*;
use crate::layout::template::Template;

const EPS: f64 = 1e-9;

fn photo() -> Rect {
    Template::POLAROID.photo
}

#[test]
fn wider_image_crops_left_and_right() {
    let target = photo();
    let ratio = target.width() / target.height();
    let crop = cover_fit(8000, 2000, target);

    assert_eq!(crop.y, 0.0);
    assert_eq!(crop.height, 2000.0);
    assert!((crop.width - 2000.0 * ratio).abs() < EPS);
    assert!((crop.x - (8000.0 - crop.width) / 2.0).abs() < EPS);
}

#[test]
fn taller_image_crops_top_and_bottom() {
    let target = photo();
    let ratio = target.width() / target.height();
    let crop = cover_fit(600, 3000, target);

    assert_eq!(crop.x, 0.0);
    assert_eq!(crop.width, 600.0);
    assert!((crop.height - 600.0 / ratio).abs() < EPS);
    assert!((crop.y - (3000.0 - crop.height) / 2.0).abs() < EPS);
}

#[test]
fn matching_ratio_keeps_everything() {
    let target = Rect::new(0.0, 0.0, 400.0, 300.0);
    let crop = cover_fit(800, 600, target);
    assert_eq!(crop.to_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn crop_preserves_target_ratio_and_stays_inside_image() {
    let target = photo();
    let ratio = target.width() / target.height();
    for (w, h) in [
        (1, 1),
        (1, 5000),
        (5000, 1),
        (8000, 6000),
        (6000, 8000),
        (936, 796),
        (937, 796),
        (3, 2),
    ] {
        let crop = cover_fit(w, h, target);
        assert!(crop.width <= f64::from(w) + EPS, "{w}x{h}: {crop:?}");
        assert!(crop.height <= f64::from(h) + EPS, "{w}x{h}: {crop:?}");
        assert!(crop.x >= 0.0 && crop.y >= 0.0, "{w}x{h}: {crop:?}");
        assert!(crop.x + crop.width <= f64::from(w) + EPS);
        assert!(crop.y + crop.height <= f64::from(h) + EPS);
        assert!(
            (crop.aspect_ratio() - ratio).abs() < 1e-9 * ratio.max(1.0),
            "{w}x{h}: {crop:?}"
        );
        // One axis is always kept whole.
        assert!(crop.width == f64::from(w) || crop.height == f64::from(h));
    }
}

#[test]
fn scaled_crop_covers_whole_target() {
    let target = photo();
    for (w, h) in [(1, 1), (8000, 6000), (640, 2000)] {
        let crop = cover_fit(w, h, target);
        let scale = target.width() / crop.width;
        assert!((crop.height * scale - target.height()).abs() < 1e-6);
    }
}
