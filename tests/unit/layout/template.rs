use super::*;

#[test]
fn canonical_template_is_valid() {
    Template::POLAROID.validate().unwrap();
    assert_eq!(Template::POLAROID.canvas(), Canvas::square(1080));
    assert!((Template::POLAROID.photo_ratio() - 936.0 / 796.0).abs() < 1e-12);
}

#[test]
fn photo_touching_frame_edge_is_rejected() {
    let mut t = Template::POLAROID;
    t.photo.x0 = t.frame.x0;
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("strictly inside"));
}

#[test]
fn frame_outside_canvas_is_rejected() {
    let mut t = Template::POLAROID;
    t.frame.x1 = 1081.0;
    assert!(t.validate().is_err());
}

#[test]
fn degenerate_rects_are_rejected() {
    let mut t = Template::POLAROID;
    t.photo = Rect::new(100.0, 100.0, 100.0, 200.0);
    assert!(t.validate().is_err());

    let mut t = Template::POLAROID;
    t.frame.y1 = f64::NAN;
    assert!(t.validate().is_err());
}

#[test]
fn canvas_size_bounds() {
    let mut t = Template::POLAROID;
    t.canvas_size = 0;
    assert!(t.validate().is_err());
    t.canvas_size = 70_000;
    assert!(t.validate().is_err());
}

#[test]
fn caption_settings_are_checked() {
    let mut t = Template::POLAROID;
    t.caption.size_px = 0.0;
    assert!(t.validate().is_err());

    let mut t = Template::POLAROID;
    t.caption.baseline_y = 2000.0;
    assert!(t.validate().is_err());

    let mut t = Template::POLAROID;
    t.caption.anchor_x = 1080.0;
    t.validate().unwrap();
}
