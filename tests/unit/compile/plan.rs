use super::*;

fn image(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba8(w, h, vec![128; (w * h * 4) as usize]).unwrap()
}

fn style(caption: &str) -> StyleState {
    StyleState {
        accent: Rgba8::opaque(0x22, 0x88, 0xee),
        caption: caption.to_owned(),
    }
}

#[test]
fn no_image_no_caption_is_background_and_frame() {
    let plan = compile_layers(&Template::POLAROID, None, &style(""));
    assert_eq!(plan.canvas, Canvas::square(1080));
    assert_eq!(plan.kinds(), vec![LayerKind::Background, LayerKind::Frame]);
    assert_eq!(
        plan.layers[1],
        Layer::Frame {
            rect: Template::POLAROID.frame,
            color: Rgba8::opaque(0x22, 0x88, 0xee),
        }
    );
}

#[test]
fn full_plan_orders_layers_back_to_front() {
    let img = image(40, 10);
    let plan = compile_layers(&Template::POLAROID, Some(&img), &style("Lyon"));
    assert_eq!(
        plan.kinds(),
        vec![
            LayerKind::Background,
            LayerKind::Frame,
            LayerKind::Photo,
            LayerKind::Caption
        ]
    );
}

#[test]
fn caption_layer_present_iff_trimmed_caption_non_empty() {
    for (caption, expect) in [
        ("", false),
        ("   ", false),
        ("\t\n", false),
        ("!!!", true),
        (" x ", true),
        ("日本", true),
    ] {
        let plan = compile_layers(&Template::POLAROID, None, &style(caption));
        let has_caption = plan.kinds().contains(&LayerKind::Caption);
        assert_eq!(has_caption, expect, "caption {caption:?}");
    }
}

#[test]
fn caption_is_trimmed_and_anchored_from_template() {
    let plan = compile_layers(&Template::POLAROID, None, &style("  Hello   World  "));
    let Some(Layer::Caption(c)) = plan.layers.last() else {
        panic!("expected caption layer");
    };
    let t = &Template::POLAROID.caption;
    assert_eq!(c.text, "Hello   World");
    assert_eq!(c.anchor, Point::new(t.anchor_x, t.baseline_y));
    assert_eq!(c.align, TextAlign::Right);
    assert_eq!(c.weight, 700);
    assert_eq!(c.ink, Rgba8::opaque(0x33, 0x33, 0x33));
}

#[test]
fn photo_layer_uses_cover_fit_into_photo_rect() {
    let img = image(40, 10);
    let plan = compile_layers(&Template::POLAROID, Some(&img), &style(""));
    let Layer::Photo { crop, dest } = &plan.layers[2] else {
        panic!("expected photo layer");
    };
    assert_eq!(*dest, Template::POLAROID.photo);
    assert_eq!(*crop, cover_fit(40, 10, Template::POLAROID.photo));
    assert_eq!(crop.y, 0.0);
}

#[test]
fn compile_is_deterministic() {
    let img = image(3, 7);
    let a = compile_layers(&Template::POLAROID, Some(&img), &style("same"));
    let b = compile_layers(&Template::POLAROID, Some(&img), &style("same"));
    assert_eq!(a, b);
}

#[test]
fn caption_line_breaks_become_spaces() {
    let plan = compile_layers(
        &Template::POLAROID,
        None,
        &style("\n Lyon\nParis\r\n2025\u{2028}x\t "),
    );
    let Some(Layer::Caption(c)) = plan.layers.last() else {
        panic!("expected caption layer");
    };
    assert_eq!(c.text, "Lyon Paris  2025 x");
}
