use super::*;
use crate::layout::template::Template;

fn system_font() -> Option<CaptionFont> {
    match CaptionFont::resolve(&Template::POLAROID.caption, &[]) {
        Ok(font) => Some(font),
        Err(e) => {
            eprintln!("skipping: {e}");
            None
        }
    }
}

#[test]
fn from_bytes_rejects_empty() {
    assert!(matches!(
        CaptionFont::from_bytes(Vec::new()),
        Err(PolaroidError::Font(_))
    ));
}

#[test]
fn from_path_reports_missing_file() {
    let err = CaptionFont::from_path("target/no/such/font.ttf").unwrap_err();
    assert!(err.to_string().contains("font.ttf"));
}

#[test]
fn garbage_bytes_register_no_family() {
    let font = CaptionFont::from_bytes(b"not a font".to_vec()).unwrap();
    assert!(matches!(
        TextLayoutEngine::new(&font),
        Err(PolaroidError::Font(_))
    ));
}

#[test]
fn bundled_font_shapes_a_single_line() {
    let font = CaptionFont::bundled();
    assert_eq!(font.index(), 0);
    assert!(!font.bytes().is_empty());

    let mut engine = TextLayoutEngine::new(&font).unwrap();
    assert_eq!(engine.family_name(), "Tuffy");

    let brush = TextBrushRgba8 {
        r: 0x33,
        g: 0x33,
        b: 0x33,
        a: 255,
    };
    let short = engine.layout_line("Lyon", 40.0, 700, brush).unwrap();
    let long = engine
        .layout_line("Lyon2, Septembre 2025 and a much longer tail", 40.0, 700, brush)
        .unwrap();

    assert_eq!(long.lines().count(), 1);
    assert!(short.width() > 0.0);
    assert!(long.width() > short.width());
}

#[test]
fn resolve_or_bundled_always_registers() {
    let font = CaptionFont::resolve_or_bundled(&Template::POLAROID.caption, &[]);
    let engine = TextLayoutEngine::new(&font).unwrap();
    assert!(!engine.family_name().trim().is_empty());
}

#[test]
fn resolved_system_font_registers() {
    let Some(font) = system_font() else {
        return;
    };
    assert!(TextLayoutEngine::new(&font).is_ok());
}

#[test]
fn layout_rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new(&CaptionFont::bundled()).unwrap();
    assert!(
        engine
            .layout_line("x", 0.0, 400, TextBrushRgba8::default())
            .is_err()
    );
}
