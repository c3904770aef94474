use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(parse_hex_color("#ff0000").unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(
        parse_hex_color("0000FF80").unwrap(),
        Rgba8::new(0, 0, 255, 128)
    );
    assert_eq!(
        parse_hex_color("  #3a5Fc9 ").unwrap(),
        Rgba8::opaque(0x3a, 0x5f, 0xc9)
    );
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "#fff", "#12345", "#gg0000", "#ff00ff0", "#é00000"] {
        let err = parse_hex_color(bad).unwrap_err();
        assert!(
            matches!(err, PolaroidError::Validation(_)),
            "{bad:?} gave {err}"
        );
    }
}

#[test]
fn to_hex_drops_opaque_alpha() {
    assert_eq!(Rgba8::opaque(1, 2, 255).to_hex(), "#0102ff");
    assert_eq!(Rgba8::new(1, 2, 255, 16).to_hex(), "#0102ff10");
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_value(json!("#ff6b6b")).unwrap();
    assert_eq!(c, Rgba8::opaque(0xff, 0x6b, 0x6b));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#ff6b6b"));

    let err = serde_json::from_value::<Rgba8>(json!("red")).unwrap_err();
    assert!(err.to_string().contains("hex color"));
}

#[test]
fn from_str_matches_parse() {
    let c: Rgba8 = "#333333".parse().unwrap();
    assert_eq!(c, Rgba8::opaque(0x33, 0x33, 0x33));
}
