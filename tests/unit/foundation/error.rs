use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PolaroidError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PolaroidError::missing_input("x")
            .to_string()
            .contains("missing input:")
    );
    assert!(
        PolaroidError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(PolaroidError::font("x").to_string().contains("font error:"));
    assert!(
        PolaroidError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PolaroidError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PolaroidError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
