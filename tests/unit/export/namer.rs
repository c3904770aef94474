use super::*;

#[test]
fn blank_or_symbol_only_captions_use_default() {
    for caption in ["", "   ", "\t\n", "!!!", "é à ü", "---", "_ _"] {
        assert_eq!(export_file_name(caption), DEFAULT_EXPORT_NAME, "{caption:?}");
    }
}

#[test]
fn words_are_lowercased_and_joined() {
    assert_eq!(
        export_file_name("Lyon2, Septembre 2025"),
        "lyon2_septembre_2025.png"
    );
    assert_eq!(export_file_name("  Hello   World  "), "hello_world.png");
    assert_eq!(export_file_name("Summer\t\n2024"), "summer_2024.png");
    assert_eq!(export_file_name("A"), "a.png");
}

#[test]
fn non_ascii_letters_are_dropped() {
    assert_eq!(export_file_name("Café Crème"), "caf_crme.png");
    assert_eq!(export_file_name("東京 2025"), "2025.png");
}

#[test]
fn punctuation_between_spaces_does_not_leave_double_separators() {
    assert_eq!(export_file_name("rock & roll"), "rock_roll.png");
    assert_eq!(export_file_name("! hi !"), "hi.png");
    assert_eq!(export_file_name("snake_case name"), "snakecase_name.png");
}

#[test]
fn output_alphabet_is_restricted() {
    let name = export_file_name("Ünïcödé / path\\..\\ <tags> 42");
    let stem = name.strip_suffix(EXPORT_EXTENSION).unwrap();
    assert!(!stem.is_empty());
    assert!(
        stem.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    );
    assert!(!stem.starts_with('_') && !stem.ends_with('_') && !stem.contains("__"));
}
