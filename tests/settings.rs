//! ParseOptions, SubtitleSettings and Language tests.

use std::fs;

use subcue::{
    Decoration, FontFamily, Language, MarkupMode, ParseOptions, RealLanguage, SubcueError,
    SubtitleSettings,
};

// ── ParseOptions builder ─────────────────────────────────────────

#[test]
fn parse_options_defaults() {
    let options = ParseOptions::new();
    assert!(!options.strict_timing());
    assert_eq!(options.markup(), MarkupMode::Simple);
    assert_eq!(options.default_encoding(), None);
}

#[test]
fn parse_options_builder() {
    let options = ParseOptions::new()
        .with_strict_timing(true)
        .with_markup(MarkupMode::Nested)
        .with_default_encoding("windows-1252");

    assert!(options.strict_timing());
    assert_eq!(options.markup(), MarkupMode::Nested);
    assert_eq!(options.default_encoding(), Some("windows-1252"));
}

// ── SubtitleSettings ─────────────────────────────────────────────

#[test]
fn settings_defaults_from_empty_json() {
    let settings = SubtitleSettings::from_json("{}").expect("Failed to parse settings");
    assert_eq!(settings, SubtitleSettings::default());
    assert_eq!(settings.font_family, FontFamily::Arial);
    assert_eq!(settings.font_size, 24);
    assert_eq!(settings.decoration, Decoration::Outline);
}

#[test]
fn settings_full_json() {
    let json = r#"{
        "font_family": "Trebuchet MS",
        "font_size": 30,
        "bold": true,
        "decoration": "see_through_background",
        "preferred_language": "pt-br",
        "default_encoding": "iso-8859-1",
        "markup": "nested"
    }"#;
    let settings = SubtitleSettings::from_json(json).expect("Failed to parse settings");

    let style = settings.style();
    assert_eq!(style.font_family(), FontFamily::TrebuchetMs);
    assert_eq!(style.font_size(), 30);
    assert!(style.bold());
    assert_eq!(style.decoration(), Decoration::SeeThroughBackground);
    assert_eq!(style.offset_seconds(), 0.0);

    assert_eq!(
        settings.selector().preferred_language(),
        Some(Language::Real(RealLanguage::BrazilianPortuguese))
    );

    let options = settings.parse_options();
    assert_eq!(options.markup(), MarkupMode::Nested);
    assert_eq!(options.default_encoding(), Some("iso-8859-1"));
}

#[test]
fn settings_reject_unknown_values() {
    let result = SubtitleSettings::from_json(r#"{ "font_family": "Papyrus" }"#);
    assert!(matches!(result, Err(SubcueError::Settings(_))), "Got: {result:?}");

    let result = SubtitleSettings::from_json(r#"{ "preferred_language": "xx" }"#);
    assert!(matches!(result, Err(SubcueError::Settings(_))), "Got: {result:?}");
}

#[test]
fn settings_file_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("settings.json");

    let settings = SubtitleSettings {
        font_family: FontFamily::Verdana,
        preferred_language: Some(Language::Real(RealLanguage::Dutch)),
        ..SubtitleSettings::default()
    };
    fs::write(&path, settings.to_json().expect("Failed to serialize")).expect("Failed to write");

    let loaded = SubtitleSettings::load(&path).expect("Failed to load settings");
    assert_eq!(loaded, settings);
}

#[test]
fn settings_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = SubtitleSettings::load(dir.path().join("nope.json"));
    assert!(matches!(result, Err(SubcueError::IoError(_))), "Got: {result:?}");
}

// ── Language ─────────────────────────────────────────────────────

#[test]
fn language_codes_round_trip() {
    for language in RealLanguage::ALL {
        let parsed: Language = language.code().parse().expect("Failed to parse code");
        assert_eq!(parsed, Language::Real(language));
    }
}

#[test]
fn language_special_values() {
    assert!(Language::None.is_special());
    assert!(Language::Custom.is_special());
    assert!(!Language::Real(RealLanguage::English).is_special());
    assert_eq!("NONE".parse::<Language>().ok(), Some(Language::None));
    assert_eq!(
        "pb".parse::<Language>().ok(),
        Some(Language::Real(RealLanguage::BrazilianPortuguese))
    );
    assert_eq!(Language::Custom.real(), None);
}

#[test]
fn language_order_puts_sentinels_first() {
    assert!(Language::None < Language::Custom);
    assert!(Language::Custom < Language::Real(RealLanguage::Arabic));
    assert!(Language::Real(RealLanguage::Arabic) < Language::Real(RealLanguage::Chinese));
}

#[test]
fn unknown_language_error_message() {
    let error = "xx".parse::<Language>().expect_err("Unknown code should fail");
    assert_eq!(format!("{error}"), "Unknown language: \"xx\"");
}
