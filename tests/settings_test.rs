// Settings loading and validation, and how drivers react to bad settings

use std::io::Write;

use msr_trees::msr::MsrScore;
use msr_trees::settings::BrailleOutput;
use msr_trees::{MsrToBsrDriver, MsrToMeiDriver, MsrToMusicXmlDriver, SettingsError, TranslationSettings};

#[test]
fn test_empty_documents_give_defaults() {
    assert_eq!(TranslationSettings::from_yaml_str("{}").unwrap(), TranslationSettings::default());
    assert_eq!(TranslationSettings::from_json_str("{}").unwrap(), TranslationSettings::default());
    assert!(!TranslationSettings::default().musicxml_comments());
    assert!(!TranslationSettings::default().tracing());
}

#[test]
fn test_yaml_settings() {
    let yaml = r#"
musicxml_comments: true
trace:
  backup_forward: true
clef_replacements:
  - "treble-8=treble"
braille:
  cells_per_line: 32
  output: ascii
mei:
  id_prefix: "n"
"#;
    let settings = TranslationSettings::from_yaml_str(yaml).expect("valid YAML settings");
    assert!(settings.musicxml_comments());
    assert!(settings.trace.backup_forward);
    assert!(settings.tracing());
    assert_eq!(settings.braille.cells_per_line, 32);
    assert_eq!(settings.braille.lines_per_page, 25);
    assert_eq!(settings.braille.output, BrailleOutput::Ascii);
    assert_eq!(settings.mei.id_prefix, "n");
}

#[test]
fn test_out_of_range_values_rejected() {
    let error = TranslationSettings::from_json_str(r#"{"braille": {"lines_per_page": 2}}"#).unwrap_err();
    assert!(matches!(error, SettingsError::InvalidValue { name: "braille.lines_per_page", .. }));

    let error = TranslationSettings::from_yaml_str("mei:\n  id_prefix: \"9\"\n").unwrap_err();
    assert!(error.to_string().contains("mei.id_prefix"));
}

#[test]
fn test_malformed_clef_replacement_stops_every_driver() {
    let settings = TranslationSettings {
        clef_replacements: vec!["treble".to_string()],
        ..Default::default()
    };
    let score = MsrScore::new();
    assert!(matches!(
        MsrToMusicXmlDriver::new(Some(&score), &settings),
        Err(SettingsError::InvalidClefReplacement { .. })
    ));
    assert!(MsrToMeiDriver::new(Some(&score), &settings).is_err());
    assert!(MsrToBsrDriver::new(Some(&score), &settings).is_err());
}

#[test]
fn test_settings_files() {
    let dir = tempfile::tempdir().expect("temporary directory");

    let yaml_path = dir.path().join("settings.yaml");
    let mut file = std::fs::File::create(&yaml_path).expect("create settings file");
    writeln!(file, "braille:\n  page_numbers: false").expect("write settings");
    let settings = TranslationSettings::from_path(&yaml_path).expect("load YAML file");
    assert!(!settings.braille.page_numbers);

    let json_path = dir.path().join("settings.json");
    std::fs::write(&json_path, r#"{"musicxml_comments": true}"#).expect("write settings");
    assert!(TranslationSettings::from_path(&json_path).expect("load JSON file").musicxml_comments());

    let toml_path = dir.path().join("settings.toml");
    std::fs::write(&toml_path, "").expect("write settings");
    assert!(matches!(
        TranslationSettings::from_path(&toml_path),
        Err(SettingsError::UnsupportedFormat(_))
    ));

    assert!(matches!(
        TranslationSettings::from_path(dir.path().join("missing.yaml")),
        Err(SettingsError::Io(_))
    ));
}
