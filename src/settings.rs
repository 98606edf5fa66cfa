//! Translation settings
//!
//! One immutable settings object is handed to each translator driver before
//! its pass starts. Everything has a default so that an empty YAML or JSON
//! document is a valid configuration.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;
use crate::msr::ClefKind;

/// Configuration options for all translators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Emit human-readable comment nodes into the MusicXML tree
    pub musicxml_comments: bool,

    /// Debug tracing categories
    pub trace: TraceSettings,

    /// Clef replacements as "old=new" pairs, e.g. "treble-8=treble"
    pub clef_replacements: Vec<String>,

    pub braille: BrailleSettings,

    pub mei: MeiSettings,
}

/// Trace categories, logged at debug level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    pub passes: bool,
    pub parts: bool,
    pub measures: bool,
    pub notes: bool,
    pub divisions: bool,
    pub backup_forward: bool,
    pub tuplets: bool,
    pub chords: bool,
    pub grace_notes: bool,
}

/// Braille cell encoding of the rendered text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrailleOutput {
    /// Unicode braille patterns (U+2800 block)
    #[default]
    Unicode,
    /// North American braille ASCII (BRF)
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrailleSettings {
    pub cells_per_line: usize,
    pub lines_per_page: usize,
    pub page_numbers: bool,
    /// Title line at the top of the first page
    pub heading: bool,
    pub output: BrailleOutput,
}

impl Default for BrailleSettings {
    fn default() -> Self {
        Self {
            cells_per_line: 40,
            lines_per_page: 25,
            page_numbers: true,
            heading: true,
            output: BrailleOutput::Unicode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeiSettings {
    /// Prefix of generated xml:id values
    pub id_prefix: String,
    pub version: String,
}

impl Default for MeiSettings {
    fn default() -> Self {
        Self {
            id_prefix: "m".to_string(),
            version: "5.0".to_string(),
        }
    }
}

const MIN_CELLS_PER_LINE: usize = 10;
const MIN_LINES_PER_PAGE: usize = 3;

impl TranslationSettings {
    /// Getter consulted by the MusicXML translator
    pub fn musicxml_comments(&self) -> bool {
        self.musicxml_comments
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: TranslationSettings = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: TranslationSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Reject malformed values before any pass starts
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.braille.cells_per_line < MIN_CELLS_PER_LINE {
            return Err(SettingsError::InvalidValue {
                name: "braille.cells_per_line",
                value: self.braille.cells_per_line.to_string(),
                reason: format!("must be at least {}", MIN_CELLS_PER_LINE),
            });
        }
        if self.braille.lines_per_page < MIN_LINES_PER_PAGE {
            return Err(SettingsError::InvalidValue {
                name: "braille.lines_per_page",
                value: self.braille.lines_per_page.to_string(),
                reason: format!("must be at least {}", MIN_LINES_PER_PAGE),
            });
        }
        if self.mei.id_prefix.is_empty()
            || !self
                .mei
                .id_prefix
                .chars()
                .next()
                .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        {
            return Err(SettingsError::InvalidValue {
                name: "mei.id_prefix",
                value: format!("'{}'", self.mei.id_prefix),
                reason: "must start with a letter or underscore".to_string(),
            });
        }
        self.clef_replacement_map().map(|_| ())
    }

    /// Parsed clef replacements
    pub fn clef_replacement_map(&self) -> Result<HashMap<ClefKind, ClefKind>, SettingsError> {
        let mut map = HashMap::new();
        for spec in &self.clef_replacements {
            let invalid = |reason: &str| SettingsError::InvalidClefReplacement {
                spec: spec.clone(),
                reason: reason.to_string(),
            };
            let (old, new) = spec
                .split_once('=')
                .ok_or_else(|| invalid("expected 'old=new'"))?;
            let old_clef = ClefKind::from_name(old)
                .ok_or_else(|| invalid(&format!("unknown clef '{}'", old.trim())))?;
            let new_clef = ClefKind::from_name(new)
                .ok_or_else(|| invalid(&format!("unknown clef '{}'", new.trim())))?;
            if map.insert(old_clef, new_clef).is_some() {
                return Err(invalid("clef replaced more than once"));
            }
        }
        Ok(map)
    }

    /// Whether any trace category is on
    pub fn tracing(&self) -> bool {
        self.trace != TraceSettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TranslationSettings::default();
        assert!(!settings.musicxml_comments());
        assert!(!settings.tracing());
        assert_eq!(settings.braille.cells_per_line, 40);
        assert_eq!(settings.braille.lines_per_page, 25);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let settings = TranslationSettings::from_yaml_str("{}").unwrap();
        assert_eq!(settings, TranslationSettings::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = "musicxml_comments: true\n\
                    trace:\n  backup_forward: true\n\
                    clef_replacements: ['treble-8=treble']\n\
                    braille:\n  cells_per_line: 32\n  output: ascii\n";
        let settings = TranslationSettings::from_yaml_str(yaml).unwrap();
        assert!(settings.musicxml_comments());
        assert!(settings.trace.backup_forward);
        assert!(settings.tracing());
        assert_eq!(settings.braille.cells_per_line, 32);
        assert_eq!(settings.braille.output, BrailleOutput::Ascii);
        let map = settings.clef_replacement_map().unwrap();
        assert_eq!(map.get(&ClefKind::TrebleMinus8), Some(&ClefKind::Treble));
    }

    #[test]
    fn test_json_loader() {
        let settings = TranslationSettings::from_json_str(r#"{"mei": {"id_prefix": "x"}}"#).unwrap();
        assert_eq!(settings.mei.id_prefix, "x");
        assert_eq!(settings.mei.version, "5.0");
    }

    #[test]
    fn test_malformed_clef_replacement() {
        let settings = TranslationSettings {
            clef_replacements: vec!["treble".to_string()],
            ..Default::default()
        };
        match settings.validate() {
            Err(SettingsError::InvalidClefReplacement { spec, .. }) => assert_eq!(spec, "treble"),
            other => panic!("expected clef replacement error, got {:?}", other),
        }

        let settings = TranslationSettings {
            clef_replacements: vec!["treble=violin".to_string()],
            ..Default::default()
        };
        let message = settings.validate().unwrap_err().to_string();
        assert!(message.contains("unknown clef 'violin'"));
    }

    #[test]
    fn test_out_of_range_braille_width() {
        let result = TranslationSettings::from_yaml_str("braille:\n  cells_per_line: 4\n");
        assert!(matches!(
            result,
            Err(SettingsError::InvalidValue {
                name: "braille.cells_per_line",
                ..
            })
        ));
    }

    #[test]
    fn test_yaml_syntax_error() {
        let result = TranslationSettings::from_yaml_str("braille: [unclosed");
        assert!(matches!(result, Err(SettingsError::Yaml(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            TranslationSettings::from_path(&path),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }
}
