//! Error types for MSR translation
//!
//! Fatal internal errors abort a translation pass; settings errors are
//! raised while configuration is loaded, before any pass starts; render
//! errors come from turning a finished tree into text (or back).

use crate::msr::Rational;
use thiserror::Error;

/// Errors that abort a translation pass
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslationError {
    /// Invariant violation inside a translator (should never happen with a validated MSR)
    #[error("internal error (input line {input_line}): {message}")]
    Internal { message: String, input_line: usize },

    /// A duration could not be expressed as a whole number of divisions
    #[error(
        "duration {duration} whole notes is not an integer number of divisions \
         ({divisions_per_quarter_note} per quarter note), input line {input_line}"
    )]
    NonIntegerDivisions {
        duration: Rational,
        divisions_per_quarter_note: i32,
        input_line: usize,
    },

    /// The driver was asked to build without an MSR score
    #[error("no MSR score to translate")]
    MissingSource,

    /// The driver already ran its pass
    #[error("{0} tree has already been built by this driver")]
    AlreadyBuilt(&'static str),
}

impl TranslationError {
    pub fn internal(message: impl Into<String>, input_line: usize) -> Self {
        TranslationError::Internal {
            message: message.into(),
            input_line,
        }
    }

    /// Input line of the MSR element involved, when there is one
    pub fn input_line(&self) -> Option<usize> {
        match self {
            TranslationError::Internal { input_line, .. } => Some(*input_line),
            TranslationError::NonIntegerDivisions { input_line, .. } => Some(*input_line),
            TranslationError::MissingSource | TranslationError::AlreadyBuilt(_) => None,
        }
    }
}

pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

/// User-input-format errors found while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid clef replacement '{spec}': {reason}")]
    InvalidClefReplacement { spec: String, reason: String },

    #[error("invalid value {value} for option '{name}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("YAML settings error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported settings file extension: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while rendering a tree to text or reading one back
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("XML writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML parsing failed: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unknown element <{0}>")]
    UnknownElement(String),

    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of the one-call helpers, which configure, translate and
/// render in sequence
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_wraps_each_stage() {
        let error: Error = TranslationError::MissingSource.into();
        assert!(matches!(error, Error::Translation(_)));
        assert_eq!(error.to_string(), "no MSR score to translate");

        let error: Error = RenderError::UnknownElement("foo".to_string()).into();
        assert!(error.to_string().contains("<foo>"));
    }

    #[test]
    fn test_internal_error_carries_input_line() {
        let error = TranslationError::internal("unexpected chord nesting", 42);
        assert_eq!(error.input_line(), Some(42));
        assert!(error.to_string().contains("input line 42"));
        assert!(error.to_string().contains("unexpected chord nesting"));
    }

    #[test]
    fn test_non_integer_divisions_message() {
        let error = TranslationError::NonIntegerDivisions {
            duration: Rational::new(1, 6),
            divisions_per_quarter_note: 2,
            input_line: 7,
        };
        let message = error.to_string();
        assert!(message.contains("1/6"));
        assert!(message.contains("2 per quarter note"));
        assert_eq!(error.input_line(), Some(7));
    }

    #[test]
    fn test_missing_source_has_no_line() {
        assert_eq!(TranslationError::MissingSource.input_line(), None);
    }
}
