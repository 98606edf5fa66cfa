//! MSR tree translators
//!
//! Translates an MSR (Musical Score Representation) into three target
//! element trees: partwise MusicXML, braille music (BSR) and MEI. Each
//! translation is a single browse of the score by a visitor; the trees can
//! then be rendered to XML or braille text.

pub mod errors;
pub mod msr;
pub mod renderers;
pub mod settings;
pub mod translators;
pub mod tree;
pub mod utils;

pub use errors::{Error, RenderError, SettingsError, TranslationError, TranslationResult};
pub use renderers::{parse_xml_tree, render_braille, render_xml, XmlProlog};
pub use settings::TranslationSettings;
pub use translators::bsr::{translate_to_bsr, BsrKind, MsrToBsrDriver};
pub use translators::mei::{translate_to_mei, MeiKind, MsrToMeiDriver};
pub use translators::musicxml::{translate_to_musicxml, MusicXmlKind, MsrToMusicXmlDriver, MUSICXML_DOCTYPE};
pub use translators::TranslatorDriver;
pub use tree::{Element, ElementKind, ElementValue};
