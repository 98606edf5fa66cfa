//! MSR to MusicXML (partwise) element tree

pub mod attributes;
pub mod divisions;
pub mod header;
pub mod kinds;
pub mod notes;
pub mod position;
pub mod translator;

pub use divisions::DivisionsEngine;
pub use kinds::MusicXmlKind;
pub use translator::MsrToMusicXmlTranslator;

use std::collections::HashMap;

use super::{run_pass, DriverState, TranslatorDriver};
use crate::errors::{Error, SettingsError, TranslationResult};
use crate::msr::{ClefKind, MsrScore};
use crate::settings::TranslationSettings;
use crate::tree::Element;

pub const MUSICXML_DOCTYPE: &str = r#"score-partwise PUBLIC "-//Recordare//DTD MusicXML 4.0 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd""#;

pub struct MsrToMusicXmlDriver<'a> {
    state: DriverState<'a, MusicXmlKind>,
    clef_replacements: HashMap<ClefKind, ClefKind>,
}

impl<'a> MsrToMusicXmlDriver<'a> {
    /// Settings are validated here, before any pass can start
    pub fn new(score: Option<&'a MsrScore>, settings: &'a TranslationSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let clef_replacements = settings.clef_replacement_map()?;
        Ok(MsrToMusicXmlDriver {
            state: DriverState::new(score, settings, Element::new(MusicXmlKind::ScorePartwise)),
            clef_replacements,
        })
    }
}

impl<'a> TranslatorDriver for MsrToMusicXmlDriver<'a> {
    type Kind = MusicXmlKind;

    fn build_from_source(&mut self) -> TranslationResult<()> {
        let score = self.state.begin("MusicXML")?;
        let settings = self.state.settings;

        let mut translator = MsrToMusicXmlTranslator::new(settings, self.clef_replacements.clone());
        run_pass(
            "MSR to MusicXML",
            score,
            &mut translator,
            settings.trace.passes,
            MsrToMusicXmlTranslator::indenter_mut,
        )?;
        self.state.finish(translator.into_tree());
        Ok(())
    }

    fn result(&self) -> &Element<MusicXmlKind> {
        &self.state.root
    }

    fn into_result(self) -> Element<MusicXmlKind> {
        self.state.root
    }

    fn is_built(&self) -> bool {
        self.state.is_built()
    }
}

/// Translate `score` in one call
pub fn translate_to_musicxml(
    score: &MsrScore,
    settings: &TranslationSettings,
) -> Result<Element<MusicXmlKind>, Error> {
    let mut driver = MsrToMusicXmlDriver::new(Some(score), settings)?;
    driver.build_from_source()?;
    Ok(driver.into_result())
}
