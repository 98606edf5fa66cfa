//! MSR to MEI translation

pub mod kinds;
pub mod score_def;
pub mod translator;

pub use kinds::MeiKind;
pub use translator::MsrToMeiTranslator;

use std::collections::HashMap;

use super::{run_pass, DriverState, TranslatorDriver};
use crate::errors::{Error, SettingsError, TranslationResult};
use crate::msr::{ClefKind, MsrScore};
use crate::settings::TranslationSettings;
use crate::tree::Element;

pub struct MsrToMeiDriver<'a> {
    state: DriverState<'a, MeiKind>,
    clef_replacements: HashMap<ClefKind, ClefKind>,
}

impl<'a> MsrToMeiDriver<'a> {
    pub fn new(score: Option<&'a MsrScore>, settings: &'a TranslationSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let clef_replacements = settings.clef_replacement_map()?;
        Ok(MsrToMeiDriver {
            state: DriverState::new(score, settings, Element::new(MeiKind::Mei)),
            clef_replacements,
        })
    }
}

impl<'a> TranslatorDriver for MsrToMeiDriver<'a> {
    type Kind = MeiKind;

    fn build_from_source(&mut self) -> TranslationResult<()> {
        let score = self.state.begin("MEI")?;
        let settings = self.state.settings;

        let mut translator = MsrToMeiTranslator::new(settings, self.clef_replacements.clone());
        run_pass(
            "MSR to MEI",
            score,
            &mut translator,
            settings.trace.passes,
            MsrToMeiTranslator::indenter_mut,
        )?;
        self.state.finish(translator.into_tree());
        Ok(())
    }

    fn result(&self) -> &Element<MeiKind> {
        &self.state.root
    }

    fn into_result(self) -> Element<MeiKind> {
        self.state.root
    }

    fn is_built(&self) -> bool {
        self.state.is_built()
    }
}

/// Translate `score` in one call
pub fn translate_to_mei(score: &MsrScore, settings: &TranslationSettings) -> Result<Element<MeiKind>, Error> {
    let mut driver = MsrToMeiDriver::new(Some(score), settings)?;
    driver.build_from_source()?;
    Ok(driver.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TranslationError;
    use crate::msr::*;

    #[test]
    fn test_driver_contract() {
        let mut score = MsrScore::new();
        let measure = MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::Bass)
            .note(MsrNote::rest(Rational::new(1, 1)))
            .build();
        score.add_part(MsrPart::new("P1", "Cello").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, vec![measure]))));
        let settings = TranslationSettings::default();
        let mut driver = MsrToMeiDriver::new(Some(&score), &settings).unwrap();
        assert!(!driver.is_built());
        driver.build_from_source().unwrap();
        assert!(driver.is_built());
        assert_eq!(driver.build_from_source(), Err(TranslationError::AlreadyBuilt("MEI")));
        assert_eq!(driver.result().kind(), MeiKind::Mei);
    }

    #[test]
    fn test_missing_source() {
        let settings = TranslationSettings::default();
        let mut driver = MsrToMeiDriver::new(None, &settings).unwrap();
        assert_eq!(driver.build_from_source(), Err(TranslationError::MissingSource));
        assert!(!driver.is_built());
    }

    #[test]
    fn test_clef_replacement_reaches_staff_def() {
        let mut score = MsrScore::new();
        let measure = MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::Treble)
            .note(MsrNote::rest(Rational::new(1, 1)))
            .build();
        score.add_part(MsrPart::new("P1", "Viola").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, vec![measure]))));
        let mut settings = TranslationSettings::default();
        settings.clef_replacements = vec!["treble=alto".to_string()];
        let mut driver = MsrToMeiDriver::new(Some(&score), &settings).unwrap();
        driver.build_from_source().unwrap();
        let clef = driver
            .result()
            .descendants()
            .into_iter()
            .find(|node| node.kind() == MeiKind::Clef)
            .unwrap();
        assert_eq!(clef.attribute("shape"), Some("C"));
        assert_eq!(clef.attribute("line"), Some("3"));
    }
}
