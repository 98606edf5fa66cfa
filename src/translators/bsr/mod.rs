//! MSR to braille score representation (BSR)

pub mod cells;
pub mod kinds;
pub mod layout;
pub mod translator;

pub use kinds::BsrKind;
pub use translator::MsrToBsrTranslator;

use super::{run_pass, DriverState, TranslatorDriver};
use crate::errors::{Error, SettingsError, TranslationResult};
use crate::msr::MsrScore;
use crate::settings::TranslationSettings;
use crate::tree::Element;

pub struct MsrToBsrDriver<'a> {
    state: DriverState<'a, BsrKind>,
}

impl<'a> MsrToBsrDriver<'a> {
    pub fn new(score: Option<&'a MsrScore>, settings: &'a TranslationSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(MsrToBsrDriver {
            state: DriverState::new(score, settings, Element::new(BsrKind::Score)),
        })
    }
}

impl<'a> TranslatorDriver for MsrToBsrDriver<'a> {
    type Kind = BsrKind;

    fn build_from_source(&mut self) -> TranslationResult<()> {
        let score = self.state.begin("BSR")?;
        let settings = self.state.settings;

        let mut translator = MsrToBsrTranslator::new(settings);
        run_pass(
            "MSR to BSR",
            score,
            &mut translator,
            settings.trace.passes,
            MsrToBsrTranslator::indenter_mut,
        )?;
        self.state.finish(translator.into_tree());
        Ok(())
    }

    fn result(&self) -> &Element<BsrKind> {
        &self.state.root
    }

    fn into_result(self) -> Element<BsrKind> {
        self.state.root
    }

    fn is_built(&self) -> bool {
        self.state.is_built()
    }
}

/// Translate `score` in one call
pub fn translate_to_bsr(score: &MsrScore, settings: &TranslationSettings) -> Result<Element<BsrKind>, Error> {
    let mut driver = MsrToBsrDriver::new(Some(score), settings)?;
    driver.build_from_source()?;
    Ok(driver.into_result())
}
