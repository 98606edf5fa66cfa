//! MSR translators
//!
//! Each target format has a translator (an [`MsrVisitor`] building the
//! target tree during a single browse of the score) and a driver owning
//! the inputs and the result. Drivers build at most once.

pub mod bsr;
pub mod mei;
pub mod musicxml;

use crate::errors::{TranslationError, TranslationResult};
use crate::msr::{MsrBrowser, MsrScore, MsrVisitor};
use crate::settings::TranslationSettings;
use crate::tree::{Element, ElementKind};
use crate::utils::{Indenter, PassTimer};

pub use bsr::MsrToBsrDriver;
pub use mei::MsrToMeiDriver;
pub use musicxml::MsrToMusicXmlDriver;

/// Common driver surface
pub trait TranslatorDriver {
    type Kind: ElementKind;

    /// Run the translation pass. Fails with `AlreadyBuilt` on a second
    /// call and with `MissingSource` when there is no score.
    fn build_from_source(&mut self) -> TranslationResult<()>;

    /// The built tree, or an empty root element before a successful build
    fn result(&self) -> &Element<Self::Kind>;

    fn into_result(self) -> Element<Self::Kind>;

    fn is_built(&self) -> bool;
}

/// Inputs and result shared by the drivers
pub(crate) struct DriverState<'a, K: ElementKind> {
    pub score: Option<&'a MsrScore>,
    pub settings: &'a TranslationSettings,
    pub root: Element<K>,
    attempted: bool,
    built: bool,
}

impl<'a, K: ElementKind> DriverState<'a, K> {
    pub fn new(score: Option<&'a MsrScore>, settings: &'a TranslationSettings, empty_root: Element<K>) -> Self {
        DriverState {
            score,
            settings,
            root: empty_root,
            attempted: false,
            built: false,
        }
    }

    /// Mark the build as attempted and hand out the score
    pub fn begin(&mut self, target: &'static str) -> TranslationResult<&'a MsrScore> {
        if self.attempted {
            return Err(TranslationError::AlreadyBuilt(target));
        }
        self.attempted = true;
        self.score.ok_or(TranslationError::MissingSource)
    }

    pub fn finish(&mut self, root: Element<K>) {
        self.root = root;
        self.built = true;
    }

    pub fn is_built(&self) -> bool {
        self.built
    }
}

/// Browse `score` with `visitor`, timing the pass and checking the
/// visitor's indentation is balanced afterwards
pub(crate) fn run_pass<'a, V>(
    pass_name: &'static str,
    score: &'a MsrScore,
    visitor: &mut V,
    trace: bool,
    indenter: impl FnOnce(&mut V) -> &mut Indenter,
) -> TranslationResult<()>
where
    V: MsrVisitor<'a>,
{
    let timer = PassTimer::start(pass_name);
    MsrBrowser::new(&mut *visitor).with_trace(trace).browse_score(score)?;
    indenter(visitor).check_balanced(pass_name);
    timer.finish();
    Ok(())
}
