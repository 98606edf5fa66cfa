//! Utility modules shared by the translators
//!
//! Rational arithmetic and note-value lookups, the trace indenter and pass
//! timing.

pub mod durations;
pub mod indenter;
pub mod performance;

pub use durations::*;
pub use indenter::Indenter;
pub use performance::PassTimer;
