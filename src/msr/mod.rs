//! MSR (Musical Score Representation) input model
//!
//! Read-only, already validated score tree every translator consumes, plus
//! the browser that walks it. Scores are usually assembled with
//! [`MeasureBuilder`] so that note positions, voices and staves are
//! consistent.

pub mod browser;
pub mod builder;
pub mod score;
pub mod types;

pub use browser::{MsrBrowser, MsrElement, MsrVisitor};
pub use builder::MeasureBuilder;
pub use score::*;
pub use types::*;
