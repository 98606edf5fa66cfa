//! Trace indentation
//!
//! Translators indent their debug trace as they enter and leave elements.
//! A pass must leave the indenter where it found it; when it doesn't, the
//! mismatch is logged and the indenter is reset.

#[derive(Debug, Default)]
pub struct Indenter {
    depth: usize,
}

impl Indenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.depth += 1;
    }

    pub fn decrement(&mut self) {
        if self.depth == 0 {
            log::warn!("indenter decremented below zero");
            return;
        }
        self.depth -= 1;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Leading spaces for a trace line
    pub fn prefix(&self) -> String {
        "  ".repeat(self.depth)
    }

    /// Check the indenter is back to zero at the end of a pass.
    /// Returns false (after a warning and a reset) when it isn't.
    pub fn check_balanced(&mut self, pass_name: &str) -> bool {
        if self.depth == 0 {
            return true;
        }
        log::warn!(
            "{}: indentation is {} instead of 0 after the pass, resetting it",
            pass_name,
            self.depth
        );
        self.depth = 0;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_pass() {
        let mut indenter = Indenter::new();
        indenter.increment();
        assert_eq!(indenter.prefix(), "  ");
        indenter.decrement();
        assert!(indenter.check_balanced("test"));
    }

    #[test]
    fn test_unbalanced_pass_is_reset() {
        let mut indenter = Indenter::new();
        indenter.increment();
        indenter.increment();
        assert!(!indenter.check_balanced("test"));
        assert_eq!(indenter.depth(), 0);
    }

    #[test]
    fn test_decrement_saturates() {
        let mut indenter = Indenter::new();
        indenter.decrement();
        assert_eq!(indenter.depth(), 0);
    }
}
