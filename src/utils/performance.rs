//! Pass timing
//!
//! Measures a translation pass and logs how long it took. Informational only.

use std::time::{Duration, Instant};

/// Timer started when a pass begins
pub struct PassTimer {
    pass_name: &'static str,
    started: Instant,
}

impl PassTimer {
    pub fn start(pass_name: &'static str) -> Self {
        log::info!("{}: pass started", pass_name);
        Self {
            pass_name,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the elapsed time and return it in milliseconds
    pub fn finish(self) -> f64 {
        let elapsed_ms = self.elapsed().as_secs_f64() * 1000.0;
        log::info!("{}: pass finished in {:.3} ms", self.pass_name, elapsed_ms);
        elapsed_ms
    }
}
