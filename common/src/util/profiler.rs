use std::time::{Duration, Instant};

/// Logs how long a stage took when it goes out of scope.
pub struct ScopedTimer {
    stage: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(stage: &'static str) -> Self {
        log::debug!("{} started", stage);
        Self {
            stage,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::info!("{} took {:.2?}", self.stage, self.elapsed());
    }
}
