use std::time::{Duration, Instant};

/// Monotonic elapsed-time source for the timed modes and the end-of-run
/// summary. `update` caches the elapsed time so the engine reads one
/// consistent value per tick; pausing freezes the cache and `rebase`
/// realigns the start after an unpause.
#[derive(Clone, Copy)]
pub struct Timer {
    pub start: Instant,
    pub elapsed: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        self.elapsed = self.start.elapsed();
    }

    /// Moves the start so the cached elapsed time stays where it was.
    pub fn rebase(&mut self) {
        self.start = Instant::now() - self.elapsed;
    }

    pub fn ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats milliseconds as MM:SS.mmm for display collaborators.
pub fn ms_to_time(ms: u64) -> String {
    let millis = ms % 1000;
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    format!("{mins:02}:{secs:02}.{millis:03}")
}
