//! A cancellable one-shot deadline for debounced re-evaluation.
//!
//! At most one deadline is pending. Scheduling again replaces it, so a burst of
//! edits fires once, after the quiet period that follows the last one.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use xpathquill::inspector::debounce::Debouncer;
//!
//! let start = Instant::now();
//! let mut debouncer = Debouncer::new(Duration::from_millis(400));
//! debouncer.schedule(start);
//! debouncer.schedule(start + Duration::from_millis(300));
//!
//! assert!(!debouncer.fire_if_due(start + Duration::from_millis(500)));
//! assert!(debouncer.fire_if_due(start + Duration::from_millis(700)));
//! assert!(!debouncer.is_pending());
//! ```

use std::time::{Duration, Instant};

/// Quiet period used when none is configured.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Replaces any pending deadline with `now + quiet`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the pending deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before the pending deadline, if any.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
