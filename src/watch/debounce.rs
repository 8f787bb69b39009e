// src/watch/debounce.rs

//! Single-slot, cancelable debounce deadline.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Collapses a burst of change notifications into one trigger.
///
/// Holds at most one deadline. [`reset`](Self::reset) pushes it to
/// `quiet_period` from now, [`cancel`](Self::cancel) clears it, and
/// [`elapsed`](Self::elapsed) resolves once it passes.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Replace any pending deadline with one `quiet_period` from now.
    ///
    /// Returns true if a pending deadline was superseded.
    pub fn reset(&mut self) -> bool {
        self.deadline
            .replace(Instant::now() + self.quiet_period)
            .is_some()
    }

    /// Drop the pending deadline without firing.
    ///
    /// Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Resolve when the pending deadline passes, clearing the slot.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future before it resolves leaves the deadline armed.
    pub async fn elapsed(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{advance, timeout};

    use super::*;

    const QUIET: Duration = Duration::from_millis(1000);

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_after_last_notification() {
        let mut debouncer = Debouncer::new(QUIET);

        let mut last = Instant::now();
        for _ in 0..5 {
            last = Instant::now();
            debouncer.reset();
            advance(Duration::from_millis(300)).await;
        }

        debouncer.elapsed().await;
        let waited = Instant::now() - last;
        assert!(waited >= QUIET, "fired early: {waited:?}");
        assert!(waited < QUIET + Duration::from_millis(5), "fired late: {waited:?}");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_before_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.reset();

        let early = timeout(Duration::from_millis(900), debouncer.elapsed()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending(), "timed-out wait must keep the deadline");

        debouncer.elapsed().await;
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_reports_superseded_deadline() {
        let mut debouncer = Debouncer::new(QUIET);
        assert!(!debouncer.reset());
        assert!(debouncer.reset());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_deadline_never_fires() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.reset();
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        let fired = timeout(QUIET * 5, debouncer.elapsed()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_quiet_period_fires_immediately() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let start = Instant::now();
        debouncer.reset();
        debouncer.elapsed().await;
        assert!(Instant::now() - start < Duration::from_millis(5));
    }
}
