//! # Search Debouncer
//!
//! Turns a stream of rapidly changing values (keystrokes in a search box)
//! into one value per pause.
//!
//! ```text
//!  input:   s ─ sh ─ shi ─ shirt ───────────────── shirts ────────────
//!  settle:                       └── 500 ms quiet ──► "shirt"
//!                                                            └── 500 ms ──► "shirts"
//! ```

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::trace;

use shopfront_core::validation::{validate_delay_ms, ValidationResult};
use shopfront_core::DEFAULT_SEARCH_DEBOUNCE_MS;

/// Waits for a watched value to stop changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay }
    }

    /// Builds a debouncer from a configured millisecond value. Negative
    /// values are rejected.
    pub fn from_millis(delay_ms: i64) -> ValidationResult<Self> {
        let delay_ms = validate_delay_ms(delay_ms)?;
        Ok(Debouncer::new(Duration::from_millis(delay_ms)))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next change, then until the value has been quiet for
    /// the delay, and returns the latest value.
    ///
    /// Returns `None` once the sender is gone and nothing is pending. A
    /// change still pending when the sender drops is returned.
    pub async fn settle<T: Clone>(&self, rx: &mut watch::Receiver<T>) -> Option<T> {
        rx.changed().await.ok()?;

        loop {
            match time::timeout(self.delay, rx.changed()).await {
                Ok(Ok(())) => trace!("Input changed, restarting quiet period"),
                Ok(Err(_)) | Err(_) => break,
            }
        }

        Some(rx.borrow_and_update().clone())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[test]
    fn test_from_millis() {
        assert_eq!(
            Debouncer::from_millis(250).unwrap().delay(),
            Duration::from_millis(250)
        );
        assert!(Debouncer::from_millis(-1).is_err());
        assert_eq!(Debouncer::default().delay(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_last_value_after_quiet_period() {
        let (tx, mut rx) = watch::channel(String::new());
        let debouncer = Debouncer::default();

        let task = tokio::spawn(async move {
            let start = Instant::now();
            let value = debouncer.settle(&mut rx).await;
            (value, start.elapsed())
        });

        tx.send("s".to_string()).unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send("sh".to_string()).unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send("shirt".to_string()).unwrap();

        let (value, elapsed) = task.await.unwrap();
        assert_eq!(value.as_deref(), Some("shirt"));
        assert!(elapsed >= Duration::from_millis(700));
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_settle_separately() {
        let (tx, mut rx) = watch::channel(0u32);
        let debouncer = Debouncer::new(Duration::from_millis(50));

        tx.send(1).unwrap();
        assert_eq!(debouncer.settle(&mut rx).await, Some(1));

        tx.send(2).unwrap();
        assert_eq!(debouncer.settle(&mut rx).await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_flushes_then_ends() {
        let (tx, mut rx) = watch::channel(0u32);
        let debouncer = Debouncer::default();

        tx.send(7).unwrap();
        drop(tx);

        assert_eq!(debouncer.settle(&mut rx).await, Some(7));
        assert_eq!(debouncer.settle(&mut rx).await, None);
    }
}
