//! Minimum-interval pacing for reasoning-service calls
//!
//! Every caller reserves a start slot before calling the service. Slots are
//! handed out at least `min_interval` apart, so one pacer shared across
//! tasks throttles all of them together.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Default gap between call starts (3 seconds)
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

/// Shared rate-limiting gate
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer; a zero interval disables pacing
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A pacer that never waits
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until this caller may start its call
    ///
    /// The first call proceeds at once.
    pub async fn wait_turn(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };

        let wait = slot.saturating_duration_since(Instant::now());
        if wait.is_zero() {
            return;
        }
        debug!("Pacing reasoning-service call for {:?}", wait);
        sleep_until(slot).await;
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn assert_near(actual: Duration, expected: Duration) {
        let slack = Duration::from_millis(5);
        assert!(
            actual >= expected && actual <= expected + slack,
            "expected about {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_is_immediate() {
        let pacer = RequestPacer::default();
        let start = Instant::now();
        pacer.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_are_spaced() {
        let pacer = RequestPacer::new(Duration::from_secs(3));
        let start = Instant::now();

        pacer.wait_turn().await;
        pacer.wait_turn().await;
        assert_near(start.elapsed(), Duration::from_secs(3));
        pacer.wait_turn().await;
        assert_near(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_counts_toward_interval() {
        let pacer = RequestPacer::new(Duration::from_secs(3));
        pacer.wait_turn().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        let before = Instant::now();
        pacer.wait_turn().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_across_tasks() {
        let pacer = Arc::new(RequestPacer::new(Duration::from_secs(2)));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let pacer = Arc::clone(&pacer);
                tokio::spawn(async move {
                    pacer.wait_turn().await;
                    Instant::now()
                })
            })
            .collect();

        let mut times = Vec::new();
        for handle in handles {
            times.push(handle.await.unwrap().duration_since(start));
        }
        times.sort();
        assert_eq!(times[0], Duration::ZERO);
        assert_near(times[1], Duration::from_secs(2));
        assert_near(times[2], Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unpaced_never_waits() {
        let pacer = RequestPacer::unpaced();
        let start = Instant::now();
        for _ in 0..5 {
            pacer.wait_turn().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
