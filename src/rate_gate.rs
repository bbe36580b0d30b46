//! A timestamp-gate rate limiter shared by every fetch against one
//! endpoint, so concurrent fetches cannot jointly exceed the upstream
//! request quota.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum interval between consecutive releases.
///
/// The last-release instant is the only mutable state and sits behind a
/// `tokio::sync::Mutex` that is held across the wait, so the check and the
/// update form one serialized step: two tasks calling [`RateGate::wait`]
/// at the same time are released at least `min_interval` apart.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_release: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_release: Mutex::new(None),
        }
    }

    /// Waits until at least `min_interval` has passed since the previous
    /// release, then records this release. A zero interval never waits.
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last_release = self.last_release.lock().await;
        let now = Instant::now();
        let release = match *last_release {
            Some(previous) => (previous + self.min_interval).max(now),
            None => now,
        };

        if release > now {
            sleep_until(release).await;
        }

        *last_release = Some(release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn three_releases_take_at_least_two_intervals() {
        let gate = RateGate::new(Duration::from_secs(1));
        let started = Instant::now();

        gate.wait().await;
        gate.wait().await;
        gate.wait().await;

        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_waits() {
        let gate = RateGate::new(Duration::ZERO);
        let started = Instant::now();

        gate.wait().await;
        gate.wait().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_waiters_are_spaced_apart() {
        let gate = Arc::new(RateGate::new(Duration::from_secs(1)));

        let mut tasks = Vec::new();
        for _ in 0..3 {
            let gate = Arc::clone(&gate);
            tasks.push(tokio::spawn(async move {
                gate.wait().await;
                Instant::now()
            }));
        }

        let mut releases = Vec::new();
        for task in tasks {
            releases.push(task.await.expect("gate task panicked"));
        }
        releases.sort();

        for pair in releases.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(1));
        }
    }
}
