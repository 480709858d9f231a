//! Hand-stepped scheduler for tests and scripted demos.
//!
//! A sleep completes only when `fire()` hands out a permit, then the virtual
//! clock moves forward by the slept duration. No real time passes.

use crate::ports::Scheduler;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

pub struct ManualScheduler {
    origin: Instant,
    elapsed: Mutex<Duration>,
    permits: Semaphore,
    sleeping: AtomicUsize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            permits: Semaphore::new(0),
            sleeping: AtomicUsize::new(0),
        }
    }

    /// Complete one pending sleep, or the next one to start.
    pub fn fire(&self) {
        self.permits.add_permits(1);
    }

    /// Number of sleeps currently waiting for `fire()`.
    pub fn sleeping(&self) -> usize {
        self.sleeping.load(Ordering::SeqCst)
    }

    /// Yield to other tasks until at least one sleep is pending.
    pub async fn wait_until_sleeping(&self) {
        while self.sleeping() == 0 {
            tokio::task::yield_now().await;
        }
    }

    /// Virtual time consumed by completed sleeps.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the sleeper count even when the sleep future is dropped (timer cleared).
struct SleepingGuard<'a>(&'a AtomicUsize);

impl Drop for SleepingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Scheduler for ManualScheduler {
    async fn sleep(&self, duration: Duration) {
        self.sleeping.fetch_add(1, Ordering::SeqCst);
        let guard = SleepingGuard(&self.sleeping);
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
        drop(guard);
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner()) += duration;
    }

    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sleep_waits_for_fire() {
        let sched = Arc::new(ManualScheduler::new());
        let s = Arc::clone(&sched);
        let handle = tokio::spawn(async move {
            s.sleep(Duration::from_millis(500)).await;
        });

        sched.wait_until_sleeping().await;
        assert!(!handle.is_finished());
        sched.fire();
        handle.await.unwrap();

        assert_eq!(sched.sleeping(), 0);
        assert_eq!(sched.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_dropped_sleep_releases_count() {
        let sched = Arc::new(ManualScheduler::new());
        let s = Arc::clone(&sched);
        let handle = tokio::spawn(async move {
            s.sleep(Duration::from_secs(1)).await;
        });
        sched.wait_until_sleeping().await;
        handle.abort();
        let _ = handle.await;
        assert_eq!(sched.sleeping(), 0);
        assert_eq!(sched.elapsed(), Duration::ZERO);
    }
}
