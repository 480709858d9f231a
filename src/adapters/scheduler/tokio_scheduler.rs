//! Implements Scheduler on tokio timers.
//!
//! Honours `tokio::time::pause()`, so paused-clock tests drive it too.

use crate::ports::Scheduler;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
