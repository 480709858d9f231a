//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CollaborationMoment, ContentChunk, DomainError, Task};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Timer primitive. Every tick of the controller and producer goes through this.
///
/// Real runs use tokio timers; tests inject a scheduler they step by hand.
#[async_trait::async_trait]
pub trait Scheduler: Send + Sync {
    /// Complete after `duration` has elapsed on this scheduler's clock.
    /// Must be cancel-safe: dropping the future clears the timer.
    async fn sleep(&self, duration: Duration);

    /// Monotonic time on this scheduler's clock.
    fn now(&self) -> Instant;
}

/// Wall-clock time used for deadline heuristics.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of pre-authored demo content (mock data layer).
#[async_trait::async_trait]
pub trait ContentPort: Send + Sync {
    /// Ordered chunks of simulated agent output.
    async fn chunks(&self) -> Result<Vec<ContentChunk>, DomainError>;

    /// Ordered collaboration log entries.
    async fn moments(&self) -> Result<Vec<CollaborationMoment>, DomainError>;

    /// Current task collection. Read-only for the core.
    async fn tasks(&self) -> Result<Vec<Task>, DomainError>;
}
