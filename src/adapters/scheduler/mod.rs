//! Scheduler adapters. Implement the Scheduler port.
//!
//! Tokio timers for real runs, a hand-stepped scheduler for tests.

pub mod manual;
pub mod tokio_scheduler;

pub use manual::ManualScheduler;
pub use tokio_scheduler::TokioScheduler;
