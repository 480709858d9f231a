//! Infrastructure adapters. Implement outbound ports.
//!
//! Timers, clock, content sources, terminal UI. Map errors to DomainError.

pub mod clock;
pub mod content;
pub mod scheduler;
pub mod ui;
