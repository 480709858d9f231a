//! hub-sim: simulation core of an AI agent hub, with Hexagonal Architecture.
//!
//! Streaming playback, a timed collaboration feed and task risk classification.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
