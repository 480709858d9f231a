//! Application use cases. Drive domain state through ports.

pub mod collaboration_feed;
pub mod playback_controller;
pub mod risk_board;
pub mod timed_producer;

pub use collaboration_feed::CollaborationFeed;
pub use playback_controller::PlaybackController;
pub use risk_board::{RiskBoard, RiskDigest, RiskEntry};
pub use timed_producer::{Emission, EmissionHandle, Produced, TimedProducer};
