//! Core domain layer. No timers, no I/O.
//!
//! Entities, the playback state machine and the risk heuristics live here.

pub mod entities;
pub mod errors;
pub mod playback;
pub mod risk;

pub use entities::{
    CollaborationMoment, ContentChunk, RiskAssessment, RiskReason, Sender, Task, TaskPriority,
    TaskStatus,
};
pub use errors::DomainError;
pub use playback::{PlaybackPhase, PlaybackState};
pub use risk::{RiskPolicy, classify};
