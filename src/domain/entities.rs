//! Domain entities. Pure data structures for the simulation core.
//!
//! No timer/IO types here — content is supplied by adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit of pre-authored "AI-generated" text revealed by playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentChunk(String);

impl ContentChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentChunk {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Who authored a collaboration moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Ai,
    Human,
}

/// One entry of the live collaboration log between an agent and its operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationMoment {
    pub id: String,
    pub stage_id: String,
    /// Display timestamp as authored (e.g. "09:42").
    pub timestamp: String,
    pub sender: Sender,
    pub speaker: String,
    pub action: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Planned,
    Executing,
    /// AI-originated task waiting for a human to take over or approve it.
    Handover,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// A dashboard task. Owned by the content source; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_at: DateTime<Utc>,
    pub ai_owner: String,
    #[serde(default)]
    pub human_owner: Option<String>,
}

/// Summary of a task collection at a point in time. Derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskAssessment {
    pub total: usize,
    pub executing_count: usize,
    pub handover_count: usize,
    /// At-risk tasks, earliest due first.
    pub at_risk: Vec<Task>,
}

/// Why a task was classified as at risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    Overdue,
    DueSoon,
    Critical,
    AwaitingHandover,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskReason::Overdue => "overdue",
            RiskReason::DueSoon => "due soon",
            RiskReason::Critical => "critical",
            RiskReason::AwaitingHandover => "awaiting handover",
        };
        f.write_str(s)
    }
}
