//! Risk board use case. Every dashboard widget listing urgent tasks goes
//! through here so they all share one heuristic.
//!
//! Fetches tasks from ContentPort, reads ClockPort, classifies, truncates.

use crate::domain::{DomainError, RiskAssessment, RiskPolicy, RiskReason, Task};
use crate::ports::{ClockPort, ContentPort};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Default number of at-risk tasks shown on a widget.
pub const DEFAULT_DISPLAY_LIMIT: usize = 3;

/// An at-risk task with the heuristics that flagged it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskEntry {
    pub task: Task,
    pub reasons: Vec<RiskReason>,
}

/// Classified snapshot ready for rendering.
#[derive(Debug, Clone)]
pub struct RiskDigest {
    pub assessment: RiskAssessment,
    /// First `display_limit` at-risk tasks.
    pub top: Vec<RiskEntry>,
    pub generated_at: DateTime<Utc>,
}

impl RiskDigest {
    /// No task needs attention. Rendered as an explicit "no risk tasks" line,
    /// not confused with a failed load (which is an `Err` from `refresh`).
    pub fn is_healthy(&self) -> bool {
        self.assessment.at_risk.is_empty()
    }

    /// At-risk tasks cut off by the display limit.
    pub fn hidden_count(&self) -> usize {
        self.assessment.at_risk.len() - self.top.len()
    }
}

pub struct RiskBoard {
    content: Arc<dyn ContentPort>,
    clock: Arc<dyn ClockPort>,
    policy: RiskPolicy,
    display_limit: usize,
}

impl RiskBoard {
    pub fn new(
        content: Arc<dyn ContentPort>,
        clock: Arc<dyn ClockPort>,
        policy: RiskPolicy,
        display_limit: usize,
    ) -> Self {
        Self {
            content,
            clock,
            policy,
            display_limit,
        }
    }

    /// Classify the current tasks against the current time. Never cached.
    pub async fn refresh(&self) -> Result<RiskDigest, DomainError> {
        let tasks = self.content.tasks().await?;
        let now = self.clock.now();
        Ok(self.digest(&tasks, now))
    }

    /// Pure part of `refresh`, for callers that already hold the tasks.
    pub fn digest(&self, tasks: &[Task], now: DateTime<Utc>) -> RiskDigest {
        let assessment = self.policy.classify(tasks, now);
        let top = assessment
            .at_risk
            .iter()
            .take(self.display_limit)
            .map(|task| RiskEntry {
                reasons: self.policy.reasons(task, now),
                task: task.clone(),
            })
            .collect();

        info!(
            total = assessment.total,
            executing = assessment.executing_count,
            handover = assessment.handover_count,
            at_risk = assessment.at_risk.len(),
            "risk board refreshed"
        );

        RiskDigest {
            assessment,
            top,
            generated_at: now,
        }
    }
}
