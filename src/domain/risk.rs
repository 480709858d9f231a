//! Task risk classification. Pure function of `(tasks, now)`.
//!
//! One shared heuristic for every dashboard surface that lists urgent tasks.

use crate::domain::{RiskAssessment, RiskReason, Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Duration, Utc};

/// Default "due soon" window in hours.
pub const DEFAULT_DUE_SOON_HOURS: i64 = 12;

/// Thresholds for the at-risk predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskPolicy {
    /// Tasks due within this window (inclusive) are at risk.
    pub due_soon: Duration,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            due_soon: Duration::hours(DEFAULT_DUE_SOON_HOURS),
        }
    }
}

impl RiskPolicy {
    /// Window of `hours`. Negative or out-of-range values give the default window.
    pub fn with_due_soon_hours(hours: i64) -> Self {
        match Duration::try_hours(hours) {
            Some(due_soon) if hours >= 0 => Self { due_soon },
            _ => Self::default(),
        }
    }

    /// Every heuristic that flags `task` at `now`. Empty means not at risk.
    pub fn reasons(&self, task: &Task, now: DateTime<Utc>) -> Vec<RiskReason> {
        let mut reasons = Vec::new();
        if task.due_at < now {
            reasons.push(RiskReason::Overdue);
        } else if task.due_at - now <= self.due_soon {
            reasons.push(RiskReason::DueSoon);
        }
        if task.priority == TaskPriority::Critical {
            reasons.push(RiskReason::Critical);
        }
        if task.status == TaskStatus::Handover {
            reasons.push(RiskReason::AwaitingHandover);
        }
        reasons
    }

    pub fn is_at_risk(&self, task: &Task, now: DateTime<Utc>) -> bool {
        task.due_at < now
            || task.due_at - now <= self.due_soon
            || task.priority == TaskPriority::Critical
            || task.status == TaskStatus::Handover
    }

    /// Counts plus the full at-risk subset, earliest due first.
    /// Ties keep input order; truncation is left to the caller.
    pub fn classify(&self, tasks: &[Task], now: DateTime<Utc>) -> RiskAssessment {
        let executing_count = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Executing)
            .count();
        let handover_count = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Handover)
            .count();

        let mut at_risk: Vec<Task> = tasks
            .iter()
            .filter(|t| self.is_at_risk(t, now))
            .cloned()
            .collect();
        // sort_by_key is stable
        at_risk.sort_by_key(|t| t.due_at);

        RiskAssessment {
            total: tasks.len(),
            executing_count,
            handover_count,
            at_risk,
        }
    }
}

/// Classify with the default 12 hour window.
pub fn classify(tasks: &[Task], now: DateTime<Utc>) -> RiskAssessment {
    RiskPolicy::default().classify(tasks, now)
}
