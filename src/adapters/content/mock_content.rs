//! Built-in demo content. Implements ContentPort without touching disk.
//!
//! Task deadlines are placed relative to the injected clock so the risk
//! board always shows a realistic mix.

use crate::domain::{
    CollaborationMoment, ContentChunk, DomainError, Sender, Task, TaskPriority, TaskStatus,
};
use crate::ports::{ClockPort, ContentPort};
use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

const AGENT_OUTPUT: &[&str] = &[
    "Reading the Q3 onboarding funnel export (14,202 sessions)...",
    "Drop-off concentrates on step 3: workspace invite, 41% abandon.",
    "Cross-checking with support tickets: 63 mention the invite email landing in spam.",
    "Hypothesis: the sender domain lacks DMARC alignment after the DNS migration.",
    "Drafting a fix plan: re-sign outbound mail, add in-app invite link as fallback.",
    "Plan ready for review. Estimated recovery: +9 to +12 points of activation.",
];

/// (stage, time, sender, speaker, action, content)
const MOMENTS: &[(&str, &str, Sender, &str, &str, &str)] = &[
    (
        "discover",
        "09:02",
        Sender::Ai,
        "Atlas",
        "flagged",
        "Activation dipped 8% week over week; invite step is the outlier.",
    ),
    (
        "discover",
        "09:05",
        Sender::Human,
        "Maya Chen",
        "asked",
        "Is it all regions or just EU tenants?",
    ),
    (
        "analyze",
        "09:11",
        Sender::Ai,
        "Atlas",
        "answered",
        "All regions. Spam-folder placement correlates with the DNS change on the 14th.",
    ),
    (
        "plan",
        "09:20",
        Sender::Ai,
        "Atlas",
        "proposed",
        "Rotate DKIM keys and ship an in-app invite link behind a flag.",
    ),
    (
        "plan",
        "09:26",
        Sender::Human,
        "Maya Chen",
        "approved",
        "Go ahead with the flag; keep the DNS change for the infra review.",
    ),
    (
        "handover",
        "09:31",
        Sender::Ai,
        "Atlas",
        "handed over",
        "DNS ticket assigned to Ravi for sign-off; flag rollout starts at 10:00.",
    ),
];

/// Mock content adapter.
pub struct MockContent {
    clock: Arc<dyn ClockPort>,
}

impl MockContent {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }
}

#[async_trait::async_trait]
impl ContentPort for MockContent {
    async fn chunks(&self) -> Result<Vec<ContentChunk>, DomainError> {
        debug!(count = AGENT_OUTPUT.len(), "[MOCK] serving agent output chunks");
        Ok(AGENT_OUTPUT.iter().map(|s| ContentChunk::from(*s)).collect())
    }

    async fn moments(&self) -> Result<Vec<CollaborationMoment>, DomainError> {
        Ok(MOMENTS
            .iter()
            .enumerate()
            .map(
                |(i, (stage, time, sender, speaker, action, content))| CollaborationMoment {
                    id: format!("m-{}", i + 1),
                    stage_id: stage.to_string(),
                    timestamp: time.to_string(),
                    sender: *sender,
                    speaker: speaker.to_string(),
                    action: action.to_string(),
                    content: content.to_string(),
                },
            )
            .collect())
    }

    async fn tasks(&self) -> Result<Vec<Task>, DomainError> {
        let now = self.clock.now();
        let task = |id: &str,
                    title: &str,
                    status: TaskStatus,
                    priority: TaskPriority,
                    due_in: Duration,
                    human: Option<&str>| Task {
            id: id.to_string(),
            title: title.to_string(),
            status,
            priority,
            due_at: now + due_in,
            ai_owner: "Atlas".to_string(),
            human_owner: human.map(str::to_string),
        };

        Ok(vec![
            task(
                "T-101",
                "Rotate DKIM keys",
                TaskStatus::Executing,
                TaskPriority::High,
                Duration::hours(30),
                None,
            ),
            task(
                "T-102",
                "Sign off DNS change",
                TaskStatus::Handover,
                TaskPriority::Medium,
                Duration::days(3),
                Some("Ravi Patel"),
            ),
            task(
                "T-103",
                "Ship in-app invite link",
                TaskStatus::Executing,
                TaskPriority::Critical,
                Duration::hours(20),
                Some("Maya Chen"),
            ),
            task(
                "T-104",
                "Weekly activation digest",
                TaskStatus::Planned,
                TaskPriority::Low,
                Duration::hours(6),
                None,
            ),
            task(
                "T-105",
                "Backfill funnel dashboard",
                TaskStatus::Executing,
                TaskPriority::Medium,
                Duration::minutes(-45),
                None,
            ),
            task(
                "T-106",
                "Archive old invite templates",
                TaskStatus::Completed,
                TaskPriority::Low,
                Duration::days(9),
                None,
            ),
        ])
    }
}
