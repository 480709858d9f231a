//! Text formatting for the terminal screens. Pure functions.

use crate::domain::{CollaborationMoment, PlaybackPhase, RiskReason, Sender};
use chrono::{DateTime, Utc};

/// Fixed-width bar for a percentage in [0, 100].
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn phase_label(phase: PlaybackPhase) -> &'static str {
    match phase {
        PlaybackPhase::Idle => "idle",
        PlaybackPhase::Running => "streaming",
        PlaybackPhase::Paused => "paused",
        PlaybackPhase::Completed => "done",
    }
}

/// "overdue 2h", "due in 45m", "due in 3d".
pub fn due_label(due_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = due_at - now;
    let (prefix, minutes) = if delta < chrono::Duration::zero() {
        ("overdue", -delta.num_minutes())
    } else {
        ("due in", delta.num_minutes())
    };
    let amount = if minutes >= 48 * 60 {
        format!("{}d", minutes / (24 * 60))
    } else if minutes >= 60 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}m", minutes)
    };
    format!("{} {}", prefix, amount)
}

pub fn reasons_label(reasons: &[RiskReason]) -> String {
    reasons
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_moment(m: &CollaborationMoment) -> String {
    let who = match m.sender {
        Sender::Ai => "AI",
        Sender::Human => "HU",
    };
    format!(
        "{} [{}] {} {} ({}): {}",
        m.timestamp, who, m.speaker, m.action, m.stage_id, m.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(100.0, 4), "████");
        assert_eq!(progress_bar(250.0, 4), "████");
    }

    #[test]
    fn test_due_label() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(due_label(now - Duration::minutes(1), now), "overdue 1m");
        assert_eq!(due_label(now + Duration::hours(6), now), "due in 6h");
        assert_eq!(due_label(now + Duration::days(5), now), "due in 5d");
    }

    #[test]
    fn test_reasons_label() {
        assert_eq!(
            reasons_label(&[RiskReason::Critical, RiskReason::AwaitingHandover]),
            "critical, awaiting handover"
        );
    }

    #[test]
    fn test_format_moment() {
        let m = CollaborationMoment {
            id: "m-1".to_string(),
            stage_id: "plan".to_string(),
            timestamp: "09:20".to_string(),
            sender: Sender::Human,
            speaker: "Maya Chen".to_string(),
            action: "approved".to_string(),
            content: "Ship it.".to_string(),
        };
        assert_eq!(format_moment(&m), "09:20 [HU] Maya Chen approved (plan): Ship it.");
    }
}
