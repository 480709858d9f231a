//! Application configuration. Timing, thresholds, content source.

use crate::domain::risk::DEFAULT_DUE_SOON_HOURS;
use crate::usecases::collaboration_feed::DEFAULT_FEED_INTERVAL_MS;
use crate::usecases::playback_controller::DEFAULT_TICK_MS;
use crate::usecases::risk_board::DEFAULT_DISPLAY_LIMIT;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Delay in ms between revealed playback chunks. Read from HUB_SIM_PLAYBACK_TICK_MS.
    #[serde(default)]
    pub playback_tick_ms: Option<u64>,

    /// Delay in ms between collaboration moments. Read from HUB_SIM_FEED_INTERVAL_MS.
    #[serde(default)]
    pub feed_interval_ms: Option<u64>,

    /// "Due soon" window in hours for the risk board. Read from HUB_SIM_DUE_SOON_HOURS.
    #[serde(default)]
    pub due_soon_hours: Option<i64>,

    /// How many at-risk tasks a widget shows. Read from HUB_SIM_RISK_DISPLAY_LIMIT.
    #[serde(default)]
    pub risk_display_limit: Option<usize>,

    /// Optional JSON fixture replacing the built-in mock content. Read from HUB_SIM_CONTENT_PATH.
    #[serde(default)]
    pub content_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("HUB_SIM_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // env wins over file
        c = c.add_source(config::Environment::with_prefix("HUB_SIM"));
        c.build()?.try_deserialize()
    }

    /// Returns the playback tick. Defaults to 1200 ms.
    pub fn playback_tick(&self) -> Duration {
        Duration::from_millis(self.playback_tick_ms.unwrap_or(DEFAULT_TICK_MS))
    }

    /// Returns the feed interval. Defaults to 1200 ms.
    pub fn feed_interval(&self) -> Duration {
        Duration::from_millis(self.feed_interval_ms.unwrap_or(DEFAULT_FEED_INTERVAL_MS))
    }

    /// Returns the due-soon window in hours. Defaults to 12; negative or
    /// unrepresentable values fall back too.
    pub fn due_soon_hours_or_default(&self) -> i64 {
        self.due_soon_hours
            .filter(|h| *h >= 0 && chrono::Duration::try_hours(*h).is_some())
            .unwrap_or(DEFAULT_DUE_SOON_HOURS)
    }

    /// Returns the widget display limit. Defaults to 3.
    pub fn risk_display_limit_or_default(&self) -> usize {
        self.risk_display_limit.unwrap_or(DEFAULT_DISPLAY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskPolicy;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.playback_tick(), Duration::from_millis(1200));
        assert_eq!(cfg.feed_interval(), Duration::from_millis(1200));
        assert_eq!(cfg.due_soon_hours_or_default(), 12);
        assert_eq!(cfg.risk_display_limit_or_default(), 3);
        assert!(cfg.content_path.is_none());
    }

    #[test]
    fn test_overrides_and_invalid_window() {
        let cfg = AppConfig {
            playback_tick_ms: Some(1400),
            feed_interval_ms: Some(1100),
            due_soon_hours: Some(-4),
            risk_display_limit: Some(5),
            content_path: Some("demo.json".to_string()),
        };
        assert_eq!(cfg.playback_tick(), Duration::from_millis(1400));
        assert_eq!(cfg.feed_interval(), Duration::from_millis(1100));
        assert_eq!(cfg.due_soon_hours_or_default(), 12);
        assert_eq!(cfg.risk_display_limit_or_default(), 5);

        let huge = AppConfig {
            due_soon_hours: Some(i64::MAX / 1000),
            ..AppConfig::default()
        };
        assert_eq!(huge.due_soon_hours_or_default(), 12);
        assert_eq!(
            RiskPolicy::with_due_soon_hours(huge.due_soon_hours_or_default()),
            RiskPolicy::default()
        );
    }
}
