//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No simulation logic here.

use dotenv::dotenv;
use hub_sim::adapters::clock::SystemClock;
use hub_sim::adapters::content::{JsonContent, MockContent};
use hub_sim::adapters::scheduler::TokioScheduler;
use hub_sim::adapters::ui::tui::TuiInputPort;
use hub_sim::domain::RiskPolicy;
use hub_sim::ports::{ClockPort, ContentPort, InputPort, Scheduler};
use hub_sim::shared::config::AppConfig;
use hub_sim::usecases::RiskBoard;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // stderr + warn by default: the screens draw on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found (check CWD)"),
    }

    hub_sim::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });
    info!(
        playback_tick_ms = cfg.playback_tick().as_millis() as u64,
        feed_interval_ms = cfg.feed_interval().as_millis() as u64,
        due_soon_hours = cfg.due_soon_hours_or_default(),
        "timing configured"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::new());

    // --- Content: JSON fixture if configured, built-in mock data otherwise ---
    let content: Arc<dyn ContentPort> = match cfg.content_path.as_deref() {
        Some(path) => {
            let json = JsonContent::new(path);
            json.load().await.map_err(|e| anyhow::anyhow!("{}", e))?;
            Arc::new(json)
        }
        None => {
            info!("using built-in mock content");
            Arc::new(MockContent::new(Arc::clone(&clock)))
        }
    };

    let risk_board = Arc::new(RiskBoard::new(
        Arc::clone(&content),
        Arc::clone(&clock),
        RiskPolicy::with_due_soon_hours(cfg.due_soon_hours_or_default()),
        cfg.risk_display_limit_or_default(),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        content,
        scheduler,
        risk_board,
        cfg.playback_tick(),
        cfg.feed_interval(),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
