//! Implements InputPort. Inquire menu plus three live screens:
//!
//! - Playback: raw-mode keys (space/p toggle, s start, r reset, q back)
//! - Collaboration feed: indicatif progress, Ctrl-C cancels the feed
//! - Risk board: one-shot colored report

use crate::adapters::ui::banner::{CYBER_GREEN, NEON_PURPLE, rgb};
use crate::adapters::ui::format::{
    due_label, format_moment, phase_label, progress_bar, reasons_label,
};
use crate::domain::{ContentChunk, DomainError, PlaybackPhase};
use crate::ports::{ContentPort, InputPort, Scheduler};
use crate::usecases::{CollaborationFeed, PlaybackController, RiskBoard, TimedProducer};
use async_trait::async_trait;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{ExecutableCommand, QueueableCommand};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Color as PromptColor, RenderConfig, Styled};
use inquire::Select;
use std::io::{Stdout, Write, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

const MENU_PLAYBACK: &str = "Agent stream playback";
const MENU_FEED: &str = "Collaboration timeline";
const MENU_RISK: &str = "Risk board";
const MENU_QUIT: &str = "Quit";

const BAR_WIDTH: usize = 30;

/// Applies the neon prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("›").with_fg(PromptColor::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(PromptColor::LightCyan));
    inquire::set_global_render_config(config);
}

fn ui_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// TUI adapter.
pub struct TuiInputPort {
    content: Arc<dyn ContentPort>,
    scheduler: Arc<dyn Scheduler>,
    risk_board: Arc<RiskBoard>,
    playback_tick: Duration,
    feed_interval: Duration,
}

impl TuiInputPort {
    pub fn new(
        content: Arc<dyn ContentPort>,
        scheduler: Arc<dyn Scheduler>,
        risk_board: Arc<RiskBoard>,
        playback_tick: Duration,
        feed_interval: Duration,
    ) -> Self {
        Self {
            content,
            scheduler,
            risk_board,
            playback_tick,
            feed_interval,
        }
    }

    async fn run_playback(&self) -> Result<(), DomainError> {
        let chunks = self.content.chunks().await?;
        if chunks.is_empty() {
            println!("No agent output to play back.");
            return Ok(());
        }
        let mut controller =
            PlaybackController::new(chunks, self.playback_tick, Arc::clone(&self.scheduler));
        let mut rx = controller.subscribe();

        println!("[space] pause/resume  [s] start  [r] reset  [q] back");
        let _raw = RawMode::enable()?;
        let stop = CancellationToken::new();
        let (mut keys, reader) = spawn_key_reader(stop.clone());

        let mut out = stdout();
        let mut printed = 0usize;
        controller.start();

        let result = loop {
            rx.borrow_and_update();
            if let Err(e) = draw_playback(&mut out, &controller, &mut printed) {
                break Err(ui_err(e));
            }
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break Ok(());
                    }
                }
                key = keys.recv() => match key {
                    Some(k) if is_back(&k) => break Ok(()),
                    Some(k) => match k.code {
                        KeyCode::Char(' ') | KeyCode::Char('p') => controller.toggle_pause(),
                        KeyCode::Char('s') | KeyCode::Enter => controller.start(),
                        KeyCode::Char('r') => controller.reset(),
                        _ => {}
                    },
                    None => break Ok(()),
                },
            }
        };

        stop.cancel();
        let _ = reader.await;
        let _ = out.execute(Print("\r\n"));
        result
    }

    async fn run_feed(&self) -> Result<(), DomainError> {
        let moments = self.content.moments().await?;
        let total = moments.len() as u64;
        let producer = TimedProducer::new(Arc::clone(&self.scheduler));
        let mut feed = CollaborationFeed::start(&producer, moments, self.feed_interval);

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.magenta} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .map_err(ui_err)?
                .progress_chars("█▓░"),
        );
        pb.set_message("live (Ctrl-C to stop)");
        pb.enable_steady_tick(Duration::from_millis(100));

        let cancel = feed.cancellation();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });

        while let Some(moment) = feed.pump().await {
            pb.println(format_moment(moment));
            pb.inc(1);
        }
        ctrl_c.abort();

        if feed.is_cancelled() {
            pb.abandon_with_message(format!("stopped after {} moments", feed.log().len()));
        } else {
            pb.finish_with_message("timeline complete");
        }
        Ok(())
    }

    async fn run_risk(&self) -> Result<(), DomainError> {
        let digest = self.risk_board.refresh().await?;
        let a = &digest.assessment;
        let mut out = stdout();

        println!(
            "Tasks: {}  Executing: {}  Handover: {}  At risk: {}",
            a.total,
            a.executing_count,
            a.handover_count,
            a.at_risk.len()
        );

        if digest.is_healthy() {
            out.queue(SetForegroundColor(rgb(CYBER_GREEN)))
                .and_then(|o| o.queue(Print("✓ No risk tasks: everything is on track\n")))
                .and_then(|o| o.queue(ResetColor))
                .map_err(ui_err)?;
        } else {
            for entry in &digest.top {
                let line = format!(
                    "! {:<10} {} [{}] ({})\n",
                    due_label(entry.task.due_at, digest.generated_at),
                    entry.task.title,
                    entry.task.priority,
                    reasons_label(&entry.reasons)
                );
                out.queue(SetForegroundColor(rgb(NEON_PURPLE)))
                    .and_then(|o| o.queue(Print(line)))
                    .and_then(|o| o.queue(ResetColor))
                    .map_err(ui_err)?;
            }
            if digest.hidden_count() > 0 {
                out.queue(Print(format!("  +{} more\n", digest.hidden_count())))
                    .map_err(ui_err)?;
            }
        }
        out.flush().map_err(ui_err)
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = Select::new(
                "Hub simulation",
                vec![MENU_PLAYBACK, MENU_FEED, MENU_RISK, MENU_QUIT],
            )
            .prompt();

            let result = match choice {
                Ok(MENU_PLAYBACK) => self.run_playback().await,
                Ok(MENU_FEED) => self.run_feed().await,
                Ok(MENU_RISK) => self.run_risk().await,
                Ok(_) => return Ok(()),
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(e) => return Err(ui_err(e)),
            };

            // content errors are shown, the menu stays up
            if let Err(e) = result {
                warn!(error = %e, "screen failed");
                println!("Error: {}", e);
            }
        }
    }
}

/// Raw terminal mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self, DomainError> {
        terminal::enable_raw_mode().map_err(ui_err)?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn is_back(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Forward key presses from a blocking poll loop until `stop` fires.
fn spawn_key_reader(
    stop: CancellationToken,
) -> (
    mpsc::UnboundedReceiver<KeyEvent>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::task::spawn_blocking(move || {
        while !stop.is_cancelled() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
    (rx, handle)
}

/// Chunks revealed since the last draw, and whether a reset happened in between.
fn unprinted<'a>(revealed: &'a [ContentChunk], printed: &mut usize) -> (bool, &'a [ContentChunk]) {
    let was_reset = revealed.len() < *printed;
    if was_reset {
        *printed = 0;
    }
    let fresh = &revealed[*printed..];
    *printed = revealed.len();
    (was_reset, fresh)
}

/// Print newly revealed chunks, then redraw the status line in place.
fn draw_playback(
    out: &mut Stdout,
    controller: &PlaybackController,
    printed: &mut usize,
) -> std::io::Result<()> {
    // one snapshot for the chunk list; a tick landing later triggers another draw
    let (was_reset, fresh) = unprinted(controller.revealed(), printed);
    out.queue(MoveToColumn(0))?
        .queue(Clear(ClearType::CurrentLine))?;

    if was_reset {
        out.queue(Print("  · reset ·\r\n"))?;
    }
    for chunk in fresh {
        out.queue(SetForegroundColor(rgb(CYBER_GREEN)))?
            .queue(Print(format!("  {}\r\n", chunk)))?
            .queue(ResetColor)?;
    }

    let state = controller.state();
    let color = if state.phase() == PlaybackPhase::Completed {
        CYBER_GREEN
    } else {
        NEON_PURPLE
    };
    out.queue(SetForegroundColor(rgb(color)))?
        .queue(Print(format!(
            "{} {:>3.0}%  {}",
            progress_bar(state.progress_percent(), BAR_WIDTH),
            state.progress_percent(),
            phase_label(state.phase())
        )))?
        .queue(ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(n: usize) -> Vec<ContentChunk> {
        (0..n).map(|i| ContentChunk::new(format!("c{}", i))).collect()
    }

    #[test]
    fn test_unprinted_tracks_what_was_shown() {
        let all = chunks(4);
        let mut printed = 0;

        let (reset, fresh) = unprinted(&all[..2], &mut printed);
        assert!(!reset);
        assert_eq!(fresh, &all[..2]);
        assert_eq!(printed, 2);

        // nothing new, nothing printed twice
        let (_, fresh) = unprinted(&all[..2], &mut printed);
        assert!(fresh.is_empty());

        let (_, fresh) = unprinted(&all[..3], &mut printed);
        assert_eq!(fresh, &all[2..3]);
        assert_eq!(printed, 3);
    }

    #[test]
    fn test_unprinted_after_reset_starts_over() {
        let all = chunks(3);
        let mut printed = 3;

        let (reset, fresh) = unprinted(&all[..1], &mut printed);
        assert!(reset);
        assert_eq!(fresh, &all[..1]);
        assert_eq!(printed, 1);
    }

    #[test]
    fn test_back_keys() {
        assert!(is_back(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_back(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_back(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
