//! Streaming playback: reveals pre-authored chunks one tick at a time,
//! simulating an agent "typing" its answer.
//!
//! - Transitions come from `domain::playback::PlaybackState`
//! - State is published on a `watch` channel; renderers await changes
//! - Each ticker task carries an epoch; a tick only applies if its epoch is
//!   still current, checked under the channel lock, so a tick that already
//!   fired can never land after reset/pause/drop

use crate::domain::{ContentChunk, PlaybackPhase, PlaybackState};
use crate::ports::Scheduler;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Default delay between two revealed chunks.
pub const DEFAULT_TICK_MS: u64 = 1200;

pub struct PlaybackController {
    chunks: Arc<[ContentChunk]>,
    tick: Duration,
    scheduler: Arc<dyn Scheduler>,
    state_tx: Arc<watch::Sender<PlaybackState>>,
    epoch: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl PlaybackController {
    pub fn new(chunks: Vec<ContentChunk>, tick: Duration, scheduler: Arc<dyn Scheduler>) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::new(chunks.len()));
        Self {
            chunks: chunks.into(),
            tick,
            scheduler,
            state_tx: Arc::new(state_tx),
            epoch: Arc::new(AtomicU64::new(0)),
            ticker: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        *self.state_tx.borrow()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state().phase()
    }

    pub fn progress_percent(&self) -> f64 {
        self.state().progress_percent()
    }

    /// Chunks revealed so far, in order.
    pub fn revealed(&self) -> &[ContentChunk] {
        &self.chunks[..self.state().revealed_count()]
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }

    /// Pause/resume is only meaningful between start and completion.
    pub fn can_toggle(&self) -> bool {
        matches!(self.phase(), PlaybackPhase::Running | PlaybackPhase::Paused)
    }

    /// Reveal the first chunk (if none yet) and run. Must be called within a tokio runtime.
    pub fn start(&mut self) {
        if self.transition(PlaybackState::start) {
            info!(
                revealed = self.state().revealed_count(),
                total = self.chunks.len(),
                "playback started"
            );
            self.reschedule();
        } else if self.chunks.is_empty() {
            debug!("playback start ignored: no chunks");
        }
    }

    /// Pause when running, resume when paused. No-op in any other phase.
    pub fn toggle_pause(&mut self) {
        if self.transition(PlaybackState::toggle_pause) {
            info!(phase = ?self.phase(), "playback toggled");
            self.reschedule();
        }
    }

    /// Back to idle. Any pending tick is discarded.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        if self.transition(PlaybackState::reset) {
            info!("playback reset");
        }
    }

    /// Apply `f` under the channel lock; notify only when the state changed.
    fn transition(&self, f: impl FnOnce(&mut PlaybackState) -> bool) -> bool {
        self.state_tx.send_if_modified(|state| {
            let before = *state;
            f(state);
            *state != before
        })
    }

    fn cancel_ticker(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn reschedule(&mut self) {
        self.cancel_ticker();
        if !self.state().wants_tick() {
            return;
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.ticker = Some(tokio::spawn(run_ticker(
            Arc::clone(&self.scheduler),
            self.tick,
            Arc::clone(&self.state_tx),
            Arc::clone(&self.epoch),
            epoch,
        )));
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

async fn run_ticker(
    scheduler: Arc<dyn Scheduler>,
    tick: Duration,
    state_tx: Arc<watch::Sender<PlaybackState>>,
    epoch: Arc<AtomicU64>,
    own_epoch: u64,
) {
    loop {
        scheduler.sleep(tick).await;

        let mut keep_going = false;
        let advanced = state_tx.send_if_modified(|state| {
            if epoch.load(Ordering::SeqCst) != own_epoch {
                return false;
            }
            let ticked = state.tick();
            keep_going = state.wants_tick();
            ticked
        });

        if advanced {
            let state = *state_tx.borrow();
            debug!(
                revealed = state.revealed_count(),
                total = state.total(),
                "chunk revealed"
            );
            if state.phase() == PlaybackPhase::Completed {
                info!(total = state.total(), "playback completed");
            }
        }
        if !keep_going {
            break;
        }
    }
}
