//! Playback state machine. Pure transitions; timers live in the use case.
//!
//! `Idle --start--> Running --toggle--> Paused --toggle--> Running`,
//! `Running --(revealed == total)--> Completed`, any state `--reset--> Idle`.

use serde::Serialize;

/// Observable phase, derived from [`PlaybackState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Reveal progress over a fixed number of chunks.
///
/// Invariant: `revealed_count <= total`. Fields are private so every
/// mutation goes through a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    is_running: bool,
    revealed_count: usize,
    total: usize,
}

impl PlaybackState {
    pub fn new(total: usize) -> Self {
        Self {
            is_running: false,
            revealed_count: 0,
            total,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.total > 0 && self.revealed_count == self.total {
            PlaybackPhase::Completed
        } else if self.is_running {
            PlaybackPhase::Running
        } else if self.revealed_count == 0 {
            PlaybackPhase::Idle
        } else {
            PlaybackPhase::Paused
        }
    }

    /// True while a tick would advance the state (a timer should be live).
    pub fn wants_tick(&self) -> bool {
        self.is_running && self.revealed_count < self.total
    }

    /// Percentage of revealed chunks, clamped to `[0, 100]`; `0` for an empty list.
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.revealed_count as f64 * 100.0 / self.total as f64).clamp(0.0, 100.0)
    }

    /// Reveal the first chunk if nothing is revealed yet, then run.
    /// Returns false (no-op) for an empty list or a completed playback.
    pub fn start(&mut self) -> bool {
        if self.total == 0 || self.phase() == PlaybackPhase::Completed {
            return false;
        }
        if self.revealed_count == 0 {
            self.revealed_count = 1;
        }
        self.is_running = self.revealed_count < self.total;
        true
    }

    /// Pause a running playback or resume a paused one. No-op otherwise.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase() {
            PlaybackPhase::Running => self.is_running = false,
            PlaybackPhase::Paused => self.is_running = true,
            PlaybackPhase::Idle | PlaybackPhase::Completed => return false,
        }
        true
    }

    /// Back to `Idle`. Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        let initial = Self::new(self.total);
        let changed = *self != initial;
        *self = initial;
        changed
    }

    /// Advance by one chunk. Stops running on the last chunk.
    pub fn tick(&mut self) -> bool {
        if !self.wants_tick() {
            return false;
        }
        self.revealed_count += 1;
        if self.revealed_count == self.total {
            self.is_running = false;
        }
        true
    }
}
