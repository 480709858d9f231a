//! Cancellable timed emitter: replays a fixed list at a fixed interval.
//!
//! - First item goes out immediately, then one per interval
//! - `Produced::Completed` marks natural exhaustion; cancellation just ends the stream
//! - Cancelling closes the channel: items already queued stay readable, a tick
//!   that fires afterwards can no longer send anything

use crate::ports::Scheduler;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Zero intervals are clamped to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// One produced item with its position in the source list.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission<T> {
    pub sequence: usize,
    pub item: T,
    /// Scheduler time at emission. Strictly increasing within one handle.
    pub emitted_at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Produced<T> {
    Item(Emission<T>),
    Completed,
}

/// Factory for emission handles sharing one scheduler.
pub struct TimedProducer {
    scheduler: Arc<dyn Scheduler>,
}

impl TimedProducer {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }

    /// Start emitting `items` every `interval`. Must be called within a tokio runtime.
    pub fn produce<T: Send + 'static>(&self, items: Vec<T>, interval: Duration) -> EmissionHandle<T> {
        let interval = interval.max(MIN_INTERVAL);
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        info!(
            items = items.len(),
            interval_ms = interval.as_millis() as u64,
            "producer started"
        );

        let task = tokio::spawn(emit_all(
            Arc::clone(&self.scheduler),
            items,
            interval,
            tx,
            token.clone(),
        ));

        EmissionHandle {
            rx,
            token,
            task,
            finished: false,
        }
    }
}

async fn emit_all<T>(
    scheduler: Arc<dyn Scheduler>,
    items: Vec<T>,
    interval: Duration,
    tx: mpsc::UnboundedSender<Produced<T>>,
    token: CancellationToken,
) {
    let total = items.len();
    for (sequence, item) in items.into_iter().enumerate() {
        if sequence > 0 {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = scheduler.sleep(interval) => {}
            }
        }
        if token.is_cancelled() {
            return;
        }
        let emission = Emission {
            sequence,
            item,
            emitted_at: scheduler.now(),
        };
        if tx.send(Produced::Item(emission)).is_err() {
            // receiver gone
            return;
        }
        debug!(sequence, total, "item emitted");
    }
    if !token.is_cancelled() {
        let _ = tx.send(Produced::Completed);
        info!(total, "producer completed");
    }
}

/// Consumer side of one production run. Dropping it cancels the run.
pub struct EmissionHandle<T> {
    rx: mpsc::UnboundedReceiver<Produced<T>>,
    token: CancellationToken,
    task: JoinHandle<()>,
    finished: bool,
}

impl<T> EmissionHandle<T> {
    /// Next item, then `Completed` once; `None` afterwards.
    /// After a cancel, items emitted before it are still handed out, then `None`.
    pub async fn next(&mut self) -> Option<Produced<T>> {
        if self.finished {
            return None;
        }
        let produced = if self.token.is_cancelled() {
            self.drain()
        } else {
            let received = tokio::select! {
                biased;
                _ = self.token.cancelled() => None,
                produced = self.rx.recv() => Some(produced),
            };
            match received {
                Some(produced) => produced,
                None => self.drain(),
            }
        };
        if matches!(produced, Some(Produced::Completed)) {
            self.finished = true;
        }
        produced
    }

    /// Closing the channel stops the emitter from sending; what is queued already
    /// went out before the cancel.
    fn drain(&mut self) -> Option<Produced<T>> {
        self.rx.close();
        self.rx.try_recv().ok()
    }

    /// Stop all future emissions. No-op once the run has completed or was cancelled.
    pub fn cancel(&mut self) {
        if self.finished || self.task.is_finished() || self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        self.rx.close();
        self.task.abort();
        info!("producer cancelled");
    }

    /// Token that cancels this run from elsewhere (e.g. a UI key handler).
    pub fn cancellation(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once `Completed` has been observed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<T> Drop for EmissionHandle<T> {
    fn drop(&mut self) {
        self.token.cancel();
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scheduler::{ManualScheduler, TokioScheduler};

    const INTERVAL: Duration = Duration::from_millis(1200);

    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    fn tokio_producer() -> TimedProducer {
        TimedProducer::new(Arc::new(TokioScheduler::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_full_list_in_order() {
        let started = tokio::time::Instant::now().into_std();
        let mut handle = tokio_producer().produce(vec!["a", "b", "c", "d"], INTERVAL);

        let mut seen = Vec::new();
        let mut stamps = Vec::new();
        loop {
            match handle.next().await {
                Some(Produced::Item(e)) => {
                    assert_eq!(e.sequence, seen.len());
                    seen.push(e.item);
                    stamps.push(e.emitted_at);
                }
                Some(Produced::Completed) => break,
                None => panic!("stream ended without completion"),
            }
        }

        assert_eq!(seen, vec!["a", "b", "c", "d"]);
        assert!(stamps[0] - started < INTERVAL);
        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!(pair[1] - pair[0] >= INTERVAL);
        }
        assert!(handle.is_finished());
        assert_eq!(handle.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_k_items() {
        let mut handle = tokio_producer().produce((0..10).collect::<Vec<u32>>(), INTERVAL);

        let mut seen = Vec::new();
        for _ in 0..3 {
            if let Some(Produced::Item(e)) = handle.next().await {
                seen.push(e.item);
            }
        }
        handle.cancel();
        assert!(handle.is_cancelled());

        tokio::time::sleep(INTERVAL * 5).await;
        assert_eq!(handle.next().await, None);
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(!handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_noop() {
        let mut handle = tokio_producer().produce(vec![1], INTERVAL);
        assert!(matches!(handle.next().await, Some(Produced::Item(_))));
        assert_eq!(handle.next().await, Some(Produced::Completed));
        handle.cancel();
        assert!(!handle.is_cancelled());
        assert!(handle.is_finished());
        assert_eq!(handle.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_list_completes_immediately() {
        let mut handle = tokio_producer().produce(Vec::<String>::new(), INTERVAL);
        assert_eq!(handle.next().await, Some(Produced::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_clamped() {
        let mut handle = tokio_producer().produce(vec![1, 2, 3], Duration::ZERO);
        let mut count = 0;
        while let Some(Produced::Item(_)) = handle.next().await {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_cancel_closes_fired_tick_race() {
        let sched = Arc::new(ManualScheduler::new());
        let producer = TimedProducer::new(Arc::clone(&sched) as Arc<dyn Scheduler>);
        let mut handle = producer.produce(vec!["first", "second"], INTERVAL);

        assert!(matches!(handle.next().await, Some(Produced::Item(e)) if e.item == "first"));
        sched.wait_until_sleeping().await;
        // tick is due but the emitter has not run yet
        sched.fire();
        handle.cancel();
        settle().await;

        assert_eq!(handle.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_emitter_finished_keeps_items() {
        let mut handle = tokio_producer().produce(vec![1, 2], Duration::from_millis(10));
        assert!(matches!(handle.next().await, Some(Produced::Item(e)) if e.item == 1));

        // emitter sends 2 and Completed, nobody has read them yet
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();

        assert!(!handle.is_cancelled());
        assert!(matches!(handle.next().await, Some(Produced::Item(e)) if e.item == 2));
        assert_eq!(handle.next().await, Some(Produced::Completed));
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_cancel_drains_items_emitted_before_it() {
        let sched = Arc::new(ManualScheduler::new());
        let producer = TimedProducer::new(Arc::clone(&sched) as Arc<dyn Scheduler>);
        let mut handle = producer.produce(vec![1, 2, 3], INTERVAL);

        // first item is queued, emitter waits for the second tick
        sched.wait_until_sleeping().await;
        handle.cancel();
        assert!(handle.is_cancelled());

        assert!(matches!(handle.next().await, Some(Produced::Item(e)) if e.sequence == 0));
        sched.fire();
        settle().await;
        assert_eq!(handle.next().await, None);
        assert!(!handle.is_finished());
    }

    #[tokio::test]
    async fn test_fired_tick_after_cancel_sends_nothing() {
        let sched = Arc::new(ManualScheduler::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let emitter = tokio::spawn(emit_all(
            Arc::clone(&sched) as Arc<dyn Scheduler>,
            vec![1, 2],
            INTERVAL,
            tx,
            token.clone(),
        ));

        sched.wait_until_sleeping().await;
        sched.fire();
        token.cancel();
        emitter.await.unwrap();

        assert!(matches!(rx.recv().await, Some(Produced::Item(e)) if e.item == 1));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_clears_pending_timer() {
        let sched = Arc::new(ManualScheduler::new());
        let producer = TimedProducer::new(Arc::clone(&sched) as Arc<dyn Scheduler>);
        let mut handle = producer.produce(vec![1, 2, 3], INTERVAL);

        assert!(matches!(handle.next().await, Some(Produced::Item(_))));
        sched.wait_until_sleeping().await;
        drop(handle);
        settle().await;

        assert_eq!(sched.sleeping(), 0);
        assert_eq!(sched.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_manual_timestamps_follow_virtual_clock() {
        let sched = Arc::new(ManualScheduler::new());
        let producer = TimedProducer::new(Arc::clone(&sched) as Arc<dyn Scheduler>);
        let mut handle = producer.produce(vec!['x', 'y'], INTERVAL);

        let first = match handle.next().await {
            Some(Produced::Item(e)) => e.emitted_at,
            other => panic!("unexpected {:?}", other),
        };
        sched.wait_until_sleeping().await;
        sched.fire();
        let second = match handle.next().await {
            Some(Produced::Item(e)) => e.emitted_at,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(second - first, INTERVAL);
        assert_eq!(handle.next().await, Some(Produced::Completed));
    }
}
