//! Live collaboration log. Consumes a timed producer of moments into an
//! append-only, ordered log.

use crate::domain::CollaborationMoment;
use crate::usecases::timed_producer::{EmissionHandle, Produced, TimedProducer};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default spacing between moments.
pub const DEFAULT_FEED_INTERVAL_MS: u64 = 1200;

pub struct CollaborationFeed {
    handle: EmissionHandle<CollaborationMoment>,
    log: Vec<CollaborationMoment>,
}

impl CollaborationFeed {
    /// Start replaying `moments`. The first one is available right away.
    pub fn start(
        producer: &TimedProducer,
        moments: Vec<CollaborationMoment>,
        interval: Duration,
    ) -> Self {
        Self {
            handle: producer.produce(moments, interval),
            log: Vec::new(),
        }
    }

    /// Wait for the next moment and append it. `None` once finished or cancelled.
    pub async fn pump(&mut self) -> Option<&CollaborationMoment> {
        match self.handle.next().await? {
            Produced::Item(emission) => {
                debug!(
                    id = %emission.item.id,
                    stage = %emission.item.stage_id,
                    "moment appended"
                );
                self.log.push(emission.item);
                self.log.last()
            }
            Produced::Completed => None,
        }
    }

    /// Pump until the producer is exhausted or cancelled. Returns the log length.
    pub async fn run_to_end(&mut self) -> usize {
        while self.pump().await.is_some() {}
        self.log.len()
    }

    pub fn log(&self) -> &[CollaborationMoment] {
        &self.log
    }

    pub fn moments_for_stage<'a>(
        &'a self,
        stage_id: &'a str,
    ) -> impl Iterator<Item = &'a CollaborationMoment> + 'a {
        self.log.iter().filter(move |m| m.stage_id == stage_id)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// Stop the feed; moments already in the log stay.
    pub fn cancel(&mut self) {
        self.handle.cancel();
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.handle.cancellation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scheduler::TokioScheduler;
    use crate::domain::Sender;
    use std::sync::Arc;

    fn moment(id: &str, stage: &str) -> CollaborationMoment {
        CollaborationMoment {
            id: id.to_string(),
            stage_id: stage.to_string(),
            timestamp: "10:00".to_string(),
            sender: Sender::Ai,
            speaker: "Atlas".to_string(),
            action: "noted".to_string(),
            content: format!("moment {}", id),
        }
    }

    fn producer() -> TimedProducer {
        TimedProducer::new(Arc::new(TokioScheduler::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_accumulates_in_order() {
        let moments = vec![moment("1", "plan"), moment("2", "build"), moment("3", "plan")];
        let mut feed = CollaborationFeed::start(
            &producer(),
            moments.clone(),
            Duration::from_millis(DEFAULT_FEED_INTERVAL_MS),
        );

        assert_eq!(feed.run_to_end().await, 3);
        assert_eq!(feed.log(), moments.as_slice());
        assert!(feed.is_finished());

        let plan: Vec<&str> = feed.moments_for_stage("plan").map(|m| m.id.as_str()).collect();
        assert_eq!(plan, vec!["1", "3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_emitted_moments() {
        let moments = vec![moment("1", "plan"), moment("2", "plan"), moment("3", "plan")];
        let mut feed = CollaborationFeed::start(&producer(), moments, Duration::from_secs(1));

        assert_eq!(feed.pump().await.map(|m| m.id.clone()), Some("1".to_string()));
        feed.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(feed.pump().await.is_none());
        assert_eq!(feed.log().len(), 1);
        assert!(feed.is_cancelled());
        assert!(!feed.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_cancellation_token() {
        let moments = vec![moment("1", "a"), moment("2", "a")];
        let mut feed = CollaborationFeed::start(&producer(), moments, Duration::from_secs(1));
        let token = feed.cancellation();

        feed.pump().await;
        tokio::spawn(async move { token.cancel() });
        assert!(feed.pump().await.is_none());
        assert_eq!(feed.log().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_feed_finishes_quietly() {
        let mut feed = CollaborationFeed::start(&producer(), Vec::new(), Duration::from_secs(1));
        assert_eq!(feed.run_to_end().await, 0);
        assert!(feed.is_finished());
    }
}
