//! The feedback ingestion seam: pending events in, acknowledgements out.

use redpen_core::FeedbackEvent;

/// Where feedback events come from (a review-surface table, a queue, or an
/// in-memory buffer in tests). Events are consumed exactly once.
pub trait FeedbackSource: Send {
    /// Unprocessed events, oldest first, at most `limit`.
    fn pending(&self, limit: usize) -> Vec<FeedbackEvent>;

    /// Mark the given events consumed so they are never re-delivered.
    fn ack(&mut self, ids: &[String]);
}

/// In-memory feedback queue for tests and single-process usage.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackQueue {
    events: Vec<FeedbackEvent>,
}

impl InMemoryFeedbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FeedbackEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Unprocessed events still waiting.
    pub fn backlog(&self) -> usize {
        self.events.iter().filter(|e| !e.processed).count()
    }
}

impl FeedbackSource for InMemoryFeedbackQueue {
    fn pending(&self, limit: usize) -> Vec<FeedbackEvent> {
        let mut pending: Vec<FeedbackEvent> = self
            .events
            .iter()
            .filter(|e| !e.processed)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        pending.truncate(limit);
        pending
    }

    fn ack(&mut self, ids: &[String]) {
        for event in self.events.iter_mut() {
            if ids.contains(&event.id) {
                event.processed = true;
            }
        }
    }
}
