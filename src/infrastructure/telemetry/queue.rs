//! In-Memory Telemetry Queue
//!
//! Unbounded ordered queue shared between the request path (enqueue) and
//! exactly one background flush worker (drain/requeue). A single mutex
//! guards the sequence, so a drain is atomic with respect to concurrent
//! enqueues: no record is lost or duplicated by any interleaving.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::telemetry::LogRecord;

/// Shared telemetry queue.
#[derive(Default)]
pub struct TelemetryQueue {
    records: Mutex<VecDeque<LogRecord>>,
}

impl TelemetryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; never blocks the caller beyond the mutex and never
    /// fails (best-effort, in-memory).
    pub fn enqueue(&self, record: LogRecord) {
        self.lock().push_back(record);
    }

    /// Atomically take every queued record, oldest first.
    pub fn drain(&self) -> Vec<LogRecord> {
        self.lock().drain(..).collect()
    }

    /// Put a failed batch back in front of anything enqueued since the
    /// drain, preserving the batch's original order.
    pub fn requeue_front(&self, batch: Vec<LogRecord>) {
        let mut records = self.lock();
        for record in batch.into_iter().rev() {
            records.push_front(record);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the queued records, used by tests to assert ordering.
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<LogRecord>> {
        // a poisoned lock only means a panic mid-push; the data stays usable
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> LogRecord {
        LogRecord::new(text, "tetiana", "dictionary")
    }

    #[test]
    fn test_enqueue_then_drain_preserves_order() {
        let queue = TelemetryQueue::new();
        queue.enqueue(record("a"));
        queue.enqueue(record("b"));
        queue.enqueue(record("c"));

        let batch = queue.drain();
        let texts: Vec<&str> = batch.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_empty_queue() {
        let queue = TelemetryQueue::new();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_requeue_front_preserves_batch_order() {
        let queue = TelemetryQueue::new();
        let batch = vec![record("a"), record("b")];
        // a record arrives while the batch is out for delivery
        queue.enqueue(record("c"));

        queue.requeue_front(batch);
        let texts: Vec<String> = queue.snapshot().iter().map(|r| r.text.clone()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_concurrent_enqueue_and_drain_loses_nothing() {
        use std::sync::Arc;

        let queue = Arc::new(TelemetryQueue::new());
        let producers: Vec<_> = (0..4)
            .map(|p| {
                let queue = queue.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        queue.enqueue(record(&format!("{}-{}", p, i)));
                    }
                })
            })
            .collect();

        let consumer = {
            let queue = queue.clone();
            std::thread::spawn(move || {
                let mut drained = Vec::new();
                for _ in 0..50 {
                    drained.extend(queue.drain());
                    std::thread::yield_now();
                }
                drained
            })
        };

        for producer in producers {
            producer.join().unwrap();
        }
        let mut drained = consumer.join().unwrap();
        drained.extend(queue.drain());

        assert_eq!(drained.len(), 400);
    }
}
