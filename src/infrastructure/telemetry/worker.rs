//! Telemetry Flush Worker
//!
//! One background task for the process lifetime: sleep, drain, upload.
//! Failed batches go back to the front of the queue in original order and
//! are retried on the next cycle; nothing is surfaced to request callers.
//! The loop is cancellable through a watch-channel shutdown signal so the
//! composition root and tests can stop it deterministically.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::ports::TelemetrySinkPort;

use super::queue::TelemetryQueue;

/// Worker configuration
#[derive(Debug, Clone)]
pub struct TelemetryWorkerConfig {
    /// Interval between flush attempts.
    pub flush_interval: Duration,
}

impl Default for TelemetryWorkerConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_secs(60),
        }
    }
}

/// Telemetry flush worker.
pub struct TelemetryWorker {
    config: TelemetryWorkerConfig,
    queue: Arc<TelemetryQueue>,
    sink: Arc<dyn TelemetrySinkPort>,
}

impl TelemetryWorker {
    pub fn new(
        config: TelemetryWorkerConfig,
        queue: Arc<TelemetryQueue>,
        sink: Arc<dyn TelemetrySinkPort>,
    ) -> Self {
        Self {
            config,
            queue,
            sink,
        }
    }

    /// Spawn the flush loop onto the runtime.
    pub fn spawn(self) -> TelemetryWorkerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(shutdown_rx));
        TelemetryWorkerHandle { shutdown_tx, join }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            flush_interval_secs = self.config.flush_interval.as_secs(),
            "Telemetry worker started"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.config.flush_interval) => {
                    self.flush_once().await;
                }
                _ = shutdown.changed() => {
                    // one final best-effort flush before stopping
                    self.flush_once().await;
                    break;
                }
            }
        }

        tracing::info!("Telemetry worker stopped");
    }

    /// Drain the queue and attempt one delivery; on failure the whole batch
    /// is requeued at the front so the next cycle retries it.
    pub async fn flush_once(&self) {
        let batch = self.queue.drain();
        if batch.is_empty() {
            return;
        }

        let batch_len = batch.len();
        match self.sink.upload(&batch).await {
            Ok(()) => {
                tracing::debug!(records = batch_len, "Telemetry batch delivered");
            }
            Err(e) => {
                tracing::warn!(
                    records = batch_len,
                    error = %e,
                    "Telemetry delivery failed, requeueing batch"
                );
                self.queue.requeue_front(batch);
            }
        }
    }
}

/// Handle owning the worker task and its shutdown signal.
pub struct TelemetryWorkerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TelemetryWorkerHandle {
    /// Signal the loop to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.join.await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::application::ports::{SinkError, TelemetrySinkPort};
    use crate::domain::telemetry::LogRecord;

    use super::*;

    /// Sink that fails the first `fail_first` uploads and records every call.
    struct ScriptedSink {
        fail_first: usize,
        calls: Mutex<Vec<Vec<LogRecord>>>,
    }

    impl ScriptedSink {
        fn new(fail_first: usize) -> Self {
            Self {
                fail_first,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<LogRecord>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TelemetrySinkPort for ScriptedSink {
        async fn upload(&self, batch: &[LogRecord]) -> Result<(), SinkError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(batch.to_vec());
            if calls.len() <= self.fail_first {
                return Err(SinkError::NetworkError("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn worker_with(
        fail_first: usize,
    ) -> (TelemetryWorker, Arc<TelemetryQueue>, Arc<ScriptedSink>) {
        let queue = Arc::new(TelemetryQueue::new());
        let sink = Arc::new(ScriptedSink::new(fail_first));
        let worker = TelemetryWorker::new(
            TelemetryWorkerConfig::default(),
            queue.clone(),
            sink.clone(),
        );
        (worker, queue, sink)
    }

    fn records(n: usize) -> Vec<LogRecord> {
        (0..n)
            .map(|i| LogRecord::new(format!("text-{}", i), "tetiana", "dictionary"))
            .collect()
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_all_records_in_order() {
        let (worker, queue, sink) = worker_with(1);
        let expected = records(5);
        for record in expected.clone() {
            queue.enqueue(record);
        }

        // first cycle fails: everything stays queued, in original order
        worker.flush_once().await;
        assert_eq!(queue.snapshot(), expected);

        // second cycle succeeds: queue empties
        worker.flush_once().await;
        assert!(queue.is_empty());

        // upload ran exactly twice with identical batch content
        let calls = sink.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], expected);
        assert_eq!(calls[1], expected);
    }

    #[tokio::test]
    async fn test_empty_queue_skips_upload() {
        let (worker, _queue, sink) = worker_with(0);
        worker.flush_once().await;
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn test_records_enqueued_during_outage_follow_the_retried_batch() {
        let (worker, queue, sink) = worker_with(1);
        for record in records(2) {
            queue.enqueue(record);
        }
        worker.flush_once().await;

        // a new record arrives while the first batch awaits retry
        queue.enqueue(LogRecord::new("late", "lada", "model"));
        worker.flush_once().await;

        assert!(queue.is_empty());
        let calls = sink.calls();
        assert_eq!(calls.len(), 2);
        let retried: Vec<&str> = calls[1].iter().map(|r| r.text.as_str()).collect();
        assert_eq!(retried, vec!["text-0", "text-1", "late"]);
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_loop_and_flushes() {
        let queue = Arc::new(TelemetryQueue::new());
        let sink = Arc::new(ScriptedSink::new(0));
        let worker = TelemetryWorker::new(
            TelemetryWorkerConfig {
                // long interval: only the shutdown flush can deliver
                flush_interval: Duration::from_secs(3600),
            },
            queue.clone(),
            sink.clone(),
        );

        queue.enqueue(LogRecord::new("parting", "tetiana", "dictionary"));
        let handle = worker.spawn();
        handle.shutdown().await;

        assert!(queue.is_empty());
        assert_eq!(sink.calls().len(), 1);
    }
}
