//! Scan workers: drain the shared queue, probe with retries, publish open ports.

use crate::scanner::queue::WorkQueue;
use crate::scanner::retry::{RetryPolicy, Settled};
use crate::scanner::traits::SharedProber;
use crate::scanner::OpenPortRecord;
use crate::services::PortRegistry;
use crate::types::Port;
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// State shared by every worker of one scan run.
pub(crate) struct ScanContext {
    pub host: String,
    pub queue: WorkQueue,
    pub prober: SharedProber,
    pub registry: Arc<PortRegistry>,
    /// Open ports in completion order.
    pub records: Mutex<Vec<OpenPortRecord>>,
    pub policy: RetryPolicy,
    pub timeout: Duration,
    pub cancel: CancellationToken,
    pub progress: Option<ProgressBar>,
}

/// Lifecycle of a worker. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Taking ports from the queue and probing them.
    Running,
    /// Queue observed empty (or scan cancelled); winding down.
    Draining,
    Done,
}

/// What a worker did during its run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker_id: usize,
    /// Ports dequeued by this worker.
    pub ports_taken: usize,
    /// Probe attempts, retries included.
    pub probes_sent: usize,
    pub open_found: usize,
}

pub(crate) struct Worker {
    ctx: Arc<ScanContext>,
    state: WorkerState,
    summary: WorkerSummary,
}

impl Worker {
    pub fn new(worker_id: usize, ctx: Arc<ScanContext>) -> Self {
        Self {
            ctx,
            state: WorkerState::Running,
            summary: WorkerSummary {
                worker_id,
                ..WorkerSummary::default()
            },
        }
    }

    /// Drain the queue until it is empty, then report.
    pub async fn run(mut self) -> WorkerSummary {
        while self.state == WorkerState::Running {
            self.step().await;
        }

        debug_assert_eq!(self.state, WorkerState::Draining);
        debug!(
            worker = self.summary.worker_id,
            ports = self.summary.ports_taken,
            probes = self.summary.probes_sent,
            open = self.summary.open_found,
            "worker drained"
        );
        self.state = WorkerState::Done;
        self.summary
    }

    async fn step(&mut self) {
        if self.ctx.cancel.is_cancelled() {
            self.state = WorkerState::Draining;
            return;
        }

        match self.ctx.queue.try_dequeue() {
            Some(port) => self.scan_port(port).await,
            None => self.state = WorkerState::Draining,
        }
    }

    async fn scan_port(&mut self, port: Port) {
        self.summary.ports_taken += 1;

        let mut attempt = self.ctx.policy.start();
        let settled = loop {
            if let Some(settled) = attempt.settled() {
                break settled;
            }
            let outcome = self
                .ctx
                .prober
                .probe(&self.ctx.host, port, self.ctx.timeout)
                .await;
            self.summary.probes_sent += 1;
            attempt = attempt.advance(outcome);
        };

        match settled {
            Settled::Recorded => self.record(port).await,
            Settled::Abandoned(reason) => {
                trace!(worker = self.summary.worker_id, %port, ?reason, "port abandoned");
            }
        }

        if let Some(pb) = &self.ctx.progress {
            pb.inc(1);
        }
    }

    async fn record(&mut self, port: Port) {
        let service = self.ctx.registry.lookup(port.as_u16()).to_string();
        debug!(worker = self.summary.worker_id, %port, %service, "open port");

        if let Some(pb) = &self.ctx.progress {
            pb.set_message(format!("Found open port: {}", port));
        }

        self.ctx
            .records
            .lock()
            .await
            .push(OpenPortRecord { port, service });
        self.summary.open_found += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::ScriptedProber;
    use crate::scanner::ProbeOutcome;
    use crate::types::PortRange;

    fn context(prober: Arc<ScriptedProber>, range: PortRange) -> Arc<ScanContext> {
        Arc::new(ScanContext {
            host: "127.0.0.1".to_string(),
            queue: WorkQueue::from_range(range),
            prober,
            registry: Arc::new(PortRegistry::well_known()),
            records: Mutex::new(Vec::new()),
            policy: RetryPolicy::default(),
            timeout: Duration::from_millis(10),
            cancel: CancellationToken::new(),
            progress: None,
        })
    }

    #[tokio::test]
    async fn test_single_worker_drains_queue() {
        let prober =
            Arc::new(ScriptedProber::new(ProbeOutcome::Refused).with(80, ProbeOutcome::Open));
        let ctx = context(Arc::clone(&prober), PortRange::from_bounds(78, 82).unwrap());

        let summary = Worker::new(0, Arc::clone(&ctx)).run().await;

        assert_eq!(summary.ports_taken, 5);
        // Four refused ports at three attempts each, plus one open port
        assert_eq!(summary.probes_sent, 4 * 3 + 1);
        assert_eq!(summary.open_found, 1);
        assert!(ctx.queue.is_empty());

        let records = ctx.records.lock().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].port.as_u16(), 80);
        assert_eq!(records[0].service, "http");
    }

    #[tokio::test]
    async fn test_cancelled_worker_takes_nothing() {
        let prober = Arc::new(ScriptedProber::new(ProbeOutcome::Open));
        let ctx = context(Arc::clone(&prober), PortRange::from_bounds(1, 10).unwrap());
        ctx.cancel.cancel();

        let summary = Worker::new(3, Arc::clone(&ctx)).run().await;

        assert_eq!(summary.worker_id, 3);
        assert_eq!(summary.ports_taken, 0);
        assert_eq!(prober.total_calls(), 0);
        assert_eq!(ctx.queue.len(), 10);
    }
}
