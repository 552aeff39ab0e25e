//! Scan coordinator: owns the worker pool for one scan run.

use crate::scanner::queue::WorkQueue;
use crate::scanner::retry::RetryPolicy;
use crate::scanner::tcp::TcpProber;
use crate::scanner::traits::SharedProber;
use crate::scanner::worker::{ScanContext, Worker};
use crate::scanner::{ScanRequest, ScanResult};
use crate::services::PortRegistry;
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Default time allowed for a single connection attempt.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Runs scans by spawning a bounded pool of workers over a shared port queue.
///
/// Each call to [`run`](Self::run) builds its own queue and result collection,
/// so one coordinator may serve several scans, concurrently or in sequence.
///
/// # Example
///
/// ```ignore
/// use portsweep::scanner::{ScanCoordinator, ScanRequest};
///
/// let request = ScanRequest::new("127.0.0.1", 1, 1024, 200)?;
/// let result = ScanCoordinator::tcp().run(&request).await;
/// for record in result.records() {
///     println!("{}/tcp {}", record.port, record.service);
/// }
/// ```
#[derive(Clone)]
pub struct ScanCoordinator {
    prober: SharedProber,
    registry: Arc<PortRegistry>,
    policy: RetryPolicy,
    timeout: Duration,
    cancel: CancellationToken,
    progress: Option<ProgressBar>,
}

impl ScanCoordinator {
    /// Create a coordinator around the given prober.
    pub fn new(prober: SharedProber) -> Self {
        Self {
            prober,
            registry: Arc::new(PortRegistry::well_known()),
            policy: RetryPolicy::default(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            cancel: CancellationToken::new(),
            progress: None,
        }
    }

    /// Coordinator that probes with real TCP connects.
    pub fn tcp() -> Self {
        Self::new(Arc::new(TcpProber::new()))
    }

    /// Set the service registry.
    pub fn with_registry(mut self, registry: PortRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Set the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stop workers early once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Advance `progress` once per drained port.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Scan every port of the request and wait for all workers to finish.
    ///
    /// The request is assumed valid. Port-level failures never surface here: a
    /// port that is not open is simply absent from the result.
    pub async fn run(&self, request: &ScanRequest) -> ScanResult {
        let ctx = Arc::new(ScanContext {
            host: request.host().to_string(),
            queue: WorkQueue::from_range(request.range()),
            prober: Arc::clone(&self.prober),
            registry: Arc::clone(&self.registry),
            records: Mutex::new(Vec::new()),
            policy: self.policy,
            timeout: self.timeout,
            cancel: self.cancel.clone(),
            progress: self.progress.clone(),
        });

        info!(
            host = request.host(),
            ports = %request.range(),
            workers = request.worker_count(),
            timeout_ms = self.timeout.as_millis() as u64,
            attempts = self.policy.max_attempts(),
            "starting scan"
        );

        let start_time = Instant::now();

        let mut workers = JoinSet::new();
        for worker_id in 0..request.worker_count() as usize {
            workers.spawn(Worker::new(worker_id, Arc::clone(&ctx)).run());
        }

        let mut probes_sent = 0;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(summary) => {
                    probes_sent += summary.probes_sent;
                    debug!(
                        worker = summary.worker_id,
                        ports = summary.ports_taken,
                        "worker done"
                    );
                }
                Err(e) => error!(error = %e, "scan worker failed"),
            }
        }

        let elapsed = start_time.elapsed();

        if ctx.cancel.is_cancelled() {
            warn!(unscanned = ctx.queue.len(), "scan cancelled before the queue drained");
        }

        let records = std::mem::take(&mut *ctx.records.lock().await);
        info!(
            open = records.len(),
            probes = probes_sent,
            elapsed_ms = elapsed.as_millis() as u64,
            "scan complete"
        );

        ScanResult::new(records, elapsed)
    }
}

impl std::fmt::Debug for ScanCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanCoordinator")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
