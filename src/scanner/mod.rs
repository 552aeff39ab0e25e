//! Scanner module - the concurrent scan engine.
//!
//! A [`ScanCoordinator`] fills a [`WorkQueue`] from the requested range and
//! spawns a bounded pool of workers on the tokio runtime. Each worker drains the
//! queue, probes ports through a [`Prober`] under a [`RetryPolicy`], and appends
//! open ports to a shared, locked result collection.

mod coordinator;
mod queue;
mod retry;
pub mod tcp;
pub mod traits;
mod worker;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::ScanError;
use crate::types::{Port, PortRange};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use coordinator::{ScanCoordinator, DEFAULT_PROBE_TIMEOUT};
pub use queue::WorkQueue;
pub use retry::{AbandonReason, AttemptState, RetryPolicy, Settled, DEFAULT_MAX_ATTEMPTS};
pub use tcp::TcpProber;
pub use traits::{ProbeOutcome, Prober, SharedProber};
pub use worker::{WorkerState, WorkerSummary};

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: u32 = 500;

/// A validated scan request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    host: String,
    range: PortRange,
    worker_count: u32,
    verbose: bool,
}

impl ScanRequest {
    /// Build a request for `host` over `start..=end` with `worker_count` workers.
    pub fn new(
        host: impl Into<String>,
        start: u16,
        end: u16,
        worker_count: u32,
    ) -> Result<Self, ScanError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(ScanError::EmptyHost);
        }
        if worker_count == 0 {
            return Err(ScanError::NoWorkers);
        }
        let range = PortRange::from_bounds(start, end)?;

        Ok(Self {
            host,
            range,
            worker_count,
            verbose: false,
        })
    }

    /// Set the verbose flag.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn range(&self) -> PortRange {
        self.range
    }

    pub fn start_port(&self) -> Port {
        self.range.start()
    }

    pub fn end_port(&self) -> Port {
        self.range.end()
    }

    pub fn worker_count(&self) -> u32 {
        self.worker_count
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// An open port and its service name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OpenPortRecord {
    pub port: Port,
    pub service: String,
}

/// Outcome of a complete scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Open ports in the order workers found them.
    records: Vec<OpenPortRecord>,
    elapsed_seconds: f64,
}

impl ScanResult {
    pub fn new(records: Vec<OpenPortRecord>, elapsed: Duration) -> Self {
        Self {
            records,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    pub fn records(&self) -> &[OpenPortRecord] {
        &self.records
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Open port numbers, ascending.
    pub fn ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self.records.iter().map(|r| r.port.as_u16()).collect();
        ports.sort_unstable();
        ports
    }
}
