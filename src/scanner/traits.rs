//! Prober trait abstraction.
//!
//! Defines the single-attempt probe interface the workers drive, so the engine
//! can run against real sockets or a scripted double.

use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Classified outcome of one connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The connection completed within the timeout.
    Open,
    /// The remote actively refused the connection.
    Refused,
    /// The timeout elapsed before the connection completed.
    TimedOut,
    /// Any other failure (name resolution, unreachable network, ...).
    OtherError,
}

impl ProbeOutcome {
    /// Whether another attempt on the same port may succeed.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Refused | Self::TimedOut)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Refused => write!(f, "refused"),
            Self::TimedOut => write!(f, "timed out"),
            Self::OtherError => write!(f, "error"),
        }
    }
}

/// Trait for single-port probe implementations.
///
/// Implementations must never panic: every failure mode is a [`ProbeOutcome`].
/// Any socket opened by an attempt is closed before `probe` returns.
///
/// # Example
///
/// ```ignore
/// use portsweep::scanner::{Prober, ProbeOutcome, TcpProber};
///
/// async fn is_open<P: Prober>(prober: &P, port: Port) -> bool {
///     prober.probe("127.0.0.1", port, Duration::from_millis(500)).await == ProbeOutcome::Open
/// }
/// ```
#[async_trait]
pub trait Prober: Send + Sync {
    /// Make one connection attempt to `host:port`, bounded by `timeout`.
    async fn probe(&self, host: &str, port: Port, timeout: Duration) -> ProbeOutcome;
}

/// A shared prober for dynamic dispatch across workers.
pub type SharedProber = std::sync::Arc<dyn Prober>;
