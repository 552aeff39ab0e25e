//! TCP connect prober.
//!
//! Performs standard TCP connect attempts using the operating system's
//! socket API. Completes the full handshake, then closes immediately.

use crate::scanner::traits::{ProbeOutcome, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::trace;

/// TCP connect prober.
///
/// Does not require elevated privileges. Hostnames are resolved per attempt and
/// only IPv4 addresses are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

impl TcpProber {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `host` to its first IPv4 address.
    ///
    /// Runs outside the connect timeout: a slow or failed lookup is a resolution
    /// failure, not a silent port.
    async fn resolve_ipv4(host: &str, port: u16) -> io::Result<SocketAddr> {
        lookup_host((host, port))
            .await?
            .find(SocketAddr::is_ipv4)
            .ok_or_else(|| {
                io::Error::new(
                    ErrorKind::AddrNotAvailable,
                    format!("no IPv4 address for {host}"),
                )
            })
    }
}

/// Map a connect error onto the probe outcome taxonomy.
pub(crate) fn classify_io_error(err: &io::Error) -> ProbeOutcome {
    match err.kind() {
        ErrorKind::ConnectionRefused => ProbeOutcome::Refused,
        ErrorKind::TimedOut => ProbeOutcome::TimedOut,
        _ => ProbeOutcome::OtherError,
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: Port, limit: Duration) -> ProbeOutcome {
        let addr = match Self::resolve_ipv4(host, port.as_u16()).await {
            Ok(addr) => addr,
            Err(e) => {
                trace!(%port, error = %e, "resolution failed");
                return ProbeOutcome::OtherError;
            }
        };

        // Dropping the connect future on timeout closes the half-open socket.
        let outcome = match timeout(limit, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeOutcome::Open
            }
            Ok(Err(e)) => {
                trace!(%port, error = %e, "connect failed");
                classify_io_error(&e)
            }
            Err(_) => ProbeOutcome::TimedOut,
        };
        trace!(%port, %outcome, "probe finished");
        outcome
    }
}
