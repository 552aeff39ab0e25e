//! # portsweep - A Concurrent TCP Port Scanner
//!
//! portsweep checks which TCP ports of a host accept connections within a
//! bounded time and reports them alongside a well-known service name.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{ScanCoordinator, ScanRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let request = ScanRequest::new("127.0.0.1", 1, 1024, 100).unwrap();
//!     let result = ScanCoordinator::tcp().run(&request).await;
//!
//!     for record in result.records() {
//!         println!("{}/tcp open {}", record.port, record.service);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`scanner`] - The scan engine: work queue, prober, retry policy, workers
//!   and the coordinator that owns them
//! - [`services`] - Port to service name registry
//! - [`types`] - Validated port types
//! - [`config`] - Settings file handling
//! - [`cli`] - Argument parsing for the binary
//! - [`output`] - Report formatting
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, ScanError};
pub use scanner::{
    OpenPortRecord, ProbeOutcome, Prober, ScanCoordinator, ScanRequest, ScanResult,
};
pub use services::PortRegistry;
pub use types::{Port, PortRange};
