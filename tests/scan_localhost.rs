use async_trait::async_trait;
use portsweep::scanner::{
    ProbeOutcome, Prober, RetryPolicy, ScanCoordinator, ScanRequest, TcpProber,
};
use portsweep::{Port, PortRegistry};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Real TCP prober that records every outcome it returns.
#[derive(Default)]
struct CountingTcpProber {
    inner: TcpProber,
    seen: Mutex<Vec<(u16, ProbeOutcome)>>,
}

#[async_trait]
impl Prober for CountingTcpProber {
    async fn probe(&self, host: &str, port: Port, timeout: Duration) -> ProbeOutcome {
        let outcome = self.inner.probe(host, port, timeout).await;
        self.seen.lock().unwrap().push((port.as_u16(), outcome));
        outcome
    }
}

async fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    (listener, port)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn finds_listening_port_on_loopback() {
    let (_open, port) = listener().await;
    let registry = PortRegistry::from_entries([(port, "test-service")]);
    let request = ScanRequest::new("127.0.0.1", port, port, 4).unwrap();

    let result = ScanCoordinator::tcp()
        .with_registry(registry)
        .with_timeout(Duration::from_secs(2))
        .run(&request)
        .await;

    assert_eq!(result.ports(), vec![port]);
    assert_eq!(result.records()[0].service, "test-service");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn closed_port_is_omitted() {
    let (closed, port) = listener().await;
    drop(closed);

    let request = ScanRequest::new("127.0.0.1", port, port, 2).unwrap();
    let result = ScanCoordinator::tcp()
        .with_timeout(Duration::from_millis(500))
        .with_retry_policy(RetryPolicy::new(1))
        .run(&request)
        .await;

    assert!(result.records().is_empty());
}

#[test]
fn unresolvable_host_is_attempted_once_per_port() {
    let prober = Arc::new(CountingTcpProber::default());
    let request = ScanRequest::new("no-such-host.invalid", 80, 82, 3).unwrap();

    // A limit far below any resolver round trip: lookups must not be timed.
    let result = tokio_test::block_on(
        ScanCoordinator::new(Arc::clone(&prober) as Arc<dyn Prober>)
            .with_timeout(Duration::from_millis(1))
            .run(&request),
    );

    assert!(result.records().is_empty());

    let mut seen = prober.seen.lock().unwrap().clone();
    seen.sort_unstable_by_key(|&(port, _)| port);
    assert_eq!(
        seen,
        vec![
            (80, ProbeOutcome::OtherError),
            (81, ProbeOutcome::OtherError),
            (82, ProbeOutcome::OtherError),
        ]
    );
}
