//! Scripted prober double for engine tests.

use crate::scanner::traits::{ProbeOutcome, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Answers from a fixed per-port script and counts every call.
#[derive(Debug)]
pub(crate) struct ScriptedProber {
    default: ProbeOutcome,
    script: HashMap<u16, Vec<ProbeOutcome>>,
    calls: Mutex<HashMap<u16, u32>>,
}

impl ScriptedProber {
    pub fn new(default: ProbeOutcome) -> Self {
        Self {
            default,
            script: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Always answer `outcome` for `port`.
    pub fn with(self, port: u16, outcome: ProbeOutcome) -> Self {
        self.with_sequence(port, vec![outcome])
    }

    /// Answer the outcomes in order; the last one repeats.
    pub fn with_sequence(mut self, port: u16, outcomes: Vec<ProbeOutcome>) -> Self {
        self.script.insert(port, outcomes);
        self
    }

    pub fn calls_for(&self, port: u16) -> u32 {
        self.calls.lock().unwrap().get(&port).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    /// Ports probed at least once.
    pub fn probed_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self.calls.lock().unwrap().keys().copied().collect();
        ports.sort_unstable();
        ports
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, _host: &str, port: Port, _timeout: Duration) -> ProbeOutcome {
        let port = port.as_u16();
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(port).or_insert(0);
            *count += 1;
            *count as usize
        };

        // Let other workers interleave between attempts.
        tokio::task::yield_now().await;

        match self.script.get(&port) {
            Some(outcomes) => outcomes
                .get(call - 1)
                .or_else(|| outcomes.last())
                .copied()
                .unwrap_or(self.default),
            None => self.default,
        }
    }
}
