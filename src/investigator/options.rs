//! Options controlling one investigation run

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Per-step filing-search fan-out in quick mode
pub const QUICK_QUERY_CAP: usize = 4;
/// Per-step filing-search fan-out in full mode
pub const FULL_QUERY_CAP: usize = 10;

/// Options for controlling investigation behavior
#[derive(Debug, Clone)]
pub struct InvestigatorOptions {
    /// Quick mode narrows the step-1 fan-out and skips the registrant
    /// lookup and economic snapshot steps
    pub quick: bool,
    /// Timeout applied to every individual adapter call
    pub call_timeout: Duration,
    /// Trade lookups are capped to this many top candidates
    pub max_trade_probes: usize,
    /// Candidates returned in the final report
    pub max_results: usize,
    /// Cooperative cancellation; when triggered the run abandons in-flight
    /// calls and returns the partial report accumulated so far
    pub cancel: CancellationToken,
}

impl Default for InvestigatorOptions {
    fn default() -> Self {
        Self {
            quick: false,
            call_timeout: Duration::from_secs(8),
            max_trade_probes: 5,
            max_results: 10,
            cancel: CancellationToken::new(),
        }
    }
}

impl InvestigatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quick() -> Self {
        Self {
            quick: true,
            ..Self::default()
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn query_cap(&self) -> usize {
        if self.quick {
            QUICK_QUERY_CAP
        } else {
            FULL_QUERY_CAP
        }
    }
}
