//! Shared stub sources for investigator integration tests
//!
//! Each stub implements one source trait over canned data, with a `fail`
//! switch that makes every call error the way an unreachable provider
//! would.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use securitrace::model::{
    DebtCategory, EconomicSnapshot, ServicerRiskProfile, Trade,
};
use securitrace::sources::traits::{
    ComplaintSource, EconomicSource, FilingHit, FilingSource, IdentifierHit, IdentifierSource,
    RegistrantDetails, SearchWindow, Sources, TradeSource,
};

#[derive(Clone, Default)]
pub struct StubFilingSource {
    pub hits: Vec<FilingHit>,
    pub registrant: Option<RegistrantDetails>,
    pub fail: bool,
    /// Extra latency before answering, for timeout tests
    pub delay: Option<Duration>,
}

#[async_trait]
impl FilingSource for StubFilingSource {
    fn source_id(&self) -> &'static str {
        "stub-filing"
    }

    async fn search_filings(
        &self,
        _query: &str,
        _window: Option<SearchWindow>,
    ) -> Result<Vec<FilingHit>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(anyhow!("filing registry unreachable"));
        }
        Ok(self.hits.clone())
    }

    async fn lookup_registrant(&self, _registry_id: &str) -> Result<Option<RegistrantDetails>> {
        if self.fail {
            return Err(anyhow!("filing registry unreachable"));
        }
        Ok(self.registrant.clone())
    }
}

#[derive(Clone, Default)]
pub struct StubIdentifierSource {
    pub hits: Vec<IdentifierHit>,
    pub fail: bool,
}

#[async_trait]
impl IdentifierSource for StubIdentifierSource {
    fn source_id(&self) -> &'static str {
        "stub-identifier"
    }

    async fn search(&self, _query: &str) -> Result<Vec<IdentifierHit>> {
        if self.fail {
            return Err(anyhow!("identifier registry unreachable"));
        }
        Ok(self.hits.clone())
    }

    async fn lookup(&self, _code: &str) -> Result<Option<IdentifierHit>> {
        if self.fail {
            return Err(anyhow!("identifier registry unreachable"));
        }
        Ok(None)
    }
}

#[derive(Clone, Default)]
pub struct StubComplaintSource {
    pub profile: Option<ServicerRiskProfile>,
    pub fail: bool,
}

#[async_trait]
impl ComplaintSource for StubComplaintSource {
    fn source_id(&self) -> &'static str {
        "stub-complaints"
    }

    async fn company_risk(&self, company: &str) -> Result<ServicerRiskProfile> {
        if self.fail {
            return Err(anyhow!("complaint repository unreachable"));
        }
        Ok(self
            .profile
            .clone()
            .unwrap_or_else(|| ServicerRiskProfile::clean(company)))
    }
}

#[derive(Clone, Default)]
pub struct StubEconomicSource {
    pub snapshot: Option<EconomicSnapshot>,
    pub trend: Vec<Decimal>,
    pub fail: bool,
}

#[async_trait]
impl EconomicSource for StubEconomicSource {
    fn source_id(&self) -> &'static str {
        "stub-economic"
    }

    async fn snapshot(&self) -> Result<EconomicSnapshot> {
        if self.fail {
            return Err(anyhow!("economic series unreachable"));
        }
        self.snapshot
            .clone()
            .ok_or_else(|| anyhow!("economic series unreachable"))
    }

    async fn delinquency_trend(
        &self,
        _category: DebtCategory,
        _periods: usize,
    ) -> Result<Vec<Decimal>> {
        if self.fail {
            return Err(anyhow!("economic series unreachable"));
        }
        Ok(self.trend.clone())
    }
}

#[derive(Clone, Default)]
pub struct StubTradeSource {
    /// Trades keyed by identifier code
    pub trades: HashMap<String, Vec<Trade>>,
    pub fail: bool,
}

#[async_trait]
impl TradeSource for StubTradeSource {
    fn source_id(&self) -> &'static str {
        "stub-trades"
    }

    async fn search_trades(
        &self,
        identifier: &str,
        _window: Option<SearchWindow>,
    ) -> Result<Vec<Trade>> {
        if self.fail {
            return Err(anyhow!("trade repository unreachable"));
        }
        Ok(self.trades.get(identifier).cloned().unwrap_or_default())
    }
}

/// Install a test subscriber so `RUST_LOG=debug` shows merge telemetry
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Bundle stubs into a `Sources`
pub fn stub_sources(
    filings: StubFilingSource,
    identifiers: StubIdentifierSource,
    complaints: StubComplaintSource,
    economic: StubEconomicSource,
    trades: StubTradeSource,
) -> Sources {
    Sources {
        filings: Arc::new(filings),
        identifiers: Arc::new(identifiers),
        complaints: Arc::new(complaints),
        economic: Arc::new(economic),
        trades: Arc::new(trades),
    }
}

/// A `Sources` where every adapter fails
pub fn all_failing_sources() -> Sources {
    stub_sources(
        StubFilingSource {
            fail: true,
            ..Default::default()
        },
        StubIdentifierSource {
            fail: true,
            ..Default::default()
        },
        StubComplaintSource {
            fail: true,
            ..Default::default()
        },
        StubEconomicSource {
            fail: true,
            ..Default::default()
        },
        StubTradeSource {
            fail: true,
            ..Default::default()
        },
    )
}

/// A filing hit for the Santander auto program, filed this year
pub fn santander_filing_hit() -> FilingHit {
    let today = Utc::now().date_naive();
    FilingHit {
        entity_name: "Santander Drive Auto Receivables Trust".to_string(),
        form_type: "SF-3".to_string(),
        filing_date: today.with_month(1).unwrap().with_day(15).unwrap(),
        document_url: Some("https://www.sec.gov/Archives/edgar/data/1966234/000119312525".into()),
        registry_id: None,
        extracted_identifiers: vec!["80285WAB2".to_string()],
        deal_size: None,
    }
}

pub fn santander_identifier_hit() -> IdentifierHit {
    IdentifierHit {
        identifier: "80285WAB2".to_string(),
        name: "SDART A-2".to_string(),
        issuer: Some("SDART".to_string()),
        market_sector: Some("Mtge".to_string()),
        security_type: Some("ABS".to_string()),
    }
}
