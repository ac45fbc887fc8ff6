//! Provider contract for the investigation sources
//!
//! One trait per source class. Every method returns `anyhow::Result`; "no
//! data available" is an empty value, not an error. Adapter failures are
//! caught at the orchestrator's step boundary and contribute nothing.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{DebtCategory, EconomicSnapshot, ServicerRiskProfile, Trade};

/// Inclusive filing/trade date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// One filing returned by a filing registry search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingHit {
    pub entity_name: String,
    /// Registry form category, e.g. "SF-3", "ABS-EE", "424B5"
    pub form_type: String,
    pub filing_date: NaiveDate,
    pub document_url: Option<String>,
    /// Registry id of the filer (CIK), when extractable
    pub registry_id: Option<String>,
    /// Security identifier codes found in the filing text
    pub extracted_identifiers: Vec<String>,
    pub deal_size: Option<Decimal>,
}

/// Registrant metadata from the secondary registry lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrantDetails {
    pub registry_id: String,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub jurisdiction: Option<String>,
    pub address: Option<String>,
}

/// One security identifier returned by an identifier search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierHit {
    pub identifier: String,
    pub name: String,
    pub issuer: Option<String>,
    pub market_sector: Option<String>,
    pub security_type: Option<String>,
}

/// Filing registry: full-text search plus registrant lookup
#[async_trait]
pub trait FilingSource: Send + Sync {
    fn source_id(&self) -> &'static str;

    async fn search_filings(
        &self,
        query: &str,
        window: Option<SearchWindow>,
    ) -> Result<Vec<FilingHit>>;

    /// Secondary lookup of filer metadata; `None` when the registry has no
    /// record for the id.
    async fn lookup_registrant(&self, registry_id: &str) -> Result<Option<RegistrantDetails>>;
}

/// Security identifier registry
#[async_trait]
pub trait IdentifierSource: Send + Sync {
    fn source_id(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<Vec<IdentifierHit>>;

    async fn lookup(&self, code: &str) -> Result<Option<IdentifierHit>>;
}

/// Consumer-complaint repository
#[async_trait]
pub trait ComplaintSource: Send + Sync {
    fn source_id(&self) -> &'static str;

    async fn company_risk(&self, company: &str) -> Result<ServicerRiskProfile>;
}

/// Macroeconomic data series
#[async_trait]
pub trait EconomicSource: Send + Sync {
    fn source_id(&self) -> &'static str;

    async fn snapshot(&self) -> Result<EconomicSnapshot>;

    /// Trailing delinquency observations for a debt category, oldest first
    async fn delinquency_trend(
        &self,
        category: DebtCategory,
        periods: usize,
    ) -> Result<Vec<Decimal>>;
}

/// Bond trade-report repository
#[async_trait]
pub trait TradeSource: Send + Sync {
    fn source_id(&self) -> &'static str;

    async fn search_trades(
        &self,
        identifier: &str,
        window: Option<SearchWindow>,
    ) -> Result<Vec<Trade>>;
}

/// The bundle of source handles one investigator runs against
#[derive(Clone)]
pub struct Sources {
    pub filings: Arc<dyn FilingSource>,
    pub identifiers: Arc<dyn IdentifierSource>,
    pub complaints: Arc<dyn ComplaintSource>,
    pub economic: Arc<dyn EconomicSource>,
    pub trades: Arc<dyn TradeSource>,
}
