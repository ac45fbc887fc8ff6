//! Environment-backed configuration for the live source adapters
//!
//! Everything has a working default; env vars override. API keys are
//! optional because every bound provider exposes an unauthenticated tier
//! (rate-limited harder, which the per-client rate guards absorb).

use std::env;
use std::time::Duration;

/// Configuration for the live HTTP source adapters
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// SEC EDGAR full-text search base
    pub edgar_search_base: String,
    /// SEC EDGAR submissions (registrant) base
    pub edgar_data_base: String,
    /// EDGAR requires a User-Agent with contact info
    pub edgar_user_agent: String,
    pub openfigi_base: String,
    pub openfigi_api_key: Option<String>,
    pub cfpb_base: String,
    pub fred_base: String,
    pub fred_api_key: Option<String>,
    pub finra_base: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl SourceConfig {
    /// Read configuration from the environment (including a `.env` file if
    /// one is present), falling back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            edgar_search_base: var_or("EDGAR_SEARCH_BASE", "https://efts.sec.gov/LATEST"),
            edgar_data_base: var_or("EDGAR_DATA_BASE", "https://data.sec.gov"),
            edgar_user_agent: var_or(
                "EDGAR_USER_AGENT",
                "securitrace/0.1 (research@example.com)",
            ),
            openfigi_base: var_or("OPENFIGI_BASE", "https://api.openfigi.com/v3"),
            openfigi_api_key: env::var("OPENFIGI_API_KEY").ok(),
            cfpb_base: var_or(
                "CFPB_BASE",
                "https://www.consumerfinance.gov/data-research/consumer-complaints/search/api/v1",
            ),
            fred_base: var_or("FRED_BASE", "https://api.stlouisfed.org/fred"),
            fred_api_key: env::var("FRED_API_KEY").ok(),
            finra_base: var_or("FINRA_BASE", "https://api.finra.org"),
            http_timeout: Duration::from_secs(
                env::var("SOURCE_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
