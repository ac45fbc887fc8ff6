//! Source adapters for the public data repositories
//!
//! Each submodule normalizes one provider into the common record shapes of
//! [`traits`]. Adapters own protocol-level encoding; the investigator only
//! sees the trait contract.

pub mod cache;
pub mod cfpb;
pub mod edgar;
pub mod finra;
pub mod fred;
pub mod openfigi;
pub mod traits;

use std::sync::Arc;

use anyhow::Result;

use crate::config::SourceConfig;
use cache::TtlCache;
use traits::{RegistrantDetails, Sources};

impl Sources {
    /// Wire up the live adapters against the configured providers.
    ///
    /// The registrant cache is shared with the caller so repeated
    /// investigations within its TTL reuse registrant metadata.
    pub fn live(
        config: &SourceConfig,
        registrants: Arc<TtlCache<RegistrantDetails>>,
    ) -> Result<Self> {
        Ok(Self {
            filings: Arc::new(edgar::EdgarFilingSource::new(config, registrants)?),
            identifiers: Arc::new(openfigi::OpenFigiSource::new(config)?),
            complaints: Arc::new(cfpb::CfpbComplaintSource::new(config)?),
            economic: Arc::new(fred::FredEconomicSource::new(config)?),
            trades: Arc::new(finra::FinraTradeSource::new(config)?),
        })
    }
}
