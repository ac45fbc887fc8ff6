//! securitrace - Securitization Trust Investigator
//!
//! Investigates whether a consumer debt obligation was packaged into a
//! securitized trust by cross-referencing several independent public data
//! repositories, fusing their partial results into a ranked list of
//! candidate trusts with confidence scores, and summarizing historical
//! trade activity for matched security identifiers.
//!
//! ## Architecture
//! One investigation flows: query derivation -> concurrent source fan-out
//! -> message-passing merge into the candidate table -> offline catalog
//! fallback -> ranked report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use securitrace::{
//!     DebtCategory, DebtProfile, Investigator, SourceConfig, Sources, TtlCache,
//! };
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = SourceConfig::from_env();
//! let registrants = Arc::new(TtlCache::with_default_ttl());
//! let sources = Sources::live(&config, registrants)?;
//!
//! let profile = DebtProfile::new(DebtCategory::AutoLoan)
//!     .with_servicer("Santander Consumer USA");
//! let report = Investigator::new(sources).investigate(&profile).await?;
//! println!("{} candidate trusts", report.trusts.len());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Data model shared across components
pub mod model;

// Environment-backed source configuration
pub mod config;

// Deterministic search-query derivation
pub mod query;

// Offline trust catalog and candidate generator
pub mod catalog;

// Trade aggregation
pub mod trading;

// Source adapters for the public data repositories
pub mod sources;

// The multi-source investigation orchestrator
pub mod investigator;

// Public re-exports for the crate surface
pub use catalog::{CandidateGenerator, Jitter};
pub use config::SourceConfig;
pub use error::{InvestigationError, InvestigationResult};
pub use investigator::options::InvestigatorOptions;
pub use investigator::Investigator;
pub use model::{
    CandidateTrust, DebtCategory, DebtProfile, EconomicSnapshot, InvestigationReport,
    MarketCondition, RunSummary, SecurityIdentifier, ServicerRiskProfile, Trade, TradingSummary,
    VerificationRecord, VerifiedCandidate,
};
pub use sources::cache::TtlCache;
pub use sources::traits::Sources;
pub use trading::summarize;
