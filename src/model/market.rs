//! Macroeconomic snapshot types

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profile::DebtCategory;

/// Tri-state market-condition classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCondition {
    Favorable,
    Neutral,
    Stressed,
}

impl fmt::Display for MarketCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorable => write!(f, "favorable"),
            Self::Neutral => write!(f, "neutral"),
            Self::Stressed => write!(f, "stressed"),
        }
    }
}

/// Point-in-time macro indicators relevant to consumer-debt performance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicSnapshot {
    pub as_of: DateTime<Utc>,
    /// 30-year fixed mortgage rate, percent
    pub mortgage_rate_30y: Option<Decimal>,
    /// Delinquency rate by debt category, percent
    pub delinquency_by_category: BTreeMap<DebtCategory, Decimal>,
    /// Unemployment rate, percent
    pub unemployment_rate: Option<Decimal>,
    /// Trailing-year inflation, percent
    pub inflation_rate: Option<Decimal>,
    pub market_condition: MarketCondition,
}

impl EconomicSnapshot {
    pub fn delinquency_for(&self, category: DebtCategory) -> Option<Decimal> {
        self.delinquency_by_category.get(&category).copied()
    }
}
