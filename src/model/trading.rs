//! Trade records and the derived trading summary

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One reported secondary-market trade
///
/// Price and yield arrive as raw provider strings; they are parsed at
/// aggregation time and unparsable values parse to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    /// Execution time as reported, when present
    pub time: Option<String>,
    pub price: String,
    #[serde(rename = "yield")]
    pub yield_rate: String,
    pub volume: u64,
    /// Buy/sell/dealer-to-dealer as reported
    pub side: String,
    pub dealer: String,
    pub report_type: String,
    pub identifier: String,
}

/// Inclusive date bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Sentinel range carried by the zero-trade summary
    pub fn sentinel() -> Self {
        Self {
            start: NaiveDate::default(),
            end: NaiveDate::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Per-dealer volume share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerVolume {
    pub dealer: String,
    pub volume: u64,
    /// Share of total volume, percent, rounded to two decimals
    pub percentage: Decimal,
}

/// Average price for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub average_price: Decimal,
    pub trades: usize,
}

/// Aggregate view over a list of trades
///
/// The zero-trade summary is a well-defined value: all counts zero, empty
/// breakdown and series, and `NaiveDate::default()` (1970-01-01) as the
/// sentinel date-range bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSummary {
    pub total_trades: usize,
    pub average_price: Decimal,
    pub average_yield: Decimal,
    pub total_volume: u64,
    pub price_range: PriceRange,
    /// Descending by volume
    pub volume_by_dealer: Vec<DealerVolume>,
    /// Ascending by date
    pub price_history: Vec<DailyPrice>,
    pub date_range: DateRange,
}

impl TradingSummary {
    /// The well-defined zero-trade summary
    pub fn empty() -> Self {
        Self {
            total_trades: 0,
            average_price: Decimal::ZERO,
            average_yield: Decimal::ZERO,
            total_volume: 0,
            price_range: PriceRange {
                min: Decimal::ZERO,
                max: Decimal::ZERO,
            },
            volume_by_dealer: Vec::new(),
            price_history: Vec::new(),
            date_range: DateRange::sentinel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_zeroed() {
        let summary = TradingSummary::empty();
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.total_volume, 0);
        assert!(summary.volume_by_dealer.is_empty());
        assert!(summary.price_history.is_empty());
        assert_eq!(summary.date_range, DateRange::sentinel());
    }

    #[test]
    fn test_trade_yield_serde_rename() {
        let json = r#"{
            "date": "2025-06-02",
            "time": "14:31:05",
            "price": "100.00",
            "yield": "5.0",
            "volume": 200000,
            "side": "B",
            "dealer": "A",
            "report_type": "T",
            "identifier": "80282KAA7"
        }"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.yield_rate, "5.0");
        let back = serde_json::to_value(&trade).unwrap();
        assert_eq!(back["yield"], "5.0");
    }
}
