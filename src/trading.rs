//! Trade aggregation
//!
//! Pure, deterministic summarization of reported trades. Provider price and
//! yield fields arrive as strings and parse leniently: an unparsable value
//! parses to zero, so a zero mean must not be read as an observed zero.

use std::collections::BTreeMap;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::model::{
    DailyPrice, DateRange, DealerVolume, PriceRange, Trade, TradingSummary,
};

/// Summarize a list of trades.
///
/// Empty input yields the well-defined zero summary, never an error.
pub fn summarize(trades: &[Trade]) -> TradingSummary {
    if trades.is_empty() {
        return TradingSummary::empty();
    }

    let count = Decimal::from(trades.len() as u64);
    let prices: Vec<Decimal> = trades.iter().map(|t| parse_lenient(&t.price)).collect();
    let yields: Vec<Decimal> = trades.iter().map(|t| parse_lenient(&t.yield_rate)).collect();

    let average_price = (prices.iter().sum::<Decimal>() / count).round_dp(4);
    let average_yield = (yields.iter().sum::<Decimal>() / count).round_dp(4);

    let min_price = prices.iter().copied().min().unwrap_or(Decimal::ZERO);
    let max_price = prices.iter().copied().max().unwrap_or(Decimal::ZERO);

    let total_volume: u64 = trades.iter().map(|t| t.volume).sum();

    TradingSummary {
        total_trades: trades.len(),
        average_price,
        average_yield,
        total_volume,
        price_range: PriceRange {
            min: min_price,
            max: max_price,
        },
        volume_by_dealer: volume_by_dealer(trades, total_volume),
        price_history: price_history(trades, &prices),
        date_range: DateRange {
            start: trades.iter().map(|t| t.date).min().unwrap_or_default(),
            end: trades.iter().map(|t| t.date).max().unwrap_or_default(),
        },
    }
}

/// Parse a provider numeric string; garbage parses to zero.
fn parse_lenient(raw: &str) -> Decimal {
    raw.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .unwrap_or(Decimal::ZERO)
}

fn volume_by_dealer(trades: &[Trade], total_volume: u64) -> Vec<DealerVolume> {
    let mut by_dealer: HashMap<&str, u64> = HashMap::new();
    for trade in trades {
        *by_dealer.entry(trade.dealer.as_str()).or_default() += trade.volume;
    }

    let mut breakdown: Vec<DealerVolume> = by_dealer
        .into_iter()
        .map(|(dealer, volume)| {
            let percentage = if total_volume == 0 {
                Decimal::ZERO
            } else {
                (Decimal::from(volume) * Decimal::from(100) / Decimal::from(total_volume))
                    .round_dp(2)
            };
            DealerVolume {
                dealer: dealer.to_string(),
                volume,
                percentage,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| b.volume.cmp(&a.volume).then_with(|| a.dealer.cmp(&b.dealer)));
    breakdown
}

fn price_history(trades: &[Trade], prices: &[Decimal]) -> Vec<DailyPrice> {
    let mut by_date: BTreeMap<chrono::NaiveDate, Vec<Decimal>> = BTreeMap::new();
    for (trade, price) in trades.iter().zip(prices) {
        by_date.entry(trade.date).or_default().push(*price);
    }

    by_date
        .into_iter()
        .map(|(date, day_prices)| DailyPrice {
            date,
            average_price: (day_prices.iter().sum::<Decimal>()
                / Decimal::from(day_prices.len() as u64))
            .round_dp(4),
            trades: day_prices.len(),
        })
        .collect()
}
