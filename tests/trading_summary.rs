//! Trading aggregator integration checks

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use securitrace::{summarize, Trade};

fn trade(price: &str, yield_rate: &str, volume: u64, dealer: &str) -> Trade {
    Trade {
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        time: Some("14:31:05".to_string()),
        price: price.to_string(),
        yield_rate: yield_rate.to_string(),
        volume,
        side: "D".to_string(),
        dealer: dealer.to_string(),
        report_type: "T".to_string(),
        identifier: "80285WAB2".to_string(),
    }
}

#[test]
fn scenario_c_two_trade_summary() {
    let trades = vec![
        trade("100.00", "5.0", 200_000, "A"),
        trade("102.00", "5.1", 300_000, "B"),
    ];

    let summary = summarize(&trades);

    assert_eq!(summary.total_volume, 500_000);
    assert_eq!(summary.average_price, dec!(101.00));

    assert_eq!(summary.volume_by_dealer.len(), 2);
    assert_eq!(summary.volume_by_dealer[0].dealer, "B");
    assert_eq!(summary.volume_by_dealer[0].volume, 300_000);
    assert_eq!(summary.volume_by_dealer[0].percentage, dec!(60));
    assert_eq!(summary.volume_by_dealer[1].dealer, "A");
    assert_eq!(summary.volume_by_dealer[1].volume, 200_000);
    assert_eq!(summary.volume_by_dealer[1].percentage, dec!(40));
}

#[test]
fn empty_trades_summarize_without_error() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_trades, 0);
    assert_eq!(summary.average_price, Decimal::ZERO);
    assert_eq!(summary.average_yield, Decimal::ZERO);
    assert!(summary.volume_by_dealer.is_empty());
    assert!(summary.price_history.is_empty());
    assert_eq!(summary.date_range.start, NaiveDate::default());
    assert_eq!(summary.date_range.end, NaiveDate::default());
}

#[test]
fn total_trades_equals_input_length_and_prices_bounded() {
    let trades: Vec<Trade> = (0..25)
        .map(|i| {
            trade(
                &format!("{}.25", 95 + (i % 7)),
                &format!("5.{}", i % 10),
                10_000 + i * 1_000,
                ["A", "B", "C"][(i % 3) as usize],
            )
        })
        .collect();

    let summary = summarize(&trades);
    assert_eq!(summary.total_trades, trades.len());

    for t in &trades {
        let price: Decimal = t.price.parse().unwrap();
        assert!(price >= summary.price_range.min);
        assert!(price <= summary.price_range.max);
    }
    assert!(summary.average_price >= summary.price_range.min);
    assert!(summary.average_price <= summary.price_range.max);
}

#[test]
fn dealer_percentages_sum_near_hundred() {
    let trades = vec![
        trade("100.00", "5.0", 100_000, "A"),
        trade("100.00", "5.0", 100_000, "B"),
        trade("100.00", "5.0", 100_000, "C"),
    ];
    let summary = summarize(&trades);

    let total: Decimal = summary
        .volume_by_dealer
        .iter()
        .map(|d| d.percentage)
        .sum();
    // Rounding tolerance: three dealers at one third each
    assert!((total - dec!(100)).abs() <= dec!(0.02), "total {total}");
}
