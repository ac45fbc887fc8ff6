//! FINRA trade-report source
//!
//! Queries the public Query API dataset of structured-product trade
//! reports by identifier. Rows with unusable dates are skipped with a
//! warning rather than failing the whole result.

pub mod types;

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tokio::time::sleep;

use super::traits::{SearchWindow, TradeSource};
use crate::config::SourceConfig;
use crate::model::Trade;
use types::{CompareFilter, TradeQuery, TradeRow};

const RATE_LIMIT_DELAY_MS: u64 = 300;
const TRADE_DATASET_PATH: &str = "/data/group/fixedIncomeMarket/name/structuredProductTrades";
const MAX_ROWS: usize = 500;

pub struct FinraTradeSource {
    http: Client,
    base: String,
    last_request: Mutex<Instant>,
}

impl FinraTradeSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base: config.finra_base.clone(),
            last_request: Mutex::new(Instant::now()),
        })
    }

    async fn rate_limit(&self) {
        let elapsed = {
            let last = self.last_request.lock().unwrap();
            last.elapsed()
        };
        if elapsed < Duration::from_millis(RATE_LIMIT_DELAY_MS) {
            sleep(Duration::from_millis(RATE_LIMIT_DELAY_MS) - elapsed).await;
        }

        let mut last = self.last_request.lock().unwrap();
        *last = Instant::now();
    }
}

#[async_trait]
impl TradeSource for FinraTradeSource {
    fn source_id(&self) -> &'static str {
        "finra"
    }

    async fn search_trades(
        &self,
        identifier: &str,
        window: Option<SearchWindow>,
    ) -> Result<Vec<Trade>> {
        self.rate_limit().await;

        let mut filters = vec![CompareFilter {
            field_name: "cusip".to_string(),
            compare_type: "EQUAL".to_string(),
            field_value: identifier.to_string(),
        }];
        if let Some(window) = window {
            filters.push(CompareFilter {
                field_name: "tradeDate".to_string(),
                compare_type: "GTE".to_string(),
                field_value: window.from.to_string(),
            });
            filters.push(CompareFilter {
                field_name: "tradeDate".to_string(),
                compare_type: "LTE".to_string(),
                field_value: window.to.to_string(),
            });
        }

        let response = self
            .http
            .post(format!("{}{}", self.base, TRADE_DATASET_PATH))
            .json(&TradeQuery {
                limit: MAX_ROWS,
                compare_filters: filters,
            })
            .send()
            .await
            .with_context(|| format!("Failed to fetch trades for '{}'", identifier))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "FINRA API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        let rows: Vec<TradeRow> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse trade rows for '{}'", identifier))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| to_trade(row, identifier))
            .collect())
    }
}

fn to_trade(row: TradeRow, identifier: &str) -> Option<Trade> {
    let date = match NaiveDate::parse_from_str(&row.trade_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            tracing::warn!(
                source = "finra",
                trade_date = %row.trade_date,
                "Skipping trade row with unparsable date"
            );
            return None;
        }
    };

    Some(Trade {
        date,
        time: row.execution_time,
        price: row.price.unwrap_or_default(),
        yield_rate: row.yield_rate.unwrap_or_default(),
        volume: row.quantity.unwrap_or(0),
        side: row.side.unwrap_or_default(),
        dealer: row.reporting_party.unwrap_or_default(),
        report_type: row.report_type.unwrap_or_default(),
        identifier: identifier.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str) -> TradeRow {
        TradeRow {
            trade_date: date.to_string(),
            execution_time: None,
            price: Some("100.00".to_string()),
            yield_rate: Some("5.0".to_string()),
            quantity: Some(200_000),
            side: Some("B".to_string()),
            reporting_party: Some("Dealer A".to_string()),
            report_type: Some("T".to_string()),
        }
    }

    #[test]
    fn test_to_trade_maps_fields() {
        let trade = to_trade(row("2025-06-02"), "80285WAB2").unwrap();
        assert_eq!(trade.identifier, "80285WAB2");
        assert_eq!(trade.volume, 200_000);
        assert_eq!(trade.dealer, "Dealer A");
    }

    #[test]
    fn test_bad_date_is_skipped() {
        assert!(to_trade(row("06/02/2025"), "80285WAB2").is_none());
    }
}
