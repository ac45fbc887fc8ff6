//! FRED macroeconomic source
//!
//! Pulls the indicator series backing the economic snapshot and the
//! delinquency trend. Requires a (free) API key; without one the adapter
//! errors and the orchestrator treats the snapshot step like any other
//! unavailable source.

pub mod types;

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::time::sleep;
use url::Url;

use super::traits::EconomicSource;
use crate::config::SourceConfig;
use crate::model::{DebtCategory, EconomicSnapshot, MarketCondition};
use types::ObservationsResponse;

const RATE_LIMIT_DELAY_MS: u64 = 500;

const MORTGAGE_RATE_SERIES: &str = "MORTGAGE30US";
const UNEMPLOYMENT_SERIES: &str = "UNRATE";
const INFLATION_SERIES: &str = "CORESTICKM159SFRBATL";

/// Delinquency-rate series per debt category
fn delinquency_series(category: DebtCategory) -> &'static str {
    match category {
        DebtCategory::Mortgage => "DRSFRMACBS",
        DebtCategory::CreditCard => "DRCCLACBS",
        // Auto, student and personal loans roll up into the consumer-loan
        // delinquency series
        DebtCategory::AutoLoan | DebtCategory::StudentLoan | DebtCategory::PersonalLoan => {
            "DRCLACBS"
        }
    }
}

pub struct FredEconomicSource {
    http: Client,
    base: String,
    api_key: Option<String>,
    last_request: Mutex<Instant>,
}

impl FredEconomicSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base: config.fred_base.clone(),
            api_key: config.fred_api_key.clone(),
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

    /// Most recent `limit` observations for a series, oldest first
    async fn observations(&self, series_id: &str, limit: usize) -> Result<Vec<Decimal>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("FRED_API_KEY not configured"))?;

        self.rate_limit().await;

        let mut url = Url::parse(&format!("{}/series/observations", self.base))
            .context("Invalid FRED base")?;
        url.query_pairs_mut()
            .append_pair("series_id", series_id)
            .append_pair("api_key", api_key)
            .append_pair("file_type", "json")
            .append_pair("sort_order", "desc")
            .append_pair("limit", &limit.to_string());

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch FRED series {}", series_id))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "FRED API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        let parsed: ObservationsResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse FRED series {}", series_id))?;

        tracing::debug!(
            series = series_id,
            observations = parsed.observations.len(),
            latest = parsed
                .observations
                .first()
                .map(|obs| obs.date.as_str())
                .unwrap_or("-"),
            "Fetched FRED series"
        );

        let mut values: Vec<Decimal> = parsed
            .observations
            .iter()
            .filter_map(|obs| obs.parsed())
            .collect();
        values.reverse(); // API returned newest first
        Ok(values)
    }

    async fn latest(&self, series_id: &str) -> Result<Option<Decimal>> {
        Ok(self.observations(series_id, 1).await?.pop())
    }
}

#[async_trait]
impl EconomicSource for FredEconomicSource {
    fn source_id(&self) -> &'static str {
        "fred"
    }

    async fn snapshot(&self) -> Result<EconomicSnapshot> {
        let mortgage_rate = self.latest(MORTGAGE_RATE_SERIES).await?;
        let unemployment = self.latest(UNEMPLOYMENT_SERIES).await?;
        let inflation = self.latest(INFLATION_SERIES).await?;

        let mut delinquency_by_category = BTreeMap::new();
        for category in DebtCategory::all() {
            if let Some(value) = self.latest(delinquency_series(*category)).await? {
                delinquency_by_category.insert(*category, value);
            }
        }

        Ok(EconomicSnapshot {
            as_of: Utc::now(),
            market_condition: classify(mortgage_rate, unemployment, &delinquency_by_category),
            mortgage_rate_30y: mortgage_rate,
            delinquency_by_category,
            unemployment_rate: unemployment,
            inflation_rate: inflation,
        })
    }

    async fn delinquency_trend(
        &self,
        category: DebtCategory,
        periods: usize,
    ) -> Result<Vec<Decimal>> {
        self.observations(delinquency_series(category), periods)
            .await
    }
}

/// Classify overall market condition from the indicator levels.
///
/// Stressed: unemployment above 6% or any delinquency rate above 6%.
/// Favorable: unemployment under 4.5%, mortgage rate under 5.5%, and every
/// delinquency rate under 3%. Everything else is neutral.
pub(crate) fn classify(
    mortgage_rate: Option<Decimal>,
    unemployment: Option<Decimal>,
    delinquency: &BTreeMap<DebtCategory, Decimal>,
) -> MarketCondition {
    let max_delinquency = delinquency.values().copied().max();

    if unemployment.is_some_and(|u| u > dec!(6))
        || max_delinquency.is_some_and(|d| d > dec!(6))
    {
        return MarketCondition::Stressed;
    }

    let favorable = unemployment.is_some_and(|u| u < dec!(4.5))
        && mortgage_rate.is_some_and(|r| r < dec!(5.5))
        && max_delinquency.is_none_or(|d| d < dec!(3));
    if favorable {
        return MarketCondition::Favorable;
    }

    MarketCondition::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delinquency(values: &[(DebtCategory, Decimal)]) -> BTreeMap<DebtCategory, Decimal> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_classify_stressed_on_unemployment() {
        let condition = classify(Some(dec!(6.5)), Some(dec!(7.2)), &BTreeMap::new());
        assert_eq!(condition, MarketCondition::Stressed);
    }

    #[test]
    fn test_classify_stressed_on_delinquency() {
        let condition = classify(
            Some(dec!(5.0)),
            Some(dec!(4.0)),
            &delinquency(&[(DebtCategory::CreditCard, dec!(8.1))]),
        );
        assert_eq!(condition, MarketCondition::Stressed);
    }

    #[test]
    fn test_classify_favorable() {
        let condition = classify(
            Some(dec!(4.9)),
            Some(dec!(3.8)),
            &delinquency(&[(DebtCategory::Mortgage, dec!(1.7))]),
        );
        assert_eq!(condition, MarketCondition::Favorable);
    }

    #[test]
    fn test_classify_neutral_when_mixed() {
        let condition = classify(
            Some(dec!(6.8)),
            Some(dec!(4.1)),
            &delinquency(&[(DebtCategory::AutoLoan, dec!(4.0))]),
        );
        assert_eq!(condition, MarketCondition::Neutral);
    }

    #[test]
    fn test_every_category_has_a_series() {
        for category in DebtCategory::all() {
            assert!(!delinquency_series(*category).is_empty());
        }
    }
}
