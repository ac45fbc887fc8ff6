//! SEC EDGAR HTTP client
//!
//! Rate-limited client for the full-text search and submissions endpoints.
//!
//! # Important
//!
//! EDGAR requires a User-Agent header with contact info. Rate limit is
//! 10 requests per second.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use tokio::time::sleep;
use url::Url;

use super::types::{FtsResponse, Submissions};
use crate::config::SourceConfig;
use crate::sources::traits::SearchWindow;

const RATE_LIMIT_DELAY_MS: u64 = 100; // 10 req/sec

pub struct EdgarClient {
    http: Client,
    search_base: String,
    data_base: String,
    last_request: Mutex<Instant>,
}

impl EdgarClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.edgar_user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            search_base: config.edgar_search_base.clone(),
            data_base: config.edgar_data_base.clone(),
            last_request: Mutex::new(Instant::now()),
        })
    }

    /// Enforce rate limiting between requests
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

    /// Full-text search over filing documents
    pub async fn full_text_search(
        &self,
        query: &str,
        window: Option<SearchWindow>,
    ) -> Result<FtsResponse> {
        self.rate_limit().await;

        let mut url = Url::parse(&format!("{}/search-index", self.search_base))
            .context("Invalid EDGAR search base")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &format!("\"{}\"", query));
            if let Some(window) = window {
                pairs.append_pair("startdt", &window.from.to_string());
                pairs.append_pair("enddt", &window.to.to_string());
            }
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to search EDGAR for '{}'", query))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "EDGAR search error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse EDGAR search response for '{}'", query))
    }

    /// Registrant submissions by CIK; `None` when the registry has no
    /// record for the id.
    pub async fn get_submissions(&self, cik: &str) -> Result<Option<Submissions>> {
        self.rate_limit().await;

        let cik_padded = pad_cik(cik);
        let url = format!("{}/submissions/CIK{}.json", self.data_base, cik_padded);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch EDGAR submissions for CIK {}", cik))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "EDGAR submissions error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        let submissions = response
            .json()
            .await
            .with_context(|| format!("Failed to parse EDGAR submissions for CIK {}", cik))?;
        Ok(Some(submissions))
    }
}

/// Pad a CIK to 10 digits
pub fn pad_cik(cik: &str) -> String {
    let digits_only = cik.trim().trim_start_matches('0');
    format!("{:0>10}", digits_only)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_cik() {
        assert_eq!(pad_cik("320193"), "0000320193");
        assert_eq!(pad_cik("0000320193"), "0000320193");
        assert_eq!(pad_cik("1234567890"), "1234567890");
        assert_eq!(pad_cik("1"), "0000000001");
    }
}
