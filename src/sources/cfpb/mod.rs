//! CFPB consumer-complaint source
//!
//! Builds a servicer risk profile from the public complaint search API:
//! one all-time query for totals and issue ranking, one trailing-year query
//! for the recent count the risk curve keys off.

pub mod types;

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use tokio::time::sleep;
use url::Url;

use super::traits::ComplaintSource;
use crate::config::SourceConfig;
use crate::model::{IssueCount, ServicerRiskProfile};
use types::ComplaintResponse;

const RATE_LIMIT_DELAY_MS: u64 = 200;
const TOP_ISSUE_COUNT: usize = 5;

pub struct CfpbComplaintSource {
    http: Client,
    base: String,
    last_request: Mutex<Instant>,
}

impl CfpbComplaintSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base: config.cfpb_base.clone(),
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

    async fn complaint_query(
        &self,
        company: &str,
        date_received_min: Option<&str>,
    ) -> Result<ComplaintResponse> {
        self.rate_limit().await;

        let mut url = Url::parse(&format!("{}/", self.base)).context("Invalid CFPB base")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("company", company);
            pairs.append_pair("size", "0");
            if let Some(min) = date_received_min {
                pairs.append_pair("date_received_min", min);
            }
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to search complaints for '{}'", company))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "CFPB API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse complaint response for '{}'", company))
    }
}

#[async_trait]
impl ComplaintSource for CfpbComplaintSource {
    fn source_id(&self) -> &'static str {
        "cfpb"
    }

    async fn company_risk(&self, company: &str) -> Result<ServicerRiskProfile> {
        let all_time = self.complaint_query(company, None).await?;

        let year_ago = (Utc::now() - ChronoDuration::days(365))
            .date_naive()
            .to_string();
        let recent = self.complaint_query(company, Some(&year_ago)).await?;

        let top_issues: Vec<IssueCount> = all_time
            .aggregations
            .and_then(|aggs| aggs.issue)
            .map(|agg| agg.issue.buckets)
            .unwrap_or_default()
            .into_iter()
            .take(TOP_ISSUE_COUNT)
            .map(|bucket| IssueCount {
                issue: bucket.key,
                count: bucket.doc_count,
            })
            .collect();

        let recent_complaints = recent.hits.total.value;

        Ok(ServicerRiskProfile {
            servicer: company.to_string(),
            total_complaints: all_time.hits.total.value,
            recent_complaints,
            top_issues,
            risk_score: risk_score(recent_complaints),
        })
    }
}

/// Saturating risk curve over the trailing-year complaint count:
/// 100 * r / (r + 50). Zero complaints score zero; 50 score 50; the curve
/// approaches 100 without reaching it.
pub(crate) fn risk_score(recent_complaints: u64) -> u8 {
    if recent_complaints == 0 {
        return 0;
    }
    (recent_complaints * 100 / (recent_complaints + 50)) as u8
}
