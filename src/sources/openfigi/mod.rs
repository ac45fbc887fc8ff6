//! OpenFIGI identifier source
//!
//! Search and lookup over the OpenFIGI v3 API. Works unauthenticated at a
//! reduced rate limit; an API key raises it.

pub mod types;

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;

use super::traits::{IdentifierHit, IdentifierSource};
use crate::config::SourceConfig;
use types::{FigiEntry, MappingRequest, SearchRequest, SearchResponse};

// Unauthenticated tier allows 25 req/min
const RATE_LIMIT_DELAY_MS: u64 = 2500;
const KEYED_RATE_LIMIT_DELAY_MS: u64 = 250;

pub struct OpenFigiSource {
    http: Client,
    base: String,
    api_key: Option<String>,
    last_request: Mutex<Instant>,
}

impl OpenFigiSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base: config.openfigi_base.clone(),
            api_key: config.openfigi_api_key.clone(),
            last_request: Mutex::new(Instant::now()),
        })
    }

    async fn rate_limit(&self) {
        let delay = if self.api_key.is_some() {
            Duration::from_millis(KEYED_RATE_LIMIT_DELAY_MS)
        } else {
            Duration::from_millis(RATE_LIMIT_DELAY_MS)
        };

        let elapsed = {
            let last = self.last_request.lock().unwrap();
            last.elapsed()
        };
        if elapsed < delay {
            sleep(delay - elapsed).await;
        }

        let mut last = self.last_request.lock().unwrap();
        *last = Instant::now();
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.post(format!("{}{}", self.base, path));
        if let Some(ref key) = self.api_key {
            builder = builder.header("X-OPENFIGI-APIKEY", key);
        }
        builder
    }
}

#[async_trait]
impl IdentifierSource for OpenFigiSource {
    fn source_id(&self) -> &'static str {
        "openfigi"
    }

    async fn search(&self, query: &str) -> Result<Vec<IdentifierHit>> {
        self.rate_limit().await;

        let response = self
            .request("/search")
            .json(&SearchRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("Failed to search OpenFIGI for '{}'", query))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "OpenFIGI search error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse OpenFIGI response for '{}'", query))?;

        Ok(parsed.data.into_iter().map(to_hit).collect())
    }

    async fn lookup(&self, code: &str) -> Result<Option<IdentifierHit>> {
        self.rate_limit().await;

        let response = self
            .request("/mapping")
            .json(&[MappingRequest {
                id_type: "ID_CUSIP".to_string(),
                id_value: code.to_string(),
            }])
            .send()
            .await
            .with_context(|| format!("Failed to look up identifier '{}'", code))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "OpenFIGI mapping error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        let parsed: Vec<types::MappingResponse> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse OpenFIGI mapping for '{}'", code))?;

        let entry = parsed.into_iter().next().and_then(|mapping| {
            if let Some(ref error) = mapping.error {
                tracing::debug!(code = %code, error = %error, "OpenFIGI mapping miss");
            }
            mapping.data.into_iter().next()
        });

        Ok(entry.map(|e| {
            let mut hit = to_hit(e);
            // The mapping endpoint echoes FIGIs; the caller asked about the
            // original code, so keep it as the identifier.
            hit.identifier = code.to_string();
            hit
        }))
    }
}

fn to_hit(entry: FigiEntry) -> IdentifierHit {
    IdentifierHit {
        identifier: entry.figi,
        name: entry.name.unwrap_or_default(),
        issuer: entry.ticker,
        market_sector: entry.market_sector,
        security_type: entry.security_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hit_maps_fields() {
        let entry = FigiEntry {
            figi: "BBG00XYZ12345".to_string(),
            name: Some("SDART 2025-1 A2".to_string()),
            ticker: Some("SDART".to_string()),
            market_sector: Some("Mtge".to_string()),
            security_type: Some("ABS".to_string()),
        };
        let hit = to_hit(entry);
        assert_eq!(hit.identifier, "BBG00XYZ12345");
        assert_eq!(hit.name, "SDART 2025-1 A2");
        assert_eq!(hit.security_type.as_deref(), Some("ABS"));
    }
}
