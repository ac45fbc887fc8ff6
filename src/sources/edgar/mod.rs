//! SEC EDGAR filing source
//!
//! Implements the filing-registry contract over the EDGAR full-text search
//! and submissions endpoints. Registrant lookups read through the injected
//! TTL cache.

pub mod client;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::cache::TtlCache;
use super::traits::{FilingHit, FilingSource, RegistrantDetails, SearchWindow};
use crate::config::SourceConfig;
use client::{pad_cik, EdgarClient};

pub struct EdgarFilingSource {
    client: EdgarClient,
    registrants: Arc<TtlCache<RegistrantDetails>>,
}

impl EdgarFilingSource {
    pub fn new(
        config: &SourceConfig,
        registrants: Arc<TtlCache<RegistrantDetails>>,
    ) -> Result<Self> {
        Ok(Self {
            client: EdgarClient::new(config)?,
            registrants,
        })
    }
}

#[async_trait]
impl FilingSource for EdgarFilingSource {
    fn source_id(&self) -> &'static str {
        "edgar"
    }

    async fn search_filings(
        &self,
        query: &str,
        window: Option<SearchWindow>,
    ) -> Result<Vec<FilingHit>> {
        let response = self.client.full_text_search(query, window).await?;

        let mut hits = Vec::new();
        for hit in response.hits.hits {
            let source = hit.source;
            let display = source.display_names.first().cloned().unwrap_or_default();
            let entity_name = strip_cik_suffix(&display);
            if entity_name.is_empty() {
                continue;
            }

            let filing_date = source
                .file_date
                .as_deref()
                .and_then(parse_edgar_date)
                .unwrap_or_default();

            let registry_id = source
                .ciks
                .first()
                .cloned()
                .or_else(|| extract_cik(&display));

            let document_url = match (&registry_id, &source.adsh) {
                (Some(cik), Some(adsh)) => Some(format!(
                    "https://www.sec.gov/Archives/edgar/data/{}/{}",
                    cik.trim_start_matches('0'),
                    adsh.replace('-', "")
                )),
                _ => None,
            };

            hits.push(FilingHit {
                extracted_identifiers: extract_identifier_codes(&display),
                entity_name,
                form_type: source.file_type.unwrap_or_default(),
                filing_date,
                document_url,
                registry_id,
                deal_size: None,
            });
        }

        Ok(hits)
    }

    async fn lookup_registrant(&self, registry_id: &str) -> Result<Option<RegistrantDetails>> {
        let key = pad_cik(registry_id);
        if let Some(cached) = self.registrants.get(&key) {
            return Ok(Some(cached));
        }

        let Some(submissions) = self.client.get_submissions(registry_id).await? else {
            return Ok(None);
        };

        let details = RegistrantDetails {
            registry_id: key.clone(),
            name: Some(submissions.name.clone()),
            tax_id: submissions.ein.clone(),
            jurisdiction: submissions.state_of_incorporation.clone(),
            address: submissions
                .addresses
                .as_ref()
                .and_then(|a| a.business.as_ref())
                .map(|a| a.formatted()),
        };

        self.registrants.insert(key, details.clone());
        Ok(Some(details))
    }
}

/// EDGAR display names end with "(CIK 0001234567)"
fn strip_cik_suffix(display: &str) -> String {
    cik_suffix_re()
        .replace(display, "")
        .trim()
        .to_string()
}

fn extract_cik(display: &str) -> Option<String> {
    cik_suffix_re()
        .captures(display)
        .map(|caps| caps[1].to_string())
}

fn cik_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(CIK\s+(\d{1,10})\)").unwrap())
}

/// Pull CUSIP-shaped codes (9 chars: 6-char issuer root + 2-char issue +
/// check digit) out of filing text.
pub(crate) fn extract_identifier_codes(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\b[0-9]{3}[0-9A-Z]{5}[0-9]\b").unwrap());

    let mut codes: Vec<String> = Vec::new();
    for found in re.find_iter(text) {
        let code = found.as_str().to_string();
        // All-digit 9-char strings are usually zip+4 or CIKs, not CUSIPs
        if code.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn parse_edgar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
