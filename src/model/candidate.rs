//! Candidate trusts and their verification state

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use super::profile::DebtCategory;

/// A rated slice of a securitization's note structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityIdentifier {
    /// Security identifier code (CUSIP-style)
    pub code: String,
    /// Tranche label, e.g. "Class A-2"
    pub tranche: String,
    pub rating: Option<String>,
    pub face_balance: Option<Decimal>,
}

/// A hypothesized trust that may hold a given consumer's debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateTrust {
    pub id: Uuid,
    pub name: String,
    pub trustee: Option<String>,
    pub debt_type: DebtCategory,
    pub closing_date: Option<NaiveDate>,
    pub deal_size: Option<Decimal>,
    /// Ordered, senior tranche first
    pub securities: Vec<SecurityIdentifier>,
    /// Heuristic match score, clamped to [0, 100]
    pub match_score: u8,
    pub reasons: Vec<String>,
    /// Contributing source tags, first-seen order
    pub sources: Vec<String>,
    pub filing_url: Option<String>,
}

impl CandidateTrust {
    pub fn new(name: impl Into<String>, debt_type: DebtCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            trustee: None,
            debt_type,
            closing_date: None,
            deal_size: None,
            securities: Vec::new(),
            match_score: 0,
            reasons: Vec::new(),
            sources: Vec::new(),
            filing_url: None,
        }
    }

    /// Case-insensitive, Unicode-normalized key used for deduplication
    pub fn dedup_key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Record a contributing source tag, preserving first-seen order
    pub fn add_source(&mut self, tag: &str) {
        if !self.sources.iter().any(|s| s == tag) {
            self.sources.push(tag.to_string());
        }
    }

    pub fn add_reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Identifier probed for trade activity; the securities list is ordered
    /// senior tranche first, so the head is the natural probe target.
    pub fn primary_identifier(&self) -> Option<&str> {
        self.securities.first().map(|s| s.code.as_str())
    }

    pub fn has_identifier(&self, code: &str) -> bool {
        self.securities
            .iter()
            .any(|s| s.code.eq_ignore_ascii_case(code))
    }
}

/// Normalize an entity name for matching: NFKC, lowercase, collapsed
/// whitespace.
pub fn normalize_name(name: &str) -> String {
    let normalized: String = name.nfkc().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Per-candidate audit of which source classes corroborated it
///
/// Confidence never decreases once a source has contributed; merges are
/// additive and saturate at 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub filing_verified: bool,
    pub identifier_verified: bool,
    pub trade_verified: bool,
    pub complaint_checked: bool,
    pub last_verified: DateTime<Utc>,
    /// 0-100
    pub confidence_score: u8,
    /// Audit trail of contributing sources, first-seen order
    pub data_sources: Vec<String>,
}

impl VerificationRecord {
    pub fn seeded(source: &str, confidence: u8) -> Self {
        let mut record = Self {
            filing_verified: false,
            identifier_verified: false,
            trade_verified: false,
            complaint_checked: false,
            last_verified: Utc::now(),
            confidence_score: 0,
            data_sources: Vec::new(),
        };
        record.contribute(source, confidence);
        record
    }

    /// Merge a source contribution: bump confidence (saturating at 100) and
    /// record the source tag.
    pub fn contribute(&mut self, source: &str, boost: u8) {
        self.confidence_score = self.confidence_score.saturating_add(boost).min(100);
        if !self.data_sources.iter().any(|s| s == source) {
            self.data_sources.push(source.to_string());
        }
        self.last_verified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_case_and_whitespace() {
        assert_eq!(
            normalize_name("  Santander Drive  AUTO Receivables Trust "),
            "santander drive auto receivables trust"
        );
    }

    #[test]
    fn test_dedup_key_matches_across_case() {
        let a = CandidateTrust::new("GSAMP Trust 2006-HE3", DebtCategory::Mortgage);
        let b = CandidateTrust::new("gsamp trust 2006-he3", DebtCategory::Mortgage);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_add_source_is_idempotent() {
        let mut trust = CandidateTrust::new("Test Trust", DebtCategory::AutoLoan);
        trust.add_source("filing");
        trust.add_source("filing");
        trust.add_source("identifier");
        assert_eq!(trust.sources, vec!["filing", "identifier"]);
    }

    #[test]
    fn test_confidence_saturates_at_100() {
        let mut record = VerificationRecord::seeded("filing", 70);
        record.contribute("identifier", 15);
        record.contribute("trace", 20);
        record.contribute("trace", 20);
        assert_eq!(record.confidence_score, 100);
        assert_eq!(record.data_sources, vec!["filing", "identifier", "trace"]);
    }

    #[test]
    fn test_confidence_is_monotonic() {
        let mut record = VerificationRecord::seeded("filing", 40);
        let mut previous = record.confidence_score;
        for (source, boost) in [("edgar", 20u8), ("identifier", 15), ("trace", 20)] {
            record.contribute(source, boost);
            assert!(record.confidence_score >= previous);
            previous = record.confidence_score;
        }
    }
}
