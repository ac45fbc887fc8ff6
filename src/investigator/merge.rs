//! Candidate table and source-update merging
//!
//! All concurrent fan-out results funnel into one of these tables through
//! [`SourceUpdate`] messages, so merges into a candidate's confidence and
//! source list are serialized without locks. Each update variant has its
//! own merge arm.

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};

use crate::model::candidate::normalize_name;
use crate::model::{CandidateTrust, DebtCategory, SecurityIdentifier, VerificationRecord};
use crate::sources::traits::{FilingHit, IdentifierHit, RegistrantDetails};

/// Confidence seed for a candidate discovered through a filing hit
pub(crate) const FILING_SEED: u8 = 40;
/// Bonus for ABS-specific filing categories
pub(crate) const ABS_FORM_BONUS: u8 = 20;
/// Bonus for filings within the trailing two years
pub(crate) const RECENT_FILING_BONUS: u8 = 10;
/// Bonus for a successful registrant lookup
pub(crate) const REGISTRANT_BONUS: u8 = 15;
/// Bonus when an identifier search corroborates an existing candidate
pub(crate) const IDENTIFIER_BONUS: u8 = 15;
/// Confidence seed for a candidate discovered through an identifier hit
pub(crate) const IDENTIFIER_SEED: u8 = 40;
/// Bonus for observed trade activity
pub(crate) const TRADE_BONUS: u8 = 20;

const RECENT_FILING_WINDOW_DAYS: i64 = 730;

/// One partial result emitted by a source task
#[derive(Debug)]
pub(crate) enum SourceUpdate {
    FilingHits {
        hits: Vec<FilingHit>,
    },
    RegistrantVerified {
        candidate_key: String,
        details: RegistrantDetails,
    },
    IdentifierHits {
        hits: Vec<IdentifierHit>,
    },
    TradeActivity {
        candidate_key: String,
        trade_count: usize,
    },
    SourceFailure {
        source: &'static str,
        detail: String,
    },
}

/// A candidate plus its verification state and merge bookkeeping
#[derive(Debug)]
pub(crate) struct TableEntry {
    pub key: String,
    pub trust: CandidateTrust,
    pub verification: VerificationRecord,
    pub registry_id: Option<String>,
    pub registrant_verified: bool,
}

/// The in-progress candidate table for one investigation
#[derive(Debug)]
pub(crate) struct CandidateTable {
    category: DebtCategory,
    today: NaiveDate,
    entries: Vec<TableEntry>,
    failures: Vec<(&'static str, String)>,
}

impl CandidateTable {
    pub fn new(category: DebtCategory) -> Self {
        Self {
            category,
            today: Utc::now().date_naive(),
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_today(category: DebtCategory, today: NaiveDate) -> Self {
        Self {
            category,
            today,
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[cfg(test)]
    fn confidence_of(&self, key: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.verification.confidence_score)
    }

    pub fn merge(&mut self, update: SourceUpdate) {
        match update {
            SourceUpdate::FilingHits { hits } => {
                for hit in hits {
                    self.merge_filing_hit(hit);
                }
            }
            SourceUpdate::RegistrantVerified {
                candidate_key,
                details,
            } => self.merge_registrant(&candidate_key, details),
            SourceUpdate::IdentifierHits { hits } => {
                for hit in hits {
                    self.merge_identifier_hit(hit);
                }
            }
            SourceUpdate::TradeActivity {
                candidate_key,
                trade_count,
            } => self.merge_trade_activity(&candidate_key, trade_count),
            SourceUpdate::SourceFailure { source, detail } => {
                tracing::warn!(source = source, detail = %detail, "Source contributed nothing");
                self.failures.push((source, detail));
            }
        }
    }

    fn merge_filing_hit(&mut self, hit: FilingHit) {
        if hit.entity_name.trim().is_empty() {
            return;
        }

        let mut confidence = FILING_SEED;
        let mut reasons = vec![format!(
            "Registry filing {} dated {}",
            hit.form_type, hit.filing_date
        )];
        if is_abs_form(&hit.form_type) {
            confidence += ABS_FORM_BONUS;
            reasons.push(format!("{} is an asset-backed filing category", hit.form_type));
        }
        if self.is_recent(hit.filing_date) {
            confidence += RECENT_FILING_BONUS;
            reasons.push("Filed within the last two years".to_string());
        }

        let key = normalize_name(&hit.entity_name);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            // Case-insensitive duplicate: keep one candidate, retain the
            // higher score, and absorb anything new the hit carries.
            if confidence > entry.verification.confidence_score {
                entry.verification.confidence_score = confidence;
                entry.trust.match_score = confidence;
                entry.trust.reasons = reasons;
            }
            if entry.trust.filing_url.is_none() {
                entry.trust.filing_url = hit.document_url;
            }
            if entry.registry_id.is_none() {
                entry.registry_id = hit.registry_id;
            }
            for code in hit.extracted_identifiers {
                push_identifier(&mut entry.trust, &code);
            }
            return;
        }

        let mut trust = CandidateTrust::new(hit.entity_name.clone(), self.category);
        trust.match_score = confidence;
        trust.reasons = reasons;
        trust.filing_url = hit.document_url;
        trust.deal_size = hit.deal_size;
        trust.add_source("filing");
        for code in &hit.extracted_identifiers {
            push_identifier(&mut trust, code);
        }

        let mut verification = VerificationRecord::seeded("filing", confidence);
        verification.filing_verified = true;

        self.entries.push(TableEntry {
            key,
            trust,
            verification,
            registry_id: hit.registry_id,
            registrant_verified: false,
        });
    }

    fn merge_registrant(&mut self, candidate_key: &str, details: RegistrantDetails) {
        let Some(entry) = self.entries.iter_mut().find(|e| e.key == candidate_key) else {
            return;
        };
        if entry.registrant_verified {
            return;
        }
        entry.registrant_verified = true;
        entry.verification.contribute("registrant", REGISTRANT_BONUS);
        entry.trust.add_source("registrant");
        entry.trust.add_reason(format!(
            "Registrant record confirmed{}",
            details
                .jurisdiction
                .as_deref()
                .map(|j| format!(" ({})", j))
                .unwrap_or_default()
        ));
        if entry.trust.trustee.is_none() {
            entry.trust.trustee = details.name;
        }
    }

    fn merge_identifier_hit(&mut self, hit: IdentifierHit) {
        if hit.identifier.trim().is_empty() {
            return;
        }

        let name_key = normalize_name(&hit.name);
        let existing = self.entries.iter_mut().find(|e| {
            e.trust.has_identifier(&hit.identifier) || (!name_key.is_empty() && e.key == name_key)
        });

        if let Some(entry) = existing {
            if !entry.verification.identifier_verified {
                entry.verification.contribute("identifier", IDENTIFIER_BONUS);
                entry.verification.identifier_verified = true;
                entry
                    .trust
                    .add_reason(format!("Identifier {} corroborated", hit.identifier));
            }
            entry.trust.add_source("identifier");
            push_identifier(&mut entry.trust, &hit.identifier);
            return;
        }

        if hit.name.trim().is_empty() {
            return;
        }

        let mut trust = CandidateTrust::new(hit.name.clone(), self.category);
        trust.match_score = IDENTIFIER_SEED;
        trust.add_source("identifier");
        trust.add_reason(format!(
            "Identifier registry lists {} under this name",
            hit.identifier
        ));
        trust.securities.push(SecurityIdentifier {
            code: hit.identifier,
            tranche: hit.security_type.unwrap_or_else(|| "Note".to_string()),
            rating: None,
            face_balance: None,
        });

        let mut verification = VerificationRecord::seeded("identifier", IDENTIFIER_SEED);
        verification.identifier_verified = true;

        self.entries.push(TableEntry {
            key: name_key,
            trust,
            verification,
            registry_id: None,
            registrant_verified: false,
        });
    }

    fn merge_trade_activity(&mut self, candidate_key: &str, trade_count: usize) {
        let Some(entry) = self.entries.iter_mut().find(|e| e.key == candidate_key) else {
            return;
        };
        if trade_count == 0 || entry.verification.trade_verified {
            return;
        }
        entry.verification.contribute("trace", TRADE_BONUS);
        entry.verification.trade_verified = true;
        entry.trust.add_source("trace");
        entry
            .trust
            .add_reason(format!("{} trade reports observed", trade_count));
    }

    /// Mark every candidate's complaint check done
    pub fn mark_complaints_checked(&mut self) {
        for entry in &mut self.entries {
            entry.verification.complaint_checked = true;
            entry.verification.contribute("complaints", 0);
        }
    }

    /// Seed the table from offline-generated candidates (fallback path)
    pub fn absorb_offline(&mut self, candidates: Vec<CandidateTrust>) {
        for trust in candidates {
            let key = trust.dedup_key();
            if self.entries.iter().any(|e| e.key == key) {
                continue;
            }
            let verification = VerificationRecord::seeded("catalog", trust.match_score);
            self.entries.push(TableEntry {
                key,
                trust,
                verification,
                registry_id: None,
                registrant_verified: false,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keys and primary identifiers of the top `limit` candidates by
    /// current confidence, for trade probing
    pub fn trade_probe_targets(&self, limit: usize) -> Vec<(String, String)> {
        let mut ranked: Vec<&TableEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.verification
                .confidence_score
                .cmp(&a.verification.confidence_score)
                .then_with(|| a.trust.name.cmp(&b.trust.name))
        });
        ranked
            .into_iter()
            .filter_map(|entry| {
                entry
                    .trust
                    .primary_identifier()
                    .map(|id| (entry.key.clone(), id.to_string()))
            })
            .take(limit)
            .collect()
    }

    /// Candidates carrying an unverified registry id, for registrant lookup
    pub fn registrant_lookup_targets(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|e| !e.registrant_verified)
            .filter_map(|e| e.registry_id.as_ref().map(|id| (e.key.clone(), id.clone())))
            .collect()
    }

    pub fn failed_sources(&self) -> Vec<&'static str> {
        let mut sources: Vec<&'static str> = Vec::new();
        for (source, _) in &self.failures {
            if !sources.contains(source) {
                sources.push(source);
            }
        }
        sources
    }

    /// Sort descending by confidence and hand the entries over
    pub fn finalize(self) -> Vec<TableEntry> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| {
            b.verification
                .confidence_score
                .cmp(&a.verification.confidence_score)
                .then_with(|| a.trust.name.cmp(&b.trust.name))
        });
        entries
    }

    fn is_recent(&self, filing_date: NaiveDate) -> bool {
        filing_date >= self.today - ChronoDuration::days(RECENT_FILING_WINDOW_DAYS)
            && filing_date <= self.today
    }
}

fn push_identifier(trust: &mut CandidateTrust, code: &str) {
    if code.trim().is_empty() || trust.has_identifier(code) {
        return;
    }
    trust.securities.push(SecurityIdentifier {
        code: code.to_string(),
        tranche: format!("Note {}", trust.securities.len() + 1),
        rating: None,
        face_balance: None,
    });
}

/// ABS-specific filing categories
fn is_abs_form(form_type: &str) -> bool {
    let form = form_type.trim().to_ascii_uppercase();
    form.starts_with("ABS")
        || form.starts_with("SF-")
        || form.starts_with("424B")
        || form == "FWP"
        || form == "10-D"
}
