//! Investigation report types

use serde::{Deserialize, Serialize};

use super::candidate::{CandidateTrust, VerificationRecord};
use super::market::EconomicSnapshot;
use super::risk::ServicerRiskProfile;
use rust_decimal::Decimal;

/// A candidate trust together with its verification state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedCandidate {
    pub trust: CandidateTrust,
    pub verification: VerificationRecord,
}

impl VerifiedCandidate {
    pub fn confidence(&self) -> u8 {
        self.verification.confidence_score
    }
}

/// Run-level accounting for one investigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Candidates seen before truncation to the report cap
    pub candidates_considered: usize,
    /// Distinct source ids dispatched at least once, first-seen order
    pub sources_queried: Vec<String>,
    /// Distinct source ids that failed at least once
    pub sources_failed: Vec<String>,
    pub elapsed_ms: u64,
    pub economic: Option<EconomicSnapshot>,
    /// Trailing delinquency series for the profile's debt category,
    /// oldest first
    pub delinquency_trend: Vec<Decimal>,
    /// True when the run was cut short by the caller's cancellation signal
    pub cancelled: bool,
}

/// The result of one investigation call
///
/// An investigation that found nothing is still a valid report: empty
/// trusts, a "not found" recommendation, no error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationReport {
    /// Descending by confidence
    pub trusts: Vec<VerifiedCandidate>,
    pub summary: RunSummary,
    pub servicer_risk: Vec<ServicerRiskProfile>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::candidate::VerificationRecord;
    use crate::model::profile::DebtCategory;

    #[test]
    fn test_verified_candidate_confidence_passthrough() {
        let candidate = VerifiedCandidate {
            trust: CandidateTrust::new("Test Trust", DebtCategory::AutoLoan),
            verification: VerificationRecord::seeded("filing", 60),
        };
        assert_eq!(candidate.confidence(), 60);
    }
}
