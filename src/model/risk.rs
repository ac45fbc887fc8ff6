//! Servicer complaint-risk profile

use serde::{Deserialize, Serialize};

/// One ranked complaint issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCount {
    pub issue: String,
    pub count: u64,
}

/// Complaint-derived risk view of a loan servicer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicerRiskProfile {
    pub servicer: String,
    pub total_complaints: u64,
    /// Complaints within the trailing twelve months
    pub recent_complaints: u64,
    /// Most frequent issues, descending by count
    pub top_issues: Vec<IssueCount>,
    /// 0-100
    pub risk_score: u8,
}

impl ServicerRiskProfile {
    /// An empty profile for a servicer with no complaint history
    pub fn clean(servicer: impl Into<String>) -> Self {
        Self {
            servicer: servicer.into(),
            total_complaints: 0,
            recent_complaints: 0,
            top_issues: Vec::new(),
            risk_score: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_profile_is_zeroed() {
        let profile = ServicerRiskProfile::clean("Acme Loan Servicing");
        assert_eq!(profile.total_complaints, 0);
        assert_eq!(profile.risk_score, 0);
        assert!(profile.top_issues.is_empty());
    }
}
