//! Search-query derivation from partial debt information
//!
//! Queries are derived deterministically from the profile plus static
//! keyword and known-issuer tables. Priority order: servicer-derived,
//! creditor-derived, the generic debt-type phrase, then one query per
//! well-known issuer combined with the phrase. First-seen deduplication.

use crate::model::{DebtCategory, DebtProfile};

/// Generic keyword phrase for a debt category, as it appears in filing
/// full-text indexes.
pub fn keyword_phrase(category: DebtCategory) -> &'static str {
    match category {
        DebtCategory::Mortgage => "mortgage loan trust",
        DebtCategory::AutoLoan => "auto receivables trust",
        DebtCategory::CreditCard => "credit card issuance trust",
        DebtCategory::StudentLoan => "student loan trust",
        DebtCategory::PersonalLoan => "consumer loan trust",
    }
}

/// Short qualifier appended to servicer/creditor names
fn category_qualifier(category: DebtCategory) -> &'static str {
    match category {
        DebtCategory::Mortgage => "mortgage trust",
        DebtCategory::AutoLoan => "auto receivables",
        DebtCategory::CreditCard => "credit card trust",
        DebtCategory::StudentLoan => "student loan trust",
        DebtCategory::PersonalLoan => "consumer loan trust",
    }
}

/// Sponsors that run well-known securitization programs per category
pub fn known_issuers(category: DebtCategory) -> &'static [&'static str] {
    match category {
        DebtCategory::Mortgage => &[
            "JPMorgan Mortgage Trust",
            "Wells Fargo Mortgage Backed Securities",
            "GSAMP",
            "New Residential Mortgage",
            "Towd Point Mortgage",
        ],
        DebtCategory::AutoLoan => &[
            "Santander Drive Auto Receivables",
            "AmeriCredit Automobile Receivables",
            "CarMax Auto Owner",
            "Ally Auto Receivables",
            "Westlake Automobile Receivables",
        ],
        DebtCategory::CreditCard => &[
            "Chase Issuance Trust",
            "Citibank Credit Card Issuance",
            "Capital One Multi-Asset Execution",
            "Discover Card Execution Note",
            "American Express Credit Account Master",
        ],
        DebtCategory::StudentLoan => &[
            "Navient Student Loan",
            "SLM Student Loan",
            "Nelnet Student Loan",
            "SoFi Professional Loan Program",
        ],
        DebtCategory::PersonalLoan => &[
            "Marlette Funding",
            "Avant Loans Funding",
            "Upstart Securitization",
            "OneMain Financial Issuance",
        ],
    }
}

/// Derive the ordered, deduplicated search strings for a profile
pub fn build_queries(profile: &DebtProfile) -> Vec<String> {
    let category = profile.debt_type;
    let mut queries: Vec<String> = Vec::new();

    let mut push = |queries: &mut Vec<String>, query: String| {
        let trimmed = query.trim().to_string();
        if trimmed.is_empty() {
            return;
        }
        if !queries
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&trimmed))
        {
            queries.push(trimmed);
        }
    };

    if let Some(ref servicer) = profile.servicer_name {
        push(
            &mut queries,
            format!("{} {}", servicer, category_qualifier(category)),
        );
    }
    if let Some(ref creditor) = profile.original_creditor {
        push(
            &mut queries,
            format!("{} {}", creditor, category_qualifier(category)),
        );
    }

    push(&mut queries, keyword_phrase(category).to_string());

    for issuer in known_issuers(category) {
        push(
            &mut queries,
            format!("{} {}", issuer, keyword_phrase(category)),
        );
    }

    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_queries_is_deterministic() {
        let profile = DebtProfile::new(DebtCategory::AutoLoan)
            .with_servicer("Santander Consumer USA")
            .with_creditor("Chrysler Capital");

        let first = build_queries(&profile);
        let second = build_queries(&profile);
        assert_eq!(first, second);
    }

    #[test]
    fn test_priority_order() {
        let profile = DebtProfile::new(DebtCategory::AutoLoan)
            .with_servicer("Santander Consumer USA")
            .with_creditor("Chrysler Capital");

        let queries = build_queries(&profile);
        assert_eq!(queries[0], "Santander Consumer USA auto receivables");
        assert_eq!(queries[1], "Chrysler Capital auto receivables");
        assert_eq!(queries[2], "auto receivables trust");
        assert!(queries.len() > 3);
    }

    #[test]
    fn test_dedup_is_case_insensitive_first_seen() {
        let profile = DebtProfile::new(DebtCategory::AutoLoan)
            .with_servicer("Santander Consumer USA")
            .with_creditor("SANTANDER CONSUMER USA");

        let queries = build_queries(&profile);
        let santander_queries: Vec<_> = queries
            .iter()
            .filter(|q| q.to_lowercase().starts_with("santander consumer"))
            .collect();
        assert_eq!(santander_queries.len(), 1);
        // First-seen casing wins
        assert_eq!(
            santander_queries[0].as_str(),
            "Santander Consumer USA auto receivables"
        );
    }

    #[test]
    fn test_bare_profile_still_yields_queries() {
        let profile = DebtProfile::new(DebtCategory::StudentLoan);
        let queries = build_queries(&profile);
        assert_eq!(queries[0], "student loan trust");
        assert_eq!(queries.len(), 1 + known_issuers(DebtCategory::StudentLoan).len());
    }

    #[test]
    fn test_every_category_has_tables() {
        for category in DebtCategory::all() {
            assert!(!keyword_phrase(*category).is_empty());
            assert!(!known_issuers(*category).is_empty());
        }
    }
}
