//! Bundled reference catalog of securitization trust programs
//!
//! A static snapshot of well-known shelf programs, used by the offline
//! candidate generator when live sources are unavailable. Vintage ranges
//! and note structures reflect each program's public series history.

use crate::model::DebtCategory;

/// One note in a program's typical series structure
#[derive(Debug, Clone, Copy)]
pub struct SeriesNote {
    pub tranche: &'static str,
    pub rating: &'static str,
    pub code_suffix: &'static str,
}

/// Geographic footprint of a program's collateral pool
#[derive(Debug, Clone, Copy)]
pub enum Footprint {
    National,
    States(&'static [&'static str]),
}

impl Footprint {
    pub fn covers(&self, state: &str) -> bool {
        match self {
            Self::National => true,
            Self::States(states) => states.iter().any(|s| s.eq_ignore_ascii_case(state)),
        }
    }
}

/// A shelf program template the generator matches profiles against
#[derive(Debug, Clone, Copy)]
pub struct TrustTemplate {
    pub program: &'static str,
    pub trustee: &'static str,
    pub category: DebtCategory,
    /// Lowercase name prefixes of servicers known to sponsor this program
    pub sponsor_prefixes: &'static [&'static str],
    /// Lowercase names of originators that feed this program
    pub originators: &'static [&'static str],
    /// Inclusive vintage year range of the program's series
    pub vintage: (i32, i32),
    pub footprint: Footprint,
    /// Issuer root of the program's identifier codes
    pub cusip_root: &'static str,
    /// Typical deal size, millions
    pub typical_deal_size_m: u64,
    /// Senior tranche first; between 1 and 8 notes
    pub notes: &'static [SeriesNote],
}

pub fn catalog() -> &'static [TrustTemplate] {
    CATALOG
}

pub fn catalog_for(category: DebtCategory) -> impl Iterator<Item = &'static TrustTemplate> {
    CATALOG.iter().filter(move |t| t.category == category)
}

const CATALOG: &[TrustTemplate] = &[
    // ----- Auto loans -----
    TrustTemplate {
        program: "Santander Drive Auto Receivables Trust",
        trustee: "Citibank N.A.",
        category: DebtCategory::AutoLoan,
        sponsor_prefixes: &["santander", "chrysler capital"],
        originators: &["santander consumer usa", "chrysler capital"],
        vintage: (2010, 2025),
        footprint: Footprint::National,
        cusip_root: "80285W",
        typical_deal_size_m: 1250,
        notes: &[
            SeriesNote { tranche: "Class A-2", rating: "AAA", code_suffix: "AB2" },
            SeriesNote { tranche: "Class A-3", rating: "AAA", code_suffix: "AC0" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AD8" },
            SeriesNote { tranche: "Class C", rating: "A", code_suffix: "AE6" },
            SeriesNote { tranche: "Class D", rating: "BBB", code_suffix: "AF3" },
        ],
    },
    TrustTemplate {
        program: "AmeriCredit Automobile Receivables Trust",
        trustee: "Wells Fargo Bank N.A.",
        category: DebtCategory::AutoLoan,
        sponsor_prefixes: &["americredit", "gm financial"],
        originators: &["americredit financial services", "gm financial"],
        vintage: (2009, 2025),
        footprint: Footprint::National,
        cusip_root: "03066H",
        typical_deal_size_m: 1100,
        notes: &[
            SeriesNote { tranche: "Class A-2", rating: "AAA", code_suffix: "AB4" },
            SeriesNote { tranche: "Class A-3", rating: "AAA", code_suffix: "AC2" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AD0" },
            SeriesNote { tranche: "Class C", rating: "A", code_suffix: "AE8" },
        ],
    },
    TrustTemplate {
        program: "CarMax Auto Owner Trust",
        trustee: "U.S. Bank N.A.",
        category: DebtCategory::AutoLoan,
        sponsor_prefixes: &["carmax"],
        originators: &["carmax business services"],
        vintage: (2011, 2025),
        footprint: Footprint::National,
        cusip_root: "14316N",
        typical_deal_size_m: 1400,
        notes: &[
            SeriesNote { tranche: "Class A-2a", rating: "AAA", code_suffix: "AB9" },
            SeriesNote { tranche: "Class A-3", rating: "AAA", code_suffix: "AC7" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AD5" },
        ],
    },
    TrustTemplate {
        program: "Westlake Automobile Receivables Trust",
        trustee: "Wilmington Trust N.A.",
        category: DebtCategory::AutoLoan,
        sponsor_prefixes: &["westlake"],
        originators: &["westlake services", "westlake financial"],
        vintage: (2014, 2025),
        footprint: Footprint::States(&["CA", "TX", "FL", "AZ", "NV", "GA"]),
        cusip_root: "96042L",
        typical_deal_size_m: 900,
        notes: &[
            SeriesNote { tranche: "Class A-2", rating: "AAA", code_suffix: "AB1" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AC9" },
            SeriesNote { tranche: "Class C", rating: "A", code_suffix: "AD7" },
            SeriesNote { tranche: "Class D", rating: "BBB", code_suffix: "AE5" },
        ],
    },
    // ----- Mortgages -----
    TrustTemplate {
        program: "Towd Point Mortgage Trust",
        trustee: "U.S. Bank N.A.",
        category: DebtCategory::Mortgage,
        sponsor_prefixes: &["select portfolio", "sps", "cerberus"],
        originators: &["countrywide home loans", "washington mutual", "wachovia"],
        vintage: (2015, 2025),
        footprint: Footprint::National,
        cusip_root: "89175E",
        typical_deal_size_m: 2100,
        notes: &[
            SeriesNote { tranche: "Class A1", rating: "AAA", code_suffix: "AA4" },
            SeriesNote { tranche: "Class A2", rating: "AA", code_suffix: "AB2" },
            SeriesNote { tranche: "Class M1", rating: "A", code_suffix: "AC0" },
            SeriesNote { tranche: "Class M2", rating: "BBB", code_suffix: "AD8" },
            SeriesNote { tranche: "Class B1", rating: "BB", code_suffix: "AE6" },
            SeriesNote { tranche: "Class B2", rating: "B", code_suffix: "AF3" },
        ],
    },
    TrustTemplate {
        program: "JPMorgan Mortgage Trust",
        trustee: "Citibank N.A.",
        category: DebtCategory::Mortgage,
        sponsor_prefixes: &["jpmorgan", "chase home"],
        originators: &["jpmorgan chase bank", "chase home finance"],
        vintage: (2013, 2025),
        footprint: Footprint::National,
        cusip_root: "46654M",
        typical_deal_size_m: 1800,
        notes: &[
            SeriesNote { tranche: "Class A-3", rating: "AAA", code_suffix: "AC5" },
            SeriesNote { tranche: "Class A-4", rating: "AAA", code_suffix: "AD3" },
            SeriesNote { tranche: "Class B-1", rating: "AA", code_suffix: "AE1" },
            SeriesNote { tranche: "Class B-2", rating: "A", code_suffix: "AF8" },
        ],
    },
    TrustTemplate {
        program: "GSAMP Trust",
        trustee: "Deutsche Bank National Trust Company",
        category: DebtCategory::Mortgage,
        sponsor_prefixes: &["goldman", "ocwen", "litton"],
        originators: &["new century mortgage", "fremont investment", "long beach mortgage"],
        vintage: (2002, 2007),
        footprint: Footprint::National,
        cusip_root: "362341",
        typical_deal_size_m: 1500,
        notes: &[
            SeriesNote { tranche: "Class A-1", rating: "AAA", code_suffix: "AA6" },
            SeriesNote { tranche: "Class M-1", rating: "AA", code_suffix: "AB4" },
            SeriesNote { tranche: "Class M-2", rating: "A", code_suffix: "AC2" },
            SeriesNote { tranche: "Class B-1", rating: "BBB", code_suffix: "AD0" },
        ],
    },
    // ----- Credit cards -----
    TrustTemplate {
        program: "Chase Issuance Trust",
        trustee: "Wells Fargo Bank N.A.",
        category: DebtCategory::CreditCard,
        sponsor_prefixes: &["chase", "jpmorgan"],
        originators: &["chase bank usa", "jpmorgan chase bank"],
        vintage: (2002, 2025),
        footprint: Footprint::National,
        cusip_root: "161571",
        typical_deal_size_m: 1000,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "AAA", code_suffix: "HN4" },
            SeriesNote { tranche: "Class B", rating: "A", code_suffix: "HP9" },
            SeriesNote { tranche: "Class C", rating: "BBB", code_suffix: "HQ7" },
        ],
    },
    TrustTemplate {
        program: "Citibank Credit Card Issuance Trust",
        trustee: "Deutsche Bank Trust Company Americas",
        category: DebtCategory::CreditCard,
        sponsor_prefixes: &["citi", "citibank"],
        originators: &["citibank n.a."],
        vintage: (2000, 2025),
        footprint: Footprint::National,
        cusip_root: "17305E",
        typical_deal_size_m: 1200,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "AAA", code_suffix: "GY0" },
            SeriesNote { tranche: "Class B", rating: "A", code_suffix: "GZ7" },
        ],
    },
    TrustTemplate {
        program: "Capital One Multi-Asset Execution Trust",
        trustee: "Deutsche Bank Trust Company Americas",
        category: DebtCategory::CreditCard,
        sponsor_prefixes: &["capital one"],
        originators: &["capital one bank"],
        vintage: (2002, 2025),
        footprint: Footprint::National,
        cusip_root: "14041N",
        typical_deal_size_m: 850,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "AAA", code_suffix: "FW5" },
            SeriesNote { tranche: "Class B", rating: "A", code_suffix: "FX3" },
            SeriesNote { tranche: "Class C", rating: "BBB", code_suffix: "FY1" },
        ],
    },
    // ----- Student loans -----
    TrustTemplate {
        program: "Navient Student Loan Trust",
        trustee: "Deutsche Bank National Trust Company",
        category: DebtCategory::StudentLoan,
        sponsor_prefixes: &["navient", "sallie mae"],
        originators: &["sallie mae bank", "navient solutions"],
        vintage: (2014, 2025),
        footprint: Footprint::National,
        cusip_root: "63941A",
        typical_deal_size_m: 700,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "AAA", code_suffix: "AA2" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AB0" },
        ],
    },
    TrustTemplate {
        program: "SLM Student Loan Trust",
        trustee: "Deutsche Bank National Trust Company",
        category: DebtCategory::StudentLoan,
        sponsor_prefixes: &["slm", "sallie mae"],
        originators: &["slm corporation", "sallie mae"],
        vintage: (1995, 2014),
        footprint: Footprint::National,
        cusip_root: "78442G",
        typical_deal_size_m: 1600,
        notes: &[
            SeriesNote { tranche: "Class A-5", rating: "AAA", code_suffix: "JD1" },
            SeriesNote { tranche: "Class A-6", rating: "AAA", code_suffix: "JE9" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "JF6" },
        ],
    },
    TrustTemplate {
        program: "SoFi Professional Loan Program",
        trustee: "Wilmington Trust N.A.",
        category: DebtCategory::StudentLoan,
        sponsor_prefixes: &["sofi"],
        originators: &["sofi lending corp"],
        vintage: (2015, 2025),
        footprint: Footprint::National,
        cusip_root: "83403A",
        typical_deal_size_m: 550,
        notes: &[
            SeriesNote { tranche: "Class A-1", rating: "AAA", code_suffix: "AA8" },
            SeriesNote { tranche: "Class A-2", rating: "AAA", code_suffix: "AB6" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AC4" },
        ],
    },
    // ----- Personal loans -----
    TrustTemplate {
        program: "Marlette Funding Trust",
        trustee: "Wilmington Trust N.A.",
        category: DebtCategory::PersonalLoan,
        sponsor_prefixes: &["marlette", "best egg"],
        originators: &["cross river bank", "marlette funding"],
        vintage: (2016, 2025),
        footprint: Footprint::National,
        cusip_root: "57106P",
        typical_deal_size_m: 400,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "AA", code_suffix: "AA5" },
            SeriesNote { tranche: "Class B", rating: "A", code_suffix: "AB3" },
            SeriesNote { tranche: "Class C", rating: "BBB", code_suffix: "AC1" },
        ],
    },
    TrustTemplate {
        program: "OneMain Financial Issuance Trust",
        trustee: "Wilmington Trust N.A.",
        category: DebtCategory::PersonalLoan,
        sponsor_prefixes: &["onemain", "springleaf"],
        originators: &["onemain finance corporation", "springleaf finance"],
        vintage: (2014, 2025),
        footprint: Footprint::National,
        cusip_root: "68268B",
        typical_deal_size_m: 800,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "AAA", code_suffix: "AA7" },
            SeriesNote { tranche: "Class B", rating: "AA", code_suffix: "AB5" },
            SeriesNote { tranche: "Class C", rating: "A", code_suffix: "AC3" },
            SeriesNote { tranche: "Class D", rating: "BBB", code_suffix: "AD1" },
        ],
    },
    TrustTemplate {
        program: "Upstart Securitization Trust",
        trustee: "Wilmington Savings Fund Society",
        category: DebtCategory::PersonalLoan,
        sponsor_prefixes: &["upstart"],
        originators: &["cross river bank", "finwise bank"],
        vintage: (2017, 2025),
        footprint: Footprint::National,
        cusip_root: "91680R",
        typical_deal_size_m: 350,
        notes: &[
            SeriesNote { tranche: "Class A", rating: "A", code_suffix: "AA9" },
            SeriesNote { tranche: "Class B", rating: "BBB", code_suffix: "AB7" },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_is_covered() {
        for category in DebtCategory::all() {
            assert!(
                catalog_for(*category).count() > 0,
                "no templates for {category}"
            );
        }
    }

    #[test]
    fn test_note_structures_are_bounded() {
        for template in catalog() {
            assert!(!template.notes.is_empty());
            assert!(template.notes.len() <= 8);
            assert!(template.vintage.0 <= template.vintage.1);
        }
    }

    #[test]
    fn test_footprint_covers() {
        assert!(Footprint::National.covers("TX"));
        let regional = Footprint::States(&["CA", "TX"]);
        assert!(regional.covers("tx"));
        assert!(!regional.covers("NY"));
    }
}
