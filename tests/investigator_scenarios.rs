//! Investigator integration scenarios against stubbed sources

mod common;

use std::collections::HashMap;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use common::{
    all_failing_sources, santander_filing_hit, santander_identifier_hit, stub_sources,
    StubComplaintSource, StubEconomicSource, StubFilingSource, StubIdentifierSource,
    StubTradeSource,
};
use securitrace::{
    CandidateGenerator, DebtCategory, DebtProfile, Investigator, InvestigatorOptions, Jitter,
};

fn santander_profile() -> DebtProfile {
    DebtProfile::new(DebtCategory::AutoLoan).with_servicer("Santander Consumer USA")
}

fn deterministic_investigator(sources: securitrace::Sources) -> Investigator {
    Investigator::new(sources)
        .with_generator(CandidateGenerator::new().with_jitter(Jitter::Disabled))
}

#[tokio::test]
async fn scenario_a_filing_and_identifier_corroborate_one_candidate() {
    common::init_tracing();
    let sources = stub_sources(
        StubFilingSource {
            hits: vec![santander_filing_hit()],
            ..Default::default()
        },
        StubIdentifierSource {
            hits: vec![santander_identifier_hit()],
            ..Default::default()
        },
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource::default(),
    );

    let report = deterministic_investigator(sources)
        .investigate(&santander_profile())
        .await
        .unwrap();

    assert_eq!(report.trusts.len(), 1);
    let candidate = &report.trusts[0];
    assert!(candidate
        .verification
        .data_sources
        .contains(&"filing".to_string()));
    assert!(candidate
        .verification
        .data_sources
        .contains(&"identifier".to_string()));
    assert!(candidate.verification.confidence_score >= 70);
    assert!(!candidate.trust.securities.is_empty());
    assert!(candidate.verification.filing_verified);
    assert!(candidate.verification.identifier_verified);
}

#[tokio::test]
async fn scenario_b_all_sources_down_falls_back_to_catalog() {
    common::init_tracing();
    let report = deterministic_investigator(all_failing_sources())
        .investigate(&santander_profile())
        .await
        .unwrap();

    // The offline catalog recognizes the servicer, so the run still
    // produces baseline candidates tagged with the catalog source.
    assert!(!report.trusts.is_empty());
    for candidate in &report.trusts {
        assert_eq!(
            candidate.verification.data_sources,
            vec!["catalog".to_string()]
        );
        assert!(candidate.trust.match_score >= 30);
        assert!(candidate.trust.match_score <= 100);
    }
    assert!(!report.summary.sources_failed.is_empty());
}

#[tokio::test]
async fn scenario_b_nothing_anywhere_yields_empty_report_not_error() {
    // A bare mortgage profile gives the offline matcher nothing to key on.
    let profile = DebtProfile::new(DebtCategory::Mortgage);

    let report = deterministic_investigator(all_failing_sources())
        .investigate(&profile)
        .await
        .unwrap();

    assert!(report.trusts.is_empty());
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("held privately")));
}

#[tokio::test]
async fn trade_activity_marks_top_candidate_trade_verified() {
    let mut trades = HashMap::new();
    trades.insert(
        "80285WAB2".to_string(),
        vec![securitrace::Trade {
            date: "2025-06-02".parse().unwrap(),
            time: None,
            price: "100.00".to_string(),
            yield_rate: "5.0".to_string(),
            volume: 200_000,
            side: "D".to_string(),
            dealer: "A".to_string(),
            report_type: "T".to_string(),
            identifier: "80285WAB2".to_string(),
        }],
    );

    let sources = stub_sources(
        StubFilingSource {
            hits: vec![santander_filing_hit()],
            ..Default::default()
        },
        StubIdentifierSource::default(),
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource {
            trades,
            ..Default::default()
        },
    );

    let report = deterministic_investigator(sources)
        .investigate(&santander_profile())
        .await
        .unwrap();

    let candidate = &report.trusts[0];
    assert!(candidate.verification.trade_verified);
    assert!(candidate
        .verification
        .data_sources
        .contains(&"trace".to_string()));
    // Filing seed 40 + ABS form 20 + recent 10 + trade 20
    assert_eq!(candidate.verification.confidence_score, 90);
}

#[tokio::test]
async fn confidence_is_monotone_as_sources_are_added() {
    let filing_only = stub_sources(
        StubFilingSource {
            hits: vec![santander_filing_hit()],
            ..Default::default()
        },
        StubIdentifierSource {
            fail: true,
            ..Default::default()
        },
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource::default(),
    );
    let filing_and_identifier = stub_sources(
        StubFilingSource {
            hits: vec![santander_filing_hit()],
            ..Default::default()
        },
        StubIdentifierSource {
            hits: vec![santander_identifier_hit()],
            ..Default::default()
        },
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource::default(),
    );

    let baseline = deterministic_investigator(filing_only)
        .investigate(&santander_profile())
        .await
        .unwrap();
    let corroborated = deterministic_investigator(filing_and_identifier)
        .investigate(&santander_profile())
        .await
        .unwrap();

    assert!(
        corroborated.trusts[0].verification.confidence_score
            >= baseline.trusts[0].verification.confidence_score
    );
}

#[tokio::test]
async fn repeated_runs_yield_identical_ordering() {
    let make_sources = || {
        stub_sources(
            StubFilingSource {
                hits: vec![santander_filing_hit()],
                ..Default::default()
            },
            StubIdentifierSource {
                hits: vec![santander_identifier_hit()],
                ..Default::default()
            },
            StubComplaintSource::default(),
            StubEconomicSource::default(),
            StubTradeSource::default(),
        )
    };

    let first = deterministic_investigator(make_sources())
        .investigate(&santander_profile())
        .await
        .unwrap();
    let second = deterministic_investigator(make_sources())
        .investigate(&santander_profile())
        .await
        .unwrap();

    let ordering = |report: &securitrace::InvestigationReport| {
        report
            .trusts
            .iter()
            .map(|c| (c.trust.name.clone(), c.verification.confidence_score))
            .collect::<Vec<_>>()
    };
    assert_eq!(ordering(&first), ordering(&second));
}

#[tokio::test]
async fn quick_mode_skips_registrant_and_economic_steps() {
    let registrant = securitrace::sources::traits::RegistrantDetails {
        registry_id: "0001966234".to_string(),
        name: Some("Santander Drive Auto Receivables Trust".to_string()),
        tax_id: Some("46-1234567".to_string()),
        jurisdiction: Some("DE".to_string()),
        address: None,
    };
    let mut hit = santander_filing_hit();
    hit.registry_id = Some("1966234".to_string());

    let make_sources = |registrant: Option<_>| {
        stub_sources(
            StubFilingSource {
                hits: vec![hit.clone()],
                registrant,
                ..Default::default()
            },
            StubIdentifierSource::default(),
            StubComplaintSource::default(),
            StubEconomicSource::default(),
            StubTradeSource::default(),
        )
    };

    let full = Investigator::new(make_sources(Some(registrant.clone())))
        .with_generator(CandidateGenerator::new().with_jitter(Jitter::Disabled))
        .investigate(&santander_profile())
        .await
        .unwrap();
    let quick = Investigator::new(make_sources(Some(registrant)))
        .with_generator(CandidateGenerator::new().with_jitter(Jitter::Disabled))
        .with_options(InvestigatorOptions::quick())
        .investigate(&santander_profile())
        .await
        .unwrap();

    // Full mode picks up the +15 registrant bonus; quick mode skips the
    // lookup entirely, along with the economic snapshot.
    assert_eq!(full.trusts[0].verification.confidence_score, 85);
    assert_eq!(quick.trusts[0].verification.confidence_score, 70);
    assert!(quick.summary.economic.is_none());
}

#[tokio::test]
async fn timed_out_adapter_is_skipped_not_fatal() {
    let sources = stub_sources(
        StubFilingSource {
            hits: vec![santander_filing_hit()],
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        },
        StubIdentifierSource::default(),
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource::default(),
    );

    let report = deterministic_investigator(sources)
        .with_options(
            InvestigatorOptions::new().with_call_timeout(Duration::from_millis(20)),
        )
        .investigate(&santander_profile())
        .await
        .unwrap();

    // Filing search timed out everywhere, so the catalog fallback carried
    // the run.
    assert!(report
        .summary
        .sources_failed
        .contains(&"stub-filing".to_string()));
    assert!(report
        .trusts
        .iter()
        .all(|c| c.verification.data_sources == vec!["catalog".to_string()]));
}

#[tokio::test]
async fn pre_cancelled_run_returns_partial_report() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let sources = stub_sources(
        StubFilingSource {
            hits: vec![santander_filing_hit()],
            ..Default::default()
        },
        StubIdentifierSource::default(),
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource::default(),
    );

    let report = deterministic_investigator(sources)
        .with_options(InvestigatorOptions::new().with_cancel(cancel))
        .investigate(&santander_profile())
        .await
        .unwrap();

    assert!(report.summary.cancelled);
    assert!(report.trusts.is_empty());
}

#[tokio::test]
async fn invalid_state_surfaces_as_error() {
    let profile = santander_profile().with_state("Texas");
    let result = deterministic_investigator(all_failing_sources())
        .investigate(&profile)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn report_caps_candidates_at_max_results() {
    let hits: Vec<_> = (0..15)
        .map(|i| {
            let mut hit = santander_filing_hit();
            hit.entity_name = format!("Shelf Trust Series {:02}", i);
            hit.extracted_identifiers = vec![];
            hit
        })
        .collect();

    let sources = stub_sources(
        StubFilingSource {
            hits,
            ..Default::default()
        },
        StubIdentifierSource::default(),
        StubComplaintSource::default(),
        StubEconomicSource::default(),
        StubTradeSource::default(),
    );

    let report = deterministic_investigator(sources)
        .investigate(&santander_profile())
        .await
        .unwrap();

    assert_eq!(report.trusts.len(), 10);
    assert_eq!(report.summary.candidates_considered, 15);
}
