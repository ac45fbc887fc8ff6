//! Multi-source investigation orchestrator
//!
//! Fans out concurrent adapter calls step by step, funnels their partial
//! results through a message channel into the candidate table, and falls
//! back to the offline catalog when the sources yield nothing. Every
//! adapter call carries a timeout and any failure is a non-fatal empty
//! contribution; only profile validation surfaces as an error.

mod merge;
pub mod options;

use std::sync::Arc;
use std::time::Instant;

use futures::future;
use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::catalog::CandidateGenerator;
use crate::error::InvestigationResult;
use crate::model::{
    DebtProfile, EconomicSnapshot, InvestigationReport, MarketCondition, RunSummary,
    ServicerRiskProfile, VerifiedCandidate,
};
use crate::query::build_queries;
use crate::sources::traits::Sources;
use merge::{CandidateTable, SourceUpdate};
use options::InvestigatorOptions;
use rust_decimal::Decimal;

const CHANNEL_CAPACITY: usize = 32;
const DELINQUENCY_TREND_PERIODS: usize = 12;

/// Top-level entry point: one instance per source bundle, reusable across
/// investigation calls.
pub struct Investigator {
    sources: Sources,
    generator: CandidateGenerator,
    options: InvestigatorOptions,
}

impl Investigator {
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            generator: CandidateGenerator::new(),
            options: InvestigatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InvestigatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the offline generator (tests use a seeded one)
    pub fn with_generator(mut self, generator: CandidateGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Run one investigation against the configured sources.
    ///
    /// Returns `Err` only for an invalid profile. A run where every source
    /// failed and the offline fallback found nothing still returns a valid
    /// empty report carrying a "not found" recommendation.
    pub async fn investigate(
        &self,
        profile: &DebtProfile,
    ) -> InvestigationResult<InvestigationReport> {
        profile.validate()?;

        let started = Instant::now();
        let cancel = self.options.cancel.clone();

        let mut queries = build_queries(profile);
        queries.truncate(self.options.query_cap());
        tracing::info!(
            debt_type = %profile.debt_type,
            queries = queries.len(),
            quick = self.options.quick,
            "Starting investigation"
        );

        let mut table = CandidateTable::new(profile.debt_type);
        let mut queried: Vec<&'static str> = Vec::new();

        // Step 2: filing search per query
        if !cancel.is_cancelled() {
            note_queried(&mut queried, self.sources.filings.source_id());
            self.filing_fan_out(&queries, &mut table, &cancel).await;
        }

        // Step 3: secondary registrant lookups (skipped in quick mode)
        if !self.options.quick && !cancel.is_cancelled() {
            let targets = table.registrant_lookup_targets();
            if !targets.is_empty() {
                self.registrant_fan_out(targets, &mut table, &cancel).await;
            }
        }

        // Step 4: identifier search over the same base queries
        if !cancel.is_cancelled() {
            note_queried(&mut queried, self.sources.identifiers.source_id());
            self.identifier_fan_out(&queries, &mut table, &cancel).await;
        }

        // Step 5: complaint check, once per distinct servicer
        let mut servicer_risk: Vec<ServicerRiskProfile> = Vec::new();
        if !cancel.is_cancelled() {
            if let Some(servicer) = profile.servicer_name.as_deref() {
                note_queried(&mut queried, self.sources.complaints.source_id());
                self.complaint_check(servicer, &mut table, &mut servicer_risk)
                    .await;
            }
        }

        // Step 6: economic snapshot and delinquency trend (skipped in
        // quick mode)
        let mut economic: Option<EconomicSnapshot> = None;
        let mut trend: Vec<Decimal> = Vec::new();
        if !self.options.quick && !cancel.is_cancelled() {
            note_queried(&mut queried, self.sources.economic.source_id());
            self.economic_check(profile, &mut table, &mut economic, &mut trend)
                .await;
        }

        // Step 7: trade probes for the current top candidates
        if !cancel.is_cancelled() {
            let targets = table.trade_probe_targets(self.options.max_trade_probes);
            if !targets.is_empty() {
                note_queried(&mut queried, self.sources.trades.source_id());
                self.trade_fan_out(targets, &mut table, &cancel).await;
            }
        }

        // Offline fallback when the sources produced nothing. A cancelled
        // run returns whatever accumulated instead of synthesizing more.
        if table.is_empty() && !cancel.is_cancelled() {
            tracing::info!("No source-derived candidates, falling back to offline catalog");
            let candidates = self.generator.find_candidates(
                profile.debt_type.as_key(),
                profile,
                self.options.max_results,
            )?;
            if !candidates.is_empty() {
                note_queried(&mut queried, "catalog");
            }
            table.absorb_offline(candidates);
        }

        // Step 8: rank and assemble the report
        Ok(self.finalize(profile, table, queried, servicer_risk, economic, trend, started))
    }

    async fn filing_fan_out(
        &self,
        queries: &[String],
        table: &mut CandidateTable,
        cancel: &CancellationToken,
    ) {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        for query in queries.iter().cloned() {
            let source = Arc::clone(&self.sources.filings);
            let tx = tx.clone();
            let timeout = self.options.call_timeout;
            tokio::spawn(async move {
                let update = match time::timeout(timeout, source.search_filings(&query, None)).await
                {
                    Ok(Ok(hits)) => SourceUpdate::FilingHits { hits },
                    Ok(Err(error)) => SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("search '{}': {:#}", query, error),
                    },
                    Err(_) => SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("search '{}' timed out", query),
                    },
                };
                let _ = tx.send(update).await;
            });
        }
        drop(tx);
        drain(&mut rx, table, cancel).await;
    }

    async fn identifier_fan_out(
        &self,
        queries: &[String],
        table: &mut CandidateTable,
        cancel: &CancellationToken,
    ) {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        for query in queries.iter().cloned() {
            let source = Arc::clone(&self.sources.identifiers);
            let tx = tx.clone();
            let timeout = self.options.call_timeout;
            tokio::spawn(async move {
                let update = match time::timeout(timeout, source.search(&query)).await {
                    Ok(Ok(mut hits)) => {
                        // A hit without a display name cannot seed a
                        // candidate; try resolving it through the lookup
                        // endpoint before merging.
                        for hit in hits.iter_mut() {
                            if !hit.name.trim().is_empty() {
                                continue;
                            }
                            if let Ok(Ok(Some(resolved))) =
                                time::timeout(timeout, source.lookup(&hit.identifier)).await
                            {
                                if !resolved.name.trim().is_empty() {
                                    hit.name = resolved.name;
                                    hit.security_type =
                                        hit.security_type.take().or(resolved.security_type);
                                }
                            }
                        }
                        SourceUpdate::IdentifierHits { hits }
                    }
                    Ok(Err(error)) => SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("search '{}': {:#}", query, error),
                    },
                    Err(_) => SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("search '{}' timed out", query),
                    },
                };
                let _ = tx.send(update).await;
            });
        }
        drop(tx);
        drain(&mut rx, table, cancel).await;
    }

    async fn registrant_fan_out(
        &self,
        targets: Vec<(String, String)>,
        table: &mut CandidateTable,
        cancel: &CancellationToken,
    ) {
        let futures = targets.into_iter().map(|(candidate_key, registry_id)| {
            let source = Arc::clone(&self.sources.filings);
            let timeout = self.options.call_timeout;
            async move {
                match time::timeout(timeout, source.lookup_registrant(&registry_id)).await {
                    Ok(Ok(Some(details))) => Some(SourceUpdate::RegistrantVerified {
                        candidate_key,
                        details,
                    }),
                    Ok(Ok(None)) => None,
                    Ok(Err(error)) => Some(SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("registrant {}: {:#}", registry_id, error),
                    }),
                    Err(_) => Some(SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("registrant {} timed out", registry_id),
                    }),
                }
            }
        });

        tokio::select! {
            _ = cancel.cancelled() => {}
            updates = future::join_all(futures) => {
                for update in updates.into_iter().flatten() {
                    table.merge(update);
                }
            }
        }
    }

    async fn trade_fan_out(
        &self,
        targets: Vec<(String, String)>,
        table: &mut CandidateTable,
        cancel: &CancellationToken,
    ) {
        let futures = targets.into_iter().map(|(candidate_key, identifier)| {
            let source = Arc::clone(&self.sources.trades);
            let timeout = self.options.call_timeout;
            async move {
                match time::timeout(timeout, source.search_trades(&identifier, None)).await {
                    Ok(Ok(trades)) => Some(SourceUpdate::TradeActivity {
                        candidate_key,
                        trade_count: trades.len(),
                    }),
                    Ok(Err(error)) => Some(SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("trades {}: {:#}", identifier, error),
                    }),
                    Err(_) => Some(SourceUpdate::SourceFailure {
                        source: source.source_id(),
                        detail: format!("trades {} timed out", identifier),
                    }),
                }
            }
        });

        tokio::select! {
            _ = cancel.cancelled() => {}
            updates = future::join_all(futures) => {
                for update in updates.into_iter().flatten() {
                    table.merge(update);
                }
            }
        }
    }

    async fn complaint_check(
        &self,
        servicer: &str,
        table: &mut CandidateTable,
        servicer_risk: &mut Vec<ServicerRiskProfile>,
    ) {
        let source = &self.sources.complaints;
        match time::timeout(self.options.call_timeout, source.company_risk(servicer)).await {
            Ok(Ok(risk)) => {
                table.mark_complaints_checked();
                servicer_risk.push(risk);
            }
            Ok(Err(error)) => table.merge(SourceUpdate::SourceFailure {
                source: source.source_id(),
                detail: format!("complaints '{}': {:#}", servicer, error),
            }),
            Err(_) => table.merge(SourceUpdate::SourceFailure {
                source: source.source_id(),
                detail: format!("complaints '{}' timed out", servicer),
            }),
        }
    }

    async fn economic_check(
        &self,
        profile: &DebtProfile,
        table: &mut CandidateTable,
        economic: &mut Option<EconomicSnapshot>,
        trend: &mut Vec<Decimal>,
    ) {
        let source = &self.sources.economic;
        let timeout = self.options.call_timeout;

        let (snapshot_result, trend_result) = tokio::join!(
            time::timeout(timeout, source.snapshot()),
            time::timeout(
                timeout,
                source.delinquency_trend(profile.debt_type, DELINQUENCY_TREND_PERIODS)
            ),
        );

        match snapshot_result {
            Ok(Ok(snapshot)) => *economic = Some(snapshot),
            Ok(Err(error)) => table.merge(SourceUpdate::SourceFailure {
                source: source.source_id(),
                detail: format!("snapshot: {:#}", error),
            }),
            Err(_) => table.merge(SourceUpdate::SourceFailure {
                source: source.source_id(),
                detail: "snapshot timed out".to_string(),
            }),
        }
        match trend_result {
            Ok(Ok(values)) => *trend = values,
            Ok(Err(error)) => table.merge(SourceUpdate::SourceFailure {
                source: source.source_id(),
                detail: format!("delinquency trend: {:#}", error),
            }),
            Err(_) => table.merge(SourceUpdate::SourceFailure {
                source: source.source_id(),
                detail: "delinquency trend timed out".to_string(),
            }),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn finalize(
        &self,
        profile: &DebtProfile,
        table: CandidateTable,
        queried: Vec<&'static str>,
        servicer_risk: Vec<ServicerRiskProfile>,
        economic: Option<EconomicSnapshot>,
        trend: Vec<Decimal>,
        started: Instant,
    ) -> InvestigationReport {
        let cancelled = self.options.cancel.is_cancelled();
        let sources_failed: Vec<String> = table
            .failed_sources()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let candidates_considered = table.len();

        let trusts: Vec<VerifiedCandidate> = table
            .finalize()
            .into_iter()
            .take(self.options.max_results)
            .map(|entry| VerifiedCandidate {
                trust: entry.trust,
                verification: entry.verification,
            })
            .collect();

        let mut recommendations = Vec::new();
        for risk in &servicer_risk {
            if risk.risk_score > 50 {
                recommendations.push(format!(
                    "Servicer {} shows elevated complaint volume ({} in the trailing year); \
                     request a complete account history and chain of assignment",
                    risk.servicer, risk.recent_complaints
                ));
            }
        }
        if let Some(ref snapshot) = economic {
            if snapshot.market_condition == MarketCondition::Stressed {
                recommendations.push(format!(
                    "Market conditions are stressed for {} collateral; trustee remittance \
                     reporting may lag",
                    profile.debt_type
                ));
            }
        }
        if trusts.is_empty() {
            recommendations.push(
                "No securitization evidence found. The debt may not be securitized, or is held \
                 privately."
                    .to_string(),
            );
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            candidates = trusts.len(),
            considered = candidates_considered,
            elapsed_ms,
            cancelled,
            "Investigation complete"
        );

        InvestigationReport {
            trusts,
            summary: RunSummary {
                candidates_considered,
                sources_queried: queried.iter().map(|s| s.to_string()).collect(),
                sources_failed,
                elapsed_ms,
                economic,
                delinquency_trend: trend,
                cancelled,
            },
            servicer_risk,
            recommendations,
        }
    }
}

async fn drain(
    rx: &mut mpsc::Receiver<SourceUpdate>,
    table: &mut CandidateTable,
    cancel: &CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            update = rx.recv() => match update {
                Some(update) => table.merge(update),
                None => break,
            },
        }
    }
}

fn note_queried(queried: &mut Vec<&'static str>, source: &'static str) {
    if !queried.contains(&source) {
        queried.push(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_queried_dedups() {
        let mut queried = Vec::new();
        note_queried(&mut queried, "edgar");
        note_queried(&mut queried, "edgar");
        note_queried(&mut queried, "openfigi");
        assert_eq!(queried, vec!["edgar", "openfigi"]);
    }
}
