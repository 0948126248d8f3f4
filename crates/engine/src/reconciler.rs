// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The reconciliation orchestrator.

use chrono::Utc;
use meridian_core::datetime::previous_day_window;
use meridian_model::{
    ReconciliationResult, ReconciliationStatus, ReconciliationWindow,
    records::{LedgerRecord, sum_minor},
    result::SyncOutcome,
};
use tracing::{error, info, warn};

use crate::{
    discrepancy::{amount_mismatches, missing_records},
    recommendations::generate_recommendations,
    traits::{AlertChannel, LedgerSource, ProcessorSource, ReportStore},
};

/// One side's fetched ledger for a window.
#[derive(Debug, Default)]
struct FetchedLedger {
    payments: Vec<LedgerRecord>,
    refunds: Vec<LedgerRecord>,
}

impl FetchedLedger {
    /// Net total: payments minus refunds, in minor units.
    fn net_total_minor(&self) -> i64 {
        sum_minor(&self.payments) - sum_minor(&self.refunds)
    }
}

/// Drives a reconciliation run: fetch both ledgers, compute discrepancies, classify,
/// persist the report, and alert on discrepancies.
///
/// Fetch failure is fatal to the run and nothing is persisted; report and alert
/// failures are logged and swallowed since the result has already been computed.
#[derive(Debug)]
pub struct Reconciler<P, L, R, A>
where
    P: ProcessorSource,
    L: LedgerSource,
    R: ReportStore,
    A: AlertChannel,
{
    processor: P,
    ledger: L,
    reports: R,
    alerts: A,
}

impl<P, L, R, A> Reconciler<P, L, R, A>
where
    P: ProcessorSource,
    L: LedgerSource,
    R: ReportStore,
    A: AlertChannel,
{
    /// Creates a new [`Reconciler`] instance.
    pub const fn new(processor: P, ledger: L, reports: R, alerts: A) -> Self {
        Self {
            processor,
            ledger,
            reports,
            alerts,
        }
    }

    /// Runs a full reconciliation for the given window.
    ///
    /// # Errors
    ///
    /// Returns an error if either ledger fetch fails; no partial reconciliation is
    /// attempted and nothing is persisted.
    pub async fn reconcile(
        &self,
        window: ReconciliationWindow,
    ) -> anyhow::Result<ReconciliationResult> {
        info!(
            start = %window.start,
            end = %window.end,
            include_refunds = window.include_refunds,
            "Starting reconciliation",
        );

        let (external, internal) = tokio::try_join!(
            self.fetch_external(&window),
            self.fetch_internal(&window),
        )?;

        let external_total = external.net_total_minor();
        let internal_total = internal.net_total_minor();

        let missing_on_internal = missing_records(&external.payments, &internal.payments);
        let missing_on_external = missing_records(&internal.payments, &external.payments);
        let mismatches = amount_mismatches(&external.payments, &internal.payments);

        let discrepancy = (external_total - internal_total).abs();
        let discrepancy_fraction = if external_total > 0 {
            discrepancy as f64 / external_total as f64
        } else {
            0.0
        };

        let status = if discrepancy_fraction <= window.tolerance_fraction {
            ReconciliationStatus::Success
        } else {
            ReconciliationStatus::DiscrepancyFound
        };

        let recommendations = generate_recommendations(
            &missing_on_internal,
            &missing_on_external,
            &mismatches,
            discrepancy_fraction,
        );

        let result = ReconciliationResult {
            run_timestamp: Utc::now(),
            external_total_minor: external_total,
            internal_total_minor: internal_total,
            discrepancy_minor: discrepancy,
            discrepancy_fraction,
            missing_on_internal,
            missing_on_external,
            amount_mismatches: mismatches,
            status,
            recommendations,
        };

        info!(
            status = %result.status,
            discrepancy = %result.discrepancy_major(),
            fraction = result.discrepancy_fraction,
            "Reconciliation completed",
        );

        // The result is already computed and returned to the caller; sink failures
        // must not invalidate it.
        if let Err(e) = self.reports.store(&result).await {
            error!("Failed to store reconciliation report: {e:?}");
        }

        if result.status == ReconciliationStatus::DiscrepancyFound {
            warn!(
                discrepancy = %result.discrepancy_major(),
                fraction = result.discrepancy_fraction,
                missing_on_internal = result.missing_on_internal.len(),
                missing_on_external = result.missing_on_external.len(),
                amount_mismatches = result.amount_mismatches.len(),
                severity = %result.severity(),
                "Billing discrepancy detected",
            );
            if let Err(e) = self.alerts.send_discrepancy_alert(&result).await {
                error!("Failed to send discrepancy alert: {e:?}");
            }
        }

        Ok(result)
    }

    /// Runs reconciliation for yesterday's UTC calendar day (midnight to midnight)
    /// with default tolerance, refunds included.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying [`Self::reconcile`] call fails.
    pub async fn run_daily(&self) -> anyhow::Result<ReconciliationResult> {
        let (start, end) = previous_day_window(Utc::now());
        let window = ReconciliationWindow::new(start, end)?;
        self.reconcile(window).await
    }

    /// Replays missing payments from the processor into the internal ledger.
    ///
    /// Best-effort operator remediation: per-id failures are collected and reported
    /// rather than aborting the batch. Records which are not settled on the processor
    /// are skipped without being counted as failures.
    pub async fn sync_missing_payments(&self, external_ids: &[String]) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        for id in external_ids {
            match self.processor.retrieve_payment(id).await {
                Ok(payment) if payment.settled => {
                    match self.ledger.insert_payment(&payment).await {
                        Ok(()) => outcome.synced += 1,
                        Err(e) => {
                            error!("Failed to sync payment {id}: {e:?}");
                            outcome.failed.push(id.clone());
                        }
                    }
                }
                Ok(_) => {
                    warn!("Skipping unsettled payment {id}");
                }
                Err(e) => {
                    error!("Failed to retrieve payment {id}: {e:?}");
                    outcome.failed.push(id.clone());
                }
            }
        }

        outcome
    }

    async fn fetch_external(&self, window: &ReconciliationWindow) -> anyhow::Result<FetchedLedger> {
        let payments = self.processor.fetch_settled_payments(window).await?;
        let refunds = if window.include_refunds {
            self.processor.fetch_settled_refunds(window).await?
        } else {
            Vec::new()
        };
        Ok(FetchedLedger { payments, refunds })
    }

    async fn fetch_internal(&self, window: &ReconciliationWindow) -> anyhow::Result<FetchedLedger> {
        let payments = self.ledger.fetch_settled_payments(window).await?;
        let refunds = if window.include_refunds {
            self.ledger.fetch_settled_refunds(window).await?
        } else {
            Vec::new()
        };
        Ok(FetchedLedger { payments, refunds })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
