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

use meridian_alert::DiscrepancyAlerter;
use meridian_engine::Reconciler;
use meridian_infrastructure::sql::ledger::PostgresLedger;
use meridian_model::{ReconciliationResult, ReconciliationWindow};
use meridian_stripe::http::client::StripeHttpClient;
use tracing::info;

use crate::{
    database::postgres::connect_options,
    opt::{DatabaseConfig, ReconcileCommand, ReconcileOpt},
};

type CliReconciler = Reconciler<StripeHttpClient, PostgresLedger, PostgresLedger, DiscrepancyAlerter>;

/// Builds the full reconciliation stack: Stripe client and alert channels from
/// the environment, Postgres from the given config with env fallbacks.
pub async fn build_reconciler(database: DatabaseConfig) -> anyhow::Result<CliReconciler> {
    let processor = StripeHttpClient::from_env()?;
    let ledger = PostgresLedger::connect(connect_options(database)).await?;
    let alerts = DiscrepancyAlerter::from_env();
    Ok(Reconciler::new(processor, ledger.clone(), ledger, alerts))
}

fn log_result(result: &ReconciliationResult) {
    info!(
        "Reconciliation {}: processor total ${}, ledger total ${}, discrepancy ${} ({:.2}%)",
        result.status,
        result.external_total_major(),
        result.internal_total_major(),
        result.discrepancy_major(),
        result.discrepancy_percentage(),
    );
    for recommendation in &result.recommendations {
        info!("Recommendation: {recommendation}");
    }
}

pub async fn run_reconcile_command(opt: ReconcileOpt) -> anyhow::Result<()> {
    match opt.command {
        ReconcileCommand::Run {
            start,
            end,
            tolerance,
            no_refunds,
            database,
        } => {
            let mut window = ReconciliationWindow::new(start, end)?;
            if let Some(tolerance) = tolerance {
                window = window.with_tolerance(tolerance)?;
            }
            window = window.with_refunds(!no_refunds);

            let reconciler = build_reconciler(database).await?;
            let result = reconciler.reconcile(window).await?;
            log_result(&result);
        }
        ReconcileCommand::Daily { database } => {
            let reconciler = build_reconciler(database).await?;
            let result = reconciler.run_daily().await?;
            log_result(&result);
        }
    }
    Ok(())
}

pub async fn run_sync_command(ids: Vec<String>, database: DatabaseConfig) -> anyhow::Result<()> {
    let reconciler = build_reconciler(database).await?;
    let outcome = reconciler.sync_missing_payments(&ids).await;

    info!(
        "Sync completed: {} synced, {} failed",
        outcome.synced,
        outcome.failed.len(),
    );
    if !outcome.failed.is_empty() {
        anyhow::bail!("Failed to sync payments: {}", outcome.failed.join(", "));
    }
    Ok(())
}
