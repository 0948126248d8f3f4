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

//! Runtime SQL queries against the internal ledger and report tables.

use meridian_model::{
    ReconciliationResult, ReconciliationWindow,
    records::{LedgerRecord, ProcessorPaymentRecord},
};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{MovementRow, rows_to_records};

/// Status value marking a movement as settled.
const STATUS_SETTLED: &str = "settled";

#[derive(Debug)]
pub struct DatabaseQueries;

impl DatabaseQueries {
    /// Loads settled payments within the window, skipping rows without an
    /// external reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_settled_payments(
        pool: &PgPool,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>> {
        sqlx::query_as::<_, MovementRow>(
            "SELECT external_ref, amount_minor, currency, occurred_at FROM payment \
             WHERE status = $1 AND occurred_at >= $2 AND occurred_at <= $3 \
             ORDER BY occurred_at, external_ref",
        )
        .bind(STATUS_SETTLED)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
        .map(|rows| rows_to_records(rows, "payment"))
        .map_err(|e| anyhow::anyhow!("Failed to load settled payments: {e}"))
    }

    /// Loads settled refunds within the window, skipping rows without an
    /// external reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_settled_refunds(
        pool: &PgPool,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>> {
        sqlx::query_as::<_, MovementRow>(
            "SELECT external_ref, amount_minor, currency, occurred_at FROM refund \
             WHERE status = $1 AND occurred_at >= $2 AND occurred_at <= $3 \
             ORDER BY occurred_at, external_ref",
        )
        .bind(STATUS_SETTLED)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
        .map(|rows| rows_to_records(rows, "refund"))
        .map_err(|e| anyhow::anyhow!("Failed to load settled refunds: {e}"))
    }

    /// Replays an authoritative processor payment into the payment table.
    ///
    /// Inserting the same external reference twice is a no-op, so replays are
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn add_payment(
        pool: &PgPool,
        payment: &ProcessorPaymentRecord,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO payment (id, external_ref, amount_minor, currency, status, owner_id, occurred_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (external_ref) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(payment.external_id.as_str())
        .bind(payment.amount_minor)
        .bind(payment.currency.as_str())
        .bind(STATUS_SETTLED)
        .bind(payment.owner_id.as_deref())
        .bind(payment.occurred_at)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Failed to insert into payment table: {e}"))
    }

    /// Appends a reconciliation report row. Reports are never updated or deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn add_report(pool: &PgPool, result: &ReconciliationResult) -> anyhow::Result<()> {
        let details = serde_json::json!({
            "missing_on_internal": result.missing_on_internal,
            "missing_on_external": result.missing_on_external,
            "amount_mismatches": result.amount_mismatches,
            "recommendations": result.recommendations,
        });

        sqlx::query(
            "INSERT INTO reconciliation_report \
             (id, run_timestamp, external_total, internal_total, discrepancy, discrepancy_fraction, status, details) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(Uuid::new_v4())
        .bind(result.run_timestamp)
        .bind(result.external_total_major())
        .bind(result.internal_total_major())
        .bind(result.discrepancy_major())
        .bind(result.discrepancy_fraction)
        .bind(result.status.to_string())
        .bind(details)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Failed to insert into reconciliation_report table: {e}"))
    }
}
