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

//! Row models bridging PostgreSQL rows and domain records.

use chrono::{DateTime, Utc};
use meridian_model::records::LedgerRecord;
use sqlx::{FromRow, Row, postgres::PgRow};
use tracing::warn;

/// One settled movement row as stored internally.
///
/// The external reference is nullable: rows committed before the processor
/// callback landed have none and cannot participate in reconciliation.
#[derive(Debug)]
pub struct MovementRow {
    pub external_ref: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub occurred_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for MovementRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let external_ref = row.try_get::<Option<String>, _>("external_ref")?;
        let amount_minor = row.try_get::<i64, _>("amount_minor")?;
        let currency = row.try_get::<String, _>("currency")?;
        let occurred_at = row.try_get::<DateTime<Utc>, _>("occurred_at")?;
        Ok(Self {
            external_ref,
            amount_minor,
            currency,
            occurred_at,
        })
    }
}

/// Converts rows into ledger records, dropping rows without an external reference.
///
/// Dropped rows are counted and logged: they are invisible to the join and will
/// surface indirectly through the aggregate totals instead.
#[must_use]
pub fn rows_to_records(rows: Vec<MovementRow>, table: &str) -> Vec<LedgerRecord> {
    let total = rows.len();
    let records: Vec<LedgerRecord> = rows
        .into_iter()
        .filter_map(|row| {
            row.external_ref.map(|external_ref| {
                LedgerRecord::new(external_ref, row.amount_minor, row.currency, row.occurred_at)
            })
        })
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        warn!("Skipped {skipped} {table} rows without an external reference");
    }
    records
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(external_ref: Option<&str>, amount: i64) -> MovementRow {
        MovementRow {
            external_ref: external_ref.map(str::to_string),
            amount_minor: amount,
            currency: "usd".to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[rstest]
    fn test_rows_without_reference_are_dropped() {
        let rows = vec![row(Some("pi_1"), 100), row(None, 200), row(Some("pi_2"), 300)];
        let records = rows_to_records(rows, "payment");

        let ids: Vec<&str> = records.iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(ids, vec!["pi_1", "pi_2"]);
    }

    #[rstest]
    fn test_order_is_preserved() {
        let rows = vec![row(Some("pi_c"), 1), row(Some("pi_a"), 2)];
        let records = rows_to_records(rows, "payment");
        assert_eq!(records[0].external_id, "pi_c");
        assert_eq!(records[1].external_id, "pi_a");
    }
}
