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

//! Property-based tests for the discrepancy engine.
//!
//! These verify invariants that must hold for arbitrary ledger contents:
//! - A record is never simultaneously matched and missing.
//! - Mismatch deltas always equal the external minus the internal amount.
//! - Output ordering is stable and deterministic across repeated runs.

use chrono::{TimeZone, Utc};
use meridian_engine::discrepancy::{amount_mismatches, missing_records};
use meridian_model::records::LedgerRecord;
use proptest::prelude::*;
use rstest::rstest;

fn record(id: u16, amount: i64) -> LedgerRecord {
    LedgerRecord::new(
        format!("pi_{id}"),
        amount,
        "usd".to_string(),
        Utc.with_ymd_and_hms(2025, 3, 13, 0, 0, 0).unwrap(),
    )
}

/// Generate a ledger with unique ids drawn from a small space so that overlap
/// between the two sides is common.
fn ledger_strategy() -> impl Strategy<Value = Vec<LedgerRecord>> {
    prop::collection::btree_map(0u16..50, 1i64..100_000, 0..30)
        .prop_map(|map| map.into_iter().map(|(id, amt)| record(id, amt)).collect())
}

proptest! {
    /// Property: every id reported missing is in the source and not in the target.
    #[rstest]
    fn missing_is_source_minus_target(
        source in ledger_strategy(),
        target in ledger_strategy(),
    ) {
        let missing = missing_records(&source, &target);
        let target_ids: Vec<&str> = target.iter().map(|r| r.external_id.as_str()).collect();

        for id in &missing {
            prop_assert!(source.iter().any(|r| &r.external_id == id));
            prop_assert!(!target_ids.contains(&id.as_str()));
        }

        // Every source id absent from the target is reported.
        let reported: Vec<&str> = missing.iter().map(String::as_str).collect();
        for r in &source {
            if !target_ids.contains(&r.external_id.as_str()) {
                prop_assert!(reported.contains(&r.external_id.as_str()));
            }
        }
    }

    /// Property: mismatches cover exactly the shared ids with differing amounts,
    /// with sign-preserving deltas.
    #[rstest]
    fn mismatch_deltas_are_exact(
        external in ledger_strategy(),
        internal in ledger_strategy(),
    ) {
        let mismatches = amount_mismatches(&external, &internal);

        for m in &mismatches {
            let ext = external
                .iter()
                .find(|r| r.external_id == m.external_id)
                .expect("mismatch id must exist externally");
            let int = internal
                .iter()
                .find(|r| r.external_id == m.external_id)
                .expect("mismatch id must exist internally");
            prop_assert_eq!(m.external_amount, ext.amount_minor);
            prop_assert_eq!(m.internal_amount, int.amount_minor);
            prop_assert_eq!(m.delta, ext.amount_minor - int.amount_minor);
            prop_assert_ne!(m.delta, 0);
        }

        // Shared ids with equal amounts never appear.
        for ext in &external {
            if let Some(int) = internal.iter().find(|r| r.external_id == ext.external_id)
                && int.amount_minor == ext.amount_minor
            {
                prop_assert!(!mismatches.iter().any(|m| m.external_id == ext.external_id));
            }
        }
    }

    /// Property: both functions are deterministic with stable ordering.
    #[rstest]
    fn outputs_are_deterministic(
        external in ledger_strategy(),
        internal in ledger_strategy(),
    ) {
        prop_assert_eq!(
            missing_records(&external, &internal),
            missing_records(&external, &internal)
        );
        prop_assert_eq!(
            amount_mismatches(&external, &internal),
            amount_mismatches(&external, &internal)
        );
    }

    /// Property: a ledger reconciled against itself is clean.
    #[rstest]
    fn self_reconciliation_is_clean(ledger in ledger_strategy()) {
        prop_assert!(missing_records(&ledger, &ledger).is_empty());
        prop_assert!(amount_mismatches(&ledger, &ledger).is_empty());
    }
}
