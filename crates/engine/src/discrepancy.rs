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

//! Pure, stateless discrepancy functions over two id-indexed ledger collections.
//!
//! Output ordering is stable (source order of the first collection) so reports stay
//! diffable across runs and tests are reproducible.

use ahash::{AHashMap, AHashSet};
use meridian_model::records::{AmountMismatch, LedgerRecord};

/// Returns the ids of records present in `source` but absent from `target`,
/// in `source` order.
#[must_use]
pub fn missing_records(source: &[LedgerRecord], target: &[LedgerRecord]) -> Vec<String> {
    let target_ids: AHashSet<&str> = target.iter().map(|r| r.external_id.as_str()).collect();
    source
        .iter()
        .filter(|r| !target_ids.contains(r.external_id.as_str()))
        .map(|r| r.external_id.clone())
        .collect()
}

/// Returns per-record amount disagreements for every id present in both collections,
/// in `external` order.
///
/// Comparison is exact: a one-cent difference is emitted. Tolerance applies only to
/// the aggregate discrepancy fraction, never to individual records.
#[must_use]
pub fn amount_mismatches(
    external: &[LedgerRecord],
    internal: &[LedgerRecord],
) -> Vec<AmountMismatch> {
    let internal_amounts: AHashMap<&str, i64> = internal
        .iter()
        .map(|r| (r.external_id.as_str(), r.amount_minor))
        .collect();

    external
        .iter()
        .filter_map(|r| {
            internal_amounts
                .get(r.external_id.as_str())
                .filter(|&&internal_amount| internal_amount != r.amount_minor)
                .map(|&internal_amount| {
                    AmountMismatch::new(r.external_id.clone(), r.amount_minor, internal_amount)
                })
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
