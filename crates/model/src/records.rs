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

//! Ledger record types produced by the fetch boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::consts::MINOR_UNITS_PER_MAJOR;

/// One committed monetary movement (payment or refund) as known to one side of the
/// reconciliation, keyed by the processor-assigned identifier.
///
/// Records are immutable once fetched and exist only for the duration of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// The processor-assigned identifier used to join the two ledgers.
    pub external_id: String,
    /// The amount in integer minor units (cents).
    pub amount_minor: i64,
    /// The ISO currency code (lowercase, as reported by the processor).
    pub currency: String,
    /// When the movement settled.
    pub occurred_at: DateTime<Utc>,
}

impl LedgerRecord {
    /// Creates a new [`LedgerRecord`] instance.
    #[must_use]
    pub const fn new(
        external_id: String,
        amount_minor: i64,
        currency: String,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id,
            amount_minor,
            currency,
            occurred_at,
        }
    }
}

/// An authoritative settled payment retrieved directly from the processor,
/// carrying the fields needed to replay it into the internal ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorPaymentRecord {
    /// The processor-assigned payment identifier.
    pub external_id: String,
    /// The amount in integer minor units (cents).
    pub amount_minor: i64,
    /// The ISO currency code.
    pub currency: String,
    /// Whether the processor-side status is terminal-success.
    pub settled: bool,
    /// When the payment was created on the processor.
    pub occurred_at: DateTime<Utc>,
    /// The owning account carried in processor metadata, when present.
    pub owner_id: Option<String>,
}

/// A per-record amount disagreement between the two ledgers for a shared identifier.
///
/// Per-record comparison is exact: tolerance applies only to the aggregate
/// discrepancy fraction, never to individual records, so a single miscoded
/// amount is always surfaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMismatch {
    /// The shared identifier present on both sides.
    pub external_id: String,
    /// The amount recorded by the external processor, in minor units.
    pub external_amount: i64,
    /// The amount recorded by the internal ledger, in minor units.
    pub internal_amount: i64,
    /// `external_amount - internal_amount` (sign-preserving).
    pub delta: i64,
}

impl AmountMismatch {
    /// Creates a new [`AmountMismatch`] with the delta computed from the two amounts.
    #[must_use]
    pub fn new(external_id: String, external_amount: i64, internal_amount: i64) -> Self {
        Self {
            external_id,
            external_amount,
            internal_amount,
            delta: external_amount - internal_amount,
        }
    }
}

/// Converts an amount in integer minor units to major units as an exact decimal.
#[must_use]
pub fn minor_to_major(amount_minor: i64) -> Decimal {
    Decimal::new(amount_minor, 2)
}

/// Sums the minor-unit amounts of the given records.
#[must_use]
pub fn sum_minor(records: &[LedgerRecord]) -> i64 {
    records.iter().map(|r| r.amount_minor).sum()
}

// Two-decimal currencies only; scale of 2 in `minor_to_major` depends on this.
const _: () = assert!(MINOR_UNITS_PER_MAJOR == 100);

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn record(id: &str, amount: i64) -> LedgerRecord {
        LedgerRecord::new(id.to_string(), amount, "usd".to_string(), Utc::now())
    }

    #[rstest]
    fn test_mismatch_delta_sign_preserving() {
        let m = AmountMismatch::new("pi_1".to_string(), 5000, 5500);
        assert_eq!(m.delta, -500);

        let m = AmountMismatch::new("pi_2".to_string(), 5500, 5000);
        assert_eq!(m.delta, 500);
    }

    #[rstest]
    #[case(0, dec!(0.00))]
    #[case(500, dec!(5.00))]
    #[case(-1234, dec!(-12.34))]
    #[case(99, dec!(0.99))]
    fn test_minor_to_major(#[case] minor: i64, #[case] expected: Decimal) {
        assert_eq!(minor_to_major(minor), expected);
    }

    #[rstest]
    fn test_sum_minor() {
        let records = vec![record("pi_1", 5000), record("pi_2", 5000), record("pi_3", -100)];
        assert_eq!(sum_minor(&records), 9900);
        assert_eq!(sum_minor(&[]), 0);
    }
}
