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

//! The immutable output of a reconciliation run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{AlertSeverity, ReconciliationStatus},
    records::{AmountMismatch, minor_to_major},
};

/// Discrepancy fraction above which an alert is classified [`AlertSeverity::Critical`].
pub const CRITICAL_FRACTION: f64 = 0.05;

/// The outcome of one reconciliation run, created once by the orchestrator and
/// never mutated after creation.
///
/// Monetary aggregates are carried in integer minor units; use the `*_major`
/// accessors for display and persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// When the run completed.
    pub run_timestamp: DateTime<Utc>,
    /// Net external total (payments minus refunds) in minor units.
    pub external_total_minor: i64,
    /// Net internal total (payments minus refunds) in minor units.
    pub internal_total_minor: i64,
    /// Absolute difference between the two totals in minor units.
    pub discrepancy_minor: i64,
    /// `discrepancy / external_total`, or 0 when the external total is not positive.
    pub discrepancy_fraction: f64,
    /// External payment ids with no internal counterpart, in external source order.
    pub missing_on_internal: Vec<String>,
    /// Internal payment references with no external counterpart, in internal source order.
    pub missing_on_external: Vec<String>,
    /// Per-record exact amount disagreements, in external source order.
    pub amount_mismatches: Vec<AmountMismatch>,
    /// Overall classification against the window tolerance.
    pub status: ReconciliationStatus,
    /// Human-readable operator guidance derived from the discrepancy signals.
    pub recommendations: Vec<String>,
}

impl ReconciliationResult {
    /// Returns the net external total in major units.
    #[must_use]
    pub fn external_total_major(&self) -> Decimal {
        minor_to_major(self.external_total_minor)
    }

    /// Returns the net internal total in major units.
    #[must_use]
    pub fn internal_total_major(&self) -> Decimal {
        minor_to_major(self.internal_total_minor)
    }

    /// Returns the absolute discrepancy in major units.
    #[must_use]
    pub fn discrepancy_major(&self) -> Decimal {
        minor_to_major(self.discrepancy_minor)
    }

    /// Returns the discrepancy fraction as a percentage for display.
    #[must_use]
    pub fn discrepancy_percentage(&self) -> f64 {
        self.discrepancy_fraction * 100.0
    }

    /// Classifies the alert severity for this result.
    ///
    /// Critical above [`CRITICAL_FRACTION`], warning otherwise.
    #[must_use]
    pub fn severity(&self) -> AlertSeverity {
        if self.discrepancy_fraction > CRITICAL_FRACTION {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }

    /// Whether any discrepancy signal is present, regardless of status.
    #[must_use]
    pub fn has_discrepancies(&self) -> bool {
        !self.missing_on_internal.is_empty()
            || !self.missing_on_external.is_empty()
            || !self.amount_mismatches.is_empty()
            || self.discrepancy_minor != 0
    }
}

/// The outcome of a best-effort `sync_missing_payments` batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Number of payments replayed into the internal ledger.
    pub synced: usize,
    /// Identifiers which could not be synced.
    pub failed: Vec<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn result_with_fraction(fraction: f64) -> ReconciliationResult {
        ReconciliationResult {
            run_timestamp: Utc::now(),
            external_total_minor: 10_000,
            internal_total_minor: 9_500,
            discrepancy_minor: 500,
            discrepancy_fraction: fraction,
            missing_on_internal: vec![],
            missing_on_external: vec![],
            amount_mismatches: vec![],
            status: ReconciliationStatus::DiscrepancyFound,
            recommendations: vec![],
        }
    }

    #[rstest]
    fn test_major_unit_accessors() {
        let result = result_with_fraction(0.05);
        assert_eq!(result.external_total_major(), dec!(100.00));
        assert_eq!(result.internal_total_major(), dec!(95.00));
        assert_eq!(result.discrepancy_major(), dec!(5.00));
        assert_eq!(result.discrepancy_percentage(), 5.0);
    }

    #[rstest]
    #[case(0.01, AlertSeverity::Warning)]
    #[case(0.05, AlertSeverity::Warning)]
    #[case(0.050001, AlertSeverity::Critical)]
    #[case(0.20, AlertSeverity::Critical)]
    fn test_severity_threshold(#[case] fraction: f64, #[case] expected: AlertSeverity) {
        assert_eq!(result_with_fraction(fraction).severity(), expected);
    }

    #[rstest]
    fn test_has_discrepancies() {
        let mut result = result_with_fraction(0.0);
        result.discrepancy_minor = 0;
        assert!(!result.has_discrepancies());

        result.missing_on_internal.push("pi_1".to_string());
        assert!(result.has_discrepancies());
    }
}
