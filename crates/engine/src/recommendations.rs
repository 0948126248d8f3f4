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

//! Operator-facing recommendations derived from the discrepancy signals.

use meridian_model::records::AmountMismatch;

/// Discrepancy fraction above which immediate investigation is recommended.
const IMMEDIATE_FRACTION: f64 = 0.05;

/// Discrepancy fraction above which a scheduled review is recommended.
const REVIEW_FRACTION: f64 = 0.01;

/// Maximum number of missing ids quoted verbatim in a recommendation.
const MAX_QUOTED_IDS: usize = 5;

/// Generates human-readable recommendations from the four discrepancy signals.
///
/// Always returns at least one entry; when nothing is wrong the single entry
/// states that the systems are in sync.
#[must_use]
pub fn generate_recommendations(
    missing_on_internal: &[String],
    missing_on_external: &[String],
    amount_mismatches: &[AmountMismatch],
    discrepancy_fraction: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_on_internal.is_empty() {
        let preview = missing_on_internal
            .iter()
            .take(MAX_QUOTED_IDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let ellipsis = if missing_on_internal.len() > MAX_QUOTED_IDS {
            "..."
        } else {
            ""
        };
        recommendations.push(format!(
            "{} processor payments not found in internal ledger. \
             Run webhook sync or manual import for: {preview}{ellipsis}",
            missing_on_internal.len(),
        ));
    }

    if !missing_on_external.is_empty() {
        recommendations.push(format!(
            "{} internal payments not found at the processor. \
             Investigate potential manual entries or test data.",
            missing_on_external.len(),
        ));
    }

    if !amount_mismatches.is_empty() {
        recommendations.push(format!(
            "{} payments have amount mismatches. \
             Review currency conversion, partial refunds, or data entry errors.",
            amount_mismatches.len(),
        ));
    }

    if discrepancy_fraction > IMMEDIATE_FRACTION {
        recommendations.push(
            "Discrepancy exceeds 5%. Immediate investigation required. \
             Consider pausing automated billing until resolved."
                .to_string(),
        );
    } else if discrepancy_fraction > REVIEW_FRACTION {
        recommendations.push("Discrepancy between 1-5%. Schedule review within 24 hours.".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("No issues found. Systems are in sync.".to_string());
    }

    recommendations
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[rstest]
    fn test_no_issues() {
        let recs = generate_recommendations(&[], &[], &[], 0.0);
        assert_eq!(recs, vec!["No issues found. Systems are in sync."]);
    }

    #[rstest]
    fn test_missing_on_internal_previews_first_five() {
        let missing = ids(&["pi_1", "pi_2", "pi_3", "pi_4", "pi_5", "pi_6"]);
        let recs = generate_recommendations(&missing, &[], &[], 0.0);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("6 processor payments not found in internal ledger."));
        assert!(recs[0].contains("pi_1, pi_2, pi_3, pi_4, pi_5..."));
        assert!(!recs[0].contains("pi_6"));
    }

    #[rstest]
    fn test_missing_on_internal_no_ellipsis_at_five() {
        let missing = ids(&["pi_1", "pi_2", "pi_3", "pi_4", "pi_5"]);
        let recs = generate_recommendations(&missing, &[], &[], 0.0);
        assert!(recs[0].ends_with("pi_1, pi_2, pi_3, pi_4, pi_5"));
    }

    #[rstest]
    fn test_immediate_investigation_above_five_percent() {
        let recs = generate_recommendations(&[], &[], &[], 0.051);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("exceeds 5%"));
        assert!(recs[0].contains("Immediate investigation required"));
    }

    #[rstest]
    fn test_review_between_one_and_five_percent() {
        let recs = generate_recommendations(&[], &[], &[], 0.02);
        assert_eq!(recs, vec!["Discrepancy between 1-5%. Schedule review within 24 hours."]);
    }

    #[rstest]
    #[case(0.01)]
    #[case(0.0)]
    fn test_no_threshold_entry_at_or_below_one_percent(#[case] fraction: f64) {
        let recs = generate_recommendations(&[], &[], &[], fraction);
        assert_eq!(recs, vec!["No issues found. Systems are in sync."]);
    }

    #[rstest]
    fn test_all_signals_combine() {
        let missing_internal = ids(&["pi_1"]);
        let missing_external = ids(&["pi_9"]);
        let mismatches = vec![AmountMismatch::new("pi_2".to_string(), 100, 99)];
        let recs =
            generate_recommendations(&missing_internal, &missing_external, &mismatches, 0.06);
        assert_eq!(recs.len(), 4);
        assert!(recs[1].contains("1 internal payments not found at the processor."));
        assert!(recs[2].contains("1 payments have amount mismatches."));
    }
}
