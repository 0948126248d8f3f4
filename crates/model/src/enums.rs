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

//! Enumerations for reconciliation outcomes and alerting.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Represents the overall outcome of a reconciliation run.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReconciliationStatus {
    /// The aggregate discrepancy fraction is within the configured tolerance.
    Success,
    /// The aggregate discrepancy fraction exceeds the configured tolerance.
    DiscrepancyFound,
}

/// Represents the severity of a discrepancy alert.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertSeverity {
    /// Discrepancy requiring review within 24 hours.
    Warning,
    /// Discrepancy requiring immediate investigation (fraction above 5%).
    Critical,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ReconciliationStatus::Success, "success")]
    #[case(ReconciliationStatus::DiscrepancyFound, "discrepancy_found")]
    fn test_status_serialization(#[case] status: ReconciliationStatus, #[case] expected: &str) {
        assert_eq!(serde_json::to_value(status).unwrap(), expected);
        assert_eq!(status.to_string(), expected);
        assert_eq!(ReconciliationStatus::from_str(expected).unwrap(), status);
    }

    #[rstest]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::Warning);
    }
}
