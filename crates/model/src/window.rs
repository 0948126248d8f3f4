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

//! Input configuration for a single reconciliation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default aggregate tolerance: 1% of the external total.
pub const DEFAULT_TOLERANCE_FRACTION: f64 = 0.01;

/// Validation errors for [`ReconciliationWindow`] construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    /// The start of the window must precede its end.
    #[error("Invalid window: start ({start}) must be before end ({end})")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// The tolerance fraction must lie in `[0, 1]`.
    #[error("Invalid tolerance fraction: {0} (must be within [0, 1])")]
    InvalidTolerance(f64),
}

/// The validated input configuration for a single reconciliation run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationWindow {
    /// Inclusive lower bound of the settled-time window.
    pub start: DateTime<Utc>,
    /// Upper bound of the settled-time window.
    pub end: DateTime<Utc>,
    /// Aggregate discrepancy fraction considered acceptable noise.
    pub tolerance_fraction: f64,
    /// Whether refunds participate in the totals.
    pub include_refunds: bool,
}

impl ReconciliationWindow {
    /// Creates a new [`ReconciliationWindow`] with the default tolerance, refunds included.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end,
            tolerance_fraction: DEFAULT_TOLERANCE_FRACTION,
            include_refunds: true,
        })
    }

    /// Returns the window with the given tolerance fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance_fraction` lies outside `[0, 1]` or is not finite.
    pub fn with_tolerance(mut self, tolerance_fraction: f64) -> Result<Self, WindowError> {
        if !tolerance_fraction.is_finite() || !(0.0..=1.0).contains(&tolerance_fraction) {
            return Err(WindowError::InvalidTolerance(tolerance_fraction));
        }
        self.tolerance_fraction = tolerance_fraction;
        Ok(self)
    }

    /// Returns the window with refund participation toggled.
    #[must_use]
    pub const fn with_refunds(mut self, include_refunds: bool) -> Self {
        self.include_refunds = include_refunds;
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
