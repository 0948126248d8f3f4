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

//! Collaborator seams implemented by the adapter crates.
//!
//! Each run owns its collaborators for the duration of the call; none of the traits
//! expose mutable state, so a single instance can serve concurrent runs.

use async_trait::async_trait;
use meridian_model::{
    ReconciliationResult, ReconciliationWindow,
    records::{LedgerRecord, ProcessorPaymentRecord},
};

/// The external payment processor side of the reconciliation.
///
/// Implementations paginate transparently until the window is exhausted and must
/// return only settled (terminal-success) records. A fetch failure after bounded
/// retries is fatal to the run.
#[async_trait]
pub trait ProcessorSource: Send + Sync {
    /// Fetches all settled payments in the window.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    async fn fetch_settled_payments(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>>;

    /// Fetches all settled refunds in the window.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    async fn fetch_settled_refunds(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>>;

    /// Retrieves one authoritative payment record by its processor identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the identifier is unknown.
    async fn retrieve_payment(
        &self,
        external_id: &str,
    ) -> anyhow::Result<ProcessorPaymentRecord>;
}

/// The internal datastore side of the reconciliation.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Fetches all committed settled payments in the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn fetch_settled_payments(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>>;

    /// Fetches all committed settled refunds in the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn fetch_settled_refunds(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>>;

    /// Replays one authoritative processor payment into the internal ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn insert_payment(&self, payment: &ProcessorPaymentRecord) -> anyhow::Result<()>;
}

/// Append-only persistence for reconciliation results.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists the result. Never called twice for the same result instance.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; the orchestrator logs and swallows it.
    async fn store(&self, result: &ReconciliationResult) -> anyhow::Result<()>;
}

/// Best-effort operator alerting for detected discrepancies.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Forwards a discrepancy summary to the operator-facing systems.
    ///
    /// # Errors
    ///
    /// Returns an error if any delivery fails; the orchestrator logs and swallows it.
    async fn send_discrepancy_alert(&self, result: &ReconciliationResult) -> anyhow::Result<()>;
}
