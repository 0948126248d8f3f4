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

//! The PostgreSQL-backed internal ledger and report store.

use async_trait::async_trait;
use meridian_engine::{LedgerSource, ReportStore};
use meridian_model::{
    ReconciliationResult, ReconciliationWindow,
    records::{LedgerRecord, ProcessorPaymentRecord},
};
use sqlx::PgPool;

use super::{
    pg::{PostgresConnectOptions, connect_pg},
    queries::DatabaseQueries,
};

/// Internal ledger backed by PostgreSQL.
///
/// Serves as both the ledger side of a reconciliation run and the append-only
/// store for its reports. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Creates a new [`PostgresLedger`] over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(options: PostgresConnectOptions) -> anyhow::Result<Self> {
        let pool = connect_pg(options.into()).await?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LedgerSource for PostgresLedger {
    async fn fetch_settled_payments(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>> {
        DatabaseQueries::load_settled_payments(&self.pool, window).await
    }

    async fn fetch_settled_refunds(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>> {
        DatabaseQueries::load_settled_refunds(&self.pool, window).await
    }

    async fn insert_payment(&self, payment: &ProcessorPaymentRecord) -> anyhow::Result<()> {
        DatabaseQueries::add_payment(&self.pool, payment).await
    }
}

#[async_trait]
impl ReportStore for PostgresLedger {
    async fn store(&self, result: &ReconciliationResult) -> anyhow::Result<()> {
        DatabaseQueries::add_report(&self.pool, result).await
    }
}
