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

//! Provides the HTTP client integration for the [Stripe](https://stripe.com) REST API.
//!
//! This module defines and implements a [`StripeHttpClient`] for fetching payment
//! intents and refunds over windowed, cursor-paginated list endpoints, and for
//! retrieving individual payment intents when replaying missed payments. All
//! requests run through the shared retry manager with exponential backoff.
//!
//! # Quick links to official docs
//! | Domain            | Stripe reference                                      |
//! |-------------------|-------------------------------------------------------|
//! | Payment intents   | <https://docs.stripe.com/api/payment_intents>         |
//! | Refunds           | <https://docs.stripe.com/api/refunds>                 |
//! | Pagination        | <https://docs.stripe.com/api/pagination>              |

use std::time::Duration;

use async_trait::async_trait;
use meridian_core::{
    consts::MERIDIAN_USER_AGENT,
    datetime::to_epoch_seconds,
    env::get_env_var,
};
use meridian_engine::ProcessorSource;
use meridian_model::{
    ReconciliationWindow,
    records::{LedgerRecord, ProcessorPaymentRecord},
};
use meridian_network::retry::{RetryConfig, RetryManager};
use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    error::{StripeErrorResponse, StripeHttpError},
    models::{PaymentIntent, PaymentIntentStatus, Refund, RefundStatus, StripeList},
    parse::{parse_payment_record, parse_processor_payment, parse_refund_record},
    query::{ListPaymentIntentsParams, ListRefundsParams},
};
use crate::common::{
    consts::{STRIPE_HTTP_URL, STRIPE_PAGE_LIMIT, STRIPE_SECRET_KEY_ENV},
    credential::Credential,
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Provides an HTTP client for connecting to the [Stripe](https://stripe.com) REST API.
///
/// The client owns the bearer credential, paginates list endpoints transparently,
/// and retries transient failures (rate limits, server errors, timeouts) with
/// exponential backoff before surfacing an error to the caller.
#[derive(Debug)]
pub struct StripeHttpClient {
    base_url: String,
    client: reqwest::Client,
    credential: Credential,
    retry_manager: RetryManager<StripeHttpError>,
}

impl StripeHttpClient {
    /// Creates a new [`StripeHttpClient`] using the default Stripe HTTP URL,
    /// optionally overridden with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        credential: Credential,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, StripeHttpError> {
        let client = reqwest::Client::builder()
            .user_agent(MERIDIAN_USER_AGENT)
            .timeout(Duration::from_secs(
                timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()?;

        Ok(Self {
            base_url: base_url.unwrap_or_else(|| STRIPE_HTTP_URL.to_string()),
            client,
            credential,
            retry_manager: RetryManager::new(RetryConfig::default()),
        })
    }

    /// Creates a new [`StripeHttpClient`] with the secret key taken from the
    /// `STRIPE_SECRET_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is unset or the client
    /// cannot be constructed.
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = get_env_var(STRIPE_SECRET_KEY_ENV)?;
        Ok(Self::new(Credential::new(secret_key), None, None)?)
    }

    async fn send_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<T, StripeHttpError> {
        let url = if query.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{path}?{query}", self.base_url)
        };

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.credential.authorization())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&body).map_err(Into::into)
        } else if let Ok(error_resp) = serde_json::from_slice::<StripeErrorResponse>(&body) {
            Err(error_resp.into())
        } else {
            Err(StripeHttpError::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&body).to_string(),
            })
        }
    }

    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: String,
    ) -> Result<T, StripeHttpError> {
        self.retry_manager
            .execute_with_retry(
                operation,
                || self.send_get(path, &query),
                StripeHttpError::is_retryable,
                StripeHttpError::Timeout,
            )
            .await
    }

    // ========================================================================
    // Raw HTTP API methods
    // ========================================================================

    /// Lists all payment intents created within `[created_gte, created_lte]`,
    /// following pagination cursors until the window is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails after bounded retries.
    pub async fn http_list_payment_intents(
        &self,
        created_gte: i64,
        created_lte: i64,
    ) -> Result<Vec<PaymentIntent>, StripeHttpError> {
        let mut intents: Vec<PaymentIntent> = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let params = ListPaymentIntentsParams {
                created_gte: Some(created_gte),
                created_lte: Some(created_lte),
                limit: Some(STRIPE_PAGE_LIMIT),
                starting_after: starting_after.take(),
            };
            let query = serde_urlencoded::to_string(&params)?;
            let page: StripeList<PaymentIntent> = self
                .get_with_retry("list_payment_intents", "/v1/payment_intents", query)
                .await?;

            let has_more = page.has_more;
            let cursor = page.data.last().map(|intent| intent.id.clone());
            intents.extend(page.data);

            match (has_more, cursor) {
                (true, Some(cursor)) => starting_after = Some(cursor),
                _ => break,
            }
        }

        Ok(intents)
    }

    /// Lists all refunds created within `[created_gte, created_lte]`, following
    /// pagination cursors until the window is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails after bounded retries.
    pub async fn http_list_refunds(
        &self,
        created_gte: i64,
        created_lte: i64,
    ) -> Result<Vec<Refund>, StripeHttpError> {
        let mut refunds: Vec<Refund> = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let params = ListRefundsParams {
                created_gte: Some(created_gte),
                created_lte: Some(created_lte),
                limit: Some(STRIPE_PAGE_LIMIT),
                starting_after: starting_after.take(),
            };
            let query = serde_urlencoded::to_string(&params)?;
            let page: StripeList<Refund> = self
                .get_with_retry("list_refunds", "/v1/refunds", query)
                .await?;

            let has_more = page.has_more;
            let cursor = page.data.last().map(|refund| refund.id.clone());
            refunds.extend(page.data);

            match (has_more, cursor) {
                (true, Some(cursor)) => starting_after = Some(cursor),
                _ => break,
            }
        }

        Ok(refunds)
    }

    /// Retrieves a single payment intent by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the id is unknown.
    pub async fn http_get_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, StripeHttpError> {
        let path = format!("/v1/payment_intents/{payment_intent_id}");
        self.get_with_retry("get_payment_intent", &path, String::new())
            .await
    }
}

#[async_trait]
impl ProcessorSource for StripeHttpClient {
    async fn fetch_settled_payments(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>> {
        let intents = self
            .http_list_payment_intents(
                to_epoch_seconds(window.start),
                to_epoch_seconds(window.end),
            )
            .await?;

        let records: Vec<LedgerRecord> = intents
            .iter()
            .filter(|intent| intent.status == PaymentIntentStatus::Succeeded)
            .map(parse_payment_record)
            .collect();

        debug!(
            "Fetched {} succeeded payment intents ({} total) from Stripe",
            records.len(),
            intents.len(),
        );
        Ok(records)
    }

    async fn fetch_settled_refunds(
        &self,
        window: &ReconciliationWindow,
    ) -> anyhow::Result<Vec<LedgerRecord>> {
        let refunds = self
            .http_list_refunds(to_epoch_seconds(window.start), to_epoch_seconds(window.end))
            .await?;

        let records: Vec<LedgerRecord> = refunds
            .iter()
            .filter(|refund| refund.status == RefundStatus::Succeeded)
            .map(parse_refund_record)
            .collect();

        debug!(
            "Fetched {} succeeded refunds ({} total) from Stripe",
            records.len(),
            refunds.len(),
        );
        Ok(records)
    }

    async fn retrieve_payment(&self, external_id: &str) -> anyhow::Result<ProcessorPaymentRecord> {
        let intent = self.http_get_payment_intent(external_id).await?;
        Ok(parse_processor_payment(&intent))
    }
}
