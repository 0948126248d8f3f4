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

//! Wire models for Stripe REST API responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single page of a Stripe list endpoint.
///
/// # References
/// - <https://docs.stripe.com/api/pagination>
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StripeList<T> {
    /// The typed objects on this page.
    pub data: Vec<T>,
    /// Whether more objects exist beyond this page.
    pub has_more: bool,
}

/// Lifecycle status of a Stripe payment intent.
///
/// Only [`Succeeded`](Self::Succeeded) represents settled funds; every other
/// status is in-flight or terminal-failure and excluded from reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// Forward-compatible catch-all for statuses added by Stripe later.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a Stripe refund.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    RequiresAction,
    Succeeded,
    Failed,
    Canceled,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A Stripe payment intent.
///
/// # References
/// - <https://docs.stripe.com/api/payment_intents/object>
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentIntent {
    /// Unique payment intent identifier (`pi_` prefix).
    pub id: String,
    /// Amount intended to be collected, in minor currency units.
    pub amount: i64,
    /// Three-letter ISO currency code, lowercase.
    pub currency: String,
    /// Current lifecycle status.
    pub status: PaymentIntentStatus,
    /// Creation time as a Unix epoch timestamp in seconds.
    pub created: i64,
    /// Identifier of the customer this intent belongs to, when attached.
    #[serde(default)]
    pub customer: Option<String>,
    /// Caller-supplied key-value metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A Stripe refund.
///
/// # References
/// - <https://docs.stripe.com/api/refunds/object>
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Refund {
    /// Unique refund identifier (`re_` prefix).
    pub id: String,
    /// Refunded amount in minor currency units.
    pub amount: i64,
    /// Three-letter ISO currency code, lowercase.
    pub currency: String,
    /// Current lifecycle status.
    pub status: RefundStatus,
    /// Creation time as a Unix epoch timestamp in seconds.
    pub created: i64,
    /// Identifier of the payment intent being refunded, when known.
    #[serde(default)]
    pub payment_intent: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_payment_intent_deserialization() {
        let json = r#"{
            "id": "pi_3MtwBwLkdIwHu7ix28a3tqPa",
            "object": "payment_intent",
            "amount": 2000,
            "currency": "usd",
            "status": "succeeded",
            "created": 1680800504,
            "customer": "cus_9s6XKzkNRiz8i3",
            "metadata": {"order_id": "6735"}
        }"#;

        let intent: PaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.id, "pi_3MtwBwLkdIwHu7ix28a3tqPa");
        assert_eq!(intent.amount, 2000);
        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
        assert_eq!(intent.customer.as_deref(), Some("cus_9s6XKzkNRiz8i3"));
        assert_eq!(intent.metadata.get("order_id").map(String::as_str), Some("6735"));
    }

    #[rstest]
    fn test_unknown_status_deserializes_as_unknown() {
        let json = r#"{
            "id": "pi_1",
            "amount": 100,
            "currency": "usd",
            "status": "some_future_status",
            "created": 1680800504
        }"#;

        let intent: PaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::Unknown);
    }

    #[rstest]
    fn test_list_page_deserialization() {
        let json = r#"{
            "object": "list",
            "url": "/v1/refunds",
            "has_more": true,
            "data": [{
                "id": "re_1Nispe2eZvKYlo2Cd31jOCgZ",
                "amount": 1000,
                "currency": "usd",
                "status": "succeeded",
                "created": 1692942318,
                "payment_intent": "pi_1GszsK2eZvKYlo2CfhZyoZLp"
            }]
        }"#;

        let page: StripeList<Refund> = serde_json::from_str(json).unwrap();
        assert!(page.has_more);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].status, RefundStatus::Succeeded);
        assert_eq!(
            page.data[0].payment_intent.as_deref(),
            Some("pi_1GszsK2eZvKYlo2CfhZyoZLp")
        );
    }
}
