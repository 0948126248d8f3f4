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

//! Mapping from Stripe wire models into normalized ledger records.

use meridian_core::datetime::from_epoch_seconds;
use meridian_model::records::{LedgerRecord, ProcessorPaymentRecord};

use super::models::{PaymentIntent, PaymentIntentStatus, Refund};

/// Normalizes a payment intent into a ledger record keyed by the intent id.
#[must_use]
pub fn parse_payment_record(intent: &PaymentIntent) -> LedgerRecord {
    LedgerRecord::new(
        intent.id.clone(),
        intent.amount,
        intent.currency.clone(),
        from_epoch_seconds(intent.created),
    )
}

/// Normalizes a refund into a ledger record keyed by the refund id.
#[must_use]
pub fn parse_refund_record(refund: &Refund) -> LedgerRecord {
    LedgerRecord::new(
        refund.id.clone(),
        refund.amount,
        refund.currency.clone(),
        from_epoch_seconds(refund.created),
    )
}

/// Converts a payment intent into the authoritative processor-side record used
/// when replaying missed payments into the internal ledger.
///
/// Ownership is attributed from the `userId` metadata entry, falling back to
/// the attached customer when the metadata is absent.
#[must_use]
pub fn parse_processor_payment(intent: &PaymentIntent) -> ProcessorPaymentRecord {
    let owner_id = intent
        .metadata
        .get("userId")
        .cloned()
        .or_else(|| intent.customer.clone());

    ProcessorPaymentRecord {
        external_id: intent.id.clone(),
        amount_minor: intent.amount,
        currency: intent.currency.clone(),
        settled: intent.status == PaymentIntentStatus::Succeeded,
        occurred_at: from_epoch_seconds(intent.created),
        owner_id,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::http::models::RefundStatus;

    fn intent(status: PaymentIntentStatus) -> PaymentIntent {
        PaymentIntent {
            id: "pi_1".to_string(),
            amount: 2000,
            currency: "usd".to_string(),
            status,
            created: 1_680_800_504,
            customer: Some("cus_1".to_string()),
            metadata: std::collections::HashMap::new(),
        }
    }

    #[rstest]
    fn test_parse_payment_record() {
        let record = parse_payment_record(&intent(PaymentIntentStatus::Succeeded));
        assert_eq!(record.external_id, "pi_1");
        assert_eq!(record.amount_minor, 2000);
        assert_eq!(record.currency, "usd");
        assert_eq!(
            record.occurred_at,
            Utc.timestamp_opt(1_680_800_504, 0).unwrap()
        );
    }

    #[rstest]
    fn test_parse_refund_record() {
        let refund = Refund {
            id: "re_1".to_string(),
            amount: 500,
            currency: "usd".to_string(),
            status: RefundStatus::Succeeded,
            created: 1_680_800_504,
            payment_intent: Some("pi_1".to_string()),
        };
        let record = parse_refund_record(&refund);
        assert_eq!(record.external_id, "re_1");
        assert_eq!(record.amount_minor, 500);
    }

    #[rstest]
    #[case(PaymentIntentStatus::Succeeded, true)]
    #[case(PaymentIntentStatus::Processing, false)]
    #[case(PaymentIntentStatus::Canceled, false)]
    fn test_parse_processor_payment_settled_flag(
        #[case] status: PaymentIntentStatus,
        #[case] expected_settled: bool,
    ) {
        let payment = parse_processor_payment(&intent(status));
        assert_eq!(payment.settled, expected_settled);
    }

    #[rstest]
    fn test_parse_processor_payment_owner_from_metadata() {
        let mut payment_intent = intent(PaymentIntentStatus::Succeeded);
        payment_intent.customer = None;
        payment_intent
            .metadata
            .insert("userId".to_string(), "user_42".to_string());

        let payment = parse_processor_payment(&payment_intent);
        assert_eq!(payment.owner_id.as_deref(), Some("user_42"));
    }

    #[rstest]
    fn test_parse_processor_payment_metadata_owner_wins_over_customer() {
        let mut payment_intent = intent(PaymentIntentStatus::Succeeded);
        payment_intent
            .metadata
            .insert("userId".to_string(), "user_42".to_string());

        let payment = parse_processor_payment(&payment_intent);
        assert_eq!(payment.owner_id.as_deref(), Some("user_42"));
    }

    #[rstest]
    fn test_parse_processor_payment_falls_back_to_customer() {
        let payment = parse_processor_payment(&intent(PaymentIntentStatus::Succeeded));
        assert_eq!(payment.owner_id.as_deref(), Some("cus_1"));
    }

    #[rstest]
    fn test_parse_processor_payment_no_owner() {
        let mut payment_intent = intent(PaymentIntentStatus::Succeeded);
        payment_intent.customer = None;

        let payment = parse_processor_payment(&payment_intent);
        assert_eq!(payment.owner_id, None);
    }
}
