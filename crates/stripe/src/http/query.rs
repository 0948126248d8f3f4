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

//! Builder types for Stripe REST query parameters.
//!
//! Stripe encodes range filters with bracketed keys (`created[gte]`), which the
//! serde renames below produce verbatim when urlencoded.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /v1/payment_intents`.
///
/// # References
/// - <https://docs.stripe.com/api/payment_intents/list>
#[derive(Clone, Debug, Deserialize, Serialize, Default, Builder)]
#[builder(default)]
#[builder(setter(into, strip_option))]
pub struct ListPaymentIntentsParams {
    /// Lower bound on creation time (inclusive), epoch seconds.
    #[serde(rename = "created[gte]", skip_serializing_if = "Option::is_none")]
    pub created_gte: Option<i64>,
    /// Upper bound on creation time (inclusive), epoch seconds.
    #[serde(rename = "created[lte]", skip_serializing_if = "Option::is_none")]
    pub created_lte: Option<i64>,
    /// Page size, between 1 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Pagination cursor: the last object id of the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
}

/// Query parameters for `GET /v1/refunds`.
///
/// # References
/// - <https://docs.stripe.com/api/refunds/list>
#[derive(Clone, Debug, Deserialize, Serialize, Default, Builder)]
#[builder(default)]
#[builder(setter(into, strip_option))]
pub struct ListRefundsParams {
    /// Lower bound on creation time (inclusive), epoch seconds.
    #[serde(rename = "created[gte]", skip_serializing_if = "Option::is_none")]
    pub created_gte: Option<i64>,
    /// Upper bound on creation time (inclusive), epoch seconds.
    #[serde(rename = "created[lte]", skip_serializing_if = "Option::is_none")]
    pub created_lte: Option<i64>,
    /// Page size, between 1 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Pagination cursor: the last object id of the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
