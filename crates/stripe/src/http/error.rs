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

//! Error structures and enumerations for the Stripe integration.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents the JSON structure of an error response returned by the Stripe API.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StripeErrorResponse {
    /// The top-level error object included in the Stripe error response.
    pub error: StripeErrorMessage,
}

/// Contains the specific error details provided by the Stripe API.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StripeErrorMessage {
    /// The category of error, for example `invalid_request_error` or `api_error`.
    #[serde(rename = "type")]
    pub error_type: String,
    /// A short machine-readable code, when Stripe provides one.
    pub code: Option<String>,
    /// A human-readable explanation of the error condition.
    pub message: Option<String>,
}

/// A typed error enumeration for the Stripe HTTP client.
#[derive(Debug, Clone, Error)]
pub enum StripeHttpError {
    /// Error variant when no secret key is configured.
    #[error("Missing credentials for Stripe request")]
    MissingCredentials,
    /// Errors returned directly by Stripe.
    #[error("Stripe error {error_type}: {message}")]
    StripeError { error_type: String, message: String },
    /// Failure during JSON serialization/deserialization.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// Failure encoding query parameters.
    #[error("Query encoding error: {0}")]
    QueryError(String),
    /// Generic network error (connection failures, DNS, TLS).
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The operation exceeded its per-request deadline.
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Any unknown HTTP status or unexpected response from Stripe.
    #[error("Unexpected HTTP status code {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl StripeHttpError {
    /// Returns whether another attempt at the failed request is worthwhile.
    ///
    /// Rate limits, server-side errors, timeouts, and transport failures are
    /// transient; authentication and validation errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkError(_) | Self::Timeout(_) => true,
            Self::UnexpectedStatus { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::StripeError { error_type, .. } => {
                error_type == "api_error" || error_type == "rate_limit_error"
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for StripeHttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::NetworkError(error.to_string())
        }
    }
}

impl From<serde_json::Error> for StripeHttpError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for StripeHttpError {
    fn from(error: serde_urlencoded::ser::Error) -> Self {
        Self::QueryError(error.to_string())
    }
}

impl From<StripeErrorResponse> for StripeHttpError {
    fn from(error: StripeErrorResponse) -> Self {
        Self::StripeError {
            error_type: error.error.error_type,
            message: error.error.message.unwrap_or_default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
