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

//! Error types for alert delivery.

use reqwest::StatusCode;
use thiserror::Error;

/// A typed error enumeration for the alert channels.
#[derive(Debug, Clone, Error)]
pub enum AlertError {
    /// The channel endpoint rejected the delivery.
    #[error("{channel} returned status {status}: {body}")]
    HttpStatus {
        channel: String,
        status: StatusCode,
        body: String,
    },
    /// Transport failure before a response was received.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AlertError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
