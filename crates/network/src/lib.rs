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

//! Network retry and backoff primitives for the Meridian reconciliation platform.
//!
//! Ledger fetches cross the network and can fail transiently (rate limits, 5xx,
//! connection resets). This crate provides the bounded retry machinery used at the
//! fetcher boundary so transient failures do not abort an otherwise sound run, while
//! leaving the orchestrator's fail-fast contract intact: once retries are exhausted
//! the fetch error propagates and the run is abandoned.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod backoff;
pub mod retry;

pub use backoff::ExponentialBackoff;
pub use retry::{RetryConfig, RetryManager};
