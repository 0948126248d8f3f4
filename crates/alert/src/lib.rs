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

//! Operator alerting for the Meridian reconciliation engine.
//!
//! The `meridian-alert` crate delivers discrepancy alerts over two channels:
//! Slack (every discrepancy) and PagerDuty Events v2 (critical discrepancies
//! only). Both channels are best effort: an unconfigured channel is skipped
//! silently and a delivery failure never fails the reconciliation run.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alerter;
pub mod error;
pub mod pagerduty;
pub mod slack;

pub use alerter::DiscrepancyAlerter;
