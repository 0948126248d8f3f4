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

//! Domain model for the Meridian reconciliation platform.
//!
//! The `meridian-model` crate defines the value types shared by every component of the
//! reconciliation pipeline:
//!
//! - [`records::LedgerRecord`]: one settled monetary movement as known to one side.
//! - [`window::ReconciliationWindow`]: the validated input configuration for a single run.
//! - [`result::ReconciliationResult`]: the immutable output of a run.
//! - Status and severity enumerations.
//!
//! All monetary amounts are carried as integer minor units (cents) and only converted to
//! major units at the reporting boundary, avoiding floating-point summation error across
//! potentially thousands of records.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod enums;
pub mod records;
pub mod result;
pub mod window;

pub use enums::{AlertSeverity, ReconciliationStatus};
pub use records::{AmountMismatch, LedgerRecord, ProcessorPaymentRecord};
pub use result::{ReconciliationResult, SyncOutcome};
pub use window::{ReconciliationWindow, WindowError};
