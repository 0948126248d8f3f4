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

//! Discrepancy engine and reconciliation orchestrator for the Meridian platform.
//!
//! The `meridian-engine` crate contains the reconciliation core:
//!
//! - [`discrepancy`]: pure, stateless set comparison over id-indexed ledger collections.
//! - [`recommendations`]: human-readable operator guidance from the discrepancy signals.
//! - [`traits`]: the collaborator seams (processor, internal ledger, report store,
//!   alert channel) that adapter crates implement.
//! - [`reconciler`]: the orchestrator driving fetchers, engine, persistence and alerting.
//!
//! A run is a pure function of its window plus two read-only data sources, so runs for
//! different windows may execute fully in parallel with no coordination.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod discrepancy;
pub mod recommendations;
pub mod reconciler;
pub mod traits;

pub use reconciler::Reconciler;
pub use traits::{AlertChannel, LedgerSource, ProcessorSource, ReportStore};
