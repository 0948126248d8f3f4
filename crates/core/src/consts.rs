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

//! Platform-wide constants.

/// User agent sent with every outbound HTTP request.
pub const MERIDIAN_USER_AGENT: &str = concat!("Meridian/", env!("CARGO_PKG_VERSION"));

/// Number of minor units (cents) in one major unit for two-decimal currencies.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;
