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

//! Common date and time functions.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Truncates the given datetime to midnight UTC of the same calendar day.
///
/// # Panics
///
/// Panics if the truncated datetime cannot be represented, which cannot occur
/// for valid UTC inputs.
#[must_use]
pub fn start_of_day_utc(dt: DateTime<Utc>) -> DateTime<Utc> {
    let date = dt.date_naive();
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid midnight"))
}

/// Returns the `(start, end)` bounds of the UTC calendar day preceding `now`.
///
/// The window is midnight-to-midnight: `start` is 00:00:00 of yesterday and
/// `end` is 00:00:00 of today.
#[must_use]
pub fn previous_day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = start_of_day_utc(now);
    let start = end - Duration::days(1);
    (start, end)
}

/// Converts a datetime to whole epoch seconds (Stripe `created` filter granularity).
#[must_use]
pub fn to_epoch_seconds(dt: DateTime<Utc>) -> i64 {
    dt.timestamp()
}

/// Converts epoch seconds to a UTC datetime, clamping out-of-range values.
#[must_use]
pub fn from_epoch_seconds(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
