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

//! Exponential backoff with jitter for retryable fetch operations.
//!
//! The delay grows exponentially up to a configurable maximum, with random jitter
//! added to avoid synchronized retry storms against the payment processor.

use std::time::Duration;

use rand::RngExt;

/// Computes successive delays for retry attempts.
///
/// Starts from an initial delay and multiplies it by a factor on each iteration,
/// capping at a maximum. Random jitter up to a configured bound is added to every
/// returned delay.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    delay_initial: Duration,
    delay_max: Duration,
    delay_current: Duration,
    factor: f64,
    jitter_ms: u64,
}

impl ExponentialBackoff {
    /// Creates a new [`ExponentialBackoff`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `delay_initial` is zero, `delay_max` is below `delay_initial`,
    /// or `factor` is below 1.0.
    pub fn new(
        delay_initial: Duration,
        delay_max: Duration,
        factor: f64,
        jitter_ms: u64,
    ) -> anyhow::Result<Self> {
        if delay_initial.is_zero() {
            anyhow::bail!("delay_initial must be positive");
        }
        if delay_max < delay_initial {
            anyhow::bail!("delay_max must be at least delay_initial");
        }
        if factor < 1.0 {
            anyhow::bail!("factor must be at least 1.0");
        }
        Ok(Self {
            delay_initial,
            delay_max,
            delay_current: delay_initial,
            factor,
            jitter_ms,
        })
    }

    /// Returns the next delay with jitter applied and advances the internal state.
    pub fn next_duration(&mut self) -> Duration {
        let jitter = rand::rng().random_range(0..=self.jitter_ms);
        let delay = self.delay_current + Duration::from_millis(jitter);

        let next_nanos = (self.delay_current.as_nanos() as f64 * self.factor) as u64;
        self.delay_current = Duration::from_nanos(next_nanos).min(self.delay_max);

        delay
    }

    /// Resets the backoff to its initial delay.
    pub const fn reset(&mut self) {
        self.delay_current = self.delay_initial;
    }

    /// Returns the base delay that the next call would use, before jitter.
    #[must_use]
    pub const fn current_delay(&self) -> Duration {
        self.delay_current
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
