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

//! Generic retry mechanism for network operations.

use std::{future::Future, marker::PhantomData, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::backoff::ExponentialBackoff;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (total attempts = 1 initial + `max_retries`).
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
    /// Backoff multiplier factor.
    pub backoff_factor: f64,
    /// Maximum jitter in milliseconds to add to delays.
    pub jitter_ms: u64,
    /// Optional timeout for individual operations in milliseconds.
    pub operation_timeout_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1_000,
            max_delay_ms: 10_000,
            backoff_factor: 2.0,
            jitter_ms: 250,
            operation_timeout_ms: Some(60_000),
        }
    }
}

/// Generic retry manager for network operations.
///
/// Stateless and thread-safe: each operation gets its own backoff state.
#[derive(Debug)]
pub struct RetryManager<E> {
    config: RetryConfig,
    _phantom: PhantomData<E>,
}

impl<E> RetryManager<E>
where
    E: std::error::Error,
{
    /// Creates a new [`RetryManager`] with the given configuration.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    /// Executes `operation` with bounded retries.
    ///
    /// `should_retry` decides per error whether another attempt is worthwhile;
    /// `create_timeout_error` converts an elapsed per-operation timeout into the
    /// caller's error type.
    ///
    /// # Errors
    ///
    /// Returns the final error once retries are exhausted, the operation times out,
    /// or a non-retryable error occurs.
    pub async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut operation: F,
        should_retry: impl Fn(&E) -> bool,
        create_timeout_error: impl Fn(String) -> E,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut backoff = ExponentialBackoff::new(
            Duration::from_millis(self.config.initial_delay_ms),
            Duration::from_millis(self.config.max_delay_ms),
            self.config.backoff_factor,
            self.config.jitter_ms,
        )
        .map_err(|e| create_timeout_error(format!("Failed to create backoff: {e}")))?;

        let mut attempt = 0;

        loop {
            let outcome = if let Some(timeout_ms) = self.config.operation_timeout_ms {
                match tokio::time::timeout(Duration::from_millis(timeout_ms), operation()).await {
                    Ok(result) => result,
                    Err(_) => Err(create_timeout_error(format!(
                        "Operation '{operation_name}' timed out after {timeout_ms}ms"
                    ))),
                }
            } else {
                operation().await
            };

            match outcome {
                Ok(success) => {
                    if attempt > 0 {
                        debug!(
                            "Operation '{operation_name}' succeeded after {} attempts",
                            attempt + 1
                        );
                    }
                    return Ok(success);
                }
                Err(error) => {
                    if !should_retry(&error) {
                        debug!(
                            "Operation '{operation_name}' failed with non-retryable error: {error}"
                        );
                        return Err(error);
                    }
                    if attempt >= self.config.max_retries {
                        warn!(
                            "Operation '{operation_name}' failed after {} attempts: {error}",
                            attempt + 1
                        );
                        return Err(error);
                    }

                    let delay = backoff.next_duration();
                    debug!(
                        "Operation '{operation_name}' failed (attempt {}), retrying in {delay:?}: {error}",
                        attempt + 1
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
