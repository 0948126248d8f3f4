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

//! Fan-out of discrepancy alerts across the configured channels.

use async_trait::async_trait;
use meridian_engine::AlertChannel;
use meridian_model::{ReconciliationResult, enums::AlertSeverity};
use tracing::{error, warn};

use crate::{pagerduty::PagerDutyClient, slack::SlackWebhook};

/// Routes discrepancy alerts: Slack receives every discrepancy, PagerDuty only
/// critical ones (discrepancy fraction above 5%). Deliveries run concurrently
/// and a failure on one channel never blocks the other.
#[derive(Debug, Clone)]
pub struct DiscrepancyAlerter {
    slack: SlackWebhook,
    pagerduty: PagerDutyClient,
}

impl DiscrepancyAlerter {
    /// Creates a new [`DiscrepancyAlerter`] instance.
    #[must_use]
    pub const fn new(slack: SlackWebhook, pagerduty: PagerDutyClient) -> Self {
        Self { slack, pagerduty }
    }

    /// Creates a new [`DiscrepancyAlerter`] configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SlackWebhook::from_env(), PagerDutyClient::from_env())
    }
}

#[async_trait]
impl AlertChannel for DiscrepancyAlerter {
    async fn send_discrepancy_alert(&self, result: &ReconciliationResult) -> anyhow::Result<()> {
        let severity = result.severity();

        warn!(
            "Billing discrepancy detected: {} ({:.2}%), missing_on_internal {}, \
             missing_on_external {}, amount_mismatches {}, severity {severity}",
            result.discrepancy_major(),
            result.discrepancy_percentage(),
            result.missing_on_internal.len(),
            result.missing_on_external.len(),
            result.amount_mismatches.len(),
        );

        let mut failures = Vec::new();

        if severity == AlertSeverity::Critical {
            let (slack_outcome, pagerduty_outcome) = tokio::join!(
                self.slack.send(result, severity),
                self.pagerduty.send(result),
            );
            if let Err(e) = slack_outcome {
                error!("Failed to send Slack alert: {e}");
                failures.push(e);
            }
            if let Err(e) = pagerduty_outcome {
                error!("Failed to send PagerDuty alert: {e}");
                failures.push(e);
            }
        } else if let Err(e) = self.slack.send(result, severity).await {
            error!("Failed to send Slack alert: {e}");
            failures.push(e);
        }

        match failures.into_iter().next() {
            Some(first) => Err(first.into()),
            None => Ok(()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use meridian_model::enums::ReconciliationStatus;
    use rstest::rstest;

    use super::*;

    fn result_with_fraction(fraction: f64) -> ReconciliationResult {
        ReconciliationResult {
            run_timestamp: Utc::now(),
            external_total_minor: 10_000,
            internal_total_minor: 9_000,
            discrepancy_minor: 1_000,
            discrepancy_fraction: fraction,
            missing_on_internal: vec![],
            missing_on_external: vec![],
            amount_mismatches: vec![],
            status: ReconciliationStatus::DiscrepancyFound,
            recommendations: vec![],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_unconfigured_channels_succeed() {
        let alerter =
            DiscrepancyAlerter::new(SlackWebhook::new(None), PagerDutyClient::new(None, None, None));

        assert!(
            alerter
                .send_discrepancy_alert(&result_with_fraction(0.02))
                .await
                .is_ok()
        );
        assert!(
            alerter
                .send_discrepancy_alert(&result_with_fraction(0.10))
                .await
                .is_ok()
        );
    }
}
