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

//! PagerDuty Events API v2 delivery for critical discrepancy alerts.
//!
//! # References
//! - <https://developer.pagerduty.com/docs/events-api-v2-overview>

use meridian_core::env::get_optional_env_var;
use meridian_model::ReconciliationResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::AlertError;

/// Environment variable holding the PagerDuty Events v2 routing key.
pub const PAGERDUTY_ROUTING_KEY_ENV: &str = "PAGERDUTY_ROUTING_KEY";

/// Environment variable holding the operator dashboard base URL.
pub const APP_URL_ENV: &str = "APP_URL";

pub const PAGERDUTY_EVENTS_URL: &str = "https://events.pagerduty.com/v2/enqueue";

const DEFAULT_DASHBOARD_URL: &str = "https://dashboard.meridian.io";

/// A PagerDuty Events API v2 trigger event.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PagerDutyEvent {
    pub routing_key: String,
    pub event_action: String,
    pub dedup_key: String,
    pub payload: PagerDutyPayload,
    pub links: Vec<PagerDutyLink>,
}

/// The alert payload within a PagerDuty event.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PagerDutyPayload {
    pub summary: String,
    pub source: String,
    pub severity: String,
    pub timestamp: String,
    pub component: String,
    pub group: String,
    pub class: String,
    pub custom_details: Value,
}

/// A link attached to a PagerDuty event.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PagerDutyLink {
    pub href: String,
    pub text: String,
}

/// PagerDuty channel for critical alerts. Unconfigured instances skip delivery.
#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    routing_key: Option<String>,
    events_url: String,
    dashboard_url: String,
    client: reqwest::Client,
}

impl PagerDutyClient {
    /// Creates a new [`PagerDutyClient`] instance.
    #[must_use]
    pub fn new(
        routing_key: Option<String>,
        events_url: Option<String>,
        dashboard_url: Option<String>,
    ) -> Self {
        Self {
            routing_key,
            events_url: events_url.unwrap_or_else(|| PAGERDUTY_EVENTS_URL.to_string()),
            dashboard_url: dashboard_url.unwrap_or_else(|| DEFAULT_DASHBOARD_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a new [`PagerDutyClient`] configured from `PAGERDUTY_ROUTING_KEY`
    /// and `APP_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            get_optional_env_var(PAGERDUTY_ROUTING_KEY_ENV),
            None,
            get_optional_env_var(APP_URL_ENV),
        )
    }

    /// The daily deduplication key: repeated triggers for the same UTC date
    /// update one incident instead of opening new ones.
    #[must_use]
    pub fn dedup_key(result: &ReconciliationResult) -> String {
        format!(
            "billing-reconciliation-{}",
            result.run_timestamp.format("%Y-%m-%d")
        )
    }

    fn build_event(&self, routing_key: &str, result: &ReconciliationResult) -> PagerDutyEvent {
        PagerDutyEvent {
            routing_key: routing_key.to_string(),
            event_action: "trigger".to_string(),
            dedup_key: Self::dedup_key(result),
            payload: PagerDutyPayload {
                summary: format!(
                    "CRITICAL: Billing discrepancy of ${} ({:.2}%) detected",
                    result.discrepancy_major(),
                    result.discrepancy_percentage(),
                ),
                source: "meridian-billing-reconciliation".to_string(),
                severity: "critical".to_string(),
                timestamp: result.run_timestamp.to_rfc3339(),
                component: "billing".to_string(),
                group: "financial".to_string(),
                class: "reconciliation".to_string(),
                custom_details: serde_json::json!({
                    "processor_total": result.external_total_major(),
                    "ledger_total": result.internal_total_major(),
                    "discrepancy_amount": result.discrepancy_major(),
                    "discrepancy_percentage": result.discrepancy_percentage(),
                    "missing_on_internal_count": result.missing_on_internal.len(),
                    "missing_on_external_count": result.missing_on_external.len(),
                    "amount_mismatches_count": result.amount_mismatches.len(),
                    "recommendations": result.recommendations,
                }),
            },
            links: vec![PagerDutyLink {
                href: format!("{}/admin/billing/reconciliation", self.dashboard_url),
                text: "View Reconciliation Dashboard".to_string(),
            }],
        }
    }

    /// Triggers a critical incident, or skips if no routing key is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the Events API rejects the event or the request fails.
    pub async fn send(&self, result: &ReconciliationResult) -> Result<(), AlertError> {
        let Some(routing_key) = &self.routing_key else {
            debug!("PagerDuty routing key not configured, skipping PagerDuty alert");
            return Ok(());
        };

        let event = self.build_event(routing_key, result);
        let dedup_key = event.dedup_key.clone();
        let response = self
            .client
            .post(&self.events_url)
            .json(&event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::HttpStatus {
                channel: "PagerDuty Events API".to_string(),
                status,
                body,
            });
        }

        info!(
            "PagerDuty alert sent (dedup_key {dedup_key}, discrepancy {})",
            result.discrepancy_major(),
        );
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use meridian_model::enums::ReconciliationStatus;
    use rstest::rstest;

    use super::*;

    fn result() -> ReconciliationResult {
        ReconciliationResult {
            run_timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 2, 0, 0).unwrap(),
            external_total_minor: 100_000,
            internal_total_minor: 90_000,
            discrepancy_minor: 10_000,
            discrepancy_fraction: 0.10,
            missing_on_internal: vec!["pi_1".to_string(), "pi_2".to_string()],
            missing_on_external: vec![],
            amount_mismatches: vec![],
            status: ReconciliationStatus::DiscrepancyFound,
            recommendations: vec!["Investigate".to_string()],
        }
    }

    #[rstest]
    fn test_dedup_key_is_daily() {
        assert_eq!(
            PagerDutyClient::dedup_key(&result()),
            "billing-reconciliation-2025-03-14"
        );
    }

    #[rstest]
    fn test_event_payload() {
        let client = PagerDutyClient::new(Some("rk_test".to_string()), None, None);
        let event = client.build_event("rk_test", &result());

        assert_eq!(event.event_action, "trigger");
        assert_eq!(event.payload.severity, "critical");
        assert_eq!(
            event.payload.summary,
            "CRITICAL: Billing discrepancy of $100.00 (10.00%) detected"
        );
        assert_eq!(event.payload.custom_details["missing_on_internal_count"], 2);
        assert_eq!(
            event.links[0].href,
            "https://dashboard.meridian.io/admin/billing/reconciliation"
        );
    }

    #[rstest]
    fn test_dashboard_url_override() {
        let client = PagerDutyClient::new(
            Some("rk_test".to_string()),
            None,
            Some("https://ops.example.com".to_string()),
        );
        let event = client.build_event("rk_test", &result());
        assert_eq!(
            event.links[0].href,
            "https://ops.example.com/admin/billing/reconciliation"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_unconfigured_routing_key_skips_silently() {
        let client = PagerDutyClient::new(None, None, None);
        assert!(client.send(&result()).await.is_ok());
    }
}
