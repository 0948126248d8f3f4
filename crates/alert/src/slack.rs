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

//! Slack incoming-webhook delivery for discrepancy alerts.

use meridian_core::env::get_optional_env_var;
use meridian_model::{ReconciliationResult, enums::AlertSeverity};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AlertError;

/// Environment variable holding the Slack incoming-webhook URL.
pub const SLACK_WEBHOOK_URL_ENV: &str = "SLACK_WEBHOOK_URL";

/// Maximum number of recommendations quoted in the alert.
const MAX_RECOMMENDATIONS: usize = 3;

const COLOR_CRITICAL: &str = "#FF0000";
const COLOR_WARNING: &str = "#FFA500";

/// A Slack incoming-webhook message.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SlackMessage {
    pub username: String,
    pub icon_emoji: String,
    pub attachments: Vec<SlackAttachment>,
}

/// A single Slack message attachment.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SlackAttachment {
    pub color: String,
    pub title: String,
    pub text: String,
    pub fields: Vec<SlackField>,
    pub footer: String,
    pub ts: i64,
}

/// One field within a Slack attachment.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Slack webhook channel. Unconfigured instances skip delivery silently.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl SlackWebhook {
    /// Creates a new [`SlackWebhook`] instance.
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a new [`SlackWebhook`] with the URL taken from `SLACK_WEBHOOK_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(get_optional_env_var(SLACK_WEBHOOK_URL_ENV))
    }

    /// Builds the webhook message for the given result and severity.
    #[must_use]
    pub fn build_message(result: &ReconciliationResult, severity: AlertSeverity) -> SlackMessage {
        let (color, emoji) = match severity {
            AlertSeverity::Critical => (COLOR_CRITICAL, ":rotating_light:"),
            AlertSeverity::Warning => (COLOR_WARNING, ":warning:"),
        };

        let severity_label = severity.to_string().to_uppercase();
        let discrepancy = result.discrepancy_major();
        let percentage = result.discrepancy_percentage();

        let recommendations = if result.recommendations.is_empty() {
            "No recommendations".to_string()
        } else {
            result
                .recommendations
                .iter()
                .take(MAX_RECOMMENDATIONS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        };

        SlackMessage {
            username: "Billing Reconciliation Bot".to_string(),
            icon_emoji: ":money_with_wings:".to_string(),
            attachments: vec![SlackAttachment {
                color: color.to_string(),
                title: format!("{emoji} Billing Reconciliation Alert - {severity_label}"),
                text: format!(
                    "A billing discrepancy of ${discrepancy} ({percentage:.2}%) has been detected."
                ),
                fields: vec![
                    SlackField {
                        title: "Processor Total".to_string(),
                        value: format!("${}", result.external_total_major()),
                        short: true,
                    },
                    SlackField {
                        title: "Ledger Total".to_string(),
                        value: format!("${}", result.internal_total_major()),
                        short: true,
                    },
                    SlackField {
                        title: "Discrepancy".to_string(),
                        value: format!("${discrepancy} ({percentage:.2}%)"),
                        short: true,
                    },
                    SlackField {
                        title: "Missing in Ledger".to_string(),
                        value: format!("{} payments", result.missing_on_internal.len()),
                        short: true,
                    },
                    SlackField {
                        title: "Missing at Processor".to_string(),
                        value: format!("{} payments", result.missing_on_external.len()),
                        short: true,
                    },
                    SlackField {
                        title: "Amount Mismatches".to_string(),
                        value: format!("{} payments", result.amount_mismatches.len()),
                        short: true,
                    },
                    SlackField {
                        title: "Recommendations".to_string(),
                        value: recommendations,
                        short: false,
                    },
                ],
                footer: "Meridian Billing Reconciliation".to_string(),
                ts: result.run_timestamp.timestamp(),
            }],
        }
    }

    /// Delivers the discrepancy alert, or skips if no webhook URL is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook rejects the message or the request fails.
    pub async fn send(
        &self,
        result: &ReconciliationResult,
        severity: AlertSeverity,
    ) -> Result<(), AlertError> {
        let Some(webhook_url) = &self.webhook_url else {
            debug!("Slack webhook URL not configured, skipping Slack alert");
            return Ok(());
        };

        let message = Self::build_message(result, severity);
        let response = self.client.post(webhook_url).json(&message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::HttpStatus {
                channel: "Slack webhook".to_string(),
                status,
                body,
            });
        }

        info!(
            "Slack alert sent (severity {severity}, discrepancy {})",
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
            external_total_minor: 10_000,
            internal_total_minor: 9_500,
            discrepancy_minor: 500,
            discrepancy_fraction: 0.05,
            missing_on_internal: vec!["pi_1".to_string()],
            missing_on_external: vec![],
            amount_mismatches: vec![],
            status: ReconciliationStatus::DiscrepancyFound,
            recommendations: vec![
                "First".to_string(),
                "Second".to_string(),
                "Third".to_string(),
                "Fourth".to_string(),
            ],
        }
    }

    #[rstest]
    fn test_critical_message_formatting() {
        let message = SlackWebhook::build_message(&result(), AlertSeverity::Critical);
        let attachment = &message.attachments[0];

        assert_eq!(message.username, "Billing Reconciliation Bot");
        assert_eq!(attachment.color, "#FF0000");
        assert_eq!(
            attachment.title,
            ":rotating_light: Billing Reconciliation Alert - CRITICAL"
        );
        assert_eq!(
            attachment.text,
            "A billing discrepancy of $5.00 (5.00%) has been detected."
        );
        assert_eq!(attachment.ts, 1_741_917_600);
    }

    #[rstest]
    fn test_warning_uses_orange_and_warning_emoji() {
        let message = SlackWebhook::build_message(&result(), AlertSeverity::Warning);
        let attachment = &message.attachments[0];

        assert_eq!(attachment.color, "#FFA500");
        assert!(attachment.title.starts_with(":warning:"));
        assert!(attachment.title.ends_with("WARNING"));
    }

    #[rstest]
    fn test_fields_summarize_signals() {
        let message = SlackWebhook::build_message(&result(), AlertSeverity::Warning);
        let fields = &message.attachments[0].fields;

        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0].value, "$100.00");
        assert_eq!(fields[1].value, "$95.00");
        assert_eq!(fields[3].value, "1 payments");
        assert_eq!(fields[4].value, "0 payments");
    }

    #[rstest]
    fn test_recommendations_capped_at_three() {
        let message = SlackWebhook::build_message(&result(), AlertSeverity::Warning);
        let recommendations = &message.attachments[0].fields[6].value;

        assert_eq!(recommendations, "First\nSecond\nThird");
        assert!(!recommendations.contains("Fourth"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_unconfigured_webhook_skips_silently() {
        let webhook = SlackWebhook::new(None);
        let outcome = webhook.send(&result(), AlertSeverity::Warning).await;
        assert!(outcome.is_ok());
    }
}
