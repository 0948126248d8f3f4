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

//! Integration tests for alert delivery using a mock webhook server.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::post,
};
use chrono::{TimeZone, Utc};
use meridian_alert::{
    DiscrepancyAlerter, pagerduty::PagerDutyClient, slack::SlackWebhook,
};
use meridian_engine::AlertChannel;
use meridian_model::{ReconciliationResult, enums::ReconciliationStatus};
use rstest::rstest;
use serde_json::{Value, json};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct CapturedAlerts {
    slack: Arc<Mutex<Vec<Value>>>,
    pagerduty: Arc<Mutex<Vec<Value>>>,
}

async fn handle_slack(State(state): State<CapturedAlerts>, Json(body): Json<Value>) -> impl IntoResponse {
    state.slack.lock().await.push(body);
    "ok"
}

async fn handle_pagerduty(
    State(state): State<CapturedAlerts>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.pagerduty.lock().await.push(body);
    Json(json!({"status": "success", "message": "Event processed"}))
}

async fn start_test_server() -> (SocketAddr, CapturedAlerts) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = CapturedAlerts::default();
    let router = Router::new()
        .route("/slack", post(handle_slack))
        .route("/v2/enqueue", post(handle_pagerduty))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    (addr, state)
}

fn alerter(addr: SocketAddr) -> DiscrepancyAlerter {
    DiscrepancyAlerter::new(
        SlackWebhook::new(Some(format!("http://{addr}/slack"))),
        PagerDutyClient::new(
            Some("rk_test".to_string()),
            Some(format!("http://{addr}/v2/enqueue")),
            None,
        ),
    )
}

fn result_with_fraction(fraction: f64) -> ReconciliationResult {
    ReconciliationResult {
        run_timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 2, 0, 0).unwrap(),
        external_total_minor: 100_000,
        internal_total_minor: 98_000,
        discrepancy_minor: 2_000,
        discrepancy_fraction: fraction,
        missing_on_internal: vec!["pi_1".to_string()],
        missing_on_external: vec![],
        amount_mismatches: vec![],
        status: ReconciliationStatus::DiscrepancyFound,
        recommendations: vec!["Investigate".to_string()],
    }
}

#[rstest]
#[tokio::test]
async fn test_warning_goes_to_slack_only() {
    let (addr, captured) = start_test_server().await;

    alerter(addr)
        .send_discrepancy_alert(&result_with_fraction(0.02))
        .await
        .unwrap();

    let slack = captured.slack.lock().await;
    let pagerduty = captured.pagerduty.lock().await;
    assert_eq!(slack.len(), 1);
    assert!(pagerduty.is_empty());

    let title = slack[0]["attachments"][0]["title"].as_str().unwrap();
    assert!(title.contains("WARNING"));
}

#[rstest]
#[tokio::test]
async fn test_critical_goes_to_both_channels() {
    let (addr, captured) = start_test_server().await;

    alerter(addr)
        .send_discrepancy_alert(&result_with_fraction(0.10))
        .await
        .unwrap();

    let slack = captured.slack.lock().await;
    let pagerduty = captured.pagerduty.lock().await;
    assert_eq!(slack.len(), 1);
    assert_eq!(pagerduty.len(), 1);

    let title = slack[0]["attachments"][0]["title"].as_str().unwrap();
    assert!(title.contains("CRITICAL"));

    let event = &pagerduty[0];
    assert_eq!(event["routing_key"], "rk_test");
    assert_eq!(event["event_action"], "trigger");
    assert_eq!(event["dedup_key"], "billing-reconciliation-2025-03-14");
    assert_eq!(event["payload"]["severity"], "critical");
}

#[rstest]
#[tokio::test]
async fn test_slack_failure_does_not_block_pagerduty() {
    let (addr, captured) = start_test_server().await;

    let alerter = DiscrepancyAlerter::new(
        // Slack pointed at a route that does not exist
        SlackWebhook::new(Some(format!("http://{addr}/missing"))),
        PagerDutyClient::new(
            Some("rk_test".to_string()),
            Some(format!("http://{addr}/v2/enqueue")),
            None,
        ),
    );

    let outcome = alerter
        .send_discrepancy_alert(&result_with_fraction(0.10))
        .await;

    assert!(outcome.is_err());
    assert_eq!(captured.pagerduty.lock().await.len(), 1);
}
