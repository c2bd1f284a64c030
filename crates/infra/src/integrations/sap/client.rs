//! SAP work-confirmation client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use omflow_core::ports::SapNotifications;
use omflow_domain::constants::{SAP_OPERATION, SAP_PLANT, SAP_REASON};
use omflow_domain::time::{Clock, SystemClock};
use omflow_domain::{OmFlowError, Result, SapConfig, SapOutcome, WorkConfirmation};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use crate::http::HttpClient;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H%M%S";

/// Client for the SAP confirmation endpoint
///
/// The endpoint expects an HTTP GET carrying Basic credentials and a JSON
/// body - unusual, but that is the documented contract.
pub struct SapNotifier {
    http: HttpClient,
    config: SapConfig,
    clock: Arc<dyn Clock>,
}

/// Fixed-shape confirmation request
#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct ConfirmationRequest {
    /// Operation code, fixed
    vornr: &'static str,
    /// Maintenance order id
    aufnr: String,
    /// Posting date (today)
    budat: String,
    /// Executing work center
    arbpl: String,
    /// Work start date/time
    isdd: String,
    isdz: String,
    /// Work end date/time
    iedd: String,
    iedz: String,
    /// Reason code, fixed
    grund: &'static str,
    /// Plant code, fixed
    plant: &'static str,
}

impl SapNotifier {
    /// Create a notifier using the system clock.
    pub fn new(config: SapConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a notifier with an injected clock (posting date under test).
    pub fn with_clock(config: SapConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let http =
            HttpClient::builder().timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS)).build()?;
        Ok(Self { http, config, clock })
    }

    /// Post a work confirmation.
    ///
    /// Never returns an error: validation and transport failures alike
    /// are folded into the outcome so the caller can compose it with the
    /// GIS-edit result.
    pub async fn confirm(&self, confirmation: &WorkConfirmation) -> SapOutcome {
        match self.send_confirmation(confirmation).await {
            Ok(()) => SapOutcome::ok("SAP accepted the work confirmation."),
            Err(err) => {
                warn!(order_id = %confirmation.order_id, error = %err, "SAP confirmation failed");
                SapOutcome::failed(format!("SAP confirmation failed: {err}"))
            }
        }
    }

    async fn send_confirmation(&self, confirmation: &WorkConfirmation) -> Result<()> {
        let request_body = self.build_request(confirmation)?;

        let request = self
            .http
            .request(Method::GET, &self.config.api_url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&request_body);
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmFlowError::Network(format!("SAP endpoint returned HTTP {status}")));
        }

        let body = response.text().await.unwrap_or_default();
        debug!(order_id = %request_body.aufnr, %status, body = %body, "SAP confirmation accepted");
        Ok(())
    }

    fn build_request(&self, confirmation: &WorkConfirmation) -> Result<ConfirmationRequest> {
        if confirmation.order_id.trim().is_empty() || confirmation.work_center.trim().is_empty() {
            return Err(OmFlowError::InvalidInput(
                "order id and work center are required".to_string(),
            ));
        }

        let started_at = parse_epoch_millis(&confirmation.started_at_ms)?;
        let finished_at = parse_epoch_millis(&confirmation.finished_at_ms)?;

        Ok(ConfirmationRequest {
            vornr: SAP_OPERATION,
            aufnr: confirmation.order_id.clone(),
            budat: self.clock.now_utc().format(DATE_FORMAT).to_string(),
            arbpl: confirmation.work_center.clone(),
            isdd: started_at.format(DATE_FORMAT).to_string(),
            isdz: started_at.format(TIME_FORMAT).to_string(),
            iedd: finished_at.format(DATE_FORMAT).to_string(),
            iedz: finished_at.format(TIME_FORMAT).to_string(),
            grund: SAP_REASON,
            plant: SAP_PLANT,
        })
    }
}

fn parse_epoch_millis(raw: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = raw.trim().parse().map_err(|_| {
        OmFlowError::InvalidInput(format!("{raw:?} is not a valid epoch-milliseconds timestamp"))
    })?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        OmFlowError::InvalidInput(format!("{millis} is out of range for a timestamp"))
    })
}

#[async_trait]
impl SapNotifications for SapNotifier {
    async fn confirm(&self, confirmation: &WorkConfirmation) -> SapOutcome {
        Self::confirm(self, confirmation).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use omflow_domain::time::MockClock;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sap_config(api_url: &str) -> SapConfig {
        SapConfig { api_url: api_url.into(), user: "u".into(), password: "p".into() }
    }

    fn fixed_clock() -> Arc<MockClock> {
        Arc::new(MockClock::starting_at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()))
    }

    fn notifier(api_url: &str) -> SapNotifier {
        SapNotifier::with_clock(sap_config(api_url), fixed_clock()).expect("sap notifier")
    }

    fn confirmation() -> WorkConfirmation {
        WorkConfirmation {
            order_id: "5079612".into(),
            work_center: "PTENG".into(),
            started_at_ms: "1709290800000".into(),
            finished_at_ms: "1709294400000".into(),
        }
    }

    #[test]
    fn epoch_zero_maps_to_unix_origin_fields() {
        let notifier = notifier("https://sap.example.com/confirm");
        let confirmation = WorkConfirmation {
            order_id: "5079612".into(),
            work_center: "PTENG".into(),
            started_at_ms: "0".into(),
            finished_at_ms: "0".into(),
        };

        let request = notifier.build_request(&confirmation).unwrap();

        assert_eq!(request.isdd, "19700101");
        assert_eq!(request.isdz, "000000");
        assert_eq!(request.iedd, "19700101");
        assert_eq!(request.iedz, "000000");
    }

    #[test]
    fn posting_date_comes_from_the_clock() {
        let notifier = notifier("https://sap.example.com/confirm");

        let request = notifier.build_request(&confirmation()).unwrap();

        assert_eq!(request.budat, "20240301");
        assert_eq!(request.vornr, "0010");
        assert_eq!(request.grund, "TRFI");
        assert_eq!(request.plant, "0060");
    }

    #[test]
    fn request_serializes_with_sap_field_names() {
        let notifier = notifier("https://sap.example.com/confirm");

        let request = notifier.build_request(&confirmation()).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["VORNR"], "0010");
        assert_eq!(value["AUFNR"], "5079612");
        assert_eq!(value["ARBPL"], "PTENG");
        assert_eq!(value["ISDD"], "20240301");
        assert_eq!(value["PLANT"], "0060");
    }

    #[tokio::test]
    async fn successful_confirmation_reports_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/confirm"))
            .and(header("Authorization", "Basic dTpw"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = notifier(&format!("{}/confirm", server.uri()));
        let outcome = notifier.confirm(&confirmation()).await;

        assert!(outcome.success);
        assert!(outcome.message.contains("accepted"));
    }

    #[tokio::test]
    async fn empty_order_id_fails_without_a_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let notifier = notifier(&format!("{}/confirm", server.uri()));
        let confirmation = WorkConfirmation {
            order_id: "  ".into(),
            work_center: "PTENG".into(),
            started_at_ms: "0".into(),
            finished_at_ms: "0".into(),
        };
        let outcome = notifier.confirm(&confirmation).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("required"));
    }

    #[tokio::test]
    async fn malformed_timestamp_fails_the_outcome() {
        let notifier = notifier("https://sap.example.com/confirm");
        let confirmation = WorkConfirmation {
            order_id: "5079612".into(),
            work_center: "PTENG".into(),
            started_at_ms: "not-a-number".into(),
            finished_at_ms: "0".into(),
        };

        let outcome = notifier.confirm(&confirmation).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("timestamp"));
    }

    #[tokio::test]
    async fn server_error_becomes_a_failed_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/confirm"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let notifier = notifier(&format!("{}/confirm", server.uri()));
        let outcome = notifier.confirm(&confirmation()).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_never_raises() {
        let notifier = notifier("http://127.0.0.1:9/confirm");

        let outcome = notifier.confirm(&confirmation()).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("SAP confirmation failed"));
    }
}
