//! Shared helpers for the infra integration tests.

use omflow_domain::{ArcGisConfig, SapConfig};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// applyEdits body that confirms the update.
pub const EDIT_CONFIRMED: &str =
    r#"{"addResults":[],"updateResults":[{"objectId":55,"success":true}]}"#;

/// applyEdits body that reports the update as rejected.
pub const EDIT_REJECTED: &str =
    r#"{"addResults":[],"updateResults":[{"objectId":55,"success":false}]}"#;

pub fn gis_config(base: &str) -> ArcGisConfig {
    ArcGisConfig {
        token_url: format!("{base}/generateToken"),
        username: "gis-user".into(),
        password: "gis-pass".into(),
        referer: "https://maps.example.com".into(),
        order_layer_url: format!("{base}/FeatureServer/0"),
        activity_layer_url: format!("{base}/FeatureServer/1"),
    }
}

pub fn sap_config(base: &str) -> SapConfig {
    SapConfig { api_url: format!("{base}/sap/confirm"), user: "sap-user".into(), password: "sap-pass".into() }
}

/// Serve a fixed GIS token.
pub async fn mount_token_endpoint(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/generateToken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": token, "expires": 0 })),
        )
        .mount(server)
        .await;
}

/// Decode the form-encoded `updates` field of an applyEdits request into
/// its one-element JSON payload.
pub fn decode_update(request: &Request) -> Value {
    let body = String::from_utf8(request.body.clone()).expect("utf-8 form body");
    let updates = url::form_urlencoded::parse(body.as_bytes())
        .find(|(name, _)| name == "updates")
        .map(|(_, value)| value.into_owned())
        .expect("updates form field");

    let mut parsed: Vec<Value> = serde_json::from_str(&updates).expect("updates JSON");
    assert_eq!(parsed.len(), 1, "updates must hold exactly one element");
    parsed.remove(0)
}
