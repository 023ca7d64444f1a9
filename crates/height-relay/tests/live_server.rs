use std::env;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

fn assert_wildcard_cors(resp: &reqwest::Response) {
    let allow_origin = resp
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_origin, Some("*"), "every response must allow any origin");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a running height-relay process; set HEIGHT_RELAY_TEST_BASE_URL"]
async fn live_server_covers_record_endpoints() {
    let base_url = env::var("HEIGHT_RELAY_TEST_BASE_URL")
        .expect("HEIGHT_RELAY_TEST_BASE_URL must be set");
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("reqwest client must build");

    // =========================================================================
    // Preflight
    // =========================================================================

    let preflight = client
        .request(Method::OPTIONS, format!("{base_url}/update-height"))
        .send()
        .await
        .expect("preflight must return a response");
    assert_eq!(preflight.status(), StatusCode::NO_CONTENT);
    assert_wildcard_cors(&preflight);

    // =========================================================================
    // Singleton record
    // =========================================================================

    let bad_param = client
        .delete(format!("{base_url}/delete-and-instantiate/abc"))
        .send()
        .await
        .expect("invalid instantiate must return a response");
    assert_eq!(bad_param.status(), StatusCode::BAD_REQUEST);
    assert_wildcard_cors(&bad_param);

    let instantiate = client
        .delete(format!("{base_url}/delete-and-instantiate/77"))
        .send()
        .await
        .expect("instantiate must return a response");
    assert!(
        instantiate.status() == StatusCode::CREATED || instantiate.status() == StatusCode::OK,
        "unexpected instantiate status {}",
        instantiate.status()
    );

    let current: Value = client
        .get(format!("{base_url}/current-height-db"))
        .send()
        .await
        .expect("current height must return a response")
        .json()
        .await
        .expect("current height must be JSON");
    assert_eq!(current, serde_json::json!({ "height": 77 }));

    let missing_field = client
        .put(format!("{base_url}/update-height"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("update without height must return a response");
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        missing_field.text().await.unwrap_or_default(),
        "Missing `height` in request body"
    );

    let updated: Value = client
        .put(format!("{base_url}/update-height"))
        .json(&serde_json::json!({ "height": 78 }))
        .send()
        .await
        .expect("update must return a response")
        .json()
        .await
        .expect("update response must be JSON");
    assert_eq!(updated, serde_json::json!({ "height": 78 }));

    // =========================================================================
    // Fallback
    // =========================================================================

    let missing = client
        .get(format!("{base_url}/no-such-route"))
        .send()
        .await
        .expect("unknown route must return a response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_wildcard_cors(&missing);
    let body: Value = missing.json().await.expect("404 body must be JSON");
    assert_eq!(body, serde_json::json!({ "message": "Not Found" }));
}
