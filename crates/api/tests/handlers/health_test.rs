use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_reports_candidate_space() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["classrooms"], 9);
    assert_eq!(body["time_windows"], 5);
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/version").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
