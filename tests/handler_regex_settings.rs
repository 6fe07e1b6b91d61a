mod common;

use serde_json::json;

#[tokio::test]
async fn test_get_regex_settings_defaults_to_empty() {
    let server = common::create_test_server();

    let response = server.get("/api/tenants/0/seo/regex").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["IgnoreRegex"], "");
    assert_eq!(json["RegexMatch"], "");
    assert_eq!(json.as_object().unwrap().len(), 10);
}

#[tokio::test]
async fn test_update_regex_settings() {
    let server = common::create_test_server();

    let response = server
        .post("/api/tenants/0/seo/regex")
        .json(&json!({
            "IgnoreRegex": r"\.axd$",
            "DoNotRewriteRegex": "/DesktopModules/"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["success"], true);

    let json = server
        .get("/api/tenants/0/seo/regex")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["IgnoreRegex"], r"\.axd$");
    assert_eq!(json["DoNotRewriteRegex"], "/DesktopModules/");
}

#[tokio::test]
async fn test_invalid_patterns_are_each_reported() {
    let server = common::create_test_server();

    let response = server
        .post("/api/tenants/0/seo/regex")
        .json(&json!({
            "IgnoreRegex": "(",
            "DoNotRewriteRegex": "[",
            "NoFriendlyUrlRegex": "/api/"
        }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");

    let errors = json["error"]["details"]["errors"].as_array().unwrap();
    let fields: Vec<_> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields.len(), 2);
    assert!(fields.contains(&"IgnoreRegex"));
    assert!(fields.contains(&"DoNotRewriteRegex"));
}

#[tokio::test]
async fn test_invalid_patterns_are_not_stored() {
    let server = common::create_test_server();

    server
        .post("/api/tenants/0/seo/regex")
        .json(&json!({ "IgnoreRegex": "(", "NoFriendlyUrlRegex": "/api/" }))
        .await
        .assert_status_bad_request();

    let json = server
        .get("/api/tenants/0/seo/regex")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["NoFriendlyUrlRegex"], "");
}

#[tokio::test]
async fn test_pattern_too_long() {
    let server = common::create_test_server();

    let response = server
        .post("/api/tenants/0/seo/regex")
        .json(&json!({ "IgnoreRegex": "a".repeat(4097) }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_regex_unknown_tenant() {
    let server = common::create_test_server();

    let response = server
        .post("/api/tenants/9/seo/regex")
        .json(&json!({}))
        .await;

    response.assert_status_not_found();
}
