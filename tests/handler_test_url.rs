mod common;

use friendly_urls::engine::NONE;
use serde_json::json;

#[tokio::test]
async fn test_build_friendly_urls_for_every_alias() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-url")
        .add_query_param("page_id", 53)
        .add_query_param("query_string", "ab=cd")
        .add_query_param("custom_page_name", "test-page")
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["urls"],
        json!([
            "http://site.com/About-Us/test-page?ab=cd",
            "http://www.site.com/About-Us/test-page?ab=cd"
        ])
    );
}

#[tokio::test]
async fn test_empty_parameters_are_ignored() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-url?page_id=53&query_string=&custom_page_name=")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["urls"][0],
        "http://site.com/About-Us"
    );
}

#[tokio::test]
async fn test_build_friendly_urls_unknown_page() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-url")
        .add_query_param("page_id", 99)
        .await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["page_id"], 99);
}

#[tokio::test]
async fn test_build_friendly_urls_negative_page_id() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-url")
        .add_query_param("page_id", -1)
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_rewrite_friendly_url() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-rewrite")
        .add_query_param("uri", "http://site.com/About-Us")
        .await;

    response.assert_status_ok();

    let report = &response.json::<serde_json::Value>()["rewriting_result"];
    assert_eq!(report["rewriting_result"], "/Default.aspx?TabId=53");
    assert_eq!(report["identified_page"], "About Us");
    assert_eq!(report["redirection_reason"], "Friendly URL rewritten");
    assert!(!report["operation_messages"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_rewrite_wrong_case_after_settings_update() {
    let server = common::create_test_server();

    server
        .post("/api/tenants/0/seo/general")
        .json(&json!({
            "enable_system_generated_urls": true,
            "replace_space_with": "hyphen",
            "force_lower_case": true,
            "redirect_unfriendly": true,
            "redirect_wrong_case": true
        }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/tenants/0/seo/test-rewrite")
        .add_query_param("uri", "http://site.com/My-Page")
        .await;

    let report = &response.json::<serde_json::Value>()["rewriting_result"];
    assert_eq!(report["redirection_reason"], "URL contained upper case characters");
    assert_eq!(report["redirection_result"], "http://site.com/my-page");
}

#[tokio::test]
async fn test_rewrite_deleted_page_returns_not_found() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-rewrite")
        .add_query_param("uri", "http://site.com/Old")
        .await;

    let report = &response.json::<serde_json::Value>()["rewriting_result"];
    assert_eq!(report["rewriting_result"], NONE);
    assert_eq!(report["redirection_reason"], "Page not found");
}

#[tokio::test]
async fn test_rewrite_ignored_request() {
    let server = common::create_test_server();

    server
        .post("/api/tenants/0/seo/regex")
        .json(&json!({ "IgnoreRegex": r"\.axd$", "DoNotRewriteRegex": r"\.axd$" }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/tenants/0/seo/test-rewrite")
        .add_query_param("uri", "http://site.com/WebResource.axd")
        .await;

    let report = &response.json::<serde_json::Value>()["rewriting_result"];
    assert_eq!(report["redirection_reason"], "Request matched the ignore pattern");
}

#[tokio::test]
async fn test_rewrite_malformed_uri() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/0/seo/test-rewrite")
        .add_query_param("uri", "not a uri")
        .await;

    response.assert_status_ok();

    let report = &response.json::<serde_json::Value>()["rewriting_result"];
    assert_eq!(report["rewriting_result"], NONE);
    assert_eq!(report["culture"], NONE);
    assert_eq!(report["identified_page"], NONE);
    assert_eq!(report["redirection_reason"], NONE);
    assert_eq!(report["redirection_result"], NONE);
    assert!(
        report["operation_messages"]
            .as_str()
            .unwrap()
            .starts_with("Malformed URI")
    );
}

#[tokio::test]
async fn test_rewrite_unknown_tenant() {
    let server = common::create_test_server();

    let response = server
        .get("/api/tenants/9/seo/test-rewrite")
        .add_query_param("uri", "http://site.com/")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["rewriting_result"]["operation_messages"],
        "URL settings unavailable for tenant 9"
    );
}

#[tokio::test]
async fn test_rewrite_empty_uri_is_reported_as_malformed() {
    let server = common::create_test_server();

    for uri in ["", "   "] {
        let response = server
            .get("/api/tenants/0/seo/test-rewrite")
            .add_query_param("uri", uri)
            .await;

        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        let result = &json["rewriting_result"];
        for field in [
            "rewriting_result",
            "culture",
            "identified_page",
            "redirection_reason",
            "redirection_result",
        ] {
            assert_eq!(result[field], NONE, "{field}");
        }
        assert!(
            result["operation_messages"]
                .as_str()
                .unwrap()
                .starts_with("Malformed URI")
        );
    }
}

#[tokio::test]
async fn test_rewrite_rejects_oversized_uri() {
    let server = common::create_test_server();
    let uri = format!("http://site.com/{}", "a".repeat(4100));

    let response = server
        .get("/api/tenants/0/seo/test-rewrite")
        .add_query_param("uri", &uri)
        .await;

    response.assert_status_bad_request();
}
