//! DTOs for the friendly URL and rewrite test endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::PageId;
use crate::engine::DiagnosticsReport;

/// Query of `GET /api/tenants/{tenant_id}/seo/test-url`.
///
/// Empty `query_string` and `custom_page_name` parameters are treated as absent.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct TestUrlQuery {
    #[validate(range(min = 0))]
    pub page_id: PageId,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub query_string: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 200))]
    pub custom_page_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TestUrlResponse {
    pub urls: Vec<String>,
}

/// Query of `GET /api/tenants/{tenant_id}/seo/test-rewrite`.
///
/// A blank `uri` is accepted and reported as malformed in the result.
#[derive(Debug, Deserialize, Validate)]
pub struct TestRewriteQuery {
    #[validate(length(max = 4096, message = "uri must be at most 4096 characters"))]
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub struct TestRewriteResponse {
    pub rewriting_result: DiagnosticsReport,
}
