//! Request classification and request ids.

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, Request, Uri};
use percent_encoding::percent_decode_str;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::coordinator::CoreRequest;

/// Query key that asks a read or render to wait for a trigger first.
pub const WAIT_PARAM: &str = "wait";

/// Map an HTTP request onto the core operation it asks for.
///
/// Methods are matched case-insensitively: GET reads, POST renders the body
/// as a template, PUT triggers. The wait/trigger key is the decoded path.
pub fn classify(method: &Method, uri: &Uri, body: Bytes) -> CoreRequest {
    let path = decode_path(uri.path());
    let wait = wants_wait(uri);

    match method.as_str().to_ascii_uppercase().as_str() {
        "GET" => CoreRequest::Read { path, wait },
        "POST" => CoreRequest::Render {
            path,
            wait,
            template: String::from_utf8_lossy(&body).into_owned(),
        },
        "PUT" => CoreRequest::Trigger { path },
        other => CoreRequest::Unsupported {
            method: other.to_string(),
        },
    }
}

/// `?wait`, `?wait=1`, `?a=b&wait` all count.
pub fn wants_wait(uri: &Uri) -> bool {
    uri.query().is_some_and(|query| {
        url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == WAIT_PARAM)
    })
}

/// Percent-decode a URI path. Invalid escapes are kept verbatim.
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// UUID v4 request ids for `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
