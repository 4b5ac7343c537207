//! Outcome → HTTP response mapping.
//!
//! | Outcome          | Status | Content-Type      | Body                  |
//! |------------------|--------|-------------------|-----------------------|
//! | `Json`           | 200    | application/json  | pretty JSON           |
//! | `Text`           | 200    | text/plain        | raw string leaf       |
//! | `Rendered`       | 200    | text/plain        | template output       |
//! | `Missing`        | 404    | application/json  | `null`                |
//! | `Internal`       | 500    | application/json  | JSON-encoded message  |
//! | `TemplateFailed` | 500    | text/plain        | raw message           |
//! | `Triggered`      | 200    | -                 | empty                 |
//! | `NotSupported`   | 402    | text/plain        | `Not supported`       |

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::coordinator::Outcome;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Json(body) => (StatusCode::OK, [(header::CONTENT_TYPE, JSON)], body).into_response(),
            Outcome::Text(body) | Outcome::Rendered(body) => {
                (StatusCode::OK, [(header::CONTENT_TYPE, TEXT)], body).into_response()
            }
            Outcome::Missing => {
                (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, JSON)], "null").into_response()
            }
            Outcome::Internal(message) => {
                let body = serde_json::Value::String(message).to_string();
                (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, JSON)], body).into_response()
            }
            Outcome::TemplateFailed(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, TEXT)], message).into_response()
            }
            Outcome::Triggered => StatusCode::OK.into_response(),
            Outcome::NotSupported => (StatusCode::PAYMENT_REQUIRED, "Not supported").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parts(outcome: Outcome) -> (StatusCode, Option<String>, String) {
        let response = outcome.into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_is_null_404() {
        let (status, ct, body) = parts(Outcome::Missing).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(ct.as_deref(), Some(JSON));
        assert_eq!(body, "null");
    }

    #[tokio::test]
    async fn test_internal_error_is_json_string() {
        let (status, _, body) = parts(Outcome::Internal("bad \"doc\"".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#""bad \"doc\"""#);
    }

    #[tokio::test]
    async fn test_template_failure_is_raw_text() {
        let (status, ct, body) = parts(Outcome::TemplateFailed("template: x".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ct.as_deref(), Some(TEXT));
        assert_eq!(body, "template: x");
    }

    #[tokio::test]
    async fn test_not_supported_is_402() {
        let (status, _, body) = parts(Outcome::NotSupported).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body, "Not supported");
    }

    #[tokio::test]
    async fn test_string_leaf_is_plain_text() {
        let (status, ct, body) = parts(Outcome::Text("h".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ct.as_deref(), Some(TEXT));
        assert_eq!(body, "h");
    }
}
