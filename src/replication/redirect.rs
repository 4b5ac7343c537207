//! Redirect every request to the master.

use std::sync::Arc;

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};

/// `http://MASTER` + the original path and query.
pub fn master_location(master: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("http://{}{}", master, path_and_query)
}

pub async fn redirect_handler(State(master): State<Arc<str>>, uri: Uri) -> Response {
    let location = master_location(&master, &uri);
    tracing::debug!(location = %location, "Redirecting to master");
    Redirect::temporary(&location).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{header, Request, StatusCode}, routing::any, Router};
    use tower::ServiceExt;

    #[test]
    fn test_location_keeps_path_and_query() {
        let uri: Uri = "/db/host?wait".parse().unwrap();
        assert_eq!(master_location("10.0.0.30:6666", &uri), "http://10.0.0.30:6666/db/host?wait");
    }

    #[tokio::test]
    async fn test_redirect_is_temporary() {
        let app = Router::new()
            .route("/{*path}", any(redirect_handler))
            .with_state(Arc::<str>::from("master:6666"));
        let res = app
            .oneshot(Request::builder().method("POST").uri("/a/b").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.headers()[header::LOCATION], "http://master:6666/a/b");
    }
}
