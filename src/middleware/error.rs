//! The terminal stage of the error pipeline.

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};
use bastion_config::Environment;
use bastion_core::{AppError, ForwardedError, classify, respond};
use tracing::{error, warn};

/// Global error middleware.
///
/// Handlers and inner middleware never render their own failures: a
/// returned [`RawError`](bastion_core::RawError) rides out on the response
/// as a [`ForwardedError`]. This layer takes it off the response, classifies
/// it and replaces the response with one rendered for `environment`.
/// Responses without a forwarded failure pass through untouched.
pub async fn handle_errors(
    State(environment): State<Environment>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;
    let Some(forwarded) = response.extensions_mut().remove::<ForwardedError>() else {
        return response;
    };

    let err = classify(forwarded.raw());
    if err.is_operational() {
        warn!(
            method = %method,
            path = %path,
            status = err.status_code(),
            message = err.message(),
            "Request failed"
        );
    } else {
        error!(
            method = %method,
            path = %path,
            status = err.status_code(),
            error = ?forwarded.raw(),
            "Unexpected error"
        );
    }

    respond(&err, environment)
}

/// Fallback for requests no route matched. Nested routers strip their
/// prefix, so the original URI is reported.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    AppError::not_found(format!("Cannot find {} on this server!", target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router, body::Body, http::StatusCode, middleware::from_fn_with_state, routing::get,
    };
    use bastion_core::RawError;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn boom() -> Result<&'static str, RawError> {
        Err(anyhow::anyhow!("secret connection string").into())
    }

    async fn teapot() -> Result<&'static str, AppError> {
        Err(AppError::new(StatusCode::IM_A_TEAPOT, "I'm a teapot"))
    }

    async fn fine() -> &'static str {
        "ok"
    }

    fn app(environment: Environment) -> Router {
        Router::new()
            .route("/boom", get(boom))
            .route("/teapot", get(teapot))
            .route("/fine", get(fine))
            .fallback(not_found)
            .layer(from_fn_with_state(environment, handle_errors))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Option<ForwardedError>, Value) {
        let response = app
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let forwarded = response.extensions().get::<ForwardedError>().cloned();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, forwarded, body)
    }

    #[tokio::test]
    async fn test_operational_error_is_rendered() {
        let (status, forwarded, body) = call(app(Environment::Production), "/teapot").await;

        assert_eq!(status, StatusCode::IM_A_TEAPOT);
        assert!(forwarded.is_none());
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "I'm a teapot");
    }

    #[tokio::test]
    async fn test_unexpected_error_hidden_in_production() {
        let (status, _, body) = call(app(Environment::Production), "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert!(!body.to_string().contains("secret connection string"));
    }

    #[tokio::test]
    async fn test_unexpected_error_detailed_in_development() {
        let (status, _, body) = call(app(Environment::Development), "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "secret connection string");
        assert!(body["stack"].is_string());
        assert_eq!(body["error"]["isOperational"], false);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let response = app(Environment::Development)
            .oneshot(axum::http::Request::builder().uri("/fine").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_not_found_names_path() {
        let (status, forwarded, body) =
            call(app(Environment::Other), "/unmapped-path?page=2").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(forwarded.is_none());
        assert_eq!(
            body["message"],
            "Cannot find /unmapped-path?page=2 on this server!"
        );
    }
}
