use std::time::Duration;

use axum::{
    BoxError, Router, error_handling::HandleErrorLayer, http::StatusCode, response::Response,
};
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

use crate::infrastructure::settings::Settings;
use crate::presentation::http::app_error::error_response;

/// Request timeout, in-flight request cap and body size cap.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_limit_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.http_request_timeout_secs,
                )))
                .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit)),
        )
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
}

async fn handle_limit_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return error_response(StatusCode::REQUEST_TIMEOUT, "request timed out");
    }

    warn!(error = %err, "request failed in middleware");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}
