use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, Router};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;

use crate::state::Services;

pub mod generate;
pub mod root;

pub fn create_app(services: Services, request_timeout: Duration) -> Router {
    Router::new()
        .merge(root::create_route())
        .merge(generate::create_route(services))
        .layer(ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(|_| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .layer(TimeoutLayer::new(request_timeout)),
        )
}
