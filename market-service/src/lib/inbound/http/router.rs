use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_item::create_item;
use super::handlers::delete_item::delete_item;
use super::handlers::find_all_items::find_all_items;
use super::handlers::find_item::find_item;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::handlers::update_item::update_item;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::item::ports::ItemServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub item_service: Arc<dyn ItemServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    item_service: Arc<dyn ItemServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        item_service,
    };

    let public_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/items", get(find_all_items));

    let protected_routes = Router::new()
        .route("/items", post(create_item))
        .route("/items/:item_id", get(find_item))
        .route("/items/:item_id", put(update_item))
        .route("/items/:item_id", delete(delete_item))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
