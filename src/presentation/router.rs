use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::CloudProxy;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    cognitive_handler, health_handler, index_handler, insights_handler, llm_handler,
    upload_handler,
};
use crate::presentation::state::{DemoState, ProxyState};

pub fn create_proxy_router<P>(state: ProxyState<P>) -> Router
where
    P: CloudProxy + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/llm", get(llm_handler::<P>))
        .route("/cognitive", get(cognitive_handler::<P>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

pub fn create_demo_router(state: DemoState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(index_handler))
        .route("/upload", post(upload_handler))
        .route("/insights", get(insights_handler))
        .route("/health", get(health_handler))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}
