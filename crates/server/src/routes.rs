use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::AppState};

pub mod books;
pub mod categories;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: catalog routes, health, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let category_routes = Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/:id",
            get(categories::get).patch(categories::update).delete(categories::delete),
        )
        .route("/categories/:id/subcategories", get(categories::subcategories))
        .route("/categories/:id/descendants", get(categories::descendants))
        .route("/categories/:id/breadcrumbs", get(categories::breadcrumbs))
        .route("/categories/:id/path", get(categories::ancestor_path));

    let book_routes = Router::new()
        .route("/books", get(books::list).post(books::create))
        .route("/books/:id", get(books::get).patch(books::update).delete(books::delete))
        .route("/books/category/:category_id", get(books::by_category));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::expose))
        .merge(category_routes)
        .merge(book_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(metrics::track))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
