use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Counts and times every request, labelled by the matched route template
/// rather than the raw path.
pub async fn track(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(req).await;

    common::metrics::observe_request(&method, &route, response.status().as_u16(), started.elapsed().as_secs_f64());
    response
}

pub async fn expose() -> impl IntoResponse {
    common::metrics::encode_metrics()
}
