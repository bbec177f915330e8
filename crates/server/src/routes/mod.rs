//! HTTP routing for the v1 API.

pub mod tasks;

use std::time::Instant;

use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/v1/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/v1/tasks/watch", get(tasks::watch_tasks))
        .route(
            "/v1/tasks/:task_id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// One log line per handled request.
async fn access_log<B>(request: Request<B>, next: Next<B>) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let begin = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %uri,
        code = response.status().as_u16(),
        elapsed = ?begin.elapsed(),
        "request"
    );
    response
}
