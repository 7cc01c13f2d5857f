//! Axum routes for the two endpoints.

use axum::{
    Router,
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    routing::get,
};
use embox_core::Raw;
use http::{HeaderValue, header};
use tower_http::trace::TraceLayer;

use crate::{EmbyService, ListParams};

/// Builds the application router with `/list` and `/views` under `prefix`.
///
/// An empty or `/` prefix mounts the routes at the root.
pub fn router(service: EmbyService, prefix: &str) -> Router {
    let routes = Router::new()
        .route("/list", get(list))
        .route("/views", get(views))
        .with_state(service);

    let prefix = prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&format!("/{prefix}"), routes)
    };

    app.layer(TraceLayer::new_for_http())
}

async fn list(State(service): State<EmbyService>, RawQuery(query): RawQuery) -> Response {
    let params = ListParams::from_query(query.as_deref());
    json(service.list(&params).await)
}

async fn views(State(service): State<EmbyService>) -> Response {
    json(service.views().await)
}

fn json(body: Raw) -> Response {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}
