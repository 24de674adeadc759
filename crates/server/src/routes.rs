use std::sync::Arc;

use axum::{
    http::StatusCode,
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

use common::{observability, types::Health};
use service::roster::{RosterService, RosterStore};

use crate::openapi::ApiDoc;

pub mod root;
pub mod statistics;
pub mod students;

pub type Roster = RosterService<RosterStore>;

#[derive(Clone)]
pub struct ServerState {
    pub roster: Arc<Roster>,
}

impl ServerState {
    pub fn new(store: RosterStore) -> Self {
        Self { roster: Arc::new(RosterService::new(Arc::new(store))) }
    }

    /// Refresh the roster-size gauge after a mutation.
    pub async fn publish_size(&self) {
        observability::set_students(self.roster.len().await);
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: roster routes, health, metrics and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // roster API
    let api = Router::new()
        .route("/", get(root::root))
        .route("/students", get(students::list_students).post(students::create_student))
        .route(
            "/students/:name",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/statistics", get(statistics::get_statistics));

    // operational endpoints
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    // swagger is stateless, so it is merged after the state is attached
    api.merge(ops)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
