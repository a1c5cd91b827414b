mod docs;
mod error;
mod services;
mod state;
mod util;

pub mod routes;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the full HTTP surface: API routes, Swagger UI and CORS.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/ai/chat", post(routes::chat::ai_chat))
        .route(
            "/api/permissions/my-permissions",
            get(routes::permissions::my_permissions),
        )
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", docs::ApiDoc::openapi()))
        .merge(api)
        .layer(cors_layer())
}

// Browser clients sit on other origins during development, so the policy
// stays wide open. Credentials never ride on cookies here; auth is the
// bearer header, which is explicitly allowed through.
fn cors_layer() -> CorsLayer {
    const METHODS: [Method; 6] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
