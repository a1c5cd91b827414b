use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document served under /docs.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::chat::ai_chat,
        crate::routes::permissions::my_permissions
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::auth::RegisterRequest,
            crate::routes::auth::LoginRequest,
            crate::routes::auth::SessionResponse,
            crate::routes::auth::UserResponse,
            crate::routes::auth::CurrentUserResponse,
            crate::routes::chat::ChatRequest,
            crate::routes::chat::HistoryItem,
            crate::routes::chat::ChatResponse,
            crate::routes::permissions::MyPermissionsResponse,
            crate::routes::permissions::PermissionEntry,
            crate::routes::permissions::SharedPermissionEntry,
            crate::routes::permissions::PartySummary
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Auth", description = "Authentication and session management"),
        (name = "Assistant", description = "Project assistant chat"),
        (name = "Permissions", description = "Permission aggregation for the session user")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("Bearer")
                        .build(),
                ),
            );
    }
}
