use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    services::permission::{self as permission_service, GrantedPermission, SharedPermission},
    util::require_bearer,
    ApiError, AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct PartySummary {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub permission_type: String,
    pub granted: bool,
    pub created_at: String,
    pub granter: PartySummary,
}

impl From<GrantedPermission> for PermissionEntry {
    fn from(value: GrantedPermission) -> Self {
        Self {
            id: value.public_id,
            permission_type: value.permission_type,
            granted: value.granted,
            created_at: value.created_at,
            granter: PartySummary {
                name: value.granter_name,
                email: value.granter_email,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharedPermissionEntry {
    pub id: String,
    pub permission_type: String,
    pub sharer: PartySummary,
    pub created_at: String,
}

impl From<SharedPermission> for SharedPermissionEntry {
    fn from(value: SharedPermission) -> Self {
        Self {
            id: value.public_id,
            permission_type: value.permission_type,
            sharer: PartySummary {
                name: value.sharer_name,
                email: value.sharer_email,
            },
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyPermissionsResponse {
    pub permissions: Vec<PermissionEntry>,
    pub shared_permissions: Vec<SharedPermissionEntry>,
    pub role_permissions: Vec<String>,
    pub all_permissions: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/permissions/my-permissions",
    tag = "Permissions",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Every permission source for the session user", body = MyPermissionsResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn my_permissions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MyPermissionsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _session) = state.authenticate(&token).await?;

    let summary = permission_service::summarise_for_user(state.db_pool(), user.id).await?;

    Ok(Json(MyPermissionsResponse {
        permissions: summary
            .permissions
            .into_iter()
            .map(PermissionEntry::from)
            .collect(),
        shared_permissions: summary
            .shared_permissions
            .into_iter()
            .map(SharedPermissionEntry::from)
            .collect(),
        role_permissions: summary.role_permissions,
        all_permissions: summary.all_permissions,
    }))
}
